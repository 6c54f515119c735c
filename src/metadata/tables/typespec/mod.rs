//! The `TypeSpec` table (0x1B): types described by a signature blob, such as generic instantiations.

mod raw;
mod reader;

pub use raw::*;
