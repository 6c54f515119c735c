//! The `MethodSpec` table (0x2B): instantiations of generic methods.

mod raw;
mod reader;

pub use raw::*;
