//! The `CustomAttribute` table (0x0C).

mod raw;
mod reader;

pub use raw::*;
