//! The `NestedClass` table (0x29): links a nested type to its enclosing type.

mod raw;
mod reader;

pub use raw::*;
