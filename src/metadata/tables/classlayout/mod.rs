//! The `ClassLayout` table (0x0F): explicit packing and size of a type.

mod raw;
mod reader;

pub use raw::*;
