//! The `MethodDef` table (0x06). Flag sets live in [`crate::metadata::method`].

mod raw;
mod reader;

pub use raw::*;
