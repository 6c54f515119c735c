//! The `TypeRef` table (0x01): types referenced from other modules or assemblies.

mod raw;
mod reader;

pub use raw::*;
