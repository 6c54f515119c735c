//! The `ModuleRef` table (0x1A).

mod raw;
mod reader;

pub use raw::*;
