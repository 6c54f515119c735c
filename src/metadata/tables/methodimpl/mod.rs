//! The `MethodImpl` table (0x19): explicit interface and virtual method overrides.

mod raw;
mod reader;

pub use raw::*;
