//! The `MemberRef` table (0x0A): references to fields and methods of other types.
//!
//! Whether a row names a field or a method is decided by the first byte of its signature
//! blob (`0x06` for fields).

mod raw;
mod reader;

pub use raw::*;
