//! The `Property` table (0x17).

mod raw;
mod reader;

pub use raw::*;

/// Flags of a `Property` row
#[allow(non_snake_case)]
pub mod PropertyAttributes {
    /// The name is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// The runtime checks the name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x0400;
    /// Has a default value
    pub const HAS_DEFAULT: u32 = 0x1000;
}
