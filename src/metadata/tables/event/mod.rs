//! The `Event` table (0x14).

mod raw;
mod reader;

pub use raw::*;

/// Flags of an `Event` row
#[allow(non_snake_case)]
pub mod EventAttributes {
    /// The name is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// The runtime checks the name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x0400;
}
