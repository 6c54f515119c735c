//! The `Param` table (0x08). Sequence 0 describes the return value.

mod raw;
mod reader;

pub use raw::*;

/// Flags of a `Param` row (ECMA-335 II.23.1.13)
#[allow(non_snake_case)]
pub mod ParamAttributes {
    /// Input parameter
    pub const IN: u32 = 0x0001;
    /// Output parameter
    pub const OUT: u32 = 0x0002;
    /// Optional parameter
    pub const OPTIONAL: u32 = 0x0010;
    /// Has a default value
    pub const HAS_DEFAULT: u32 = 0x1000;
    /// Has marshalling information
    pub const HAS_FIELD_MARSHAL: u32 = 0x2000;
}
