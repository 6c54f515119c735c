//! The `MethodSemantics` table (0x18): binds accessor methods to events and properties.

mod raw;
mod reader;

pub use raw::*;

/// Roles of an accessor method (ECMA-335 II.23.1.12)
#[allow(non_snake_case)]
pub mod MethodSemanticsAttributes {
    /// Property setter
    pub const SETTER: u32 = 0x0001;
    /// Property getter
    pub const GETTER: u32 = 0x0002;
    /// Other accessor
    pub const OTHER: u32 = 0x0004;
    /// Event add accessor
    pub const ADD_ON: u32 = 0x0008;
    /// Event remove accessor
    pub const REMOVE_ON: u32 = 0x0010;
    /// Event raise accessor
    pub const FIRE: u32 = 0x0020;
}
