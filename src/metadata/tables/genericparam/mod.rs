//! The `GenericParam` table (0x2A): generic parameters of types and methods.

mod raw;
mod reader;

pub use raw::*;

/// Flags of a `GenericParam` row (ECMA-335 II.23.1.7)
#[allow(non_snake_case)]
pub mod GenericParamAttributes {
    /// Mask for the variance bits
    pub const VARIANCE_MASK: u32 = 0x0003;
    /// Covariant (`+`)
    pub const COVARIANT: u32 = 0x0001;
    /// Contravariant (`-`)
    pub const CONTRAVARIANT: u32 = 0x0002;
    /// `class` constraint
    pub const REFERENCE_TYPE_CONSTRAINT: u32 = 0x0004;
    /// `valuetype` constraint
    pub const NOT_NULLABLE_VALUE_TYPE_CONSTRAINT: u32 = 0x0008;
    /// `.ctor` constraint
    pub const DEFAULT_CONSTRUCTOR_CONSTRAINT: u32 = 0x0010;
}
