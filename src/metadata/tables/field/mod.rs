//! The `Field` table (0x04).

mod raw;
mod reader;

pub use raw::*;

/// Flags of a `Field` row (ECMA-335 II.23.1.5)
#[allow(non_snake_case)]
pub mod FieldAttributes {
    /// Mask for the access bits
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Accessible only from the compiler
    pub const COMPILER_CONTROLLED: u32 = 0x0000;
    /// Private
    pub const PRIVATE: u32 = 0x0001;
    /// Family and assembly
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// Assembly
    pub const ASSEMBLY: u32 = 0x0003;
    /// Family
    pub const FAMILY: u32 = 0x0004;
    /// Family or assembly
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// Public
    pub const PUBLIC: u32 = 0x0006;
    /// Static field
    pub const STATIC: u32 = 0x0010;
    /// Initialized only in the constructor
    pub const INIT_ONLY: u32 = 0x0020;
    /// Compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Not serialized
    pub const NOT_SERIALIZED: u32 = 0x0080;
    /// The name is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// Implemented through PInvoke
    pub const PINVOKE_IMPL: u32 = 0x2000;
    /// The runtime checks the name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x0400;
    /// Has marshalling information
    pub const HAS_FIELD_MARSHAL: u32 = 0x1000;
    /// Has a default value
    pub const HAS_DEFAULT: u32 = 0x8000;
    /// Has an RVA
    pub const HAS_FIELD_RVA: u32 = 0x0100;
}
