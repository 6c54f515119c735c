//! The `TypeDef` table (0x02): types defined in this module.
//!
//! Fields and methods of a type are given as the start of a run in the `Field` and
//! `MethodDef` tables; the run ends where the next row's run begins.

mod raw;
mod reader;

pub use raw::*;

/// Flags of a `TypeDef` row (ECMA-335 II.23.1.15)
#[allow(non_snake_case)]
pub mod TypeAttributes {
    /// Mask for the visibility bits
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Not visible outside the assembly
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Visible outside the assembly
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Nested, public
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Nested, private
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;
    /// Nested, family
    pub const NESTED_FAMILY: u32 = 0x0000_0004;
    /// Nested, assembly
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;
    /// Nested, family and assembly
    pub const NESTED_FAM_AND_ASSEM: u32 = 0x0000_0006;
    /// Nested, family or assembly
    pub const NESTED_FAM_OR_ASSEM: u32 = 0x0000_0007;
    /// Mask for the layout bits
    pub const LAYOUT_MASK: u32 = 0x0000_0018;
    /// Fields are laid out automatically
    pub const AUTO_LAYOUT: u32 = 0x0000_0000;
    /// Fields are laid out sequentially
    pub const SEQUENTIAL_LAYOUT: u32 = 0x0000_0008;
    /// Layout is given explicitly
    pub const EXPLICIT_LAYOUT: u32 = 0x0000_0010;
    /// The type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// The type is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// The type can not be derived from
    pub const SEALED: u32 = 0x0000_0100;
    /// The name is special
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
    /// The runtime checks the name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x0000_0800;
    /// The type is imported
    pub const IMPORT: u32 = 0x0000_1000;
    /// The type is serializable
    pub const SERIALIZABLE: u32 = 0x0000_2000;
    /// Mask for the string format bits
    pub const STRING_FORMAT_MASK: u32 = 0x0003_0000;
    /// Strings are marshalled as ANSI
    pub const ANSI_CLASS: u32 = 0x0000_0000;
    /// Strings are marshalled as UTF-16
    pub const UNICODE_CLASS: u32 = 0x0001_0000;
    /// String marshalling is platform dependent
    pub const AUTO_CLASS: u32 = 0x0002_0000;
    /// Initialize the type any time before the first static field access
    pub const BEFORE_FIELD_INIT: u32 = 0x0010_0000;
    /// The type has security attributes
    pub const HAS_SECURITY: u32 = 0x0004_0000;
}
