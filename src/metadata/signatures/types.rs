//! Building blocks of decoded signatures and the [`TypeProvider`] seam.

use crate::{metadata::token::Token, Result};

/// Element type codes of signature blobs (ECMA-335 II.23.1.16)
#[allow(non_snake_case, missing_docs)]
pub mod ELEMENT_TYPE {
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    pub const PTR: u8 = 0x0f;
    pub const BYREF: u8 = 0x10;
    pub const VALUETYPE: u8 = 0x11;
    pub const CLASS: u8 = 0x12;
    pub const VAR: u8 = 0x13;
    pub const ARRAY: u8 = 0x14;
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    pub const I: u8 = 0x18;
    pub const U: u8 = 0x19;
    pub const FNPTR: u8 = 0x1b;
    pub const OBJECT: u8 = 0x1c;
    pub const SZARRAY: u8 = 0x1d;
    pub const MVAR: u8 = 0x1e;
    pub const CMOD_REQD: u8 = 0x1f;
    pub const CMOD_OPT: u8 = 0x20;
    pub const INTERNAL: u8 = 0x21;
    pub const MODIFIER: u8 = 0x40;
    pub const SENTINEL: u8 = 0x41;
    pub const PINNED: u8 = 0x45;
}

/// Primitive element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PrimitiveTypeCode {
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    String,
    TypedReference,
    IntPtr,
    UIntPtr,
    Object,
}

impl PrimitiveTypeCode {
    /// Map an element type code to its primitive, `None` for constructed types
    #[must_use]
    pub fn from_element_type(code: u8) -> Option<Self> {
        let primitive = match code {
            ELEMENT_TYPE::VOID => PrimitiveTypeCode::Void,
            ELEMENT_TYPE::BOOLEAN => PrimitiveTypeCode::Boolean,
            ELEMENT_TYPE::CHAR => PrimitiveTypeCode::Char,
            ELEMENT_TYPE::I1 => PrimitiveTypeCode::SByte,
            ELEMENT_TYPE::U1 => PrimitiveTypeCode::Byte,
            ELEMENT_TYPE::I2 => PrimitiveTypeCode::Int16,
            ELEMENT_TYPE::U2 => PrimitiveTypeCode::UInt16,
            ELEMENT_TYPE::I4 => PrimitiveTypeCode::Int32,
            ELEMENT_TYPE::U4 => PrimitiveTypeCode::UInt32,
            ELEMENT_TYPE::I8 => PrimitiveTypeCode::Int64,
            ELEMENT_TYPE::U8 => PrimitiveTypeCode::UInt64,
            ELEMENT_TYPE::R4 => PrimitiveTypeCode::Single,
            ELEMENT_TYPE::R8 => PrimitiveTypeCode::Double,
            ELEMENT_TYPE::STRING => PrimitiveTypeCode::String,
            ELEMENT_TYPE::TYPEDBYREF => PrimitiveTypeCode::TypedReference,
            ELEMENT_TYPE::I => PrimitiveTypeCode::IntPtr,
            ELEMENT_TYPE::U => PrimitiveTypeCode::UIntPtr,
            ELEMENT_TYPE::OBJECT => PrimitiveTypeCode::Object,
            _ => return None,
        };

        Some(primitive)
    }
}

/// Kind of a signature blob, from the low nibble of its first byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    /// Method definition, reference or function pointer
    Method,
    /// `FIELD` (0x06)
    Field,
    /// `LOCAL_SIG` (0x07)
    LocalVariables,
    /// `PROPERTY` (0x08)
    Property,
    /// `GENRICINST` (0x0A), instantiation of a generic method
    MethodSpecification,
}

/// Calling convention of a method signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CallingConvention {
    Default,
    CDecl,
    StdCall,
    ThisCall,
    FastCall,
    VarArgs,
    Unmanaged,
}

/// The leading byte of a signature blob (ECMA-335 II.23.2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignatureHeader(pub u8);

impl SignatureHeader {
    const HAS_THIS: u8 = 0x20;
    const EXPLICIT_THIS: u8 = 0x40;
    const GENERIC: u8 = 0x10;

    /// The signature kind
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for reserved kinds.
    pub fn kind(self) -> Result<SignatureKind> {
        match self.0 & 0x0F {
            0x00..=0x05 | 0x09 => Ok(SignatureKind::Method),
            0x06 => Ok(SignatureKind::Field),
            0x07 => Ok(SignatureKind::LocalVariables),
            0x08 => Ok(SignatureKind::Property),
            0x0A => Ok(SignatureKind::MethodSpecification),
            other => Err(malformed_error!("Invalid signature kind - {:#x}", other)),
        }
    }

    /// Calling convention of a method signature
    #[must_use]
    pub fn calling_convention(self) -> CallingConvention {
        match self.0 & 0x0F {
            0x01 => CallingConvention::CDecl,
            0x02 => CallingConvention::StdCall,
            0x03 => CallingConvention::ThisCall,
            0x04 => CallingConvention::FastCall,
            0x05 => CallingConvention::VarArgs,
            0x09 => CallingConvention::Unmanaged,
            _ => CallingConvention::Default,
        }
    }

    /// `instance`: an implicit `this` is passed
    #[must_use]
    pub fn is_instance(self) -> bool {
        self.0 & Self::HAS_THIS != 0
    }

    /// `explicit`: `this` is the first declared parameter
    #[must_use]
    pub fn has_explicit_this(self) -> bool {
        self.0 & Self::EXPLICIT_THIS != 0
    }

    /// Generic method, the generic parameter count follows the header
    #[must_use]
    pub fn is_generic(self) -> bool {
        self.0 & Self::GENERIC != 0
    }
}

/// A decoded method or property signature
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature<T> {
    /// The leading byte
    pub header: SignatureHeader,
    /// Return type, or property type
    pub return_type: T,
    /// Number of parameters before the vararg sentinel; all of them without one
    pub required_parameter_count: usize,
    /// Number of generic parameters of a generic method
    pub generic_parameter_count: usize,
    /// All parameter types, fixed ones first
    pub parameter_types: Vec<T>,
}

/// Shape of a general array (ECMA-335 II.23.2.13)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayShape {
    /// Number of dimensions
    pub rank: u32,
    /// Sizes of the leading dimensions
    pub sizes: Vec<u32>,
    /// Lower bounds of the leading dimensions
    pub lower_bounds: Vec<i32>,
}

/// Builds a concrete type representation while a signature is decoded.
///
/// Element types are decoded innermost first; the provider then wraps or decorates the
/// inner value (array, pointer, generic instance, modifier). Implementations decide what a
/// type *is*: the disassembler builds MSIL text, tests may build plain strings.
pub trait TypeProvider {
    /// The type representation produced
    type Type;

    /// A primitive element type
    ///
    /// # Errors
    /// Implementations may reject primitives they cannot represent.
    fn primitive(&self, code: PrimitiveTypeCode) -> Result<Self::Type>;

    /// A `TypeDef` token; `raw_kind` is the `CLASS`/`VALUETYPE` byte, 0 when unknown
    ///
    /// # Errors
    /// Returns an error if the token cannot be resolved.
    fn type_from_definition(&self, token: Token, raw_kind: u8) -> Result<Self::Type>;

    /// A `TypeRef` token; `raw_kind` is the `CLASS`/`VALUETYPE` byte, 0 when unknown
    ///
    /// # Errors
    /// Returns an error if the token cannot be resolved.
    fn type_from_reference(&self, token: Token, raw_kind: u8) -> Result<Self::Type>;

    /// A `TypeSpec` token
    ///
    /// # Errors
    /// Returns an error if the token cannot be resolved.
    fn type_from_specification(&self, token: Token, raw_kind: u8) -> Result<Self::Type>;

    /// Single dimension, zero based array
    fn sz_array(&self, element: Self::Type) -> Self::Type;

    /// General array
    fn array(&self, element: Self::Type, shape: &ArrayShape) -> Self::Type;

    /// Managed pointer `&`
    fn by_reference(&self, element: Self::Type) -> Self::Type;

    /// Unmanaged pointer `*`
    fn pointer(&self, element: Self::Type) -> Self::Type;

    /// Pinned local
    fn pinned(&self, element: Self::Type) -> Self::Type;

    /// Instantiation of a generic type
    fn generic_instance(&self, generic: Self::Type, arguments: Vec<Self::Type>) -> Self::Type;

    /// Type level generic parameter `!index`
    fn generic_type_parameter(&self, index: u32) -> Self::Type;

    /// Method level generic parameter `!!index`
    fn generic_method_parameter(&self, index: u32) -> Self::Type;

    /// Function pointer
    fn function_pointer(&self, signature: MethodSignature<Self::Type>) -> Self::Type;

    /// `unmodified` with one custom modifier applied
    fn modified(&self, unmodified: Self::Type, modifier: Self::Type, is_required: bool)
        -> Self::Type;
}
