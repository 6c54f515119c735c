//! Metadata tokens and their classification.
//!
//! A token is a 32-bit handle: the high byte names the table (or the user string heap), the
//! low 24 bits are a 1-based row index or a heap offset. Classifying a token never needs any
//! metadata, it is a pure function of bits 24-31; resolving it is the job of
//! [`crate::disassembler::Resolver`].
//!
//! # Examples
//!
//! ```rust
//! use cildasm::metadata::token::{classify_token, Token, TokenKind};
//!
//! let token = Token::new(0x0A00_0012);
//! assert_eq!(classify_token(token), TokenKind::MemberRef);
//! assert_eq!(token.row(), 0x12);
//! ```
//!
//! # Reference
//! - ECMA-335 II.22 (tables), III.1.9 (metadata tokens)

use std::fmt;

/// A metadata token (`table << 24 | row`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Token(pub u32);

impl Token {
    /// Create a token from its raw value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Build a token from a table marker and a row index
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// The raw value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The table marker (bits 24-31)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The row index or heap offset (bits 0-23)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// A token with value 0, used for 'no reference'
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Shorthand for [`classify_token`]
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        classify_token(*self)
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// The kind of entity a token refers to, as far as the disassembler distinguishes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `0x00` - the Module table
    Module,
    /// `0x01` - TypeRef
    TypeRef,
    /// `0x02` - TypeDef
    TypeDef,
    /// `0x04` - Field
    FieldDef,
    /// `0x06` - MethodDef
    MethodDef,
    /// `0x08` - Param
    Param,
    /// `0x0A` - MemberRef
    MemberRef,
    /// `0x11` - StandAloneSig
    StandaloneSig,
    /// `0x14` - Event
    Event,
    /// `0x17` - Property
    Property,
    /// `0x1A` - ModuleRef
    ModuleRef,
    /// `0x1B` - TypeSpec
    TypeSpec,
    /// `0x20` - Assembly
    Assembly,
    /// `0x23` - AssemblyRef
    AssemblyRef,
    /// `0x2A` - GenericParam
    GenericParam,
    /// `0x2B` - MethodSpec
    MethodSpec,
    /// `0x70` - an offset into the `#US` heap
    UserString,
    /// Any other marker
    Unrecognized(u8),
}

impl TokenKind {
    /// The table marker byte of this kind
    #[must_use]
    pub fn marker(&self) -> u8 {
        match self {
            TokenKind::Module => 0x00,
            TokenKind::TypeRef => 0x01,
            TokenKind::TypeDef => 0x02,
            TokenKind::FieldDef => 0x04,
            TokenKind::MethodDef => 0x06,
            TokenKind::Param => 0x08,
            TokenKind::MemberRef => 0x0A,
            TokenKind::StandaloneSig => 0x11,
            TokenKind::Event => 0x14,
            TokenKind::Property => 0x17,
            TokenKind::ModuleRef => 0x1A,
            TokenKind::TypeSpec => 0x1B,
            TokenKind::Assembly => 0x20,
            TokenKind::AssemblyRef => 0x23,
            TokenKind::GenericParam => 0x2A,
            TokenKind::MethodSpec => 0x2B,
            TokenKind::UserString => 0x70,
            TokenKind::Unrecognized(marker) => *marker,
        }
    }

    /// True for the three kinds which name a type
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            TokenKind::TypeDef | TokenKind::TypeRef | TokenKind::TypeSpec
        )
    }

    /// True for kinds which can name a callable method
    #[must_use]
    pub fn is_method(&self) -> bool {
        matches!(
            self,
            TokenKind::MethodDef | TokenKind::MemberRef | TokenKind::MethodSpec
        )
    }
}

/// Classify `token` by its high byte. Total over all `u32` values.
#[must_use]
pub fn classify_token(token: Token) -> TokenKind {
    match token.table() {
        0x00 => TokenKind::Module,
        0x01 => TokenKind::TypeRef,
        0x02 => TokenKind::TypeDef,
        0x04 => TokenKind::FieldDef,
        0x06 => TokenKind::MethodDef,
        0x08 => TokenKind::Param,
        0x0A => TokenKind::MemberRef,
        0x11 => TokenKind::StandaloneSig,
        0x14 => TokenKind::Event,
        0x17 => TokenKind::Property,
        0x1A => TokenKind::ModuleRef,
        0x1B => TokenKind::TypeSpec,
        0x20 => TokenKind::Assembly,
        0x23 => TokenKind::AssemblyRef,
        0x2A => TokenKind::GenericParam,
        0x2B => TokenKind::MethodSpec,
        0x70 => TokenKind::UserString,
        other => TokenKind::Unrecognized(other),
    }
}

/// True if `token` is a TypeRef
#[must_use]
pub fn is_type_reference(token: Token) -> bool {
    classify_token(token) == TokenKind::TypeRef
}

/// True if `token` is a TypeDef
#[must_use]
pub fn is_type_definition(token: Token) -> bool {
    classify_token(token) == TokenKind::TypeDef
}

/// True if `token` is a TypeSpec
#[must_use]
pub fn is_type_specification(token: Token) -> bool {
    classify_token(token) == TokenKind::TypeSpec
}

/// True if `token` is a MethodDef
#[must_use]
pub fn is_method_definition(token: Token) -> bool {
    classify_token(token) == TokenKind::MethodDef
}

/// True if `token` is a MemberRef
#[must_use]
pub fn is_member_reference(token: Token) -> bool {
    classify_token(token) == TokenKind::MemberRef
}

/// True if `token` is a MethodSpec
#[must_use]
pub fn is_method_specification(token: Token) -> bool {
    classify_token(token) == TokenKind::MethodSpec
}

/// True if `token` is a Field
#[must_use]
pub fn is_field_definition(token: Token) -> bool {
    classify_token(token) == TokenKind::FieldDef
}

/// True if `token` is a StandAloneSig
#[must_use]
pub fn is_standalone_signature(token: Token) -> bool {
    classify_token(token) == TokenKind::StandaloneSig
}

/// True if `token` points into the user string heap
#[must_use]
pub fn is_user_string(token: Token) -> bool {
    classify_token(token) == TokenKind::UserString
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts() {
        let token = Token(0x06000001);
        assert_eq!(token.value(), 0x06000001);
        assert_eq!(token.table(), 0x06);
        assert_eq!(token.row(), 1);

        let token = Token(0x06FFFFFF);
        assert_eq!(token.row(), 0x00FFFFFF);

        assert_eq!(Token::from_parts(0x1B, 7), Token(0x1B000007));
        assert_eq!(Token::from_parts(0x02, 0x0100_0001), Token(0x02000001));
    }

    #[test]
    fn null() {
        assert!(Token(0).is_null());
        assert!(Token::default().is_null());
        assert!(!Token(0x06000001).is_null());
    }

    #[test]
    fn conversions() {
        let token: Token = 0x0A000003u32.into();
        let back: u32 = token.into();
        assert_eq!(back, 0x0A000003);
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(format!("{}", Token(0x06000001)), "0x06000001");
        let debug_str = format!("{:?}", Token(0x06000001));
        assert!(debug_str.contains("Token(0x06000001"));
        assert!(debug_str.contains("table: 0x06"));
        assert!(debug_str.contains("row: 1"));
    }

    #[test]
    fn classification() {
        let cases = [
            (0x0100_0001, TokenKind::TypeRef),
            (0x0200_0001, TokenKind::TypeDef),
            (0x0400_0001, TokenKind::FieldDef),
            (0x0600_0001, TokenKind::MethodDef),
            (0x0800_0001, TokenKind::Param),
            (0x0A00_0001, TokenKind::MemberRef),
            (0x1100_0001, TokenKind::StandaloneSig),
            (0x1B00_0001, TokenKind::TypeSpec),
            (0x2B00_0001, TokenKind::MethodSpec),
            (0x7000_0001, TokenKind::UserString),
            (0x0300_0001, TokenKind::Unrecognized(0x03)),
            (0xFF00_0000, TokenKind::Unrecognized(0xFF)),
        ];

        for (value, kind) in cases {
            assert_eq!(classify_token(Token(value)), kind, "0x{value:08x}");
        }
    }

    #[test]
    fn classification_only_uses_high_byte() {
        for high in 0u32..=0xFF {
            let expected = classify_token(Token(high << 24));
            for low in [0u32, 1, 0x1234, 0x00FF_FFFF] {
                let kind = classify_token(Token((high << 24) | low));
                assert_eq!(kind, expected);
                assert_eq!(u32::from(kind.marker()), high);
            }
        }
    }

    #[test]
    fn predicates() {
        assert!(is_member_reference(Token(0x0A000001)));
        assert!(is_method_definition(Token(0x06000001)));
        assert!(is_method_specification(Token(0x2B000001)));
        assert!(is_field_definition(Token(0x04000001)));
        assert!(is_type_reference(Token(0x01000001)));
        assert!(is_type_definition(Token(0x02000001)));
        assert!(is_type_specification(Token(0x1B000001)));
        assert!(is_standalone_signature(Token(0x11000001)));
        assert!(is_user_string(Token(0x70000001)));
        assert!(!is_user_string(Token(0x71000001)));

        assert!(TokenKind::TypeSpec.is_type());
        assert!(!TokenKind::FieldDef.is_type());
        assert!(TokenKind::MethodSpec.is_method());
        assert!(!TokenKind::TypeDef.is_method());
    }
}
