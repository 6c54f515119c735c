//! Signature blobs (ECMA-335 II.23.2).
//!
//! Signatures are decoded in a single pass by [`SignatureDecoder`]. The decoder knows the
//! blob grammar only; every element type it reads is handed to a [`TypeProvider`], which
//! decides how types are represented. The disassembler's provider builds MSIL type text.
//!
//! # Examples
//!
//! ```rust,ignore
//! let provider = DisassemblerTypeProvider::new(&source);
//! let signature = decode_method_signature(blob, &provider)?;
//! println!("{} ({} parameters)", signature.return_type, signature.parameter_types.len());
//! ```

mod parser;
mod types;

pub use parser::*;
pub use types::*;

use crate::Result;

/// Decode a method signature blob
///
/// # Errors
/// See [`SignatureDecoder::decode_method_signature`].
pub fn decode_method_signature<P: TypeProvider>(
    data: &[u8],
    provider: &P,
) -> Result<MethodSignature<P::Type>> {
    SignatureDecoder::new(data, provider).decode_method_signature()
}

/// Decode a field signature blob
///
/// # Errors
/// See [`SignatureDecoder::decode_field_signature`].
pub fn decode_field_signature<P: TypeProvider>(data: &[u8], provider: &P) -> Result<P::Type> {
    SignatureDecoder::new(data, provider).decode_field_signature()
}

/// Decode a property signature blob
///
/// # Errors
/// See [`SignatureDecoder::decode_property_signature`].
pub fn decode_property_signature<P: TypeProvider>(
    data: &[u8],
    provider: &P,
) -> Result<MethodSignature<P::Type>> {
    SignatureDecoder::new(data, provider).decode_property_signature()
}

/// Decode a local variable signature blob
///
/// # Errors
/// See [`SignatureDecoder::decode_local_signature`].
pub fn decode_local_signature<P: TypeProvider>(
    data: &[u8],
    provider: &P,
) -> Result<Vec<P::Type>> {
    SignatureDecoder::new(data, provider).decode_local_signature()
}

/// Decode a `TypeSpec` blob, a single element type
///
/// # Errors
/// See [`SignatureDecoder::decode_type`].
pub fn decode_type_spec_signature<P: TypeProvider>(data: &[u8], provider: &P) -> Result<P::Type> {
    SignatureDecoder::new(data, provider).decode_type()
}

/// Decode a `MethodSpec` instantiation blob
///
/// # Errors
/// See [`SignatureDecoder::decode_method_spec_signature`].
pub fn decode_method_spec_signature<P: TypeProvider>(
    data: &[u8],
    provider: &P,
) -> Result<Vec<P::Type>> {
    SignatureDecoder::new(data, provider).decode_method_spec_signature()
}
