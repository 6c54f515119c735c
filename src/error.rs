//! Error types for the disassembler.
//!
//! Every fallible operation in this crate returns [`crate::Result`], which uses the [`Error`]
//! enum defined here. The variants follow the failure taxonomy of a disassembly session:
//!
//! - **Malformed image**: the input does not follow ECMA-335 ([`Error::Malformed`],
//!   [`Error::OutOfBounds`], [`Error::TokenMismatch`])
//! - **Contract violations**: a caller asked for something that does not exist
//!   ([`Error::IndexOutOfRange`])
//! - **Unsupported surfaces**: features that are deliberately not decoded
//!   ([`Error::NotImplemented`], [`Error::NotSupported`])
//!
//! Errors are never swallowed; they propagate to the caller of the accessor that triggered them.

use thiserror::Error;

use crate::metadata::token::{Token, TokenKind};

/// Creates an [`Error::Malformed`] carrying the source location of the failure.
///
/// Accepts either a single message expression or a format string with arguments.
macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// Lookup targets that can be addressed by a zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// A local variable slot of a method body
    Local,
    /// A declared parameter of a method signature
    Parameter,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Local => write!(f, "local"),
            IndexKind::Parameter => write!(f, "parameter"),
        }
    }
}

/// The generic Error type, which provides coverage for all errors this library can emit.
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// Carries the location in this crate at which the problem was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported (not a PE, or a PE without a CLR runtime header).
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty
    #[error("Provided input was empty")]
    Empty,

    /// A token of an unexpected table was encountered at a site that requires a specific kind.
    #[error("Expected a {expected:?} token, found {token}")]
    TokenMismatch {
        /// The token kind the resolution site accepts
        expected: TokenKind,
        /// The offending token
        token: Token,
    },

    /// A local or parameter lookup was outside the declared range.
    #[error("The {kind} index {index} is out of range")]
    IndexOutOfRange {
        /// Which collection was indexed
        kind: IndexKind,
        /// The requested index
        index: usize,
    },

    /// The requested surface is known but deliberately not decoded.
    #[error("Not implemented - {0}")]
    NotImplemented(&'static str),

    /// Signature decoding nested deeper than the supported limit.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// File I/O error
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error while writing textual output
    #[error("{0}")]
    Fmt(#[from] std::fmt::Error),

    /// Error from the PE parser
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_carries_location() {
        let error = malformed_error!("bad header");
        match error {
            Error::Malformed {
                message,
                file,
                line,
            } => {
                assert_eq!(message, "bad header");
                assert!(file.ends_with("error.rs"));
                assert!(line > 0);
            }
            _ => panic!("Expected Malformed"),
        }
    }

    #[test]
    fn malformed_formats_arguments() {
        let error = malformed_error!("Invalid opcode: {:02X}", 0xA6);
        assert!(error.to_string().ends_with("Invalid opcode: A6"));
    }

    #[test]
    fn display_index_out_of_range() {
        let error = Error::IndexOutOfRange {
            kind: IndexKind::Local,
            index: 4,
        };
        assert_eq!(error.to_string(), "The local index 4 is out of range");
    }

    #[test]
    fn display_token_mismatch() {
        let error = Error::TokenMismatch {
            expected: TokenKind::StandaloneSig,
            token: Token::new(0x0600_0001),
        };
        assert_eq!(
            error.to_string(),
            "Expected a StandaloneSig token, found 0x06000001"
        );
    }
}
