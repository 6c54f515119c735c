//! Exception handling clauses of a method body (ECMA-335 II.25.4.6).

use bitflags::bitflags;

use crate::metadata::token::Token;

bitflags! {
    /// Kind of an exception handling clause
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExceptionHandlerFlags: u16 {
        /// Typed `catch` clause
        const EXCEPTION = 0x0000;
        /// `filter` clause, with its filter code at `filter_offset`
        const FILTER = 0x0001;
        /// `finally` clause
        const FINALLY = 0x0002;
        /// `fault` clause
        const FAULT = 0x0004;
    }
}

/// One exception handling clause as stored after the method code.
///
/// Small clauses are widened to the fat layout while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// Clause kind
    pub flags: ExceptionHandlerFlags,
    /// Start of the protected block
    pub try_offset: u32,
    /// Length of the protected block
    pub try_length: u32,
    /// Start of the handler
    pub handler_offset: u32,
    /// Length of the handler
    pub handler_length: u32,
    /// Catch type token for `catch` clauses, filter start for `filter` clauses
    pub filter_offset: u32,
}

impl ExceptionHandler {
    /// The caught type of a typed `catch` clause
    #[must_use]
    pub fn catch_type(&self) -> Option<Token> {
        if self.flags.is_empty() && self.filter_offset != 0 {
            Some(Token::new(self.filter_offset))
        } else {
            None
        }
    }

    /// End of the protected block (exclusive)
    #[must_use]
    pub fn try_end(&self) -> u32 {
        self.try_offset.saturating_add(self.try_length)
    }

    /// End of the handler (exclusive)
    #[must_use]
    pub fn handler_end(&self) -> u32 {
        self.handler_offset.saturating_add(self.handler_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_type_only_for_catch() {
        let mut handler = ExceptionHandler {
            flags: ExceptionHandlerFlags::EXCEPTION,
            try_offset: 2,
            try_length: 10,
            handler_offset: 12,
            handler_length: 6,
            filter_offset: 0x0100_0005,
        };

        assert_eq!(handler.catch_type(), Some(Token::new(0x0100_0005)));
        assert_eq!(handler.try_end(), 12);
        assert_eq!(handler.handler_end(), 18);

        handler.flags = ExceptionHandlerFlags::FILTER;
        assert_eq!(handler.catch_type(), None);
    }
}
