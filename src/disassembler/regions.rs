//! Exception clauses as an ordered list of blocks.
//!
//! Raw clauses pair a protected range with a handler range. Here each protected range
//! becomes one `.try` region (clauses sharing a range share the region) and each handler
//! its own region. Sorting by start ascending, then end descending, puts every block
//! before the blocks nested in it, so a writer can open and close braces in list order.

use std::cmp::Reverse;

use crate::{
    disassembler::resolver::Resolver,
    metadata::{
        method::{ExceptionHandler, ExceptionHandlerFlags},
        source::MetadataSource,
        token::Token,
    },
    Result,
};

/// Block kind of an [`ExceptionRegion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[allow(missing_docs)]
pub enum HandlerKind {
    Try,
    Catch,
    Finally,
    Filter,
    Fault,
}

impl HandlerKind {
    fn from_flags(flags: ExceptionHandlerFlags) -> Self {
        if flags.contains(ExceptionHandlerFlags::FILTER) {
            HandlerKind::Filter
        } else if flags.contains(ExceptionHandlerFlags::FINALLY) {
            HandlerKind::Finally
        } else if flags.contains(ExceptionHandlerFlags::FAULT) {
            HandlerKind::Fault
        } else {
            HandlerKind::Catch
        }
    }
}

/// One protected or handler block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRegion {
    /// Block kind
    pub kind: HandlerKind,
    /// Caught type of a `catch` block
    pub catch_type: Option<Token>,
    /// First IL offset of the block
    pub start: u32,
    /// IL offset after the block
    pub end: u32,
    /// Start of the filter code of a `filter` block; `start` is its handler
    pub filter_handler_start: Option<u32>,
}

impl ExceptionRegion {
    /// Offset at which the block's opening brace is written
    #[must_use]
    pub fn opening_offset(&self) -> u32 {
        self.filter_handler_start.unwrap_or(self.start)
    }

    /// Block keyword: `.try`, `finally`, `filter`, `fault` or `catch <type>`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a `catch` without a type and any error
    /// resolving the caught type.
    pub fn header_text<S: MetadataSource + ?Sized>(&self, resolver: &Resolver<S>) -> Result<String> {
        match self.kind {
            HandlerKind::Try => Ok(".try".to_string()),
            HandlerKind::Finally => Ok("finally".to_string()),
            HandlerKind::Filter => Ok("filter".to_string()),
            HandlerKind::Fault => Ok("fault".to_string()),
            HandlerKind::Catch => match self.catch_type {
                Some(token) => Ok(format!("catch {}", resolver.get_type_information(token)?)),
                None => Err(malformed_error!(
                    "catch clause at IL_{:04x} has no type",
                    self.start
                )),
            },
        }
    }
}

/// Turn raw clauses into the sorted region list.
#[must_use]
pub fn create_regions(handlers: &[ExceptionHandler]) -> Vec<ExceptionRegion> {
    let mut tries: Vec<ExceptionRegion> = Vec::new();
    let mut blocks = Vec::with_capacity(handlers.len());

    for handler in handlers {
        let (start, end) = (handler.try_offset, handler.try_end());
        let shared = tries
            .last()
            .is_some_and(|previous| previous.start == start && previous.end == end);
        if !shared {
            tries.push(ExceptionRegion {
                kind: HandlerKind::Try,
                catch_type: None,
                start,
                end,
                filter_handler_start: None,
            });
        }

        let kind = HandlerKind::from_flags(handler.flags);
        blocks.push(ExceptionRegion {
            kind,
            catch_type: handler.catch_type(),
            start: handler.handler_offset,
            end: handler.handler_end(),
            filter_handler_start: (kind == HandlerKind::Filter).then_some(handler.filter_offset),
        });
    }

    tries.append(&mut blocks);
    tries.sort_by_key(|region| (region.start, Reverse(region.end)));
    tries
}
