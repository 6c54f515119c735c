//! The `#Blob` heap: length-prefixed binary values (ECMA-335 II.24.2.4).
//!
//! Signatures, constant values, custom attribute values and public keys are all stored here.

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// View over the `#Blob` heap.
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Wrap the heap data. The first byte must be the empty blob.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with `0`.
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if data.first() != Some(&0) {
            return Err(malformed_error!("Invalid memory for #Blob heap"));
        }

        Ok(Blob { data })
    }

    /// The blob starting at byte offset `index`, without its length prefix.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the blob does not fit into the heap.
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        let Some(tail) = self.data.get(index..) else {
            return Err(OutOfBounds);
        };

        let mut parser = Parser::new(tail);
        let len = parser.read_compressed_uint()? as usize;
        parser.read_bytes(len)
    }
}
