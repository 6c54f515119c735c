//! The `#US` heap: string literals referenced by `ldstr` (ECMA-335 II.24.2.4).
//!
//! Each entry is a compressed byte length followed by UTF-16LE code units and a single
//! trailing flag byte, which is `1` if any code unit needs special handling.

use widestring::U16String;

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// View over the `#US` heap.
pub struct UserStrings<'a> {
    data: &'a [u8],
}

impl<'a> UserStrings<'a> {
    /// Wrap the heap data. The first byte must be the empty entry.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with `0`.
    pub fn from(data: &'a [u8]) -> Result<UserStrings<'a>> {
        if data.first() != Some(&0) {
            return Err(malformed_error!("Provided #US heap is invalid"));
        }

        Ok(UserStrings { data })
    }

    /// The string at byte offset `index` (the row of a `0x70` token).
    ///
    /// Unpaired surrogates are kept as-is; [`U16String`] does not require valid UTF-16.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the entry does not fit into the heap.
    pub fn get(&self, index: usize) -> Result<U16String> {
        let Some(tail) = self.data.get(index..) else {
            return Err(OutOfBounds);
        };

        let mut parser = Parser::new(tail);
        let len = parser.read_compressed_uint()? as usize;
        let bytes = parser.read_bytes(len)?;

        // The final odd byte is the terminal flag
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(U16String::from_vec(units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data: [u8; 29] = [
            0x00,
            0x1b, 0x48, 0x00, 0x65, 0x00, 0x6c, 0x00, 0x6c, 0x00, 0x6f, 0x00, 0x2c, 0x00, 0x20, 0x00,
            0x57, 0x00, 0x6f, 0x00, 0x72, 0x00, 0x6c, 0x00, 0x64, 0x00, 0x21, 0x00, 0x00,
        ];

        let us_str = UserStrings::from(&data).unwrap();
        assert_eq!(us_str.get(1).unwrap().to_string_lossy(), "Hello, World!");
        assert!(us_str.get(0).unwrap().is_empty());
    }

    #[test]
    fn unpaired_surrogate() {
        let data = [0x00, 0x03, 0x00, 0xD8, 0x01];
        let us_str = UserStrings::from(&data).unwrap();
        assert_eq!(us_str.get(1).unwrap().as_slice(), &[0xD800]);
    }

    #[test]
    fn invalid() {
        assert!(UserStrings::from(&[]).is_err());
        assert!(UserStrings::from(&[0x22, 0x1b]).is_err());

        let us_str = UserStrings::from(&[0x00, 0xCC, 0xCC]).unwrap();
        assert!(us_str.get(1).is_err());
        assert!(matches!(us_str.get(5), Err(OutOfBounds)));
    }
}
