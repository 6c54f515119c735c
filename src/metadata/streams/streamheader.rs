//! Stream headers of the metadata root (ECMA-335 II.24.2.2).

use crate::{file::io::read_le_at, Error::OutOfBounds, Result};

/// Names of the streams this crate understands. `#-` is the uncompressed table stream.
pub const STREAM_NAMES: [&str; 6] = ["#Strings", "#US", "#Blob", "#GUID", "#~", "#-"];

/// Location and name of one metadata stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    /// Offset of the stream relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Name of the stream
    pub name: String,
}

impl StreamHeader {
    /// Parse a stream header; the name is at most 32 bytes including its terminator.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data and [`crate::Error::Malformed`]
    /// if the name is not terminated.
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        if data.len() < 9 {
            return Err(OutOfBounds);
        }

        let mut offset = 0;
        let stream_offset = read_le_at::<u32>(data, &mut offset)?;
        let size = read_le_at::<u32>(data, &mut offset)?;

        let name_bytes = &data[8..data.len().min(8 + 32)];
        let Some(name_len) = name_bytes.iter().position(|&byte| byte == 0) else {
            return Err(malformed_error!("Stream header name is not terminated"));
        };

        let name = String::from_utf8_lossy(&name_bytes[..name_len]).into_owned();

        Ok(StreamHeader {
            offset: stream_offset,
            size,
            name,
        })
    }

    /// Whether the name is one of [`STREAM_NAMES`]
    #[must_use]
    pub fn is_known(&self) -> bool {
        STREAM_NAMES.contains(&self.name.as_str())
    }

    /// Bytes occupied by this header in the metadata root (name padded to 4 bytes)
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        8 + (self.name.len() + 1).next_multiple_of(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            0x23, 0x7E, 0x00, 0x00,
        ];

        let parsed_header = StreamHeader::from(&header_bytes).unwrap();

        assert_eq!(parsed_header.offset, 0x6C);
        assert_eq!(parsed_header.size, 0x45A4);
        assert_eq!(parsed_header.name, "#~");
        assert_eq!(parsed_header.encoded_len(), 12);
    }

    #[test]
    fn strings_name_padding() {
        #[rustfmt::skip]
        let header_bytes = [
            0x10, 0x00, 0x00, 0x00,
            0x20, 0x00, 0x00, 0x00,
            b'#', b'S', b't', b'r', b'i', b'n', b'g', b's', 0x00, 0x00, 0x00, 0x00,
        ];

        let parsed_header = StreamHeader::from(&header_bytes).unwrap();
        assert_eq!(parsed_header.name, "#Strings");
        assert_eq!(parsed_header.encoded_len(), 20);
    }

    #[test]
    fn crafted_invalid() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            0x24, 0x7E, 0x00,
        ];

        let parsed_header = StreamHeader::from(&header_bytes).unwrap();
        assert!(!parsed_header.is_known());

        assert!(StreamHeader::from(&header_bytes[..8]).is_err());
        assert!(StreamHeader::from(&header_bytes[..10]).is_err());
    }
}
