//! The metadata root (ECMA-335 II.24.2.1): version string and stream directory.

use tracing::warn;

use crate::{
    file::io::{read_le, read_le_at},
    metadata::streams::StreamHeader,
    Error::OutOfBounds,
    Result,
};

/// Magic signature of the metadata root, `BSJB`
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// The metadata root
pub struct Root {
    /// Magic signature, [`CIL_HEADER_MAGIC`]
    pub signature: u32,
    /// Major version, 1
    pub major_version: u16,
    /// Minor version, 1
    pub minor_version: u16,
    /// Length of the padded version string
    pub length: u32,
    /// Runtime version the image was built against, e.g. `v4.0.30319`
    pub version: String,
    /// Reserved, 0
    pub flags: u16,
    /// Known streams in directory order
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Read the root from the start of the metadata directory
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a bad signature or an empty stream directory,
    /// and [`crate::Error::OutOfBounds`] when a stream lies outside of `data`.
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 20 {
            return Err(OutOfBounds);
        }

        let signature = read_le::<u32>(data)?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - {:#x}",
                signature
            ));
        }

        let length = read_le_at::<u32>(data, &mut 12)?;
        let version_end = usize::try_from(length)
            .ok()
            .and_then(|length| length.checked_add(16))
            .ok_or_else(|| malformed_error!("Version string length too large - {}", length))?;
        if version_end + 4 > data.len() {
            return Err(OutOfBounds);
        }

        let version_bytes = &data[16..version_end];
        let version_len = version_bytes
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(version_bytes.len());
        let version = String::from_utf8_lossy(&version_bytes[..version_len]).into_owned();

        let mut offset = version_end;
        let flags = read_le_at::<u16>(data, &mut offset)?;
        let stream_count = read_le_at::<u16>(data, &mut offset)?;

        let mut stream_headers: Vec<StreamHeader> = Vec::with_capacity(stream_count as usize);
        for _ in 0..stream_count {
            let Some(header_data) = data.get(offset..) else {
                return Err(OutOfBounds);
            };

            let stream = StreamHeader::from(header_data)?;
            offset += stream.encoded_len();

            match u32::checked_add(stream.offset, stream.size) {
                Some(end) if end as usize <= data.len() => {}
                Some(_) => return Err(OutOfBounds),
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        stream.offset,
                        stream.size
                    ))
                }
            }

            if !stream.is_known() {
                warn!("Ignoring unknown metadata stream '{}'", stream.name);
                continue;
            }

            if stream_headers.iter().any(|known| known.name == stream.name) {
                warn!("Ignoring duplicate metadata stream '{}'", stream.name);
                continue;
            }

            stream_headers.push(stream);
        }

        if stream_headers.is_empty() {
            return Err(malformed_error!("No valid streams have been found"));
        }

        Ok(Root {
            signature,
            major_version: read_le::<u16>(&data[4..])?,
            minor_version: read_le::<u16>(&data[6..])?,
            length,
            version,
            flags,
            stream_headers,
        })
    }

    /// Directory entry of the stream named `name`
    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&StreamHeader> {
        self.stream_headers.iter().find(|stream| stream.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x42, 0x53, 0x4A, 0x42,
            0x01, 0x00,
            0x01, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
            b'v', b'4', b'.', b'0', b'.', b'3', b'0', b'3', b'1', b'9', 0x00, 0x00,
            0x00, 0x00,
            0x03, 0x00,

            0x38, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x23, 0x7E, 0x00, 0x00,

            0x38, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x23, 0x58, 0x00, 0x00,

            0x38, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x23, 0x7E, 0x00, 0x00,

            0x00, 0x00, 0x00, 0x00,
        ];

        let root = Root::read(&header_bytes).unwrap();

        assert_eq!(root.signature, CIL_HEADER_MAGIC);
        assert_eq!(root.major_version, 1);
        assert_eq!(root.length, 12);
        assert_eq!(root.version, "v4.0.30319");
        assert_eq!(root.stream_headers.len(), 1);
        assert_eq!(root.stream("#~").unwrap().offset, 0x38);
        assert!(root.stream("#Strings").is_none());
    }

    #[test]
    fn bad_magic() {
        let mut data = [0u8; 32];
        data[0] = 0x42;

        assert!(matches!(Root::read(&data), Err(crate::Error::Malformed { .. })));
    }
}
