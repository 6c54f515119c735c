//! Memory-mapped backend for images on disk.
//!
//! The whole file is mapped read-only once; all later reads are plain slice accesses into the
//! mapping, which lives as long as the [`crate::file::File`] that owns it.

use std::{fs, path::Path};

use memmap2::Mmap;
use tracing::debug;

use super::{checked_slice, Backend};
use crate::Result;

/// A read-only memory mapping of an input file.
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Open and map the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file can not be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path.as_ref())?;

        // The mapping is read-only and the file handle stays owned by the map.
        let mmap = unsafe { Mmap::map(&file) }?;
        debug!(path = %path.as_ref().display(), len = mmap.len(), "mapped input file");

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        checked_slice(&self.data, offset, len)
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn maps_file() {
        let path = std::env::temp_dir().join(format!("cildasm-physical-{}.bin", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(&[0x4D, 0x5A, 0x90, 0x00]).unwrap();
        }

        let physical = Physical::new(&path).unwrap();
        assert_eq!(physical.len(), 4);
        assert_eq!(physical.data_slice(0, 2).unwrap(), b"MZ");
        assert!(physical.data_slice(3, 2).is_err());

        drop(physical);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file() {
        let result = Physical::new("/this/path/does/not/exist.dll");
        assert!(matches!(result, Err(crate::Error::FileError(_))));
    }
}
