//! In-memory backend for images that were already read (or synthesised) by the caller.

use super::{checked_slice, Backend};
use crate::Result;

/// Owns the complete image as a heap buffer.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Take ownership of `data`
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        checked_slice(&self.data, offset, len)
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error::OutOfBounds;

    #[test]
    fn slices() {
        let mut data = vec![0xCC_u8; 64];
        data[10..14].copy_from_slice(&[0xBB; 4]);

        let memory = Memory::new(data);
        assert_eq!(memory.len(), 64);
        assert_eq!(memory.data_slice(10, 4).unwrap(), &[0xBB; 4]);
        assert_eq!(memory.data_slice(64, 0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn rejects_out_of_range() {
        let memory = Memory::new(vec![0x00; 100]);

        assert!(matches!(memory.data_slice(usize::MAX, 1), Err(OutOfBounds)));
        assert!(matches!(memory.data_slice(100, 1), Err(OutOfBounds)));
        assert!(matches!(memory.data_slice(99, 2), Err(OutOfBounds)));
    }
}
