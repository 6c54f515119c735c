//! PE image loading.
//!
//! A [`File`] owns the raw bytes of an input image (either a memory mapping or a heap buffer)
//! together with the parsed PE headers borrowed from those bytes. Only images that carry a CLR
//! runtime header data directory are accepted; everything else is [`crate::Error::NotSupported`].
//!
//! The remaining crate never touches goblin types directly: it asks the [`File`] for the CLR
//! directory, converts RVAs to file offsets and reads the few header values that show up in a
//! disassembly listing (see [`ImageInfo`]).
//!
//! # Examples
//!
//! ```rust,no_run
//! use cildasm::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("tests/samples/hello.dll"))?;
//! let (clr_rva, clr_size) = file.clr()?;
//! let offset = file.rva_to_offset(clr_rva)?;
//! println!("CLR header at 0x{offset:x} ({clr_size} bytes)");
//! # Ok::<(), cildasm::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use goblin::pe::{optional_header::OptionalHeader, section_table::SectionTable, PE};
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;
use tracing::debug;

use crate::{
    Error::{Empty, NotSupported, OutOfBounds},
    Result,
};

/// Storage of the raw image bytes.
pub trait Backend: Send + Sync {
    /// Borrow `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not fully inside the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// The complete image
    fn data(&self) -> &[u8];

    /// Length of the image in bytes
    fn len(&self) -> usize {
        self.data().len()
    }
}

pub(crate) fn checked_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let Some(offset_end) = offset.checked_add(len) else {
        return Err(OutOfBounds);
    };

    data.get(offset..offset_end).ok_or(OutOfBounds)
}

/// PE header values which are printed in an assembly listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageInfo {
    /// Preferred load address
    pub image_base: u64,
    /// Alignment of sections in the file
    pub file_alignment: u32,
    /// Size of the reserved stack
    pub stack_reserve: u64,
    /// Windows subsystem
    pub subsystem: u16,
    /// Flags of the CLR runtime header
    pub cor_flags: u32,
}

/// A loaded PE image with a CLR runtime header.
#[self_referencing]
pub struct File {
    data: Box<dyn Backend>,
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Map and parse the file at `file`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file can not be read, [`crate::Error::GoblinErr`]
    /// if it is not a PE and [`crate::Error::NotSupported`] if it has no CLR runtime header.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Parse an image that is already in memory.
    ///
    /// # Errors
    /// See [`File::from_file`]; additionally [`crate::Error::Empty`] for an empty buffer.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| {
            let pe = PE::parse(data.data())?;

            let Some(optional_header) = pe.header.optional_header else {
                return Err(NotSupported);
            };

            if optional_header
                .data_directories
                .get_clr_runtime_header()
                .is_none()
            {
                return Err(NotSupported);
            }

            debug!(
                sections = pe.sections.len(),
                is_64 = pe.is_64,
                "parsed PE image"
            );
            Ok(pe)
        })
    }

    /// Length of the image in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns true if the image has no bytes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The optional header, present for every image accepted by [`File::load`]
    #[must_use]
    pub fn header_optional(&self) -> Option<OptionalHeader> {
        self.with_pe(|pe| pe.header.optional_header)
    }

    /// RVA and size of the CLR runtime header.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] if the directory is missing.
    pub fn clr(&self) -> Result<(usize, usize)> {
        let optional_header = self.header_optional().ok_or(NotSupported)?;
        let Some(clr_dir) = optional_header.data_directories.get_clr_runtime_header() else {
            return Err(NotSupported);
        };

        Ok((clr_dir.virtual_address as usize, clr_dir.size as usize))
    }

    /// Header values shown by `.imagebase`, `.file alignment`, `.stackreserve` and `.subsystem`.
    /// `cor_flags` is left at zero; it belongs to the CLR header.
    #[must_use]
    pub fn image_info(&self) -> ImageInfo {
        match self.header_optional() {
            Some(header) => ImageInfo {
                image_base: header.windows_fields.image_base,
                file_alignment: header.windows_fields.file_alignment,
                stack_reserve: header.windows_fields.size_of_stack_reserve,
                subsystem: header.windows_fields.subsystem,
                cor_flags: 0,
            },
            None => ImageInfo::default(),
        }
    }

    /// Iterate the section table
    pub fn sections(&self) -> impl Iterator<Item = &SectionTable> {
        self.with_pe(|pe| pe.sections.iter())
    }

    /// The complete image
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not inside the image.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// Translate a relative virtual address into a file offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no section contains `rva`.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        let rva_u32 =
            u32::try_from(rva).map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

        self.with_pe(|pe| {
            for section in &pe.sections {
                let span = section.virtual_size.max(section.size_of_raw_data);
                let Some(section_max) = section.virtual_address.checked_add(span) else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        span
                    ));
                };

                if section.virtual_address <= rva_u32 && rva_u32 < section_max {
                    return Ok((rva_u32 - section.virtual_address) as usize
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::build_pe_image, Error};

    #[test]
    fn empty_input() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Error::Empty)));
    }

    #[test]
    fn not_a_pe() {
        let result = File::from_mem(vec![0x00; 512]);
        assert!(matches!(result, Err(Error::GoblinErr(_))));
    }

    #[test]
    fn native_image_is_not_supported() {
        let image = build_pe_image(&[0u8; 16], None);
        assert!(matches!(File::from_mem(image), Err(Error::NotSupported)));
    }

    #[test]
    fn clr_image() {
        let image = build_pe_image(&[0xAB; 0x60], Some((0x2000, 0x48)));
        let file = File::from_mem(image).unwrap();

        assert_eq!(file.clr().unwrap(), (0x2000, 0x48));
        assert_eq!(file.rva_to_offset(0x2000).unwrap(), 0x200);
        assert_eq!(file.rva_to_offset(0x2010).unwrap(), 0x210);
        assert!(file.rva_to_offset(0x1000).is_err());
        assert_eq!(file.data_slice(0x200, 2).unwrap(), &[0xAB, 0xAB]);

        let info = file.image_info();
        assert_eq!(info.image_base, 0x0040_0000);
        assert_eq!(info.file_alignment, 0x200);
        assert_eq!(info.stack_reserve, 0x0010_0000);
        assert_eq!(info.subsystem, 3);
    }
}
