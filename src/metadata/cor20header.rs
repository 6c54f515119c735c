//! The CLR runtime header (ECMA-335 II.25.3.3), located through the CLI data directory of
//! the PE optional header.

use bitflags::bitflags;

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

bitflags! {
    /// Runtime flags of the image, printed by `.corflags`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CorFlags: u32 {
        /// Image contains only IL
        const IL_ONLY = 0x0000_0001;
        /// Image requires a 32-bit process
        const REQUIRE_32BIT = 0x0000_0002;
        /// Image carries a strong name signature
        const STRONG_NAME_SIGNED = 0x0000_0008;
        /// Entry point is a native method
        const NATIVE_ENTRYPOINT = 0x0000_0010;
        /// Image prefers a 32-bit process
        const PREFER_32BIT = 0x0002_0000;
    }
}

/// The CLR 2.0 header
#[derive(Debug, Clone)]
pub struct Cor20Header {
    /// Size of the header in bytes, 72
    pub cb: u32,
    /// Minimum major runtime version
    pub major_runtime_version: u16,
    /// Minor runtime version
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata
    pub meta_data_size: u32,
    /// Raw runtime flags, see [`CorFlags`]
    pub flags: u32,
    /// `MethodDef` or `File` token of the entry point, 0 for libraries
    pub entry_point_token: u32,
    /// RVA of managed resources
    pub resource_rva: u32,
    /// Size of managed resources
    pub resource_size: u32,
    /// RVA of the strong name signature
    pub strong_name_signature_rva: u32,
    /// Size of the strong name signature
    pub strong_name_signature_size: u32,
    /// RVA of the vtable fixups
    pub vtable_fixups_rva: u32,
    /// Size of the vtable fixups
    pub vtable_fixups_size: u32,
}

impl Cor20Header {
    /// Size of the header on disk
    pub const SIZE: usize = 72;

    /// Read the header from the start of `data`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than the header and
    /// [`crate::Error::Malformed`] for a wrong size field or a missing metadata directory.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        if data.len() < Self::SIZE {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb as usize != Self::SIZE {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;

        let meta_data_rva = parser.read_le::<u32>()?;
        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_rva == 0 || meta_data_size == 0 {
            return Err(malformed_error!("CLR header has no metadata directory"));
        }

        let flags = parser.read_le::<u32>()?;
        let entry_point_token = parser.read_le::<u32>()?;
        let resource_rva = parser.read_le::<u32>()?;
        let resource_size = parser.read_le::<u32>()?;
        let strong_name_signature_rva = parser.read_le::<u32>()?;
        let strong_name_signature_size = parser.read_le::<u32>()?;

        // code manager table, reserved
        parser.advance_by(8)?;

        let vtable_fixups_rva = parser.read_le::<u32>()?;
        let vtable_fixups_size = parser.read_le::<u32>()?;

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags,
            entry_point_token,
            resource_rva,
            resource_size,
            strong_name_signature_rva,
            strong_name_signature_size,
            vtable_fixups_rva,
            vtable_fixups_size,
        })
    }

    /// The known runtime flags; unknown bits are dropped
    #[must_use]
    pub fn cor_flags(&self) -> CorFlags {
        CorFlags::from_bits_truncate(self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x48, 0x00, 0x00, 0x00, // cb
            0x02, 0x00,             // major_runtime_version
            0x05, 0x00,             // minor_runtime_version
            0x00, 0x20, 0x00, 0x00, // meta_data_rva
            0x00, 0x05, 0x00, 0x00, // meta_data_size
            0x09, 0x00, 0x00, 0x00, // flags
            0x01, 0x00, 0x00, 0x06, // entry_point_token
            0x00, 0x00, 0x00, 0x00, // resource_rva
            0x00, 0x00, 0x00, 0x00, // resource_size
            0x00, 0x00, 0x00, 0x00, // strong_name_signature_rva
            0x00, 0x00, 0x00, 0x00, // strong_name_signature_size
            0x00, 0x00, 0x00, 0x00, // code_manager_table_rva
            0x00, 0x00, 0x00, 0x00, // code_manager_table_size
            0x00, 0x00, 0x00, 0x00, // vtable_fixups_rva
            0x00, 0x00, 0x00, 0x00, // vtable_fixups_size
            0x00, 0x00, 0x00, 0x00, // export_address_table_jmp_rva
            0x00, 0x00, 0x00, 0x00, // export_address_table_jmp_size
            0x00, 0x00, 0x00, 0x00, // managed_native_header_rva
            0x00, 0x00, 0x00, 0x00  // managed_native_header_size
        ];

        let header = Cor20Header::read(&header_bytes).unwrap();

        assert_eq!(header.cb, 72);
        assert_eq!(header.major_runtime_version, 2);
        assert_eq!(header.minor_runtime_version, 5);
        assert_eq!(header.meta_data_rva, 0x2000);
        assert_eq!(header.meta_data_size, 0x500);
        assert_eq!(header.entry_point_token, 0x0600_0001);
        assert_eq!(
            header.cor_flags(),
            CorFlags::IL_ONLY | CorFlags::STRONG_NAME_SIGNED
        );

        assert!(Cor20Header::read(&header_bytes[..71]).is_err());

        let mut bad_size = header_bytes;
        bad_size[0] = 0x40;
        assert!(matches!(
            Cor20Header::read(&bad_size),
            Err(crate::Error::Malformed { .. })
        ));
    }
}
