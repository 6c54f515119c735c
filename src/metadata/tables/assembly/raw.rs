use crate::metadata::token::Token;

/// A row of the `Assembly` table
#[derive(Clone, Debug)]
pub struct AssemblyRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `AssemblyHashAlgorithm` identifier
    pub hash_alg_id: u32,
    /// Major version
    pub major_version: u16,
    /// Minor version
    pub minor_version: u16,
    /// Build number
    pub build_number: u16,
    /// Revision number
    pub revision_number: u16,
    /// `AssemblyFlags` bitmask
    pub flags: u32,
    /// `#Blob` index of the public key, 0 if unsigned
    pub public_key: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Strings` index of the culture, 0 if neutral
    pub culture: u32,
}
