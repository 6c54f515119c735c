use crate::{
    disassembler::entities::{custom_attributes_of, version_text, CustomAttribute},
    metadata::{
        source::MetadataSource,
        tables::{AssemblyFlags, AssemblyRefRaw, ModuleRefRaw},
        token::Token,
    },
    Result,
};

/// An `AssemblyRef` row, written as `.assembly extern`
pub struct AssemblyReference<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    row: AssemblyRefRaw,
}

impl<'a, S: MetadataSource + ?Sized> AssemblyReference<'a, S> {
    /// Load `AssemblyRef` row `rid`
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn new(source: &'a S, rid: u32) -> Result<Self> {
        Ok(AssemblyReference {
            source,
            row: source.assembly_ref(rid)?,
        })
    }

    /// Token of the row
    pub fn token(&self) -> Token {
        self.row.token
    }

    /// The raw row
    pub fn row(&self) -> &AssemblyRefRaw {
        &self.row
    }

    /// Simple name of the referenced assembly
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn name(&self) -> Result<&'a str> {
        self.source.string(self.row.name)
    }

    /// Version as `major:minor:build:revision`
    pub fn version(&self) -> String {
        version_text(
            self.row.major_version,
            self.row.minor_version,
            self.row.build_number,
            self.row.revision_number,
        )
    }

    /// Culture, empty for neutral assemblies
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn culture(&self) -> Result<&'a str> {
        self.source.string(self.row.culture)
    }

    /// The full public key or its 8 byte token, see [`AssemblyReference::has_full_public_key`]
    ///
    /// # Errors
    /// Returns an error for an invalid `#Blob` index.
    pub fn public_key_or_token(&self) -> Result<&'a [u8]> {
        self.source.blob(self.row.public_key_or_token)
    }

    /// Whether [`AssemblyReference::public_key_or_token`] holds a full key
    pub fn has_full_public_key(&self) -> bool {
        self.row.flags & AssemblyFlags::PUBLIC_KEY != 0
    }

    /// `AssemblyFlags` of the reference
    pub fn flags(&self) -> u32 {
        self.row.flags
    }

    /// Hash of the referenced assembly's manifest, usually empty
    ///
    /// # Errors
    /// Returns an error for an invalid `#Blob` index.
    pub fn hash_value(&self) -> Result<&'a [u8]> {
        self.source.blob(self.row.hash_value)
    }

    /// Custom attributes applied to the reference
    ///
    /// # Errors
    /// Returns errors of the `CustomAttribute` table reads.
    pub fn custom_attributes(&self) -> Result<Vec<CustomAttribute<'a, S>>> {
        custom_attributes_of(self.source, self.row.token)
    }
}

/// A `ModuleRef` row, written as `.module extern`
pub struct ModuleReference<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    row: ModuleRefRaw,
}

impl<'a, S: MetadataSource + ?Sized> ModuleReference<'a, S> {
    /// Load `ModuleRef` row `rid`
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn new(source: &'a S, rid: u32) -> Result<Self> {
        Ok(ModuleReference {
            source,
            row: source.module_ref(rid)?,
        })
    }

    /// Token of the row
    pub fn token(&self) -> Token {
        self.row.token
    }

    /// File name of the module
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn name(&self) -> Result<&'a str> {
        self.source.string(self.row.name)
    }
}
