use std::path::Path;

use tracing::debug;

use crate::{
    disassembler::entities::{
        custom_attributes_of, version_text, AssemblyReference, CustomAttribute, ModuleReference,
        TypeDefinition,
    },
    file::ImageInfo,
    metadata::{
        source::{enclosing_type, MetadataSource},
        tables::{AssemblyRaw, TableId},
        token::Token,
        view::CilView,
    },
    Result,
};

/// A loaded assembly, the root of every listing.
///
/// Owns the image; all other entities borrow from it.
///
/// # Example
/// ```rust,no_run
/// use cildasm::Assembly;
///
/// let assembly = Assembly::from_file(std::path::Path::new("app.dll"))?;
/// println!("{} {}", assembly.name()?, assembly.version()?);
/// for type_definition in assembly.type_definitions()? {
///     println!("{}", type_definition.full_name()?);
/// }
/// # Ok::<(), cildasm::Error>(())
/// ```
pub struct Assembly {
    view: CilView,
}

impl Assembly {
    /// Load and parse the image at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid CLI image.
    pub fn from_file(path: &Path) -> Result<Self> {
        let view = CilView::from_file(path)?;
        debug!("loaded {}", path.display());

        Ok(Assembly { view })
    }

    /// Parse an image held in memory
    ///
    /// # Errors
    /// Returns an error if `data` is not a valid CLI image.
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        let size = data.len();
        let view = CilView::from_mem(data)?;
        debug!("loaded {size} byte image from memory");

        Ok(Assembly { view })
    }

    /// The metadata of the image
    pub fn view(&self) -> &CilView {
        &self.view
    }

    /// Whether the image carries an `Assembly` row; plain modules do not
    pub fn has_manifest(&self) -> bool {
        self.view.row_count(TableId::Assembly) > 0
    }

    fn manifest(&self) -> Result<AssemblyRaw> {
        self.view.assembly(1)
    }

    /// Simple name of the assembly
    ///
    /// # Errors
    /// Returns an error without a manifest or for an invalid name index.
    pub fn name(&self) -> Result<&str> {
        self.view.string(self.manifest()?.name)
    }

    /// Version as `major:minor:build:revision`
    ///
    /// # Errors
    /// Returns an error without a manifest.
    pub fn version(&self) -> Result<String> {
        let row = self.manifest()?;
        Ok(version_text(
            row.major_version,
            row.minor_version,
            row.build_number,
            row.revision_number,
        ))
    }

    /// Culture, empty for neutral assemblies
    ///
    /// # Errors
    /// Returns an error without a manifest or for an invalid culture index.
    pub fn culture(&self) -> Result<&str> {
        self.view.string(self.manifest()?.culture)
    }

    /// The public key blob, empty for unsigned assemblies
    ///
    /// # Errors
    /// Returns an error without a manifest or for an invalid blob index.
    pub fn public_key(&self) -> Result<&[u8]> {
        self.view.blob(self.manifest()?.public_key)
    }

    /// `AssemblyHashAlgorithm` id
    ///
    /// # Errors
    /// Returns an error without a manifest.
    pub fn hash_algorithm(&self) -> Result<u32> {
        Ok(self.manifest()?.hash_alg_id)
    }

    /// `AssemblyFlags`
    ///
    /// # Errors
    /// Returns an error without a manifest.
    pub fn flags(&self) -> Result<u32> {
        Ok(self.manifest()?.flags)
    }

    /// Custom attributes applied to the assembly
    ///
    /// # Errors
    /// Returns errors of the `CustomAttribute` table reads.
    pub fn custom_attributes(&self) -> Result<Vec<CustomAttribute<'_, CilView>>> {
        custom_attributes_of(&self.view, TableId::Assembly.token(1))
    }

    /// Name of the module
    ///
    /// # Errors
    /// Returns an error if the `Module` row is missing.
    pub fn module_name(&self) -> Result<&str> {
        self.view.string(self.view.module(1)?.name)
    }

    /// Module version id
    ///
    /// # Errors
    /// Returns an error if the `Module` row or its GUID is missing.
    pub fn mvid(&self) -> Result<uguid::Guid> {
        self.view.guid(self.view.module(1)?.mvid)
    }

    /// Custom attributes applied to the module
    ///
    /// # Errors
    /// Returns errors of the `CustomAttribute` table reads.
    pub fn module_custom_attributes(&self) -> Result<Vec<CustomAttribute<'_, CilView>>> {
        custom_attributes_of(&self.view, TableId::Module.token(1))
    }

    /// Every `AssemblyRef` row
    ///
    /// # Errors
    /// Returns errors of the row reads.
    pub fn assembly_references(&self) -> Result<Vec<AssemblyReference<'_, CilView>>> {
        (1..=self.view.row_count(TableId::AssemblyRef))
            .map(|rid| AssemblyReference::new(&self.view, rid))
            .collect()
    }

    /// Every `ModuleRef` row
    ///
    /// # Errors
    /// Returns errors of the row reads.
    pub fn module_references(&self) -> Result<Vec<ModuleReference<'_, CilView>>> {
        (1..=self.view.row_count(TableId::ModuleRef))
            .map(|rid| ModuleReference::new(&self.view, rid))
            .collect()
    }

    /// Top level types in table order, starting with `<Module>`. Nested types are
    /// reached through [`TypeDefinition::nested_types`].
    ///
    /// # Errors
    /// Returns errors of the `TypeDef` and `NestedClass` reads.
    pub fn type_definitions(&self) -> Result<Vec<TypeDefinition<'_, CilView>>> {
        let mut types = Vec::new();
        for rid in 1..=self.view.row_count(TableId::TypeDef) {
            if enclosing_type(&self.view, rid)?.is_none() {
                types.push(TypeDefinition::new(&self.view, rid)?);
            }
        }

        Ok(types)
    }

    /// The entry point method or file, a null token for libraries
    pub fn entry_point(&self) -> Token {
        self.view.entry_point()
    }

    /// PE values printed in the listing header
    pub fn image_info(&self) -> ImageInfo {
        self.view.image_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::tables::AssemblyHashAlgorithm,
        test::{coded, table, ImageBuilder},
        Error,
    };

    fn image() -> ImageBuilder {
        let mut builder = ImageBuilder::new();
        builder.module("app.exe");
        builder.assembly("App", [1, 2, 3, 4], &[]);
        builder.assembly_ref("mscorlib", [4, 0, 0, 0], &[0xB7, 0x7A, 0x5C, 0x56, 0x19, 0x34, 0xE0, 0x89]);
        builder.assembly_ref("System.Core", [4, 0, 0, 0], &[]);
        builder.module_ref("native.dll");
        let object = coded::type_def_or_ref(table::TYPE_REF, 1);
        builder.type_ref(coded::resolution_scope(table::ASSEMBLY_REF, 1), "Object", "System");
        builder.type_def(0, "<Module>", "", 0, 1, 1);
        builder.type_def(0x0010_0001, "Program", "Demo", object, 1, 1);
        builder.type_def(0x0010_0002, "Inner", "", object, 1, 1);
        builder.nested_class(3, 2);
        builder.set_entry_point(0x0600_0001);
        builder
    }

    #[test]
    fn manifest() {
        let assembly = Assembly::from_mem(image().build()).unwrap();

        assert!(assembly.has_manifest());
        assert_eq!(assembly.name().unwrap(), "App");
        assert_eq!(assembly.version().unwrap(), "1:2:3:4");
        assert_eq!(assembly.culture().unwrap(), "");
        assert!(assembly.public_key().unwrap().is_empty());
        assert_eq!(assembly.hash_algorithm().unwrap(), AssemblyHashAlgorithm::SHA1);
        assert_eq!(assembly.flags().unwrap(), 0);
        assert!(assembly.custom_attributes().unwrap().is_empty());
        assert_eq!(assembly.module_name().unwrap(), "app.exe");
        assert_eq!(
            assembly.mvid().unwrap(),
            uguid::guid!("78563412-bc9a-f0de-0123-456789abcdef")
        );
        assert_eq!(assembly.entry_point(), Token::new(0x0600_0001));
        assert_eq!(assembly.image_info().cor_flags, 1);
    }

    #[test]
    fn listings() {
        let assembly = Assembly::from_mem(image().build()).unwrap();

        let references = assembly.assembly_references().unwrap();
        let names: Vec<&str> = references.iter().map(|r| r.name().unwrap()).collect();
        assert_eq!(names, ["mscorlib", "System.Core"]);

        let modules = assembly.module_references().unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name().unwrap(), "native.dll");

        let types = assembly.type_definitions().unwrap();
        let names: Vec<&str> = types.iter().map(|t| t.full_name().unwrap()).collect();
        assert_eq!(names, ["<Module>", "Demo.Program"]);
        assert_eq!(types[1].nested_types().unwrap().len(), 1);
    }

    #[test]
    fn module_without_manifest() {
        let mut builder = ImageBuilder::new();
        builder.module("part.netmodule");
        builder.type_def(0, "<Module>", "", 0, 1, 1);
        let assembly = Assembly::from_mem(builder.build()).unwrap();

        assert!(!assembly.has_manifest());
        assert!(matches!(assembly.name(), Err(Error::OutOfBounds)));
        assert!(assembly.entry_point().is_null());
        assert!(assembly.assembly_references().unwrap().is_empty());
    }

    #[test]
    fn invalid_images() {
        assert!(Assembly::from_mem(vec![0; 16]).is_err());
        assert!(Assembly::from_file(Path::new("/nonexistent/app.dll")).is_err());
    }
}
