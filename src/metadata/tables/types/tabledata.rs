use crate::metadata::tables::{
    types::{CodedIndexType, MetadataTable, TableId, TableInfoRef},
    AssemblyRaw, AssemblyRefRaw, ClassLayoutRaw, ConstantRaw, CustomAttributeRaw, EventMapRaw,
    EventRaw, FieldRaw, GenericParamRaw, ImplMapRaw, MemberRefRaw, MethodDefRaw, MethodImplRaw,
    MethodSemanticsRaw, MethodSpecRaw, ModuleRaw, ModuleRefRaw, NestedClassRaw, ParamRaw,
    PropertyMapRaw, PropertyRaw, StandAloneSigRaw, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
};

/// A loaded table of one of the modelled row types.
#[allow(missing_docs)]
pub enum TableData<'a> {
    Module(MetadataTable<'a, ModuleRaw>),
    TypeRef(MetadataTable<'a, TypeRefRaw>),
    TypeDef(MetadataTable<'a, TypeDefRaw>),
    Field(MetadataTable<'a, FieldRaw>),
    MethodDef(MetadataTable<'a, MethodDefRaw>),
    Param(MetadataTable<'a, ParamRaw>),
    MemberRef(MetadataTable<'a, MemberRefRaw>),
    Constant(MetadataTable<'a, ConstantRaw>),
    CustomAttribute(MetadataTable<'a, CustomAttributeRaw>),
    ClassLayout(MetadataTable<'a, ClassLayoutRaw>),
    StandAloneSig(MetadataTable<'a, StandAloneSigRaw>),
    EventMap(MetadataTable<'a, EventMapRaw>),
    Event(MetadataTable<'a, EventRaw>),
    PropertyMap(MetadataTable<'a, PropertyMapRaw>),
    Property(MetadataTable<'a, PropertyRaw>),
    MethodSemantics(MetadataTable<'a, MethodSemanticsRaw>),
    MethodImpl(MetadataTable<'a, MethodImplRaw>),
    ModuleRef(MetadataTable<'a, ModuleRefRaw>),
    TypeSpec(MetadataTable<'a, TypeSpecRaw>),
    ImplMap(MetadataTable<'a, ImplMapRaw>),
    Assembly(MetadataTable<'a, AssemblyRaw>),
    AssemblyRef(MetadataTable<'a, AssemblyRefRaw>),
    NestedClass(MetadataTable<'a, NestedClassRaw>),
    GenericParam(MetadataTable<'a, GenericParamRaw>),
    MethodSpec(MetadataTable<'a, MethodSpecRaw>),
}

/// Row size of a table that has no typed row reader. Its rows are skipped, not read.
///
/// Returns `None` for the tables that are modelled by [`TableData`].
#[must_use]
#[rustfmt::skip]
pub fn unmodelled_row_size(id: TableId, sizes: &TableInfoRef) -> Option<u32> {
    let size = match id {
        TableId::FieldPtr => sizes.table_index_bytes(TableId::Field),
        TableId::MethodPtr => sizes.table_index_bytes(TableId::MethodDef),
        TableId::ParamPtr => sizes.table_index_bytes(TableId::Param),
        TableId::EventPtr => sizes.table_index_bytes(TableId::Event),
        TableId::PropertyPtr => sizes.table_index_bytes(TableId::Property),
        TableId::InterfaceImpl =>
            /* class */         sizes.table_index_bytes(TableId::TypeDef) +
            /* interface */     sizes.coded_index_bytes(CodedIndexType::TypeDefOrRef),
        TableId::FieldMarshal =>
            /* parent */        sizes.coded_index_bytes(CodedIndexType::HasFieldMarshal) +
            /* native_type */   sizes.blob_bytes(),
        TableId::DeclSecurity =>
            /* action */        2 +
            /* parent */        sizes.coded_index_bytes(CodedIndexType::HasDeclSecurity) +
            /* permission_set */sizes.blob_bytes(),
        TableId::FieldLayout =>
            /* offset */        4 +
            /* field */         sizes.table_index_bytes(TableId::Field),
        TableId::FieldRVA =>
            /* rva */           4 +
            /* field */         sizes.table_index_bytes(TableId::Field),
        TableId::EncLog => 8,
        TableId::EncMap | TableId::AssemblyProcessor => 4,
        TableId::AssemblyOS => 12,
        TableId::AssemblyRefProcessor =>
            /* processor */     4 +
            /* assembly_ref */  sizes.table_index_bytes(TableId::AssemblyRef),
        TableId::AssemblyRefOS =>
            /* os_* */          12 +
            /* assembly_ref */  sizes.table_index_bytes(TableId::AssemblyRef),
        TableId::File =>
            /* flags */         4 +
            /* name */          sizes.str_bytes() +
            /* hash_value */    sizes.blob_bytes(),
        TableId::ExportedType =>
            /* flags */         4 +
            /* type_def_id */   4 +
            /* name */          sizes.str_bytes() +
            /* namespace */     sizes.str_bytes() +
            /* implementation */sizes.coded_index_bytes(CodedIndexType::Implementation),
        TableId::ManifestResource =>
            /* offset */        4 +
            /* flags */         4 +
            /* name */          sizes.str_bytes() +
            /* implementation */sizes.coded_index_bytes(CodedIndexType::Implementation),
        TableId::GenericParamConstraint =>
            /* owner */         sizes.table_index_bytes(TableId::GenericParam) +
            /* constraint */    sizes.coded_index_bytes(CodedIndexType::TypeDefOrRef),
        _ => return None,
    };

    Some(u32::from(size))
}
