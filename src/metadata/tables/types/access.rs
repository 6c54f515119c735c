use crate::metadata::{
    streams::TablesHeader,
    tables::{
        types::{MetadataTable, RowReadable, TableData, TableId},
        AssemblyRaw, AssemblyRefRaw, ClassLayoutRaw, ConstantRaw, CustomAttributeRaw,
        EventMapRaw, EventRaw, FieldRaw, GenericParamRaw, ImplMapRaw, MemberRefRaw, MethodDefRaw,
        MethodImplRaw, MethodSemanticsRaw, MethodSpecRaw, ModuleRaw, ModuleRefRaw,
        NestedClassRaw, ParamRaw, PropertyMapRaw, PropertyRaw, StandAloneSigRaw, TypeDefRaw,
        TypeRefRaw, TypeSpecRaw,
    },
};

/// Typed access to a table of the tables stream, selected by its row type.
///
/// ```rust,ignore
/// let typedefs: Option<&MetadataTable<TypeDefRaw>> = header.table::<TypeDefRaw>();
/// ```
pub trait TableAccess<'a, T: RowReadable> {
    /// The table with rows of type `T`, if it is present
    fn table(&'a self) -> Option<&'a MetadataTable<'a, T>>;
}

macro_rules! impl_table_access {
    ($(($raw:ty, $id:expr, $variant:ident)),* $(,)?) => {
        $(
            impl<'a> TableAccess<'a, $raw> for TablesHeader<'a> {
                fn table(&'a self) -> Option<&'a MetadataTable<'a, $raw>> {
                    match self.table_data($id)? {
                        TableData::$variant(table) => Some(table),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_table_access!(
    (ModuleRaw, TableId::Module, Module),
    (TypeRefRaw, TableId::TypeRef, TypeRef),
    (TypeDefRaw, TableId::TypeDef, TypeDef),
    (FieldRaw, TableId::Field, Field),
    (MethodDefRaw, TableId::MethodDef, MethodDef),
    (ParamRaw, TableId::Param, Param),
    (MemberRefRaw, TableId::MemberRef, MemberRef),
    (ConstantRaw, TableId::Constant, Constant),
    (CustomAttributeRaw, TableId::CustomAttribute, CustomAttribute),
    (ClassLayoutRaw, TableId::ClassLayout, ClassLayout),
    (StandAloneSigRaw, TableId::StandAloneSig, StandAloneSig),
    (EventMapRaw, TableId::EventMap, EventMap),
    (EventRaw, TableId::Event, Event),
    (PropertyMapRaw, TableId::PropertyMap, PropertyMap),
    (PropertyRaw, TableId::Property, Property),
    (MethodSemanticsRaw, TableId::MethodSemantics, MethodSemantics),
    (MethodImplRaw, TableId::MethodImpl, MethodImpl),
    (ModuleRefRaw, TableId::ModuleRef, ModuleRef),
    (TypeSpecRaw, TableId::TypeSpec, TypeSpec),
    (ImplMapRaw, TableId::ImplMap, ImplMap),
    (AssemblyRaw, TableId::Assembly, Assembly),
    (AssemblyRefRaw, TableId::AssemblyRef, AssemblyRef),
    (NestedClassRaw, TableId::NestedClass, NestedClass),
    (GenericParamRaw, TableId::GenericParam, GenericParam),
    (MethodSpecRaw, TableId::MethodSpec, MethodSpec),
);
