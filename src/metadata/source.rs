//! The seam between the disassembler and the bytes of an assembly.
//!
//! Everything in [`crate::disassembler`] reads metadata through [`MetadataSource`]: typed
//! rows by 1-based row id, the four heaps and method bodies by RVA. [`crate::metadata::view::CilView`]
//! implements it over a loaded PE image; tests implement it over hand-built rows.

use std::ops::Range;

use crate::{
    file::ImageInfo,
    metadata::{
        method::MethodBody,
        tables::{
            AssemblyRaw, AssemblyRefRaw, ClassLayoutRaw, ConstantRaw, CustomAttributeRaw,
            EventMapRaw, EventRaw, FieldRaw, GenericParamRaw, ImplMapRaw, MemberRefRaw,
            MethodDefRaw, MethodImplRaw, MethodSemanticsRaw, MethodSpecRaw, ModuleRaw,
            ModuleRefRaw, NestedClassRaw, ParamRaw, PropertyMapRaw, PropertyRaw,
            StandAloneSigRaw, TableId, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
        },
        token::Token,
    },
    Result,
};

/// Read access to the metadata of one module.
///
/// Row accessors take a 1-based row id and return [`crate::Error::OutOfBounds`] for 0, for
/// a row past [`MetadataSource::row_count`] and for tables that are absent. Heap readers take
/// the raw heap index stored in a row.
pub trait MetadataSource {
    /// Number of rows in `table`, 0 if it is absent
    fn row_count(&self, table: TableId) -> u32;

    /// A `Module` row
    fn module(&self, rid: u32) -> Result<ModuleRaw>;
    /// A `TypeRef` row
    fn type_ref(&self, rid: u32) -> Result<TypeRefRaw>;
    /// A `TypeDef` row
    fn type_def(&self, rid: u32) -> Result<TypeDefRaw>;
    /// A `Field` row
    fn field(&self, rid: u32) -> Result<FieldRaw>;
    /// A `MethodDef` row
    fn method_def(&self, rid: u32) -> Result<MethodDefRaw>;
    /// A `Param` row
    fn param(&self, rid: u32) -> Result<ParamRaw>;
    /// A `MemberRef` row
    fn member_ref(&self, rid: u32) -> Result<MemberRefRaw>;
    /// A `Constant` row
    fn constant(&self, rid: u32) -> Result<ConstantRaw>;
    /// A `CustomAttribute` row
    fn custom_attribute(&self, rid: u32) -> Result<CustomAttributeRaw>;
    /// A `ClassLayout` row
    fn class_layout(&self, rid: u32) -> Result<ClassLayoutRaw>;
    /// A `StandAloneSig` row
    fn standalone_sig(&self, rid: u32) -> Result<StandAloneSigRaw>;
    /// An `EventMap` row
    fn event_map(&self, rid: u32) -> Result<EventMapRaw>;
    /// An `Event` row
    fn event(&self, rid: u32) -> Result<EventRaw>;
    /// A `PropertyMap` row
    fn property_map(&self, rid: u32) -> Result<PropertyMapRaw>;
    /// A `Property` row
    fn property(&self, rid: u32) -> Result<PropertyRaw>;
    /// A `MethodSemantics` row
    fn method_semantics(&self, rid: u32) -> Result<MethodSemanticsRaw>;
    /// A `MethodImpl` row
    fn method_impl(&self, rid: u32) -> Result<MethodImplRaw>;
    /// A `ModuleRef` row
    fn module_ref(&self, rid: u32) -> Result<ModuleRefRaw>;
    /// A `TypeSpec` row
    fn type_spec(&self, rid: u32) -> Result<TypeSpecRaw>;
    /// An `ImplMap` row
    fn impl_map(&self, rid: u32) -> Result<ImplMapRaw>;
    /// An `Assembly` row
    fn assembly(&self, rid: u32) -> Result<AssemblyRaw>;
    /// An `AssemblyRef` row
    fn assembly_ref(&self, rid: u32) -> Result<AssemblyRefRaw>;
    /// A `NestedClass` row
    fn nested_class(&self, rid: u32) -> Result<NestedClassRaw>;
    /// A `GenericParam` row
    fn generic_param(&self, rid: u32) -> Result<GenericParamRaw>;
    /// A `MethodSpec` row
    fn method_spec(&self, rid: u32) -> Result<MethodSpecRaw>;

    /// The identifier at `index` of the `#Strings` heap
    fn string(&self, index: u32) -> Result<&str>;
    /// The blob at `index` of the `#Blob` heap, without its length prefix
    fn blob(&self, index: u32) -> Result<&[u8]>;
    /// The literal at `index` of the `#US` heap, lossily converted from UTF-16
    fn user_string(&self, index: u32) -> Result<String>;
    /// The GUID at 1-based `index` of the `#GUID` heap
    fn guid(&self, index: u32) -> Result<uguid::Guid>;

    /// Parse the method body stored at `rva`.
    fn method_body(&self, rva: u32) -> Result<MethodBody>;

    /// The entry point token of the CLR header, null if there is none
    fn entry_point(&self) -> Token;

    /// Image values printed in the assembly listing
    fn image_info(&self) -> ImageInfo;
}

/// The row ids `[start, end)` of `table`, clamped to the rows that exist.
///
/// This is how a list column (`TypeDef.field_list`, `PropertyMap.property_list`, ...) is read:
/// the list of row N ends where the list of row N + 1 starts.
#[must_use]
pub fn row_range<S: MetadataSource + ?Sized>(
    source: &S,
    table: TableId,
    start: u32,
    end: u32,
) -> Range<u32> {
    let limit = source.row_count(table) + 1;
    let start = start.clamp(1, limit);
    let end = end.clamp(start, limit);

    start..end
}

/// The `TypeDef` row that owns `MethodDef` row `method`, 0 if no type lists it.
///
/// # Errors
/// Propagates row read errors.
pub fn declaring_type_of_method<S: MetadataSource + ?Sized>(source: &S, method: u32) -> Result<u32> {
    owner_of(source, TableId::MethodDef, method, |row| Ok(source.type_def(row)?.method_list))
}

/// The `TypeDef` row that owns `Field` row `field`, 0 if no type lists it.
///
/// # Errors
/// Propagates row read errors.
pub fn declaring_type_of_field<S: MetadataSource + ?Sized>(source: &S, field: u32) -> Result<u32> {
    owner_of(source, TableId::Field, field, |row| Ok(source.type_def(row)?.field_list))
}

/// The run owner is the last `TypeDef` whose list starts at or before `member`.
fn owner_of<S, F>(source: &S, table: TableId, member: u32, list_start: F) -> Result<u32>
where
    S: MetadataSource + ?Sized,
    F: Fn(u32) -> Result<u32>,
{
    if member == 0 || member > source.row_count(table) {
        return Ok(0);
    }

    let mut owner = 0;
    for row in 1..=source.row_count(TableId::TypeDef) {
        let start = list_start(row)?;
        if start > member {
            break;
        }
        if start != 0 {
            owner = row;
        }
    }

    Ok(owner)
}

/// The enclosing `TypeDef` row of a nested type, `None` for top level types.
///
/// # Errors
/// Propagates row read errors.
pub fn enclosing_type<S: MetadataSource + ?Sized>(source: &S, type_def: u32) -> Result<Option<u32>> {
    for row in 1..=source.row_count(TableId::NestedClass) {
        let nested = source.nested_class(row)?;
        if nested.nested_class == type_def {
            return Ok(Some(nested.enclosing_class));
        }
    }

    Ok(None)
}

/// The `TypeDef` rows directly nested in `type_def`, in table order.
///
/// # Errors
/// Propagates row read errors.
pub fn nested_types<S: MetadataSource + ?Sized>(source: &S, type_def: u32) -> Result<Vec<u32>> {
    let mut nested = Vec::new();
    for row in 1..=source.row_count(TableId::NestedClass) {
        let entry = source.nested_class(row)?;
        if entry.enclosing_class == type_def {
            nested.push(entry.nested_class);
        }
    }

    Ok(nested)
}

/// The `Field` rows of `TypeDef` row `type_def`.
///
/// # Errors
/// Propagates row read errors.
pub fn fields_of<S: MetadataSource + ?Sized>(source: &S, type_def: u32) -> Result<Range<u32>> {
    let start = source.type_def(type_def)?.field_list;
    let end = if type_def < source.row_count(TableId::TypeDef) {
        source.type_def(type_def + 1)?.field_list
    } else {
        u32::MAX
    };

    Ok(row_range(source, TableId::Field, start, end))
}

/// The `MethodDef` rows of `TypeDef` row `type_def`.
///
/// # Errors
/// Propagates row read errors.
pub fn methods_of<S: MetadataSource + ?Sized>(source: &S, type_def: u32) -> Result<Range<u32>> {
    let start = source.type_def(type_def)?.method_list;
    let end = if type_def < source.row_count(TableId::TypeDef) {
        source.type_def(type_def + 1)?.method_list
    } else {
        u32::MAX
    };

    Ok(row_range(source, TableId::MethodDef, start, end))
}

/// The `Param` rows of `MethodDef` row `method`.
///
/// # Errors
/// Propagates row read errors.
pub fn params_of<S: MetadataSource + ?Sized>(source: &S, method: u32) -> Result<Range<u32>> {
    let start = source.method_def(method)?.param_list;
    let end = if method < source.row_count(TableId::MethodDef) {
        source.method_def(method + 1)?.param_list
    } else {
        u32::MAX
    };

    Ok(row_range(source, TableId::Param, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{coded, load, table, ImageBuilder};

    fn two_types() -> ImageBuilder {
        let mut builder = ImageBuilder::new();
        builder.module("test.dll");
        builder.type_def(0, "<Module>", "", 0, 1, 1);
        builder.type_def(0x0010_0001, "Outer", "Demo", 0, 1, 1);
        builder.type_def(0x0010_0002, "Inner", "", 0, 2, 3);
        builder.field(0x0001, "a", &[0x06, 0x08]);
        builder.field(0x0001, "b", &[0x06, 0x08]);
        builder.method_def(0, 0, 0x0006, "M1", &[0x00, 0x00, 0x01], 1);
        builder.method_def(0, 0, 0x0006, "M2", &[0x00, 0x00, 0x01], 1);
        builder.method_def(0, 0, 0x0006, "M3", &[0x00, 0x01, 0x01, 0x08], 1);
        builder.param(0, 1, "value");
        builder.nested_class(3, 2);
        builder
    }

    #[test]
    fn member_runs() {
        let view = load(&two_types());

        assert_eq!(methods_of(&view, 1).unwrap(), 1..1);
        assert_eq!(methods_of(&view, 2).unwrap(), 1..3);
        assert_eq!(methods_of(&view, 3).unwrap(), 3..4);
        assert_eq!(fields_of(&view, 2).unwrap(), 1..2);
        assert_eq!(fields_of(&view, 3).unwrap(), 2..3);
        assert_eq!(params_of(&view, 1).unwrap(), 1..1);
        assert_eq!(params_of(&view, 3).unwrap(), 1..2);
    }

    #[test]
    fn owners() {
        let view = load(&two_types());

        assert_eq!(declaring_type_of_method(&view, 1).unwrap(), 2);
        assert_eq!(declaring_type_of_method(&view, 3).unwrap(), 3);
        assert_eq!(declaring_type_of_method(&view, 9).unwrap(), 0);
        assert_eq!(declaring_type_of_field(&view, 2).unwrap(), 3);
    }

    #[test]
    fn nesting() {
        let view = load(&two_types());

        assert_eq!(enclosing_type(&view, 3).unwrap(), Some(2));
        assert_eq!(enclosing_type(&view, 2).unwrap(), None);
        assert_eq!(nested_types(&view, 2).unwrap(), vec![3]);
        assert!(nested_types(&view, 3).unwrap().is_empty());
    }

    #[test]
    fn clamped_ranges() {
        let mut builder = two_types();
        builder.type_ref(coded::resolution_scope(table::MODULE, 1), "Object", "System");
        let view = load(&builder);

        assert_eq!(row_range(&view, TableId::Field, 0, 9), 1..3);
        assert_eq!(row_range(&view, TableId::Field, 5, 9), 3..3);
        assert_eq!(row_range(&view, TableId::Event, 1, 4), 1..1);
    }
}
