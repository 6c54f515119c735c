//! The `#~` stream: table header, row counts and the physical tables.

use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::{
    file::io::read_le,
    metadata::tables::{
        unmodelled_row_size, AssemblyRaw, AssemblyRefRaw, ClassLayoutRaw, ConstantRaw,
        CustomAttributeRaw, EventMapRaw, EventRaw, FieldRaw, GenericParamRaw, ImplMapRaw,
        MemberRefRaw, MetadataTable, MethodDefRaw, MethodImplRaw, MethodSemanticsRaw,
        MethodSpecRaw, ModuleRaw, ModuleRefRaw, NestedClassRaw, ParamRaw, PropertyMapRaw,
        PropertyRaw, RowReadable, StandAloneSigRaw, TableAccess, TableData, TableId, TableInfo,
        TableInfoRef, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
    },
    Error::OutOfBounds,
    Result,
};

/// The header of the `#~` stream and the tables that follow it.
///
/// Tables are laid out back to back in [`TableId`] order. Tables without a typed row
/// reader are still measured so the offsets of the following tables are correct, but
/// their rows cannot be read.
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.6 && II.22
pub struct TablesHeader<'a> {
    /// Major version of table schemata, shall be 2
    pub major_version: u8,
    /// Minor version of table schemata, shall be 0
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths of all tables
    pub info: TableInfoRef,
    tables: Vec<Option<TableData<'a>>>,
}

impl<'a> TablesHeader<'a> {
    /// Create a `TablesHeader` object from a sequence of bytes
    ///
    /// # Arguments
    /// * 'data' - The `#~` stream
    ///
    /// # Errors
    /// Returns an error if the data is too short or if no table is present
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let valid_bitvec = read_le::<u64>(&data[8..])?;
        if valid_bitvec == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let mut tables_header = TablesHeader {
            major_version: data[4],
            minor_version: data[5],
            valid: valid_bitvec,
            sorted: read_le::<u64>(&data[16..])?,
            info: Arc::new(TableInfo::new(data, valid_bitvec)?),
            tables: Vec::new(),
        };
        tables_header.tables.resize_with(TableId::GenericParamConstraint as usize + 1, || None);

        let mut current_offset = 24 + valid_bitvec.count_ones() as usize * 4;
        for table_id in TableId::iter() {
            let Some(table_data) = data.get(current_offset..) else {
                return Err(OutOfBounds);
            };

            tables_header.add_table(table_data, table_id, &mut current_offset)?;
        }

        Ok(tables_header)
    }

    /// Number of tables marked present
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Row count of a table, 0 if it is absent
    #[must_use]
    pub fn row_count(&self, table_id: TableId) -> u32 {
        self.info.get(table_id).rows
    }

    /// Check whether a table has any rows
    #[must_use]
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.row_count(table_id) > 0
    }

    /// The loaded table with rows of type `T`
    ///
    /// ```rust,ignore
    /// let methods = header.table::<MethodDefRaw>();
    /// ```
    #[must_use]
    pub fn table<T: RowReadable>(&'a self) -> Option<&'a MetadataTable<'a, T>>
    where
        Self: TableAccess<'a, T>,
    {
        TableAccess::<'a, T>::table(self)
    }

    /// The loaded table data of `table_id`, if it has a typed row reader and rows
    #[must_use]
    pub fn table_data(&self, table_id: TableId) -> Option<&TableData<'a>> {
        self.tables.get(table_id as usize)?.as_ref()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_table(
        &mut self,
        data: &'a [u8],
        table_type: TableId,
        current_offset: &mut usize,
    ) -> Result<()> {
        let rows = self.info.get(table_type).rows;
        if rows == 0 {
            return Ok(());
        }

        macro_rules! load {
            ($raw:ty, $variant:ident) => {{
                let table = MetadataTable::<$raw>::new(data, rows, self.info.clone())?;
                *current_offset += table.size() as usize;

                TableData::$variant(table)
            }};
        }

        let table = match table_type {
            TableId::Module => load!(ModuleRaw, Module),
            TableId::TypeRef => load!(TypeRefRaw, TypeRef),
            TableId::TypeDef => load!(TypeDefRaw, TypeDef),
            TableId::Field => load!(FieldRaw, Field),
            TableId::MethodDef => load!(MethodDefRaw, MethodDef),
            TableId::Param => load!(ParamRaw, Param),
            TableId::MemberRef => load!(MemberRefRaw, MemberRef),
            TableId::Constant => load!(ConstantRaw, Constant),
            TableId::CustomAttribute => load!(CustomAttributeRaw, CustomAttribute),
            TableId::ClassLayout => load!(ClassLayoutRaw, ClassLayout),
            TableId::StandAloneSig => load!(StandAloneSigRaw, StandAloneSig),
            TableId::EventMap => load!(EventMapRaw, EventMap),
            TableId::Event => load!(EventRaw, Event),
            TableId::PropertyMap => load!(PropertyMapRaw, PropertyMap),
            TableId::Property => load!(PropertyRaw, Property),
            TableId::MethodSemantics => load!(MethodSemanticsRaw, MethodSemantics),
            TableId::MethodImpl => load!(MethodImplRaw, MethodImpl),
            TableId::ModuleRef => load!(ModuleRefRaw, ModuleRef),
            TableId::TypeSpec => load!(TypeSpecRaw, TypeSpec),
            TableId::ImplMap => load!(ImplMapRaw, ImplMap),
            TableId::Assembly => load!(AssemblyRaw, Assembly),
            TableId::AssemblyRef => load!(AssemblyRefRaw, AssemblyRef),
            TableId::NestedClass => load!(NestedClassRaw, NestedClass),
            TableId::GenericParam => load!(GenericParamRaw, GenericParam),
            TableId::MethodSpec => load!(MethodSpecRaw, MethodSpec),
            other => {
                let Some(row_size) = unmodelled_row_size(other, &self.info) else {
                    return Err(malformed_error!("Table {:?} has no row layout", other));
                };

                let size = u64::from(rows) * u64::from(row_size);
                if (data.len() as u64) < size {
                    return Err(OutOfBounds);
                }

                *current_offset += size as usize;
                return Ok(());
            }
        };

        self.tables[table_type as usize] = Some(table);
        Ok(())
    }
}
