use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef, TypeRefRaw},
    Result,
};

impl RowReadable for TypeRefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* resolution_scope */  sizes.coded_index_bytes(CodedIndexType::ResolutionScope) +
            /* type_name */         sizes.str_bytes() +
            /* type_namespace */    sizes.str_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeRefRaw {
            rid,
            token: TableId::TypeRef.token(rid),
            resolution_scope: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::ResolutionScope,
            )?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![
            0x06, 0x00, // resolution_scope
            0x10, 0x00, // type_name
            0x20, 0x00, // type_namespace
            0x03, 0x00, // resolution_scope
            0x30, 0x00, // type_name
            0x00, 0x00, // type_namespace
        ];

        let sizes = Arc::new(TableInfo::from_counts(
            &[(TableId::TypeRef, 2), (TableId::AssemblyRef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<TypeRefRaw>::new(&data, 2, sizes).unwrap();
        assert_eq!(table.row_size(), 6);

        let first = table.get(1).unwrap();
        assert_eq!(first.token.value(), 0x0100_0001);
        assert_eq!(first.resolution_scope.tag, TableId::AssemblyRef);
        assert_eq!(first.resolution_scope.row, 1);
        assert_eq!(first.type_name, 0x10);
        assert_eq!(first.type_namespace, 0x20);

        let second = table.get(2).unwrap();
        assert_eq!(second.resolution_scope.tag, TableId::TypeRef);
        assert_eq!(second.resolution_scope.row, 0);
        assert!(second.resolution_scope.is_null());

        assert_eq!(table.iter().count(), 2);
    }
}
