use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{NestedClassRaw, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for NestedClassRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* nested_class */      sizes.table_index_bytes(TableId::TypeDef) +
            /* enclosing_class */   sizes.table_index_bytes(TableId::TypeDef)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(NestedClassRaw {
            rid,
            token: TableId::NestedClass.token(rid),
            nested_class: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            enclosing_class: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_long() {
        let data = vec![
            0x03, 0x00, 0x00, 0x00, // nested_class
            0x02, 0x00, 0x00, 0x00, // enclosing_class
        ];

        let sizes = Arc::new(TableInfo::from_counts(
            &[(TableId::TypeDef, 0x1_0000)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<NestedClassRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x2900_0001);
        assert_eq!(row.nested_class, 3);
        assert_eq!(row.enclosing_class, 2);
    }
}
