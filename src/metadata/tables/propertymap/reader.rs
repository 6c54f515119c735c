use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{PropertyMapRaw, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for PropertyMapRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* parent */        sizes.table_index_bytes(TableId::TypeDef) +
            /* property_list */ sizes.table_index_bytes(TableId::Property)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyMapRaw {
            rid,
            token: TableId::PropertyMap.token(rid),
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            property_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Property))?,
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
            0x03, 0x00, // parent
            0x05, 0x00, // property_list
        ];

        let sizes = Arc::new(TableInfo::from_counts(
            &[(TableId::TypeDef, 3), (TableId::Property, 5)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<PropertyMapRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x1500_0001);
        assert_eq!(row.parent, 3);
        assert_eq!(row.property_list, 5);
    }
}
