use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::tables::{ClassLayoutRaw, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for ClassLayoutRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* packing_size */  2 +
            /* class_size */    4 +
            /* parent */        sizes.table_index_bytes(TableId::TypeDef)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ClassLayoutRaw {
            rid,
            token: TableId::ClassLayout.token(rid),
            packing_size: read_le_at::<u16>(data, offset)?,
            class_size: read_le_at::<u32>(data, offset)?,
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
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
            0x08, 0x00, // packing_size
            0x10, 0x00, 0x00, 0x00, // class_size
            0x02, 0x00, // parent
        ];

        let sizes = Arc::new(TableInfo::from_counts(&[(TableId::TypeDef, 2)], false, false, false));
        let table = MetadataTable::<ClassLayoutRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0F00_0001);
        assert_eq!(row.packing_size, 8);
        assert_eq!(row.class_size, 16);
        assert_eq!(row.parent, 2);
    }
}
