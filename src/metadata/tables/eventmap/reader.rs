use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{EventMapRaw, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for EventMapRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* parent */        sizes.table_index_bytes(TableId::TypeDef) +
            /* event_list */    sizes.table_index_bytes(TableId::Event)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(EventMapRaw {
            rid,
            token: TableId::EventMap.token(rid),
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            event_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Event))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_mixed() {
        let data = vec![
            0x02, 0x00, // parent
            0x01, 0x00, 0x00, 0x00, // event_list
        ];

        let sizes = Arc::new(TableInfo::from_counts(
            &[(TableId::TypeDef, 2), (TableId::Event, 0x1_0000)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<EventMapRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x1200_0001);
        assert_eq!(row.parent, 2);
        assert_eq!(row.event_list, 1);
    }
}
