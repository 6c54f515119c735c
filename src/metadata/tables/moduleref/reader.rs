use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{ModuleRefRaw, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for ModuleRefRaw {
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(sizes.str_bytes())
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ModuleRefRaw {
            rid,
            token: TableId::ModuleRef.token(rid),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted() {
        let data = vec![0x10, 0x00, 0x20, 0x00];

        let sizes = Arc::new(TableInfo::from_counts(&[], false, false, false));
        let table = MetadataTable::<ModuleRefRaw>::new(&data, 2, sizes).unwrap();

        let names: Vec<u32> = table.iter().map(|row| row.name).collect();
        assert_eq!(names, vec![0x10, 0x20]);
        assert_eq!(table.get(2).unwrap().token.value(), 0x1A00_0002);
    }
}
