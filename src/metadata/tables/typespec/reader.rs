use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{RowReadable, TableId, TableInfoRef, TypeSpecRaw},
    Result,
};

impl RowReadable for TypeSpecRaw {
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(sizes.blob_bytes())
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeSpecRaw {
            rid,
            token: TableId::TypeSpec.token(rid),
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
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
        let data = vec![0x0C, 0x00];

        let sizes = Arc::new(TableInfo::from_counts(&[], false, false, false));
        let table = MetadataTable::<TypeSpecRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x1B00_0001);
        assert_eq!(row.signature, 0x0C);
    }
}
