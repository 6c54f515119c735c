use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::tables::{PropertyRaw, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for PropertyRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* flags */     2 +
            /* name */      sizes.str_bytes() +
            /* signature */ sizes.blob_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyRaw {
            rid,
            token: TableId::Property.token(rid),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
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
    fn crafted_long() {
        let data = vec![
            0x00, 0x00, // flags
            0x01, 0x02, 0x03, 0x04, // name
            0x05, 0x06, 0x07, 0x08, // signature
        ];

        let sizes = Arc::new(TableInfo::from_counts(&[], true, true, false));
        let table = MetadataTable::<PropertyRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x1700_0001);
        assert_eq!(row.flags, 0);
        assert_eq!(row.name, 0x04030201);
        assert_eq!(row.signature, 0x08070605);
    }
}
