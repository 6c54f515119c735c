use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::tables::{AssemblyRefRaw, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for AssemblyRefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* major_version */         2 +
            /* minor_version */         2 +
            /* build_number */          2 +
            /* revision_number */       2 +
            /* flags */                 4 +
            /* public_key_or_token */   sizes.blob_bytes() +
            /* name */                  sizes.str_bytes() +
            /* culture */               sizes.str_bytes() +
            /* hash_value */            sizes.blob_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(AssemblyRefRaw {
            rid,
            token: TableId::AssemblyRef.token(rid),
            major_version: read_le_at::<u16>(data, offset)?,
            minor_version: read_le_at::<u16>(data, offset)?,
            build_number: read_le_at::<u16>(data, offset)?,
            revision_number: read_le_at::<u16>(data, offset)?,
            flags: read_le_at::<u32>(data, offset)?,
            public_key_or_token: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            culture: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            hash_value: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
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
            0x04, 0x00, // major_version
            0x00, 0x00, // minor_version
            0x00, 0x00, // build_number
            0x00, 0x00, // revision_number
            0x00, 0x00, 0x00, 0x00, // flags
            0x20, 0x00, // public_key_or_token
            0x30, 0x00, // name
            0x00, 0x00, // culture
            0x00, 0x00, // hash_value
        ];

        let sizes = Arc::new(TableInfo::from_counts(&[(TableId::AssemblyRef, 1)], false, false, false));
        let table = MetadataTable::<AssemblyRefRaw>::new(&data, 1, sizes).unwrap();
        assert_eq!(table.row_size(), 20);

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x2300_0001);
        assert_eq!(row.major_version, 4);
        assert_eq!(row.public_key_or_token, 0x20);
        assert_eq!(row.name, 0x30);
        assert_eq!(row.culture, 0);
        assert_eq!(row.hash_value, 0);
    }
}
