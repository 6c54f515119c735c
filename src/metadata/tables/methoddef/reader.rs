use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::tables::{MethodDefRaw, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for MethodDefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* rva */           4 +
            /* impl_flags */    2 +
            /* flags */         2 +
            /* name */          sizes.str_bytes() +
            /* signature */     sizes.blob_bytes() +
            /* param_list */    sizes.table_index_bytes(TableId::Param)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: TableId::MethodDef.token(rid),
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
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
            0x50, 0x20, 0x00, 0x00, // rva
            0x00, 0x00, // impl_flags
            0x96, 0x00, // flags
            0x0A, 0x00, // name
            0x01, 0x00, // signature
            0x01, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::from_counts(
            &[(TableId::MethodDef, 1), (TableId::Param, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0600_0001);
        assert_eq!(row.rva, 0x2050);
        assert_eq!(row.impl_flags, 0);
        assert_eq!(row.flags, 0x0096);
        assert_eq!(row.name, 0x0A);
        assert_eq!(row.signature, 0x01);
        assert_eq!(row.param_list, 0x01);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x00, 0x00, 0x00, 0x00, // rva
            0x03, 0x00, // impl_flags
            0x00, 0x04, // flags
            0x01, 0x00, 0x00, 0x00, // name
            0x02, 0x00, 0x00, 0x00, // signature
            0x03, 0x00, 0x00, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::from_counts(
            &[(TableId::Param, u16::MAX as u32 + 1)],
            true,
            true,
            false,
        ));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rva, 0);
        assert_eq!(row.impl_flags, 3);
        assert_eq!(row.flags, 0x0400);
        assert_eq!(row.name, 1);
        assert_eq!(row.signature, 2);
        assert_eq!(row.param_list, 3);
    }
}
