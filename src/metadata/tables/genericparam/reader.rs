use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::tables::{
        CodedIndex, CodedIndexType, GenericParamRaw, RowReadable, TableId, TableInfoRef,
    },
    Result,
};

impl RowReadable for GenericParamRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* number */    2 +
            /* flags */     2 +
            /* owner */     sizes.coded_index_bytes(CodedIndexType::TypeOrMethodDef) +
            /* name */      sizes.str_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(GenericParamRaw {
            rid,
            token: TableId::GenericParam.token(rid),
            number: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            owner: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeOrMethodDef)?,
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
    fn crafted_short() {
        let data = vec![
            0x00, 0x00, // number
            0x00, 0x00, // flags
            0x04, 0x00, // owner
            0x70, 0x00, // name
            0x01, 0x00, // number
            0x01, 0x00, // flags
            0x03, 0x00, // owner
            0x72, 0x00, // name
        ];

        let sizes = Arc::new(TableInfo::from_counts(
            &[(TableId::TypeDef, 2), (TableId::MethodDef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<GenericParamRaw>::new(&data, 2, sizes).unwrap();

        let first = table.get(1).unwrap();
        assert_eq!(first.token.value(), 0x2A00_0001);
        assert_eq!(first.number, 0);
        assert_eq!(first.owner.token.value(), 0x0200_0002);
        assert_eq!(first.name, 0x70);

        let second = table.get(2).unwrap();
        assert_eq!(second.number, 1);
        assert_eq!(second.flags, 1);
        assert_eq!(second.owner.token.value(), 0x0600_0001);
    }
}
