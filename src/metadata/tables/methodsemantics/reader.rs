use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::tables::{
        CodedIndex, CodedIndexType, MethodSemanticsRaw, RowReadable, TableId, TableInfoRef,
    },
    Result,
};

impl RowReadable for MethodSemanticsRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* semantics */     2 +
            /* method */        sizes.table_index_bytes(TableId::MethodDef) +
            /* association */   sizes.coded_index_bytes(CodedIndexType::HasSemantics)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodSemanticsRaw {
            rid,
            token: TableId::MethodSemantics.token(rid),
            semantics: u32::from(read_le_at::<u16>(data, offset)?),
            method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
            association: CodedIndex::read(data, offset, sizes, CodedIndexType::HasSemantics)?,
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
            0x02, 0x00, // semantics
            0x07, 0x00, // method
            0x03, 0x00, // association
        ];

        let sizes = Arc::new(TableInfo::from_counts(
            &[(TableId::MethodDef, 7), (TableId::Property, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodSemanticsRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x1800_0001);
        assert_eq!(row.semantics, 0x0002);
        assert_eq!(row.method, 7);
        assert_eq!(row.association.tag, TableId::Property);
        assert_eq!(row.association.row, 1);
    }
}
