use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{
        CodedIndex, CodedIndexType, CustomAttributeRaw, RowReadable, TableId, TableInfoRef,
    },
    Result,
};

impl RowReadable for CustomAttributeRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* parent */        sizes.coded_index_bytes(CodedIndexType::HasCustomAttribute) +
            /* constructor */   sizes.coded_index_bytes(CodedIndexType::CustomAttributeType) +
            /* value */         sizes.blob_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(CustomAttributeRaw {
            rid,
            token: TableId::CustomAttribute.token(rid),
            parent: CodedIndex::read(data, offset, sizes, CodedIndexType::HasCustomAttribute)?,
            constructor: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::CustomAttributeType,
            )?,
            value: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
