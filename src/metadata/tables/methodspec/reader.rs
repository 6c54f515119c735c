use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{
        CodedIndex, CodedIndexType, MethodSpecRaw, RowReadable, TableId, TableInfoRef,
    },
    Result,
};

impl RowReadable for MethodSpecRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* method */        sizes.coded_index_bytes(CodedIndexType::MethodDefOrRef) +
            /* instantiation */ sizes.blob_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodSpecRaw {
            rid,
            token: TableId::MethodSpec.token(rid),
            method: CodedIndex::read(data, offset, sizes, CodedIndexType::MethodDefOrRef)?,
            instantiation: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
