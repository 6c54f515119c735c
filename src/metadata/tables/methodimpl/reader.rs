use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{
        CodedIndex, CodedIndexType, MethodImplRaw, RowReadable, TableId, TableInfoRef,
    },
    Result,
};

impl RowReadable for MethodImplRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* class */                 sizes.table_index_bytes(TableId::TypeDef) +
            /* method_body */           sizes.coded_index_bytes(CodedIndexType::MethodDefOrRef) +
            /* method_declaration */    sizes.coded_index_bytes(CodedIndexType::MethodDefOrRef)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodImplRaw {
            rid,
            token: TableId::MethodImpl.token(rid),
            class: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            method_body: CodedIndex::read(data, offset, sizes, CodedIndexType::MethodDefOrRef)?,
            method_declaration: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::MethodDefOrRef,
            )?,
        })
    }
}
