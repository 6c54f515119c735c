use crate::{
    file::io::read_le_at_dyn,
    metadata::tables::{RowReadable, StandAloneSigRaw, TableId, TableInfoRef},
    Result,
};

impl RowReadable for StandAloneSigRaw {
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(sizes.blob_bytes())
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(StandAloneSigRaw {
            rid,
            token: TableId::StandAloneSig.token(rid),
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
