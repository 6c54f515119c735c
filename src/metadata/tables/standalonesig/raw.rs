use crate::metadata::token::Token;

/// A row of the `StandAloneSig` table
#[derive(Clone, Debug)]
pub struct StandAloneSigRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `#Blob` index of the signature
    pub signature: u32,
}
