use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `MethodSpec` table
#[derive(Clone, Debug)]
pub struct MethodSpecRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `MethodDefOrRef`: the generic method being instantiated
    pub method: CodedIndex,
    /// `#Blob` index of the instantiation signature
    pub instantiation: u32,
}
