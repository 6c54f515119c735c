use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `Constant` table
#[derive(Clone, Debug)]
pub struct ConstantRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Element type of the value (`ELEMENT_TYPE_*`, or `0x12` for a null reference)
    pub base: u8,
    /// `HasConstant`: the field, parameter or property owning the value
    pub parent: CodedIndex,
    /// `#Blob` index of the value bytes
    pub value: u32,
}
