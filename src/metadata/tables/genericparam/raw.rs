use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `GenericParam` table
#[derive(Clone, Debug)]
pub struct GenericParamRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Zero-based position in the owner's parameter list
    pub number: u32,
    /// `GenericParamAttributes` bitmask
    pub flags: u32,
    /// `TypeOrMethodDef`: the owning type or method
    pub owner: CodedIndex,
    /// `#Strings` index of the name
    pub name: u32,
}
