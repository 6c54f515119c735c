use crate::metadata::token::Token;

/// A row of the `Field` table
#[derive(Clone, Debug)]
pub struct FieldRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `FieldAttributes` bitmask (2 bytes on disk)
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the field signature
    pub signature: u32,
}
