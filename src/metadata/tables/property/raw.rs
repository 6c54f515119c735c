use crate::metadata::token::Token;

/// A row of the `Property` table
#[derive(Clone, Debug)]
pub struct PropertyRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `PropertyAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the property signature
    pub signature: u32,
}
