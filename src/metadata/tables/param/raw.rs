use crate::metadata::token::Token;

/// A row of the `Param` table
#[derive(Clone, Debug)]
pub struct ParamRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `ParamAttributes` bitmask
    pub flags: u32,
    /// Position in the signature; 0 is the return value
    pub sequence: u32,
    /// `#Strings` index of the name
    pub name: u32,
}
