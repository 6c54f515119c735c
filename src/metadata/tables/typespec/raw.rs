use crate::metadata::token::Token;

/// A row of the `TypeSpec` table
#[derive(Clone, Debug)]
pub struct TypeSpecRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `#Blob` index of the type signature
    pub signature: u32,
}
