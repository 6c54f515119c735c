use crate::metadata::token::Token;

/// A row of the `ModuleRef` table
#[derive(Clone, Debug)]
pub struct ModuleRefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `#Strings` index of the module name
    pub name: u32,
}
