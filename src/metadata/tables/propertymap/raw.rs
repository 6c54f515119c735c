use crate::metadata::token::Token;

/// A row of the `PropertyMap` table
#[derive(Clone, Debug)]
pub struct PropertyMapRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `TypeDef` row owning the properties
    pub parent: u32,
    /// First row of the run in the `Property` table
    pub property_list: u32,
}
