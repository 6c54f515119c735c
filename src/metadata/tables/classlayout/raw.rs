use crate::metadata::token::Token;

/// A row of the `ClassLayout` table
#[derive(Clone, Debug)]
pub struct ClassLayoutRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Field alignment (`.pack`)
    pub packing_size: u16,
    /// Size of the type in bytes (`.size`)
    pub class_size: u32,
    /// `TypeDef` row this layout applies to
    pub parent: u32,
}
