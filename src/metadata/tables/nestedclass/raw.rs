use crate::metadata::token::Token;

/// A row of the `NestedClass` table
#[derive(Clone, Debug)]
pub struct NestedClassRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `TypeDef` row of the nested type
    pub nested_class: u32,
    /// `TypeDef` row of the enclosing type
    pub enclosing_class: u32,
}
