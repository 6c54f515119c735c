use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `MethodImpl` table
#[derive(Clone, Debug)]
pub struct MethodImplRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `TypeDef` row declaring the override
    pub class: u32,
    /// `MethodDefOrRef`: the implementing method
    pub method_body: CodedIndex,
    /// `MethodDefOrRef`: the overridden declaration
    pub method_declaration: CodedIndex,
}
