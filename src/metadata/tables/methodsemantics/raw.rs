use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `MethodSemantics` table
#[derive(Clone, Debug)]
pub struct MethodSemanticsRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `MethodSemanticsAttributes` role
    pub semantics: u32,
    /// `MethodDef` row of the accessor
    pub method: u32,
    /// `HasSemantics`: the event or property
    pub association: CodedIndex,
}
