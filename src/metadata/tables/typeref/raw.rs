use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `TypeRef` table
#[derive(Clone, Debug)]
pub struct TypeRefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `ResolutionScope`: a Module, ModuleRef, AssemblyRef or enclosing TypeRef
    pub resolution_scope: CodedIndex,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
}
