use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `TypeDef` table, with heap and table indexes unresolved
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `TypeAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// Base type (`TypeDefOrRef`); null for interfaces and `System.Object`
    pub extends: CodedIndex,
    /// First row of this type's run in the `Field` table
    pub field_list: u32,
    /// First row of this type's run in the `MethodDef` table
    pub method_list: u32,
}
