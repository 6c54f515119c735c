use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `ImplMap` table
#[derive(Clone, Debug)]
pub struct ImplMapRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `PInvokeAttributes` bitmask
    pub mapping_flags: u32,
    /// `MemberForwarded`: the imported field or method
    pub member_forwarded: CodedIndex,
    /// `#Strings` index of the native entry point name
    pub import_name: u32,
    /// `ModuleRef` row of the native library
    pub import_scope: u32,
}
