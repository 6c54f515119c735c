use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `MemberRef` table
#[derive(Clone, Debug)]
pub struct MemberRefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `MemberRefParent`: the type (or module/method) owning the member
    pub class: CodedIndex,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the field or method signature
    pub signature: u32,
}
