use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `CustomAttribute` table
#[derive(Clone, Debug)]
pub struct CustomAttributeRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `HasCustomAttribute`: the annotated entity
    pub parent: CodedIndex,
    /// `CustomAttributeType`: the attribute constructor (MethodDef or MemberRef)
    pub constructor: CodedIndex,
    /// `#Blob` index of the encoded arguments
    pub value: u32,
}
