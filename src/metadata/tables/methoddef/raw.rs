use crate::metadata::token::Token;

/// A row of the `MethodDef` table
#[derive(Clone, Debug)]
pub struct MethodDefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// RVA of the method body, 0 for abstract and runtime provided methods
    pub rva: u32,
    /// `MethodImplAttributes` bitmask (2 bytes on disk)
    pub impl_flags: u32,
    /// `MethodAttributes` bitmask (2 bytes on disk)
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the method signature
    pub signature: u32,
    /// First row of this method's run in the `Param` table
    pub param_list: u32,
}
