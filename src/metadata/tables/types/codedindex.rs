//! Coded indices (ECMA-335 II.24.2.6).
//!
//! A coded index packs a small tag selecting one of several target tables into the low bits
//! and the row number into the remaining bits.

use strum::{EnumCount, EnumIter};

use crate::{
    file::io::read_le_at,
    metadata::{
        tables::types::{TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// The kinds of coded index, each with its own list of target tables.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
#[repr(usize)]
#[allow(missing_docs)]
pub enum CodedIndexType {
    TypeDefOrRef,
    HasConstant,
    HasCustomAttribute,
    HasFieldMarshal,
    HasDeclSecurity,
    MemberRefParent,
    HasSemantics,
    MethodDefOrRef,
    MemberForwarded,
    Implementation,
    CustomAttributeType,
    ResolutionScope,
    TypeOrMethodDef,
}

impl CodedIndexType {
    /// Target tables by tag value. Unused tags are `None`.
    #[must_use]
    pub fn tables(&self) -> &'static [Option<TableId>] {
        match self {
            CodedIndexType::TypeDefOrRef => &[
                Some(TableId::TypeDef),
                Some(TableId::TypeRef),
                Some(TableId::TypeSpec),
            ],
            CodedIndexType::HasConstant => &[
                Some(TableId::Field),
                Some(TableId::Param),
                Some(TableId::Property),
            ],
            CodedIndexType::HasCustomAttribute => &[
                Some(TableId::MethodDef),
                Some(TableId::Field),
                Some(TableId::TypeRef),
                Some(TableId::TypeDef),
                Some(TableId::Param),
                Some(TableId::InterfaceImpl),
                Some(TableId::MemberRef),
                Some(TableId::Module),
                Some(TableId::DeclSecurity),
                Some(TableId::Property),
                Some(TableId::Event),
                Some(TableId::StandAloneSig),
                Some(TableId::ModuleRef),
                Some(TableId::TypeSpec),
                Some(TableId::Assembly),
                Some(TableId::AssemblyRef),
                Some(TableId::File),
                Some(TableId::ExportedType),
                Some(TableId::ManifestResource),
                Some(TableId::GenericParam),
                Some(TableId::GenericParamConstraint),
                Some(TableId::MethodSpec),
            ],
            CodedIndexType::HasFieldMarshal => &[Some(TableId::Field), Some(TableId::Param)],
            CodedIndexType::HasDeclSecurity => &[
                Some(TableId::TypeDef),
                Some(TableId::MethodDef),
                Some(TableId::Assembly),
            ],
            CodedIndexType::MemberRefParent => &[
                Some(TableId::TypeDef),
                Some(TableId::TypeRef),
                Some(TableId::ModuleRef),
                Some(TableId::MethodDef),
                Some(TableId::TypeSpec),
            ],
            CodedIndexType::HasSemantics => &[Some(TableId::Event), Some(TableId::Property)],
            CodedIndexType::MethodDefOrRef => &[Some(TableId::MethodDef), Some(TableId::MemberRef)],
            CodedIndexType::MemberForwarded => &[Some(TableId::Field), Some(TableId::MethodDef)],
            CodedIndexType::Implementation => &[
                Some(TableId::File),
                Some(TableId::AssemblyRef),
                Some(TableId::ExportedType),
            ],
            CodedIndexType::CustomAttributeType => &[
                None,
                None,
                Some(TableId::MethodDef),
                Some(TableId::MemberRef),
                None,
            ],
            CodedIndexType::ResolutionScope => &[
                Some(TableId::Module),
                Some(TableId::ModuleRef),
                Some(TableId::AssemblyRef),
                Some(TableId::TypeRef),
            ],
            CodedIndexType::TypeOrMethodDef => &[Some(TableId::TypeDef), Some(TableId::MethodDef)],
        }
    }
}

/// A decoded coded index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodedIndex {
    /// The table the index points into
    pub tag: TableId,
    /// The row within `tag`; 0 means no target
    pub row: u32,
    /// The token equivalent of `tag` and `row`
    pub token: Token,
}

impl CodedIndex {
    /// Read a coded index of type `ci_type` at `offset`, advancing it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data or an unused tag.
    pub fn read(
        data: &[u8],
        offset: &mut usize,
        info: &TableInfoRef,
        ci_type: CodedIndexType,
    ) -> Result<Self> {
        let coded_index = if info.coded_index_bytes(ci_type) == 4 {
            read_le_at::<u32>(data, offset)?
        } else {
            u32::from(read_le_at::<u16>(data, offset)?)
        };

        let (tag, row) = info.decode_coded_index(coded_index, ci_type)?;
        Ok(CodedIndex::new(tag, row))
    }

    /// Create a coded index pointing at `row` of `tag`
    #[must_use]
    pub fn new(tag: TableId, row: u32) -> CodedIndex {
        CodedIndex {
            tag,
            row,
            token: tag.token(row),
        }
    }

    /// Whether the index points nowhere
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.row == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::types::TableInfo;

    #[test]
    fn read_short() {
        let info = Arc::new(TableInfo::from_counts(&[], false, false, false));
        let data = [0x0E, 0x00];
        let mut offset = 0;

        let index = CodedIndex::read(&data, &mut offset, &info, CodedIndexType::TypeDefOrRef)
            .unwrap();
        assert_eq!(offset, 2);
        assert_eq!(index.tag, TableId::TypeSpec);
        assert_eq!(index.row, 3);
        assert_eq!(index.token.value(), 0x1B00_0003);
        assert!(!index.is_null());
    }

    #[test]
    fn read_long() {
        let info = Arc::new(TableInfo::from_counts(
            &[(TableId::AssemblyRef, 0x4000)],
            false,
            false,
            false,
        ));
        let data = [0x0A, 0x00, 0x00, 0x00];
        let mut offset = 0;

        let index =
            CodedIndex::read(&data, &mut offset, &info, CodedIndexType::ResolutionScope).unwrap();
        assert_eq!(offset, 4);
        assert_eq!(index.tag, TableId::AssemblyRef);
        assert_eq!(index.row, 2);
    }

    #[test]
    fn tag_counts() {
        assert_eq!(CodedIndexType::HasCustomAttribute.tables().len(), 22);
        assert_eq!(CodedIndexType::CustomAttributeType.tables().len(), 5);
        assert_eq!(CodedIndexType::COUNT, 13);
    }
}
