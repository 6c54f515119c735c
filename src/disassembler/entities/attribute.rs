use std::cell::OnceCell;

use crate::{
    disassembler::{
        entities::{cached, hex_bytes},
        resolver::Resolver,
    },
    metadata::{source::MetadataSource, tables::CustomAttributeRaw, token::Token},
    Error::NotImplemented,
    Result,
};

/// A `CustomAttribute` row.
///
/// The value blob is kept as bytes; ILAsm round-trips it verbatim.
pub struct CustomAttribute<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    row: CustomAttributeRaw,
    constructor: OnceCell<String>,
}

impl<'a, S: MetadataSource + ?Sized> CustomAttribute<'a, S> {
    /// Load `CustomAttribute` row `rid`
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn new(source: &'a S, rid: u32) -> Result<Self> {
        Ok(Self::from_row(source, source.custom_attribute(rid)?))
    }

    pub(crate) fn from_row(source: &'a S, row: CustomAttributeRaw) -> Self {
        CustomAttribute {
            source,
            row,
            constructor: OnceCell::new(),
        }
    }

    /// Token of the row
    pub fn token(&self) -> Token {
        self.row.token
    }

    /// The entity the attribute is applied to
    pub fn parent(&self) -> Token {
        self.row.parent.token
    }

    /// The `MethodDef` or `MemberRef` of the attribute constructor
    pub fn constructor_token(&self) -> Token {
        self.row.constructor.token
    }

    /// Call syntax of the constructor, `instance void Type::.ctor(params)`
    ///
    /// # Errors
    /// Returns the resolution errors of the constructor token.
    pub fn constructor(&self) -> Result<&str> {
        cached(&self.constructor, || {
            Resolver::new(self.source).solve_method_name(self.row.constructor.token)
        })
        .map(String::as_str)
    }

    /// The raw value blob
    ///
    /// # Errors
    /// Returns an error for an invalid `#Blob` index.
    pub fn value(&self) -> Result<&'a [u8]> {
        self.source.blob(self.row.value)
    }

    /// The value blob as `XX XX ...`
    ///
    /// # Errors
    /// Returns an error for an invalid `#Blob` index.
    pub fn value_text(&self) -> Result<String> {
        Ok(hex_bytes(self.value()?))
    }

    /// Named field and property arguments are not decoded
    ///
    /// # Errors
    /// Always returns [`crate::Error::NotImplemented`].
    pub fn named_arguments(&self) -> Result<Vec<String>> {
        Err(NotImplemented("custom attribute named arguments"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        disassembler::entities::custom_attributes_of,
        test::{coded, load, table, ImageBuilder},
        Error,
    };

    #[test]
    fn constructor_and_value() {
        let mut builder = ImageBuilder::new();
        builder.module("app.exe");
        builder.assembly_ref("mscorlib", [4, 0, 0, 0], &[]);
        builder.type_ref(
            coded::resolution_scope(table::ASSEMBLY_REF, 1),
            "ObsoleteAttribute",
            "System",
        );
        builder.member_ref(
            coded::member_ref_parent(table::TYPE_REF, 1),
            ".ctor",
            &[0x20, 0x01, 0x01, 0x0E],
        );
        builder.custom_attribute(
            coded::has_custom_attribute(table::MODULE, 1),
            coded::custom_attribute_type(table::MEMBER_REF, 1),
            &[0x01, 0x00, 0x02, 0x68, 0x69, 0x00, 0x00],
        );
        let view = load(&builder);

        let attribute = CustomAttribute::new(&view, 1).unwrap();
        assert_eq!(attribute.parent(), Token::new(0x0000_0001));
        assert_eq!(attribute.constructor_token(), Token::new(0x0A00_0001));
        assert_eq!(
            attribute.constructor().unwrap(),
            "instance void [mscorlib]System.ObsoleteAttribute::.ctor(string)"
        );
        assert_eq!(attribute.value_text().unwrap(), "01 00 02 68 69 00 00");
        assert!(matches!(attribute.named_arguments(), Err(Error::NotImplemented(_))));

        let all = custom_attributes_of(&view, Token::new(0x0000_0001)).unwrap();
        assert_eq!(all.len(), 1);
        assert!(custom_attributes_of(&view, Token::new(0x0200_0001)).unwrap().is_empty());
    }
}
