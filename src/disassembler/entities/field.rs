use std::cell::OnceCell;

use crate::{
    disassembler::{
        entities::{cached, constant_of, custom_attributes_of, CustomAttribute},
        names::quote_identifier,
        provider::DisassemblerTypeProvider,
        typetext::TypeText,
    },
    metadata::{
        method::MemberAccess,
        signatures::decode_field_signature,
        source::{declaring_type_of_field, MetadataSource},
        tables::{FieldAttributes, FieldRaw, TableId},
        token::Token,
    },
    Error::NotImplemented,
    Result,
};

/// A `Field` row
pub struct Field<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    row: FieldRaw,
    field_type: OnceCell<TypeText>,
    default: OnceCell<Option<String>>,
}

impl<'a, S: MetadataSource + ?Sized> Field<'a, S> {
    /// Load `Field` row `rid`
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn new(source: &'a S, rid: u32) -> Result<Self> {
        Ok(Field {
            source,
            row: source.field(rid)?,
            field_type: OnceCell::new(),
            default: OnceCell::new(),
        })
    }

    /// Token of the row
    pub fn token(&self) -> Token {
        self.row.token
    }

    /// `FieldAttributes` of the field
    pub fn flags(&self) -> u32 {
        self.row.flags
    }

    /// Name of the field
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn name(&self) -> Result<&'a str> {
        self.source.string(self.row.name)
    }

    /// The `TypeDef` listing this field, a null token if none does
    ///
    /// # Errors
    /// Returns errors of the `TypeDef` table reads.
    pub fn declaring_type(&self) -> Result<Token> {
        match declaring_type_of_field(self.source, self.row.rid)? {
            0 => Ok(Token::new(0)),
            rid => Ok(TableId::TypeDef.token(rid)),
        }
    }

    /// The decoded field type
    ///
    /// # Errors
    /// Returns the decoding errors of the field signature.
    pub fn field_type(&self) -> Result<&TypeText> {
        cached(&self.field_type, || {
            let provider = DisassemblerTypeProvider::new(self.source);
            decode_field_signature(self.source.blob(self.row.signature)?, &provider)
        })
    }

    /// The formatted `Constant` of a literal or defaulted field
    ///
    /// # Errors
    /// Returns the formatting errors of the constant value.
    pub fn default_value(&self) -> Result<Option<&str>> {
        cached(&self.default, || constant_of(self.source, self.row.token))
            .map(Option::as_deref)
    }

    /// Whether the field is `static`
    pub fn is_static(&self) -> bool {
        self.row.flags & FieldAttributes::STATIC != 0
    }

    /// Marshalling descriptors are not decoded
    ///
    /// # Errors
    /// Always returns [`crate::Error::NotImplemented`].
    pub fn marshalling(&self) -> Result<String> {
        Err(NotImplemented("field marshalling descriptors"))
    }

    /// The declaration after `.field`: `public static literal int32 Max = int32(0x0000000A)`
    ///
    /// # Errors
    /// Returns the decoding errors of the signature and the constant.
    pub fn declaration(&self) -> Result<String> {
        let flags = self.row.flags;
        let mut words = vec![MemberAccess::from_flags(flags).keyword()];
        for (flag, keyword) in [
            (FieldAttributes::STATIC, "static"),
            (FieldAttributes::INIT_ONLY, "initonly"),
            (FieldAttributes::LITERAL, "literal"),
            (FieldAttributes::NOT_SERIALIZED, "notserialized"),
            (FieldAttributes::SPECIAL_NAME, "specialname"),
            (FieldAttributes::RT_SPECIAL_NAME, "rtspecialname"),
        ] {
            if flags & flag != 0 {
                words.push(keyword);
            }
        }

        let mut text = format!(
            "{} {} {}",
            words.join(" "),
            self.field_type()?,
            quote_identifier(self.name()?)
        );
        if let Some(value) = self.default_value()? {
            text.push_str(" = ");
            text.push_str(value);
        }

        Ok(text)
    }

    /// Custom attributes applied to the field
    ///
    /// # Errors
    /// Returns errors of the `CustomAttribute` table reads.
    pub fn custom_attributes(&self) -> Result<Vec<CustomAttribute<'a, S>>> {
        custom_attributes_of(self.source, self.row.token)
    }
}
