//! Properties and events, with the accessor methods bound to them through
//! `MethodSemantics`.

use std::cell::OnceCell;

use crate::{
    disassembler::{
        entities::{cached, constant_of, custom_attributes_of, CustomAttribute},
        names::quote_identifier,
        provider::DisassemblerTypeProvider,
        resolver::Resolver,
        typetext::TypeText,
    },
    metadata::{
        signatures::{decode_property_signature, MethodSignature},
        source::MetadataSource,
        tables::{
            EventAttributes, EventRaw, MethodSemanticsAttributes, PropertyAttributes,
            PropertyRaw, TableId,
        },
        token::Token,
    },
    Result,
};

/// A method bound to a property or event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// `MethodSemanticsAttributes` of the binding
    pub semantics: u32,
    /// The accessor `MethodDef`
    pub method: Token,
    /// Call syntax of the accessor
    pub text: String,
}

impl Accessor {
    /// The directive introducing this accessor inside a `.property` or `.event` block
    #[must_use]
    pub fn directive(&self) -> &'static str {
        match self.semantics {
            MethodSemanticsAttributes::SETTER => ".set",
            MethodSemanticsAttributes::GETTER => ".get",
            MethodSemanticsAttributes::ADD_ON => ".addon",
            MethodSemanticsAttributes::REMOVE_ON => ".removeon",
            MethodSemanticsAttributes::FIRE => ".fire",
            _ => ".other",
        }
    }
}

fn accessors_of<S: MetadataSource + ?Sized>(source: &S, association: Token) -> Result<Vec<Accessor>> {
    let resolver = Resolver::new(source);
    let mut accessors = Vec::new();
    for rid in 1..=source.row_count(TableId::MethodSemantics) {
        let row = source.method_semantics(rid)?;
        if row.association.token != association {
            continue;
        }

        let method = TableId::MethodDef.token(row.method);
        accessors.push(Accessor {
            semantics: row.semantics,
            method,
            text: resolver.solve_method_name(method)?,
        });
    }

    Ok(accessors)
}

fn special_names(flags: u32, special: u32, rt_special: u32) -> String {
    let mut text = String::new();
    if flags & special != 0 {
        text.push_str("specialname ");
    }
    if flags & rt_special != 0 {
        text.push_str("rtspecialname ");
    }
    text
}

/// A `Property` row
pub struct Property<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    row: PropertyRaw,
    signature: OnceCell<MethodSignature<TypeText>>,
}

impl<'a, S: MetadataSource + ?Sized> Property<'a, S> {
    /// Load `Property` row `rid`
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn new(source: &'a S, rid: u32) -> Result<Self> {
        Ok(Property {
            source,
            row: source.property(rid)?,
            signature: OnceCell::new(),
        })
    }

    /// Token of the row
    pub fn token(&self) -> Token {
        self.row.token
    }

    /// `PropertyAttributes` of the property
    pub fn flags(&self) -> u32 {
        self.row.flags
    }

    /// Name of the property
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn name(&self) -> Result<&'a str> {
        self.source.string(self.row.name)
    }

    /// The decoded property signature; indexers carry parameters
    ///
    /// # Errors
    /// Returns the decoding errors of the signature.
    pub fn signature(&self) -> Result<&MethodSignature<TypeText>> {
        cached(&self.signature, || {
            let provider = DisassemblerTypeProvider::new(self.source);
            decode_property_signature(self.source.blob(self.row.signature)?, &provider)
        })
    }

    /// Type of the property
    ///
    /// # Errors
    /// Returns the decoding errors of the signature.
    pub fn property_type(&self) -> Result<&TypeText> {
        Ok(&self.signature()?.return_type)
    }

    /// The formatted default value, if the property has one
    ///
    /// # Errors
    /// Returns the formatting errors of the constant value.
    pub fn default_value(&self) -> Result<Option<String>> {
        constant_of(self.source, self.row.token)
    }

    /// The declaration after `.property`: `instance int32 Item(int32)`
    ///
    /// # Errors
    /// Returns the decoding errors of the signature.
    pub fn declaration(&self) -> Result<String> {
        let provider = DisassemblerTypeProvider::new(self.source);
        let signature = self.signature()?;

        Ok(format!(
            "{}{} {}{}",
            special_names(
                self.row.flags,
                PropertyAttributes::SPECIAL_NAME,
                PropertyAttributes::RT_SPECIAL_NAME
            ),
            provider.return_text(signature),
            quote_identifier(self.name()?),
            provider.parameter_list(signature, None)
        ))
    }

    /// `.get`, `.set` and `.other` methods of the property
    ///
    /// # Errors
    /// Returns errors of the `MethodSemantics` reads and the accessor resolution.
    pub fn accessors(&self) -> Result<Vec<Accessor>> {
        accessors_of(self.source, self.row.token)
    }

    /// Custom attributes applied to the property
    ///
    /// # Errors
    /// Returns errors of the `CustomAttribute` table reads.
    pub fn custom_attributes(&self) -> Result<Vec<CustomAttribute<'a, S>>> {
        custom_attributes_of(self.source, self.row.token)
    }
}

/// An `Event` row
pub struct Event<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    row: EventRaw,
}

impl<'a, S: MetadataSource + ?Sized> Event<'a, S> {
    /// Load `Event` row `rid`
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn new(source: &'a S, rid: u32) -> Result<Self> {
        Ok(Event {
            source,
            row: source.event(rid)?,
        })
    }

    /// Token of the row
    pub fn token(&self) -> Token {
        self.row.token
    }

    /// `EventAttributes` of the event
    pub fn flags(&self) -> u32 {
        self.row.flags
    }

    /// Name of the event
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn name(&self) -> Result<&'a str> {
        self.source.string(self.row.name)
    }

    /// The delegate type of the event
    ///
    /// # Errors
    /// Returns the resolution errors of the `EventType` token.
    pub fn event_type(&self) -> Result<String> {
        Resolver::new(self.source).get_type_information(self.row.event_type.token)
    }

    /// The declaration after `.event`: `[mscorlib]System.EventHandler Changed`
    ///
    /// # Errors
    /// Returns the resolution errors of the `EventType` token.
    pub fn declaration(&self) -> Result<String> {
        Ok(format!(
            "{}{} {}",
            special_names(
                self.row.flags,
                EventAttributes::SPECIAL_NAME,
                EventAttributes::RT_SPECIAL_NAME
            ),
            self.event_type()?,
            quote_identifier(self.name()?)
        ))
    }

    /// `.addon`, `.removeon`, `.fire` and `.other` methods of the event
    ///
    /// # Errors
    /// Returns errors of the `MethodSemantics` reads and the accessor resolution.
    pub fn accessors(&self) -> Result<Vec<Accessor>> {
        accessors_of(self.source, self.row.token)
    }

    /// Custom attributes applied to the event
    ///
    /// # Errors
    /// Returns errors of the `CustomAttribute` table reads.
    pub fn custom_attributes(&self) -> Result<Vec<CustomAttribute<'a, S>>> {
        custom_attributes_of(self.source, self.row.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{coded, load, table, ImageBuilder};

    fn image() -> ImageBuilder {
        let mut builder = ImageBuilder::new();
        builder.module("app.exe");
        builder.assembly_ref("mscorlib", [4, 0, 0, 0], &[]);
        builder.type_ref(
            coded::resolution_scope(table::ASSEMBLY_REF, 1),
            "EventHandler",
            "System",
        );
        builder.type_def(0, "<Module>", "", 0, 1, 1);
        builder.type_def(0x0010_0001, "Widget", "Demo", 0, 1, 1);
        builder.method_def(0, 0, 0x0886, "get_Size", &[0x20, 0x00, 0x08], 1);
        builder.method_def(0, 0, 0x0886, "set_Size", &[0x20, 0x01, 0x01, 0x08], 1);
        builder.method_def(0, 0, 0x0886, "add_Changed", &[0x20, 0x01, 0x01, 0x12, 0x05], 1);
        builder.method_def(0, 0, 0x0886, "get_Item", &[0x20, 0x01, 0x0E, 0x08], 1);

        builder.property_map(2, 1);
        builder.property(0, "Size", &[0x28, 0x00, 0x08]);
        builder.property(0, "Item", &[0x28, 0x01, 0x0E, 0x08]);
        builder.method_semantics(2, 1, coded::has_semantics(table::PROPERTY, 1));
        builder.method_semantics(1, 2, coded::has_semantics(table::PROPERTY, 1));
        builder.method_semantics(2, 4, coded::has_semantics(table::PROPERTY, 2));

        builder.event_map(2, 1);
        builder.event(0x0200, "Changed", coded::type_def_or_ref(table::TYPE_REF, 1));
        builder.method_semantics(8, 3, coded::has_semantics(table::EVENT, 1));
        builder
    }

    #[test]
    fn properties() {
        let view = load(&image());

        let size = Property::new(&view, 1).unwrap();
        assert_eq!(size.token(), Token::new(0x1700_0001));
        assert_eq!(size.name().unwrap(), "Size");
        assert_eq!(size.property_type().unwrap().to_string(), "int32");
        assert_eq!(size.declaration().unwrap(), "instance int32 Size()");
        assert_eq!(size.default_value().unwrap(), None);

        let accessors = size.accessors().unwrap();
        assert_eq!(accessors.len(), 2);
        assert_eq!(accessors[0].directive(), ".get");
        assert_eq!(accessors[0].method, Token::new(0x0600_0001));
        assert_eq!(accessors[0].text, "instance int32 Demo.Widget::get_Size()");
        assert_eq!(accessors[1].directive(), ".set");
        assert_eq!(accessors[1].text, "instance void Demo.Widget::set_Size(int32)");

        let item = Property::new(&view, 2).unwrap();
        assert_eq!(item.declaration().unwrap(), "instance int32 Item(string)");
        assert_eq!(item.accessors().unwrap().len(), 1);
    }

    #[test]
    fn events() {
        let view = load(&image());

        let changed = Event::new(&view, 1).unwrap();
        assert_eq!(changed.token(), Token::new(0x1400_0001));
        assert_eq!(changed.event_type().unwrap(), "[mscorlib]System.EventHandler");
        assert_eq!(
            changed.declaration().unwrap(),
            "specialname [mscorlib]System.EventHandler Changed"
        );

        let accessors = changed.accessors().unwrap();
        assert_eq!(accessors.len(), 1);
        assert_eq!(accessors[0].directive(), ".addon");
        assert_eq!(
            accessors[0].text,
            "instance void Demo.Widget::add_Changed(class [mscorlib]System.EventHandler)"
        );
        assert!(changed.custom_attributes().unwrap().is_empty());
    }
}
