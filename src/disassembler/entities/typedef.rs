use std::{cell::OnceCell, ops::Range};

use crate::{
    disassembler::{
        entities::{cached, custom_attributes_of, CustomAttribute, Event, Field, MethodDefinition, Property},
        names::quote_identifier,
        provider::DisassemblerTypeProvider,
        resolver::Resolver,
    },
    metadata::{
        source::{enclosing_type, fields_of, methods_of, nested_types, row_range, MetadataSource},
        tables::{TableId, TypeAttributes, TypeDefRaw},
        token::{Token, TokenKind},
    },
    Error::NotImplemented,
    Result,
};

/// A `TypeDef` row
pub struct TypeDefinition<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    row: TypeDefRaw,
    full_name: OnceCell<String>,
}

impl<'a, S: MetadataSource + ?Sized> TypeDefinition<'a, S> {
    /// Load `TypeDef` row `rid`
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn new(source: &'a S, rid: u32) -> Result<Self> {
        Ok(TypeDefinition {
            source,
            row: source.type_def(rid)?,
            full_name: OnceCell::new(),
        })
    }

    /// Token of the row
    pub fn token(&self) -> Token {
        self.row.token
    }

    /// `TypeAttributes` of the type
    pub fn flags(&self) -> u32 {
        self.row.flags
    }

    /// Simple name
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn name(&self) -> Result<&'a str> {
        self.source.string(self.row.type_name)
    }

    /// Namespace, empty for nested and global types
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn namespace(&self) -> Result<&'a str> {
        self.source.string(self.row.type_namespace)
    }

    /// `Namespace.Outer/Inner`
    ///
    /// # Errors
    /// Returns an error for invalid names and cyclic nesting.
    pub fn full_name(&self) -> Result<&str> {
        cached(&self.full_name, || {
            DisassemblerTypeProvider::new(self.source).type_definition_name(self.row.rid)
        })
        .map(String::as_str)
    }

    /// Whether this is the `<Module>` type holding global members
    pub fn is_global(&self) -> bool {
        self.row.rid == 1
    }

    /// Whether the type is an interface
    pub fn is_interface(&self) -> bool {
        self.row.flags & TypeAttributes::INTERFACE != 0
    }

    /// The enclosing type of a nested type
    ///
    /// # Errors
    /// Returns errors of the `NestedClass` table reads.
    pub fn declaring_type(&self) -> Result<Option<Token>> {
        Ok(enclosing_type(self.source, self.row.rid)?.map(|rid| TableId::TypeDef.token(rid)))
    }

    /// Whether the type is nested in another
    ///
    /// # Errors
    /// Returns errors of the `NestedClass` table reads.
    pub fn is_nested(&self) -> Result<bool> {
        Ok(self.declaring_type()?.is_some())
    }

    /// The `extends` clause. Types of this module are named without a `class` prefix,
    /// references as written in a signature.
    ///
    /// # Errors
    /// Returns the resolution errors of the `Extends` token.
    pub fn base_type(&self) -> Result<Option<String>> {
        let extends = self.row.extends.token;
        if extends.is_null() {
            return Ok(None);
        }

        let provider = DisassemblerTypeProvider::new(self.source);
        let text = provider.decode_type_token(extends)?;
        if extends.kind() == TokenKind::TypeDef {
            Ok(Some(text.name().to_string()))
        } else {
            Ok(Some(text.to_string()))
        }
    }

    /// `.pack` and `.size` from the `ClassLayout` table
    ///
    /// # Errors
    /// Returns errors of the `ClassLayout` table reads.
    pub fn layout(&self) -> Result<Option<(u16, u32)>> {
        for rid in 1..=self.source.row_count(TableId::ClassLayout) {
            let row = self.source.class_layout(rid)?;
            if row.parent == self.row.rid {
                return Ok(Some((row.packing_size, row.class_size)));
            }
        }

        Ok(None)
    }

    /// Names of the generic parameters, ordered by number
    ///
    /// # Errors
    /// Returns errors of the `GenericParam` table reads.
    pub fn generic_parameters(&self) -> Result<Vec<String>> {
        Resolver::new(self.source).generic_parameters(self.row.token)
    }

    /// Types declared inside this one
    ///
    /// # Errors
    /// Returns errors of the `NestedClass` and `TypeDef` reads.
    pub fn nested_types(&self) -> Result<Vec<TypeDefinition<'a, S>>> {
        nested_types(self.source, self.row.rid)?
            .into_iter()
            .map(|rid| TypeDefinition::new(self.source, rid))
            .collect()
    }

    /// Fields of the type, in table order
    ///
    /// # Errors
    /// Returns errors of the `TypeDef` and `Field` reads.
    pub fn fields(&self) -> Result<Vec<Field<'a, S>>> {
        fields_of(self.source, self.row.rid)?
            .map(|rid| Field::new(self.source, rid))
            .collect()
    }

    /// Methods of the type, in table order
    ///
    /// # Errors
    /// Returns errors of the `TypeDef` and `MethodDef` reads.
    pub fn methods(&self) -> Result<Vec<MethodDefinition<'a, S>>> {
        methods_of(self.source, self.row.rid)?
            .map(|rid| MethodDefinition::new(self.source, rid))
            .collect()
    }

    /// Properties of the type, in table order
    ///
    /// # Errors
    /// Returns errors of the `PropertyMap` and `Property` reads.
    pub fn properties(&self) -> Result<Vec<Property<'a, S>>> {
        let source = self.source;
        self.mapped_rows(TableId::PropertyMap, TableId::Property, |rid| {
            let row = source.property_map(rid)?;
            Ok((row.parent, row.property_list))
        })?
        .map(|rid| Property::new(source, rid))
        .collect()
    }

    /// Events of the type, in table order
    ///
    /// # Errors
    /// Returns errors of the `EventMap` and `Event` reads.
    pub fn events(&self) -> Result<Vec<Event<'a, S>>> {
        let source = self.source;
        self.mapped_rows(TableId::EventMap, TableId::Event, |rid| {
            let row = source.event_map(rid)?;
            Ok((row.parent, row.event_list))
        })?
        .map(|rid| Event::new(source, rid))
        .collect()
    }

    /// The member run a `PropertyMap` or `EventMap` row assigns to this type
    fn mapped_rows<F>(&self, map: TableId, members: TableId, read: F) -> Result<Range<u32>>
    where
        F: Fn(u32) -> Result<(u32, u32)>,
    {
        let count = self.source.row_count(map);
        for rid in 1..=count {
            let (parent, start) = read(rid)?;
            if parent != self.row.rid {
                continue;
            }

            let end = if rid < count { read(rid + 1)?.1 } else { u32::MAX };
            return Ok(row_range(self.source, members, start, end));
        }

        Ok(0..0)
    }

    /// Custom attributes applied to the type
    ///
    /// # Errors
    /// Returns errors of the `CustomAttribute` table reads.
    pub fn custom_attributes(&self) -> Result<Vec<CustomAttribute<'a, S>>> {
        custom_attributes_of(self.source, self.row.token)
    }

    /// The `InterfaceImpl` table is not read
    ///
    /// # Errors
    /// Always returns [`crate::Error::NotImplemented`].
    pub fn interface_implementations(&self) -> Result<Vec<String>> {
        Err(NotImplemented("interface implementations"))
    }

    /// The declaration after `.class`: `public auto ansi sealed beforefieldinit Demo.Point`.
    ///
    /// Nested types are declared with their simple name.
    ///
    /// # Errors
    /// Returns errors of the name and generic parameter reads.
    pub fn header_text(&self) -> Result<String> {
        let flags = self.row.flags;
        let mut words = Vec::new();
        if flags & TypeAttributes::INTERFACE != 0 {
            words.push("interface");
        }

        words.push(match flags & TypeAttributes::VISIBILITY_MASK {
            TypeAttributes::PUBLIC => "public",
            TypeAttributes::NESTED_PUBLIC => "nested public",
            TypeAttributes::NESTED_PRIVATE => "nested private",
            TypeAttributes::NESTED_FAMILY => "nested family",
            TypeAttributes::NESTED_ASSEMBLY => "nested assembly",
            TypeAttributes::NESTED_FAM_AND_ASSEM => "nested famandassem",
            TypeAttributes::NESTED_FAM_OR_ASSEM => "nested famorassem",
            _ => "private",
        });
        if flags & TypeAttributes::ABSTRACT != 0 {
            words.push("abstract");
        }

        words.push(match flags & TypeAttributes::LAYOUT_MASK {
            TypeAttributes::SEQUENTIAL_LAYOUT => "sequential",
            TypeAttributes::EXPLICIT_LAYOUT => "explicit",
            _ => "auto",
        });
        words.push(match flags & TypeAttributes::STRING_FORMAT_MASK {
            TypeAttributes::UNICODE_CLASS => "unicode",
            TypeAttributes::AUTO_CLASS => "autochar",
            _ => "ansi",
        });

        for (flag, keyword) in [
            (TypeAttributes::IMPORT, "import"),
            (TypeAttributes::SERIALIZABLE, "serializable"),
            (TypeAttributes::SEALED, "sealed"),
            (TypeAttributes::SPECIAL_NAME, "specialname"),
            (TypeAttributes::RT_SPECIAL_NAME, "rtspecialname"),
            (TypeAttributes::BEFORE_FIELD_INIT, "beforefieldinit"),
        ] {
            if flags & flag != 0 {
                words.push(keyword);
            }
        }

        let namespace = self.namespace()?;
        let name = if namespace.is_empty() {
            self.name()?.to_string()
        } else {
            format!("{namespace}.{}", self.name()?)
        };

        let mut text = format!("{} {}", words.join(" "), quote_identifier(&name));
        let generics = self.generic_parameters()?;
        if !generics.is_empty() {
            let quoted: Vec<String> = generics.iter().map(|g| quote_identifier(g)).collect();
            text.push_str(&format!("<{}>", quoted.join(",")));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::{coded, load, table, ImageBuilder},
        Error,
    };

    fn image() -> ImageBuilder {
        let mut builder = ImageBuilder::new();
        builder.module("app.exe");
        builder.assembly_ref("mscorlib", [4, 0, 0, 0], &[]);
        let mscorlib = coded::resolution_scope(table::ASSEMBLY_REF, 1);
        builder.type_ref(mscorlib, "Object", "System");
        builder.type_ref(mscorlib, "ValueType", "System");

        let object = coded::type_def_or_ref(table::TYPE_REF, 1);
        let value_type = coded::type_def_or_ref(table::TYPE_REF, 2);
        builder.type_def(0, "<Module>", "", 0, 1, 1);
        builder.type_def(0x0010_0001, "Program", "Demo", object, 1, 1);
        builder.type_def(0x0010_0109, "Point", "Demo", value_type, 2, 2);
        builder.type_def(0x0010_0002, "Inner", "", object, 3, 3);
        builder.type_def(0x0000_0001, "Box`1", "Demo", coded::type_def_or_ref(table::TYPE_DEF, 2), 3, 3);
        builder.type_def(0x0000_00A1, "IWidget", "Demo", 0, 3, 3);

        builder.field(0x0011, "counter", &[0x06, 0x08]);
        builder.field(0x0006, "X", &[0x06, 0x08]);
        builder.method_def(0, 0, 0x0096, "Main", &[0x00, 0x00, 0x01], 1);
        builder.method_def(0, 0, 0x00C6, "ToString", &[0x20, 0x00, 0x0E], 1);

        builder.class_layout(1, 8, 3);
        builder.nested_class(4, 2);
        builder.generic_param(0, 0, coded::type_or_method_def(table::TYPE_DEF, 5), "T");
        builder.property_map(2, 1);
        builder.property(0, "Count", &[0x28, 0x00, 0x08]);
        builder.event_map(3, 1);
        builder.event(0, "Moved", object);
        builder
    }

    #[test]
    fn class_headers() {
        let view = load(&image());
        let header = |rid| TypeDefinition::new(&view, rid).unwrap().header_text().unwrap();

        assert_eq!(header(1), "private auto ansi '<Module>'");
        assert_eq!(header(2), "public auto ansi beforefieldinit Demo.Program");
        assert_eq!(header(3), "public sequential ansi sealed beforefieldinit Demo.Point");
        assert_eq!(header(4), "nested public auto ansi beforefieldinit Inner");
        assert_eq!(header(5), "public auto ansi Demo.Box`1<T>");
        assert_eq!(header(6), "interface public abstract auto ansi Demo.IWidget");
    }

    #[test]
    fn names_and_bases() {
        let view = load(&image());

        let program = TypeDefinition::new(&view, 2).unwrap();
        assert_eq!(program.token(), Token::new(0x0200_0002));
        assert_eq!(program.full_name().unwrap(), "Demo.Program");
        assert_eq!(program.base_type().unwrap().as_deref(), Some("[mscorlib]System.Object"));
        assert!(!program.is_nested().unwrap());
        assert!(!program.is_global());

        let inner = TypeDefinition::new(&view, 4).unwrap();
        assert_eq!(inner.full_name().unwrap(), "Demo.Program/Inner");
        assert_eq!(inner.declaring_type().unwrap(), Some(Token::new(0x0200_0002)));
        assert!(inner.is_nested().unwrap());

        let boxed = TypeDefinition::new(&view, 5).unwrap();
        assert_eq!(boxed.base_type().unwrap().as_deref(), Some("Demo.Program"));
        assert_eq!(boxed.generic_parameters().unwrap(), ["T"]);

        let widget = TypeDefinition::new(&view, 6).unwrap();
        assert!(widget.is_interface());
        assert_eq!(widget.base_type().unwrap(), None);
        assert!(matches!(
            widget.interface_implementations(),
            Err(Error::NotImplemented(_))
        ));
        assert!(TypeDefinition::new(&view, 1).unwrap().is_global());
    }

    #[test]
    fn members() {
        let view = load(&image());

        let program = TypeDefinition::new(&view, 2).unwrap();
        let fields = program.fields().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name().unwrap(), "counter");
        let methods = program.methods().unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name().unwrap(), "Main");
        let nested = program.nested_types().unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].name().unwrap(), "Inner");
        let properties = program.properties().unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].name().unwrap(), "Count");
        assert!(program.events().unwrap().is_empty());
        assert_eq!(program.layout().unwrap(), None);

        let point = TypeDefinition::new(&view, 3).unwrap();
        assert_eq!(point.layout().unwrap(), Some((1, 8)));
        assert_eq!(point.fields().unwrap()[0].name().unwrap(), "X");
        assert_eq!(point.methods().unwrap()[0].name().unwrap(), "ToString");
        assert!(point.properties().unwrap().is_empty());
        let events = point.events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name().unwrap(), "Moved");

        let inner = TypeDefinition::new(&view, 4).unwrap();
        assert!(inner.fields().unwrap().is_empty());
        assert!(inner.methods().unwrap().is_empty());
        assert!(inner.custom_attributes().unwrap().is_empty());
    }
}
