//! Operand text for metadata tokens.
//!
//! Every token found in an IL stream or a custom attribute is turned into the text ILAsm
//! expects at that position: method call syntax, field syntax, type syntax or a
//! standalone call-site signature. A token of the wrong kind for its position is an
//! error; nothing is guessed.

use crate::{
    disassembler::{
        names::quote_identifier, opcodes::OpCode, provider::DisassemblerTypeProvider,
        typetext::TypeText,
    },
    metadata::{
        signatures::{
            decode_field_signature, decode_method_signature, decode_method_spec_signature,
            SignatureHeader, SignatureKind,
        },
        source::{declaring_type_of_field, declaring_type_of_method, MetadataSource},
        tables::TableId,
        token::{Token, TokenKind},
    },
    Error::{IndexOutOfRange, TokenMismatch},
    IndexKind, Result,
};
use unicode_general_category::{get_general_category, GeneralCategory};

/// What a method body's variable operands can refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodScope {
    /// Whether argument 0 is the implicit `this`
    pub is_instance: bool,
    /// Names of the declared parameters, in signature order
    pub parameter_names: Vec<String>,
    /// Number of local variable slots
    pub local_count: usize,
}

/// Resolves tokens against one metadata source.
pub struct Resolver<'a, S: MetadataSource + ?Sized> {
    provider: DisassemblerTypeProvider<'a, S>,
}

impl<'a, S: MetadataSource + ?Sized> Resolver<'a, S> {
    /// Create a resolver reading from `source`
    pub fn new(source: &'a S) -> Self {
        Resolver {
            provider: DisassemblerTypeProvider::new(source),
        }
    }

    /// The underlying metadata
    pub fn source(&self) -> &'a S {
        self.provider.source()
    }

    /// The type provider used for every signature this resolver decodes
    pub fn provider(&self) -> &DisassemblerTypeProvider<'a, S> {
        &self.provider
    }

    /// Call syntax of a `MethodDef`, `MemberRef` or `MethodSpec`, as used by `call`,
    /// `newobj` and custom attribute constructors.
    ///
    /// `MethodDef`: `ret DeclaringType::Name(params)`, the declaring type without a
    /// `class`/`valuetype` prefix. `MemberRef`: the same shape with the parent as it is
    /// written in a signature. `MethodSpec`: the generic method with its instantiation
    /// `<A,B>` following the name.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenMismatch`] for any other token, and the decoding
    /// errors of the involved signatures.
    pub fn solve_method_name(&self, token: Token) -> Result<String> {
        if token.kind() == TokenKind::MethodSpec {
            let spec = self.source().method_spec(token.row())?;
            let blob = self.source().blob(spec.instantiation)?;
            let arguments = decode_method_spec_signature(blob, &self.provider)?;

            return self.method_text(spec.method.token, &generic_argument_list(&arguments));
        }

        self.method_text(token, "")
    }

    fn method_text(&self, token: Token, generic: &str) -> Result<String> {
        match token.kind() {
            TokenKind::MemberRef => self.member_reference_text(token, generic),
            TokenKind::MethodDef => {
                let source = self.source();
                let row = source.method_def(token.row())?;
                let signature = decode_method_signature(source.blob(row.signature)?, &self.provider)?;
                let declaring = self.declaring_type_name(declaring_type_of_method(source, token.row())?)?;

                Ok(format!(
                    "{} {}::{}{}{}",
                    self.provider.return_text(&signature),
                    declaring,
                    quote_identifier(source.string(row.name)?),
                    generic,
                    self.provider.parameter_list(&signature, None)
                ))
            }
            _ => Err(TokenMismatch {
                expected: TokenKind::MethodDef,
                token,
            }),
        }
    }

    fn member_reference_text(&self, token: Token, generic: &str) -> Result<String> {
        let source = self.source();
        let row = source.member_ref(token.row())?;
        let parent = self.member_parent_text(token, row.class.tag, row.class.row)?;
        let name = quote_identifier(source.string(row.name)?);
        let blob = source.blob(row.signature)?;

        let header = SignatureHeader(*blob.first().ok_or_else(|| {
            malformed_error!("MemberRef {} has an empty signature", token)
        })?);

        if header.kind()? == SignatureKind::Field {
            let field = decode_field_signature(blob, &self.provider)?;
            return Ok(format!("{field} {parent}::{name}"));
        }

        let signature = decode_method_signature(blob, &self.provider)?;
        Ok(format!(
            "{} {parent}::{name}{generic}{}",
            self.provider.return_text(&signature),
            self.provider.parameter_list(&signature, None)
        ))
    }

    fn member_parent_text(&self, token: Token, table: TableId, rid: u32) -> Result<String> {
        match table {
            TableId::TypeRef | TableId::TypeSpec | TableId::TypeDef => {
                Ok(self.provider.decode_type_token(table.token(rid))?.to_string())
            }
            TableId::MethodDef => {
                self.declaring_type_name(declaring_type_of_method(self.source(), rid)?)
            }
            _ => Err(TokenMismatch {
                expected: TokenKind::TypeRef,
                token,
            }),
        }
    }

    fn declaring_type_name(&self, type_def: u32) -> Result<String> {
        if type_def == 0 {
            return Err(malformed_error!("Member without a declaring type"));
        }

        self.provider.type_definition_name(type_def)
    }

    /// Field syntax of a `Field` or field `MemberRef`: `type DeclaringType::name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenMismatch`] for any other token.
    pub fn get_field_information(&self, token: Token) -> Result<String> {
        match token.kind() {
            TokenKind::MemberRef => self.member_reference_text(token, ""),
            TokenKind::FieldDef => {
                let source = self.source();
                let row = source.field(token.row())?;
                let field = decode_field_signature(source.blob(row.signature)?, &self.provider)?;
                let declaring = self.declaring_type_name(declaring_type_of_field(source, token.row())?)?;

                Ok(format!(
                    "{field} {declaring}::{}",
                    quote_identifier(source.string(row.name)?)
                ))
            }
            _ => Err(TokenMismatch {
                expected: TokenKind::FieldDef,
                token,
            }),
        }
    }

    /// Type syntax of a `TypeDef`, `TypeRef` or `TypeSpec`.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenMismatch`] for any other token.
    pub fn get_type_information(&self, token: Token) -> Result<String> {
        Ok(self.provider.decode_type_token(token)?.to_string())
    }

    /// Operand text of `ldtoken`: `method ...`, `field ...` or a bare type.
    ///
    /// # Errors
    /// See [`Resolver::solve_method_name`], [`Resolver::get_field_information`] and
    /// [`Resolver::get_type_information`].
    pub fn get_inline_token_type(&self, token: Token) -> Result<String> {
        match token.kind() {
            TokenKind::MethodDef | TokenKind::MethodSpec | TokenKind::MemberRef => {
                Ok(format!("method {}", self.solve_method_name(token)?))
            }
            TokenKind::FieldDef => Ok(format!("field {}", self.get_field_information(token)?)),
            _ => self.get_type_information(token),
        }
    }

    /// Call-site signature of a `StandAloneSig` token, as used by `calli`.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenMismatch`] for any other token.
    pub fn get_signature(&self, token: Token) -> Result<String> {
        if token.kind() != TokenKind::StandaloneSig {
            return Err(TokenMismatch {
                expected: TokenKind::StandaloneSig,
                token,
            });
        }

        let row = self.source().standalone_sig(token.row())?;
        let signature = decode_method_signature(self.source().blob(row.signature)?, &self.provider)?;

        Ok(format!(
            "{}{}",
            self.provider.return_text(&signature),
            self.provider.parameter_list(&signature, None)
        ))
    }

    /// Literal of a `#US` token and whether it can be written between quotes.
    ///
    /// Strings that cannot are returned as `bytearray (XX XX ... )`, the UTF-16LE bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenMismatch`] for a token outside `#US`.
    pub fn get_user_string(&self, token: Token) -> Result<(String, bool)> {
        if token.kind() != TokenKind::UserString {
            return Err(TokenMismatch {
                expected: TokenKind::UserString,
                token,
            });
        }

        let text = self.source().user_string(token.row())?;
        if text.chars().all(is_printable) {
            return Ok((text, true));
        }

        let mut dump = String::from("bytearray (");
        for unit in text.encode_utf16() {
            for byte in unit.to_le_bytes() {
                dump.push_str(&format!("{byte:02X} "));
            }
        }
        dump.push(')');

        Ok((dump, false))
    }

    /// Name shown for a variable operand.
    ///
    /// Argument opcodes address the parameters; on instance methods slot 0 is `this` and
    /// the remaining slots shift by one. Every other opcode addresses the locals, named
    /// `V_n` by position.
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] for a slot the method does not have.
    pub fn get_variable_name(&self, opcode: &OpCode, index: u16, scope: &MethodScope) -> Result<String> {
        let slot = usize::from(index);

        if opcode.is_argument() {
            let parameter = if scope.is_instance {
                match slot.checked_sub(1) {
                    Some(parameter) => parameter,
                    None => return Ok("this".to_string()),
                }
            } else {
                slot
            };

            return match scope.parameter_names.get(parameter) {
                Some(name) => Ok(quote_identifier(name)),
                None => Err(IndexOutOfRange {
                    kind: IndexKind::Parameter,
                    index: slot,
                }),
            };
        }

        if slot < scope.local_count {
            Ok(format!("V_{slot}"))
        } else {
            Err(IndexOutOfRange {
                kind: IndexKind::Local,
                index: slot,
            })
        }
    }

    /// Names of the generic parameters of a `TypeDef` or `MethodDef`, ordered by number.
    ///
    /// # Errors
    /// Returns errors of the underlying table reads.
    pub fn generic_parameters(&self, owner: Token) -> Result<Vec<String>> {
        let source = self.source();
        let mut parameters = Vec::new();
        for rid in 1..=source.row_count(TableId::GenericParam) {
            let row = source.generic_param(rid)?;
            if row.owner.token == owner {
                parameters.push((row.number, source.string(row.name)?.to_string()));
            }
        }

        parameters.sort_by_key(|(number, _)| *number);
        Ok(parameters.into_iter().map(|(_, name)| name).collect())
    }

    /// `DeclaringType::Name` of a method, as written by `.override`.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenMismatch`] unless `token` is a `MethodDef` or
    /// `MemberRef`.
    pub fn method_reference_name(&self, token: Token) -> Result<String> {
        let source = self.source();
        match token.kind() {
            TokenKind::MethodDef => {
                let row = source.method_def(token.row())?;
                let declaring = self.declaring_type_name(declaring_type_of_method(source, token.row())?)?;
                Ok(format!("{declaring}::{}", quote_identifier(source.string(row.name)?)))
            }
            TokenKind::MemberRef => {
                let row = source.member_ref(token.row())?;
                let parent = self.member_parent_text(token, row.class.tag, row.class.row)?;
                Ok(format!("{parent}::{}", quote_identifier(source.string(row.name)?)))
            }
            _ => Err(TokenMismatch {
                expected: TokenKind::MethodDef,
                token,
            }),
        }
    }
}

/// `<A,B>` for a generic instantiation, empty without arguments
#[must_use]
pub fn generic_argument_list(arguments: &[TypeText]) -> String {
    if arguments.is_empty() {
        return String::new();
    }

    let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
    format!("<{}>", arguments.join(","))
}

/// Whether `c` can appear in a quoted ILAsm string literal.
///
/// Control, unassigned and other-symbol characters force a `bytearray`. The check runs on
/// UTF-16 code units, so characters outside the BMP (surrogate pairs) stay printable.
fn is_printable(c: char) -> bool {
    if c == '"' {
        return false;
    }
    if u32::from(c) > 0xFFFF {
        return true;
    }

    !matches!(
        get_general_category(c),
        GeneralCategory::Control | GeneralCategory::Unassigned | GeneralCategory::OtherSymbol
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        disassembler::opcodes::{find_opcode, INSTRUCTIONS},
        metadata::view::CilView,
        test::{coded, load, table, ImageBuilder},
        Error,
    };

    struct Fixture {
        view: CilView,
        hello: u32,
        quoted: u32,
        symbol: u32,
    }

    fn fixture() -> Fixture {
        let mut builder = ImageBuilder::new();
        builder.module("app.exe");
        builder.assembly_ref("mscorlib", [4, 0, 0, 0], &[]);
        let mscorlib = coded::resolution_scope(table::ASSEMBLY_REF, 1);
        builder.type_ref(mscorlib, "Object", "System"); // 1
        builder.type_ref(mscorlib, "Console", "System"); // 2
        builder.type_ref(mscorlib, "List`1", "System.Collections.Generic"); // 3
        builder.type_ref(mscorlib, "ValueType", "System"); // 4
        builder.type_ref(mscorlib, "String", "System"); // 5

        builder.type_def(0, "<Module>", "", 0, 1, 1);
        let object = coded::type_def_or_ref(table::TYPE_REF, 1);
        builder.type_def(0x0010_0001, "Program", "Demo", object, 1, 1);
        let value_type = coded::type_def_or_ref(table::TYPE_REF, 4);
        builder.type_def(0x0010_0109, "Point", "Demo", value_type, 2, 4);

        builder.field(0x0011, "counter", &[0x06, 0x08]);
        builder.field(0x0006, "X", &[0x06, 0x08]);

        builder.method_def(0, 0, 0x0096, "Main", &[0x00, 0x01, 0x01, 0x1D, 0x0E], 1);
        builder.method_def(0, 0, 0x0086, "Add", &[0x20, 0x02, 0x08, 0x08, 0x08], 2);
        builder.method_def(0, 0, 0x0096, "Identity", &[0x10, 0x01, 0x01, 0x1E, 0x00, 0x1E, 0x00], 4);
        builder.param(0, 1, "args");
        builder.param(0, 1, "a");
        builder.param(0, 2, "b");
        builder.param(0, 1, "value");

        builder.member_ref(
            coded::member_ref_parent(table::TYPE_REF, 2),
            "WriteLine",
            &[0x00, 0x01, 0x01, 0x0E],
        );
        builder.member_ref(
            coded::member_ref_parent(table::TYPE_SPEC, 1),
            "Add",
            &[0x20, 0x01, 0x01, 0x13, 0x00],
        );
        builder.member_ref(coded::member_ref_parent(table::TYPE_REF, 5), "Empty", &[0x06, 0x0E]);
        builder.member_ref(
            coded::member_ref_parent(table::MODULE_REF, 1),
            "Native",
            &[0x00, 0x00, 0x01],
        );
        builder.module_ref("native.dll");

        builder.type_spec(&[0x15, 0x12, 0x0D, 0x01, 0x08]);
        builder.method_spec(coded::method_def_or_ref(table::METHOD_DEF, 3), &[0x0A, 0x01, 0x0E]);
        builder.standalone_sig(&[0x00, 0x02, 0x08, 0x08, 0x0E]);
        builder.generic_param(0, 0, coded::type_or_method_def(table::METHOD_DEF, 3), "T");

        let hello = builder.add_user_string("Hello");
        let quoted = builder.add_user_string("a\"b");
        let symbol = builder.add_user_string("\u{00A9}");

        Fixture {
            view: load(&builder),
            hello,
            quoted,
            symbol,
        }
    }

    #[test]
    fn method_names() {
        let fixture = fixture();
        let resolver = Resolver::new(&fixture.view);

        assert_eq!(
            resolver.solve_method_name(Token::new(0x0600_0001)).unwrap(),
            "void Demo.Program::Main(string[])"
        );
        assert_eq!(
            resolver.solve_method_name(Token::new(0x0600_0002)).unwrap(),
            "instance int32 Demo.Program::Add(int32,int32)"
        );
        assert_eq!(
            resolver.solve_method_name(Token::new(0x0A00_0001)).unwrap(),
            "void [mscorlib]System.Console::WriteLine(string)"
        );
        assert_eq!(
            resolver.solve_method_name(Token::new(0x0A00_0002)).unwrap(),
            "instance void class [mscorlib]System.Collections.Generic.List`1<int32>::Add(!0)"
        );
        assert_eq!(
            resolver.solve_method_name(Token::new(0x2B00_0001)).unwrap(),
            "!!0 Demo.Program::Identity<string>(!!0)"
        );
    }

    #[test]
    fn mismatched_tokens() {
        let fixture = fixture();
        let resolver = Resolver::new(&fixture.view);

        assert!(matches!(
            resolver.solve_method_name(Token::new(0x0400_0001)),
            Err(Error::TokenMismatch { .. })
        ));
        assert!(matches!(
            resolver.get_field_information(Token::new(0x0600_0001)),
            Err(Error::TokenMismatch { .. })
        ));
        assert!(matches!(
            resolver.get_signature(Token::new(0x0100_0001)),
            Err(Error::TokenMismatch { .. })
        ));
        assert!(matches!(
            resolver.get_user_string(Token::new(0x0100_0001)),
            Err(Error::TokenMismatch { .. })
        ));
        assert!(matches!(
            resolver.solve_method_name(Token::new(0x0A00_0004)),
            Err(Error::TokenMismatch { .. })
        ));
    }

    #[test]
    fn fields_and_types() {
        let fixture = fixture();
        let resolver = Resolver::new(&fixture.view);

        assert_eq!(
            resolver.get_field_information(Token::new(0x0400_0001)).unwrap(),
            "int32 Demo.Program::counter"
        );
        assert_eq!(
            resolver.get_field_information(Token::new(0x0400_0002)).unwrap(),
            "int32 Demo.Point::X"
        );
        assert_eq!(
            resolver.get_field_information(Token::new(0x0A00_0003)).unwrap(),
            "string [mscorlib]System.String::Empty"
        );
        assert_eq!(
            resolver.get_type_information(Token::new(0x0200_0003)).unwrap(),
            "valuetype Demo.Point"
        );
        assert_eq!(
            resolver.get_type_information(Token::new(0x0100_0002)).unwrap(),
            "[mscorlib]System.Console"
        );
    }

    #[test]
    fn inline_tokens() {
        let fixture = fixture();
        let resolver = Resolver::new(&fixture.view);

        assert_eq!(
            resolver.get_inline_token_type(Token::new(0x0600_0001)).unwrap(),
            "method void Demo.Program::Main(string[])"
        );
        assert_eq!(
            resolver.get_inline_token_type(Token::new(0x0400_0001)).unwrap(),
            "field int32 Demo.Program::counter"
        );
        assert_eq!(
            resolver.get_inline_token_type(Token::new(0x1B00_0001)).unwrap(),
            "class [mscorlib]System.Collections.Generic.List`1<int32>"
        );
    }

    #[test]
    fn signatures_and_strings() {
        let fixture = fixture();
        let resolver = Resolver::new(&fixture.view);

        assert_eq!(
            resolver.get_signature(Token::new(0x1100_0001)).unwrap(),
            "int32(int32,string)"
        );

        let hello = Token::from_parts(0x70, fixture.hello);
        assert_eq!(resolver.get_user_string(hello).unwrap(), ("Hello".to_string(), true));

        let quoted = Token::from_parts(0x70, fixture.quoted);
        assert_eq!(
            resolver.get_user_string(quoted).unwrap(),
            ("bytearray (61 00 22 00 62 00 )".to_string(), false)
        );

        let symbol = Token::from_parts(0x70, fixture.symbol);
        assert_eq!(
            resolver.get_user_string(symbol).unwrap(),
            ("bytearray (A9 00 )".to_string(), false)
        );
    }

    #[test]
    fn variables() {
        let fixture = fixture();
        let resolver = Resolver::new(&fixture.view);
        let scope = MethodScope {
            is_instance: true,
            parameter_names: vec!["a".to_string(), "b".to_string()],
            local_count: 2,
        };

        let ldarg_s = &INSTRUCTIONS[0x0E];
        assert_eq!(resolver.get_variable_name(ldarg_s, 0, &scope).unwrap(), "this");
        assert_eq!(resolver.get_variable_name(ldarg_s, 2, &scope).unwrap(), "b");
        assert!(matches!(
            resolver.get_variable_name(ldarg_s, 3, &scope),
            Err(Error::IndexOutOfRange {
                kind: IndexKind::Parameter,
                index: 3
            })
        ));

        let ldloc = find_opcode("ldloc").unwrap();
        assert_eq!(resolver.get_variable_name(ldloc, 1, &scope).unwrap(), "V_1");
        assert!(matches!(
            resolver.get_variable_name(ldloc, 2, &scope),
            Err(Error::IndexOutOfRange {
                kind: IndexKind::Local,
                index: 2
            })
        ));

        let static_scope = MethodScope {
            is_instance: false,
            ..scope
        };
        let starg = find_opcode("starg").unwrap();
        assert_eq!(resolver.get_variable_name(starg, 0, &static_scope).unwrap(), "a");
    }

    #[test]
    fn generics_and_overrides() {
        let fixture = fixture();
        let resolver = Resolver::new(&fixture.view);

        assert_eq!(resolver.generic_parameters(Token::new(0x0600_0003)).unwrap(), ["T"]);
        assert!(resolver.generic_parameters(Token::new(0x0600_0001)).unwrap().is_empty());
        assert_eq!(
            resolver.method_reference_name(Token::new(0x0600_0002)).unwrap(),
            "Demo.Program::Add"
        );
        assert_eq!(
            resolver.method_reference_name(Token::new(0x0A00_0001)).unwrap(),
            "[mscorlib]System.Console::WriteLine"
        );
    }

    #[test]
    fn printable_characters() {
        assert!(is_printable('a'));
        assert!(is_printable('\u{00E9}'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('"'));
        assert!(is_printable('\u{E000}'));
        assert!(!is_printable('\u{FFFF}'));
        assert!(!is_printable('\u{0378}'));
        assert!(!is_printable('\u{00A9}'));
        assert!(!is_printable('\u{00B0}'));
        assert!(!is_printable('\u{FFFD}'));
        assert!(is_printable('\u{1F600}'));
    }
}
