use std::cell::OnceCell;

use tracing::trace;

use crate::{
    disassembler::{
        decoder::decode_instructions,
        entities::{cached, constant_of, custom_attributes_of, CustomAttribute, Local, Parameter},
        instruction::Instruction,
        names::quote_identifier,
        regions::{create_regions, ExceptionRegion},
        resolver::{MethodScope, Resolver},
        typetext::TypeText,
    },
    metadata::{
        method::{
            MemberAccess, MethodBody, MethodImplCodeType, MethodImplOptions, MethodModifiers,
        },
        signatures::{
            decode_local_signature, decode_method_signature, CallingConvention, MethodSignature,
        },
        source::{declaring_type_of_method, params_of, MetadataSource},
        tables::{MethodDefRaw, PInvokeAttributes, ParamAttributes, TableId},
        token::{Token, TokenKind},
    },
    Error::TokenMismatch,
    Result,
};

/// Keywords of the method flags, in the order ILAsm writes them
const MODIFIER_KEYWORDS: [(MethodModifiers, &str); 11] = [
    (MethodModifiers::HIDE_BY_SIG, "hidebysig"),
    (MethodModifiers::NEW_SLOT, "newslot"),
    (MethodModifiers::SPECIAL_NAME, "specialname"),
    (MethodModifiers::RTSPECIAL_NAME, "rtspecialname"),
    (MethodModifiers::ABSTRACT, "abstract"),
    (MethodModifiers::STRICT, "strict"),
    (MethodModifiers::VIRTUAL, "virtual"),
    (MethodModifiers::FINAL, "final"),
    (MethodModifiers::STATIC, "static"),
    (MethodModifiers::UNMANAGED_EXPORT, "unmanagedexp"),
    (MethodModifiers::REQUIRE_SEC_OBJECT, "reqsecobj"),
];

/// Keywords of the implementation options, in the order ILAsm writes them
const IMPL_KEYWORDS: [(MethodImplOptions, &str); 7] = [
    (MethodImplOptions::FORWARD_REF, "forwardref"),
    (MethodImplOptions::PRESERVE_SIG, "preservesig"),
    (MethodImplOptions::INTERNAL_CALL, "internalcall"),
    (MethodImplOptions::SYNCHRONIZED, "synchronized"),
    (MethodImplOptions::NO_INLINING, "noinlining"),
    (MethodImplOptions::AGGRESSIVE_INLINING, "aggressiveinlining"),
    (MethodImplOptions::NO_OPTIMIZATION, "nooptimization"),
];

/// The `ImplMap` entry of a platform invoke method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PInvoke {
    /// Module the function is imported from
    pub module: String,
    /// Exported name of the function
    pub import_name: String,
    /// `PInvokeAttributes` of the mapping
    pub flags: u32,
}

impl PInvoke {
    /// `pinvokeimpl("module" as "import" flags)`; the `as` part is left out when the
    /// import name equals `method_name`.
    #[must_use]
    pub fn to_text(&self, method_name: &str) -> String {
        let mut text = format!("pinvokeimpl(\"{}\"", self.module);
        if !self.import_name.is_empty() && self.import_name != method_name {
            text.push_str(&format!(" as \"{}\"", self.import_name));
        }

        if self.flags & PInvokeAttributes::NO_MANGLE != 0 {
            text.push_str(" nomangle");
        }
        match self.flags & PInvokeAttributes::CHAR_SET_MASK {
            PInvokeAttributes::CHAR_SET_ANSI => text.push_str(" ansi"),
            PInvokeAttributes::CHAR_SET_UNICODE => text.push_str(" unicode"),
            PInvokeAttributes::CHAR_SET_AUTO => text.push_str(" autochar"),
            _ => {}
        }
        if self.flags & PInvokeAttributes::SUPPORTS_LAST_ERROR != 0 {
            text.push_str(" lasterr");
        }
        match self.flags & PInvokeAttributes::CALL_CONV_MASK {
            PInvokeAttributes::CALL_CONV_WINAPI => text.push_str(" winapi"),
            PInvokeAttributes::CALL_CONV_CDECL => text.push_str(" cdecl"),
            PInvokeAttributes::CALL_CONV_STDCALL => text.push_str(" stdcall"),
            PInvokeAttributes::CALL_CONV_THISCALL => text.push_str(" thiscall"),
            PInvokeAttributes::CALL_CONV_FASTCALL => text.push_str(" fastcall"),
            _ => {}
        }

        text.push(')');
        text
    }
}

/// A `MethodDef` row with its decoded signature and body.
///
/// Everything is computed on first use and cached, including the instruction stream.
pub struct MethodDefinition<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    row: MethodDefRaw,
    signature: OnceCell<MethodSignature<TypeText>>,
    body: OnceCell<Option<MethodBody>>,
    parameters: OnceCell<Vec<Parameter>>,
    locals: OnceCell<Vec<Local>>,
    instructions: OnceCell<Vec<Instruction>>,
}

impl<'a, S: MetadataSource + ?Sized> MethodDefinition<'a, S> {
    /// Load `MethodDef` row `rid`
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn new(source: &'a S, rid: u32) -> Result<Self> {
        Ok(MethodDefinition {
            source,
            row: source.method_def(rid)?,
            signature: OnceCell::new(),
            body: OnceCell::new(),
            parameters: OnceCell::new(),
            locals: OnceCell::new(),
            instructions: OnceCell::new(),
        })
    }

    /// Token of the row
    pub fn token(&self) -> Token {
        self.row.token
    }

    /// The metadata this method was read from
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// `MethodAttributes` of the method
    pub fn flags(&self) -> u32 {
        self.row.flags
    }

    /// `MethodImplAttributes` of the method
    pub fn impl_flags(&self) -> u32 {
        self.row.impl_flags
    }

    /// RVA of the body, 0 for methods without one
    pub fn rva(&self) -> u32 {
        self.row.rva
    }

    /// Name of the method
    ///
    /// # Errors
    /// Returns an error for an invalid `#Strings` index.
    pub fn name(&self) -> Result<&'a str> {
        self.source.string(self.row.name)
    }

    /// The `TypeDef` listing this method, a null token if none does
    ///
    /// # Errors
    /// Returns errors of the `TypeDef` table reads.
    pub fn declaring_type(&self) -> Result<Token> {
        match declaring_type_of_method(self.source, self.row.rid)? {
            0 => Ok(Token::new(0)),
            rid => Ok(TableId::TypeDef.token(rid)),
        }
    }

    /// Whether the CLR header names this method as the entry point
    pub fn is_entry_point(&self) -> bool {
        self.source.entry_point() == self.row.token
    }

    /// The decoded method signature
    ///
    /// # Errors
    /// Returns the decoding errors of the signature.
    pub fn signature(&self) -> Result<&MethodSignature<TypeText>> {
        cached(&self.signature, || {
            let resolver = Resolver::new(self.source);
            decode_method_signature(self.source.blob(self.row.signature)?, resolver.provider())
        })
    }

    /// Whether argument 0 is the implicit `this`
    ///
    /// # Errors
    /// Returns the decoding errors of the signature.
    pub fn is_instance(&self) -> Result<bool> {
        Ok(self.signature()?.header.is_instance())
    }

    /// The IL body, `None` for abstract, runtime, native and platform invoke methods
    ///
    /// # Errors
    /// Returns the parsing errors of the body header and its exception sections.
    pub fn body(&self) -> Result<Option<&MethodBody>> {
        cached(&self.body, || {
            let code_type = MethodImplCodeType::from_impl_flags(self.row.impl_flags);
            if self.row.rva == 0 || code_type != MethodImplCodeType::IL {
                return Ok(None);
            }

            self.source.method_body(self.row.rva).map(Some)
        })
        .map(Option::as_ref)
    }

    /// `.maxstack` of the body, 0 without one
    ///
    /// # Errors
    /// See [`MethodDefinition::body`].
    pub fn max_stack(&self) -> Result<usize> {
        Ok(self.body()?.map_or(0, |body| body.max_stack))
    }

    /// Size of the IL code, 0 without a body
    ///
    /// # Errors
    /// See [`MethodDefinition::body`].
    pub fn code_size(&self) -> Result<usize> {
        Ok(self.body()?.map_or(0, |body| body.size_code))
    }

    /// Whether locals are zero initialized (`.locals init`)
    ///
    /// # Errors
    /// See [`MethodDefinition::body`].
    pub fn init_locals(&self) -> Result<bool> {
        Ok(self.body()?.is_some_and(|body| body.is_init_local))
    }

    /// The local variable slots declared by the body
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenMismatch`] if the body points to anything but a
    /// `StandAloneSig`, and the decoding errors of the local signature.
    pub fn locals(&self) -> Result<&[Local]> {
        cached(&self.locals, || {
            let Some(body) = self.body()? else {
                return Ok(Vec::new());
            };

            let token = body.local_var_sig_token;
            if token.is_null() {
                return Ok(Vec::new());
            }
            if token.kind() != TokenKind::StandaloneSig {
                return Err(TokenMismatch {
                    expected: TokenKind::StandaloneSig,
                    token,
                });
            }

            let resolver = Resolver::new(self.source);
            let row = self.source.standalone_sig(token.row())?;
            let types = decode_local_signature(self.source.blob(row.signature)?, resolver.provider())?;

            Ok(types
                .into_iter()
                .enumerate()
                .map(|(index, local)| Local {
                    index,
                    name: format!("V_{index}"),
                    type_text: local.to_string(),
                })
                .collect())
        })
        .map(Vec::as_slice)
    }

    /// The declared parameters in signature order; the return value is not included.
    ///
    /// # Errors
    /// Returns the decoding errors of the signature and of parameter default values.
    pub fn parameters(&self) -> Result<&[Parameter]> {
        cached(&self.parameters, || {
            let signature = self.signature()?;
            let mut rows = Vec::new();
            for rid in params_of(self.source, self.row.rid)? {
                rows.push(self.source.param(rid)?);
            }

            let first_slot = usize::from(signature.header.is_instance());
            let required = signature.required_parameter_count.min(signature.parameter_types.len());
            let mut parameters = Vec::with_capacity(required);
            for (index, parameter_type) in signature.parameter_types[..required].iter().enumerate() {
                let sequence = u16::try_from(index + 1)
                    .map_err(|_| malformed_error!("Method {} has too many parameters", self.row.token))?;
                let row = rows.iter().find(|row| row.sequence == u32::from(sequence));

                let name = match row {
                    Some(row) if row.name != 0 => self.source.string(row.name)?.to_string(),
                    _ => String::new(),
                };
                let name = if name.is_empty() {
                    format!("A_{}", index + first_slot)
                } else {
                    name
                };

                let default = match row {
                    Some(row) if row.flags & ParamAttributes::HAS_DEFAULT != 0 => {
                        constant_of(self.source, row.token)?
                    }
                    _ => None,
                };

                parameters.push(Parameter {
                    sequence,
                    name,
                    type_text: parameter_type.to_string(),
                    flags: row.map_or(0, |row| row.flags),
                    default,
                    token: row.map(|row| row.token),
                });
            }

            Ok(parameters)
        })
        .map(Vec::as_slice)
    }

    /// Names of the method's generic parameters, ordered by number
    ///
    /// # Errors
    /// Returns errors of the `GenericParam` table reads.
    pub fn generic_parameters(&self) -> Result<Vec<String>> {
        Resolver::new(self.source).generic_parameters(self.row.token)
    }

    /// What variable operands of the body can refer to
    ///
    /// # Errors
    /// See [`MethodDefinition::parameters`] and [`MethodDefinition::locals`].
    pub fn scope(&self) -> Result<MethodScope> {
        Ok(MethodScope {
            is_instance: self.is_instance()?,
            parameter_names: self.parameters()?.iter().map(|p| p.name.clone()).collect(),
            local_count: self.locals()?.len(),
        })
    }

    /// The decoded instruction stream, empty without a body
    ///
    /// # Errors
    /// Returns the first decoding error of the stream.
    pub fn instructions(&self) -> Result<&[Instruction]> {
        cached(&self.instructions, || {
            let Some(body) = self.body()? else {
                return Ok(Vec::new());
            };

            let resolver = Resolver::new(self.source);
            let instructions = decode_instructions(&body.code, &resolver, &self.scope()?)?;
            trace!(
                "decoded {} instructions ({} bytes) of method {}",
                instructions.len(),
                body.code.len(),
                self.row.token
            );

            Ok(instructions)
        })
        .map(Vec::as_slice)
    }

    /// The exception regions of the body, outer blocks first
    ///
    /// # Errors
    /// See [`MethodDefinition::body`].
    pub fn exception_regions(&self) -> Result<Vec<ExceptionRegion>> {
        Ok(self
            .body()?
            .map_or_else(Vec::new, |body| create_regions(&body.exception_handlers)))
    }

    /// `.override` targets from the `MethodImpl` rows whose body is this method
    ///
    /// # Errors
    /// Returns the resolution errors of the declarations.
    pub fn overrides(&self) -> Result<Vec<String>> {
        let resolver = Resolver::new(self.source);
        let mut overrides = Vec::new();
        for rid in 1..=self.source.row_count(TableId::MethodImpl) {
            let row = self.source.method_impl(rid)?;
            if row.method_body.token == self.row.token {
                overrides.push(resolver.method_reference_name(row.method_declaration.token)?);
            }
        }

        Ok(overrides)
    }

    /// The `ImplMap` entry of a platform invoke method
    ///
    /// # Errors
    /// Returns errors of the `ImplMap` and `ModuleRef` reads.
    pub fn pinvoke(&self) -> Result<Option<PInvoke>> {
        for rid in 1..=self.source.row_count(TableId::ImplMap) {
            let row = self.source.impl_map(rid)?;
            if row.member_forwarded.token != self.row.token {
                continue;
            }

            let module = self.source.module_ref(row.import_scope)?;
            return Ok(Some(PInvoke {
                module: self.source.string(module.name)?.to_string(),
                import_name: self.source.string(row.import_name)?.to_string(),
                flags: row.mapping_flags,
            }));
        }

        Ok(None)
    }

    /// Custom attributes applied to the method
    ///
    /// # Errors
    /// Returns errors of the `CustomAttribute` table reads.
    pub fn custom_attributes(&self) -> Result<Vec<CustomAttribute<'a, S>>> {
        custom_attributes_of(self.source, self.row.token)
    }

    /// The declaration after `.method`:
    /// `public hidebysig static void Main(string[] args) cil managed`
    ///
    /// # Errors
    /// Returns the decoding errors of the signature, the parameters and the pinvoke entry.
    pub fn header_text(&self) -> Result<String> {
        let flags = self.row.flags;
        let name = self.name()?;
        let modifiers = MethodModifiers::from_method_flags(flags);

        let mut words = vec![MemberAccess::from_flags(flags).keyword().to_string()];
        for (modifier, keyword) in MODIFIER_KEYWORDS {
            if modifiers.contains(modifier) {
                words.push(keyword.to_string());
            }
        }
        if modifiers.contains(MethodModifiers::PINVOKE_IMPL) {
            if let Some(pinvoke) = self.pinvoke()? {
                words.push(pinvoke.to_text(name));
            }
        }

        let signature = self.signature()?;
        if signature.header.calling_convention() == CallingConvention::VarArgs {
            words.push("vararg".to_string());
        }

        let resolver = Resolver::new(self.source);
        let provider = resolver.provider();
        words.push(provider.return_text(signature));

        let generics = self.generic_parameters()?;
        let generics = if generics.is_empty() {
            String::new()
        } else {
            let quoted: Vec<String> = generics.iter().map(|g| quote_identifier(g)).collect();
            format!("<{}>", quoted.join(","))
        };
        let names: Vec<String> = self.parameters()?.iter().map(|p| p.name.clone()).collect();
        words.push(format!(
            "{}{generics}{}",
            quote_identifier(name),
            provider.parameter_list(signature, Some(&names))
        ));

        words.push(implementation_text(self.row.impl_flags));
        Ok(words.join(" "))
    }
}

/// `cil managed`, followed by the implementation options
fn implementation_text(impl_flags: u32) -> String {
    let code_type = MethodImplCodeType::from_impl_flags(impl_flags);
    let mut words = vec![if code_type == MethodImplCodeType::NATIVE {
        "native"
    } else if code_type == MethodImplCodeType::OPTIL {
        "optil"
    } else if code_type == MethodImplCodeType::RUNTIME {
        "runtime"
    } else {
        "cil"
    }];

    let options = MethodImplOptions::from_impl_flags(impl_flags);
    words.push(if options.contains(MethodImplOptions::UNMANAGED) {
        "unmanaged"
    } else {
        "managed"
    });
    for (option, keyword) in IMPL_KEYWORDS {
        if options.contains(option) {
            words.push(keyword);
        }
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        disassembler::{instruction::Operand, regions::HandlerKind},
        test::{coded, fat_body, load, table, tiny_body, Clause, ImageBuilder},
        Error,
    };

    fn image() -> ImageBuilder {
        let mut builder = ImageBuilder::new();
        builder.module("app.exe");
        builder.assembly_ref("mscorlib", [4, 0, 0, 0], &[]);
        let mscorlib = coded::resolution_scope(table::ASSEMBLY_REF, 1);
        builder.type_ref(mscorlib, "Object", "System"); // 1
        builder.type_ref(mscorlib, "Console", "System"); // 2
        builder.type_ref(mscorlib, "Exception", "System"); // 3
        builder.type_ref(mscorlib, "IDisposable", "System"); // 4

        builder.type_def(0, "<Module>", "", 0, 1, 1);
        let object = coded::type_def_or_ref(table::TYPE_REF, 1);
        builder.type_def(0x0010_0001, "Program", "Demo", object, 1, 1);

        let hello = builder.add_user_string("Hello");
        let mut main = vec![0x72];
        main.extend_from_slice(&hello.to_le_bytes()[..3]);
        main.push(0x70);
        main.extend_from_slice(&[0x28, 0x01, 0x00, 0x00, 0x0A, 0x2A]);
        let main = builder.add_method_body(&tiny_body(&main));

        builder.standalone_sig(&[0x07, 0x01, 0x08]);
        let add = builder.add_method_body(&fat_body(
            2,
            0x1100_0001,
            true,
            &[0x0E, 0x01, 0x0E, 0x02, 0x58, 0x13, 0x00, 0x11, 0x00, 0x2A],
            &[],
        ));

        let guarded = builder.add_method_body(&fat_body(
            1,
            0,
            false,
            &[0x00, 0xDE, 0x03, 0x26, 0xDE, 0x00, 0x2A],
            &[Clause {
                flags: 0,
                try_offset: 0,
                try_length: 3,
                handler_offset: 3,
                handler_length: 3,
                extra: 0x0100_0003,
            }],
        ));

        builder.method_def(main, 0, 0x0096, "Main", &[0x00, 0x01, 0x01, 0x1D, 0x0E], 1);
        builder.method_def(add, 0, 0x0086, "Add", &[0x20, 0x02, 0x08, 0x08, 0x08], 2);
        builder.method_def(0, 0, 0x01E6, "Dispose", &[0x20, 0x00, 0x01], 3);
        builder.method_def(0, 0x0080, 0x2016, "MessageBox", &[0x00, 0x01, 0x08, 0x0E], 3);
        builder.method_def(guarded, 0, 0x0091, "Guarded", &[0x00, 0x00, 0x01], 3);
        builder.method_def(0, 0, 0x0096, "Identity", &[0x10, 0x01, 0x01, 0x1E, 0x00, 0x1E, 0x00], 3);
        builder.param(0, 1, "args");
        builder.param(0, 1, "a");

        builder.member_ref(
            coded::member_ref_parent(table::TYPE_REF, 2),
            "WriteLine",
            &[0x00, 0x01, 0x01, 0x0E],
        );
        builder.member_ref(
            coded::member_ref_parent(table::TYPE_REF, 4),
            "Dispose",
            &[0x20, 0x00, 0x01],
        );
        builder.method_impl(
            2,
            coded::method_def_or_ref(table::METHOD_DEF, 3),
            coded::method_def_or_ref(table::MEMBER_REF, 2),
        );

        builder.module_ref("user32.dll");
        builder.impl_map(0x0104, coded::member_forwarded(table::METHOD_DEF, 4), "MessageBoxW", 1);
        builder.generic_param(0, 0, coded::type_or_method_def(table::METHOD_DEF, 6), "T");

        builder.set_entry_point(0x0600_0001);
        builder
    }

    #[test]
    fn entry_point_body() {
        let view = load(&image());
        let main = MethodDefinition::new(&view, 1).unwrap();

        assert!(main.is_entry_point());
        assert_eq!(main.name().unwrap(), "Main");
        assert_eq!(main.declaring_type().unwrap(), Token::new(0x0200_0002));
        assert_eq!(
            main.header_text().unwrap(),
            "public hidebysig static void Main(string[] args) cil managed"
        );
        assert_eq!(main.code_size().unwrap(), 11);
        assert_eq!(main.max_stack().unwrap(), 8);
        assert!(main.locals().unwrap().is_empty());

        let instructions = main.instructions().unwrap();
        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].mnemonic(), "ldstr");
        assert!(matches!(
            &instructions[0].operand,
            Operand::String { text, printable: true, .. } if text == "Hello"
        ));
        assert_eq!(instructions[1].offset, 5);
        assert!(matches!(
            &instructions[1].operand,
            Operand::Token { text, .. } if text == "void [mscorlib]System.Console::WriteLine(string)"
        ));
        assert_eq!(instructions[2].mnemonic(), "ret");
    }

    #[test]
    fn locals_and_parameters() {
        let view = load(&image());
        let add = MethodDefinition::new(&view, 2).unwrap();

        assert!(add.is_instance().unwrap());
        assert!(!add.is_entry_point());
        assert!(add.init_locals().unwrap());
        assert_eq!(add.max_stack().unwrap(), 2);

        let locals = add.locals().unwrap();
        assert_eq!(locals.len(), 1);
        assert_eq!(locals[0].name, "V_0");
        assert_eq!(locals[0].type_text, "int32");

        let parameters = add.parameters().unwrap();
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0].name, "a");
        assert!(parameters[0].token.is_some());
        assert_eq!(parameters[1].name, "A_2");
        assert_eq!(parameters[1].token, None);

        let scope = add.scope().unwrap();
        assert!(scope.is_instance);
        assert_eq!(scope.local_count, 1);

        let names: Vec<String> = add
            .instructions()
            .unwrap()
            .iter()
            .filter_map(|instruction| match &instruction.operand {
                Operand::Variable { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["a", "A_2", "V_0", "V_0"]);
        assert_eq!(
            add.header_text().unwrap(),
            "public hidebysig instance int32 Add(int32 a,int32 A_2) cil managed"
        );
    }

    #[test]
    fn abstract_override_and_pinvoke() {
        let view = load(&image());

        let dispose = MethodDefinition::new(&view, 3).unwrap();
        assert!(dispose.body().unwrap().is_none());
        assert!(dispose.instructions().unwrap().is_empty());
        assert_eq!(dispose.code_size().unwrap(), 0);
        assert_eq!(dispose.overrides().unwrap(), ["[mscorlib]System.IDisposable::Dispose"]);
        assert_eq!(
            dispose.header_text().unwrap(),
            "public hidebysig newslot virtual final instance void Dispose() cil managed"
        );

        let message_box = MethodDefinition::new(&view, 4).unwrap();
        let pinvoke = message_box.pinvoke().unwrap().unwrap();
        assert_eq!(pinvoke.module, "user32.dll");
        assert_eq!(pinvoke.import_name, "MessageBoxW");
        assert_eq!(
            message_box.header_text().unwrap(),
            "public static pinvokeimpl(\"user32.dll\" as \"MessageBoxW\" unicode winapi) \
             int32 MessageBox(string A_0) cil managed preservesig"
        );
        assert!(message_box.overrides().unwrap().is_empty());
        assert_eq!(MethodDefinition::new(&view, 1).unwrap().pinvoke().unwrap(), None);
    }

    #[test]
    fn protected_blocks() {
        let view = load(&image());
        let guarded = MethodDefinition::new(&view, 5).unwrap();

        let regions = guarded.exception_regions().unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].kind, HandlerKind::Try);
        assert_eq!((regions[0].start, regions[0].end), (0, 3));
        assert_eq!(regions[1].kind, HandlerKind::Catch);
        assert_eq!(regions[1].catch_type, Some(Token::new(0x0100_0003)));
        assert_eq!(guarded.instructions().unwrap().len(), 5);
        assert_eq!(
            guarded.header_text().unwrap(),
            "private hidebysig static void Guarded() cil managed"
        );
    }

    #[test]
    fn generic_method() {
        let view = load(&image());
        let identity = MethodDefinition::new(&view, 6).unwrap();

        assert_eq!(identity.generic_parameters().unwrap(), ["T"]);
        assert_eq!(
            identity.header_text().unwrap(),
            "public hidebysig static !!0 Identity<T>(!!0 A_0) cil managed"
        );
        assert!(identity.custom_attributes().unwrap().is_empty());
        assert!(matches!(
            MethodDefinition::new(&view, 7),
            Err(Error::OutOfBounds)
        ));
    }
}
