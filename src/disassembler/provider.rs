//! The [`TypeProvider`] that turns signatures into MSIL type text.
//!
//! Type names are resolved against the [`MetadataSource`]: definitions through their
//! namespace, enclosing types and base type chain, references through their resolution
//! scope. Type specifications are decoded recursively from their own signature blob.

use std::{cell::Cell, collections::HashSet};

use crate::{
    disassembler::{names::quote_identifier, typetext::TypeText},
    metadata::{
        signatures::{
            decode_type_spec_signature, ArrayShape, MethodSignature, PrimitiveTypeCode,
            TypeProvider, ELEMENT_TYPE,
        },
        source::{enclosing_type, MetadataSource},
        tables::TableId,
        token::{Token, TokenKind},
    },
    Error::{RecursionLimit, TokenMismatch},
    Result,
};

/// Nesting limit for type specifications that refer to other type specifications
pub const MAX_TYPE_SPEC_DEPTH: usize = 16;

/// How many resolution scopes a nested `TypeRef` may pass through
const MAX_REFERENCE_NESTING: usize = 256;

/// Builds [`TypeText`] for a single metadata source.
pub struct DisassemblerTypeProvider<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    spec_depth: Cell<usize>,
}

impl<'a, S: MetadataSource + ?Sized> DisassemblerTypeProvider<'a, S> {
    /// Create a provider reading from `source`
    pub fn new(source: &'a S) -> Self {
        DisassemblerTypeProvider {
            source,
            spec_depth: Cell::new(0),
        }
    }

    /// The underlying metadata
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Decode a `TypeDef`, `TypeRef` or `TypeSpec` token into type text.
    ///
    /// References get no `class`/`valuetype` prefix here, there is no signature byte to
    /// take it from. Definitions take it from their base type chain.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenMismatch`] for a token of any other table.
    pub fn decode_type_token(&self, token: Token) -> Result<TypeText> {
        match token.kind() {
            TokenKind::TypeDef => self.type_from_definition(token, 0),
            TokenKind::TypeRef => self.type_from_reference(token, 0),
            TokenKind::TypeSpec => self.type_from_specification(token, 0),
            _ => Err(TokenMismatch {
                expected: TokenKind::TypeDef,
                token,
            }),
        }
    }

    /// `instance ` if the signature has an implicit `this`, followed by the return type.
    pub fn return_text(&self, signature: &MethodSignature<TypeText>) -> String {
        if signature.header.is_instance() {
            format!("instance {}", signature.return_type)
        } else {
            signature.return_type.to_string()
        }
    }

    /// Render a parameter list, `()` when there are no parameters.
    ///
    /// Fixed parameters come first; the vararg part follows after `...,`. `names` are
    /// appended to the fixed parameters only, missing or empty names are skipped.
    pub fn parameter_list(
        &self,
        signature: &MethodSignature<TypeText>,
        names: Option<&[String]>,
    ) -> String {
        let types = &signature.parameter_types;
        if types.is_empty() {
            return "()".to_string();
        }

        let required = signature.required_parameter_count.min(types.len());
        let mut fixed = Vec::with_capacity(required);
        for (index, parameter) in types[..required].iter().enumerate() {
            match names.and_then(|names| names.get(index)).filter(|name| !name.is_empty()) {
                Some(name) => fixed.push(format!("{parameter} {}", quote_identifier(name))),
                None => fixed.push(parameter.to_string()),
            }
        }

        let mut text = String::from("(");
        text.push_str(&fixed.join(","));
        if required < types.len() {
            let variable: Vec<String> = types[required..].iter().map(ToString::to_string).collect();
            text.push_str("...,");
            text.push_str(&variable.join(","));
        }
        text.push(')');
        text
    }

    /// `Namespace.Name`, or `Name` without a namespace
    fn dotted_name(&self, namespace: u32, name: u32) -> Result<String> {
        let name = self.source.string(name)?;
        let namespace = self.source.string(namespace)?;
        if namespace.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("{namespace}.{name}"))
        }
    }

    /// Full name of a `TypeDef`, enclosing types separated by `/`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] on cyclic nesting.
    pub fn type_definition_name(&self, rid: u32) -> Result<String> {
        let mut names = Vec::new();
        let mut visited = HashSet::new();
        let mut current = rid;
        loop {
            if !visited.insert(current) {
                return Err(malformed_error!("TypeDef {} is nested inside itself", rid));
            }

            let row = self.source.type_def(current)?;
            names.push(self.dotted_name(row.type_namespace, row.type_name)?);

            match enclosing_type(self.source, current)? {
                Some(enclosing) => current = enclosing,
                None => break,
            }
        }

        names.reverse();
        Ok(names.join("/"))
    }

    /// Full name of a `TypeRef`, including its resolution scope.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a scope that cannot name a type.
    pub fn type_reference_name(&self, rid: u32) -> Result<String> {
        self.type_reference_name_at(rid, 0)
    }

    fn type_reference_name_at(&self, rid: u32, depth: usize) -> Result<String> {
        if depth > MAX_REFERENCE_NESTING {
            return Err(RecursionLimit(MAX_REFERENCE_NESTING));
        }

        let row = self.source.type_ref(rid)?;
        let name = self.dotted_name(row.type_namespace, row.type_name)?;
        let scope = row.resolution_scope;
        if scope.is_null() {
            return Ok(name);
        }

        match scope.tag {
            TableId::Module => Ok(name),
            TableId::ModuleRef => {
                let module = self.source.module_ref(scope.row)?;
                Ok(format!("[.module {}]{name}", self.source.string(module.name)?))
            }
            TableId::AssemblyRef => {
                let assembly = self.source.assembly_ref(scope.row)?;
                Ok(format!("[{}]{name}", self.source.string(assembly.name)?))
            }
            TableId::TypeRef => Ok(format!(
                "{}/{name}",
                self.type_reference_name_at(scope.row, depth + 1)?
            )),
            TableId::TypeSpec => Err(malformed_error!(
                "TypeRef {} uses a TypeSpec as its resolution scope",
                row.token
            )),
            other => Err(malformed_error!(
                "TypeRef {} has an invalid resolution scope - {:?}",
                row.token,
                other
            )),
        }
    }

    /// Classify a `TypeDef` by its base type: `(is_value_type, is_class_type)`.
    ///
    /// `System.ValueType` and `System.Enum` bases make a value type, `System.Object` or no
    /// base at all (interfaces) a class. Other bases are followed while they are defined
    /// in this module. A chain that leaves the module through any other reference, such as
    /// `[mscorlib]System.Exception`, is a class.
    fn type_definition_kind(&self, rid: u32) -> Result<(bool, bool)> {
        let mut visited = HashSet::new();
        let mut current = rid;
        loop {
            if !visited.insert(current) {
                return Err(malformed_error!("TypeDef {} derives from itself", rid));
            }

            let row = self.source.type_def(current)?;
            let base = row.extends;
            if base.is_null() {
                return Ok((false, true));
            }

            let base_name = match base.tag {
                TableId::TypeDef => self.type_definition_name(base.row)?,
                TableId::TypeRef => {
                    let base_row = self.source.type_ref(base.row)?;
                    self.dotted_name(base_row.type_namespace, base_row.type_name)?
                }
                _ => return Ok((false, true)),
            };

            match base_name.as_str() {
                "System.ValueType" | "System.Enum" => return Ok((true, false)),
                "System.Object" => return Ok((false, true)),
                _ => {}
            }

            if base.tag != TableId::TypeDef {
                return Ok((false, true));
            }
            current = base.row;
        }
    }
}

impl<S: MetadataSource + ?Sized> TypeProvider for DisassemblerTypeProvider<'_, S> {
    type Type = TypeText;

    fn primitive(&self, code: PrimitiveTypeCode) -> Result<TypeText> {
        let keyword = match code {
            PrimitiveTypeCode::Void => "void",
            PrimitiveTypeCode::Boolean => "bool",
            PrimitiveTypeCode::Char => "char",
            PrimitiveTypeCode::SByte => "int8",
            PrimitiveTypeCode::Byte => "uint8",
            PrimitiveTypeCode::Int16 => "int16",
            PrimitiveTypeCode::UInt16 => "uint16",
            PrimitiveTypeCode::Int32 => "int32",
            PrimitiveTypeCode::UInt32 => "uint32",
            PrimitiveTypeCode::Int64 => "int64",
            PrimitiveTypeCode::UInt64 => "uint64",
            PrimitiveTypeCode::Single => "float32",
            PrimitiveTypeCode::Double => "float64",
            PrimitiveTypeCode::String => "string",
            PrimitiveTypeCode::TypedReference => "typedref",
            PrimitiveTypeCode::IntPtr => "native int",
            PrimitiveTypeCode::UIntPtr => "native uint",
            PrimitiveTypeCode::Object => "object",
        };

        Ok(TypeText::new(keyword))
    }

    fn type_from_definition(&self, token: Token, _raw_kind: u8) -> Result<TypeText> {
        let name = self.type_definition_name(token.row())?;
        let (is_value_type, is_class_type) = self.type_definition_kind(token.row())?;

        Ok(TypeText::with_kind(name, is_value_type, is_class_type))
    }

    fn type_from_reference(&self, token: Token, raw_kind: u8) -> Result<TypeText> {
        let name = self.type_reference_name(token.row())?;

        Ok(TypeText::with_kind(
            name,
            raw_kind == ELEMENT_TYPE::VALUETYPE,
            raw_kind == ELEMENT_TYPE::CLASS,
        ))
    }

    fn type_from_specification(&self, token: Token, _raw_kind: u8) -> Result<TypeText> {
        if token.kind() != TokenKind::TypeSpec {
            return Err(TokenMismatch {
                expected: TokenKind::TypeSpec,
                token,
            });
        }

        let depth = self.spec_depth.get();
        if depth >= MAX_TYPE_SPEC_DEPTH {
            return Err(RecursionLimit(MAX_TYPE_SPEC_DEPTH));
        }

        let row = self.source.type_spec(token.row())?;
        let blob = self.source.blob(row.signature)?;

        self.spec_depth.set(depth + 1);
        let decoded = decode_type_spec_signature(blob, self);
        self.spec_depth.set(depth);

        decoded
    }

    fn sz_array(&self, mut element: TypeText) -> TypeText {
        element.append("[]");
        element
    }

    fn array(&self, mut element: TypeText, shape: &ArrayShape) -> TypeText {
        let mut dimensions = Vec::with_capacity(shape.rank as usize);
        for dimension in 0..shape.rank as usize {
            let mut text = String::new();
            let mut lower_bound = 0i64;
            if let Some(bound) = shape.lower_bounds.get(dimension) {
                lower_bound = i64::from(*bound);
                text.push_str(&format!("{lower_bound}..."));
            }
            if let Some(size) = shape.sizes.get(dimension) {
                text.push_str(&(lower_bound + i64::from(*size) - 1).to_string());
            }
            dimensions.push(text);
        }

        element.append(&format!("[{}]", dimensions.join(",")));
        element
    }

    fn by_reference(&self, mut element: TypeText) -> TypeText {
        element.append("&");
        element
    }

    fn pointer(&self, mut element: TypeText) -> TypeText {
        element.append("*");
        element
    }

    fn pinned(&self, mut element: TypeText) -> TypeText {
        element.append(" pinned");
        element
    }

    fn generic_instance(&self, mut generic: TypeText, arguments: Vec<TypeText>) -> TypeText {
        let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
        generic.append(&format!("<{}>", arguments.join(",")));
        generic
    }

    fn generic_type_parameter(&self, index: u32) -> TypeText {
        TypeText::new(format!("!{index}"))
    }

    fn generic_method_parameter(&self, index: u32) -> TypeText {
        TypeText::new(format!("!!{index}"))
    }

    fn function_pointer(&self, signature: MethodSignature<TypeText>) -> TypeText {
        TypeText::new(format!(
            "method {}*{}",
            signature.return_type,
            self.parameter_list(&signature, None)
        ))
    }

    fn modified(&self, mut unmodified: TypeText, modifier: TypeText, is_required: bool) -> TypeText {
        let keyword = if is_required { "modreq" } else { "modopt" };
        unmodified.append(&format!(" {keyword}({modifier})"));
        unmodified
    }
}
