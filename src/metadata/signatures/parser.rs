//! Signature blob decoding over a [`TypeProvider`].

use crate::{
    file::parser::Parser,
    metadata::{
        signatures::{
            ArrayShape, MethodSignature, PrimitiveTypeCode, SignatureHeader, SignatureKind,
            TypeProvider, ELEMENT_TYPE,
        },
        token::Token,
    },
    Error::RecursionLimit,
    Result,
};

/// Maximum nesting of element types inside one signature
pub const MAX_RECURSION_DEPTH: usize = 50;

/// Highest array rank accepted in an `ARRAY` shape
pub const MAX_ARRAY_RANK: u32 = 32;

/// Decodes one signature blob, handing every decoded element type to a [`TypeProvider`].
pub struct SignatureDecoder<'a, 'p, P: TypeProvider> {
    parser: Parser<'a>,
    provider: &'p P,
    depth: usize,
}

impl<'a, 'p, P: TypeProvider> SignatureDecoder<'a, 'p, P> {
    /// Create a decoder positioned at the start of `data`
    #[must_use]
    pub fn new(data: &'a [u8], provider: &'p P) -> Self {
        SignatureDecoder {
            parser: Parser::new(data),
            provider,
            depth: 0,
        }
    }

    /// Decode one element type, including its custom modifiers.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for unknown element types,
    /// [`crate::Error::RecursionLimit`] for too deeply nested types and any error the
    /// provider reports.
    pub fn decode_type(&mut self) -> Result<P::Type> {
        let code = self.parser.read_le::<u8>()?;
        self.decode_type_code(code)
    }

    fn decode_type_code(&mut self, code: u8) -> Result<P::Type> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        let decoded = self.decode_element(code);
        self.depth -= 1;
        decoded
    }

    fn decode_element(&mut self, code: u8) -> Result<P::Type> {
        if let Some(primitive) = PrimitiveTypeCode::from_element_type(code) {
            return self.provider.primitive(primitive);
        }

        match code {
            ELEMENT_TYPE::PTR => {
                let element = self.decode_type()?;
                Ok(self.provider.pointer(element))
            }
            ELEMENT_TYPE::BYREF => {
                let element = self.decode_type()?;
                Ok(self.provider.by_reference(element))
            }
            ELEMENT_TYPE::PINNED => {
                let element = self.decode_type()?;
                Ok(self.provider.pinned(element))
            }
            ELEMENT_TYPE::SZARRAY => {
                let element = self.decode_type()?;
                Ok(self.provider.sz_array(element))
            }
            ELEMENT_TYPE::CLASS | ELEMENT_TYPE::VALUETYPE => self.decode_type_handle(code),
            ELEMENT_TYPE::VAR => {
                let index = self.parser.read_compressed_uint()?;
                Ok(self.provider.generic_type_parameter(index))
            }
            ELEMENT_TYPE::MVAR => {
                let index = self.parser.read_compressed_uint()?;
                Ok(self.provider.generic_method_parameter(index))
            }
            ELEMENT_TYPE::ARRAY => {
                let element = self.decode_type()?;
                let shape = self.decode_array_shape()?;
                Ok(self.provider.array(element, &shape))
            }
            ELEMENT_TYPE::GENERICINST => {
                let kind = self.parser.read_le::<u8>()?;
                if kind != ELEMENT_TYPE::CLASS && kind != ELEMENT_TYPE::VALUETYPE {
                    return Err(malformed_error!(
                        "GENERICINST - Next byte is not TYPE_CLASS or TYPE_VALUE - {}",
                        kind
                    ));
                }

                let generic = self.decode_type_handle(kind)?;
                let count = self.parser.read_compressed_uint()?;

                let mut arguments = Vec::with_capacity(count.min(64) as usize);
                for _ in 0..count {
                    arguments.push(self.decode_type()?);
                }

                Ok(self.provider.generic_instance(generic, arguments))
            }
            ELEMENT_TYPE::FNPTR => {
                let signature = self.decode_method_signature()?;
                Ok(self.provider.function_pointer(signature))
            }
            ELEMENT_TYPE::CMOD_REQD | ELEMENT_TYPE::CMOD_OPT => self.decode_modified_type(code),
            _ => Err(malformed_error!("Unsupported ELEMENT_TYPE - {:#x}", code)),
        }
    }

    /// Modifiers are applied in declaration order once the modified type is known.
    fn decode_modified_type(&mut self, first: u8) -> Result<P::Type> {
        let mut modifiers = Vec::new();
        let mut code = first;

        while code == ELEMENT_TYPE::CMOD_REQD || code == ELEMENT_TYPE::CMOD_OPT {
            let modifier = self.decode_type_handle(0)?;
            modifiers.push((modifier, code == ELEMENT_TYPE::CMOD_REQD));

            code = self.parser.read_le::<u8>()?;
        }

        let mut modified = self.decode_type_code(code)?;
        for (modifier, is_required) in modifiers {
            modified = self.provider.modified(modified, modifier, is_required);
        }

        Ok(modified)
    }

    fn decode_type_handle(&mut self, raw_kind: u8) -> Result<P::Type> {
        let token: Token = self.parser.read_compressed_token()?;

        match token.table() {
            0x02 => self.provider.type_from_definition(token, raw_kind),
            0x01 => self.provider.type_from_reference(token, raw_kind),
            _ => self.provider.type_from_specification(token, raw_kind),
        }
    }

    fn decode_array_shape(&mut self) -> Result<ArrayShape> {
        let rank = self.parser.read_compressed_uint()?;
        if rank > MAX_ARRAY_RANK {
            return Err(malformed_error!("ARRAY - rank {} exceeds {}", rank, MAX_ARRAY_RANK));
        }

        let size_count = self.parser.read_compressed_uint()?;
        if size_count > rank {
            return Err(malformed_error!("ARRAY - {} sizes for rank {}", size_count, rank));
        }
        let mut sizes = Vec::with_capacity(size_count as usize);
        for _ in 0..size_count {
            sizes.push(self.parser.read_compressed_uint()?);
        }

        let bound_count = self.parser.read_compressed_uint()?;
        if bound_count > rank {
            return Err(malformed_error!(
                "ARRAY - {} lower bounds for rank {}",
                bound_count,
                rank
            ));
        }
        let mut lower_bounds = Vec::with_capacity(bound_count as usize);
        for _ in 0..bound_count {
            lower_bounds.push(self.parser.read_compressed_int()?);
        }

        Ok(ArrayShape {
            rank,
            sizes,
            lower_bounds,
        })
    }

    fn read_header(&mut self, expected: SignatureKind) -> Result<SignatureHeader> {
        let header = SignatureHeader(self.parser.read_le::<u8>()?);
        let kind = header.kind()?;
        if kind != expected {
            return Err(malformed_error!(
                "Expected {:?} signature, found {:?} - {:#x}",
                expected,
                kind,
                header.0
            ));
        }

        Ok(header)
    }

    /// Decode a `MethodDefSig`, `MethodRefSig` or `StandAloneMethodSig`.
    ///
    /// A vararg sentinel splits the parameters into the fixed and the variable part.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a non-method header or a second sentinel.
    pub fn decode_method_signature(&mut self) -> Result<MethodSignature<P::Type>> {
        let header = self.read_header(SignatureKind::Method)?;

        let generic_parameter_count = if header.is_generic() {
            self.parser.read_compressed_uint()? as usize
        } else {
            0
        };

        let parameter_count = self.parser.read_compressed_uint()? as usize;
        let return_type = self.decode_type()?;

        let mut required_parameter_count = parameter_count;
        let mut parameter_types = Vec::with_capacity(parameter_count.min(64));
        for index in 0..parameter_count {
            if self.parser.peek_byte()? == ELEMENT_TYPE::SENTINEL {
                if required_parameter_count != parameter_count {
                    return Err(malformed_error!("Signature has more than one vararg sentinel"));
                }

                self.parser.advance_by(1)?;
                required_parameter_count = index;
            }

            parameter_types.push(self.decode_type()?);
        }

        Ok(MethodSignature {
            header,
            return_type,
            required_parameter_count,
            generic_parameter_count,
            parameter_types,
        })
    }

    /// Decode a `PropertySig`; the property type is returned as the return type.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the header is not a property header.
    pub fn decode_property_signature(&mut self) -> Result<MethodSignature<P::Type>> {
        let header = self.read_header(SignatureKind::Property)?;

        let parameter_count = self.parser.read_compressed_uint()? as usize;
        let return_type = self.decode_type()?;

        let mut parameter_types = Vec::with_capacity(parameter_count.min(64));
        for _ in 0..parameter_count {
            parameter_types.push(self.decode_type()?);
        }

        Ok(MethodSignature {
            header,
            return_type,
            required_parameter_count: parameter_count,
            generic_parameter_count: 0,
            parameter_types,
        })
    }

    /// Decode a `FieldSig` into the field type.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the header is not `FIELD`.
    pub fn decode_field_signature(&mut self) -> Result<P::Type> {
        self.read_header(SignatureKind::Field)?;
        self.decode_type()
    }

    /// Decode a `LocalVarSig` into the local types in slot order.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the header is not `LOCAL_SIG`.
    pub fn decode_local_signature(&mut self) -> Result<Vec<P::Type>> {
        self.read_header(SignatureKind::LocalVariables)?;

        let count = self.parser.read_compressed_uint()?;
        let mut locals = Vec::with_capacity(count.min(256) as usize);
        for _ in 0..count {
            locals.push(self.decode_type()?);
        }

        Ok(locals)
    }

    /// Decode a `MethodSpec` instantiation into its type arguments.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the header is not `GENERICINST`.
    pub fn decode_method_spec_signature(&mut self) -> Result<Vec<P::Type>> {
        self.read_header(SignatureKind::MethodSpecification)?;

        let count = self.parser.read_compressed_uint()?;
        let mut arguments = Vec::with_capacity(count.min(64) as usize);
        for _ in 0..count {
            arguments.push(self.decode_type()?);
        }

        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::signatures::tests::NameProvider;

    #[test]
    fn primitives_and_decorations() {
        let provider = NameProvider;

        let mut decoder = SignatureDecoder::new(&[0x0F, 0x08], &provider);
        assert_eq!(decoder.decode_type().unwrap(), "int32*");

        let mut decoder = SignatureDecoder::new(&[0x10, 0x1D, 0x0E], &provider);
        assert_eq!(decoder.decode_type().unwrap(), "string[]&");

        let mut decoder = SignatureDecoder::new(&[0x45, 0x10, 0x05], &provider);
        assert_eq!(decoder.decode_type().unwrap(), "uint8& pinned");
    }

    #[test]
    fn array_shape() {
        let provider = NameProvider;

        // int32[0...3,]
        let mut decoder =
            SignatureDecoder::new(&[0x14, 0x08, 0x02, 0x01, 0x04, 0x01, 0x00], &provider);
        assert_eq!(decoder.decode_type().unwrap(), "int32[0...3,]");

        // float64[-1...0]
        let mut decoder =
            SignatureDecoder::new(&[0x14, 0x0D, 0x01, 0x01, 0x02, 0x01, 0x7F], &provider);
        assert_eq!(decoder.decode_type().unwrap(), "float64[-1...0]");
    }

    #[test]
    fn generic_instance() {
        let provider = NameProvider;

        // class R1<int32,!!0>
        let data = [0x15, 0x12, 0x05, 0x02, 0x08, 0x1E, 0x00];
        let mut decoder = SignatureDecoder::new(&data, &provider);
        assert_eq!(decoder.decode_type().unwrap(), "R1<int32,!!0>");

        let data = [0x15, 0x08, 0x01, 0x08];
        let mut decoder = SignatureDecoder::new(&data, &provider);
        assert!(decoder.decode_type().is_err());
    }

    #[test]
    fn modifiers_keep_order() {
        let provider = NameProvider;

        // modopt(R1) modreq(D2) int32
        let data = [0x20, 0x05, 0x1F, 0x08, 0x08];
        let mut decoder = SignatureDecoder::new(&data, &provider);
        assert_eq!(decoder.decode_type().unwrap(), "int32 modopt(R1) modreq(D2)");
    }

    #[test]
    fn method_signature_varargs() {
        let provider = NameProvider;

        // vararg void (int32, string, ..., float32, object)
        let data = [0x05, 0x04, 0x01, 0x08, 0x0E, 0x41, 0x0C, 0x1C];
        let mut decoder = SignatureDecoder::new(&data, &provider);
        let signature = decoder.decode_method_signature().unwrap();

        assert_eq!(signature.return_type, "void");
        assert_eq!(signature.required_parameter_count, 2);
        assert_eq!(signature.parameter_types, vec!["int32", "string", "float32", "object"]);
    }

    #[test]
    fn generic_method_signature() {
        let provider = NameProvider;

        // instance !!0 M<1>(!0)
        let data = [0x30, 0x01, 0x01, 0x1E, 0x00, 0x13, 0x00];
        let mut decoder = SignatureDecoder::new(&data, &provider);
        let signature = decoder.decode_method_signature().unwrap();

        assert!(signature.header.is_instance());
        assert_eq!(signature.generic_parameter_count, 1);
        assert_eq!(signature.return_type, "!!0");
        assert_eq!(signature.parameter_types, vec!["!0"]);
    }

    #[test]
    fn other_kinds() {
        let provider = NameProvider;

        let mut decoder = SignatureDecoder::new(&[0x06, 0x0B], &provider);
        assert_eq!(decoder.decode_field_signature().unwrap(), "uint64");

        let mut decoder = SignatureDecoder::new(&[0x07, 0x02, 0x08, 0x16], &provider);
        assert_eq!(decoder.decode_local_signature().unwrap(), vec!["int32", "typedref"]);

        let mut decoder = SignatureDecoder::new(&[0x0A, 0x01, 0x0E], &provider);
        assert_eq!(decoder.decode_method_spec_signature().unwrap(), vec!["string"]);

        let mut decoder = SignatureDecoder::new(&[0x28, 0x01, 0x08, 0x0E], &provider);
        let property = decoder.decode_property_signature().unwrap();
        assert!(property.header.is_instance());
        assert_eq!(property.return_type, "int32");
        assert_eq!(property.parameter_types, vec!["string"]);

        let mut decoder = SignatureDecoder::new(&[0x07, 0x01, 0x08], &provider);
        assert!(decoder.decode_field_signature().is_err());
    }

    #[test]
    fn function_pointer() {
        let provider = NameProvider;

        let data = [0x1B, 0x00, 0x01, 0x01, 0x08];
        let mut decoder = SignatureDecoder::new(&data, &provider);
        assert_eq!(decoder.decode_type().unwrap(), "method void*(int32)");
    }

    #[test]
    fn unknown_element_type() {
        let provider = NameProvider;

        let mut decoder = SignatureDecoder::new(&[0x17], &provider);
        assert!(matches!(
            decoder.decode_type(),
            Err(crate::Error::Malformed { .. })
        ));
    }

    #[test]
    fn array_shape_limits() {
        let provider = NameProvider;

        let mut decoder =
            SignatureDecoder::new(&[0x14, 0x08, 0xDF, 0xFF, 0xFF, 0xFF, 0x00, 0x00], &provider);
        assert!(matches!(decoder.decode_type(), Err(crate::Error::Malformed { .. })));

        // three sizes for a rank 2 array
        let mut decoder =
            SignatureDecoder::new(&[0x14, 0x08, 0x02, 0x03, 0x01, 0x01, 0x01, 0x00], &provider);
        assert!(matches!(decoder.decode_type(), Err(crate::Error::Malformed { .. })));

        // two lower bounds for a rank 1 array
        let mut decoder =
            SignatureDecoder::new(&[0x14, 0x08, 0x01, 0x00, 0x02, 0x00, 0x00], &provider);
        assert!(matches!(decoder.decode_type(), Err(crate::Error::Malformed { .. })));

        let mut decoder = SignatureDecoder::new(&[0x14, 0x08, 0x20, 0x00, 0x00], &provider);
        assert!(decoder.decode_type().is_ok());

        let mut decoder = SignatureDecoder::new(&[0x14, 0x08, 0x21, 0x00, 0x00], &provider);
        assert!(decoder.decode_type().is_err());
    }

    #[test]
    fn recursion_limit() {
        let provider = NameProvider;

        let mut data = vec![ELEMENT_TYPE::SZARRAY; MAX_RECURSION_DEPTH + 1];
        data.push(ELEMENT_TYPE::I4);

        let mut decoder = SignatureDecoder::new(&data, &provider);
        assert!(matches!(
            decoder.decode_type(),
            Err(RecursionLimit(MAX_RECURSION_DEPTH))
        ));

        let mut data = vec![ELEMENT_TYPE::SZARRAY; MAX_RECURSION_DEPTH - 1];
        data.push(ELEMENT_TYPE::I4);

        let mut decoder = SignatureDecoder::new(&data, &provider);
        assert!(decoder.decode_type().is_ok());
    }
}
