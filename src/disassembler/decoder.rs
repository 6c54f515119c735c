//! Single forward pass over a method body's IL stream.
//!
//! [`decode_instruction`] decodes the instruction at the parser's position and resolves
//! its operand. [`InstructionDecoder`] repeats that until the end of the body and stops
//! at the first error; [`decode_instructions`] collects it into the indexed list region
//! handling needs.
//!
//! # Example
//! ```rust,ignore
//! let resolver = Resolver::new(&view);
//! let scope = MethodScope { is_instance: false, parameter_names: vec![], local_count: 0 };
//! for instruction in InstructionDecoder::new(&body.code, &resolver, &scope) {
//!     let instruction = instruction?;
//!     println!("IL_{:04x}: {}", instruction.offset, instruction.mnemonic());
//! }
//! ```

use crate::{
    disassembler::{
        instruction::{Instruction, Operand},
        opcodes::{OperandType, INSTRUCTIONS, INSTRUCTIONS_FE},
        resolver::{MethodScope, Resolver},
    },
    file::parser::Parser,
    metadata::{source::MetadataSource, token::Token},
    Error::OutOfBounds,
    Result,
};

/// Decode the instruction starting at the parser's position.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for unassigned opcodes,
/// [`crate::Error::OutOfBounds`] for a truncated operand and any error raised while
/// resolving the operand.
pub fn decode_instruction<S: MetadataSource + ?Sized>(
    parser: &mut Parser,
    resolver: &Resolver<S>,
    scope: &MethodScope,
) -> Result<Instruction> {
    let offset = parser.pos();
    let first_byte = parser.read_le::<u8>()?;

    let opcode = if first_byte == 0xFE && parser.has_more_data() {
        let second_byte = parser.read_le::<u8>()?;
        match INSTRUCTIONS_FE.get(second_byte as usize) {
            Some(opcode) => opcode,
            None => return Err(malformed_error!("Invalid opcode: FE {:02X}", second_byte)),
        }
    } else {
        match INSTRUCTIONS.get(first_byte as usize) {
            Some(opcode) => opcode,
            None => return Err(malformed_error!("Invalid opcode: {:02X}", first_byte)),
        }
    };

    if opcode.is_reserved() {
        return Err(malformed_error!("Reserved opcode: {:04X}", opcode.value));
    }

    let operand = match opcode.operand_type {
        OperandType::InlineNone => Operand::None,
        OperandType::ShortInlineI => {
            if opcode.has_unsigned_operand() {
                Operand::UInt8(parser.read_le::<u8>()?)
            } else {
                Operand::Int8(parser.read_le::<i8>()?)
            }
        }
        OperandType::InlineI => Operand::Int32(parser.read_le::<i32>()?),
        OperandType::InlineI8 => Operand::Int64(parser.read_le::<i64>()?),
        OperandType::ShortInlineR => Operand::Float32(parser.read_le::<f32>()?),
        OperandType::InlineR => Operand::Float64(parser.read_le::<f64>()?),
        OperandType::ShortInlineBrTarget => Operand::Branch(i32::from(parser.read_le::<i8>()?)),
        OperandType::InlineBrTarget => Operand::Branch(parser.read_le::<i32>()?),
        OperandType::ShortInlineVar => {
            let index = u16::from(parser.read_le::<u8>()?);
            let name = resolver.get_variable_name(opcode, index, scope)?;
            Operand::Variable { index, name }
        }
        OperandType::InlineVar => {
            let index = parser.read_le::<u16>()?;
            let name = resolver.get_variable_name(opcode, index, scope)?;
            Operand::Variable { index, name }
        }
        OperandType::InlineString => {
            let token = Token::new(parser.read_le::<u32>()?);
            let (text, printable) = resolver.get_user_string(token)?;
            Operand::String {
                token,
                text,
                printable,
            }
        }
        OperandType::InlineField
        | OperandType::InlineMethod
        | OperandType::InlineType
        | OperandType::InlineTok
        | OperandType::InlineSig => {
            let token = Token::new(parser.read_le::<u32>()?);
            let text = match opcode.operand_type {
                OperandType::InlineField => resolver.get_field_information(token)?,
                OperandType::InlineMethod => resolver.solve_method_name(token)?,
                OperandType::InlineType => resolver.get_type_information(token)?,
                OperandType::InlineTok => resolver.get_inline_token_type(token)?,
                _ => resolver.get_signature(token)?,
            };
            Operand::Token { token, text }
        }
        OperandType::InlineSwitch => {
            let case_count = parser.read_le::<u32>()? as usize;
            if case_count > parser.remaining() / 4 {
                return Err(OutOfBounds);
            }

            let mut targets = Vec::with_capacity(case_count);
            for _ in 0..case_count {
                targets.push(parser.read_le::<i32>()?);
            }

            Operand::Switch(targets)
        }
    };
    let size = parser.pos() - offset;

    Ok(Instruction {
        opcode,
        offset: u32::try_from(offset).map_err(|_| OutOfBounds)?,
        size: u32::try_from(size).map_err(|_| OutOfBounds)?,
        operand,
    })
}

/// Iterator over the instructions of one IL stream.
///
/// Yields each instruction once, in stream order. After an error nothing further is
/// yielded.
pub struct InstructionDecoder<'c, 'r, 'a, S: MetadataSource + ?Sized> {
    parser: Parser<'c>,
    resolver: &'r Resolver<'a, S>,
    scope: &'r MethodScope,
    failed: bool,
}

impl<'c, 'r, 'a, S: MetadataSource + ?Sized> InstructionDecoder<'c, 'r, 'a, S> {
    /// Decode `code` from its first byte
    pub fn new(code: &'c [u8], resolver: &'r Resolver<'a, S>, scope: &'r MethodScope) -> Self {
        InstructionDecoder {
            parser: Parser::new(code),
            resolver,
            scope,
            failed: false,
        }
    }
}

impl<S: MetadataSource + ?Sized> Iterator for InstructionDecoder<'_, '_, '_, S> {
    type Item = Result<Instruction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.parser.has_more_data() {
            return None;
        }

        let decoded = decode_instruction(&mut self.parser, self.resolver, self.scope);
        if decoded.is_err() {
            self.failed = true;
        }

        Some(decoded)
    }
}

/// Decode a whole IL stream into an indexed list.
///
/// # Errors
/// Returns the first error of [`decode_instruction`].
pub fn decode_instructions<S: MetadataSource + ?Sized>(
    code: &[u8],
    resolver: &Resolver<S>,
    scope: &MethodScope,
) -> Result<Vec<Instruction>> {
    InstructionDecoder::new(code, resolver, scope).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::view::CilView,
        test::{coded, load, table, ImageBuilder},
        Error,
    };

    fn view() -> (CilView, u32) {
        let mut builder = ImageBuilder::new();
        builder.module("code.dll");
        builder.assembly_ref("mscorlib", [4, 0, 0, 0], &[]);
        let object = builder.type_ref(coded::resolution_scope(table::ASSEMBLY_REF, 1), "Object", "System");
        let extends = coded::type_def_or_ref(table::TYPE_REF, object);
        builder.type_def(0, "<Module>", "", 0, 1, 1);
        builder.type_def(0x0010_0001, "C", "", extends, 1, 1);
        builder.field(0x0016, "f", &[0x06, 0x08]);
        builder.method_def(0, 0, 0x0096, "M", &[0x00, 0x01, 0x01, 0x08], 1);
        builder.param(0, 1, "x");
        builder.standalone_sig(&[0x00, 0x00, 0x01]);
        let text = builder.add_user_string("hi");
        (load(&builder), text)
    }

    fn scope() -> MethodScope {
        MethodScope {
            is_instance: false,
            parameter_names: vec!["x".to_string()],
            local_count: 2,
        }
    }

    #[test]
    fn two_instruction_body() {
        let (view, _) = view();
        let resolver = Resolver::new(&view);

        let code = [0x20, 0x07, 0x00, 0x00, 0x00, 0x2A];
        let instructions = decode_instructions(&code, &resolver, &scope()).unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].mnemonic(), "ldc.i4");
        assert_eq!(instructions[0].operand, Operand::Int32(7));
        assert_eq!((instructions[0].offset, instructions[0].size), (0, 5));
        assert_eq!(instructions[1].mnemonic(), "ret");
        assert_eq!(instructions[1].operand, Operand::None);
        assert_eq!((instructions[1].offset, instructions[1].size), (5, 1));
    }

    #[test]
    fn every_operand_shape() {
        let (view, text) = view();
        let resolver = Resolver::new(&view);

        let mut code = vec![0x00]; // nop
        code.extend([0x1F, 0xFE]); // ldc.i4.s -2
        code.extend([0x21, 1, 0, 0, 0, 0, 0, 0, 0]); // ldc.i8 1
        code.extend([0x22, 0x00, 0x00, 0x80, 0x3F]); // ldc.r4 1.0
        code.extend([0x23, 0, 0, 0, 0, 0, 0, 0xF0, 0x3F]); // ldc.r8 1.0
        code.extend([0x2B, 0x00]); // br.s
        code.extend([0x38, 0x00, 0x00, 0x00, 0x00]); // br
        code.extend([0x11, 0x01]); // ldloc.s V_1
        code.extend([0xFE, 0x09, 0x00, 0x00]); // ldarg x
        code.push(0x72);
        code.extend(Token::from_parts(0x70, text).value().to_le_bytes()); // ldstr
        code.extend([0x7E, 0x01, 0x00, 0x00, 0x04]); // ldsfld
        code.extend([0x28, 0x01, 0x00, 0x00, 0x06]); // call
        code.extend([0x8C, 0x02, 0x00, 0x00, 0x02]); // box
        code.extend([0xD0, 0x01, 0x00, 0x00, 0x04]); // ldtoken
        code.extend([0x29, 0x01, 0x00, 0x00, 0x11]); // calli
        code.extend([0x45, 0x02, 0, 0, 0, 0x01, 0, 0, 0, 0xFE, 0xFF, 0xFF, 0xFF]); // switch
        code.extend([0xFE, 0x12, 0x04]); // unaligned. 4

        let instructions = decode_instructions(&code, &resolver, &scope()).unwrap();
        let sizes: Vec<u32> = instructions.iter().map(|instruction| instruction.size).collect();
        assert_eq!(sizes, [1, 2, 9, 5, 9, 2, 5, 2, 4, 5, 5, 5, 5, 5, 5, 13, 3]);

        let mut offset = 0;
        for instruction in &instructions {
            assert_eq!(instruction.offset, offset);
            offset += instruction.size;
        }
        assert_eq!(offset as usize, code.len());

        assert_eq!(instructions[1].operand, Operand::Int8(-2));
        assert_eq!(instructions[3].operand, Operand::Float32(1.0));
        assert_eq!(
            instructions[7].operand,
            Operand::Variable {
                index: 1,
                name: "V_1".to_string()
            }
        );
        assert_eq!(
            instructions[8].operand,
            Operand::Variable {
                index: 0,
                name: "x".to_string()
            }
        );
        assert_eq!(
            instructions[9].operand,
            Operand::String {
                token: Token::from_parts(0x70, text),
                text: "hi".to_string(),
                printable: true
            }
        );

        let texts: Vec<&str> = instructions[10..15]
            .iter()
            .map(|instruction| match &instruction.operand {
                Operand::Token { text, .. } => text.as_str(),
                other => panic!("Expected Operand::Token, found {other:?}"),
            })
            .collect();
        assert_eq!(
            texts,
            [
                "int32 C::f",
                "void C::M(int32)",
                "class C",
                "field int32 C::f",
                "void()"
            ]
        );

        let switch = &instructions[15];
        assert_eq!(switch.offset, 69);
        assert_eq!(switch.switch_targets(), Some(vec![83, 80]));
        assert_eq!(instructions[16].operand, Operand::UInt8(4));
    }

    #[test]
    fn branch_targets() {
        let (view, _) = view();
        let resolver = Resolver::new(&view);

        // br.s -2 loops onto itself, brtrue +1 skips the nop
        let code = [0x2B, 0xFE, 0x3A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2A];
        let instructions = decode_instructions(&code, &resolver, &scope()).unwrap();

        assert_eq!(instructions[0].branch_target(), Some(0));
        assert_eq!(instructions[1].branch_target(), Some(8));
    }

    #[test]
    fn invalid_opcodes() {
        let (view, _) = view();
        let resolver = Resolver::new(&view);

        for code in [&[0xA6][..], &[0xFE, 0x30], &[0xFE], &[0xFE, 0x08], &[0xF0]] {
            let result = decode_instructions(code, &resolver, &scope());
            assert!(matches!(result, Err(Error::Malformed { .. })), "{code:02X?}");
        }
    }

    #[test]
    fn truncated_operands() {
        let (view, _) = view();
        let resolver = Resolver::new(&view);

        assert!(decode_instructions(&[0x20, 0x01], &resolver, &scope()).is_err());
        assert!(matches!(
            decode_instructions(&[0x45, 0xFF, 0xFF, 0xFF, 0x0F], &resolver, &scope()),
            Err(OutOfBounds)
        ));
    }

    #[test]
    fn stops_after_first_error() {
        let (view, _) = view();
        let resolver = Resolver::new(&view);
        let scope = scope();

        let code = [0x00, 0x11, 0x05, 0x00];
        let mut decoder = InstructionDecoder::new(&code, &resolver, &scope);

        assert!(decoder.next().unwrap().is_ok());
        assert!(matches!(
            decoder.next(),
            Some(Err(Error::IndexOutOfRange { index: 5, .. }))
        ));
        assert!(decoder.next().is_none());
    }

    #[test]
    fn wrong_token_kind() {
        let (view, _) = view();
        let resolver = Resolver::new(&view);

        // call with a field token
        let code = [0x28, 0x01, 0x00, 0x00, 0x04];
        assert!(matches!(
            decode_instructions(&code, &resolver, &scope()),
            Err(Error::TokenMismatch { .. })
        ));
    }
}
