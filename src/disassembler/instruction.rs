//! Decoded instructions and their operands.

use crate::{disassembler::opcodes::OpCode, metadata::token::Token};

/// The operand of one instruction, decoded and, for tokens, resolved to text.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// `InlineNone`
    None,
    /// `ShortInlineI`
    Int8(i8),
    /// `ShortInlineI` of `unaligned.` and `no.`
    UInt8(u8),
    /// `InlineI`
    Int32(i32),
    /// `InlineI8`
    Int64(i64),
    /// `ShortInlineR`
    Float32(f32),
    /// `InlineR`
    Float64(f64),
    /// Branch offset, relative to the end of the instruction
    Branch(i32),
    /// Jump table, offsets relative to the end of the instruction
    Switch(Vec<i32>),
    /// Local or argument slot and its display name
    Variable {
        /// Slot as encoded
        index: u16,
        /// `V_n` for locals, the parameter name for arguments
        name: String,
    },
    /// `InlineString`
    String {
        /// `#US` token
        token: Token,
        /// The literal, or a `bytearray (..)` dump when it is not printable
        text: String,
        /// Whether `text` is the literal itself and is written between quotes
        printable: bool,
    },
    /// `InlineField`, `InlineMethod`, `InlineType`, `InlineTok` and `InlineSig`
    Token {
        /// The raw metadata token
        token: Token,
        /// Resolved operand text
        text: String,
    },
}

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The opcode
    pub opcode: &'static OpCode,
    /// IL offset of the first opcode byte
    pub offset: u32,
    /// Opcode and operand bytes
    pub size: u32,
    /// The operand
    pub operand: Operand,
}

impl Instruction {
    /// Mnemonic of the opcode
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        self.opcode.name
    }

    /// Offset of the following instruction
    #[must_use]
    pub fn next_offset(&self) -> u32 {
        self.offset.wrapping_add(self.size)
    }

    /// Absolute target of a branch, `offset + size + delta`
    #[must_use]
    pub fn branch_target(&self) -> Option<i64> {
        match self.operand {
            Operand::Branch(delta) => Some(i64::from(self.next_offset()) + i64::from(delta)),
            _ => None,
        }
    }

    /// Absolute targets of a `switch`, in case order
    #[must_use]
    pub fn switch_targets(&self) -> Option<Vec<i64>> {
        match &self.operand {
            Operand::Switch(deltas) => {
                let base = i64::from(self.next_offset());
                Some(deltas.iter().map(|delta| base + i64::from(*delta)).collect())
            }
            _ => None,
        }
    }

    /// Metadata token carried by the operand, if any
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        match &self.operand {
            Operand::Token { token, .. } | Operand::String { token, .. } => Some(*token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::opcodes::{INSTRUCTIONS, INSTRUCTIONS_FE};

    #[test]
    fn branch_law() {
        let branch = Instruction {
            opcode: &INSTRUCTIONS[0x2B],
            offset: 0x10,
            size: 2,
            operand: Operand::Branch(-4),
        };
        assert_eq!(branch.mnemonic(), "br.s");
        assert_eq!(branch.branch_target(), Some(0x0E));
        assert_eq!(branch.switch_targets(), None);
    }

    #[test]
    fn switch_law() {
        let switch = Instruction {
            opcode: &INSTRUCTIONS[0x45],
            offset: 4,
            size: 1 + 4 + 3 * 4,
            operand: Operand::Switch(vec![0, 8, -21]),
        };
        assert_eq!(switch.switch_targets(), Some(vec![21, 29, 0]));
        assert_eq!(switch.branch_target(), None);
    }

    #[test]
    fn tokens() {
        let ldftn = Instruction {
            opcode: &INSTRUCTIONS_FE[0x06],
            offset: 0,
            size: 6,
            operand: Operand::Token {
                token: Token::new(0x0600_0001),
                text: "void C::M()".to_string(),
            },
        };
        assert_eq!(ldftn.token(), Some(Token::new(0x0600_0001)));
        assert_eq!(ldftn.next_offset(), 6);
    }
}
