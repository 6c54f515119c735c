//! CIL opcode tables (ECMA-335 III).
//!
//! [`INSTRUCTIONS`] is indexed by the single opcode byte, [`INSTRUCTIONS_FE`] by the
//! second byte of the `0xFE` page. Unassigned encodings are present with an empty name.

use OperandType::{
    InlineBrTarget, InlineField, InlineI, InlineI8, InlineMethod, InlineNone, InlineR, InlineSig,
    InlineString, InlineSwitch, InlineTok, InlineType, InlineVar, ShortInlineBrTarget,
    ShortInlineI, ShortInlineR, ShortInlineVar,
};

/// Shape of the operand following an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[allow(missing_docs)]
pub enum OperandType {
    InlineNone,
    ShortInlineI,
    InlineI,
    InlineI8,
    ShortInlineR,
    InlineR,
    ShortInlineBrTarget,
    InlineBrTarget,
    ShortInlineVar,
    InlineVar,
    InlineString,
    InlineField,
    InlineMethod,
    InlineType,
    InlineTok,
    InlineSig,
    InlineSwitch,
}

impl OperandType {
    /// Operand bytes for fixed-size shapes; `None` for `InlineSwitch`
    #[must_use]
    pub fn operand_size(self) -> Option<u32> {
        match self {
            InlineNone => Some(0),
            ShortInlineI | ShortInlineBrTarget | ShortInlineVar => Some(1),
            InlineVar => Some(2),
            InlineI | ShortInlineR | InlineBrTarget | InlineString | InlineField
            | InlineMethod | InlineType | InlineTok | InlineSig => Some(4),
            InlineI8 | InlineR => Some(8),
            InlineSwitch => None,
        }
    }
}

/// One opcode: mnemonic, encoding and operand shape.
#[derive(Debug, PartialEq, Eq)]
pub struct OpCode {
    /// Mnemonic as written in ILAsm, empty for reserved encodings
    pub name: &'static str,
    /// Encoding; two-byte opcodes carry `0xFE` in the high byte
    pub value: u16,
    /// Shape of the operand
    pub operand_type: OperandType,
}

impl OpCode {
    const fn new(name: &'static str, value: u16, operand_type: OperandType) -> Self {
        OpCode {
            name,
            value,
            operand_type,
        }
    }

    const fn reserved(value: u16) -> Self {
        OpCode::new("", value, InlineNone)
    }

    /// Whether the encoding is unassigned
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.name.is_empty()
    }

    /// Encoded length of the opcode itself
    #[must_use]
    pub fn size(&self) -> u32 {
        if self.value > 0xFF {
            2
        } else {
            1
        }
    }

    /// Whether the variable operand indexes the parameters rather than the locals.
    #[must_use]
    pub fn is_argument(&self) -> bool {
        matches!(self.value, 0x0E | 0x0F | 0x10 | 0xFE09 | 0xFE0A | 0xFE0B)
    }

    /// `unaligned.` and `no.` take an unsigned byte, every other `ShortInlineI` a signed one.
    #[must_use]
    pub fn has_unsigned_operand(&self) -> bool {
        matches!(self.value, 0xFE12 | 0xFE19)
    }
}

/// Look up an opcode by mnemonic
#[must_use]
pub fn find_opcode(name: &str) -> Option<&'static OpCode> {
    if name.is_empty() {
        return None;
    }

    INSTRUCTIONS
        .iter()
        .chain(INSTRUCTIONS_FE.iter())
        .find(|opcode| opcode.name == name)
}

/// Single-byte opcodes, `0x00` to `0xE0`
#[rustfmt::skip]
pub static INSTRUCTIONS: [OpCode; 0xE1] = [
    OpCode::new("nop", 0x00, InlineNone),
    OpCode::new("break", 0x01, InlineNone),
    OpCode::new("ldarg.0", 0x02, InlineNone),
    OpCode::new("ldarg.1", 0x03, InlineNone),
    OpCode::new("ldarg.2", 0x04, InlineNone),
    OpCode::new("ldarg.3", 0x05, InlineNone),
    OpCode::new("ldloc.0", 0x06, InlineNone),
    OpCode::new("ldloc.1", 0x07, InlineNone),
    OpCode::new("ldloc.2", 0x08, InlineNone),
    OpCode::new("ldloc.3", 0x09, InlineNone),
    OpCode::new("stloc.0", 0x0A, InlineNone),
    OpCode::new("stloc.1", 0x0B, InlineNone),
    OpCode::new("stloc.2", 0x0C, InlineNone),
    OpCode::new("stloc.3", 0x0D, InlineNone),
    OpCode::new("ldarg.s", 0x0E, ShortInlineVar),
    OpCode::new("ldarga.s", 0x0F, ShortInlineVar),
    OpCode::new("starg.s", 0x10, ShortInlineVar),
    OpCode::new("ldloc.s", 0x11, ShortInlineVar),
    OpCode::new("ldloca.s", 0x12, ShortInlineVar),
    OpCode::new("stloc.s", 0x13, ShortInlineVar),
    OpCode::new("ldnull", 0x14, InlineNone),
    OpCode::new("ldc.i4.m1", 0x15, InlineNone),
    OpCode::new("ldc.i4.0", 0x16, InlineNone),
    OpCode::new("ldc.i4.1", 0x17, InlineNone),
    OpCode::new("ldc.i4.2", 0x18, InlineNone),
    OpCode::new("ldc.i4.3", 0x19, InlineNone),
    OpCode::new("ldc.i4.4", 0x1A, InlineNone),
    OpCode::new("ldc.i4.5", 0x1B, InlineNone),
    OpCode::new("ldc.i4.6", 0x1C, InlineNone),
    OpCode::new("ldc.i4.7", 0x1D, InlineNone),
    OpCode::new("ldc.i4.8", 0x1E, InlineNone),
    OpCode::new("ldc.i4.s", 0x1F, ShortInlineI),
    OpCode::new("ldc.i4", 0x20, InlineI),
    OpCode::new("ldc.i8", 0x21, InlineI8),
    OpCode::new("ldc.r4", 0x22, ShortInlineR),
    OpCode::new("ldc.r8", 0x23, InlineR),
    OpCode::reserved(0x24),
    OpCode::new("dup", 0x25, InlineNone),
    OpCode::new("pop", 0x26, InlineNone),
    OpCode::new("jmp", 0x27, InlineMethod),
    OpCode::new("call", 0x28, InlineMethod),
    OpCode::new("calli", 0x29, InlineSig),
    OpCode::new("ret", 0x2A, InlineNone),
    OpCode::new("br.s", 0x2B, ShortInlineBrTarget),
    OpCode::new("brfalse.s", 0x2C, ShortInlineBrTarget),
    OpCode::new("brtrue.s", 0x2D, ShortInlineBrTarget),
    OpCode::new("beq.s", 0x2E, ShortInlineBrTarget),
    OpCode::new("bge.s", 0x2F, ShortInlineBrTarget),
    OpCode::new("bgt.s", 0x30, ShortInlineBrTarget),
    OpCode::new("ble.s", 0x31, ShortInlineBrTarget),
    OpCode::new("blt.s", 0x32, ShortInlineBrTarget),
    OpCode::new("bne.un.s", 0x33, ShortInlineBrTarget),
    OpCode::new("bge.un.s", 0x34, ShortInlineBrTarget),
    OpCode::new("bgt.un.s", 0x35, ShortInlineBrTarget),
    OpCode::new("ble.un.s", 0x36, ShortInlineBrTarget),
    OpCode::new("blt.un.s", 0x37, ShortInlineBrTarget),
    OpCode::new("br", 0x38, InlineBrTarget),
    OpCode::new("brfalse", 0x39, InlineBrTarget),
    OpCode::new("brtrue", 0x3A, InlineBrTarget),
    OpCode::new("beq", 0x3B, InlineBrTarget),
    OpCode::new("bge", 0x3C, InlineBrTarget),
    OpCode::new("bgt", 0x3D, InlineBrTarget),
    OpCode::new("ble", 0x3E, InlineBrTarget),
    OpCode::new("blt", 0x3F, InlineBrTarget),
    OpCode::new("bne.un", 0x40, InlineBrTarget),
    OpCode::new("bge.un", 0x41, InlineBrTarget),
    OpCode::new("bgt.un", 0x42, InlineBrTarget),
    OpCode::new("ble.un", 0x43, InlineBrTarget),
    OpCode::new("blt.un", 0x44, InlineBrTarget),
    OpCode::new("switch", 0x45, InlineSwitch),
    OpCode::new("ldind.i1", 0x46, InlineNone),
    OpCode::new("ldind.u1", 0x47, InlineNone),
    OpCode::new("ldind.i2", 0x48, InlineNone),
    OpCode::new("ldind.u2", 0x49, InlineNone),
    OpCode::new("ldind.i4", 0x4A, InlineNone),
    OpCode::new("ldind.u4", 0x4B, InlineNone),
    OpCode::new("ldind.i8", 0x4C, InlineNone),
    OpCode::new("ldind.i", 0x4D, InlineNone),
    OpCode::new("ldind.r4", 0x4E, InlineNone),
    OpCode::new("ldind.r8", 0x4F, InlineNone),
    OpCode::new("ldind.ref", 0x50, InlineNone),
    OpCode::new("stind.ref", 0x51, InlineNone),
    OpCode::new("stind.i1", 0x52, InlineNone),
    OpCode::new("stind.i2", 0x53, InlineNone),
    OpCode::new("stind.i4", 0x54, InlineNone),
    OpCode::new("stind.i8", 0x55, InlineNone),
    OpCode::new("stind.r4", 0x56, InlineNone),
    OpCode::new("stind.r8", 0x57, InlineNone),
    OpCode::new("add", 0x58, InlineNone),
    OpCode::new("sub", 0x59, InlineNone),
    OpCode::new("mul", 0x5A, InlineNone),
    OpCode::new("div", 0x5B, InlineNone),
    OpCode::new("div.un", 0x5C, InlineNone),
    OpCode::new("rem", 0x5D, InlineNone),
    OpCode::new("rem.un", 0x5E, InlineNone),
    OpCode::new("and", 0x5F, InlineNone),
    OpCode::new("or", 0x60, InlineNone),
    OpCode::new("xor", 0x61, InlineNone),
    OpCode::new("shl", 0x62, InlineNone),
    OpCode::new("shr", 0x63, InlineNone),
    OpCode::new("shr.un", 0x64, InlineNone),
    OpCode::new("neg", 0x65, InlineNone),
    OpCode::new("not", 0x66, InlineNone),
    OpCode::new("conv.i1", 0x67, InlineNone),
    OpCode::new("conv.i2", 0x68, InlineNone),
    OpCode::new("conv.i4", 0x69, InlineNone),
    OpCode::new("conv.i8", 0x6A, InlineNone),
    OpCode::new("conv.r4", 0x6B, InlineNone),
    OpCode::new("conv.r8", 0x6C, InlineNone),
    OpCode::new("conv.u4", 0x6D, InlineNone),
    OpCode::new("conv.u8", 0x6E, InlineNone),
    OpCode::new("callvirt", 0x6F, InlineMethod),
    OpCode::new("cpobj", 0x70, InlineType),
    OpCode::new("ldobj", 0x71, InlineType),
    OpCode::new("ldstr", 0x72, InlineString),
    OpCode::new("newobj", 0x73, InlineMethod),
    OpCode::new("castclass", 0x74, InlineType),
    OpCode::new("isinst", 0x75, InlineType),
    OpCode::new("conv.r.un", 0x76, InlineNone),
    OpCode::reserved(0x77),
    OpCode::reserved(0x78),
    OpCode::new("unbox", 0x79, InlineType),
    OpCode::new("throw", 0x7A, InlineNone),
    OpCode::new("ldfld", 0x7B, InlineField),
    OpCode::new("ldflda", 0x7C, InlineField),
    OpCode::new("stfld", 0x7D, InlineField),
    OpCode::new("ldsfld", 0x7E, InlineField),
    OpCode::new("ldsflda", 0x7F, InlineField),
    OpCode::new("stsfld", 0x80, InlineField),
    OpCode::new("stobj", 0x81, InlineType),
    OpCode::new("conv.ovf.i1.un", 0x82, InlineNone),
    OpCode::new("conv.ovf.i2.un", 0x83, InlineNone),
    OpCode::new("conv.ovf.i4.un", 0x84, InlineNone),
    OpCode::new("conv.ovf.i8.un", 0x85, InlineNone),
    OpCode::new("conv.ovf.u1.un", 0x86, InlineNone),
    OpCode::new("conv.ovf.u2.un", 0x87, InlineNone),
    OpCode::new("conv.ovf.u4.un", 0x88, InlineNone),
    OpCode::new("conv.ovf.u8.un", 0x89, InlineNone),
    OpCode::new("conv.ovf.i.un", 0x8A, InlineNone),
    OpCode::new("conv.ovf.u.un", 0x8B, InlineNone),
    OpCode::new("box", 0x8C, InlineType),
    OpCode::new("newarr", 0x8D, InlineType),
    OpCode::new("ldlen", 0x8E, InlineNone),
    OpCode::new("ldelema", 0x8F, InlineType),
    OpCode::new("ldelem.i1", 0x90, InlineNone),
    OpCode::new("ldelem.u1", 0x91, InlineNone),
    OpCode::new("ldelem.i2", 0x92, InlineNone),
    OpCode::new("ldelem.u2", 0x93, InlineNone),
    OpCode::new("ldelem.i4", 0x94, InlineNone),
    OpCode::new("ldelem.u4", 0x95, InlineNone),
    OpCode::new("ldelem.i8", 0x96, InlineNone),
    OpCode::new("ldelem.i", 0x97, InlineNone),
    OpCode::new("ldelem.r4", 0x98, InlineNone),
    OpCode::new("ldelem.r8", 0x99, InlineNone),
    OpCode::new("ldelem.ref", 0x9A, InlineNone),
    OpCode::new("stelem.i", 0x9B, InlineNone),
    OpCode::new("stelem.i1", 0x9C, InlineNone),
    OpCode::new("stelem.i2", 0x9D, InlineNone),
    OpCode::new("stelem.i4", 0x9E, InlineNone),
    OpCode::new("stelem.i8", 0x9F, InlineNone),
    OpCode::new("stelem.r4", 0xA0, InlineNone),
    OpCode::new("stelem.r8", 0xA1, InlineNone),
    OpCode::new("stelem.ref", 0xA2, InlineNone),
    OpCode::new("ldelem", 0xA3, InlineType),
    OpCode::new("stelem", 0xA4, InlineType),
    OpCode::new("unbox.any", 0xA5, InlineType),
    OpCode::reserved(0xA6),
    OpCode::reserved(0xA7),
    OpCode::reserved(0xA8),
    OpCode::reserved(0xA9),
    OpCode::reserved(0xAA),
    OpCode::reserved(0xAB),
    OpCode::reserved(0xAC),
    OpCode::reserved(0xAD),
    OpCode::reserved(0xAE),
    OpCode::reserved(0xAF),
    OpCode::reserved(0xB0),
    OpCode::reserved(0xB1),
    OpCode::reserved(0xB2),
    OpCode::new("conv.ovf.i1", 0xB3, InlineNone),
    OpCode::new("conv.ovf.u1", 0xB4, InlineNone),
    OpCode::new("conv.ovf.i2", 0xB5, InlineNone),
    OpCode::new("conv.ovf.u2", 0xB6, InlineNone),
    OpCode::new("conv.ovf.i4", 0xB7, InlineNone),
    OpCode::new("conv.ovf.u4", 0xB8, InlineNone),
    OpCode::new("conv.ovf.i8", 0xB9, InlineNone),
    OpCode::new("conv.ovf.u8", 0xBA, InlineNone),
    OpCode::reserved(0xBB),
    OpCode::reserved(0xBC),
    OpCode::reserved(0xBD),
    OpCode::reserved(0xBE),
    OpCode::reserved(0xBF),
    OpCode::reserved(0xC0),
    OpCode::reserved(0xC1),
    OpCode::new("refanyval", 0xC2, InlineType),
    OpCode::new("ckfinite", 0xC3, InlineNone),
    OpCode::reserved(0xC4),
    OpCode::reserved(0xC5),
    OpCode::new("mkrefany", 0xC6, InlineType),
    OpCode::reserved(0xC7),
    OpCode::reserved(0xC8),
    OpCode::reserved(0xC9),
    OpCode::reserved(0xCA),
    OpCode::reserved(0xCB),
    OpCode::reserved(0xCC),
    OpCode::reserved(0xCD),
    OpCode::reserved(0xCE),
    OpCode::reserved(0xCF),
    OpCode::new("ldtoken", 0xD0, InlineTok),
    OpCode::new("conv.u2", 0xD1, InlineNone),
    OpCode::new("conv.u1", 0xD2, InlineNone),
    OpCode::new("conv.i", 0xD3, InlineNone),
    OpCode::new("conv.ovf.i", 0xD4, InlineNone),
    OpCode::new("conv.ovf.u", 0xD5, InlineNone),
    OpCode::new("add.ovf", 0xD6, InlineNone),
    OpCode::new("add.ovf.un", 0xD7, InlineNone),
    OpCode::new("mul.ovf", 0xD8, InlineNone),
    OpCode::new("mul.ovf.un", 0xD9, InlineNone),
    OpCode::new("sub.ovf", 0xDA, InlineNone),
    OpCode::new("sub.ovf.un", 0xDB, InlineNone),
    OpCode::new("endfinally", 0xDC, InlineNone),
    OpCode::new("leave", 0xDD, InlineBrTarget),
    OpCode::new("leave.s", 0xDE, ShortInlineBrTarget),
    OpCode::new("stind.i", 0xDF, InlineNone),
    OpCode::new("conv.u", 0xE0, InlineNone),
];

/// Opcodes following the `0xFE` prefix byte, `0xFE00` to `0xFE1E`
#[rustfmt::skip]
pub static INSTRUCTIONS_FE: [OpCode; 0x1F] = [
    OpCode::new("arglist", 0xFE00, InlineNone),
    OpCode::new("ceq", 0xFE01, InlineNone),
    OpCode::new("cgt", 0xFE02, InlineNone),
    OpCode::new("cgt.un", 0xFE03, InlineNone),
    OpCode::new("clt", 0xFE04, InlineNone),
    OpCode::new("clt.un", 0xFE05, InlineNone),
    OpCode::new("ldftn", 0xFE06, InlineMethod),
    OpCode::new("ldvirtftn", 0xFE07, InlineMethod),
    OpCode::reserved(0xFE08),
    OpCode::new("ldarg", 0xFE09, InlineVar),
    OpCode::new("ldarga", 0xFE0A, InlineVar),
    OpCode::new("starg", 0xFE0B, InlineVar),
    OpCode::new("ldloc", 0xFE0C, InlineVar),
    OpCode::new("ldloca", 0xFE0D, InlineVar),
    OpCode::new("stloc", 0xFE0E, InlineVar),
    OpCode::new("localloc", 0xFE0F, InlineNone),
    OpCode::reserved(0xFE10),
    OpCode::new("endfilter", 0xFE11, InlineNone),
    OpCode::new("unaligned.", 0xFE12, ShortInlineI),
    OpCode::new("volatile.", 0xFE13, InlineNone),
    OpCode::new("tail.", 0xFE14, InlineNone),
    OpCode::new("initobj", 0xFE15, InlineType),
    OpCode::new("constrained.", 0xFE16, InlineType),
    OpCode::new("cpblk", 0xFE17, InlineNone),
    OpCode::new("initblk", 0xFE18, InlineNone),
    OpCode::new("no.", 0xFE19, ShortInlineI),
    OpCode::new("rethrow", 0xFE1A, InlineNone),
    OpCode::reserved(0xFE1B),
    OpCode::new("sizeof", 0xFE1C, InlineType),
    OpCode::new("refanytype", 0xFE1D, InlineNone),
    OpCode::new("readonly.", 0xFE1E, InlineNone),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_indexed_by_encoding() {
        for (index, opcode) in INSTRUCTIONS.iter().enumerate() {
            assert_eq!(usize::from(opcode.value), index);
        }
        for (index, opcode) in INSTRUCTIONS_FE.iter().enumerate() {
            assert_eq!(usize::from(opcode.value), 0xFE00 + index);
        }
    }

    #[test]
    fn lookups() {
        let ldstr = find_opcode("ldstr").unwrap();
        assert_eq!(ldstr.value, 0x72);
        assert_eq!(ldstr.operand_type, InlineString);
        assert_eq!(ldstr.size(), 1);

        let ceq = find_opcode("ceq").unwrap();
        assert_eq!(ceq.value, 0xFE01);
        assert_eq!(ceq.size(), 2);

        assert!(find_opcode("").is_none());
        assert!(find_opcode("mov").is_none());
        assert!(INSTRUCTIONS[0x24].is_reserved());
        assert!(INSTRUCTIONS_FE[0x08].is_reserved());
    }

    #[test]
    fn argument_family() {
        let arguments: Vec<&str> = INSTRUCTIONS
            .iter()
            .chain(INSTRUCTIONS_FE.iter())
            .filter(|opcode| opcode.is_argument())
            .map(|opcode| opcode.name)
            .collect();

        assert_eq!(arguments, ["ldarg.s", "ldarga.s", "starg.s", "ldarg", "ldarga", "starg"]);
        assert!(!find_opcode("ldloc.s").unwrap().is_argument());
    }

    #[test]
    fn operand_sizes() {
        assert_eq!(find_opcode("ldc.i8").unwrap().operand_type.operand_size(), Some(8));
        assert_eq!(find_opcode("ldloc").unwrap().operand_type.operand_size(), Some(2));
        assert_eq!(find_opcode("switch").unwrap().operand_type.operand_size(), None);
        assert_eq!(find_opcode("calli").unwrap().operand_type, InlineSig);
        assert!(find_opcode("unaligned.").unwrap().has_unsigned_operand());
    }
}
