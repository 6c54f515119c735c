//! MSIL literals for `Constant` blobs.

use crate::{file::parser::Parser, metadata::signatures::ELEMENT_TYPE, Result};

/// Render a constant value of element type `type_code` stored in `value`.
///
/// Integers are written as `kind(0xHEX)` with two hex digits per byte of the type (64-bit
/// values without padding). NaN and infinities are written as the bytes of their IEEE-754
/// encoding, most significant first, and zero keeps its sign.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for a type code a constant cannot have and
/// [`crate::Error::OutOfBounds`] if `value` is too short for it.
///
/// # Examples
/// ```rust,ignore
/// assert_eq!(format_constant(ELEMENT_TYPE::I4, &[0x2A, 0, 0, 0])?, "int32(0x0000002A)");
/// ```
pub fn format_constant(type_code: u8, value: &[u8]) -> Result<String> {
    let mut parser = Parser::new(value);

    let text = match type_code {
        ELEMENT_TYPE::BOOLEAN => {
            let flag = if parser.read_le::<u8>()? == 0 { "False" } else { "True" };
            format!("bool({flag})")
        }
        ELEMENT_TYPE::CHAR => format!("char(0x{:04X})", parser.read_le::<u16>()?),
        ELEMENT_TYPE::I1 => format!("int8(0x{:02X})", parser.read_le::<u8>()?),
        ELEMENT_TYPE::U1 => format!("uint8(0x{:02X})", parser.read_le::<u8>()?),
        ELEMENT_TYPE::I2 => format!("int16(0x{:04X})", parser.read_le::<u16>()?),
        ELEMENT_TYPE::U2 => format!("uint16(0x{:04X})", parser.read_le::<u16>()?),
        ELEMENT_TYPE::I4 => format!("int32(0x{:08X})", parser.read_le::<u32>()?),
        ELEMENT_TYPE::U4 => format!("uint32(0x{:08X})", parser.read_le::<u32>()?),
        ELEMENT_TYPE::I8 => format!("int64(0x{:X})", parser.read_le::<u64>()?),
        ELEMENT_TYPE::U8 => format!("uint64(0x{:X})", parser.read_le::<u64>()?),
        ELEMENT_TYPE::R4 => {
            let number = parser.read_le::<f32>()?;
            float_text("float32", &value[..4], number.is_finite(), number == 0.0, number)
        }
        ELEMENT_TYPE::R8 => {
            let number = parser.read_le::<f64>()?;
            float_text("float64", &value[..8], number.is_finite(), number == 0.0, number)
        }
        ELEMENT_TYPE::STRING => {
            let units: Vec<u16> = value
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            quote_string(&String::from_utf16_lossy(&units))
        }
        ELEMENT_TYPE::CLASS => "nullref".to_string(),
        _ => return Err(malformed_error!("Invalid constant type code - {:#x}", type_code)),
    };

    Ok(text)
}

fn float_text<T: std::fmt::Display>(
    kind: &str,
    bytes: &[u8],
    is_finite: bool,
    is_zero: bool,
    number: T,
) -> String {
    if !is_finite {
        let hex: String = bytes.iter().rev().map(|byte| format!("{byte:02X}")).collect();
        return format!("{kind}(0x{hex})");
    }

    if is_zero {
        let sign = if bytes.last() == Some(&0x80) { "-" } else { "" };
        return format!("{kind}({sign}0.0)");
    }

    format!("{kind}({number})")
}

/// `text` between double quotes, with `"` and `\` escaped
#[must_use]
pub fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
