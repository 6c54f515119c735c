//! Method body headers, IL code and exception clauses (ECMA-335 II.25.4).
//!
//! A body starts with either a one-byte tiny header (code size in the upper six bits, no
//! locals, no exception clauses, max stack 8) or a twelve-byte fat header. Fat bodies may
//! be followed by 4-byte aligned data sections holding small or fat exception clauses.

use crate::{
    file::parser::Parser,
    metadata::{
        method::{ExceptionHandler, ExceptionHandlerFlags, MethodBodyFlags, SectionFlags},
        token::Token,
    },
    Error::OutOfBounds,
    Result,
};

/// A decoded method body; the IL code is copied out of the image.
#[derive(Debug, Clone)]
pub struct MethodBody {
    /// Size of the IL code in bytes
    pub size_code: usize,
    /// Size of the header in bytes
    pub size_header: usize,
    /// `StandAloneSig` token of the locals signature, null if there are no locals
    pub local_var_sig_token: Token,
    /// Maximum evaluation stack depth
    pub max_stack: usize,
    /// Whether the body uses the fat header
    pub is_fat: bool,
    /// Whether locals are zero initialised (`.locals init`)
    pub is_init_local: bool,
    /// Exception clauses in declaration order
    pub exception_handlers: Vec<ExceptionHandler>,
    /// The raw IL code
    pub code: Vec<u8>,
}

impl MethodBody {
    /// Decode a body from `data`, which starts at the body's RVA and may extend past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the code or a data section is truncated,
    /// and [`crate::Error::Malformed`] if the header is neither tiny nor fat.
    pub fn from(data: &[u8]) -> Result<MethodBody> {
        let Some(&first_byte) = data.first() else {
            return Err(malformed_error!("Provided data for body parsing is empty"));
        };

        match MethodBodyFlags::from_bits_truncate(u16::from(first_byte & 0b11)) {
            MethodBodyFlags::TINY_FORMAT => {
                let size_code = (first_byte >> 2) as usize;
                let Some(code) = data.get(1..=size_code) else {
                    return Err(OutOfBounds);
                };

                Ok(MethodBody {
                    size_code,
                    size_header: 1,
                    local_var_sig_token: Token::new(0),
                    max_stack: 8,
                    is_fat: false,
                    is_init_local: false,
                    exception_handlers: Vec::new(),
                    code: code.to_vec(),
                })
            }
            MethodBodyFlags::FAT_FORMAT => Self::read_fat(data),
            _ => Err(malformed_error!(
                "MethodHeader is neither FAT nor TINY - {}",
                first_byte
            )),
        }
    }

    fn read_fat(data: &[u8]) -> Result<MethodBody> {
        let mut parser = Parser::new(data);

        let flags_and_size = parser.read_le::<u16>()?;
        let max_stack = parser.read_le::<u16>()? as usize;
        let size_code = parser.read_le::<u32>()? as usize;
        let local_var_sig_token = Token::new(parser.read_le::<u32>()?);

        let size_header = ((flags_and_size >> 12) * 4) as usize;
        if size_header < 12 {
            return Err(malformed_error!("Fat header size too small - {}", size_header));
        }

        let flags = MethodBodyFlags::from_bits_truncate(flags_and_size & 0x0FFF);

        parser.seek(size_header)?;
        let code = parser.read_bytes(size_code)?.to_vec();

        let mut exception_handlers = Vec::new();
        if flags.contains(MethodBodyFlags::MORE_SECTS) {
            loop {
                parser.align(4)?;

                let section_flags = SectionFlags::from_bits_truncate(parser.read_le::<u8>()?);
                if !section_flags.contains(SectionFlags::EHTABLE) {
                    return Err(malformed_error!(
                        "Unsupported method data section - {:#x}",
                        section_flags.bits()
                    ));
                }

                if section_flags.contains(SectionFlags::FAT_FORMAT) {
                    let size_low = u32::from(parser.read_le::<u16>()?);
                    let size_high = u32::from(parser.read_le::<u8>()?);
                    let section_size = (size_high << 16 | size_low) as usize;

                    for _ in 0..section_size.saturating_sub(4) / 24 {
                        exception_handlers.push(read_fat_clause(&mut parser)?);
                    }
                } else {
                    let section_size = parser.read_le::<u8>()? as usize;
                    parser.advance_by(2)?;

                    for _ in 0..section_size.saturating_sub(4) / 12 {
                        exception_handlers.push(read_small_clause(&mut parser)?);
                    }
                }

                if !section_flags.contains(SectionFlags::MORE_SECTS) {
                    break;
                }
            }
        }

        Ok(MethodBody {
            size_code,
            size_header,
            local_var_sig_token,
            max_stack,
            is_fat: true,
            is_init_local: flags.contains(MethodBodyFlags::INIT_LOCALS),
            exception_handlers,
            code,
        })
    }

    /// Size of header and code, without data sections
    #[must_use]
    pub fn size(&self) -> usize {
        self.size_code + self.size_header
    }
}

fn read_small_clause(parser: &mut Parser) -> Result<ExceptionHandler> {
    Ok(ExceptionHandler {
        flags: ExceptionHandlerFlags::from_bits_truncate(parser.read_le::<u16>()?),
        try_offset: u32::from(parser.read_le::<u16>()?),
        try_length: u32::from(parser.read_le::<u8>()?),
        handler_offset: u32::from(parser.read_le::<u16>()?),
        handler_length: u32::from(parser.read_le::<u8>()?),
        filter_offset: parser.read_le::<u32>()?,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn read_fat_clause(parser: &mut Parser) -> Result<ExceptionHandler> {
    Ok(ExceptionHandler {
        flags: ExceptionHandlerFlags::from_bits_truncate(parser.read_le::<u32>()? as u16),
        try_offset: parser.read_le::<u32>()?,
        try_length: parser.read_le::<u32>()?,
        handler_offset: parser.read_le::<u32>()?,
        handler_length: parser.read_le::<u32>()?,
        filter_offset: parser.read_le::<u32>()?,
    })
}
