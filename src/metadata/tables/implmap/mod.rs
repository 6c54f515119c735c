//! The `ImplMap` table (0x1C): PInvoke imports of methods and fields.

mod raw;
mod reader;

pub use raw::*;

/// Flags of an `ImplMap` row (ECMA-335 II.23.1.8)
#[allow(non_snake_case)]
pub mod PInvokeAttributes {
    /// Use the member name as specified
    pub const NO_MANGLE: u32 = 0x0001;
    /// Mask for the character set bits
    pub const CHAR_SET_MASK: u32 = 0x0006;
    /// ANSI strings
    pub const CHAR_SET_ANSI: u32 = 0x0002;
    /// UTF-16 strings
    pub const CHAR_SET_UNICODE: u32 = 0x0004;
    /// Platform dependent strings
    pub const CHAR_SET_AUTO: u32 = 0x0006;
    /// Record the last error
    pub const SUPPORTS_LAST_ERROR: u32 = 0x0040;
    /// Mask for the calling convention bits
    pub const CALL_CONV_MASK: u32 = 0x0700;
    /// Platform default calling convention
    pub const CALL_CONV_WINAPI: u32 = 0x0100;
    /// `cdecl`
    pub const CALL_CONV_CDECL: u32 = 0x0200;
    /// `stdcall`
    pub const CALL_CONV_STDCALL: u32 = 0x0300;
    /// `thiscall`
    pub const CALL_CONV_THISCALL: u32 = 0x0400;
    /// `fastcall`
    pub const CALL_CONV_FASTCALL: u32 = 0x0500;
}
