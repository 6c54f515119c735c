//! The `StandAloneSig` table (0x11): local variable and call site signatures.

mod raw;
mod reader;

pub use raw::*;
