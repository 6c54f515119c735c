//! The `Constant` table (0x0B): default values of fields, parameters and properties.

mod raw;
mod reader;

pub use raw::*;
