//! The `Module` table (0x00). It always holds exactly one row.

mod raw;
mod reader;

pub use raw::*;
