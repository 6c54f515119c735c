//! The `PropertyMap` table (0x15): the run of properties owned by a type.

mod raw;
mod reader;

pub use raw::*;
