//! The `EventMap` table (0x12): the run of events owned by a type.

mod raw;
mod reader;

pub use raw::*;
