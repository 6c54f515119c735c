use crate::metadata::token::Token;

/// A row of the `EventMap` table
#[derive(Clone, Debug)]
pub struct EventMapRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `TypeDef` row owning the events
    pub parent: u32,
    /// First row of the run in the `Event` table
    pub event_list: u32,
}
