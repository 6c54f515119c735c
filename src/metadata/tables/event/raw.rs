use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `Event` table
#[derive(Clone, Debug)]
pub struct EventRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// `EventAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `TypeDefOrRef`: the delegate type of the event
    pub event_type: CodedIndex,
}
