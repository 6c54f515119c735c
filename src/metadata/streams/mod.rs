//! Metadata streams (ECMA-335 II.24.2): the heaps and the table stream.
//!
//! - `#Strings` - [`Strings`], UTF-8 identifiers
//! - `#US` - [`UserStrings`], UTF-16 string literals used by `ldstr`
//! - `#Blob` - [`Blob`], signatures and constant values
//! - `#GUID` - [`Guid`], module version ids
//! - `#~` - [`TablesHeader`], the physical metadata tables

mod blob;
pub use blob::Blob;

mod guid;
pub use guid::Guid;

mod streamheader;
pub use streamheader::{StreamHeader, STREAM_NAMES};

mod strings;
pub use strings::Strings;

mod tablesheader;
pub use tablesheader::TablesHeader;

mod userstrings;
pub use userstrings::UserStrings;
