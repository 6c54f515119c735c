//! Read-only projections over metadata rows.
//!
//! Every entity borrows a [`MetadataSource`], keeps its token and its raw row, and computes
//! text lazily. Computed values are cached in a [`OnceCell`], so repeated rendering of the
//! same method or type decodes each signature and body once. Back references, such as the
//! declaring type of a method, are kept as tokens.

mod assembly;
mod attribute;
mod field;
mod members;
mod method;
mod references;
mod typedef;
mod variables;

use std::cell::OnceCell;

pub use assembly::Assembly;
pub use attribute::CustomAttribute;
pub use field::Field;
pub use members::{Accessor, Event, Property};
pub use method::{MethodDefinition, PInvoke};
pub use references::{AssemblyReference, ModuleReference};
pub use typedef::TypeDefinition;
pub use variables::{Local, Parameter};

use crate::{
    disassembler::constant::format_constant,
    metadata::{source::MetadataSource, tables::TableId, token::Token},
    Result,
};

/// Initialize `cell` with a fallible computation, keeping the first success.
pub(crate) fn cached<T>(cell: &OnceCell<T>, init: impl FnOnce() -> Result<T>) -> Result<&T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }

    let value = init()?;
    Ok(cell.get_or_init(|| value))
}

/// The custom attributes whose `Parent` is `parent`, in table order.
pub(crate) fn custom_attributes_of<'a, S: MetadataSource + ?Sized>(
    source: &'a S,
    parent: Token,
) -> Result<Vec<CustomAttribute<'a, S>>> {
    let mut attributes = Vec::new();
    for rid in 1..=source.row_count(TableId::CustomAttribute) {
        let row = source.custom_attribute(rid)?;
        if row.parent.token == parent {
            attributes.push(CustomAttribute::from_row(source, row));
        }
    }

    Ok(attributes)
}

/// The formatted default value of a field, parameter or property, if it has one.
pub(crate) fn constant_of<S: MetadataSource + ?Sized>(
    source: &S,
    parent: Token,
) -> Result<Option<String>> {
    for rid in 1..=source.row_count(TableId::Constant) {
        let row = source.constant(rid)?;
        if row.parent.token == parent {
            return format_constant(row.base, source.blob(row.value)?).map(Some);
        }
    }

    Ok(None)
}

/// `a:b:c:d`, the way `.ver` prints a four part version
pub(crate) fn version_text(major: u16, minor: u16, build: u16, revision: u16) -> String {
    format!("{major}:{minor}:{build}:{revision}")
}

/// Upper case hex bytes separated by single spaces
pub(crate) fn hex_bytes(bytes: &[u8]) -> String {
    let bytes: Vec<String> = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
    bytes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn cache_keeps_first_success() {
        let cell = OnceCell::new();
        assert!(cached(&cell, || Err(Error::Empty)).is_err());
        assert_eq!(*cached(&cell, || Ok(1)).unwrap(), 1);
        assert_eq!(*cached(&cell, || Ok(2)).unwrap(), 1);
    }

    #[test]
    fn texts() {
        assert_eq!(version_text(4, 0, 0, 0), "4:0:0:0");
        assert_eq!(hex_bytes(&[0x01, 0x00, 0xAB]), "01 00 AB");
        assert_eq!(hex_bytes(&[]), "");
    }
}
