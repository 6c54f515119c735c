//! Textual type model built while decoding signatures.

use std::fmt;

/// The MSIL text of a decoded type.
///
/// Decorations (arrays, pointers, generic arguments, modifiers) are appended to the
/// innermost element type in decoding order. The two flags select the `valuetype ` or
/// `class ` prefix used where ILAsm requires one; at most one of them is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeText {
    name: String,
    is_value_type: bool,
    is_class_type: bool,
}

impl TypeText {
    /// A type without a prefix, e.g. a primitive or a generic parameter
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        TypeText {
            name: name.into(),
            is_value_type: false,
            is_class_type: false,
        }
    }

    /// A type with explicit prefix flags
    #[must_use]
    pub fn with_kind(name: impl Into<String>, is_value_type: bool, is_class_type: bool) -> Self {
        TypeText {
            name: name.into(),
            is_value_type,
            is_class_type: is_class_type && !is_value_type,
        }
    }

    /// The text without prefix
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders with `valuetype `
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        self.is_value_type
    }

    /// Renders with `class `
    #[must_use]
    pub fn is_class_type(&self) -> bool {
        self.is_class_type
    }

    /// Append a decoration to the name
    pub fn append(&mut self, decoration: &str) {
        self.name.push_str(decoration);
    }

    /// The text with or without its prefix
    #[must_use]
    pub fn to_text(&self, with_prefix: bool) -> String {
        if with_prefix {
            self.to_string()
        } else {
            self.name.clone()
        }
    }

    /// The prefix keyword including its trailing space, empty if there is none
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        if self.is_value_type {
            "valuetype "
        } else if self.is_class_type {
            "class "
        } else {
            ""
        }
    }
}

impl fmt::Display for TypeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.name)
    }
}
