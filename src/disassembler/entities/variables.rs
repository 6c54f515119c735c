use std::fmt;

use crate::{
    disassembler::names::quote_identifier,
    metadata::{tables::ParamAttributes, token::Token},
};

/// A local variable slot of a method body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Local {
    /// Slot number
    pub index: usize,
    /// `V_<index>`
    pub name: String,
    /// Type as written in a signature
    pub type_text: String,
}

impl fmt::Display for Local {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.index, self.type_text, self.name)
    }
}

/// A declared parameter of a method.
///
/// Parameters without a `Param` row, or with an empty name, are named `A_<slot>` where the
/// slot counts the implicit `this` of instance methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// 1-based position in the signature
    pub sequence: u16,
    /// Name, never empty
    pub name: String,
    /// Type as written in a signature
    pub type_text: String,
    /// `ParamAttributes` of the `Param` row, 0 without one
    pub flags: u32,
    /// The formatted default value
    pub default: Option<String>,
    /// The `Param` row, if the parameter has one
    pub token: Option<Token>,
}

impl Parameter {
    /// Whether the parameter is marked `[opt]`
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.flags & ParamAttributes::OPTIONAL != 0
    }

    /// Whether the parameter is marked `[in]`
    #[must_use]
    pub fn is_in(&self) -> bool {
        self.flags & ParamAttributes::IN != 0
    }

    /// Whether the parameter is marked `[out]`
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.flags & ParamAttributes::OUT != 0
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_in() {
            write!(f, "[in] ")?;
        }
        if self.is_out() {
            write!(f, "[out] ")?;
        }
        if self.is_optional() {
            write!(f, "[opt] ")?;
        }
        write!(f, "{} {}", self.type_text, quote_identifier(&self.name))
    }
}
