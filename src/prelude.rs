//! Commonly used types in one import.
//!
//! ```rust,no_run
//! use cildasm::prelude::*;
//!
//! let assembly = Assembly::from_file(std::path::Path::new("app.dll"))?;
//! let writer = Writer::new(DumpOptions::default());
//! # Ok::<(), cildasm::Error>(())
//! ```

pub use crate::{Error, Result};

pub use crate::disassembler::{
    Assembly, AssemblyReference, CustomAttribute, DumpOptions, Event, Field, Instruction,
    Local, MethodDefinition, ModuleReference, Operand, Parameter, Property, TypeDefinition,
    Writer,
};

pub use crate::metadata::{
    source::MetadataSource,
    token::{Token, TokenKind},
    view::CilView,
};

pub use crate::{File, ImageInfo, Parser};
