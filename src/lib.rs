// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! # cildasm
//!
//! A disassembler core for .NET (ECMA-335) images, written in pure Rust.
//!
//! `cildasm` reads a PE file, parses its CLI metadata and prints methods, types and whole
//! assemblies in the textual MSIL form used by ILAsm. It does not need Windows or a .NET
//! runtime.
//!
//! ## Layout
//!
//! - [`metadata`]: the CLI header, heaps, metadata tables, method bodies and the
//!   signature decoder, all behind the read-only [`metadata::source::MetadataSource`] trait
//! - [`disassembler`]: opcode tables, the instruction decoder, token and type resolution,
//!   the entity model and the [`Writer`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cildasm::prelude::*;
//!
//! let assembly = Assembly::from_file(std::path::Path::new("app.dll"))?;
//! let mut text = String::new();
//! Writer::new(DumpOptions::default()).dump_assembly(&assembly, &mut text)?;
//! println!("{text}");
//! # Ok::<(), cildasm::Error>(())
//! ```
//!
//! Single members can be printed without writing the rest of the image:
//!
//! ```rust,no_run
//! use cildasm::{Assembly, DumpOptions, Writer};
//!
//! let assembly = Assembly::from_file(std::path::Path::new("app.dll"))?;
//! let writer = Writer::new(DumpOptions::with_bytes());
//! for type_definition in assembly.type_definitions()? {
//!     if type_definition.full_name()? == "Demo.Program" {
//!         print!("{}", writer.type_to_string(&type_definition)?);
//!     }
//! }
//! # Ok::<(), cildasm::Error>(())
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`Result`]. Decoding is lazy: a malformed method body
//! or signature fails the member that needs it, not the load of the image.

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

#[cfg(test)]
pub(crate) mod test;

pub mod prelude;

pub mod disassembler;

pub mod metadata;

/// `Result` with the crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// The error type of every fallible operation.
///
/// # Example
///
/// ```rust,no_run
/// use cildasm::{Assembly, Error};
///
/// match Assembly::from_file(std::path::Path::new("app.dll")) {
///     Ok(assembly) => println!("loaded {}", assembly.name().unwrap_or("<no manifest>")),
///     Err(Error::NotSupported) => println!("not a CLI image"),
///     Err(Error::Malformed { message, .. }) => println!("malformed: {message}"),
///     Err(error) => println!("error: {error}"),
/// }
/// ```
pub use error::{Error, IndexKind};

pub use disassembler::{
    Assembly, AssemblyReference, CustomAttribute, DumpOptions, Event, Field, MethodDefinition,
    ModuleReference, Property, TypeDefinition, Writer,
};

pub use metadata::token::{Token, TokenKind};

/// Low-level image access: the PE container, its header values and the byte parser.
pub use file::{parser::Parser, File, ImageInfo};
