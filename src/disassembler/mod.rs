//! CIL disassembler: instruction decoding, operand resolution and listing output.
//!
//! The module is layered bottom-up:
//! - [`opcodes`] and [`decode_instruction`] turn IL bytes into [`Instruction`]s
//! - [`Resolver`] and [`DisassemblerTypeProvider`] turn metadata tokens and signatures into
//!   MSIL text ([`TypeText`])
//! - the entities ([`Assembly`], [`TypeDefinition`], [`MethodDefinition`] and friends) give
//!   a lazily decoded, read-only object model over one image
//! - [`Writer`] prints methods, types or whole assemblies as ILAsm-like text
//!
//! # Example
//! ```rust,no_run
//! use cildasm::disassembler::{Assembly, DumpOptions, Writer};
//!
//! let assembly = Assembly::from_file(std::path::Path::new("app.dll"))?;
//! let writer = Writer::new(DumpOptions::default());
//! for type_definition in assembly.type_definitions()? {
//!     for method in type_definition.methods()? {
//!         print!("{}", writer.method_to_string(&method)?);
//!     }
//! }
//! # Ok::<(), cildasm::Error>(())
//! ```

mod config;
mod constant;
mod decoder;
mod entities;
mod instruction;
mod names;
pub mod opcodes;
mod provider;
mod regions;
mod resolver;
mod typetext;
mod writer;

pub use config::DumpOptions;
pub use constant::{format_constant, quote_string};
pub use decoder::{decode_instruction, decode_instructions, InstructionDecoder};
pub use entities::{
    Accessor, Assembly, AssemblyReference, CustomAttribute, Event, Field, Local,
    MethodDefinition, ModuleReference, PInvoke, Parameter, Property, TypeDefinition,
};
pub use instruction::{Instruction, Operand};
pub use names::quote_identifier;
pub use opcodes::{find_opcode, OpCode, OperandType};
pub use provider::{DisassemblerTypeProvider, MAX_TYPE_SPEC_DEPTH};
pub use regions::{create_regions, ExceptionRegion, HandlerKind};
pub use resolver::{generic_argument_list, MethodScope, Resolver};
pub use typetext::TypeText;
pub use writer::Writer;
