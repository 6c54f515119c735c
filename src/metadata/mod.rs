//! Reading the CLI metadata of a PE image (ECMA-335 Partition II).
//!
//! The layers build on each other: [`cor20header`] locates the metadata, [`root`] lists its
//! streams, [`streams`] wraps the heaps and the table stream, [`tables`] reads typed rows and
//! [`method`] parses method bodies. [`view::CilView`] ties them together behind the
//! [`source::MetadataSource`] trait, which is all the disassembler needs.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cildasm::metadata::{source::MetadataSource, tables::TableId, view::CilView};
//!
//! let view = CilView::from_file("app.dll".as_ref())?;
//! println!("Types: {}", view.row_count(TableId::TypeDef));
//! println!("Methods: {}", view.row_count(TableId::MethodDef));
//! # Ok::<(), cildasm::Error>(())
//! ```

/// Implementation of the Header of CIL
pub mod cor20header;
/// Implementation of the method body format
pub mod method;
/// Implementation of the root metadata structure
pub mod root;
/// Implementation of method and type signatures
pub mod signatures;
/// The trait all decoding reads metadata through
pub mod source;
/// Implementation of the physical streams
pub mod streams;
/// Implementation of the metadata tables
pub mod tables;
/// Implementation of metadata tokens
pub mod token;
/// A loaded module implementing [`source::MetadataSource`]
pub mod view;
