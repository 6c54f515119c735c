//! Row readers for the physical metadata tables of the `#~` stream.
//!
//! Each modelled table lives in its own module holding the raw row type and its
//! [`RowReadable`] implementation, plus the flag constants of the table where ECMA-335
//! defines any. Rows keep heap indices and coded indices unresolved; resolving them to
//! names and types is the job of the disassembler.
//!
//! # Reference
//! * ECMA-335 II.22

mod types;
pub use types::*;

mod assembly;
mod assemblyref;
mod classlayout;
mod constant;
mod customattribute;
mod event;
mod eventmap;
mod field;
mod genericparam;
mod implmap;
mod memberref;
mod methoddef;
mod methodimpl;
mod methodsemantics;
mod methodspec;
mod module;
mod moduleref;
mod nestedclass;
mod param;
mod property;
mod propertymap;
mod standalonesig;
mod typedef;
mod typeref;
mod typespec;

pub use assembly::{AssemblyFlags, AssemblyHashAlgorithm, AssemblyRaw};
pub use assemblyref::AssemblyRefRaw;
pub use classlayout::ClassLayoutRaw;
pub use constant::ConstantRaw;
pub use customattribute::CustomAttributeRaw;
pub use event::{EventAttributes, EventRaw};
pub use eventmap::EventMapRaw;
pub use field::{FieldAttributes, FieldRaw};
pub use genericparam::{GenericParamAttributes, GenericParamRaw};
pub use implmap::{ImplMapRaw, PInvokeAttributes};
pub use memberref::MemberRefRaw;
pub use methoddef::MethodDefRaw;
pub use methodimpl::MethodImplRaw;
pub use methodsemantics::{MethodSemanticsAttributes, MethodSemanticsRaw};
pub use methodspec::MethodSpecRaw;
pub use module::ModuleRaw;
pub use moduleref::ModuleRefRaw;
pub use nestedclass::NestedClassRaw;
pub use param::{ParamAttributes, ParamRaw};
pub use property::{PropertyAttributes, PropertyRaw};
pub use propertymap::PropertyMapRaw;
pub use standalonesig::StandAloneSigRaw;
pub use typedef::{TypeAttributes, TypeDefRaw};
pub use typeref::TypeRefRaw;
pub use typespec::TypeSpecRaw;
