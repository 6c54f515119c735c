//! Method bodies and the flag sets of method definitions.
//!
//! # Key Types
//! - [`MethodBody`]: header, IL code and exception clauses of one method
//! - [`ExceptionHandler`]: a raw exception handling clause
//! - [`MemberAccess`], [`MethodModifiers`], [`MethodImplCodeType`], [`MethodImplOptions`]

mod body;
mod exceptions;
mod types;

pub use body::*;
pub use exceptions::*;
pub use types::*;
