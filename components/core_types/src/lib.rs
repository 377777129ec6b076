//! Core script value types and error handling.
//!
//! This crate provides the foundational types shared by the object model and
//! the call-site linker: the value representation stored in object slots, the
//! type tags used to pick typed accessors, and script-visible errors.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of script values
//! - [`TypeTag`] - Storage representation lattice (`Int` ⊂ `Number` ⊂ `Object`)
//! - [`AccessorPair`] - Getter/setter functions backing an accessor property
//! - [`JsError`] - Script errors raised by linking and invocation
//! - [`ErrorKind`] - Types of script errors
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, JsError, TypeTag, Value};
//!
//! let num = Value::Smi(42);
//! assert!(num.is_truthy());
//! assert_eq!(num.type_tag(), TypeTag::Int);
//!
//! let error = JsError::reference_error("not.defined", &["x"]);
//! assert_eq!(error.kind, ErrorKind::ReferenceError);
//! assert_eq!(error.message, "\"x\" is not defined");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
pub mod messages;
mod value;

pub use error::{ErrorKind, JsError};
pub use value::{AccessorPair, TypeTag, Value};
