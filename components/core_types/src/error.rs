//! Script error types.
//!
//! Errors raised while linking or invoking property accessors. They are
//! surfaced to scripts as catchable error objects by the caller.

use std::fmt;

use thiserror::Error;

use crate::messages;

/// The kind of script error.
///
/// These correspond to the built-in error constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Syntax error in script code
    SyntaxError,
    /// Type error (e.g., calling a non-function)
    TypeError,
    /// Reference to an undeclared variable
    ReferenceError,
    /// Value out of allowed range
    RangeError,
    /// Internal engine error
    InternalError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::InternalError => "InternalError",
        };
        f.write_str(name)
    }
}

/// A script error with its message key and formatted message.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, JsError};
///
/// let error = JsError::type_error("not.a.function", &["o.f"]);
/// assert_eq!(error.kind, ErrorKind::TypeError);
/// assert_eq!(error.key, "not.a.function");
/// assert_eq!(error.to_string(), "TypeError: o.f is not a function");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Message key the error was raised with
    pub key: &'static str,
    /// Human-readable error message
    pub message: String,
}

impl JsError {
    /// Create an error of `kind` from a message key and its arguments
    pub fn new(kind: ErrorKind, key: &'static str, args: &[&str]) -> Self {
        Self {
            kind,
            key,
            message: messages::format(key, args),
        }
    }

    /// Create a `ReferenceError`
    pub fn reference_error(key: &'static str, args: &[&str]) -> Self {
        Self::new(ErrorKind::ReferenceError, key, args)
    }

    /// Create a `TypeError`
    pub fn type_error(key: &'static str, args: &[&str]) -> Self {
        Self::new(ErrorKind::TypeError, key, args)
    }
}
