//! Unit tests for JsError and ErrorKind

use core_types::{ErrorKind, JsError};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::SyntaxError.to_string(), "SyntaxError");
        assert_eq!(ErrorKind::TypeError.to_string(), "TypeError");
        assert_eq!(ErrorKind::ReferenceError.to_string(), "ReferenceError");
        assert_eq!(ErrorKind::RangeError.to_string(), "RangeError");
        assert_eq!(ErrorKind::InternalError.to_string(), "InternalError");
    }

    #[test]
    fn test_error_kind_is_copy() {
        let kind = ErrorKind::TypeError;
        let copy = kind;
        assert_eq!(kind, copy);
    }
}

#[cfg(test)]
mod js_error_tests {
    use super::*;

    #[test]
    fn test_reference_error_constructor() {
        let error = JsError::reference_error("not.defined", &["counter"]);
        assert_eq!(error.kind, ErrorKind::ReferenceError);
        assert_eq!(error.key, "not.defined");
        assert_eq!(error.message, "\"counter\" is not defined");
    }

    #[test]
    fn test_type_error_constructor() {
        let error = JsError::type_error("object.non.extensible", &["p", "Object"]);
        assert_eq!(error.kind, ErrorKind::TypeError);
        assert_eq!(
            error.message,
            "Cannot add new property \"p\" to non-extensible Object"
        );
    }

    #[test]
    fn test_generic_constructor() {
        let error = JsError::new(ErrorKind::RangeError, "custom.key", &[]);
        assert_eq!(error.kind, ErrorKind::RangeError);
        assert_eq!(error.message, "custom.key");
    }

    #[test]
    fn test_display_includes_kind() {
        let error = JsError::type_error("not.a.function", &["f"]);
        assert_eq!(error.to_string(), "TypeError: f is not a function");
    }

    #[test]
    fn test_errors_compare_by_value() {
        let a = JsError::reference_error("not.defined", &["x"]);
        let b = JsError::reference_error("not.defined", &["x"]);
        let c = JsError::reference_error("not.defined", &["y"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_error_propagates_with_question_mark() {
        fn fails() -> Result<(), JsError> {
            Err(JsError::type_error("property.not.writable", &["k", "Object"]))
        }
        fn outer() -> Result<u8, JsError> {
            fails()?;
            Ok(1)
        }
        assert_eq!(outer().unwrap_err().key, "property.not.writable");
    }
}
