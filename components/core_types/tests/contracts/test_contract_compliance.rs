//! Contract compliance tests for core_types
//!
//! These tests pin the public surface the object model and linker rely on.

use core_types::{AccessorPair, ErrorKind, JsError, TypeTag, Value};

#[cfg(test)]
mod value_contract_tests {
    use super::*;

    /// Contract: slot values cover every primitive plus object handles
    #[test]
    fn test_value_variants() {
        let _: Vec<Value> = vec![
            Value::Undefined,
            Value::Null,
            Value::Boolean(true),
            Value::Smi(i32::MAX),
            Value::Double(f64::INFINITY),
            Value::String("s".into()),
            Value::HeapObject(0),
            Value::NativeFunction("f".into()),
        ];
    }

    /// Contract: HeapObject holds an index, not a pointer
    #[test]
    fn test_heap_object_is_index() {
        let value = Value::HeapObject(usize::MAX);
        assert_eq!(value, Value::HeapObject(usize::MAX));
    }

    /// Contract: values are cloneable
    #[test]
    fn test_value_clone() {
        let value = Value::String("text".into());
        assert_eq!(value.clone(), value);
    }

    /// Contract: type tags order Int < Number < Object
    #[test]
    fn test_type_tag_order() {
        assert!(TypeTag::Int < TypeTag::Number);
        assert!(TypeTag::Number < TypeTag::Object);
    }
}

#[cfg(test)]
mod accessor_contract_tests {
    use super::*;

    /// Contract: Undefined marks a missing accessor half
    #[test]
    fn test_undefined_half_is_missing() {
        let pair = AccessorPair::new(Value::Undefined, Value::Undefined);
        assert!(!pair.has_getter());
        assert!(!pair.has_setter());
    }
}

#[cfg(test)]
mod error_contract_tests {
    use super::*;

    /// Contract: errors carry kind, message key and formatted message
    #[test]
    fn test_error_fields() {
        let error = JsError::reference_error("not.defined", &["x"]);
        let JsError { kind, key, message } = error;
        assert_eq!(kind, ErrorKind::ReferenceError);
        assert_eq!(key, "not.defined");
        assert!(message.contains('x'));
    }

    /// Contract: JsError implements std::error::Error
    #[test]
    fn test_error_trait() {
        let error: Box<dyn std::error::Error> =
            Box::new(JsError::type_error("not.a.function", &["f"]));
        assert_eq!(error.to_string(), "TypeError: f is not a function");
    }
}
