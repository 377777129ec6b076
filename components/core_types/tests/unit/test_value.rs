//! Unit tests for Value, TypeTag and AccessorPair

use std::rc::Rc;

use core_types::{AccessorPair, TypeTag, Value};

#[cfg(test)]
mod truthiness_tests {
    use super::*;

    #[test]
    fn test_falsy_values() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Smi(0).is_truthy());
        assert!(!Value::Double(0.0).is_truthy());
        assert!(!Value::Double(f64::NAN).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
    }

    #[test]
    fn test_truthy_values() {
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Smi(-1).is_truthy());
        assert!(Value::Double(0.5).is_truthy());
        assert!(Value::String("a".into()).is_truthy());
        assert!(Value::HeapObject(0).is_truthy());
        assert!(Value::NativeFunction("f".into()).is_truthy());
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_type_of() {
        assert_eq!(Value::Undefined.type_of(), "undefined");
        assert_eq!(Value::Null.type_of(), "object");
        assert_eq!(Value::Boolean(true).type_of(), "boolean");
        assert_eq!(Value::Smi(1).type_of(), "number");
        assert_eq!(Value::Double(1.5).type_of(), "number");
        assert_eq!(Value::String("s".into()).type_of(), "string");
        assert_eq!(Value::HeapObject(3).type_of(), "object");
        assert_eq!(Value::NativeFunction("f".into()).type_of(), "function");
    }

    #[test]
    fn test_type_tag_of_values() {
        assert_eq!(Value::Smi(1).type_tag(), TypeTag::Int);
        assert_eq!(Value::Double(1.5).type_tag(), TypeTag::Number);
        assert_eq!(Value::Null.type_tag(), TypeTag::Object);
        assert_eq!(Value::String("s".into()).type_tag(), TypeTag::Object);
    }

    #[test]
    fn test_only_native_functions_are_callable() {
        assert!(Value::NativeFunction("f".into()).is_function());
        assert!(!Value::HeapObject(0).is_function());
        assert!(!Value::String("f".into()).is_function());
    }
}

#[cfg(test)]
mod type_tag_tests {
    use super::*;

    #[test]
    fn test_widening_is_monotone() {
        assert_eq!(TypeTag::Int.widen(TypeTag::Number), TypeTag::Number);
        assert_eq!(TypeTag::Number.widen(TypeTag::Int), TypeTag::Number);
        assert_eq!(TypeTag::Number.widen(TypeTag::Object), TypeTag::Object);
        assert_eq!(TypeTag::Int.widen(TypeTag::Int), TypeTag::Int);
    }

    #[test]
    fn test_fits() {
        assert!(TypeTag::Int.fits(TypeTag::Number));
        assert!(TypeTag::Number.fits(TypeTag::Object));
        assert!(!TypeTag::Object.fits(TypeTag::Number));
    }

    #[test]
    fn test_can_widen() {
        assert!(TypeTag::Int.can_widen());
        assert!(TypeTag::Number.can_widen());
        assert!(!TypeTag::Object.can_widen());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeTag::Int.to_string(), "int");
        assert_eq!(TypeTag::Number.to_string(), "number");
        assert_eq!(TypeTag::Object.to_string(), "object");
    }
}

#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_display_primitives() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::Smi(-7).to_string(), "-7");
        assert_eq!(Value::Double(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Double(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_display_objects() {
        assert_eq!(Value::HeapObject(1).to_string(), "[object Object]");
        assert_eq!(
            Value::NativeFunction("f".into()).to_string(),
            "function f() { [native code] }"
        );
    }
}

#[cfg(test)]
mod accessor_pair_tests {
    use super::*;

    #[test]
    fn test_pair_with_both_halves() {
        let pair = AccessorPair::new(
            Value::NativeFunction("get".into()),
            Value::NativeFunction("set".into()),
        );
        assert!(pair.has_getter());
        assert!(pair.has_setter());
    }

    #[test]
    fn test_accessor_value_is_object() {
        let value = Value::Accessor(Rc::new(AccessorPair::new(Value::Undefined, Value::Undefined)));
        assert_eq!(value.type_tag(), TypeTag::Object);
        assert_eq!(value.type_of(), "object");
    }
}

#[cfg(test)]
mod equality_tests {
    use super::*;

    #[test]
    fn test_different_variants_not_equal() {
        assert_ne!(Value::Smi(1), Value::Double(1.0));
        assert_ne!(Value::Undefined, Value::Null);
        assert_ne!(Value::HeapObject(1), Value::HeapObject(2));
    }

    #[test]
    fn test_nan_not_equal_to_itself() {
        assert_ne!(Value::Double(f64::NAN), Value::Double(f64::NAN));
    }
}
