//! Script value representation.
//!
//! This module provides the `Value` enum stored in object slots and passed
//! through accessors, together with the `TypeTag` lattice used to select
//! typed accessor variants.

use std::fmt;
use std::rc::Rc;

/// Storage representation of a value.
///
/// Tags are ordered by generality: every `Int` fits a `Number` slot and every
/// value fits an `Object` slot. A slot can only ever widen along this order.
///
/// # Examples
///
/// ```
/// use core_types::TypeTag;
///
/// assert!(TypeTag::Int.fits(TypeTag::Number));
/// assert!(!TypeTag::Object.fits(TypeTag::Int));
/// assert_eq!(TypeTag::Int.widen(TypeTag::Number), TypeTag::Number);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    /// Small integer
    Int,
    /// Double-precision number
    Number,
    /// Any value
    Object,
}

impl TypeTag {
    /// Returns whether a value of this tag can be stored in a slot of `slot` representation.
    pub fn fits(self, slot: TypeTag) -> bool {
        self <= slot
    }

    /// Returns the narrowest tag able to hold both `self` and `other`.
    pub fn widen(self, other: TypeTag) -> TypeTag {
        self.max(other)
    }

    /// Returns whether a slot of this representation may still widen.
    pub fn can_widen(self) -> bool {
        self != TypeTag::Object
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Int => write!(f, "int"),
            TypeTag::Number => write!(f, "number"),
            TypeTag::Object => write!(f, "object"),
        }
    }
}

/// Getter and setter functions backing an accessor property.
///
/// Either half may be `Value::Undefined` when the property only has the
/// other one.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorPair {
    /// Function invoked on read
    pub getter: Value,
    /// Function invoked on write
    pub setter: Value,
}

impl AccessorPair {
    /// Create a new accessor pair
    pub fn new(getter: Value, setter: Value) -> Self {
        Self { getter, setter }
    }

    /// Returns whether a setter function is present
    pub fn has_setter(&self) -> bool {
        !matches!(self.setter, Value::Undefined)
    }

    /// Returns whether a getter function is present
    pub fn has_getter(&self) -> bool {
        !matches!(self.getter, Value::Undefined)
    }
}

/// Represents any script value.
///
/// Primitive values are stored inline, objects are referenced by their heap
/// index and functions by their registered name.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let undefined = Value::Undefined;
/// let number = Value::Smi(42);
/// let float = Value::Double(3.5);
///
/// assert!(!undefined.is_truthy());
/// assert!(number.is_truthy());
/// assert_eq!(float.type_of(), "number");
/// ```
#[derive(Clone)]
pub enum Value {
    /// The undefined value
    Undefined,
    /// The null value
    Null,
    /// Boolean (true or false)
    Boolean(bool),
    /// Small integer
    Smi(i32),
    /// IEEE 754 double-precision floating point
    Double(f64),
    /// String value
    String(std::string::String),
    /// Heap-allocated object (referenced by heap index)
    HeapObject(usize),
    /// Compiled function, referenced by its registered name
    NativeFunction(std::string::String),
    /// Getter/setter pair held in the slot of an accessor property.
    /// Never observable by scripts.
    Accessor(Rc<AccessorPair>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Smi(n) => f.debug_tuple("Smi").field(n).finish(),
            Value::Double(n) => f.debug_tuple("Double").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::HeapObject(id) => f.debug_tuple("HeapObject").field(id).finish(),
            Value::NativeFunction(name) => f.debug_tuple("NativeFunction").field(name).finish(),
            Value::Accessor(pair) => f
                .debug_struct("Accessor")
                .field("getter", &pair.getter)
                .field("setter", &pair.setter)
                .finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Smi(a), Value::Smi(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::HeapObject(a), Value::HeapObject(b)) => a == b,
            (Value::NativeFunction(a), Value::NativeFunction(b)) => a == b,
            (Value::Accessor(a), Value::Accessor(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Returns whether this value is truthy.
    ///
    /// `undefined`, `null`, `false`, `0`, `NaN` and the empty string are
    /// falsy; everything else is truthy.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert!(!Value::Undefined.is_truthy());
    /// assert!(!Value::Smi(0).is_truthy());
    /// assert!(!Value::Double(f64::NAN).is_truthy());
    /// assert!(Value::HeapObject(0).is_truthy());
    /// ```
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Smi(n) => *n != 0,
            Value::Double(n) => !n.is_nan() && *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::HeapObject(_) | Value::NativeFunction(_) | Value::Accessor(_) => true,
        }
    }

    /// Returns the `typeof` result for this value.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Smi(_) | Value::Double(_) => "number",
            Value::String(_) => "string",
            Value::HeapObject(_) | Value::Accessor(_) => "object",
            Value::NativeFunction(_) => "function",
        }
    }

    /// Returns the narrowest storage representation able to hold this value.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::{TypeTag, Value};
    ///
    /// assert_eq!(Value::Smi(1).type_tag(), TypeTag::Int);
    /// assert_eq!(Value::Double(0.5).type_tag(), TypeTag::Number);
    /// assert_eq!(Value::Null.type_tag(), TypeTag::Object);
    /// ```
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Smi(_) => TypeTag::Int,
            Value::Double(_) => TypeTag::Number,
            _ => TypeTag::Object,
        }
    }

    /// Returns whether this value can be invoked as a function
    pub fn is_function(&self) -> bool {
        matches!(self, Value::NativeFunction(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Smi(n) => write!(f, "{}", n),
            Value::Double(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if n.is_sign_positive() {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::HeapObject(_) | Value::Accessor(_) => write!(f, "[object Object]"),
            Value::NativeFunction(name) => write!(f, "function {}() {{ [native code] }}", name),
        }
    }
}
