//! Call-site descriptors
//!
//! Describe a property access site as emitted by the compiler: the
//! operation, the property name and the linking flags.

use std::fmt;

use core_types::TypeTag;

/// Operation performed at a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Property read
    GetProperty,
    /// Property write
    SetProperty,
    /// Method call: property read followed by an invocation
    CallMethod,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::GetProperty => f.write_str("getProp"),
            Operation::SetProperty => f.write_str("setProp"),
            Operation::CallMethod => f.write_str("callMethod"),
        }
    }
}

bitflags::bitflags! {
    /// Linking flags of a call site.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CallSiteFlags: u8 {
        /// Site is in strict-mode code
        const STRICT = 1 << 0;
        /// Site resolves an identifier against the scope chain
        const SCOPE = 1 << 1;
        /// Scope chain layout is known stable, guards may be elided
        const FAST_SCOPE = 1 << 2;
    }
}

/// Immutable description of one call site.
///
/// # Example
///
/// ```
/// use core_types::TypeTag;
/// use linker::{CallSiteDescriptor, Operation};
///
/// let desc = CallSiteDescriptor::set("x", TypeTag::Int).scope().strict();
/// assert_eq!(desc.operation(), Operation::SetProperty);
/// assert!(desc.is_scope() && desc.is_strict());
/// assert!(!desc.is_fast_scope());
/// assert_eq!(desc.to_string(), "dyn:setProp:x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSiteDescriptor {
    operation: Operation,
    name: String,
    flags: CallSiteFlags,
    value_type: TypeTag,
}

impl CallSiteDescriptor {
    /// Create a descriptor without flags
    pub fn new(operation: Operation, name: impl Into<String>, value_type: TypeTag) -> Self {
        Self {
            operation,
            name: name.into(),
            flags: CallSiteFlags::empty(),
            value_type,
        }
    }

    /// Descriptor of a generic property read
    pub fn get(name: impl Into<String>) -> Self {
        Self::new(Operation::GetProperty, name, TypeTag::Object)
    }

    /// Descriptor of a property write with the given value type
    pub fn set(name: impl Into<String>, value_type: TypeTag) -> Self {
        Self::new(Operation::SetProperty, name, value_type)
    }

    /// Descriptor of a method call
    pub fn call(name: impl Into<String>) -> Self {
        Self::new(Operation::CallMethod, name, TypeTag::Object)
    }

    /// Adds linking flags
    pub fn with_flags(mut self, flags: CallSiteFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Marks the site as strict-mode code
    pub fn strict(self) -> Self {
        self.with_flags(CallSiteFlags::STRICT)
    }

    /// Marks the site as a scope identifier access
    pub fn scope(self) -> Self {
        self.with_flags(CallSiteFlags::SCOPE)
    }

    /// Marks the site as a fast-scope identifier access (implies scope)
    pub fn fast_scope(self) -> Self {
        self.with_flags(CallSiteFlags::SCOPE | CallSiteFlags::FAST_SCOPE)
    }

    /// The operation
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The property name operand
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The linking flags
    pub fn flags(&self) -> CallSiteFlags {
        self.flags
    }

    /// Value type the site passes (set) or expects (get)
    pub fn value_type(&self) -> TypeTag {
        self.value_type
    }

    /// Returns whether the site is strict-mode code
    pub fn is_strict(&self) -> bool {
        self.flags.contains(CallSiteFlags::STRICT)
    }

    /// Returns whether the site is a scope access
    pub fn is_scope(&self) -> bool {
        self.flags.contains(CallSiteFlags::SCOPE)
    }

    /// Returns whether the site is a fast-scope access
    pub fn is_fast_scope(&self) -> bool {
        self.flags.contains(CallSiteFlags::FAST_SCOPE)
    }
}

impl fmt::Display for CallSiteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn:{}:{}", self.operation, self.name)
    }
}
