//! Property descriptors.
//!
//! A [`Property`] describes one named slot of a property map: where the value
//! lives, its attributes and its current storage representation.

use core_types::TypeTag;

bitflags::bitflags! {
    /// Property attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// Value can be changed by assignment
        const WRITABLE = 1 << 0;
        /// Property shows up in enumeration
        const ENUMERABLE = 1 << 1;
        /// Property can be deleted or have its attributes changed
        const CONFIGURABLE = 1 << 2;
        /// Slot holds a getter/setter pair instead of a value
        const ACCESSOR = 1 << 3;
    }
}

impl Default for PropertyFlags {
    /// Plain assignment-created property: writable, enumerable, configurable.
    fn default() -> Self {
        Self::WRITABLE | Self::ENUMERABLE | Self::CONFIGURABLE
    }
}

/// Location of a property value inside a script object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Index into the fixed in-object slots
    Embedded(usize),
    /// Index into the growable overflow ("spill") array
    Spill(usize),
}

impl Slot {
    /// Raw index within the slot's storage kind
    pub fn index(self) -> usize {
        match self {
            Slot::Embedded(index) | Slot::Spill(index) => index,
        }
    }

    /// Returns whether this slot lives in overflow storage
    pub fn is_spill(self) -> bool {
        matches!(self, Slot::Spill(_))
    }
}

/// Immutable descriptor of a named slot.
///
/// Two properties with identical fields are interchangeable; the transition
/// cache of [`PropertyMap`](crate::PropertyMap) relies on that.
///
/// # Example
///
/// ```
/// use core_types::TypeTag;
/// use object_model::{Property, PropertyFlags, Slot};
///
/// let x = Property::new("x", PropertyFlags::default(), Slot::Embedded(0), TypeTag::Int);
/// assert!(x.is_writable());
/// assert!(x.can_change_type());
/// assert!(!x.with_representation(TypeTag::Object).can_change_type());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    key: String,
    flags: PropertyFlags,
    slot: Slot,
    representation: TypeTag,
}

impl Property {
    /// Create a property descriptor
    pub fn new(key: impl Into<String>, flags: PropertyFlags, slot: Slot, representation: TypeTag) -> Self {
        Self {
            key: key.into(),
            flags,
            slot,
            representation,
        }
    }

    /// Property name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Attribute flags
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Storage location
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Current storage representation of the slot
    pub fn representation(&self) -> TypeTag {
        self.representation
    }

    /// Returns whether assignment may change the value
    pub fn is_writable(&self) -> bool {
        self.flags.contains(PropertyFlags::WRITABLE)
    }

    /// Returns whether the property is visible to enumeration
    pub fn is_enumerable(&self) -> bool {
        self.flags.contains(PropertyFlags::ENUMERABLE)
    }

    /// Returns whether the property may be deleted
    pub fn is_configurable(&self) -> bool {
        self.flags.contains(PropertyFlags::CONFIGURABLE)
    }

    /// Returns whether the slot holds a getter/setter pair
    pub fn is_accessor(&self) -> bool {
        self.flags.contains(PropertyFlags::ACCESSOR)
    }

    /// Returns whether writes dispatch to a user setter function
    pub fn has_setter_function(&self) -> bool {
        self.is_accessor()
    }

    /// Returns whether the slot representation may still widen.
    ///
    /// Accessor slots always hold a pair and never widen.
    pub fn can_change_type(&self) -> bool {
        !self.is_accessor() && self.representation.can_widen()
    }

    /// Copy of this property with another representation
    pub fn with_representation(&self, representation: TypeTag) -> Property {
        Property {
            representation,
            ..self.clone()
        }
    }

    /// Copy of this property with other attribute flags
    pub fn with_flags(&self, flags: PropertyFlags) -> Property {
        Property {
            flags,
            ..self.clone()
        }
    }
}
