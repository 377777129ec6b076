//! Object model configuration

use core_types::TypeTag;
use serde::{Deserialize, Serialize};

/// Storage configuration for an object heap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectModelConfig {
    /// Store every property with the generic `Object` representation.
    ///
    /// Slots then never widen, which lets fast-scope call sites skip their
    /// map guard.
    pub fields_only: bool,
}

impl ObjectModelConfig {
    /// Create default configuration (dual fields, widening enabled)
    pub fn new() -> Self {
        Self { fields_only: false }
    }

    /// Create configuration with object-typed fields only
    pub fn fields_only() -> Self {
        Self { fields_only: true }
    }

    /// Representation a new slot receives for a value of tag `tag`
    pub fn representation_for(&self, tag: TypeTag) -> TypeTag {
        if self.fields_only {
            TypeTag::Object
        } else {
            tag
        }
    }
}

impl Default for ObjectModelConfig {
    fn default() -> Self {
        Self::new()
    }
}
