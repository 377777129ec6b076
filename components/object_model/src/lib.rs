//! Object Model - property maps and dynamic object storage
//!
//! This component provides:
//! - Immutable, transition-cached property maps describing object layouts
//! - Script objects with embedded slots and block-grown overflow storage
//! - An object heap owning the trusted global object of a context
//! - Property lookup along prototype and scope chains
//! - Property-added notifications for shape listeners
//!
//! # Example
//!
//! ```
//! use core_types::Value;
//! use object_model::{ObjectHeap, PropertyFlags, Slot};
//!
//! let mut heap = ObjectHeap::default();
//! let obj = heap.allocate_object(None);
//! let x = heap.define_property(obj, "x", Value::Smi(1), PropertyFlags::default());
//!
//! assert_eq!(x.slot(), Slot::Embedded(0));
//! assert_eq!(heap.get_own(obj, "x"), Some(Value::Smi(1)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod find;
pub mod heap;
pub mod listener;
pub mod property;
pub mod property_map;
pub mod script_object;

// Re-export main types
pub use config::ObjectModelConfig;
pub use find::{find_property, FindProperty};
pub use heap::ObjectHeap;
pub use listener::{PropertyListener, RecordingListener};
pub use property::{Property, PropertyFlags, Slot};
pub use property_map::{MapGuard, PropertyMap, MAX_SPILL_SLOTS};
pub use script_object::{
    grown_spill_length, ObjectFlags, ObjectId, ScriptObject, EMBED_SIZE, SPILL_RATE,
};
