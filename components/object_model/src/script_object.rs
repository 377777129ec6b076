//! Script object representation
//!
//! Provides the per-instance storage of dynamic objects: a fixed block of
//! embedded slots, a lazily allocated overflow array, and the property map
//! describing both.

use std::sync::Arc;

use core_types::{TypeTag, Value};
use tracing::trace;

use crate::property::{Property, PropertyFlags, Slot};
use crate::property_map::PropertyMap;

/// Number of in-object slots
pub const EMBED_SIZE: usize = 8;

/// Block size overflow storage grows by
pub const SPILL_RATE: usize = 8;

/// Overflow length needed to address `index`, rounded up to whole blocks.
///
/// ```
/// use object_model::grown_spill_length;
///
/// assert_eq!(grown_spill_length(0), 8);
/// assert_eq!(grown_spill_length(8), 16);
/// assert_eq!(grown_spill_length(15), 16);
/// ```
pub fn grown_spill_length(index: usize) -> usize {
    (index + SPILL_RATE) / SPILL_RATE * SPILL_RATE
}

/// Handle of an object inside an [`ObjectHeap`](crate::ObjectHeap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

impl ObjectId {
    /// Extracts the object handle from a value, if it references an object
    pub fn from_value(value: &Value) -> Option<ObjectId> {
        match value {
            Value::HeapObject(index) => Some(ObjectId(*index)),
            _ => None,
        }
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::HeapObject(id.0)
    }
}

bitflags::bitflags! {
    /// Object-level flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ObjectFlags: u8 {
        /// Participates in the scope chain (global or function scope)
        const SCOPE = 1 << 0;
        /// New properties may be added
        const EXTENSIBLE = 1 << 1;
    }
}

/// Dynamic object with map-described slot storage
#[derive(Debug)]
pub struct ScriptObject {
    map: Arc<PropertyMap>,
    embed: [Value; EMBED_SIZE],
    /// Absent until the first overflow property is stored
    spill: Option<Vec<Value>>,
    proto: Option<ObjectId>,
    flags: ObjectFlags,
    class_name: &'static str,
}

impl ScriptObject {
    /// Create an object with the given map and parent
    pub fn new(
        map: Arc<PropertyMap>,
        proto: Option<ObjectId>,
        flags: ObjectFlags,
        class_name: &'static str,
    ) -> Self {
        Self {
            map,
            embed: std::array::from_fn(|_| Value::Undefined),
            spill: None,
            proto,
            flags,
            class_name,
        }
    }

    /// Current property map
    pub fn map(&self) -> &Arc<PropertyMap> {
        &self.map
    }

    /// Installs a new property map
    pub fn set_map(&mut self, map: Arc<PropertyMap>) {
        self.map = map;
    }

    /// Parent in the prototype / scope chain
    pub fn proto(&self) -> Option<ObjectId> {
        self.proto
    }

    /// Returns whether this is a scope object
    pub fn is_scope(&self) -> bool {
        self.flags.contains(ObjectFlags::SCOPE)
    }

    /// Returns whether new properties may be added
    pub fn is_extensible(&self) -> bool {
        self.flags.contains(ObjectFlags::EXTENSIBLE)
    }

    /// Forbids adding properties from now on.
    ///
    /// Also moves the object to the non-extensible variant of its map.
    pub fn prevent_extensions(&mut self) {
        self.map = self.map.prevent_extensions();
        self.flags.remove(ObjectFlags::EXTENSIBLE);
    }

    /// Class name used in error messages
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Allocated overflow length
    pub fn spill_capacity(&self) -> usize {
        self.spill.as_ref().map_or(0, Vec::len)
    }

    /// Looks up an own property descriptor
    pub fn find_own(&self, key: &str) -> Option<&Property> {
        self.map.find_property(key)
    }

    /// Reads a slot. Unallocated overflow slots read as `undefined`.
    pub fn get_slot(&self, slot: Slot) -> Value {
        match slot {
            Slot::Embedded(index) => self.embed[index].clone(),
            Slot::Spill(index) => self
                .spill
                .as_ref()
                .and_then(|spill| spill.get(index))
                .cloned()
                .unwrap_or(Value::Undefined),
        }
    }

    /// Writes a slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is outside the allocated storage.
    pub fn set_slot(&mut self, slot: Slot, value: Value) {
        match slot {
            Slot::Embedded(index) => {
                assert!(index < EMBED_SIZE, "embedded slot {} out of range", index);
                self.embed[index] = value;
            }
            Slot::Spill(index) => {
                let spill = self
                    .spill
                    .as_mut()
                    .filter(|spill| index < spill.len());
                match spill {
                    Some(spill) => spill[index] = value,
                    None => panic!("overflow slot {} written before allocation", index),
                }
            }
        }
    }

    /// Installs `new_map` if the object still has `old_map`.
    fn transition(&mut self, old_map: &Arc<PropertyMap>, new_map: &Arc<PropertyMap>) -> bool {
        if !Arc::ptr_eq(&self.map, old_map) {
            return false;
        }
        self.map = Arc::clone(new_map);
        true
    }

    /// Stores a new embedded property, transitioning `old_map` → `new_map`.
    ///
    /// # Returns
    ///
    /// `false` without touching the object if its map is no longer `old_map`.
    pub fn set_embed(
        &mut self,
        old_map: &Arc<PropertyMap>,
        new_map: &Arc<PropertyMap>,
        index: usize,
        value: Value,
    ) -> bool {
        if !self.transition(old_map, new_map) {
            return false;
        }
        self.set_slot(Slot::Embedded(index), value);
        true
    }

    /// Stores a new overflow property into already allocated storage.
    pub fn set_spill(
        &mut self,
        old_map: &Arc<PropertyMap>,
        new_map: &Arc<PropertyMap>,
        index: usize,
        value: Value,
    ) -> bool {
        if self.spill_capacity() <= index || !self.transition(old_map, new_map) {
            return false;
        }
        self.set_slot(Slot::Spill(index), value);
        true
    }

    /// Stores the first overflow property, allocating the first block.
    pub fn set_spill_with_new(
        &mut self,
        old_map: &Arc<PropertyMap>,
        new_map: &Arc<PropertyMap>,
        index: usize,
        value: Value,
    ) -> bool {
        if !self.transition(old_map, new_map) {
            return false;
        }
        self.grow_spill(grown_spill_length(index));
        self.set_slot(Slot::Spill(index), value);
        true
    }

    /// Stores a new overflow property after growing storage to `new_length`.
    ///
    /// The map transition and the resized array are installed together.
    pub fn set_spill_with_grow(
        &mut self,
        old_map: &Arc<PropertyMap>,
        new_map: &Arc<PropertyMap>,
        index: usize,
        new_length: usize,
        value: Value,
    ) -> bool {
        debug_assert!(index < new_length);
        if !self.transition(old_map, new_map) {
            return false;
        }
        self.grow_spill(new_length);
        self.set_slot(Slot::Spill(index), value);
        true
    }

    /// Grows overflow storage to at least `length` slots.
    pub fn grow_spill(&mut self, length: usize) {
        let spill = self.spill.get_or_insert_with(Vec::new);
        if spill.len() < length {
            trace!(from = spill.len(), to = length, "growing overflow storage");
            spill.resize(length, Value::Undefined);
        }
    }

    /// Adds an overflow property directly, growing storage as needed.
    ///
    /// Used for properties created on the global object by scope writes.
    pub fn add_spill(&mut self, key: &str, representation: TypeTag) -> Property {
        let index = self.map.next_spill();
        let property = Property::new(key, PropertyFlags::default(), Slot::Spill(index), representation);
        let new_map = self.map.add_property(property.clone());
        if self.spill_capacity() <= index {
            self.grow_spill(grown_spill_length(index));
        }
        self.map = new_map;
        property
    }

    /// Own property names in addition order
    pub fn own_keys(&self) -> Vec<String> {
        self.map.properties().map(|p| p.key().to_string()).collect()
    }
}
