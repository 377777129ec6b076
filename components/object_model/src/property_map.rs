//! Property maps (object shapes).
//!
//! A property map describes the ordered set of properties shared by every
//! object pointing at it, enabling slot-indexed access and identity guards.
//! Maps are immutable; adding or removing a property yields a new map.
//! Additions are memoized in a per-map transition cache so objects gaining
//! the same properties in the same order end up sharing one map.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::trace;

use crate::property::{Property, Slot};
use crate::script_object::{ScriptObject, EMBED_SIZE};

/// Upper bound on overflow slot indices.
pub const MAX_SPILL_SLOTS: usize = u32::MAX as usize;

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

/// Immutable description of an object layout.
///
/// # Example
///
/// ```
/// use core_types::TypeTag;
/// use object_model::{Property, PropertyFlags, PropertyMap, Slot};
/// use std::sync::Arc;
///
/// let empty = PropertyMap::new_empty();
/// let x = Property::new("x", PropertyFlags::default(), Slot::Embedded(0), TypeTag::Object);
/// let with_x = empty.add_property(x.clone());
///
/// assert_eq!(with_x.find_property("x"), Some(&x));
/// assert!(Arc::ptr_eq(&with_x, &empty.add_property(x)));
/// ```
pub struct PropertyMap {
    id: u64,
    properties: IndexMap<String, Property, FxBuildHasher>,
    /// Next free embedded index; never decreases, removal leaves holes
    field_count: usize,
    /// Next free overflow index; never decreases
    spill_length: usize,
    extensible: bool,
    transitions: RwLock<FxHashMap<Property, Weak<PropertyMap>>>,
}

impl PropertyMap {
    /// Creates a map with no properties.
    pub fn new_empty() -> Arc<Self> {
        Arc::new(Self::with_layout(IndexMap::default(), 0, 0, true))
    }

    fn with_layout(
        properties: IndexMap<String, Property, FxBuildHasher>,
        field_count: usize,
        spill_length: usize,
        extensible: bool,
    ) -> Self {
        Self {
            id: NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed),
            properties,
            field_count,
            spill_length,
            extensible,
            transitions: RwLock::new(FxHashMap::default()),
        }
    }

    /// Unique identifier, for diagnostics
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns whether the map has no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Looks up a property by name.
    pub fn find_property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    /// Properties in addition order
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// Next free embedded slot index
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Number of overflow slots addressed by this map
    pub fn spill_length(&self) -> usize {
        self.spill_length
    }

    /// Returns whether objects with this map accept new properties
    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    /// Returns the next free embedded slot, if embedded capacity remains.
    pub fn next_embed(&self) -> Option<usize> {
        (self.field_count < EMBED_SIZE).then_some(self.field_count)
    }

    /// Returns the next free overflow slot.
    ///
    /// # Panics
    ///
    /// Panics when the overflow slot space is exhausted.
    pub fn next_spill(&self) -> usize {
        assert!(
            self.spill_length < MAX_SPILL_SLOTS,
            "overflow slot space exhausted"
        );
        self.spill_length
    }

    /// Adds a property, producing the successor map.
    ///
    /// Adding the same property to the same map twice returns the same
    /// successor as long as it is still alive somewhere.
    ///
    /// # Arguments
    ///
    /// * `property` - The property to add; its slot must be free in this map
    ///
    /// # Returns
    ///
    /// The map describing this layout plus `property`.
    pub fn add_property(self: &Arc<Self>, property: Property) -> Arc<PropertyMap> {
        if let Some(existing) = self
            .transitions
            .read()
            .get(&property)
            .and_then(Weak::upgrade)
        {
            return existing;
        }

        debug_assert!(
            !self.properties.contains_key(property.key()),
            "property {} already present",
            property.key()
        );

        let mut field_count = self.field_count;
        let mut spill_length = self.spill_length;
        match property.slot() {
            Slot::Embedded(index) => field_count = field_count.max(index + 1),
            Slot::Spill(index) => spill_length = spill_length.max(index + 1),
        }

        let mut properties = self.properties.clone();
        properties.insert(property.key().to_string(), property.clone());
        let successor = Arc::new(Self::with_layout(
            properties,
            field_count,
            spill_length,
            self.extensible,
        ));

        trace!(
            from = self.id,
            to = successor.id,
            key = property.key(),
            "property map transition"
        );
        let mut transitions = self.transitions.write();
        transitions.retain(|_, target| target.strong_count() > 0);
        transitions.insert(property, Arc::downgrade(&successor));
        successor
    }

    /// Removes a property, producing the successor map.
    ///
    /// Slot indices of the remaining properties are kept; the freed slot is
    /// not reused by this lineage.
    ///
    /// # Returns
    ///
    /// `None` if `key` is not present.
    pub fn remove_property(&self, key: &str) -> Option<Arc<PropertyMap>> {
        if !self.properties.contains_key(key) {
            return None;
        }
        let mut properties = self.properties.clone();
        properties.shift_remove(key);
        Some(Arc::new(Self::with_layout(
            properties,
            self.field_count,
            self.spill_length,
            self.extensible,
        )))
    }

    /// Replaces the descriptor of an existing property, keeping its position.
    ///
    /// # Returns
    ///
    /// `None` if no property named like `property` is present.
    pub fn replace_property(&self, property: Property) -> Option<Arc<PropertyMap>> {
        if !self.properties.contains_key(property.key()) {
            return None;
        }
        let mut properties = self.properties.clone();
        if let Some(slot) = properties.get_mut(property.key()) {
            *slot = property;
        }
        Some(Arc::new(Self::with_layout(
            properties,
            self.field_count,
            self.spill_length,
            self.extensible,
        )))
    }

    /// Returns the non-extensible counterpart of this map.
    ///
    /// The result is a distinct map, so identity guards taken on an
    /// extensible layout fail for objects that stopped accepting properties.
    pub fn prevent_extensions(self: &Arc<Self>) -> Arc<PropertyMap> {
        if !self.extensible {
            return Arc::clone(self);
        }
        trace!(from = self.id, "non-extensible map");
        Arc::new(Self::with_layout(
            self.properties.clone(),
            self.field_count,
            self.spill_length,
            false,
        ))
    }

    /// Returns a guard checking that an object still has exactly this map.
    pub fn identity_guard(self: &Arc<Self>) -> MapGuard {
        MapGuard {
            expected: Arc::clone(self),
        }
    }
}

/// Structural equality: same properties in the same order and same slot
/// counters. Identity is checked with `Arc::ptr_eq`.
impl PartialEq for PropertyMap {
    fn eq(&self, other: &Self) -> bool {
        self.field_count == other.field_count
            && self.spill_length == other.spill_length
            && self.extensible == other.extensible
            && self.properties.len() == other.properties.len()
            && self.properties.values().eq(other.properties.values())
    }
}

impl fmt::Debug for PropertyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMap")
            .field("id", &self.id)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("field_count", &self.field_count)
            .field("spill_length", &self.spill_length)
            .field("extensible", &self.extensible)
            .finish()
    }
}

/// Shape-identity predicate: passes while an object's map is the expected one.
#[derive(Debug, Clone)]
pub struct MapGuard {
    expected: Arc<PropertyMap>,
}

impl MapGuard {
    /// The map this guard expects
    pub fn map(&self) -> &Arc<PropertyMap> {
        &self.expected
    }

    /// Tests the guard against an object
    pub fn test(&self, object: &ScriptObject) -> bool {
        Arc::ptr_eq(object.map(), &self.expected)
    }
}
