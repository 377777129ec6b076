//! Property lookup along the prototype / scope chain

use crate::heap::ObjectHeap;
use crate::property::Property;
use crate::script_object::ObjectId;

/// Result of a successful property lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FindProperty {
    receiver: ObjectId,
    owner: ObjectId,
    property: Property,
}

impl FindProperty {
    /// Object the lookup started from
    pub fn receiver(&self) -> ObjectId {
        self.receiver
    }

    /// Object the property was found on
    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    /// The property found
    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Returns whether the property belongs to an ancestor of the receiver
    pub fn is_inherited(&self) -> bool {
        self.owner != self.receiver
    }
}

/// Finds `key` on `start` or, when `deep`, on its parents.
///
/// With `stop_on_non_scope` the walk gives up at the first parent that is
/// not a scope object, so scope lookups never leak into ordinary objects.
///
/// # Example
///
/// ```
/// use core_types::Value;
/// use object_model::{find_property, ObjectHeap, PropertyFlags};
///
/// let mut heap = ObjectHeap::default();
/// let proto = heap.allocate_object(None);
/// let obj = heap.allocate_object(Some(proto));
/// heap.define_property(proto, "x", Value::Smi(1), PropertyFlags::default());
///
/// let found = find_property(&heap, obj, "x", true, false).unwrap();
/// assert_eq!(found.owner(), proto);
/// assert!(found.is_inherited());
/// assert!(find_property(&heap, obj, "x", false, false).is_none());
/// ```
pub fn find_property(
    heap: &ObjectHeap,
    start: ObjectId,
    key: &str,
    deep: bool,
    stop_on_non_scope: bool,
) -> Option<FindProperty> {
    let mut current = start;
    loop {
        let obj = heap.object(current);
        if stop_on_non_scope && current != start && !obj.is_scope() {
            return None;
        }
        if let Some(property) = obj.find_own(key) {
            return Some(FindProperty {
                receiver: start,
                owner: current,
                property: property.clone(),
            });
        }
        if !deep {
            return None;
        }
        current = obj.proto()?;
    }
}
