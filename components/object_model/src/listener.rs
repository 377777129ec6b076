//! Property-added notifications

use std::cell::RefCell;
use std::rc::Rc;

use crate::property::Property;
use crate::script_object::ObjectId;

/// Observer notified whenever a new property is materialized on an object.
///
/// Closures taking `(ObjectId, &Property)` implement this trait.
pub trait PropertyListener {
    /// Called after `property` was added to `object`
    fn property_added(&mut self, object: ObjectId, property: &Property);
}

impl<F> PropertyListener for F
where
    F: FnMut(ObjectId, &Property),
{
    fn property_added(&mut self, object: ObjectId, property: &Property) {
        self(object, property)
    }
}

/// Listener that records every notification it receives.
///
/// Clones share one record, so a clone can be registered on a heap while the
/// original is kept for inspection.
///
/// # Example
///
/// ```
/// use core_types::Value;
/// use object_model::{ObjectHeap, PropertyFlags, RecordingListener};
///
/// let mut heap = ObjectHeap::default();
/// let recorder = RecordingListener::new();
/// heap.add_listener(recorder.clone());
///
/// let obj = heap.allocate_object(None);
/// heap.define_property(obj, "x", Value::Null, PropertyFlags::default());
/// assert_eq!(recorder.keys(), vec!["x".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    records: Rc<RefCell<Vec<(ObjectId, Property)>>>,
}

impl RecordingListener {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first
    pub fn records(&self) -> Vec<(ObjectId, Property)> {
        self.records.borrow().clone()
    }

    /// Names of the added properties, oldest first
    pub fn keys(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .map(|(_, property)| property.key().to_string())
            .collect()
    }

    /// Number of notifications received
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Returns whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl PropertyListener for RecordingListener {
    fn property_added(&mut self, object: ObjectId, property: &Property) {
        self.records.borrow_mut().push((object, property.clone()));
    }
}
