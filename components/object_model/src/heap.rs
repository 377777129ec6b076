//! Object heap.
//!
//! Owns every script object of one execution context, the trusted global
//! object, the root property map and the property-added listeners. Objects are
//! addressed by [`ObjectId`] and live as long as the heap.

use std::sync::Arc;

use core_types::{AccessorPair, JsError, TypeTag, Value};
use tracing::debug;

use crate::config::ObjectModelConfig;
use crate::listener::PropertyListener;
use crate::property::{Property, PropertyFlags, Slot};
use crate::property_map::PropertyMap;
use crate::script_object::{grown_spill_length, ObjectFlags, ObjectId, ScriptObject};

/// Arena of script objects for one execution context
pub struct ObjectHeap {
    objects: Vec<ScriptObject>,
    global: ObjectId,
    empty_map: Arc<PropertyMap>,
    listeners: Vec<Box<dyn PropertyListener>>,
    config: ObjectModelConfig,
}

impl ObjectHeap {
    /// Creates a heap holding a fresh global object.
    ///
    /// # Example
    ///
    /// ```
    /// use object_model::{ObjectHeap, ObjectModelConfig};
    ///
    /// let heap = ObjectHeap::new(ObjectModelConfig::default());
    /// let global = heap.object(heap.global());
    /// assert!(global.is_scope());
    /// assert!(global.map().is_empty());
    /// ```
    pub fn new(config: ObjectModelConfig) -> Self {
        let empty_map = PropertyMap::new_empty();
        let global = ScriptObject::new(
            Arc::clone(&empty_map),
            None,
            ObjectFlags::SCOPE | ObjectFlags::EXTENSIBLE,
            "global",
        );
        Self {
            objects: vec![global],
            global: ObjectId(0),
            empty_map,
            listeners: Vec::new(),
            config,
        }
    }

    /// The trusted global object of this context
    pub fn global(&self) -> ObjectId {
        self.global
    }

    /// Storage configuration
    pub fn config(&self) -> &ObjectModelConfig {
        &self.config
    }

    /// Map every new object starts with
    pub fn empty_map(&self) -> &Arc<PropertyMap> {
        &self.empty_map
    }

    /// Number of live objects, the global included
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns whether the heap holds no objects (never true: the global always exists)
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Allocates an ordinary object with an optional prototype
    pub fn allocate_object(&mut self, proto: Option<ObjectId>) -> ObjectId {
        self.allocate(proto, ObjectFlags::EXTENSIBLE, "Object")
    }

    /// Allocates a scope object (e.g. a function scope) nested in `parent`
    pub fn allocate_scope(&mut self, parent: ObjectId) -> ObjectId {
        self.allocate(
            Some(parent),
            ObjectFlags::SCOPE | ObjectFlags::EXTENSIBLE,
            "Scope",
        )
    }

    fn allocate(
        &mut self,
        proto: Option<ObjectId>,
        flags: ObjectFlags,
        class_name: &'static str,
    ) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(ScriptObject::new(
            Arc::clone(&self.empty_map),
            proto,
            flags,
            class_name,
        ));
        id
    }

    /// Returns the object for `id`, if it belongs to this heap
    pub fn get(&self, id: ObjectId) -> Option<&ScriptObject> {
        self.objects.get(id.0)
    }

    /// Returns the object for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this heap.
    pub fn object(&self, id: ObjectId) -> &ScriptObject {
        &self.objects[id.0]
    }

    /// Mutable access to the object for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this heap.
    pub fn object_mut(&mut self, id: ObjectId) -> &mut ScriptObject {
        &mut self.objects[id.0]
    }

    /// Ids from `start` up through its parents
    pub fn chain(&self, start: ObjectId) -> Vec<ObjectId> {
        let mut chain = vec![start];
        let mut current = self.object(start).proto();
        while let Some(id) = current {
            chain.push(id);
            current = self.object(id).proto();
        }
        chain
    }

    /// Registers a property-added listener
    pub fn add_listener(&mut self, listener: impl PropertyListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Notifies every listener that `property` was added to `object`
    pub fn notify_property_added(&mut self, object: ObjectId, property: &Property) {
        for listener in &mut self.listeners {
            listener.property_added(object, property);
        }
    }

    /// Defines or overwrites an own data property, bypassing extensibility.
    ///
    /// Used by bootstrap code and hosts to populate objects directly.
    pub fn define_property(
        &mut self,
        id: ObjectId,
        key: &str,
        value: Value,
        flags: PropertyFlags,
    ) -> Property {
        let representation = if flags.contains(PropertyFlags::ACCESSOR) {
            TypeTag::Object
        } else {
            self.config.representation_for(value.type_tag())
        };

        let obj = &mut self.objects[id.0];
        if let Some(existing) = obj.find_own(key).cloned() {
            let updated = Property::new(
                key,
                flags,
                existing.slot(),
                existing.representation().widen(representation),
            );
            if updated != existing {
                if let Some(map) = obj.map().replace_property(updated.clone()) {
                    obj.set_map(map);
                }
            }
            obj.set_slot(existing.slot(), value);
            return updated;
        }

        let slot = match obj.map().next_embed() {
            Some(index) => Slot::Embedded(index),
            None => Slot::Spill(obj.map().next_spill()),
        };
        let property = Property::new(key, flags, slot, representation);
        let new_map = obj.map().add_property(property.clone());
        if let Slot::Spill(index) = slot {
            if obj.spill_capacity() <= index {
                obj.grow_spill(grown_spill_length(index));
            }
        }
        obj.set_map(new_map);
        obj.set_slot(slot, value);

        self.notify_property_added(id, &property);
        property
    }

    /// Defines an accessor property backed by getter/setter functions.
    ///
    /// Pass `Value::Undefined` for a missing half.
    pub fn define_accessor(
        &mut self,
        id: ObjectId,
        key: &str,
        getter: Value,
        setter: Value,
        flags: PropertyFlags,
    ) -> Property {
        let pair = Value::Accessor(std::rc::Rc::new(AccessorPair::new(getter, setter)));
        self.define_property(id, key, pair, flags | PropertyFlags::ACCESSOR)
    }

    /// Reads an own data slot without consulting accessors or parents
    pub fn get_own(&self, id: ObjectId, key: &str) -> Option<Value> {
        let obj = self.object(id);
        obj.find_own(key).map(|property| obj.get_slot(property.slot()))
    }

    /// Forbids adding new properties to `id`
    pub fn prevent_extensions(&mut self, id: ObjectId) {
        self.objects[id.0].prevent_extensions();
    }

    /// Deletes an own property.
    ///
    /// Deleting a missing property succeeds. Non-configurable properties are
    /// kept and report `false`, or a `TypeError` in strict mode.
    pub fn delete_property(&mut self, id: ObjectId, key: &str, strict: bool) -> Result<bool, JsError> {
        let obj = &mut self.objects[id.0];
        let Some(property) = obj.find_own(key).cloned() else {
            return Ok(true);
        };
        if !property.is_configurable() {
            if strict {
                return Err(JsError::type_error(
                    "cant.delete.property",
                    &[key, obj.class_name()],
                ));
            }
            return Ok(false);
        }
        if let Some(map) = obj.map().remove_property(key) {
            obj.set_slot(property.slot(), Value::Undefined);
            obj.set_map(map);
        }
        Ok(true)
    }

    /// Creates an overflow property on the global object.
    ///
    /// Scope writes to undeclared names always land here, whichever scope
    /// initiated them.
    pub fn add_global_spill(&mut self, key: &str) -> Property {
        let global = self.global;
        let property = self.objects[global.0].add_spill(key, TypeTag::Object);
        debug!(key, slot = ?property.slot(), "created global property");
        self.notify_property_added(global, &property);
        property
    }

    /// Widens the representation of `key` on `id` so it can hold `tag`.
    ///
    /// # Returns
    ///
    /// `true` if the object's map was replaced.
    pub fn widen_property(&mut self, id: ObjectId, key: &str, tag: TypeTag) -> bool {
        let obj = &mut self.objects[id.0];
        let Some(property) = obj.find_own(key) else {
            return false;
        };
        if self.config.fields_only || property.is_accessor() || tag.fits(property.representation()) {
            return false;
        }
        let widened = property.with_representation(property.representation().widen(tag));
        match obj.map().replace_property(widened) {
            Some(map) => {
                debug!(key, to = %tag, "widening property representation");
                obj.set_map(map);
                true
            }
            None => false,
        }
    }
}

impl Default for ObjectHeap {
    fn default() -> Self {
        Self::new(ObjectModelConfig::default())
    }
}

impl std::fmt::Debug for ObjectHeap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectHeap")
            .field("objects", &self.objects.len())
            .field("global", &self.global)
            .field("listeners", &self.listeners.len())
            .field("config", &self.config)
            .finish()
    }
}
