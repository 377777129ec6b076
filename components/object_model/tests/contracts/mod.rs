//! Contract tests for the object model public API

use std::sync::Arc;

use core_types::{TypeTag, Value};
use object_model::{
    ObjectHeap, ObjectId, ObjectModelConfig, PropertyFlags, PropertyMap, Slot, EMBED_SIZE,
    MAX_SPILL_SLOTS, SPILL_RATE,
};

#[test]
fn test_storage_constants() {
    assert_eq!(EMBED_SIZE, 8);
    assert_eq!(SPILL_RATE, 8);
    assert!(MAX_SPILL_SLOTS > EMBED_SIZE);
}

#[test]
fn test_object_id_value_round_trip() {
    let id = ObjectId(17);
    let value: Value = id.into();
    assert_eq!(value, Value::HeapObject(17));
    assert_eq!(ObjectId::from_value(&value), Some(id));
    assert_eq!(ObjectId::from_value(&Value::Smi(17)), None);
}

#[test]
fn test_config_default_is_dual_fields() {
    let config = ObjectModelConfig::default();
    assert!(!config.fields_only);
    assert_eq!(config.representation_for(TypeTag::Int), TypeTag::Int);
    assert_eq!(
        ObjectModelConfig::fields_only().representation_for(TypeTag::Int),
        TypeTag::Object
    );
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: ObjectModelConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ObjectModelConfig::default());

    let config: ObjectModelConfig = serde_json::from_str(r#"{"fields_only":true}"#).unwrap();
    assert_eq!(config, ObjectModelConfig::fields_only());
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(text, r#"{"fields_only":true}"#);
}

#[test]
fn test_map_guard_is_identity() {
    let mut heap = ObjectHeap::default();
    let obj = heap.allocate_object(None);
    let guard = heap.object(obj).map().identity_guard();
    assert!(Arc::ptr_eq(guard.map(), heap.object(obj).map()));
    assert!(guard.test(heap.object(obj)));

    // structurally equal but distinct map
    heap.object_mut(obj).set_map(PropertyMap::new_empty());
    assert!(!guard.test(heap.object(obj)));
}

#[test]
fn test_define_accessor_stores_pair() {
    let mut heap = ObjectHeap::default();
    let obj = heap.allocate_object(None);
    let p = heap.define_accessor(
        obj,
        "a",
        Value::NativeFunction("get_a".into()),
        Value::Undefined,
        PropertyFlags::default(),
    );
    assert!(p.is_accessor());
    assert_eq!(p.representation(), TypeTag::Object);
    assert!(matches!(heap.get_own(obj, "a"), Some(Value::Accessor(_))));
}

#[test]
fn test_prevent_extensions() {
    let mut heap = ObjectHeap::default();
    let obj = heap.allocate_object(None);
    let before = std::sync::Arc::clone(heap.object(obj).map());
    heap.prevent_extensions(obj);
    assert!(!heap.object(obj).is_extensible());
    assert!(!heap.object(obj).map().is_extensible());
    assert!(!std::sync::Arc::ptr_eq(&before, heap.object(obj).map()));
}

#[test]
fn test_global_spill_slots_are_sequential() {
    let mut heap = ObjectHeap::default();
    let a = heap.add_global_spill("a");
    let b = heap.add_global_spill("b");
    assert_eq!(a.slot(), Slot::Spill(0));
    assert_eq!(b.slot(), Slot::Spill(1));
}
