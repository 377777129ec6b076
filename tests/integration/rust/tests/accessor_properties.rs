//! Accessor Property and Method Call Integration Tests
//!
//! User getters, setters and methods registered on the context and reached
//! through call sites.

use core_types::{ErrorKind, JsError, TypeTag, Value};
use linker::{CallSite, CallSiteDescriptor, ScriptContext};
use object_model::{ObjectId, PropertyFlags};

/// Registers `get_x`/`set_x` storing into the receiver's `_x`
fn register_x_accessors(ctx: &mut ScriptContext) -> (Value, Value) {
    let getter = ctx.register_function(
        "get_x",
        |ctx: &mut ScriptContext, this: Value, _args: &[Value]| -> Result<Value, JsError> {
            let Some(id) = ObjectId::from_value(&this) else {
                return Ok(Value::Undefined);
            };
            Ok(ctx.heap().get_own(id, "_x").unwrap_or(Value::Undefined))
        },
    );
    let setter = ctx.register_function(
        "set_x",
        |ctx: &mut ScriptContext, this: Value, args: &[Value]| -> Result<Value, JsError> {
            if let Some(id) = ObjectId::from_value(&this) {
                let value = args.first().cloned().unwrap_or(Value::Undefined);
                ctx.heap_mut()
                    .define_property(id, "_x", value, PropertyFlags::default());
            }
            Ok(Value::Undefined)
        },
    );
    (getter, setter)
}

/// Test: getter and setter run with the receiver as `this`
#[test]
fn test_accessor_pair_on_object() {
    let mut ctx = ScriptContext::new();
    let (getter, setter) = register_x_accessors(&mut ctx);
    let obj = ctx.heap_mut().allocate_object(None);
    ctx.heap_mut()
        .define_accessor(obj, "x", getter, setter, PropertyFlags::default());

    let mut set_x = CallSite::new(CallSiteDescriptor::set("x", TypeTag::Int));
    let mut get_x = CallSite::new(CallSiteDescriptor::get("x"));

    assert_eq!(set_x.set(&mut ctx, obj, Value::Smi(9)), Ok(Value::Smi(9)));
    assert_eq!(ctx.heap().get_own(obj, "_x"), Some(Value::Smi(9)));
    assert_eq!(get_x.get(&mut ctx, obj), Ok(Value::Smi(9)));
}

/// Test: inherited setters run against the receiver, not the owner
#[test]
fn test_inherited_setter_targets_receiver() {
    let mut ctx = ScriptContext::new();
    let (getter, setter) = register_x_accessors(&mut ctx);
    let proto = ctx.heap_mut().allocate_object(None);
    let child = ctx.heap_mut().allocate_object(Some(proto));
    ctx.heap_mut()
        .define_accessor(proto, "x", getter, setter, PropertyFlags::default());

    let mut set_x = CallSite::new(CallSiteDescriptor::set("x", TypeTag::Int));
    set_x.set(&mut ctx, child, Value::Smi(4)).unwrap();

    assert_eq!(ctx.heap().get_own(child, "_x"), Some(Value::Smi(4)));
    assert_eq!(ctx.heap().get_own(proto, "_x"), None);
}

/// Test: getter-only properties ignore sloppy writes and reject strict ones
#[test]
fn test_getter_only_property() {
    let mut ctx = ScriptContext::new();
    let (getter, _) = register_x_accessors(&mut ctx);
    let obj = ctx.heap_mut().allocate_object(None);
    ctx.heap_mut()
        .define_accessor(obj, "x", getter, Value::Undefined, PropertyFlags::default());

    let mut sloppy = CallSite::new(CallSiteDescriptor::set("x", TypeTag::Int));
    assert_eq!(sloppy.set(&mut ctx, obj, Value::Smi(1)), Ok(Value::Smi(1)));
    assert_eq!(ctx.heap().get_own(obj, "_x"), None);

    let mut strict = CallSite::new(CallSiteDescriptor::set("x", TypeTag::Int).strict());
    let err = strict.set(&mut ctx, obj, Value::Smi(1)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert_eq!(err.key, "property.has.no.setter");
}

/// Test: method calls pass the receiver as `this` and forward arguments
#[test]
fn test_method_call() {
    let mut ctx = ScriptContext::new();
    let method = ctx.register_function(
        "offset",
        |ctx: &mut ScriptContext, this: Value, args: &[Value]| -> Result<Value, JsError> {
            let base = ObjectId::from_value(&this)
                .and_then(|id| ctx.heap().get_own(id, "base"));
            match (base, args.first()) {
                (Some(Value::Smi(base)), Some(Value::Smi(delta))) => Ok(Value::Smi(base + delta)),
                _ => Ok(Value::Undefined),
            }
        },
    );
    let proto = ctx.heap_mut().allocate_object(None);
    ctx.heap_mut()
        .define_property(proto, "offset", method, PropertyFlags::default());
    let obj = ctx.heap_mut().allocate_object(Some(proto));
    ctx.heap_mut()
        .define_property(obj, "base", Value::Smi(40), PropertyFlags::default());

    let mut call = CallSite::new(CallSiteDescriptor::call("offset"));
    assert_eq!(call.call(&mut ctx, obj, &[Value::Smi(2)]), Ok(Value::Smi(42)));
    assert_eq!(call.call(&mut ctx, obj, &[Value::Smi(3)]), Ok(Value::Smi(43)));
    assert_eq!(call.stats().hits, 1);
}

/// Test: calling a non-function or missing property is a type error
#[test]
fn test_call_non_function() {
    let mut ctx = ScriptContext::new();
    let obj = ctx.heap_mut().allocate_object(None);
    ctx.heap_mut()
        .define_property(obj, "n", Value::Smi(1), PropertyFlags::default());

    let mut call_n = CallSite::new(CallSiteDescriptor::call("n"));
    let err = call_n.call(&mut ctx, obj, &[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert_eq!(err.message, "n is not a function");

    let mut call_missing = CallSite::new(CallSiteDescriptor::call("missing"));
    let err = call_missing.call(&mut ctx, obj, &[]).unwrap_err();
    assert_eq!(err.key, "not.a.function");
}
