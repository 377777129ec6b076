//! Property accessors
//!
//! Executable halves of guarded invocations. Each variant captures exactly
//! what the linker decided at link time (slot, bound owner, map transition)
//! so invoking it needs no further lookup.

use std::sync::Arc;

use core_types::{JsError, TypeTag, Value};
use object_model::{ObjectId, Property, PropertyMap, Slot};
use tracing::trace;

use crate::call_site::CallSiteDescriptor;
use crate::context::ScriptContext;
use crate::linker;

/// Map transition performed by a new-property setter.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Site that linked the setter, used for the generic fallback
    pub descriptor: CallSiteDescriptor,
    /// Map the receiver must still have
    pub old_map: Arc<PropertyMap>,
    /// Map installed by the write
    pub new_map: Arc<PropertyMap>,
    /// The property being added
    pub property: Property,
}

/// Executable property accessor
#[derive(Debug, Clone)]
pub enum Accessor {
    /// Reads a data slot of the receiver, or of `owner` when bound
    GetField {
        /// Slot to read
        slot: Slot,
        /// Ancestor the read is bound to
        owner: Option<ObjectId>,
    },
    /// Calls the getter held in an accessor slot with the receiver as `this`
    GetUser {
        /// Slot holding the accessor pair
        slot: Slot,
        /// Ancestor holding the pair
        owner: Option<ObjectId>,
    },
    /// Reads a missing property
    GetUndefined,
    /// Obtains a function through `callee` and calls it with the receiver as `this`
    Call {
        /// Property name, for error messages
        name: String,
        /// Accessor producing the function
        callee: Box<Accessor>,
    },
    /// Writes an existing data slot, widening its representation if needed
    SetField {
        /// Property name
        key: String,
        /// Slot to write
        slot: Slot,
        /// Representation at link time
        representation: TypeTag,
        /// Ancestor (or global) the write is bound to
        owner: Option<ObjectId>,
    },
    /// Calls the setter held in an accessor slot with the receiver as `this`
    SetUser {
        /// Property name
        key: String,
        /// Slot holding the accessor pair
        slot: Slot,
        /// Ancestor holding the pair
        owner: Option<ObjectId>,
        /// Missing setter raises instead of being ignored
        strict: bool,
    },
    /// Adds a property in embedded slot `index`
    SetEmbed {
        /// Map transition
        transition: Transition,
        /// Embedded index
        index: usize,
    },
    /// Adds a property in already allocated overflow slot `index`
    SetSpill {
        /// Map transition
        transition: Transition,
        /// Overflow index
        index: usize,
    },
    /// Adds the first overflow property, allocating the first block
    SetSpillWithNew {
        /// Map transition
        transition: Transition,
        /// Overflow index
        index: usize,
    },
    /// Adds an overflow property after growing storage to `new_length`
    SetSpillWithGrow {
        /// Map transition
        transition: Transition,
        /// Overflow index
        index: usize,
        /// Overflow length after growth
        new_length: usize,
    },
    /// Write that is silently dropped
    Noop,
}

fn first_arg(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Undefined)
}

impl Accessor {
    /// Runs the accessor against `receiver`.
    ///
    /// Setters take the value as `args[0]` and return it; calls forward all
    /// of `args` to the callee.
    pub fn invoke(
        &self,
        ctx: &mut ScriptContext,
        receiver: ObjectId,
        args: &[Value],
    ) -> Result<Value, JsError> {
        match self {
            Accessor::GetField { slot, owner } => {
                let target = owner.unwrap_or(receiver);
                Ok(ctx.heap().object(target).get_slot(*slot))
            }
            Accessor::GetUser { slot, owner } => {
                let target = owner.unwrap_or(receiver);
                match ctx.heap().object(target).get_slot(*slot) {
                    Value::Accessor(pair) if pair.has_getter() => {
                        ctx.call_function(&pair.getter, receiver.into(), &[])
                    }
                    _ => Ok(Value::Undefined),
                }
            }
            Accessor::GetUndefined => Ok(Value::Undefined),
            Accessor::Call { name, callee } => {
                let function = callee.invoke(ctx, receiver, &[])?;
                if !function.is_function() {
                    return Err(JsError::type_error("not.a.function", &[name.as_str()]));
                }
                ctx.call_function(&function, receiver.into(), args)
            }
            Accessor::SetField {
                key,
                slot,
                representation,
                owner,
            } => {
                let target = owner.unwrap_or(receiver);
                let value = first_arg(args);
                let tag = value.type_tag();
                if !tag.fits(*representation) {
                    ctx.heap_mut().widen_property(target, key, tag);
                }
                ctx.heap_mut().object_mut(target).set_slot(*slot, value.clone());
                Ok(value)
            }
            Accessor::SetUser {
                key,
                slot,
                owner,
                strict,
            } => {
                let target = owner.unwrap_or(receiver);
                let value = first_arg(args);
                match ctx.heap().object(target).get_slot(*slot) {
                    Value::Accessor(pair) if pair.has_setter() => {
                        ctx.call_function(&pair.setter, receiver.into(), &[value.clone()])?;
                    }
                    _ if *strict => {
                        let class_name = ctx.heap().object(receiver).class_name();
                        return Err(JsError::type_error(
                            "property.has.no.setter",
                            &[key.as_str(), class_name],
                        ));
                    }
                    _ => {}
                }
                Ok(value)
            }
            Accessor::SetEmbed { transition, index } => {
                let index = *index;
                add_property(ctx, receiver, transition, args, |obj, value| {
                    obj.set_embed(&transition.old_map, &transition.new_map, index, value)
                })
            }
            Accessor::SetSpill { transition, index } => {
                let index = *index;
                add_property(ctx, receiver, transition, args, |obj, value| {
                    obj.set_spill(&transition.old_map, &transition.new_map, index, value)
                })
            }
            Accessor::SetSpillWithNew { transition, index } => {
                let index = *index;
                add_property(ctx, receiver, transition, args, |obj, value| {
                    obj.set_spill_with_new(&transition.old_map, &transition.new_map, index, value)
                })
            }
            Accessor::SetSpillWithGrow {
                transition,
                index,
                new_length,
            } => {
                let (index, new_length) = (*index, *new_length);
                add_property(ctx, receiver, transition, args, |obj, value| {
                    obj.set_spill_with_grow(
                        &transition.old_map,
                        &transition.new_map,
                        index,
                        new_length,
                        value,
                    )
                })
            }
            Accessor::Noop => Ok(first_arg(args)),
        }
    }
}

/// Shared body of the new-property setters.
///
/// The store only happens if the receiver still has the transition's old
/// map and is extensible; otherwise the write goes through a freshly linked,
/// uncached setter.
fn add_property(
    ctx: &mut ScriptContext,
    receiver: ObjectId,
    transition: &Transition,
    args: &[Value],
    store: impl FnOnce(&mut object_model::ScriptObject, Value) -> bool,
) -> Result<Value, JsError> {
    let value = first_arg(args);
    let obj = ctx.heap_mut().object_mut(receiver);
    if !obj.is_extensible() || !store(obj, value.clone()) {
        trace!(site = %transition.descriptor, "stale transition, generic set");
        return linker::invoke_uncached(ctx, &transition.descriptor, receiver, &[value]);
    }
    let tag = value.type_tag();
    if !tag.fits(transition.property.representation()) {
        ctx.heap_mut()
            .widen_property(receiver, transition.property.key(), tag);
    }
    Ok(value)
}
