//! Getter and method-call linking

use core_types::JsError;
use object_model::{FindProperty, ObjectId};

use crate::accessor::Accessor;
use crate::call_site::CallSiteDescriptor;
use crate::context::ScriptContext;
use crate::guarded_invocation::{needs_no_guard, Guard, GuardedInvocation};

/// Links a property read.
///
/// A missing name read through a scope site is a `ReferenceError`; on an
/// ordinary object it reads `undefined` under a guard on the whole chain, so
/// a later definition anywhere on it forces a relink.
pub(crate) fn create_getter(
    ctx: &ScriptContext,
    desc: &CallSiteDescriptor,
    receiver: ObjectId,
    find: Option<&FindProperty>,
) -> Result<GuardedInvocation, JsError> {
    let heap = ctx.heap();
    let Some(find) = find else {
        if desc.is_scope() {
            return Err(JsError::reference_error("not.defined", &[desc.name()]));
        }
        return Ok(GuardedInvocation::new(
            Accessor::GetUndefined,
            Some(Guard::chain(heap, receiver, None)),
        ));
    };

    let property = find.property();
    let owner = find.is_inherited().then(|| find.owner());
    let accessor = if property.is_accessor() {
        Accessor::GetUser {
            slot: property.slot(),
            owner,
        }
    } else {
        Accessor::GetField {
            slot: property.slot(),
            owner,
        }
    };

    let guard = if needs_no_guard(desc, heap.config().fields_only, Some(property)) {
        None
    } else if let Some(owner) = owner {
        Some(Guard::chain(heap, receiver, Some(owner)))
    } else {
        Some(Guard::receiver_map(heap, receiver))
    };
    Ok(GuardedInvocation::new(accessor, guard))
}

/// Links a method call: the getter for the name, wrapped so its result is
/// invoked with the receiver as `this`.
pub(crate) fn create_call(
    ctx: &ScriptContext,
    desc: &CallSiteDescriptor,
    receiver: ObjectId,
    find: Option<&FindProperty>,
) -> Result<GuardedInvocation, JsError> {
    let getter = create_getter(ctx, desc, receiver, find)?;
    let guard = getter.guard().cloned();
    Ok(GuardedInvocation::new(
        Accessor::Call {
            name: desc.name().to_string(),
            callee: Box::new(getter.accessor().clone()),
        },
        guard,
    ))
}
