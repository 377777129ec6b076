//! Linking entry points
//!
//! [`link`] produces the guarded invocation for one call site and receiver;
//! [`invoke_uncached`] links and runs it without installing anything.

use core_types::{JsError, Value};
use object_model::{find_property, FindProperty, ObjectId};
use tracing::{debug, instrument};

use crate::accessor::Accessor;
use crate::call_site::{CallSiteDescriptor, Operation};
use crate::context::ScriptContext;
use crate::get_method::{create_call, create_getter};
use crate::guarded_invocation::{Guard, GuardedInvocation};
use crate::set_method::SetMethodCreator;

/// Links `desc` for `receiver`.
///
/// Linking a write may change the heap: an undeclared scope write creates
/// its global property here, and a new property is announced to the heap's
/// listeners here, before the write itself runs.
///
/// # Errors
///
/// - `ReferenceError` for strict scope writes and scope reads of undeclared names
/// - `TypeError` for strict writes to read-only properties or non-extensible objects
///
/// # Example
///
/// ```
/// use core_types::{TypeTag, Value};
/// use linker::{link, CallSiteDescriptor, ScriptContext};
///
/// let mut ctx = ScriptContext::new();
/// let obj = ctx.heap_mut().allocate_object(None);
/// let desc = CallSiteDescriptor::set("answer", TypeTag::Int);
///
/// let setter = link(&mut ctx, &desc, obj).unwrap();
/// assert!(setter.test(ctx.heap(), obj));
/// setter.invoke(&mut ctx, obj, &[Value::Smi(42)]).unwrap();
/// assert_eq!(ctx.heap().get_own(obj, "answer"), Some(Value::Smi(42)));
/// ```
#[instrument(skip_all, fields(site = %desc, receiver = receiver.0))]
pub fn link(
    ctx: &mut ScriptContext,
    desc: &CallSiteDescriptor,
    receiver: ObjectId,
) -> Result<GuardedInvocation, JsError> {
    let stop_on_non_scope = desc.is_scope() && ctx.heap().object(receiver).is_scope();
    let find = find_property(ctx.heap(), receiver, desc.name(), true, stop_on_non_scope);
    debug!(found = find.is_some(), "linking call site");

    match desc.operation() {
        Operation::GetProperty => create_getter(ctx, desc, receiver, find.as_ref()),
        Operation::CallMethod => create_call(ctx, desc, receiver, find.as_ref()),
        Operation::SetProperty => link_setter(ctx, desc, receiver, find),
    }
}

fn link_setter(
    ctx: &mut ScriptContext,
    desc: &CallSiteDescriptor,
    receiver: ObjectId,
    find: Option<FindProperty>,
) -> Result<GuardedInvocation, JsError> {
    let obj = ctx.heap().object(receiver);
    match &find {
        Some(found) if !found.property().is_accessor() && !found.property().is_writable() => {
            if desc.is_strict() {
                return Err(JsError::type_error(
                    "property.not.writable",
                    &[desc.name(), obj.class_name()],
                ));
            }
            let guard = if found.is_inherited() {
                Guard::chain(ctx.heap(), receiver, Some(found.owner()))
            } else {
                Guard::receiver_map(ctx.heap(), receiver)
            };
            return Ok(GuardedInvocation::new(Accessor::Noop, Some(guard)));
        }
        None if !obj.is_extensible() => {
            if desc.is_strict() {
                return Err(JsError::type_error(
                    "object.non.extensible",
                    &[desc.name(), obj.class_name()],
                ));
            }
            return Ok(GuardedInvocation::new(
                Accessor::Noop,
                Some(Guard::receiver_map(ctx.heap(), receiver)),
            ));
        }
        _ => {}
    }

    SetMethodCreator::new(ctx, receiver, find, desc).create_guarded_invocation(ctx)
}

/// Links `desc` for `receiver` and runs the result once.
///
/// This is the generic path: nothing is cached, and the invocation reflects
/// the heap as it is right now.
pub fn invoke_uncached(
    ctx: &mut ScriptContext,
    desc: &CallSiteDescriptor,
    receiver: ObjectId,
    args: &[Value],
) -> Result<Value, JsError> {
    let invocation = link(ctx, desc, receiver)?;
    invocation.invoke(ctx, receiver, args)
}
