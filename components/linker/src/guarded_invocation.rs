//! Guarded invocations
//!
//! A guarded invocation pairs an accessor with the predicate under which it
//! stays valid. Call sites test the guard before every reuse and relink when
//! it fails.

use core_types::{JsError, Value};
use object_model::{MapGuard, ObjectHeap, ObjectId, Property};

use crate::accessor::Accessor;
use crate::call_site::CallSiteDescriptor;
use crate::context::ScriptContext;

/// Validity predicate of a guarded invocation
#[derive(Debug, Clone)]
pub enum Guard {
    /// Receiver still has the map seen at link time
    Map(MapGuard),
    /// Receiver has the same map and the same parents, each with the same
    /// map, as the chain walked at link time
    Chain {
        /// Guard on the receiver's map
        receiver: MapGuard,
        /// Parents in walk order with their expected maps
        ancestors: Vec<(ObjectId, MapGuard)>,
    },
}

impl Guard {
    /// Guard on the receiver's current map
    pub fn receiver_map(heap: &ObjectHeap, receiver: ObjectId) -> Guard {
        Guard::Map(heap.object(receiver).map().identity_guard())
    }

    /// Guard on the chain from `receiver` up to and including `owner`, or up
    /// to the end of the chain when `owner` is `None`.
    pub fn chain(heap: &ObjectHeap, receiver: ObjectId, owner: Option<ObjectId>) -> Guard {
        let mut ancestors = Vec::new();
        for id in heap.chain(receiver).into_iter().skip(1) {
            ancestors.push((id, heap.object(id).map().identity_guard()));
            if Some(id) == owner {
                break;
            }
        }
        let receiver = heap.object(receiver).map().identity_guard();
        if ancestors.is_empty() {
            Guard::Map(receiver)
        } else {
            Guard::Chain {
                receiver,
                ancestors,
            }
        }
    }

    /// Tests the guard for `receiver`
    pub fn test(&self, heap: &ObjectHeap, receiver: ObjectId) -> bool {
        match self {
            Guard::Map(guard) => heap.get(receiver).is_some_and(|obj| guard.test(obj)),
            Guard::Chain {
                receiver: receiver_guard,
                ancestors,
            } => {
                let Some(obj) = heap.get(receiver) else {
                    return false;
                };
                if !receiver_guard.test(obj) {
                    return false;
                }
                let mut next = obj.proto();
                for (expected, guard) in ancestors {
                    if next != Some(*expected) {
                        return false;
                    }
                    let ancestor = heap.object(*expected);
                    if !guard.test(ancestor) {
                        return false;
                    }
                    next = ancestor.proto();
                }
                true
            }
        }
    }
}

/// Returns whether an invocation for `property` at `desc` may go unguarded.
///
/// Only fast-scope sites qualify, and only when slots never widen or the
/// property (absent means a fixed global slot) cannot change type.
pub(crate) fn needs_no_guard(
    desc: &CallSiteDescriptor,
    fields_only: bool,
    property: Option<&Property>,
) -> bool {
    desc.is_fast_scope() && (fields_only || property.map_or(true, |p| !p.can_change_type()))
}

/// Accessor plus optional guard, as installed at a call site.
#[derive(Debug, Clone)]
pub struct GuardedInvocation {
    accessor: Accessor,
    guard: Option<Guard>,
}

impl GuardedInvocation {
    /// Create a guarded invocation
    pub fn new(accessor: Accessor, guard: Option<Guard>) -> Self {
        Self { accessor, guard }
    }

    /// The accessor
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// The guard, `None` when valid unconditionally
    pub fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }

    /// Returns whether the invocation is valid for `receiver`
    pub fn test(&self, heap: &ObjectHeap, receiver: ObjectId) -> bool {
        self.guard
            .as_ref()
            .map_or(true, |guard| guard.test(heap, receiver))
    }

    /// Runs the accessor. Callers test the guard first.
    pub fn invoke(
        &self,
        ctx: &mut ScriptContext,
        receiver: ObjectId,
        args: &[Value],
    ) -> Result<Value, JsError> {
        self.accessor.invoke(ctx, receiver, args)
    }
}
