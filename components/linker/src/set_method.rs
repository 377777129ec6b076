//! Setter linking
//!
//! Builds the guarded invocation for a property write. Depending on what the
//! lookup found the write goes to an existing property, a new global
//! property (undeclared scope write) or a new embedded/overflow property of
//! the receiver.

use std::sync::Arc;

use core_types::JsError;
use object_model::{grown_spill_length, FindProperty, ObjectId, Property, PropertyFlags, PropertyMap, Slot};
use tracing::debug;

use crate::accessor::{Accessor, Transition};
use crate::call_site::CallSiteDescriptor;
use crate::context::ScriptContext;
use crate::guarded_invocation::{needs_no_guard, Guard, GuardedInvocation};

/// Accessor chosen for a write together with the property it targets.
///
/// `property` is `None` for writes bound to a freshly created global slot.
struct SetMethod {
    accessor: Accessor,
    property: Option<Property>,
    owner: Option<ObjectId>,
}

/// Creates the setter for one call site and receiver.
///
/// The receiver's map is captured on construction; the guard of the
/// resulting invocation is a guard on that map.
pub(crate) struct SetMethodCreator {
    receiver: ObjectId,
    map: Arc<PropertyMap>,
    find: Option<FindProperty>,
    desc: CallSiteDescriptor,
}

impl SetMethodCreator {
    pub(crate) fn new(
        ctx: &ScriptContext,
        receiver: ObjectId,
        find: Option<FindProperty>,
        desc: &CallSiteDescriptor,
    ) -> Self {
        Self {
            receiver,
            map: Arc::clone(ctx.heap().object(receiver).map()),
            find,
            desc: desc.clone(),
        }
    }

    fn name(&self) -> &str {
        self.desc.name()
    }

    /// Creates the guarded setter invocation.
    ///
    /// # Errors
    ///
    /// `ReferenceError` for a strict scope write to an undeclared name.
    pub(crate) fn create_guarded_invocation(
        self,
        ctx: &mut ScriptContext,
    ) -> Result<GuardedInvocation, JsError> {
        let method = self.create_set_method(ctx)?;
        let guard = self.guard(ctx, &method);
        Ok(GuardedInvocation::new(method.accessor, guard))
    }

    fn guard(&self, ctx: &ScriptContext, method: &SetMethod) -> Option<Guard> {
        let fields_only = ctx.heap().config().fields_only;
        if needs_no_guard(&self.desc, fields_only, method.property.as_ref()) {
            return None;
        }
        match method.owner {
            // bound to an ancestor, including a freshly created global
            Some(owner) if owner != self.receiver => {
                Some(Guard::chain(ctx.heap(), self.receiver, Some(owner)))
            }
            _ => Some(Guard::Map(self.map.identity_guard())),
        }
    }

    fn create_set_method(&self, ctx: &mut ScriptContext) -> Result<SetMethod, JsError> {
        if let Some(find) = &self.find {
            return Ok(self.create_existing_property_setter(find));
        }

        self.check_strict_create_new_variable()?;

        if ctx.heap().object(self.receiver).is_scope() {
            return Ok(self.create_global_property_setter(ctx));
        }

        Ok(self.create_new_property_setter(ctx))
    }

    /// Strict code may not create variables by assignment.
    fn check_strict_create_new_variable(&self) -> Result<(), JsError> {
        if self.desc.is_scope() && self.desc.is_strict() {
            return Err(JsError::reference_error("not.defined", &[self.name()]));
        }
        Ok(())
    }

    fn create_existing_property_setter(&self, find: &FindProperty) -> SetMethod {
        let property = find.property().clone();
        let owner = find.is_inherited().then(|| find.owner());

        let accessor = if property.is_accessor() {
            // setter functions run against the receiver; only the pair lives on the owner
            Accessor::SetUser {
                key: property.key().to_string(),
                slot: property.slot(),
                owner,
                strict: self.desc.is_strict(),
            }
        } else {
            Accessor::SetField {
                key: property.key().to_string(),
                slot: property.slot(),
                representation: property.representation(),
                owner,
            }
        };

        SetMethod {
            accessor,
            property: Some(property),
            owner,
        }
    }

    fn create_global_property_setter(&self, ctx: &mut ScriptContext) -> SetMethod {
        let global = ctx.global();
        let property = ctx.heap_mut().add_global_spill(self.name());
        SetMethod {
            accessor: Accessor::SetField {
                key: property.key().to_string(),
                slot: property.slot(),
                representation: property.representation(),
                owner: Some(global),
            },
            property: None,
            owner: Some(global),
        }
    }

    fn create_new_property_setter(&self, ctx: &mut ScriptContext) -> SetMethod {
        let method = match self.map.next_embed() {
            Some(next_embed) => self.create_new_embed_property_setter(ctx, next_embed),
            None => self.create_new_spill_property_setter(ctx),
        };

        if let Some(property) = &method.property {
            ctx.heap_mut().notify_property_added(self.receiver, property);
        }
        method
    }

    fn new_property(&self, ctx: &ScriptContext, slot: Slot) -> Property {
        let representation = ctx
            .heap()
            .config()
            .representation_for(self.desc.value_type());
        Property::new(self.name(), PropertyFlags::default(), slot, representation)
    }

    fn transition(&self, property: &Property) -> Transition {
        Transition {
            descriptor: self.desc.clone(),
            old_map: Arc::clone(&self.map),
            new_map: self.map.add_property(property.clone()),
            property: property.clone(),
        }
    }

    fn create_new_embed_property_setter(&self, ctx: &ScriptContext, index: usize) -> SetMethod {
        let property = self.new_property(ctx, Slot::Embedded(index));
        debug!(site = %self.desc, index, "linking new embedded property");
        SetMethod {
            accessor: Accessor::SetEmbed {
                transition: self.transition(&property),
                index,
            },
            property: Some(property),
            owner: None,
        }
    }

    fn create_new_spill_property_setter(&self, ctx: &ScriptContext) -> SetMethod {
        let index = self.map.next_spill();
        let property = self.new_property(ctx, Slot::Spill(index));
        let transition = self.transition(&property);

        let capacity = ctx.heap().object(self.receiver).spill_capacity();
        let accessor = if capacity == 0 {
            Accessor::SetSpillWithNew { transition, index }
        } else if index < capacity {
            Accessor::SetSpill { transition, index }
        } else {
            Accessor::SetSpillWithGrow {
                transition,
                index,
                new_length: grown_spill_length(index),
            }
        };
        debug!(site = %self.desc, index, capacity, "linking new overflow property");

        SetMethod {
            accessor,
            property: Some(property),
            owner: None,
        }
    }
}
