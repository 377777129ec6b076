//! Inline caching of guarded invocations
//!
//! Provides mono/poly/megamorphic caching states for call sites. Each state
//! holds linked invocations whose guards are tested on every access.

use arrayvec::ArrayVec;
use core_types::{JsError, Value};
use object_model::{ObjectHeap, ObjectId};
use tracing::debug;

use crate::call_site::CallSiteDescriptor;
use crate::context::ScriptContext;
use crate::guarded_invocation::GuardedInvocation;
use crate::linker;

/// Most invocations a polymorphic cache holds
pub const MAX_POLYMORPHIC_ENTRIES: usize = 4;

/// Inline cache of one call site
///
/// Transitions through states as more receiver layouts are encountered.
#[derive(Debug, Clone, Default)]
pub enum InlineCache {
    /// Nothing linked yet
    #[default]
    Uninitialized,
    /// Single invocation cached (most common case)
    Monomorphic(GuardedInvocation),
    /// Multiple invocations, tested in installation order
    Polymorphic {
        /// Cached invocations
        entries: ArrayVec<GuardedInvocation, MAX_POLYMORPHIC_ENTRIES>,
    },
    /// Too many layouts; every access links afresh
    Megamorphic,
}

impl InlineCache {
    /// Create a new uninitialized cache
    pub fn new() -> Self {
        InlineCache::Uninitialized
    }

    /// Returns the first cached invocation whose guard accepts `receiver`
    pub fn lookup(&self, heap: &ObjectHeap, receiver: ObjectId) -> Option<&GuardedInvocation> {
        match self {
            InlineCache::Uninitialized | InlineCache::Megamorphic => None,
            InlineCache::Monomorphic(invocation) => {
                invocation.test(heap, receiver).then_some(invocation)
            }
            InlineCache::Polymorphic { entries } => {
                entries.iter().find(|invocation| invocation.test(heap, receiver))
            }
        }
    }

    /// Installs a freshly linked invocation.
    ///
    /// Transitions cache state as needed:
    /// - Uninitialized → Monomorphic
    /// - Monomorphic → Polymorphic, or replaced when `limit` is 1
    /// - Polymorphic → Megamorphic once `limit` entries are held
    pub fn update(&mut self, invocation: GuardedInvocation, limit: usize) {
        let limit = limit.clamp(1, MAX_POLYMORPHIC_ENTRIES);
        match self {
            InlineCache::Uninitialized => {
                *self = InlineCache::Monomorphic(invocation);
            }
            InlineCache::Monomorphic(cached) => {
                if limit == 1 {
                    *cached = invocation;
                } else {
                    let mut entries = ArrayVec::new();
                    entries.push(cached.clone());
                    entries.push(invocation);
                    *self = InlineCache::Polymorphic { entries };
                }
            }
            InlineCache::Polymorphic { entries } => {
                if entries.len() < limit {
                    entries.push(invocation);
                } else {
                    *self = InlineCache::Megamorphic;
                }
            }
            InlineCache::Megamorphic => {}
        }
    }

    /// Number of cached invocations
    pub fn len(&self) -> usize {
        match self {
            InlineCache::Uninitialized | InlineCache::Megamorphic => 0,
            InlineCache::Monomorphic(_) => 1,
            InlineCache::Polymorphic { entries } => entries.len(),
        }
    }

    /// Returns whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// State name, for logging
    pub fn state_name(&self) -> &'static str {
        match self {
            InlineCache::Uninitialized => "uninitialized",
            InlineCache::Monomorphic(_) => "monomorphic",
            InlineCache::Polymorphic { .. } => "polymorphic",
            InlineCache::Megamorphic => "megamorphic",
        }
    }
}

/// Hit/miss counters of a call site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallSiteStats {
    /// Accesses served by a cached invocation
    pub hits: u64,
    /// Accesses that had to link
    pub misses: u64,
    /// Misses on a site that had already been linked
    pub relinks: u64,
}

/// A linkable call site: descriptor plus inline cache.
///
/// # Example
///
/// ```
/// use core_types::{TypeTag, Value};
/// use linker::{CallSite, CallSiteDescriptor, ScriptContext};
///
/// let mut ctx = ScriptContext::new();
/// let obj = ctx.heap_mut().allocate_object(None);
/// let mut site = CallSite::new(CallSiteDescriptor::set("x", TypeTag::Int));
///
/// site.set(&mut ctx, obj, Value::Smi(1)).unwrap();
/// assert_eq!(site.stats().misses, 1);
/// assert_eq!(ctx.heap().get_own(obj, "x"), Some(Value::Smi(1)));
/// ```
#[derive(Debug, Clone)]
pub struct CallSite {
    descriptor: CallSiteDescriptor,
    cache: InlineCache,
    stats: CallSiteStats,
}

impl CallSite {
    /// Create an unlinked call site
    pub fn new(descriptor: CallSiteDescriptor) -> Self {
        Self {
            descriptor,
            cache: InlineCache::new(),
            stats: CallSiteStats::default(),
        }
    }

    /// The site's descriptor
    pub fn descriptor(&self) -> &CallSiteDescriptor {
        &self.descriptor
    }

    /// The inline cache
    pub fn cache(&self) -> &InlineCache {
        &self.cache
    }

    /// Hit/miss counters
    pub fn stats(&self) -> CallSiteStats {
        self.stats
    }

    /// Performs the site's operation on `receiver`.
    ///
    /// Runs a cached invocation whose guard passes; otherwise links, installs
    /// the result (unless megamorphic) and runs it.
    pub fn invoke(
        &mut self,
        ctx: &mut ScriptContext,
        receiver: ObjectId,
        args: &[Value],
    ) -> Result<Value, JsError> {
        if let Some(invocation) = self.cache.lookup(ctx.heap(), receiver).cloned() {
            self.stats.hits += 1;
            return invocation.invoke(ctx, receiver, args);
        }

        self.stats.misses += 1;
        if !matches!(self.cache, InlineCache::Uninitialized) {
            self.stats.relinks += 1;
        }
        let invocation = linker::link(ctx, &self.descriptor, receiver)?;
        if !matches!(self.cache, InlineCache::Megamorphic) {
            let limit = ctx.config().effective_polymorphic_limit();
            self.cache.update(invocation.clone(), limit);
            debug!(
                site = %self.descriptor,
                state = self.cache.state_name(),
                entries = self.cache.len(),
                "call site relinked"
            );
        }
        invocation.invoke(ctx, receiver, args)
    }

    /// Reads the site's property from `receiver`
    pub fn get(&mut self, ctx: &mut ScriptContext, receiver: ObjectId) -> Result<Value, JsError> {
        self.invoke(ctx, receiver, &[])
    }

    /// Writes `value` to the site's property of `receiver`
    pub fn set(
        &mut self,
        ctx: &mut ScriptContext,
        receiver: ObjectId,
        value: Value,
    ) -> Result<Value, JsError> {
        self.invoke(ctx, receiver, &[value])
    }

    /// Calls the site's method on `receiver`
    pub fn call(
        &mut self,
        ctx: &mut ScriptContext,
        receiver: ObjectId,
        args: &[Value],
    ) -> Result<Value, JsError> {
        self.invoke(ctx, receiver, args)
    }
}
