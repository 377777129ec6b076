//! Call-site linking for dynamic property access.
//!
//! Turns a property access site (get, set or method call on a named
//! property) into a guarded invocation: an accessor specialised for the
//! receiver's current layout plus the guard under which it stays valid.
//! Call sites cache these invocations and relink when a guard fails.
//!
//! # Overview
//!
//! - [`CallSiteDescriptor`] - Operation, name and flags of a site
//! - [`link`] - Produces the [`GuardedInvocation`] for a site and receiver
//! - [`CallSite`] - Site with a mono/poly/megamorphic [`InlineCache`]
//! - [`ScriptContext`] - Heap, global object and function registry
//!
//! # Examples
//!
//! ```
//! use core_types::{TypeTag, Value};
//! use linker::{CallSite, CallSiteDescriptor, ScriptContext};
//!
//! let mut ctx = ScriptContext::new();
//! let obj = ctx.heap_mut().allocate_object(None);
//!
//! let mut store = CallSite::new(CallSiteDescriptor::set("count", TypeTag::Int));
//! let mut load = CallSite::new(CallSiteDescriptor::get("count"));
//!
//! store.set(&mut ctx, obj, Value::Smi(3)).unwrap();
//! assert_eq!(load.get(&mut ctx, obj), Ok(Value::Smi(3)));
//! assert_eq!(load.get(&mut ctx, obj), Ok(Value::Smi(3)));
//! assert_eq!(load.stats().hits, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod accessor;
pub mod call_site;
pub mod context;
mod get_method;
pub mod guarded_invocation;
pub mod inline_cache;
mod linker;
mod set_method;

pub use accessor::{Accessor, Transition};
pub use call_site::{CallSiteDescriptor, CallSiteFlags, Operation};
pub use context::{LinkerConfig, ScriptContext, ScriptFunction};
pub use guarded_invocation::{Guard, GuardedInvocation};
pub use inline_cache::{CallSite, CallSiteStats, InlineCache, MAX_POLYMORPHIC_ENTRIES};
pub use linker::{invoke_uncached, link};
