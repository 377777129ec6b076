//! Execution context for linking
//!
//! Every linking and invocation step takes the context explicitly; it owns
//! the object heap (and with it the trusted global object), the registry of
//! compiled functions and the linker configuration.

use std::rc::Rc;

use core_types::{JsError, Value};
use object_model::{ObjectHeap, ObjectId, ObjectModelConfig};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::inline_cache::MAX_POLYMORPHIC_ENTRIES;

/// Compiled callable supplied by the compiler or host.
///
/// Closures with the matching signature implement this trait.
pub trait ScriptFunction {
    /// Invokes the function with `this` and `args`
    fn call(&self, ctx: &mut ScriptContext, this: Value, args: &[Value]) -> Result<Value, JsError>;
}

impl<F> ScriptFunction for F
where
    F: Fn(&mut ScriptContext, Value, &[Value]) -> Result<Value, JsError>,
{
    fn call(&self, ctx: &mut ScriptContext, this: Value, args: &[Value]) -> Result<Value, JsError> {
        self(ctx, this, args)
    }
}

/// Linker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Guarded invocations a call site keeps before going megamorphic
    pub polymorphic_limit: usize,
}

impl LinkerConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            polymorphic_limit: MAX_POLYMORPHIC_ENTRIES,
        }
    }

    /// Create configuration where call sites keep a single invocation
    pub fn monomorphic() -> Self {
        Self {
            polymorphic_limit: 1,
        }
    }

    /// Polymorphic limit clamped to what a call site can hold
    pub fn effective_polymorphic_limit(&self) -> usize {
        self.polymorphic_limit.clamp(1, MAX_POLYMORPHIC_ENTRIES)
    }
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Script execution context.
///
/// A fresh context has a fresh global object.
///
/// # Example
///
/// ```
/// use core_types::{JsError, Value};
/// use linker::ScriptContext;
///
/// let mut ctx = ScriptContext::new();
/// let add = ctx.register_function("add", |_ctx: &mut ScriptContext, _this: Value, args: &[Value]| -> Result<Value, JsError> {
///     match (args.first(), args.get(1)) {
///         (Some(Value::Smi(a)), Some(Value::Smi(b))) => Ok(Value::Smi(a + b)),
///         _ => Ok(Value::Undefined),
///     }
/// });
/// let result = ctx.call_function(&add, Value::Undefined, &[Value::Smi(1), Value::Smi(2)]);
/// assert_eq!(result, Ok(Value::Smi(3)));
/// ```
pub struct ScriptContext {
    heap: ObjectHeap,
    functions: FxHashMap<String, Rc<dyn ScriptFunction>>,
    config: LinkerConfig,
}

impl ScriptContext {
    /// Create a context with default configuration
    pub fn new() -> Self {
        Self::with_config(ObjectModelConfig::default(), LinkerConfig::default())
    }

    /// Create a context with explicit configuration
    pub fn with_config(object_config: ObjectModelConfig, config: LinkerConfig) -> Self {
        Self {
            heap: ObjectHeap::new(object_config),
            functions: FxHashMap::default(),
            config,
        }
    }

    /// The object heap
    pub fn heap(&self) -> &ObjectHeap {
        &self.heap
    }

    /// Mutable access to the object heap
    pub fn heap_mut(&mut self) -> &mut ObjectHeap {
        &mut self.heap
    }

    /// The trusted global object
    pub fn global(&self) -> ObjectId {
        self.heap.global()
    }

    /// Linker configuration
    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Registers a compiled function and returns the value referring to it
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        function: impl ScriptFunction + 'static,
    ) -> Value {
        let name = name.into();
        self.functions.insert(name.clone(), Rc::new(function));
        Value::NativeFunction(name)
    }

    /// Calls a function value with `this` and `args`.
    ///
    /// # Errors
    ///
    /// `TypeError` if `callee` is not a registered function.
    pub fn call_function(&mut self, callee: &Value, this: Value, args: &[Value]) -> Result<Value, JsError> {
        let function = match callee {
            Value::NativeFunction(name) => self.functions.get(name).cloned(),
            _ => None,
        };
        match function {
            Some(function) => function.call(self, this, args),
            None => Err(JsError::type_error(
                "not.a.function",
                &[callee.to_string().as_str()],
            )),
        }
    }
}

impl Default for ScriptContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScriptContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptContext")
            .field("heap", &self.heap)
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}
