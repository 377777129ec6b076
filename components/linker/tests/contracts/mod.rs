//! Contract tests for the linker public API

use core_types::{ErrorKind, JsError, TypeTag, Value};
use linker::{
    invoke_uncached, link, CallSite, CallSiteDescriptor, CallSiteStats, LinkerConfig,
    Operation, ScriptContext, ScriptFunction, MAX_POLYMORPHIC_ENTRIES,
};

#[test]
fn test_polymorphic_capacity() {
    assert_eq!(MAX_POLYMORPHIC_ENTRIES, 4);
    assert_eq!(LinkerConfig::default().polymorphic_limit, MAX_POLYMORPHIC_ENTRIES);
    assert_eq!(LinkerConfig::monomorphic().effective_polymorphic_limit(), 1);
}

#[test]
fn test_linker_config_serde() {
    let config: LinkerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, LinkerConfig::default());

    let config: LinkerConfig = serde_json::from_str(r#"{"polymorphic_limit":2}"#).unwrap();
    assert_eq!(config.effective_polymorphic_limit(), 2);
    assert_eq!(
        serde_json::to_string(&config).unwrap(),
        r#"{"polymorphic_limit":2}"#
    );
}

#[test]
fn test_operation_variants() {
    assert_eq!(CallSiteDescriptor::get("a").operation(), Operation::GetProperty);
    assert_eq!(
        CallSiteDescriptor::set("a", TypeTag::Int).operation(),
        Operation::SetProperty
    );
    assert_eq!(CallSiteDescriptor::call("a").operation(), Operation::CallMethod);
}

#[test]
fn test_new_site_has_no_stats() {
    let site = CallSite::new(CallSiteDescriptor::get("a"));
    assert_eq!(site.stats(), CallSiteStats::default());
    assert_eq!(site.descriptor().name(), "a");
    assert!(site.cache().is_empty());
}

#[test]
fn test_link_errors_are_script_errors() {
    let mut ctx = ScriptContext::new();
    let global = ctx.global();
    let desc = CallSiteDescriptor::set("x", TypeTag::Int).scope().strict();
    let err: JsError = link(&mut ctx, &desc, global).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ReferenceError);
}

#[test]
fn test_invoke_uncached_set_returns_value() {
    let mut ctx = ScriptContext::new();
    let obj = ctx.heap_mut().allocate_object(None);
    let desc = CallSiteDescriptor::set("k", TypeTag::Int);
    assert_eq!(invoke_uncached(&mut ctx, &desc, obj, &[Value::Smi(3)]), Ok(Value::Smi(3)));
    assert_eq!(ctx.heap().get_own(obj, "k"), Some(Value::Smi(3)));
}

struct Constant(i32);

impl ScriptFunction for Constant {
    fn call(&self, _ctx: &mut ScriptContext, _this: Value, _args: &[Value]) -> Result<Value, JsError> {
        Ok(Value::Smi(self.0))
    }
}

#[test]
fn test_script_function_trait_objects() {
    let mut ctx = ScriptContext::new();
    let f = ctx.register_function("seven", Constant(7));
    assert_eq!(f, Value::NativeFunction("seven".into()));
    assert_eq!(ctx.call_function(&f, Value::Undefined, &[]), Ok(Value::Smi(7)));
}
