//! Tests for the core built-ins as scripts see them: looked up through the global object and
//! invoked with a receiver, the way `obj.method(...)` would.

extern crate jsbind;

use jsbind::runner::config::RuntimeConfig;
use jsbind::runner::ds::error::JErrorType;
use jsbind::runner::ds::object_property::PropertyKey;
use jsbind::runner::ds::operations::object::{create_data_property, get, get_v};
use jsbind::runner::ds::value::{JsNumberType, JsValue};
use jsbind::runner::eval::function::{bound_call, call_function, invoke};
use jsbind::runner::plugin::registry::BuiltInRegistry;
use jsbind::runner::plugin::types::{BuiltInObject, EvalContext};
use jsbind::runner::std_lib::console::ConsoleSink;

fn context() -> EvalContext {
    EvalContext::with_config(RuntimeConfig::default()).unwrap()
}

fn global(ctx: &EvalContext, name: &str) -> JsValue {
    ctx.get_binding(name).unwrap()
}

fn prototype_method(ctx: &EvalContext, ctor: &str, method: &str) -> JsValue {
    let ctor = global(ctx, ctor);
    let proto = get(ctor.as_object().unwrap(), &PropertyKey::from("prototype")).unwrap();
    get(proto.as_object().unwrap(), &PropertyKey::from(method)).unwrap()
}

// ============================================================================
// Function.prototype tests
// ============================================================================

mod function_prototype_tests {
    use super::*;

    fn get_name(ctx: &EvalContext) -> JsValue {
        JsValue::Object(ctx.new_function("getName", 0, |ctx, this, _args| {
            get_v(ctx.realm(), &this, &PropertyKey::from("name"))
        }))
    }

    #[test]
    fn test_call_reached_through_prototype() {
        let mut ctx = context();
        let f = get_name(&ctx);
        let liar = ctx.new_object();
        create_data_property(&liar, PropertyKey::from("name"), JsValue::from("liar"));
        let result = invoke(&mut ctx, &f, "call", vec![JsValue::Object(liar)]).unwrap();
        assert_eq!(result, JsValue::from("liar"));
    }

    #[test]
    fn test_apply_reached_through_prototype() {
        let mut ctx = context();
        let f = JsValue::Object(ctx.new_function("count", 0, |_ctx, _this, args| {
            Ok(JsValue::from(args.len() as i64))
        }));
        let args = JsValue::Object(ctx.new_array(vec![JsValue::from(1), JsValue::from(2)]));
        let result = invoke(&mut ctx, &f, "apply", vec![JsValue::Null, args]).unwrap();
        assert_eq!(result, JsValue::from(2));
    }

    #[test]
    fn test_call_of_call() {
        // Function.prototype.call.call(getName, liar)
        let mut ctx = context();
        let f = get_name(&ctx);
        let call = prototype_method(&ctx, "Function", "call");
        let liar = ctx.new_object();
        create_data_property(&liar, PropertyKey::from("name"), JsValue::from("liar"));
        let result = bound_call(&mut ctx, &call, f, vec![JsValue::Object(liar)]).unwrap();
        assert_eq!(result, JsValue::from("liar"));
    }

    #[test]
    fn test_bind_then_call() {
        let mut ctx = context();
        let f = get_name(&ctx);
        let liar = ctx.new_object();
        create_data_property(&liar, PropertyKey::from("name"), JsValue::from("liar"));
        let bound = invoke(&mut ctx, &f, "bind", vec![JsValue::Object(liar)]).unwrap();
        let result = invoke(&mut ctx, &bound, "call", vec![JsValue::Undefined]).unwrap();
        assert_eq!(result, JsValue::from("liar"));
    }
}

// ============================================================================
// Object tests
// ============================================================================

mod object_tests {
    use super::*;

    #[test]
    fn test_to_string_of_primitives() {
        let mut ctx = context();
        let to_string = prototype_method(&ctx, "Object", "toString");
        let cases = vec![
            (JsValue::Undefined, "[object Undefined]"),
            (JsValue::Null, "[object Null]"),
            (JsValue::from(1), "[object Number]"),
            (JsValue::from("s"), "[object String]"),
            (JsValue::from(true), "[object Boolean]"),
        ];
        for (receiver, expected) in cases {
            let result = call_function(&mut ctx, &to_string, receiver, vec![]).unwrap();
            assert_eq!(result, JsValue::from(expected));
        }
    }

    #[test]
    fn test_keys_of_array() {
        let mut ctx = context();
        let object = global(&ctx, "Object");
        let arr = JsValue::Object(ctx.new_array(vec![JsValue::from("a"), JsValue::from("b")]));
        let keys = invoke(&mut ctx, &object, "keys", vec![arr]).unwrap();
        let joined = invoke(&mut ctx, &keys, "join", vec![]).unwrap();
        assert_eq!(joined, JsValue::from("0,1"));
    }
}

// ============================================================================
// Array tests
// ============================================================================

mod array_tests {
    use super::*;

    #[test]
    fn test_push_then_join() {
        let mut ctx = context();
        let arr = JsValue::Object(ctx.new_array(vec![]));
        invoke(&mut ctx, &arr, "push", vec![JsValue::from(2), JsValue::from(3)]).unwrap();
        invoke(&mut ctx, &arr, "push", vec![JsValue::from(4)]).unwrap();
        assert_eq!(
            invoke(&mut ctx, &arr, "toString", vec![]).unwrap(),
            JsValue::from("2,3,4")
        );
    }

    #[test]
    fn test_generic_shift_via_call() {
        // Array.prototype.shift.call(arguments-like)
        let mut ctx = context();
        let shift = prototype_method(&ctx, "Array", "shift");
        let like = ctx.new_object();
        create_data_property(&like, PropertyKey::from("0"), JsValue::from("Person"));
        create_data_property(&like, PropertyKey::from("1"), JsValue::from("json"));
        create_data_property(&like, PropertyKey::from("length"), JsValue::from(2));
        let first = bound_call(&mut ctx, &shift, JsValue::Object(like.clone()), vec![]).unwrap();
        assert_eq!(first, JsValue::from("Person"));
        assert_eq!(get(&like, &PropertyKey::Int(0)).unwrap(), JsValue::from("json"));
        assert_eq!(get(&like, &PropertyKey::from("length")).unwrap(), JsValue::from(1));
    }
}

// ============================================================================
// Number tests
// ============================================================================

mod number_tests {
    use super::*;

    #[test]
    fn test_number_called_without_new() {
        let mut ctx = context();
        let number = global(&ctx, "Number");
        let n = bound_call(&mut ctx, &number, JsValue::Undefined, vec![JsValue::from("42")]).unwrap();
        assert_eq!(n, JsValue::from(42));
        let nan = bound_call(&mut ctx, &number, JsValue::Undefined, vec![JsValue::from("4x")]).unwrap();
        assert_eq!(nan, JsValue::Number(JsNumberType::NaN));
    }

    #[test]
    fn test_method_on_primitive_receiver() {
        let mut ctx = context();
        let result = invoke(&mut ctx, &JsValue::from(255), "toString", vec![JsValue::from(16)]).unwrap();
        assert_eq!(result, JsValue::from("ff"));
    }
}

// ============================================================================
// Console and registry tests
// ============================================================================

mod console_tests {
    use super::*;

    #[test]
    fn test_log_joins_arguments() {
        let mut ctx = context();
        let console = ConsoleSink::new_buffer();
        ctx.set_console(console.clone());
        let log = global(&ctx, "console");
        let arr = JsValue::Object(ctx.new_array(vec![JsValue::from(1), JsValue::from("a")]));
        invoke(&mut ctx, &log, "log", vec![JsValue::from("value:"), arr]).unwrap();
        invoke(&mut ctx, &log, "warn", vec![JsValue::from("careful")]).unwrap();
        assert_eq!(
            console.lines(),
            vec!["value: [ 1, 'a' ]".to_string(), "Warning: careful".to_string()]
        );
    }
}

mod registry_tests {
    use super::*;

    fn shout(_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
        match args.first() {
            Some(JsValue::String(s)) => Ok(JsValue::from(s.to_uppercase())),
            _ => Ok(JsValue::Undefined),
        }
    }

    #[test]
    fn test_custom_builtin_becomes_global() {
        let mut registry = BuiltInRegistry::with_core();
        registry.register_object(BuiltInObject::new("Text").add_method("shout", 1, shout));
        let mut ctx = EvalContext::with_registry(RuntimeConfig::default(), &registry).unwrap();
        let text = global(&ctx, "Text");
        let result = invoke(&mut ctx, &text, "shout", vec![JsValue::from("hey")]).unwrap();
        assert_eq!(result, JsValue::from("HEY"));
    }

    #[test]
    fn test_unknown_global_is_reference_error() {
        let ctx = context();
        match ctx.get_binding("Missing") {
            Err(JErrorType::ReferenceError(m)) => assert_eq!(m, "Missing is not defined"),
            other => panic!("expected a reference error, got {:?}", other),
        }
    }
}
