//! Function built-in.
//!
//! The `Function` global and `Function.prototype.call`, `apply` and `bind`, all routed
//! through the emulators in [`crate::runner::eval::function`]. Nothing here parses source
//! text, so the constructor itself only rejects.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObject;
use crate::runner::ds::value::JsValue;
use crate::runner::eval::function::{bind_receiver, bound_apply, bound_call};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

/// Register the Function built-in and its prototype methods with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let function = BuiltInObject::new("Function").with_constructor(function_constructor, 1);

    let prototype = BuiltInObject::new("Function.prototype")
        .add_method("call", 1, function_call)
        .add_method("apply", 2, function_apply)
        .add_method("bind", 1, function_bind)
        .add_method("toString", 0, function_to_string);

    registry.register_object(prototype);
    registry.register_object(function);
}

/// Function constructor. Building a function from source strings needs a parser.
fn function_constructor(
    _ctx: &mut EvalContext,
    _this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Err(JErrorType::TypeError(
        "Function constructor is not supported without a source parser".to_string(),
    ))
}

fn split_receiver(mut args: Vec<JsValue>) -> (JsValue, Vec<JsValue>) {
    if args.is_empty() {
        (JsValue::Undefined, args)
    } else {
        let receiver = args.remove(0);
        (receiver, args)
    }
}

/// Function.prototype.call
fn function_call(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let (receiver, args) = split_receiver(args);
    bound_call(ctx, &this, receiver, args)
}

/// Function.prototype.apply
fn function_apply(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let mut args = args.into_iter();
    let receiver = args.next().unwrap_or(JsValue::Undefined);
    let arg_array = args.next().unwrap_or(JsValue::Undefined);
    bound_apply(ctx, &this, receiver, arg_array)
}

/// Function.prototype.bind
fn function_bind(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let (receiver, args) = split_receiver(args);
    bind_receiver(ctx, &this, receiver, args)
}

/// Function.prototype.toString
fn function_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    if let JsValue::Object(o) = &this {
        if let Some(f) = (**o).borrow().as_function_object() {
            return Ok(JsValue::String(JsObject::to_string(f)));
        }
    }
    Err(JErrorType::TypeError(
        "Function.prototype.toString requires that 'this' be a Function".to_string(),
    ))
}
