//! String built-in.
//!
//! Provides the String constructor and `String.prototype` methods.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::{to_js_string, TYPE_STR_STRING};
use crate::runner::ds::primitive_object::this_primitive_value;
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

use super::core::{is_constructing, wrap_when_constructing};

/// Register the String built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let string = BuiltInObject::new("String").with_constructor(string_constructor, 1);

    let prototype = BuiltInObject::new("String.prototype")
        .add_method("valueOf", 0, string_value_of)
        .add_method("toString", 0, string_value_of);

    registry.register_object(prototype);
    registry.register_object(string);
}

/// String constructor. Called without `new`, symbols convert to their description.
fn string_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let s = match args.first() {
        None => String::new(),
        Some(JsValue::Symbol(sym)) if !is_constructing(ctx) => sym.to_string(),
        Some(v) => to_js_string(v)?,
    };
    Ok(wrap_when_constructing(
        ctx,
        JsValue::String(s),
        WellKnownIntrinsics::StringPrototype,
    ))
}

/// String.prototype.valueOf and String.prototype.toString
fn string_value_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    this_primitive_value(&this, TYPE_STR_STRING, "String.prototype.valueOf")
}
