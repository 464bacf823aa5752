//! Boolean built-in.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::{to_boolean, TYPE_STR_BOOLEAN};
use crate::runner::ds::primitive_object::this_primitive_value;
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

use super::core::wrap_when_constructing;

/// Register the Boolean built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let boolean = BuiltInObject::new("Boolean").with_constructor(boolean_constructor, 1);

    let prototype = BuiltInObject::new("Boolean.prototype")
        .add_method("valueOf", 0, boolean_value_of)
        .add_method("toString", 0, boolean_to_string);

    registry.register_object(prototype);
    registry.register_object(boolean);
}

fn boolean_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let b = args.first().map_or(false, to_boolean);
    Ok(wrap_when_constructing(
        ctx,
        JsValue::Boolean(b),
        WellKnownIntrinsics::BooleanPrototype,
    ))
}

fn boolean_value_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    this_primitive_value(&this, TYPE_STR_BOOLEAN, "Boolean.prototype.valueOf")
}

fn boolean_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match this_primitive_value(&this, TYPE_STR_BOOLEAN, "Boolean.prototype.toString")? {
        JsValue::Boolean(b) => Ok(JsValue::String(b.to_string())),
        other => Ok(other),
    }
}
