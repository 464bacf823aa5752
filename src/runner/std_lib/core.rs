//! Core built-ins registration.
//!
//! This module provides the function to register all core built-in objects
//! with the BuiltInRegistry.

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::primitive_object::new_primitive_object;
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::EvalContext;

use super::array;
use super::boolean;
use super::console;
use super::function;
use super::number;
use super::object;
use super::string;
use super::symbol;

/// Register all core built-in objects with the registry.
pub fn register_core_builtins(registry: &mut BuiltInRegistry) {
    object::register(registry);
    function::register(registry);
    array::register(registry);
    boolean::register(registry);
    number::register(registry);
    string::register(registry);
    symbol::register(registry);
    console::register(registry);
}

/// Whether the running native was reached through `construct` rather than a call. Wrapper
/// constructors use it to tell `new Number(1)` from `Number(1)`.
pub(crate) fn is_constructing(ctx: &EvalContext) -> bool {
    ctx.new_target().is_some()
}

/// The result of a wrapper constructor: a wrapper object under `new`, the primitive otherwise.
pub(crate) fn wrap_when_constructing(
    ctx: &EvalContext,
    primitive: JsValue,
    intrinsic: WellKnownIntrinsics,
) -> JsValue {
    if is_constructing(ctx) {
        let wrapper: JsObjectType =
            new_primitive_object(primitive, Some(ctx.intrinsic(intrinsic)));
        JsValue::Object(wrapper)
    } else {
        primitive
    }
}
