//! Symbol built-in.
//!
//! `Symbol(description)` mints a fresh symbol; `Symbol.hasInstance` and `Symbol.toStringTag`
//! expose the well-known symbols the runtime consults.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::{to_js_string, TYPE_STR_SYMBOL};
use crate::runner::ds::primitive_object::this_primitive_value;
use crate::runner::ds::symbol::{SymbolData, SYMBOL_HAS_INSTANCE, SYMBOL_TO_STRING_TAG};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

use super::core::is_constructing;

/// Register the Symbol built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let symbol = BuiltInObject::new("Symbol")
        .with_constructor(symbol_constructor, 0)
        .add_property("hasInstance", JsValue::Symbol(SYMBOL_HAS_INSTANCE.clone()))
        .add_property("toStringTag", JsValue::Symbol(SYMBOL_TO_STRING_TAG.clone()));

    let prototype = BuiltInObject::new("Symbol.prototype")
        .add_method("valueOf", 0, symbol_value_of)
        .add_method("toString", 0, symbol_to_string);

    registry.register_object(prototype);
    registry.register_object(symbol);
}

fn symbol_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    if is_constructing(ctx) {
        return Err(JErrorType::TypeError("Symbol is not a constructor".to_string()));
    }
    let description = match args.first() {
        None | Some(JsValue::Undefined) => String::new(),
        Some(v) => to_js_string(v)?,
    };
    Ok(JsValue::Symbol(SymbolData::new(description)))
}

fn symbol_value_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    this_primitive_value(&this, TYPE_STR_SYMBOL, "Symbol.prototype.valueOf")
}

fn symbol_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let sym = this_primitive_value(&this, TYPE_STR_SYMBOL, "Symbol.prototype.toString")?;
    Ok(JsValue::String(sym.to_string()))
}
