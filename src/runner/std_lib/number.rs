//! Number built-in.
//!
//! Provides the Number constructor, a few static predicates and `Number.prototype` methods.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::{to_number, TYPE_STR_NUMBER};
use crate::runner::ds::primitive_object::this_primitive_value;
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

use super::core::wrap_when_constructing;

/// Register the Number built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let number = BuiltInObject::new("Number")
        .with_constructor(number_constructor, 1)
        .add_property("POSITIVE_INFINITY", JsValue::Number(JsNumberType::PositiveInfinity))
        .add_property("NEGATIVE_INFINITY", JsValue::Number(JsNumberType::NegativeInfinity))
        .add_property("NaN", JsValue::Number(JsNumberType::NaN))
        .add_property("MAX_SAFE_INTEGER", JsValue::Number(JsNumberType::Integer(9007199254740991)))
        .add_property("MIN_SAFE_INTEGER", JsValue::Number(JsNumberType::Integer(-9007199254740991)))
        .add_method("isNaN", 1, number_is_nan)
        .add_method("isInteger", 1, number_is_integer);

    let prototype = BuiltInObject::new("Number.prototype")
        .add_method("valueOf", 0, number_value_of)
        .add_method("toString", 1, number_to_string);

    registry.register_object(prototype);
    registry.register_object(number);
}

/// Number constructor.
fn number_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let n = match args.first() {
        None => JsNumberType::Integer(0),
        Some(v) => to_number(v)?,
    };
    Ok(wrap_when_constructing(
        ctx,
        JsValue::Number(n),
        WellKnownIntrinsics::NumberPrototype,
    ))
}

/// Number.isNaN - Check if value is NaN (strict).
fn number_is_nan(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let result = matches!(args.first(), Some(JsValue::Number(JsNumberType::NaN)));
    Ok(JsValue::Boolean(result))
}

/// Number.isInteger - Check if value is an integer.
fn number_is_integer(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let result = match args.first() {
        Some(JsValue::Number(JsNumberType::Integer(_))) => true,
        Some(JsValue::Number(JsNumberType::Float(f))) => f.fract() == 0.0 && f.is_finite(),
        _ => false,
    };
    Ok(JsValue::Boolean(result))
}

/// Number.prototype.valueOf
fn number_value_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    this_primitive_value(&this, TYPE_STR_NUMBER, "Number.prototype.valueOf")
}

/// Number.prototype.toString - radix 10 by default; other radices print the integral part.
fn number_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let n = match this_primitive_value(&this, TYPE_STR_NUMBER, "Number.prototype.toString")? {
        JsValue::Number(n) => n,
        _ => JsNumberType::NaN,
    };
    let radix = match args.first() {
        None | Some(JsValue::Undefined) => 10,
        Some(r) => to_number(r)?.as_f64() as u32,
    };
    if !(2..=36).contains(&radix) {
        return Err(JErrorType::RangeError(
            "toString() radix must be between 2 and 36".to_string(),
        ));
    }
    let result = match &n {
        JsNumberType::Integer(i) if radix != 10 => format_radix(*i as i128, radix),
        JsNumberType::Float(f) if radix != 10 => format_radix(*f as i128, radix),
        other => other.to_string(),
    };
    Ok(JsValue::String(result))
}

fn format_radix(mut n: i128, radix: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let negative = n < 0;
    if negative {
        n = -n;
    }

    let mut result = Vec::new();
    while n > 0 {
        result.push(DIGITS[(n % radix as i128) as usize] as char);
        n /= radix as i128;
    }

    if negative {
        result.push('-');
    }

    result.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::config::RuntimeConfig;
    use crate::runner::ds::primitive_object::new_primitive_object;

    fn context() -> EvalContext {
        EvalContext::with_config(RuntimeConfig::default()).unwrap()
    }

    #[test]
    fn test_value_of_unwraps() {
        let mut ctx = context();
        let wrapped = JsValue::Object(new_primitive_object(JsValue::from(7), None));
        assert_eq!(number_value_of(&mut ctx, wrapped, vec![]).unwrap(), JsValue::from(7));
        assert!(number_value_of(&mut ctx, JsValue::from("7"), vec![]).is_err());
    }

    #[test]
    fn test_to_string_radix() {
        let mut ctx = context();
        assert_eq!(
            number_to_string(&mut ctx, JsValue::from(255), vec![JsValue::from(16)]).unwrap(),
            JsValue::from("ff")
        );
        assert_eq!(
            number_to_string(&mut ctx, JsValue::from(-5), vec![JsValue::from(2)]).unwrap(),
            JsValue::from("-101")
        );
        assert_eq!(
            number_to_string(&mut ctx, JsValue::from(1.5), vec![]).unwrap(),
            JsValue::from("1.5")
        );
        assert!(number_to_string(&mut ctx, JsValue::from(1), vec![JsValue::from(1)]).is_err());
    }

    #[test]
    fn test_constructor_converts() {
        let mut ctx = context();
        assert_eq!(
            number_constructor(&mut ctx, JsValue::Undefined, vec![JsValue::from("12")]).unwrap(),
            JsValue::from(12)
        );
        assert_eq!(
            number_constructor(&mut ctx, JsValue::Undefined, vec![]).unwrap(),
            JsValue::from(0)
        );
    }
}
