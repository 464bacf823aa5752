//! Array built-in.
//!
//! Provides the Array constructor and the `Array.prototype` methods the runtime needs. The
//! prototype methods are generic: they work on any array-like `this`, not only on arrays.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::{delete_property_or_throw, get, has_property, put};
use crate::runner::ds::operations::type_conversion::{
    array_join, to_array_length, to_js_string, to_length, to_object,
};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

lazy_static! {
    static ref LENGTH_KEY: PropertyKey = PropertyKey::Str("length".to_string());
}

/// Register the Array built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let array = BuiltInObject::new("Array")
        .with_constructor(array_constructor, 1)
        .add_method("isArray", 1, is_array);

    let prototype = BuiltInObject::new("Array.prototype")
        .add_method("push", 1, array_push)
        .add_method("pop", 0, array_pop)
        .add_method("shift", 0, array_shift)
        .add_method("join", 1, array_join_method)
        .add_method("toString", 0, array_to_string);

    registry.register_object(prototype);
    registry.register_object(array);
}

fn length_of(o: &JsObjectType) -> Result<usize, JErrorType> {
    to_length(&get(o, &LENGTH_KEY)?)
}

fn index_key(idx: usize) -> PropertyKey {
    PropertyKey::from(idx)
}

/// Array constructor. A single numeric argument is a length, anything else lists the elements.
fn array_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    if let [len @ JsValue::Number(_)] = args.as_slice() {
        let len = to_array_length(len)
            .ok_or_else(|| JErrorType::RangeError("Invalid array length".to_string()))?;
        let array = ctx.new_array(vec![]);
        put(&array, LENGTH_KEY.clone(), JsValue::from(len as i64))?;
        return Ok(JsValue::Object(array));
    }
    Ok(JsValue::Object(ctx.new_array(args)))
}

/// Array.isArray
fn is_array(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let result = match args.first() {
        Some(JsValue::Object(o)) => (**o).borrow().is_array(),
        _ => false,
    };
    Ok(JsValue::Boolean(result))
}

/// Array.prototype.push
fn array_push(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let o = to_object(ctx.realm(), &this)?;
    let mut len = length_of(&o)?;
    for value in args {
        put(&o, index_key(len), value)?;
        len += 1;
    }
    put(&o, LENGTH_KEY.clone(), JsValue::from(len as i64))?;
    Ok(JsValue::from(len as i64))
}

/// Array.prototype.pop
fn array_pop(
    ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let o = to_object(ctx.realm(), &this)?;
    let len = length_of(&o)?;
    if len == 0 {
        put(&o, LENGTH_KEY.clone(), JsValue::from(0))?;
        return Ok(JsValue::Undefined);
    }
    let last = index_key(len - 1);
    let element = get(&o, &last)?;
    delete_property_or_throw(&o, &last)?;
    put(&o, LENGTH_KEY.clone(), JsValue::from((len - 1) as i64))?;
    Ok(element)
}

/// Array.prototype.shift - Removes the first element and moves the rest down by one.
fn array_shift(
    ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let o = to_object(ctx.realm(), &this)?;
    let len = length_of(&o)?;
    if len == 0 {
        put(&o, LENGTH_KEY.clone(), JsValue::from(0))?;
        return Ok(JsValue::Undefined);
    }
    let first = get(&o, &index_key(0))?;
    for k in 1..len {
        let from = index_key(k);
        let to = index_key(k - 1);
        if has_property(&o, &from) {
            let value = get(&o, &from)?;
            put(&o, to, value)?;
        } else {
            delete_property_or_throw(&o, &to)?;
        }
    }
    delete_property_or_throw(&o, &index_key(len - 1))?;
    put(&o, LENGTH_KEY.clone(), JsValue::from((len - 1) as i64))?;
    Ok(first)
}

/// Array.prototype.join
fn array_join_method(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let o = to_object(ctx.realm(), &this)?;
    let separator = match args.first() {
        None | Some(JsValue::Undefined) => ",".to_string(),
        Some(sep) => to_js_string(sep)?,
    };
    Ok(JsValue::String(array_join(&o, &separator)?))
}

/// Array.prototype.toString
fn array_to_string(
    ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let o = to_object(ctx.realm(), &this)?;
    Ok(JsValue::String(array_join(&o, ",")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::config::RuntimeConfig;
    use crate::runner::ds::operations::object::create_data_property;

    fn context() -> EvalContext {
        EvalContext::with_config(RuntimeConfig::default()).unwrap()
    }

    #[test]
    fn test_push_pop() {
        let mut ctx = context();
        let arr = JsValue::Object(ctx.new_array(vec![JsValue::from(1)]));
        assert_eq!(
            array_push(&mut ctx, arr.clone(), vec![JsValue::from(2), JsValue::from(3)]).unwrap(),
            JsValue::from(3)
        );
        assert_eq!(array_pop(&mut ctx, arr.clone(), vec![]).unwrap(), JsValue::from(3));
        assert_eq!(
            array_to_string(&mut ctx, arr, vec![]).unwrap(),
            JsValue::from("1,2")
        );
    }

    #[test]
    fn test_shift_on_array_like() {
        let mut ctx = context();
        let like = ctx.new_object();
        create_data_property(&like, PropertyKey::from("0"), JsValue::from("ctor"));
        create_data_property(&like, PropertyKey::from("1"), JsValue::from("liar"));
        create_data_property(&like, PropertyKey::from("2"), JsValue::from(22));
        create_data_property(&like, LENGTH_KEY.clone(), JsValue::from(3));
        let first = array_shift(&mut ctx, JsValue::Object(like.clone()), vec![]).unwrap();
        assert_eq!(first, JsValue::from("ctor"));
        assert_eq!(get(&like, &LENGTH_KEY).unwrap(), JsValue::from(2));
        assert_eq!(get(&like, &PropertyKey::Int(0)).unwrap(), JsValue::from("liar"));
        assert!(!has_property(&like, &PropertyKey::Int(2)));
    }

    #[test]
    fn test_join_separator() {
        let mut ctx = context();
        let arr = JsValue::Object(ctx.new_array(vec![
            JsValue::from(2),
            JsValue::from(3),
            JsValue::from(4),
        ]));
        assert_eq!(
            array_join_method(&mut ctx, arr.clone(), vec![JsValue::from(" - ")]).unwrap(),
            JsValue::from("2 - 3 - 4")
        );
        assert_eq!(
            array_join_method(&mut ctx, arr, vec![]).unwrap(),
            JsValue::from("2,3,4")
        );
    }

    #[test]
    fn test_constructor_length_form() {
        let mut ctx = context();
        let arr = array_constructor(&mut ctx, JsValue::Undefined, vec![JsValue::from(3)]).unwrap();
        assert_eq!(
            array_to_string(&mut ctx, arr.clone(), vec![]).unwrap(),
            JsValue::from(",,")
        );
        assert_eq!(
            is_array(&mut ctx, JsValue::Undefined, vec![arr]).unwrap(),
            JsValue::Boolean(true)
        );
        assert!(array_constructor(&mut ctx, JsValue::Undefined, vec![JsValue::from(-1)]).is_err());
    }
}
