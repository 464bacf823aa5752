//! Object built-in.
//!
//! Provides the Object constructor, its static helpers and `Object.prototype` methods.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::new_ordinary_object;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::get;
use crate::runner::ds::operations::type_conversion::{to_object, to_property_key};
use crate::runner::ds::symbol::SYMBOL_TO_STRING_TAG;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};
use std::rc::Rc;

/// Register the Object built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let object = BuiltInObject::new("Object")
        .with_constructor(object_constructor, 1)
        .add_method("create", 2, object_create)
        .add_method("getPrototypeOf", 1, object_get_prototype_of)
        .add_method("setPrototypeOf", 2, object_set_prototype_of)
        .add_method("keys", 1, object_keys);

    let prototype = BuiltInObject::new("Object.prototype")
        .add_method("hasOwnProperty", 1, object_has_own_property)
        .add_method("isPrototypeOf", 1, object_is_prototype_of)
        .add_method("valueOf", 0, object_value_of)
        .add_method("toString", 0, object_to_string);

    registry.register_object(prototype);
    registry.register_object(object);
}

fn arg(args: &[JsValue], idx: usize) -> JsValue {
    args.get(idx).cloned().unwrap_or(JsValue::Undefined)
}

/// Object constructor: a fresh object for nullish input, the input wrapped otherwise.
fn object_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let value = arg(&args, 0);
    if value.is_nullish() {
        Ok(JsValue::Object(ctx.new_object()))
    } else {
        Ok(JsValue::Object(to_object(ctx.realm(), &value)?))
    }
}

/// Object.create - New object with the given prototype (or none, for `null`).
fn object_create(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match arg(&args, 0) {
        JsValue::Object(proto) => Ok(JsValue::Object(new_ordinary_object(Some(proto)))),
        JsValue::Null => Ok(JsValue::Object(new_ordinary_object(None))),
        other => Err(JErrorType::TypeError(format!(
            "Object prototype may only be an Object or null: {}",
            other
        ))),
    }
}

/// Object.getPrototypeOf
fn object_get_prototype_of(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let o = to_object(ctx.realm(), &arg(&args, 0))?;
    let proto = (*o).borrow().as_js_object().get_prototype_of();
    Ok(match proto {
        Some(p) => JsValue::Object(p),
        None => JsValue::Null,
    })
}

/// Object.setPrototypeOf
fn object_set_prototype_of(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let target = arg(&args, 0);
    if target.is_nullish() {
        return Err(JErrorType::TypeError(
            "Object.setPrototypeOf called on null or undefined".to_string(),
        ));
    }
    let proto = match arg(&args, 1) {
        JsValue::Object(p) => Some(p),
        JsValue::Null => None,
        other => {
            return Err(JErrorType::TypeError(format!(
                "Object prototype may only be an Object or null: {}",
                other
            )))
        }
    };
    if let JsValue::Object(o) = &target {
        if !(**o).borrow_mut().as_js_object_mut().set_prototype_of(proto) {
            return Err(JErrorType::TypeError(
                "Cyclic __proto__ value or object is not extensible".to_string(),
            ));
        }
    }
    Ok(target)
}

/// Object.keys - Enumerable own string keys, in property order.
fn object_keys(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let o = to_object(ctx.realm(), &arg(&args, 0))?;
    let names = {
        let obj = (*o).borrow();
        let obj = obj.as_js_object();
        obj.own_property_keys()
            .into_iter()
            .filter(|k| !k.is_symbol())
            .filter(|k| obj.get_own_property(k).map_or(false, |d| d.enumerable))
            .map(|k| JsValue::String(k.to_string()))
            .collect::<Vec<JsValue>>()
    };
    Ok(JsValue::Object(ctx.new_array(names)))
}

/// Object.prototype.hasOwnProperty
fn object_has_own_property(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let key = to_property_key(&arg(&args, 0))?;
    let o = to_object(ctx.realm(), &this)?;
    let has = (*o).borrow().as_js_object().has_own_property(&key);
    Ok(JsValue::Boolean(has))
}

/// Object.prototype.isPrototypeOf
fn object_is_prototype_of(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let mut current = match arg(&args, 0) {
        JsValue::Object(v) => v,
        _ => return Ok(JsValue::Boolean(false)),
    };
    let o = to_object(ctx.realm(), &this)?;
    loop {
        let next = (*current).borrow().as_js_object().get_prototype_of();
        match next {
            None => return Ok(JsValue::Boolean(false)),
            Some(p) => {
                if Rc::ptr_eq(&p, &o) {
                    return Ok(JsValue::Boolean(true));
                }
                current = p;
            }
        }
    }
}

/// Object.prototype.valueOf
fn object_value_of(
    ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::Object(to_object(ctx.realm(), &this)?))
}

/// Object.prototype.toString - `[object Tag]`, honouring `@@toStringTag`.
fn object_to_string(
    ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let tag = match &this {
        JsValue::Undefined => "Undefined".to_string(),
        JsValue::Null => "Null".to_string(),
        _ => {
            let o = to_object(ctx.realm(), &this)?;
            match get(&o, &PropertyKey::Sym(SYMBOL_TO_STRING_TAG.clone()))? {
                JsValue::String(tag) => tag,
                _ => {
                    let class_name = (*o).borrow().as_js_object().class_name();
                    class_name.to_string()
                }
            }
        }
    };
    Ok(JsValue::String(format!("[object {}]", tag)))
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
    fn test_object_create_links_prototype() {
        let mut ctx = context();
        let proto = ctx.new_object();
        let created = object_create(&mut ctx, JsValue::Undefined, vec![JsValue::Object(proto.clone())])
            .unwrap();
        let fetched = object_get_prototype_of(&mut ctx, JsValue::Undefined, vec![created]).unwrap();
        assert_eq!(fetched, JsValue::Object(proto));
        assert!(object_create(&mut ctx, JsValue::Undefined, vec![JsValue::from(1)]).is_err());
    }

    #[test]
    fn test_has_own_property_ignores_inherited() {
        let mut ctx = context();
        let proto = ctx.new_object();
        create_data_property(&proto, PropertyKey::from("inherited"), JsValue::from(1));
        let o = new_ordinary_object(Some(proto));
        create_data_property(&o, PropertyKey::from("own"), JsValue::from(2));
        let this = JsValue::Object(o);
        assert_eq!(
            object_has_own_property(&mut ctx, this.clone(), vec![JsValue::from("own")]).unwrap(),
            JsValue::Boolean(true)
        );
        assert_eq!(
            object_has_own_property(&mut ctx, this, vec![JsValue::from("inherited")]).unwrap(),
            JsValue::Boolean(false)
        );
    }

    #[test]
    fn test_to_string_tags() {
        let mut ctx = context();
        let arr = JsValue::Object(ctx.new_array(vec![]));
        assert_eq!(
            object_to_string(&mut ctx, arr, vec![]).unwrap(),
            JsValue::from("[object Array]")
        );
        assert_eq!(
            object_to_string(&mut ctx, JsValue::Null, vec![]).unwrap(),
            JsValue::from("[object Null]")
        );
        assert_eq!(
            object_to_string(&mut ctx, JsValue::from(3), vec![]).unwrap(),
            JsValue::from("[object Number]")
        );
    }

    #[test]
    fn test_keys_skip_hidden_properties() {
        let mut ctx = context();
        let o = ctx.new_object();
        create_data_property(&o, PropertyKey::from("b"), JsValue::from(1));
        create_data_property(&o, PropertyKey::from("1"), JsValue::from(2));
        let keys = object_keys(&mut ctx, JsValue::Undefined, vec![JsValue::Object(o)]).unwrap();
        assert_eq!(
            crate::runner::ds::operations::type_conversion::to_js_string(&keys).unwrap(),
            "1,b"
        );
    }
}
