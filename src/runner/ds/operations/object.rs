use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{FunctionBehavior, FunctionObject, PROTOTYPE_PROP};
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::type_conversion::{to_length, to_object};
use crate::runner::ds::realm::CodeRealm;
use crate::runner::ds::value::JsValue;
use std::rc::Rc;

/// Upper bound on the number of arguments an array-like may expand into.
pub const MAX_ARGUMENTS_LENGTH: usize = 1 << 16;

/// `[[Get]]` walking the prototype chain. Only data properties exist, so the receiver is always
/// `o` itself.
pub fn get(o: &JsObjectType, p: &PropertyKey) -> Result<JsValue, JErrorType> {
    let mut current = o.clone();
    loop {
        let next = {
            let obj = (*current).borrow();
            let obj = obj.as_js_object();
            if let Some(desc) = obj.get_own_property(p) {
                return Ok(desc.value);
            }
            obj.get_prototype_of()
        };
        match next {
            Some(n) => current = n,
            None => return Ok(JsValue::Undefined),
        }
    }
}

pub fn get_v(realm: &CodeRealm, v: &JsValue, p: &PropertyKey) -> Result<JsValue, JErrorType> {
    let o = to_object(realm, v)?;
    get(&o, p)
}

pub fn get_method(realm: &CodeRealm, v: &JsValue, p: &PropertyKey) -> Result<JsValue, JErrorType> {
    let f = get_v(realm, v, p)?;
    match &f {
        JsValue::Undefined | JsValue::Null => Ok(JsValue::Undefined),
        JsValue::Object(o) if (**o).borrow().is_callable() => Ok(f),
        _ => Err(JErrorType::TypeError(format!("'{}' is not a function", p))),
    }
}

pub fn has_property(o: &JsObjectType, p: &PropertyKey) -> bool {
    let mut current = o.clone();
    loop {
        let next = {
            let obj = (*current).borrow();
            let obj = obj.as_js_object();
            if obj.has_own_property(p) {
                return true;
            }
            obj.get_prototype_of()
        };
        match next {
            Some(n) => current = n,
            None => return false,
        }
    }
}

/// `[[Set]]` for data properties: a read-only property anywhere up the chain blocks the write,
/// otherwise the value lands on `o` as an own property.
pub fn set(o: &JsObjectType, p: PropertyKey, value: JsValue) -> Result<bool, JErrorType> {
    let own = (**o).borrow().as_js_object().get_own_property(&p);
    if let Some(desc) = own {
        if !desc.writable {
            return Ok(false);
        }
        return Ok((**o)
            .borrow_mut()
            .as_js_object_mut()
            .define_own_property(p, desc.with_value(value)));
    }
    let mut proto = (**o).borrow().as_js_object().get_prototype_of();
    while let Some(pr) = proto {
        let inherited = (*pr).borrow().as_js_object().get_own_property(&p);
        if let Some(desc) = inherited {
            if !desc.writable {
                return Ok(false);
            }
            break;
        }
        proto = (*pr).borrow().as_js_object().get_prototype_of();
    }
    Ok((**o)
        .borrow_mut()
        .as_js_object_mut()
        .define_own_property(p, PropertyDescriptor::new_data(value)))
}

/// Strict-mode assignment: a rejected write is a `TypeError`.
pub fn put(o: &JsObjectType, p: PropertyKey, value: JsValue) -> Result<(), JErrorType> {
    let key = p.to_string();
    if set(o, p, value)? {
        Ok(())
    } else {
        Err(JErrorType::TypeError(format!(
            "Cannot assign to read only property '{}' of object",
            key
        )))
    }
}

pub fn define_property_or_throw(
    o: &JsObjectType,
    p: PropertyKey,
    desc: PropertyDescriptor,
) -> Result<(), JErrorType> {
    let key = p.to_string();
    if (**o).borrow_mut().as_js_object_mut().define_own_property(p, desc) {
        Ok(())
    } else {
        Err(JErrorType::TypeError(format!(
            "Cannot define property '{}', object is not extensible or property is not configurable",
            key
        )))
    }
}

pub fn create_data_property(o: &JsObjectType, p: PropertyKey, value: JsValue) -> bool {
    (**o)
        .borrow_mut()
        .as_js_object_mut()
        .define_own_property(p, PropertyDescriptor::new_data(value))
}

pub fn delete_property_or_throw(o: &JsObjectType, p: &PropertyKey) -> Result<(), JErrorType> {
    if (**o).borrow_mut().as_js_object_mut().delete(p) {
        Ok(())
    } else {
        Err(JErrorType::TypeError(format!("Cannot delete property '{}'", p)))
    }
}

/// Reads `length` and then each index below it, in order, through `[[Get]]`.
pub fn create_list_from_array_like(v: &JsValue) -> Result<Vec<JsValue>, JErrorType> {
    let o = match v {
        JsValue::Object(o) => o,
        _ => {
            return Err(JErrorType::TypeError(
                "CreateListFromArrayLike called on non-object".to_string(),
            ))
        }
    };
    let len = to_length(&get(o, &PropertyKey::from("length"))?)?;
    if len > MAX_ARGUMENTS_LENGTH {
        return Err(JErrorType::RangeError(
            "Too many arguments in function call".to_string(),
        ));
    }
    (0..len)
        .map(|idx| get(o, &PropertyKey::from(idx)))
        .collect()
}

/// The default `instanceof` check: is `C.prototype` somewhere on `O`'s prototype chain. Bound
/// functions answer for their target.
pub fn ordinary_has_instance(c: &JsValue, o: &JsValue) -> Result<bool, JErrorType> {
    let c_obj = match c {
        JsValue::Object(c_obj) if (**c_obj).borrow().is_callable() => c_obj.clone(),
        _ => return Ok(false),
    };
    let bound_target = match (*c_obj).borrow().as_function_object().map(FunctionObject::behavior) {
        Some(FunctionBehavior::Bound { target, .. }) => Some(target.clone()),
        _ => None,
    };
    if let Some(target) = bound_target {
        return ordinary_has_instance(&JsValue::Object(target), o);
    }
    let mut current = match o {
        JsValue::Object(o) => o.clone(),
        _ => return Ok(false),
    };
    let proto = match get(&c_obj, &PROTOTYPE_PROP)? {
        JsValue::Object(p) => p,
        other => {
            return Err(JErrorType::TypeError(format!(
                "Function has non-object prototype '{}' in instanceof check",
                other
            )))
        }
    };
    loop {
        let next = (*current).borrow().as_js_object().get_prototype_of();
        match next {
            None => return Ok(false),
            Some(n) => {
                if Rc::ptr_eq(&n, &proto) {
                    return Ok(true);
                }
                current = n;
            }
        }
    }
}
