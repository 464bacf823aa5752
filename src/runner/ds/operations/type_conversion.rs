use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObject, JsObjectType, ObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::get;
use crate::runner::ds::primitive_object::new_primitive_object;
use crate::runner::ds::realm::{CodeRealm, WellKnownIntrinsics};
use crate::runner::ds::value::{JsNumberType, JsValue};
use std::rc::Rc;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_SYMBOL: &str = "symbol";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Symbol(_) => TYPE_STR_SYMBOL,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => match *(**o).borrow() {
            ObjectType::Function(_) => TYPE_STR_FUNCTION,
            _ => TYPE_STR_OBJECT,
        },
    }
}

pub fn to_boolean(v: &JsValue) -> bool {
    match v {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Symbol(_) => true,
        JsValue::Number(n) => match n {
            JsNumberType::NaN => false,
            n => n.as_f64() != 0.0,
        },
        JsValue::Object(_) => true,
    }
}

/// Wraps primitives in a fresh wrapper object linked to the matching intrinsic prototype.
pub fn to_object(realm: &CodeRealm, v: &JsValue) -> Result<JsObjectType, JErrorType> {
    let intrinsic = match v {
        JsValue::Undefined | JsValue::Null => {
            return Err(JErrorType::TypeError(format!(
                "'{}' cannot be converted to object",
                v
            )))
        }
        JsValue::Object(o) => return Ok(o.clone()),
        JsValue::Boolean(_) => WellKnownIntrinsics::BooleanPrototype,
        JsValue::String(_) => WellKnownIntrinsics::StringPrototype,
        JsValue::Symbol(_) => WellKnownIntrinsics::SymbolPrototype,
        JsValue::Number(_) => WellKnownIntrinsics::NumberPrototype,
    };
    Ok(new_primitive_object(
        v.clone(),
        Some(realm.get_intrinsics_value(intrinsic).clone()),
    ))
}

pub fn to_number(v: &JsValue) -> Result<JsNumberType, JErrorType> {
    match v {
        JsValue::Undefined => Ok(JsNumberType::NaN),
        JsValue::Null => Ok(JsNumberType::Integer(0)),
        JsValue::Boolean(b) => Ok(JsNumberType::Integer(if *b { 1 } else { 0 })),
        JsValue::String(s) => Ok(string_to_number(s)),
        JsValue::Symbol(s) => Err(JErrorType::TypeError(format!(
            "'{}' symbol cannot be converted to number",
            s
        ))),
        JsValue::Number(n) => Ok(n.clone()),
        JsValue::Object(o) => {
            let primitive = match o.borrow().as_primitive_object() {
                Some(p) => Some(p.primitive_value().clone()),
                None => None,
            };
            match primitive {
                Some(p) => to_number(&p),
                None => Ok(string_to_number(&to_js_string(v)?)),
            }
        }
    }
}

fn string_to_number(s: &str) -> JsNumberType {
    let s = s.trim();
    match s {
        "" => JsNumberType::Integer(0),
        "Infinity" | "+Infinity" => JsNumberType::PositiveInfinity,
        "-Infinity" => JsNumberType::NegativeInfinity,
        _ => {
            // Rust also accepts "inf" and "nan" spellings, which JS does not.
            if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                return JsNumberType::NaN;
            }
            if let Ok(i) = s.parse::<i64>() {
                return JsNumberType::Integer(i);
            }
            match s.parse::<f64>() {
                Ok(f) => JsNumberType::from_f64(f),
                Err(_) => JsNumberType::NaN,
            }
        }
    }
}

/// Valid array lengths are integral numbers in `0..2^32`.
pub fn to_array_length(v: &JsValue) -> Option<u32> {
    let f = match v {
        JsValue::Number(n) => n.as_f64(),
        _ => return None,
    };
    if f.fract() != 0.0 || f < 0.0 || f > u32::MAX as f64 {
        None
    } else {
        Some(f as u32)
    }
}

/// ToLength, clamped at zero. Infinite lengths saturate.
pub fn to_length(v: &JsValue) -> Result<usize, JErrorType> {
    let f = to_number(v)?.as_f64();
    Ok(if f.is_nan() || f <= 0.0 {
        0
    } else if f.is_infinite() || f >= usize::MAX as f64 {
        usize::MAX
    } else {
        f.floor() as usize
    })
}

pub fn to_property_key(v: &JsValue) -> Result<PropertyKey, JErrorType> {
    match v {
        JsValue::Symbol(s) => Ok(PropertyKey::Sym(s.clone())),
        _ => Ok(PropertyKey::from(to_js_string(v)?)),
    }
}

pub fn to_js_string(v: &JsValue) -> Result<String, JErrorType> {
    let mut seen = vec![];
    to_js_string_guarded(v, &mut seen)
}

fn to_js_string_guarded(v: &JsValue, seen: &mut Vec<JsObjectType>) -> Result<String, JErrorType> {
    match v {
        JsValue::Symbol(_) => Err(JErrorType::TypeError(
            "Cannot convert a Symbol value to a string".to_string(),
        )),
        JsValue::String(s) => Ok(s.clone()),
        JsValue::Boolean(b) => Ok(b.to_string()),
        JsValue::Number(n) => Ok(n.to_string()),
        JsValue::Undefined => Ok(TYPE_STR_UNDEFINED.to_string()),
        JsValue::Null => Ok(TYPE_STR_NULL.to_string()),
        JsValue::Object(o) => {
            if o.borrow().is_array() {
                return join_guarded(o, ",", seen);
            }
            let o = o.borrow();
            match &*o {
                ObjectType::Primitive(p) => to_js_string_guarded(p.primitive_value(), seen),
                ObjectType::Function(f) => Ok(JsObject::to_string(f)),
                _ => Ok("[object Object]".to_string()),
            }
        }
    }
}

/// `Array.prototype.join`: nullish elements print as empty strings, an array nested inside
/// itself prints as empty.
pub fn array_join(o: &JsObjectType, separator: &str) -> Result<String, JErrorType> {
    let mut seen = vec![];
    join_guarded(o, separator, &mut seen)
}

fn join_guarded(
    o: &JsObjectType,
    separator: &str,
    seen: &mut Vec<JsObjectType>,
) -> Result<String, JErrorType> {
    if seen.iter().any(|s| Rc::ptr_eq(s, o)) {
        return Ok(String::new());
    }
    seen.push(o.clone());
    let len = to_length(&get(o, &PropertyKey::from("length"))?)?;
    let mut parts = Vec::with_capacity(len.min(1024));
    for idx in 0..len {
        let element = get(o, &PropertyKey::from(idx))?;
        parts.push(if element.is_nullish() {
            String::new()
        } else {
            to_js_string_guarded(&element, seen)?
        });
    }
    seen.pop();
    Ok(parts.join(separator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::array_object::new_array_object;
    use crate::runner::ds::object::new_ordinary_object;
    use crate::runner::ds::object_property::PropertyDescriptor;

    #[test]
    fn test_get_type() {
        assert_eq!(get_type(&JsValue::Null), "null");
        assert_eq!(get_type(&JsValue::from(1)), "number");
        let arr = JsValue::Object(new_array_object(vec![], None));
        assert_eq!(get_type(&arr), "object");
    }

    #[test]
    fn test_to_object_wraps_with_intrinsic_prototype() {
        let realm = CodeRealm::new();
        let wrapped = to_object(&realm, &JsValue::from("hi")).unwrap();
        let proto = wrapped.borrow().as_js_object().get_prototype_of().unwrap();
        assert!(Rc::ptr_eq(
            &proto,
            realm.get_intrinsics_value(WellKnownIntrinsics::StringPrototype)
        ));
        assert!(to_object(&realm, &JsValue::Undefined).is_err());
        assert!(to_object(&realm, &JsValue::Null).is_err());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&JsValue::from(" 42 ")).unwrap(), JsNumberType::Integer(42));
        assert_eq!(to_number(&JsValue::from("1.5")).unwrap(), JsNumberType::Float(1.5));
        assert_eq!(to_number(&JsValue::from("inf")).unwrap(), JsNumberType::NaN);
        assert_eq!(
            to_number(&JsValue::from("-Infinity")).unwrap(),
            JsNumberType::NegativeInfinity
        );
        assert_eq!(to_number(&JsValue::Null).unwrap(), JsNumberType::Integer(0));
        assert_eq!(to_number(&JsValue::Undefined).unwrap(), JsNumberType::NaN);
    }

    #[test]
    fn test_to_length() {
        assert_eq!(to_length(&JsValue::from(-3)).unwrap(), 0);
        assert_eq!(to_length(&JsValue::from(2.7)).unwrap(), 2);
        assert_eq!(to_length(&JsValue::Undefined).unwrap(), 0);
    }

    #[test]
    fn test_array_to_string() {
        let arr = new_array_object(
            vec![JsValue::from(1), JsValue::Null, JsValue::from("x")],
            None,
        );
        assert_eq!(to_js_string(&JsValue::Object(arr)).unwrap(), "1,,x");
    }

    #[test]
    fn test_self_containing_array_prints_empty() {
        let arr = new_array_object(vec![JsValue::from(1)], None);
        arr.borrow_mut().as_js_object_mut().define_own_property(
            PropertyKey::Int(1),
            PropertyDescriptor::new_data(JsValue::Object(arr.clone())),
        );
        assert_eq!(array_join(&arr, "-").unwrap(), "1-");
    }

    #[test]
    fn test_plain_object_and_symbol_strings() {
        let o = JsValue::Object(new_ordinary_object(None));
        assert_eq!(to_js_string(&o).unwrap(), "[object Object]");
        let s = JsValue::Symbol(crate::runner::ds::symbol::SymbolData::new("s"));
        assert!(to_js_string(&s).is_err());
    }
}
