use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::type_conversion::{
    get_type, TYPE_STR_NULL, TYPE_STR_NUMBER, TYPE_STR_UNDEFINED,
};
use crate::runner::ds::value::{JsNumberType, JsValue};
use std::rc::Rc;

fn is_same_value(a: &JsValue, b: &JsValue, strict_mode: bool) -> bool {
    let type_a = get_type(a);
    if type_a != get_type(b) {
        return false;
    }
    if type_a == TYPE_STR_UNDEFINED || type_a == TYPE_STR_NULL {
        return true;
    }
    if type_a == TYPE_STR_NUMBER {
        if let (JsValue::Number(na), JsValue::Number(nb)) = (a, b) {
            return match (na, nb) {
                (JsNumberType::NaN, JsNumberType::NaN) => !strict_mode,
                (JsNumberType::NaN, _) | (_, JsNumberType::NaN) => false,
                _ => {
                    let (fa, fb) = (na.as_f64(), nb.as_f64());
                    // SameValue tells +0 and -0 apart, === does not.
                    if !strict_mode && fa == 0.0 && fb == 0.0 {
                        fa.is_sign_negative() == fb.is_sign_negative()
                    } else {
                        fa == fb
                    }
                }
            };
        }
        return false;
    }
    match (a, b) {
        (JsValue::String(x), JsValue::String(y)) => x == y,
        (JsValue::Boolean(x), JsValue::Boolean(y)) => x == y,
        (JsValue::Symbol(x), JsValue::Symbol(y)) => x == y,
        (JsValue::Object(x), JsValue::Object(y)) => same_object(x, y),
        _ => false,
    }
}

pub fn same_object(a: &JsObjectType, b: &JsObjectType) -> bool {
    Rc::ptr_eq(a, b)
}

pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, false)
}

pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_value_numbers() {
        let nan = JsValue::Number(JsNumberType::NaN);
        assert!(same_value(&nan, &nan));
        assert!(!strict_equality_comparison(&nan, &nan));
        assert!(same_value(&JsValue::from(2), &JsValue::from(2.0)));
        let neg_zero = JsValue::Number(JsNumberType::Float(-0.0));
        assert!(!same_value(&neg_zero, &JsValue::from(0)));
        assert!(strict_equality_comparison(&neg_zero, &JsValue::from(0)));
    }

    #[test]
    fn test_same_value_mixed_types() {
        assert!(!same_value(&JsValue::from("1"), &JsValue::from(1)));
        assert!(same_value(&JsValue::Undefined, &JsValue::Undefined));
        assert!(!same_value(&JsValue::Undefined, &JsValue::Null));
    }
}
