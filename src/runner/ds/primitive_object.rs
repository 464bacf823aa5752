//! Wrapper objects for boolean, number, string and symbol primitives.
//!
//! These are what a primitive receiver turns into before a callable sees it as `this`. String
//! wrappers additionally expose `length` and one read-only property per character.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{
    ordinary_define_own_property, ordinary_own_property_keys, JsObject, JsObjectType, ObjectBase,
    ObjectType,
};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::test_and_comparison::same_value;
use crate::runner::ds::operations::type_conversion::get_type;
use crate::runner::ds::value::JsValue;
use std::cell::RefCell;
use std::rc::Rc;

lazy_static! {
    static ref STRING_LENGTH_PROP: PropertyKey = PropertyKey::Str("length".to_string());
}

pub struct PrimitiveObject {
    base: ObjectBase,
    primitive_value: JsValue,
}
impl PrimitiveObject {
    pub fn new(primitive_value: JsValue, proto: Option<JsObjectType>) -> Self {
        debug_assert!(!primitive_value.is_object() && !primitive_value.is_nullish());
        PrimitiveObject {
            base: ObjectBase::with_prototype(proto),
            primitive_value,
        }
    }

    pub fn primitive_value(&self) -> &JsValue {
        &self.primitive_value
    }

    fn string_data(&self) -> Option<&str> {
        match &self.primitive_value {
            JsValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Character-indexed view of the wrapped string. Indices count chars, not UTF-16 units.
    fn string_own_property(&self, property: &PropertyKey) -> Option<PropertyDescriptor> {
        let s = self.string_data()?;
        match property {
            PropertyKey::Int(idx) => s
                .chars()
                .nth(*idx as usize)
                .map(|c| PropertyDescriptor {
                    value: JsValue::String(c.to_string()),
                    writable: false,
                    enumerable: true,
                    configurable: false,
                }),
            p if p == &*STRING_LENGTH_PROP => Some(PropertyDescriptor::new_frozen(
                JsValue::from(s.chars().count() as i64),
            )),
            _ => None,
        }
    }
}
impl JsObject for PrimitiveObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<PropertyDescriptor> {
        match self.string_own_property(property) {
            Some(desc) => Some(desc),
            None => self.base.get(property).cloned(),
        }
    }

    fn define_own_property(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) -> bool {
        if let Some(current) = self.string_own_property(&property) {
            return !descriptor.writable
                && !descriptor.configurable
                && descriptor.enumerable == current.enumerable
                && same_value(&descriptor.value, &current.value);
        }
        ordinary_define_own_property(self, property, descriptor)
    }

    fn own_property_keys(&self) -> Vec<PropertyKey> {
        let base_keys = ordinary_own_property_keys(&self.base);
        let s = match self.string_data() {
            Some(s) => s,
            None => return base_keys,
        };
        // Expando indices sit past the last char, so they extend the index run.
        let (mut index_keys, mut named_keys): (Vec<_>, Vec<_>) = base_keys
            .into_iter()
            .partition(|k| matches!(k, PropertyKey::Int(_)));
        let mut keys: Vec<PropertyKey> = (0..s.chars().count())
            .map(|idx| PropertyKey::Int(idx as u32))
            .collect();
        keys.append(&mut index_keys);
        keys.push(STRING_LENGTH_PROP.clone());
        keys.append(&mut named_keys);
        keys
    }

    fn class_name(&self) -> &'static str {
        match &self.primitive_value {
            JsValue::Boolean(_) => "Boolean",
            JsValue::Number(_) => "Number",
            JsValue::String(_) => "String",
            JsValue::Symbol(_) => "Symbol",
            _ => "Object",
        }
    }

    fn to_string(&self) -> String {
        format!("[{}: {}]", self.class_name(), self.primitive_value)
    }
}

pub fn new_primitive_object(primitive_value: JsValue, proto: Option<JsObjectType>) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Primitive(PrimitiveObject::new(
        primitive_value,
        proto,
    ))))
}

/// The `thisNumberValue`-style check shared by the wrapper prototypes' `valueOf`/`toString`.
pub fn this_primitive_value(
    this: &JsValue,
    type_str: &'static str,
    method: &str,
) -> Result<JsValue, JErrorType> {
    if get_type(this) == type_str {
        return Ok(this.clone());
    }
    if let JsValue::Object(o) = this {
        if let Some(p) = o.borrow().as_primitive_object() {
            if get_type(p.primitive_value()) == type_str {
                return Ok(p.primitive_value().clone());
            }
        }
    }
    Err(JErrorType::TypeError(format!(
        "{} requires that 'this' be a {}",
        method, type_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_wrapper_exposes_chars_and_length() {
        let o = new_primitive_object(JsValue::from("héllo"), None);
        let o = o.borrow();
        let obj = o.as_js_object();
        assert_eq!(
            obj.get_own_property(&PropertyKey::Int(1)).unwrap().value,
            JsValue::from("é")
        );
        assert_eq!(
            obj.get_own_property(&PropertyKey::from("length")).unwrap().value,
            JsValue::from(5)
        );
        assert!(obj.get_own_property(&PropertyKey::Int(5)).is_none());
        assert_eq!(obj.own_property_keys().len(), 6);
    }

    #[test]
    fn test_string_wrapper_index_is_read_only() {
        let o = new_primitive_object(JsValue::from("ab"), None);
        let redefined = o.borrow_mut().as_js_object_mut().define_own_property(
            PropertyKey::Int(0),
            PropertyDescriptor::new_data(JsValue::from("z")),
        );
        assert!(!redefined);
        assert!(!o.borrow_mut().as_js_object_mut().delete(&PropertyKey::Int(0)));
    }

    #[test]
    fn test_string_wrapper_key_order() {
        let o = new_primitive_object(JsValue::from("ab"), None);
        for key in [PropertyKey::from("x"), PropertyKey::Int(5), PropertyKey::Int(3)] {
            assert!(o
                .borrow_mut()
                .as_js_object_mut()
                .define_own_property(key, PropertyDescriptor::new_data(JsValue::from(1))));
        }
        assert_eq!(
            o.borrow().as_js_object().own_property_keys(),
            vec![
                PropertyKey::Int(0),
                PropertyKey::Int(1),
                PropertyKey::Int(3),
                PropertyKey::Int(5),
                PropertyKey::from("length"),
                PropertyKey::from("x"),
            ]
        );
    }

    #[test]
    fn test_number_wrapper_accepts_expando_properties() {
        let o = new_primitive_object(JsValue::from(7), None);
        assert!(o.borrow_mut().as_js_object_mut().define_own_property(
            PropertyKey::from("name"),
            PropertyDescriptor::new_data(JsValue::from("seven")),
        ));
        assert_eq!(o.borrow().as_js_object().own_property_keys().len(), 1);
        assert_eq!(o.borrow().as_js_object().class_name(), "Number");
    }

    #[test]
    fn test_this_primitive_value() {
        let wrapped = JsValue::Object(new_primitive_object(JsValue::from(3), None));
        assert_eq!(
            this_primitive_value(&wrapped, "number", "Number.prototype.valueOf").unwrap(),
            JsValue::from(3)
        );
        assert_eq!(
            this_primitive_value(&JsValue::from(4), "number", "Number.prototype.valueOf")
                .unwrap(),
            JsValue::from(4)
        );
        assert!(this_primitive_value(&wrapped, "string", "String.prototype.valueOf").is_err());
    }
}
