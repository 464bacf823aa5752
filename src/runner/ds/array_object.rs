use crate::runner::ds::object::{
    ordinary_define_own_property, ordinary_own_property_keys, JsObject, JsObjectType, ObjectBase,
    ObjectType,
};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::type_conversion::to_array_length;
use crate::runner::ds::value::JsValue;
use std::cell::RefCell;
use std::rc::Rc;

lazy_static! {
    pub static ref ARRAY_LENGTH_PROP: PropertyKey = PropertyKey::Str("length".to_string());
}

/// An array: elements live in the ordinary property table under `Int` keys and `length` is
/// derived from them.
pub struct ArrayObject {
    base: ObjectBase,
    length: u32,
}
impl ArrayObject {
    pub fn new(proto: Option<JsObjectType>) -> Self {
        ArrayObject {
            base: ObjectBase::with_prototype(proto),
            length: 0,
        }
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    fn set_length(&mut self, new_len: u32) -> bool {
        if new_len < self.length {
            let doomed = self
                .base
                .keys()
                .filter(|k| matches!(k, PropertyKey::Int(i) if *i >= new_len))
                .cloned()
                .collect::<Vec<PropertyKey>>();
            for key in doomed {
                if !JsObject::delete(self, &key) {
                    return false;
                }
            }
        }
        self.length = new_len;
        true
    }
}
impl JsObject for ArrayObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<PropertyDescriptor> {
        if property == &*ARRAY_LENGTH_PROP {
            Some(PropertyDescriptor {
                value: JsValue::from(self.length as i64),
                writable: true,
                enumerable: false,
                configurable: false,
            })
        } else {
            self.base.get(property).cloned()
        }
    }

    fn define_own_property(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) -> bool {
        if property == *ARRAY_LENGTH_PROP {
            return match to_array_length(&descriptor.value) {
                Some(new_len) => self.set_length(new_len),
                None => false,
            };
        }
        let index = match &property {
            PropertyKey::Int(i) => Some(*i),
            _ => None,
        };
        if !ordinary_define_own_property(self, property, descriptor) {
            return false;
        }
        if let Some(idx) = index {
            if idx >= self.length {
                self.length = idx + 1;
            }
        }
        true
    }

    fn own_property_keys(&self) -> Vec<PropertyKey> {
        let mut keys = ordinary_own_property_keys(&self.base);
        let first_non_index = keys
            .iter()
            .position(|k| !matches!(k, PropertyKey::Int(_)))
            .unwrap_or(keys.len());
        keys.insert(first_non_index, ARRAY_LENGTH_PROP.clone());
        keys
    }

    fn class_name(&self) -> &'static str {
        "Array"
    }

    fn to_string(&self) -> String {
        format!("array({})", self.length)
    }
}

pub fn new_array_object(values: Vec<JsValue>, proto: Option<JsObjectType>) -> JsObjectType {
    let mut array = ArrayObject::new(proto);
    for (idx, value) in values.into_iter().enumerate() {
        array.define_own_property(
            PropertyKey::Int(idx as u32),
            PropertyDescriptor::new_data(value),
        );
    }
    Rc::new(RefCell::new(ObjectType::Array(array)))
}
