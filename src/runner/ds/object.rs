use crate::runner::ds::array_object::ArrayObject;
use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::test_and_comparison::same_value;
use crate::runner::ds::primitive_object::PrimitiveObject;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ptr;
use std::rc::Rc;

pub type JsObjectType = Rc<RefCell<ObjectType>>;

pub enum ObjectType {
    Ordinary(OrdinaryObject),
    Function(FunctionObject),
    Array(ArrayObject),
    Primitive(PrimitiveObject),
}
impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(
            self.as_js_object().get_object_base(),
            other.as_js_object().get_object_base(),
        )
    }
}
impl ObjectType {
    pub fn is_callable(&self) -> bool {
        matches!(self, ObjectType::Function(_))
    }

    pub fn is_constructor(&self) -> bool {
        match self {
            ObjectType::Function(f) => f.is_constructor(),
            _ => false,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ObjectType::Array(_))
    }

    pub fn as_js_object(&self) -> &dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(o) => o,
            ObjectType::Array(o) => o,
            ObjectType::Primitive(o) => o,
        }
    }

    pub fn as_js_object_mut(&mut self) -> &mut dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(o) => o,
            ObjectType::Array(o) => o,
            ObjectType::Primitive(o) => o,
        }
    }

    pub fn as_function_object(&self) -> Option<&FunctionObject> {
        match self {
            ObjectType::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_primitive_object(&self) -> Option<&PrimitiveObject> {
        match self {
            ObjectType::Primitive(p) => Some(p),
            _ => None,
        }
    }
}

/// Own properties plus the prototype slot. Keys remember the order they were first added in.
pub struct ObjectBase {
    properties: HashMap<PropertyKey, PropertyDescriptor>,
    insertion_order: Vec<PropertyKey>,
    is_extensible: bool,
    prototype: Option<JsObjectType>,
}
impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
            insertion_order: Vec::new(),
            is_extensible: true,
            prototype: None,
        }
    }

    pub fn with_prototype(prototype: Option<JsObjectType>) -> Self {
        let mut base = ObjectBase::new();
        base.prototype = prototype;
        base
    }

    pub fn get(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.properties.get(property)
    }

    pub fn insert(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) {
        if !self.properties.contains_key(&property) {
            self.insertion_order.push(property.clone());
        }
        self.properties.insert(property, descriptor);
    }

    pub fn remove(&mut self, property: &PropertyKey) -> Option<PropertyDescriptor> {
        let removed = self.properties.remove(property);
        if removed.is_some() {
            self.insertion_order.retain(|k| k != property);
        }
        removed
    }

    pub fn keys(&self) -> impl Iterator<Item = &PropertyKey> {
        self.insertion_order.iter()
    }

    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insertion_order.is_empty()
    }
}
impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

pub trait JsObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase;

    fn get_object_base(&self) -> &ObjectBase;

    fn get_prototype_of(&self) -> Option<JsObjectType> {
        self.get_object_base().prototype.clone()
    }

    fn set_prototype_of(&mut self, prototype: Option<JsObjectType>) -> bool {
        let unchanged = match (&self.get_object_base().prototype, &prototype) {
            (None, None) => true,
            (Some(current), Some(p)) => Rc::ptr_eq(current, p),
            _ => false,
        };
        if unchanged {
            return true;
        }
        if !self.is_extensible() {
            return false;
        }
        let mut p = prototype.clone();
        while let Some(some_p) = p {
            // Our caller holds the mutable borrow of this object, so a failed borrow means the
            // new chain leads back here.
            p = match some_p.try_borrow() {
                Ok(o) => o.as_js_object().get_prototype_of(),
                Err(_) => return false,
            };
        }
        self.get_object_base_mut().prototype = prototype;
        true
    }

    fn is_extensible(&self) -> bool {
        self.get_object_base().is_extensible
    }

    fn prevent_extensions(&mut self) -> bool {
        self.get_object_base_mut().is_extensible = false;
        true
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<PropertyDescriptor> {
        self.get_object_base().get(property).cloned()
    }

    fn define_own_property(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) -> bool {
        ordinary_define_own_property(self, property, descriptor)
    }

    fn has_own_property(&self, property: &PropertyKey) -> bool {
        self.get_own_property(property).is_some()
    }

    fn delete(&mut self, property: &PropertyKey) -> bool {
        match self.get_own_property(property) {
            None => true,
            Some(pd) => {
                if pd.configurable {
                    self.get_object_base_mut().remove(property);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn own_property_keys(&self) -> Vec<PropertyKey> {
        ordinary_own_property_keys(self.get_object_base())
    }

    fn class_name(&self) -> &'static str {
        "Object"
    }

    fn to_string(&self) -> String {
        "object".to_string()
    }
}

pub fn ordinary_define_own_property<J: JsObject + ?Sized>(
    o: &mut J,
    property: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    match o.get_own_property(&property) {
        Some(current) => {
            if !current.configurable {
                if descriptor.configurable || descriptor.enumerable != current.enumerable {
                    return false;
                }
                if !current.writable
                    && (descriptor.writable || !same_value(&current.value, &descriptor.value))
                {
                    return false;
                }
            }
            o.get_object_base_mut().insert(property, descriptor);
            true
        }
        None => {
            if o.is_extensible() {
                o.get_object_base_mut().insert(property, descriptor);
                true
            } else {
                false
            }
        }
    }
}

/// Integer keys ascending, then string keys, then symbols, each group in insertion order.
pub fn ordinary_own_property_keys(base: &ObjectBase) -> Vec<PropertyKey> {
    let mut int_keys = vec![];
    let mut str_keys = vec![];
    let mut sym_keys = vec![];
    for key in base.keys() {
        match key {
            PropertyKey::Int(_) => int_keys.push(key.clone()),
            PropertyKey::Str(_) => str_keys.push(key.clone()),
            PropertyKey::Sym(_) => sym_keys.push(key.clone()),
        }
    }
    int_keys.sort_by_key(|k| match k {
        PropertyKey::Int(i) => *i,
        _ => 0,
    });

    let mut result = int_keys;
    result.append(&mut str_keys);
    result.append(&mut sym_keys);
    result
}

pub struct OrdinaryObject {
    base: ObjectBase,
}
impl JsObject for OrdinaryObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }
}

pub fn object_create(proto: Option<JsObjectType>) -> OrdinaryObject {
    OrdinaryObject {
        base: ObjectBase::with_prototype(proto),
    }
}

pub fn new_ordinary_object(proto: Option<JsObjectType>) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Ordinary(object_create(proto))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::value::JsValue;

    fn define(o: &JsObjectType, key: &str, value: JsValue) -> bool {
        o.borrow_mut()
            .as_js_object_mut()
            .define_own_property(PropertyKey::from(key), PropertyDescriptor::new_data(value))
    }

    #[test]
    fn test_own_keys_order() {
        let o = new_ordinary_object(None);
        define(&o, "b", JsValue::Null);
        define(&o, "2", JsValue::Null);
        define(&o, "a", JsValue::Null);
        define(&o, "0", JsValue::Null);
        let keys = o.borrow().as_js_object().own_property_keys();
        assert_eq!(
            keys,
            vec![
                PropertyKey::Int(0),
                PropertyKey::Int(2),
                PropertyKey::Str("b".to_string()),
                PropertyKey::Str("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_redefine_keeps_original_position() {
        let o = new_ordinary_object(None);
        define(&o, "x", JsValue::from(1));
        define(&o, "y", JsValue::from(2));
        define(&o, "x", JsValue::from(3));
        let keys = o.borrow().as_js_object().own_property_keys();
        assert_eq!(keys[0], PropertyKey::from("x"));
        assert_eq!(o.borrow().as_js_object().get_object_base().len(), 2);
    }

    #[test]
    fn test_non_configurable_property_survives_delete() {
        let o = new_ordinary_object(None);
        o.borrow_mut().as_js_object_mut().define_own_property(
            PropertyKey::from("fixed"),
            PropertyDescriptor::new_frozen(JsValue::from(1)),
        );
        assert!(!o
            .borrow_mut()
            .as_js_object_mut()
            .delete(&PropertyKey::from("fixed")));
        assert!(o
            .borrow()
            .as_js_object()
            .has_own_property(&PropertyKey::from("fixed")));
        // Deleting something that is not there succeeds.
        assert!(o
            .borrow_mut()
            .as_js_object_mut()
            .delete(&PropertyKey::from("missing")));
    }

    #[test]
    fn test_frozen_value_cannot_change() {
        let o = new_ordinary_object(None);
        o.borrow_mut().as_js_object_mut().define_own_property(
            PropertyKey::from("fixed"),
            PropertyDescriptor::new_frozen(JsValue::from(1)),
        );
        let changed = o.borrow_mut().as_js_object_mut().define_own_property(
            PropertyKey::from("fixed"),
            PropertyDescriptor::new_frozen(JsValue::from(2)),
        );
        assert!(!changed);
        let same = o.borrow_mut().as_js_object_mut().define_own_property(
            PropertyKey::from("fixed"),
            PropertyDescriptor::new_frozen(JsValue::from(1)),
        );
        assert!(same);
    }

    #[test]
    fn test_non_extensible_rejects_new_keys() {
        let o = new_ordinary_object(None);
        define(&o, "kept", JsValue::Null);
        o.borrow_mut().as_js_object_mut().prevent_extensions();
        assert!(!define(&o, "added", JsValue::Null));
        assert!(define(&o, "kept", JsValue::from(1)));
    }

    #[test]
    fn test_prototype_cycle_rejected() {
        let a = new_ordinary_object(None);
        let b = new_ordinary_object(Some(a.clone()));
        let linked = a
            .borrow_mut()
            .as_js_object_mut()
            .set_prototype_of(Some(b.clone()));
        assert!(!linked);
        assert!(a.borrow().as_js_object().get_prototype_of().is_none());

        let c = new_ordinary_object(None);
        assert!(a.borrow_mut().as_js_object_mut().set_prototype_of(Some(c.clone())));
        let proto = a.borrow().as_js_object().get_prototype_of().unwrap();
        assert!(Rc::ptr_eq(&proto, &c));
    }
}
