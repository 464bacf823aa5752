use crate::runner::config::RuntimeConfig;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{
    create_function_object, link_constructor_prototype, FunctionBehavior, FunctionKind,
};
use crate::runner::ds::object::{new_ordinary_object, JsObjectType};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::object::define_property_or_throw;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WellKnownIntrinsics {
    ObjectPrototype,
    FunctionPrototype,
    ArrayPrototype,
    BooleanPrototype,
    NumberPrototype,
    StringPrototype,
    SymbolPrototype,
}
impl WellKnownIntrinsics {
    pub const ALL: [WellKnownIntrinsics; 7] = [
        WellKnownIntrinsics::ObjectPrototype,
        WellKnownIntrinsics::FunctionPrototype,
        WellKnownIntrinsics::ArrayPrototype,
        WellKnownIntrinsics::BooleanPrototype,
        WellKnownIntrinsics::NumberPrototype,
        WellKnownIntrinsics::StringPrototype,
        WellKnownIntrinsics::SymbolPrototype,
    ];

    /// The name built-ins are registered under, e.g. `Function.prototype`.
    pub fn name(&self) -> &'static str {
        match self {
            WellKnownIntrinsics::ObjectPrototype => "Object.prototype",
            WellKnownIntrinsics::FunctionPrototype => "Function.prototype",
            WellKnownIntrinsics::ArrayPrototype => "Array.prototype",
            WellKnownIntrinsics::BooleanPrototype => "Boolean.prototype",
            WellKnownIntrinsics::NumberPrototype => "Number.prototype",
            WellKnownIntrinsics::StringPrototype => "String.prototype",
            WellKnownIntrinsics::SymbolPrototype => "Symbol.prototype",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        WellKnownIntrinsics::ALL
            .iter()
            .find(|i| i.name() == name)
            .copied()
    }
}

pub struct CodeRealm {
    intrinsics: HashMap<WellKnownIntrinsics, JsObjectType>,
    global_this: JsObjectType,
}
impl CodeRealm {
    /// Intrinsic prototypes and an empty global object. Nothing is callable yet; see
    /// [`CodeRealm::install_builtins`].
    pub fn new() -> Self {
        let object_prototype = new_ordinary_object(None);
        let mut intrinsics = HashMap::new();
        for intrinsic in WellKnownIntrinsics::ALL.iter() {
            let value = if let WellKnownIntrinsics::ObjectPrototype = intrinsic {
                object_prototype.clone()
            } else {
                new_ordinary_object(Some(object_prototype.clone()))
            };
            intrinsics.insert(*intrinsic, value);
        }
        CodeRealm {
            intrinsics,
            global_this: new_ordinary_object(Some(object_prototype)),
        }
    }

    pub fn get_intrinsics_value(&self, intrinsic: WellKnownIntrinsics) -> &JsObjectType {
        // Every variant is inserted by `new`.
        &self.intrinsics[&intrinsic]
    }

    pub fn global_object(&self) -> &JsObjectType {
        &self.global_this
    }

    /// Materializes every registered built-in. Entries named after an intrinsic get their methods
    /// attached to it; any other entry becomes a global binding, as a constructor function when it
    /// has one and a plain object otherwise.
    pub fn install_builtins(&self, registry: &BuiltInRegistry) -> Result<(), JErrorType> {
        for builtin in registry.objects() {
            let target = match WellKnownIntrinsics::from_name(&builtin.name) {
                Some(intrinsic) => self.get_intrinsics_value(intrinsic).clone(),
                None => {
                    let target = match builtin.constructor {
                        Some(ctor) => {
                            let f = create_function_object(
                                self,
                                &builtin.name,
                                builtin.constructor_length,
                                FunctionKind::Normal,
                                FunctionBehavior::Native(ctor),
                            );
                            let proto_name = format!("{}.prototype", builtin.name);
                            if let Some(intrinsic) = WellKnownIntrinsics::from_name(&proto_name) {
                                link_constructor_prototype(
                                    &f,
                                    self.get_intrinsics_value(intrinsic),
                                );
                            }
                            f
                        }
                        None => new_ordinary_object(Some(
                            self.get_intrinsics_value(WellKnownIntrinsics::ObjectPrototype)
                                .clone(),
                        )),
                    };
                    define_property_or_throw(
                        &self.global_this,
                        PropertyKey::from(builtin.name.as_str()),
                        PropertyDescriptor::new_hidden(JsValue::Object(target.clone())),
                    )?;
                    target
                }
            };
            for (method_name, length, func) in builtin.methods.iter() {
                let method = create_function_object(
                    self,
                    method_name,
                    *length,
                    FunctionKind::Method,
                    FunctionBehavior::Native(*func),
                );
                define_property_or_throw(
                    &target,
                    PropertyKey::from(method_name.as_str()),
                    PropertyDescriptor::new_hidden(JsValue::Object(method)),
                )?;
            }
            for (prop_name, value) in builtin.properties.iter() {
                define_property_or_throw(
                    &target,
                    PropertyKey::from(prop_name.as_str()),
                    PropertyDescriptor::new_frozen(value.clone()),
                )?;
            }
        }
        Ok(())
    }
}
impl Default for CodeRealm {
    fn default() -> Self {
        Self::new()
    }
}

pub fn set_default_global_bindings(r: &CodeRealm, config: &RuntimeConfig) -> Result<(), JErrorType> {
    let global_obj = r.global_object();
    define_property_or_throw(
        global_obj,
        PropertyKey::from("globalThis"),
        PropertyDescriptor::new_hidden(JsValue::Object(global_obj.clone())),
    )?;
    define_property_or_throw(
        global_obj,
        PropertyKey::from("Infinity"),
        PropertyDescriptor::new_frozen(JsValue::Number(JsNumberType::PositiveInfinity)),
    )?;
    define_property_or_throw(
        global_obj,
        PropertyKey::from("NaN"),
        PropertyDescriptor::new_frozen(JsValue::Number(JsNumberType::NaN)),
    )?;
    define_property_or_throw(
        global_obj,
        PropertyKey::from("undefined"),
        PropertyDescriptor::new_frozen(JsValue::Undefined),
    )?;
    // Same shape as a script-level `global.name = "..."` assignment.
    define_property_or_throw(
        global_obj,
        PropertyKey::from("name"),
        PropertyDescriptor::new_data(JsValue::from(config.global.name.as_str())),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_intrinsics_chain_to_object_prototype() {
        let realm = CodeRealm::new();
        let object_proto = realm.get_intrinsics_value(WellKnownIntrinsics::ObjectPrototype);
        assert!(object_proto.borrow().as_js_object().get_prototype_of().is_none());
        for intrinsic in WellKnownIntrinsics::ALL.iter().skip(1) {
            let proto = realm
                .get_intrinsics_value(*intrinsic)
                .borrow()
                .as_js_object()
                .get_prototype_of()
                .unwrap();
            assert!(Rc::ptr_eq(&proto, object_proto));
        }
    }

    #[test]
    fn test_intrinsic_names_round_trip() {
        for intrinsic in WellKnownIntrinsics::ALL.iter() {
            assert_eq!(WellKnownIntrinsics::from_name(intrinsic.name()), Some(*intrinsic));
        }
        assert_eq!(WellKnownIntrinsics::from_name("console"), None);
    }

    #[test]
    fn test_default_global_bindings() {
        let realm = CodeRealm::new();
        let mut config = RuntimeConfig::default();
        config.global.name = "window".to_string();
        set_default_global_bindings(&realm, &config).unwrap();
        let global = realm.global_object().borrow();
        let global = global.as_js_object();
        assert_eq!(
            global.get_own_property(&PropertyKey::from("name")).unwrap().value,
            JsValue::from("window")
        );
        assert!(!global
            .get_own_property(&PropertyKey::from("globalThis"))
            .unwrap()
            .enumerable);
    }
}
