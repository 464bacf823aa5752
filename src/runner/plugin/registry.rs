//! Built-in registry for managing built-in objects.

use super::types::{BuiltInObject, NativeFn};
use crate::runner::std_lib::register_core_builtins;
use thiserror::Error;

/// Error type for registry operations.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Object not found: {0}")]
    ObjectNotFound(String),
    #[error("Method not found: {0}.{1}")]
    MethodNotFound(String, String),
}

/// Registry for built-in objects. Objects are installed into a realm in registration order.
pub struct BuiltInRegistry {
    objects: Vec<BuiltInObject>,
}

impl BuiltInRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltInRegistry {
            objects: Vec::new(),
        }
    }

    /// Create a registry with the core built-ins.
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        register_core_builtins(&mut registry);
        registry
    }

    /// Register a built-in object. An existing entry with the same name is replaced in place.
    pub fn register_object(&mut self, obj: BuiltInObject) {
        match self.objects.iter_mut().find(|o| o.name == obj.name) {
            Some(slot) => *slot = obj,
            None => self.objects.push(obj),
        }
    }

    /// Get a registered object by name.
    pub fn get_object(&self, name: &str) -> Option<&BuiltInObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Override an existing built-in method.
    pub fn override_method(
        &mut self,
        object: &str,
        method: &str,
        func: NativeFn,
    ) -> Result<(), RegistryError> {
        let obj = self
            .objects
            .iter_mut()
            .find(|o| o.name == object)
            .ok_or_else(|| RegistryError::ObjectNotFound(object.to_string()))?;
        let length = obj
            .methods
            .iter()
            .find(|(n, _, _)| n == method)
            .map(|(_, l, _)| *l)
            .ok_or_else(|| RegistryError::MethodNotFound(object.to_string(), method.to_string()))?;
        obj.set_method(method.to_string(), length, func);
        Ok(())
    }

    /// Get a built-in function by object and method name.
    pub fn get_method(&self, object: &str, method: &str) -> Option<NativeFn> {
        self.get_object(object).and_then(|obj| obj.get_method(method))
    }

    pub fn objects(&self) -> impl Iterator<Item = &BuiltInObject> {
        self.objects.iter()
    }

    /// Get list of all registered object names.
    pub fn object_names(&self) -> Vec<&str> {
        self.objects.iter().map(|o| o.name.as_str()).collect()
    }
}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        Self::with_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::error::JErrorType;
    use crate::runner::ds::value::JsValue;
    use crate::runner::plugin::types::EvalContext;

    fn quiet(_ctx: &mut EvalContext, _this: JsValue, _args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::from("quiet"))
    }

    #[test]
    fn test_core_registry_contents() {
        let registry = BuiltInRegistry::with_core();
        let names = registry.object_names();
        for expected in ["Function", "Function.prototype", "Object", "console"].iter() {
            assert!(names.contains(expected), "missing {}", expected);
        }
        assert!(registry.get_method("Function.prototype", "call").is_some());
        assert!(registry.get_method("Function.prototype", "apply").is_some());
        assert!(registry.get_method("Function.prototype", "nope").is_none());
    }

    #[test]
    fn test_override_method() {
        let mut registry = BuiltInRegistry::with_core();
        registry.override_method("console", "log", quiet).unwrap();
        let mut ctx = EvalContext::new();
        let log = registry.get_method("console", "log").unwrap();
        assert_eq!(
            log(&mut ctx, JsValue::Undefined, vec![]).unwrap(),
            JsValue::from("quiet")
        );
        assert_eq!(
            registry.override_method("console", "shout", quiet),
            Err(RegistryError::MethodNotFound(
                "console".to_string(),
                "shout".to_string()
            ))
        );
        assert_eq!(
            registry.override_method("Nope", "log", quiet),
            Err(RegistryError::ObjectNotFound("Nope".to_string()))
        );
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = BuiltInRegistry::new();
        registry.register_object(BuiltInObject::new("A").add_method("x", 0, quiet));
        registry.register_object(BuiltInObject::new("B"));
        registry.register_object(BuiltInObject::new("A"));
        assert_eq!(registry.object_names(), vec!["A", "B"]);
        assert!(registry.get_method("A", "x").is_none());
    }
}
