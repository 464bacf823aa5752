//! Core types shared by built-ins and the emulators.

use crate::runner::config::{InvocationStrategy, NullishReceiver, RuntimeConfig};
use crate::runner::ds::array_object::new_array_object;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{create_function_object, FunctionBehavior, FunctionKind};
use crate::runner::ds::object::{new_ordinary_object, JsObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::{get, has_property, put};
use crate::runner::ds::realm::{set_default_global_bindings, CodeRealm, WellKnownIntrinsics};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::std_lib::console::ConsoleSink;
use std::rc::Rc;

/// Execution context passed to every callable: the realm, the runtime configuration and where
/// `console` output goes. It also carries the constructor a `construct` is running, if any.
pub struct EvalContext {
    realm: CodeRealm,
    config: RuntimeConfig,
    console: ConsoleSink,
    new_target: Option<JsObjectType>,
}

impl EvalContext {
    /// A bare context: intrinsic prototypes exist but nothing is installed on them and the global
    /// object is empty.
    pub fn new() -> Self {
        EvalContext {
            realm: CodeRealm::new(),
            config: RuntimeConfig::default(),
            console: ConsoleSink::Stdout,
            new_target: None,
        }
    }

    /// A ready-to-use context with the core built-ins installed.
    pub fn with_config(config: RuntimeConfig) -> Result<Self, JErrorType> {
        Self::with_registry(config, &BuiltInRegistry::with_core())
    }

    pub fn with_registry(
        config: RuntimeConfig,
        registry: &BuiltInRegistry,
    ) -> Result<Self, JErrorType> {
        let mut ctx = EvalContext::new();
        ctx.config = config;
        ctx.install_core_builtins(registry)?;
        Ok(ctx)
    }

    /// Binds the default globals and materializes every entry of `registry` into the realm.
    pub fn install_core_builtins(&mut self, registry: &BuiltInRegistry) -> Result<(), JErrorType> {
        set_default_global_bindings(&self.realm, &self.config)?;
        self.realm.install_builtins(registry)
    }

    pub fn realm(&self) -> &CodeRealm {
        &self.realm
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn set_invocation_strategy(&mut self, strategy: InvocationStrategy) {
        self.config.receiver.strategy = strategy;
    }

    pub fn console(&self) -> &ConsoleSink {
        &self.console
    }

    pub fn set_console(&mut self, console: ConsoleSink) {
        self.console = console;
    }

    /// The constructor being invoked through `construct`. `None` for plain calls, including
    /// calls made from inside a constructor body.
    pub fn new_target(&self) -> Option<&JsObjectType> {
        self.new_target.as_ref()
    }

    pub(crate) fn replace_new_target(
        &mut self,
        new_target: Option<JsObjectType>,
    ) -> Option<JsObjectType> {
        std::mem::replace(&mut self.new_target, new_target)
    }

    pub fn global_this(&self) -> JsValue {
        JsValue::Object(self.realm.global_object().clone())
    }

    /// What a nullish receiver resolves to.
    pub fn default_receiver(&self) -> JsValue {
        match self.config.receiver.nullish {
            NullishReceiver::Global => self.global_this(),
            NullishReceiver::Undefined => JsValue::Undefined,
        }
    }

    pub fn intrinsic(&self, intrinsic: WellKnownIntrinsics) -> JsObjectType {
        self.realm.get_intrinsics_value(intrinsic).clone()
    }

    /// Looks `name` up on the global object.
    pub fn get_binding(&self, name: &str) -> Result<JsValue, JErrorType> {
        let key = PropertyKey::from(name);
        let global = self.realm.global_object();
        if has_property(global, &key) {
            get(global, &key)
        } else {
            Err(JErrorType::ReferenceError(format!("{} is not defined", name)))
        }
    }

    pub fn set_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        put(self.realm.global_object(), PropertyKey::from(name), value)
    }

    /// An empty object inheriting from `Object.prototype`.
    pub fn new_object(&self) -> JsObjectType {
        new_ordinary_object(Some(self.intrinsic(WellKnownIntrinsics::ObjectPrototype)))
    }

    pub fn new_array(&self, values: Vec<JsValue>) -> JsObjectType {
        new_array_object(values, Some(self.intrinsic(WellKnownIntrinsics::ArrayPrototype)))
    }

    /// A constructible `function` backed by a Rust closure.
    pub fn new_function<F>(&self, name: &str, length: usize, body: F) -> JsObjectType
    where
        F: Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + 'static,
    {
        create_function_object(
            &self.realm,
            name,
            length,
            FunctionKind::Normal,
            FunctionBehavior::Closure(Rc::new(body)),
        )
    }

    /// An arrow function: callable, never constructible.
    pub fn new_arrow_function<F>(&self, name: &str, length: usize, body: F) -> JsObjectType
    where
        F: Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + 'static,
    {
        create_function_object(
            &self.realm,
            name,
            length,
            FunctionKind::Arrow,
            FunctionBehavior::Closure(Rc::new(body)),
        )
    }

    pub fn new_native_function(&self, name: &str, length: usize, func: NativeFn) -> JsObjectType {
        create_function_object(
            &self.realm,
            name,
            length,
            FunctionKind::Method,
            FunctionBehavior::Native(func),
        )
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Function signature for built-in methods.
/// Native functions receive the evaluation context, `this` value, and arguments.
pub type NativeFn = fn(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType>;

/// Built-in object definition.
/// Either methods for one of the intrinsic prototypes (named e.g. `Function.prototype`) or a
/// global like `Object` or `console`.
pub struct BuiltInObject {
    /// Name of the object (e.g., "Object", "console", "Array.prototype").
    pub name: String,

    /// Methods in registration order: name, declared length, implementation.
    pub methods: Vec<(String, usize, NativeFn)>,

    /// Static read-only properties.
    pub properties: Vec<(String, JsValue)>,

    /// Constructor function, if this object is constructable.
    pub constructor: Option<NativeFn>,

    pub constructor_length: usize,
}

impl BuiltInObject {
    /// Create a new built-in object with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        BuiltInObject {
            name: name.into(),
            methods: Vec::new(),
            properties: Vec::new(),
            constructor: None,
            constructor_length: 0,
        }
    }

    /// Add a native method. Re-adding a name replaces the earlier definition.
    pub fn add_method(mut self, name: impl Into<String>, length: usize, func: NativeFn) -> Self {
        self.set_method(name.into(), length, func);
        self
    }

    pub(crate) fn set_method(&mut self, name: String, length: usize, func: NativeFn) {
        match self.methods.iter_mut().find(|(n, _, _)| *n == name) {
            Some(slot) => *slot = (name, length, func),
            None => self.methods.push((name, length, func)),
        }
    }

    /// Add a property.
    pub fn add_property(mut self, name: impl Into<String>, value: JsValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }

    /// Set the constructor function.
    pub fn with_constructor(mut self, constructor: NativeFn, length: usize) -> Self {
        self.constructor = Some(constructor);
        self.constructor_length = length;
        self
    }

    pub fn get_method(&self, name: &str) -> Option<NativeFn> {
        self.methods
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|(_, _, f)| *f)
    }
}
