//! Built-in registration.
//!
//! Built-ins are described as plain data ([`BuiltInObject`]) in a [`BuiltInRegistry`] and
//! materialized into a realm when an [`EvalContext`] is created:
//!
//! ```text
//! BuiltInRegistry::with_core()
//!   "Function.prototype"  -> methods attached to the intrinsic prototype
//!   "Object"              -> global constructor linked to Object.prototype
//!   "console"             -> plain global object
//! ```
//!
//! Entries whose name matches an intrinsic prototype extend it; every other entry becomes a
//! non-enumerable property of the global object.
//!
//! ## Example: Custom Built-in
//!
//! ```
//! use jsbind::runner::config::RuntimeConfig;
//! use jsbind::runner::ds::error::JErrorType;
//! use jsbind::runner::ds::value::{JsNumberType, JsValue};
//! use jsbind::runner::eval::function::invoke;
//! use jsbind::runner::plugin::registry::BuiltInRegistry;
//! use jsbind::runner::plugin::types::{BuiltInObject, EvalContext};
//!
//! fn double(_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
//!     let n = match args.first() {
//!         Some(JsValue::Number(JsNumberType::Integer(n))) => *n,
//!         _ => 0,
//!     };
//!     Ok(JsValue::from(n * 2))
//! }
//!
//! let mut registry = BuiltInRegistry::with_core();
//! registry.register_object(BuiltInObject::new("Utils").add_method("double", 1, double));
//!
//! let mut ctx = EvalContext::with_registry(RuntimeConfig::default(), &registry).unwrap();
//! let utils = ctx.get_binding("Utils").unwrap();
//! let result = invoke(&mut ctx, &utils, "double", vec![JsValue::from(21)]).unwrap();
//! assert_eq!(result, JsValue::from(42));
//! ```

pub mod registry;
pub mod types;

pub use registry::BuiltInRegistry;
pub use types::{BuiltInObject, EvalContext, NativeFn};
