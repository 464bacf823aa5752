//! # jsbind - receiver binding and construction over a prototypal object model
//!
//! A small JavaScript-flavoured object runtime that emulates three operations:
//! - `call`: invoke a callable with an explicit receiver and an argument list
//! - `apply`: the same, with the arguments supplied as an array-like object
//! - `new`: allocate an instance linked to a constructor's `prototype`, run the constructor on
//!   it and pick the result
//!
//! Receivers are coerced the way sloppy-mode code sees them: nullish receivers become the
//! configured default (the global object unless configured otherwise) and primitives are boxed
//! into wrapper objects.
//!
//! ## Quick Start
//!
//! ### Calling with an explicit receiver
//!
//! ```
//! use jsbind::runner::config::RuntimeConfig;
//! use jsbind::runner::ds::object_property::PropertyKey;
//! use jsbind::runner::ds::operations::object::{get_v, put};
//! use jsbind::runner::ds::value::JsValue;
//! use jsbind::runner::eval::function::bound_call;
//! use jsbind::runner::plugin::types::EvalContext;
//!
//! let mut ctx = EvalContext::with_config(RuntimeConfig::default()).unwrap();
//!
//! // function getName() { return this.name; }
//! let get_name = JsValue::Object(ctx.new_function("getName", 0, |ctx, this, _args| {
//!     get_v(ctx.realm(), &this, &PropertyKey::from("name"))
//! }));
//!
//! let receiver = ctx.new_object();
//! put(&receiver, PropertyKey::from("name"), JsValue::from("liar")).unwrap();
//!
//! let name = bound_call(&mut ctx, &get_name, JsValue::Object(receiver), vec![]).unwrap();
//! assert_eq!(name, JsValue::from("liar"));
//!
//! // A nullish receiver resolves to the global object, whose name is "global".
//! let name = bound_call(&mut ctx, &get_name, JsValue::Undefined, vec![]).unwrap();
//! assert_eq!(name, JsValue::from("global"));
//! ```
//!
//! ### Constructing and capturing console output
//!
//! ```
//! use jsbind::runner::config::RuntimeConfig;
//! use jsbind::runner::ds::object_property::PropertyKey;
//! use jsbind::runner::ds::operations::object::put;
//! use jsbind::runner::ds::value::JsValue;
//! use jsbind::runner::eval::function::{construct, invoke};
//! use jsbind::runner::plugin::types::EvalContext;
//! use jsbind::runner::std_lib::console::ConsoleSink;
//!
//! let mut ctx = EvalContext::with_config(RuntimeConfig::default()).unwrap();
//! let console = ConsoleSink::new_buffer();
//! ctx.set_console(console.clone());
//!
//! // function Person(name) { this.name = name; }
//! let person = JsValue::Object(ctx.new_function("Person", 1, |_ctx, this, args| {
//!     if let JsValue::Object(o) = &this {
//!         let name = args.into_iter().next().unwrap_or(JsValue::Undefined);
//!         put(o, PropertyKey::from("name"), name)?;
//!     }
//!     Ok(JsValue::Undefined)
//! }));
//!
//! let json = construct(&mut ctx, &person, vec![JsValue::from("json")]).unwrap();
//! let log = ctx.get_binding("console").unwrap();
//! invoke(&mut ctx, &log, "log", vec![json]).unwrap();
//!
//! assert_eq!(console.lines(), vec!["Person { name: 'json' }".to_string()]);
//! ```
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - Values, objects, property descriptors, the realm and abstract operations
//! - **[`runner::eval`]** - The call, apply and construct emulators
//! - **[`runner::plugin`]** - Evaluation context and the built-in registry
//! - **[`runner::std_lib`]** - Core built-ins (`Object`, `Function.prototype`, `Array`, wrappers, `console`)
//! - **[`runner::config`]** - TOML runtime configuration
//! - **[`runner::scenarios`]** - The `sayName` / `Person` demo scenarios driven by the CLI

#[macro_use]
extern crate lazy_static;

pub mod runner;
