//! Function call execution.
//!
//! `call`/`apply` style invocation with an explicit receiver, `new` style construction and the
//! `instanceof` check that goes with it.

use crate::runner::config::InvocationStrategy;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{create_bound_function, FunctionBehavior, PROTOTYPE_PROP};
use crate::runner::ds::object::{new_ordinary_object, JsObjectType};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::object::{
    create_list_from_array_like, get, get_method, get_v, ordinary_has_instance,
};
use crate::runner::ds::operations::type_conversion::{to_boolean, to_object};
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::symbol::{SymbolData, SYMBOL_HAS_INSTANCE};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;
use log::{debug, trace};

use super::types::ValueResult;

/// Check if a value is callable.
pub fn is_callable(value: &JsValue) -> bool {
    match value {
        JsValue::Object(obj) => (**obj).borrow().is_callable(),
        _ => false,
    }
}

/// Check if a value is a constructor.
pub fn is_constructor(value: &JsValue) -> bool {
    match value {
        JsValue::Object(obj) => (**obj).borrow().is_constructor(),
        _ => false,
    }
}

fn behavior_of(f: &JsValue) -> Result<FunctionBehavior, JErrorType> {
    if let JsValue::Object(o) = f {
        if let Some(func) = (**o).borrow().as_function_object() {
            return Ok(func.behavior().clone());
        }
    }
    Err(JErrorType::TypeError(format!("'{}' is not a function", f)))
}

/// Invokes `f` with `this_value` exactly as given. No receiver coercion happens here.
pub fn call_function(
    ctx: &mut EvalContext,
    f: &JsValue,
    this_value: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    run_behavior(ctx, f, this_value, args, None)
}

/// Runs the body of `f` with `new_target` visible through [`EvalContext::new_target`], then
/// restores whatever the caller had.
fn run_behavior(
    ctx: &mut EvalContext,
    f: &JsValue,
    this_value: JsValue,
    args: Vec<JsValue>,
    new_target: Option<JsObjectType>,
) -> ValueResult {
    let behavior = behavior_of(f)?;
    let outer = ctx.replace_new_target(new_target);
    let result = match behavior {
        FunctionBehavior::Native(native) => native(ctx, this_value, args),
        FunctionBehavior::Closure(closure) => closure(ctx, this_value, args),
        FunctionBehavior::Bound {
            target,
            bound_this,
            mut bound_args,
        } => {
            bound_args.extend(args);
            trace!("bound function forwards {} argument(s)", bound_args.len());
            call_function(ctx, &JsValue::Object(target), bound_this, bound_args)
        }
    };
    ctx.replace_new_target(outer);
    result
}

/// Reads `key` off `v` (wrapping primitives for the lookup) and calls it with `v` as receiver.
pub fn invoke(ctx: &mut EvalContext, v: &JsValue, key: &str, args: Vec<JsValue>) -> ValueResult {
    let key = PropertyKey::from(key);
    let func = get_v(ctx.realm(), v, &key)?;
    if !is_callable(&func) {
        return Err(JErrorType::TypeError(format!("'{}' is not a function", key)));
    }
    call_function(ctx, &func, v.clone(), args)
}

/// Objects pass through, primitives get wrapped, nullish values become the default receiver.
pub fn coerce_receiver(ctx: &EvalContext, receiver: &JsValue) -> ValueResult {
    match receiver {
        JsValue::Undefined | JsValue::Null => Ok(ctx.default_receiver()),
        JsValue::Object(_) => Ok(receiver.clone()),
        _ => Ok(JsValue::Object(to_object(ctx.realm(), receiver)?)),
    }
}

/// Calls `callable` with `receiver` as `this` and `args` forwarded in order.
pub fn bound_call(
    ctx: &mut EvalContext,
    callable: &JsValue,
    receiver: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if !is_callable(callable) {
        return Err(JErrorType::TypeError(format!(
            "'{}' is not a function",
            callable
        )));
    }
    let this_value = coerce_receiver(ctx, &receiver)?;
    trace!("bound call forwards {} argument(s)", args.len());
    match ctx.config().receiver.strategy {
        InvocationStrategy::Thunk => call_function(ctx, callable, this_value, args),
        InvocationStrategy::TransientProperty => {
            call_through_transient_property(ctx, callable, this_value, args)
        }
    }
}

/// Like [`bound_call`], with the arguments taken from an array-like. `undefined` and `null` mean
/// no arguments.
pub fn bound_apply(
    ctx: &mut EvalContext,
    callable: &JsValue,
    receiver: JsValue,
    args_or_nullish: JsValue,
) -> ValueResult {
    if !is_callable(callable) {
        return Err(JErrorType::TypeError(format!(
            "'{}' is not a function",
            callable
        )));
    }
    let args = if args_or_nullish.is_nullish() {
        vec![]
    } else {
        create_list_from_array_like(&args_or_nullish)?
    };
    bound_call(ctx, callable, receiver, args)
}

/// Captures `callable`, the coerced `receiver` and leading `args` into a new bound function.
pub fn bind_receiver(
    ctx: &mut EvalContext,
    callable: &JsValue,
    receiver: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    let target = match callable {
        JsValue::Object(o) if (**o).borrow().is_callable() => o.clone(),
        _ => {
            return Err(JErrorType::TypeError(
                "Bind must be called on a function".to_string(),
            ))
        }
    };
    let this_value = coerce_receiver(ctx, &receiver)?;
    Ok(JsValue::Object(create_bound_function(
        ctx.realm(),
        &target,
        this_value,
        args,
    )?))
}

/// Removes the transient key from the receiver when dropped, whichever way the call ended.
struct TransientBinding {
    receiver: JsObjectType,
    key: PropertyKey,
}

impl Drop for TransientBinding {
    fn drop(&mut self) {
        match self.receiver.try_borrow_mut() {
            Ok(mut receiver) => {
                receiver.as_js_object_mut().delete(&self.key);
                debug!("transient key {} removed", self.key);
            }
            Err(_) => debug!("transient key {} left behind: receiver is borrowed", self.key),
        }
    }
}

fn call_through_transient_property(
    ctx: &mut EvalContext,
    callable: &JsValue,
    this_value: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    let receiver = match &this_value {
        JsValue::Object(o) => o.clone(),
        _ => {
            debug!("receiver {} cannot hold a property, calling directly", this_value);
            return call_function(ctx, callable, this_value, args);
        }
    };
    let key = PropertyKey::Sym(SymbolData::new("transient call target"));
    let installed = receiver.borrow_mut().as_js_object_mut().define_own_property(
        key.clone(),
        PropertyDescriptor::new_hidden(callable.clone()),
    );
    if !installed {
        debug!("receiver rejected transient key, calling directly");
        return call_function(ctx, callable, this_value, args);
    }
    let _binding = TransientBinding {
        receiver: receiver.clone(),
        key: key.clone(),
    };
    debug!("transient key {} installed", key);
    let method = get(&receiver, &key)?;
    call_function(ctx, &method, this_value, args)
}

/// `new constructor(...args)`.
pub fn construct(ctx: &mut EvalContext, constructor: &JsValue, args: Vec<JsValue>) -> ValueResult {
    let ctor = match constructor {
        JsValue::Object(o) if (**o).borrow().is_constructor() => o.clone(),
        _ => {
            return Err(JErrorType::TypeError(format!(
                "'{}' is not a constructor",
                constructor
            )))
        }
    };
    if let FunctionBehavior::Bound {
        target,
        mut bound_args,
        ..
    } = behavior_of(constructor)?
    {
        bound_args.extend(args);
        return construct(ctx, &JsValue::Object(target), bound_args);
    }
    let proto = match get(&ctor, &PROTOTYPE_PROP)? {
        JsValue::Object(p) => p,
        _ => ctx.intrinsic(WellKnownIntrinsics::ObjectPrototype),
    };
    let instance = new_ordinary_object(Some(proto));
    debug!("construct: allocated instance");

    trace!("construct forwards {} argument(s)", args.len());
    let result = run_behavior(
        ctx,
        constructor,
        JsValue::Object(instance.clone()),
        args,
        Some(ctor),
    )?;
    debug!("construct: constructor returned {}", result);

    if result.is_object() {
        Ok(result)
    } else {
        Ok(JsValue::Object(instance))
    }
}

/// `v instanceof target`. A callable `@@hasInstance` on the target takes over the check.
pub fn instance_of(ctx: &mut EvalContext, v: &JsValue, target: &JsValue) -> Result<bool, JErrorType> {
    if !target.is_object() {
        return Err(JErrorType::TypeError(
            "Right-hand side of 'instanceof' is not an object".to_string(),
        ));
    }
    let has_instance = get_method(
        ctx.realm(),
        target,
        &PropertyKey::Sym(SYMBOL_HAS_INSTANCE.clone()),
    )?;
    if !has_instance.is_nullish() {
        let answer = call_function(ctx, &has_instance, target.clone(), vec![v.clone()])?;
        return Ok(to_boolean(&answer));
    }
    if !is_callable(target) {
        return Err(JErrorType::TypeError(
            "Right-hand side of 'instanceof' is not callable".to_string(),
        ));
    }
    ordinary_has_instance(target, v)
}
