//! The demo scenarios: `sayName` invoked with assorted receivers through `call`/`apply`, and
//! `Person` instances built through `construct`.
//!
//! Every line goes through the realm's `console.log`, so pointing the context at a buffered
//! [`ConsoleSink`](crate::runner::std_lib::console::ConsoleSink) captures the transcript.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::{get_v, put};
use crate::runner::ds::operations::type_conversion::{to_js_string, to_object};
use crate::runner::ds::value::JsValue;
use crate::runner::eval::function::{bound_apply, bound_call, construct, invoke};
use crate::runner::plugin::types::EvalContext;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Call,
    Apply,
    New,
    All,
}

fn console_log(ctx: &mut EvalContext, args: Vec<JsValue>) -> Result<(), JErrorType> {
    let console = ctx.get_binding("console")?;
    invoke(ctx, &console, "log", args)?;
    Ok(())
}

/// `function sayName() { console.log(`my name is ${this.name}, my args are ${[...arguments]}`) }`
pub fn define_say_name(ctx: &EvalContext) -> JsObjectType {
    ctx.new_function("sayName", 0, |ctx, this, args| {
        let name = get_v(ctx.realm(), &this, &PropertyKey::from("name"))?;
        let arguments = JsValue::Object(ctx.new_array(args));
        let line = format!(
            "my name is {}, my args are {}",
            to_js_string(&name)?,
            to_js_string(&arguments)?
        );
        console_log(ctx, vec![JsValue::String(line)])?;
        Ok(JsValue::Undefined)
    })
}

/// `function Person(name, age) { this.name = name; this.age = age; }`
pub fn define_person(ctx: &EvalContext) -> JsObjectType {
    ctx.new_function("Person", 2, |ctx, this, args| {
        let mut args = args.into_iter();
        let name = args.next().unwrap_or(JsValue::Undefined);
        let age = args.next().unwrap_or(JsValue::Undefined);
        let target = match &this {
            JsValue::Object(o) => o.clone(),
            _ => to_object(ctx.realm(), &this)?,
        };
        put(&target, PropertyKey::from("name"), name)?;
        put(&target, PropertyKey::from("age"), age)?;
        Ok(JsValue::Undefined)
    })
}

/// `{ name: "liar", age: 21 }`
fn make_liar(ctx: &EvalContext) -> Result<JsValue, JErrorType> {
    let o = ctx.new_object();
    put(&o, PropertyKey::from("name"), JsValue::from("liar"))?;
    put(&o, PropertyKey::from("age"), JsValue::from(21))?;
    Ok(JsValue::Object(o))
}

fn numbers(values: &[i64]) -> Vec<JsValue> {
    values.iter().map(|v| JsValue::from(*v)).collect()
}

pub fn run_call_scenario(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    debug!("running call scenario");
    let say_name = JsValue::Object(define_say_name(ctx));
    let liar = make_liar(ctx)?;
    bound_call(ctx, &say_name, JsValue::Undefined, vec![])?;
    bound_call(ctx, &say_name, JsValue::from(1), numbers(&[2, 3, 4]))?;
    bound_call(ctx, &say_name, liar, numbers(&[2, 3, 4]))?;
    Ok(())
}

pub fn run_apply_scenario(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    debug!("running apply scenario");
    let say_name = JsValue::Object(define_say_name(ctx));
    let liar = make_liar(ctx)?;
    let args = JsValue::Object(ctx.new_array(numbers(&[2, 3, 4])));
    bound_apply(ctx, &say_name, JsValue::Undefined, JsValue::Undefined)?;
    bound_apply(ctx, &say_name, JsValue::from(1), args.clone())?;
    bound_apply(ctx, &say_name, liar, args)?;
    Ok(())
}

pub fn run_new_scenario(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    debug!("running new scenario");
    let person = JsValue::Object(define_person(ctx));
    let json = construct(ctx, &person, vec![JsValue::from("json"), JsValue::from(21)])?;
    let liar = construct(ctx, &person, vec![JsValue::from("liar"), JsValue::from(22)])?;
    console_log(ctx, vec![json])?;
    console_log(ctx, vec![liar])?;
    Ok(())
}

pub fn run_scenario(ctx: &mut EvalContext, scenario: Scenario) -> Result<(), JErrorType> {
    match scenario {
        Scenario::Call => run_call_scenario(ctx),
        Scenario::Apply => run_apply_scenario(ctx),
        Scenario::New => run_new_scenario(ctx),
        Scenario::All => {
            run_call_scenario(ctx)?;
            run_apply_scenario(ctx)?;
            run_new_scenario(ctx)
        }
    }
}
