//! Console built-in object.
//!
//! Provides console.log, console.error, console.warn, and console.info methods. Values are
//! rendered the way a Node.js console renders them: top-level strings bare, everything else
//! through [`inspect`].

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::CONSTRUCTOR_PROP;
use crate::runner::ds::object::{JsObjectType, ObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::get;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};
use std::cell::RefCell;
use std::rc::Rc;

/// Nesting depth after which objects are abbreviated as `[Object]` / `[Array]`.
const MAX_INSPECT_DEPTH: usize = 2;

/// Where console output ends up.
#[derive(Clone)]
pub enum ConsoleSink {
    /// `log`/`info` to stdout, `warn`/`error` to stderr.
    Stdout,
    /// Every line, whatever the level, appended to a shared buffer.
    Buffer(Rc<RefCell<Vec<String>>>),
}

impl ConsoleSink {
    pub fn new_buffer() -> Self {
        ConsoleSink::Buffer(Rc::new(RefCell::new(Vec::new())))
    }

    /// Lines captured so far. Always empty for [`ConsoleSink::Stdout`].
    pub fn lines(&self) -> Vec<String> {
        match self {
            ConsoleSink::Stdout => vec![],
            ConsoleSink::Buffer(lines) => lines.borrow().clone(),
        }
    }

    fn write_out(&self, line: String) {
        match self {
            ConsoleSink::Stdout => println!("{}", line),
            ConsoleSink::Buffer(lines) => lines.borrow_mut().push(line),
        }
    }

    fn write_err(&self, line: String) {
        match self {
            ConsoleSink::Stdout => eprintln!("{}", line),
            ConsoleSink::Buffer(lines) => lines.borrow_mut().push(line),
        }
    }
}

/// Register the console object with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let console = BuiltInObject::new("console")
        .add_method("log", 0, console_log)
        .add_method("error", 0, console_error)
        .add_method("warn", 0, console_warn)
        .add_method("info", 0, console_info);

    registry.register_object(console);
}

/// Renders a value the way it appears nested inside an object: strings are single-quoted.
pub fn inspect(value: &JsValue) -> String {
    let mut seen = vec![];
    inspect_value(value, 0, &mut seen)
}

fn inspect_value(value: &JsValue, depth: usize, seen: &mut Vec<JsObjectType>) -> String {
    match value {
        JsValue::String(s) => format!("'{}'", s.replace('\'', "\\'")),
        JsValue::Object(o) => inspect_object(o, depth, seen),
        JsValue::Number(n) => n.to_string(),
        JsValue::Boolean(b) => b.to_string(),
        JsValue::Symbol(s) => s.to_string(),
        JsValue::Undefined => "undefined".to_string(),
        JsValue::Null => "null".to_string(),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn format_key(key: &PropertyKey) -> String {
    match key {
        PropertyKey::Str(s) if is_identifier(s) => s.clone(),
        PropertyKey::Str(s) => format!("'{}'", s),
        PropertyKey::Int(i) => i.to_string(),
        PropertyKey::Sym(s) => format!("[{}]", s),
    }
}

/// Name of the function found at `constructor` up the prototype chain, if any.
fn constructor_name(o: &JsObjectType) -> Option<String> {
    let proto = (**o).borrow().as_js_object().get_prototype_of()?;
    let ctor = match get(&proto, &CONSTRUCTOR_PROP) {
        Ok(JsValue::Object(ctor)) => ctor,
        _ => return None,
    };
    let name = (*ctor).borrow().as_function_object().map(|f| f.name().to_string());
    name
}

fn inspect_object(o: &JsObjectType, depth: usize, seen: &mut Vec<JsObjectType>) -> String {
    if seen.iter().any(|s| Rc::ptr_eq(s, o)) {
        return "[Circular]".to_string();
    }
    let is_array = (**o).borrow().is_array();
    {
        let obj = (**o).borrow();
        match &*obj {
            ObjectType::Function(f) => {
                return if f.name().is_empty() {
                    "[Function (anonymous)]".to_string()
                } else {
                    format!("[Function: {}]", f.name())
                };
            }
            ObjectType::Primitive(p) => {
                let class_name = obj.as_js_object().class_name();
                let mut inner = vec![];
                return format!(
                    "[{}: {}]",
                    class_name,
                    inspect_value(p.primitive_value(), depth, &mut inner)
                );
            }
            _ => {}
        }
    }
    if depth > MAX_INSPECT_DEPTH {
        return if is_array { "[Array]" } else { "[Object]" }.to_string();
    }

    seen.push(o.clone());
    let keys = (**o).borrow().as_js_object().own_property_keys();
    let mut entries = vec![];
    for key in keys.iter() {
        let desc = match (**o).borrow().as_js_object().get_own_property(key) {
            Some(d) if d.enumerable => d,
            _ => continue,
        };
        let rendered = inspect_value(&desc.value, depth + 1, seen);
        if is_array && matches!(key, PropertyKey::Int(_)) {
            entries.push(rendered);
        } else {
            entries.push(format!("{}: {}", format_key(key), rendered));
        }
    }
    seen.pop();

    let (open, close) = if is_array { ("[", "]") } else { ("{", "}") };
    let body = if entries.is_empty() {
        format!("{}{}", open, close)
    } else {
        format!("{} {} {}", open, entries.join(", "), close)
    };
    let prefix = if (**o).borrow().as_js_object().get_prototype_of().is_none() {
        Some("[Object: null prototype]".to_string())
    } else {
        match constructor_name(o) {
            Some(name) if name != "Object" && !(is_array && name == "Array") => Some(name),
            _ => None,
        }
    };
    match prefix {
        Some(prefix) => format!("{} {}", prefix, body),
        None => body,
    }
}

/// Format all arguments for console output.
fn format_args(args: &[JsValue]) -> String {
    args.iter()
        .map(|arg| match arg {
            JsValue::String(s) => s.clone(),
            other => inspect(other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// console.log - Log to stdout.
fn console_log(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    ctx.console().write_out(format_args(&args));
    Ok(JsValue::Undefined)
}

/// console.error - Log to stderr.
fn console_error(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    ctx.console().write_err(format_args(&args));
    Ok(JsValue::Undefined)
}

/// console.warn - Log warning to stderr.
fn console_warn(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    ctx.console().write_err(format!("Warning: {}", format_args(&args)));
    Ok(JsValue::Undefined)
}

/// console.info - Log info to stdout (same as log).
fn console_info(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    ctx.console().write_out(format_args(&args));
    Ok(JsValue::Undefined)
}
