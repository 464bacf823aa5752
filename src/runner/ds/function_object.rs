use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{new_ordinary_object, JsObject, JsObjectType, ObjectBase, ObjectType};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::realm::{CodeRealm, WellKnownIntrinsics};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::{EvalContext, NativeFn};

lazy_static! {
    pub static ref PROTOTYPE_PROP: PropertyKey = PropertyKey::Str("prototype".to_string());
    pub static ref CONSTRUCTOR_PROP: PropertyKey = PropertyKey::Str("constructor".to_string());
    static ref NAME_PROP: PropertyKey = PropertyKey::Str("name".to_string());
    static ref LENGTH_PROP: PropertyKey = PropertyKey::Str("length".to_string());
}

pub type ClosureFn = dyn Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>;

pub enum FunctionKind {
    /// Plain `function` declarations: callable and constructible.
    Normal,
    /// Arrow functions: callable only.
    Arrow,
    /// Methods, including every built-in method: callable only.
    Method,
    /// Result of binding a receiver: constructible iff the target is.
    Bound,
}

/// What runs when the function is called. Cloned out of the object before invoking so no borrow
/// of the function object is held while user code runs.
#[derive(Clone)]
pub enum FunctionBehavior {
    Native(NativeFn),
    Closure(Rc<ClosureFn>),
    Bound {
        target: JsObjectType,
        bound_this: JsValue,
        bound_args: Vec<JsValue>,
    },
}

pub struct FunctionObject {
    name: String,
    length: usize,
    kind: FunctionKind,
    behavior: FunctionBehavior,
    object_base: ObjectBase,
}
impl FunctionObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    pub fn behavior(&self) -> &FunctionBehavior {
        &self.behavior
    }

    pub fn is_constructor(&self) -> bool {
        match (&self.kind, &self.behavior) {
            (FunctionKind::Normal, _) => true,
            (FunctionKind::Bound, FunctionBehavior::Bound { target, .. }) => {
                target.borrow().is_constructor()
            }
            _ => false,
        }
    }
}
impl JsObject for FunctionObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn class_name(&self) -> &'static str {
        "Function"
    }

    fn to_string(&self) -> String {
        format!("function {}() {{ [native code] }}", self.name)
    }
}

/// Allocates a function object linked to `Function.prototype`. Normal functions also get a fresh
/// `prototype` object whose `constructor` points back at the function.
pub fn create_function_object(
    realm: &CodeRealm,
    name: &str,
    length: usize,
    kind: FunctionKind,
    behavior: FunctionBehavior,
) -> JsObjectType {
    let is_normal = matches!(kind, FunctionKind::Normal);
    let mut object_base = ObjectBase::with_prototype(Some(
        realm
            .get_intrinsics_value(WellKnownIntrinsics::FunctionPrototype)
            .clone(),
    ));
    object_base.insert(
        LENGTH_PROP.clone(),
        PropertyDescriptor::new_readonly(JsValue::from(length as i64)),
    );
    object_base.insert(
        NAME_PROP.clone(),
        PropertyDescriptor::new_readonly(JsValue::from(name)),
    );
    let f = Rc::new(RefCell::new(ObjectType::Function(FunctionObject {
        name: name.to_string(),
        length,
        kind,
        behavior,
        object_base,
    })));
    if is_normal {
        let proto = new_ordinary_object(Some(
            realm
                .get_intrinsics_value(WellKnownIntrinsics::ObjectPrototype)
                .clone(),
        ));
        link_constructor_prototype(&f, &proto);
    }
    f
}

/// Points `ctor.prototype` at `proto` and `proto.constructor` back at `ctor`.
pub fn link_constructor_prototype(ctor: &JsObjectType, proto: &JsObjectType) {
    proto.borrow_mut().as_js_object_mut().define_own_property(
        CONSTRUCTOR_PROP.clone(),
        PropertyDescriptor::new_hidden(JsValue::Object(ctor.clone())),
    );
    ctor.borrow_mut().as_js_object_mut().define_own_property(
        PROTOTYPE_PROP.clone(),
        PropertyDescriptor {
            value: JsValue::Object(proto.clone()),
            writable: true,
            enumerable: false,
            configurable: false,
        },
    );
}

/// Wraps `target` so every call sees `bound_this` and `bound_args` ahead of its own arguments.
pub fn create_bound_function(
    realm: &CodeRealm,
    target: &JsObjectType,
    bound_this: JsValue,
    bound_args: Vec<JsValue>,
) -> Result<JsObjectType, JErrorType> {
    let (target_name, target_length) = match target.borrow().as_function_object() {
        Some(f) => (f.name().to_string(), f.length()),
        None => {
            return Err(JErrorType::TypeError(
                "Bind must be called on a function".to_string(),
            ))
        }
    };
    let length = target_length.saturating_sub(bound_args.len());
    Ok(create_function_object(
        realm,
        &format!("bound {}", target_name),
        length,
        FunctionKind::Bound,
        FunctionBehavior::Bound {
            target: target.clone(),
            bound_this,
            bound_args,
        },
    ))
}
