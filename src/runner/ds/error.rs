use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::value::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum JErrorType {
    ReferenceError(String),
    TypeError(String),
    RangeError(String),
    SyntaxError(String),
    /// A value raised by a callable. Carried through every layer untouched.
    Thrown(JsValue),
}
impl Display for JErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JErrorType::ReferenceError(m) => write!(f, "Uncaught reference error: {}.", m),
            JErrorType::TypeError(m) => write!(f, "Uncaught type error: {}.", m),
            JErrorType::RangeError(m) => write!(f, "Uncaught range error: {}.", m),
            JErrorType::SyntaxError(m) => write!(f, "Uncaught syntax error: {}.", m),
            JErrorType::Thrown(v) => write!(f, "Uncaught {}", v),
        }
    }
}

impl std::error::Error for JErrorType {}
