//! Core types for the evaluation engine.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;

/// Result type for value-returning operations.
pub type ValueResult = Result<JsValue, JErrorType>;
