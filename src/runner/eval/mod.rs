//! Invocation and construction.
//!
//! Everything that runs a callable goes through [`function::call_function`]; the receiver is
//! always an explicit argument, never ambient state.

pub mod function;
pub mod types;

pub use types::ValueResult;
