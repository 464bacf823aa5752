//! Standard library built-in objects.
//!
//! This module contains the built-ins the runtime installs into every realm: console, Object,
//! Function, Array and the primitive wrapper types.

pub mod array;
pub mod boolean;
pub mod console;
pub mod core;
pub mod function;
pub mod number;
pub mod object;
pub mod string;
pub mod symbol;

pub use self::core::register_core_builtins;
