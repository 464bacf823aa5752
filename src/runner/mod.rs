//! The runtime: object model, built-ins and the invocation/construction emulators.

pub mod config;
pub mod ds;
pub mod eval;
pub mod plugin;
pub mod scenarios;
pub mod std_lib;
