//! The object model: values, property tables, prototype links and the realm holding the
//! intrinsic prototypes.

pub mod array_object;
pub mod error;
pub mod function_object;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod primitive_object;
pub mod realm;
pub mod symbol;
pub mod value;
