//! Name-keyed registries of built-in transforms and macros
//!
//! Blueprints refer to built-ins by name. Lookups return a typed
//! [`LookupError`](crate::error::LookupError) for unknown names; the
//! `resolve` entry points log it and degrade instead.

pub mod macros;
pub mod transform;

pub use macros::{MacroAction, MacroRegistry, DRAWING_MACRO};
pub use transform::{TransformFn, UNTITLED};
