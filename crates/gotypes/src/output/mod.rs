//! Output backends for code generation.
//!
//! The TypeScript backend renders a [`TypeRegistry`](crate::registry::TypeRegistry)
//! as a self-contained declaration file.

pub mod typescript;

pub use typescript::{TypeScriptEmitter, TypeScriptOptions, generate_typescript, placeholder_names};
