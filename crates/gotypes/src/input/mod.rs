//! Go source readers.
//!
//! Turns parsed Go files into IR [`TypeDeclaration`](crate::ir::TypeDeclaration)s.

pub mod classify;
pub mod go;
pub mod tags;
pub mod types;

pub use go::{ExtractOptions, comment_blocks, extract_declarations, parse_go_source, parse_tree};
pub use tags::{ResolvedTag, StructTag, resolve_tag};
pub use types::{MappedType, Pointer, TypeMapper};
