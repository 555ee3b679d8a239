//! TypeScript declarations from Go structs.
//!
//! `gotypes` reads Go source trees, extracts struct and alias declarations,
//! correlates them with swagger-style endpoint annotations, and writes a
//! single self-contained TypeScript declaration file.
//!
//! # Architecture
//!
//! ```text
//! Source roots        Input                IR              Output
//! ────────────     ──────────────     ─────────────     ──────────
//! dir A ─┐         Go extractor  ─┐                      ┌─> .ts file
//! dir B ─┼─> .go ─> tag resolver  ─┼─> TypeRegistry ─────┤
//! dir C ─┘         type mapper   ─┘   (registry.rs)  ▲   └─> GenerateReport
//!                                                    │
//!                  @Router / @Success / @Param ──────┘
//!                  (endpoints.rs)
//! ```
//!
//! # Example
//!
//! ```
//! use gotypes::{ExtractOptions, TypeRegistry, TypeScriptEmitter, parse_go_source};
//! use std::path::Path;
//!
//! let source = r#"
//! package models
//!
//! type Address struct {
//!     Street string `json:"street"`
//!     Zip    string `json:"zip_code,omitempty"`
//! }
//! "#;
//!
//! let decls = parse_go_source(source, Path::new("models.go"), &ExtractOptions::default()).unwrap();
//! let registry: TypeRegistry = decls.into_iter().collect();
//!
//! let at = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let ts = TypeScriptEmitter::default().emit(&registry, at);
//! assert!(ts.contains("export interface Address {"));
//! assert!(ts.contains("  zipCode?: string;"));
//! ```

pub mod config;
pub mod endpoints;
pub mod error;
pub mod input;
pub mod ir;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod source;

pub use config::Config;
pub use error::{Error, ParseError};
pub use input::{ExtractOptions, parse_go_source};
pub use ir::{DeclKind, Direction, FieldEntry, Nullability, TsType, TypeDeclaration};
pub use output::{TypeScriptEmitter, TypeScriptOptions, generate_typescript};
pub use pipeline::{
    GenerateReport, collect_endpoint_info, collect_registry, collect_type_definitions, generate,
    generate_from_dirs,
};
pub use registry::TypeRegistry;
