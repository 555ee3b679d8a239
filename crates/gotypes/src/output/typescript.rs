//! TypeScript declaration output.
//!
//! Renders every registry entry in insertion order, preceded by a header and
//! by `type X = any;` placeholders for names that are referenced but never
//! declared, so the file type-checks on its own.

use crate::ir::{DeclKind, FieldEntry, Nullability, RenderStyle, TypeDeclaration};
use crate::registry::TypeRegistry;
use chrono::NaiveDateTime;
use serde::Deserialize;

const UNEXPORTED_TYPE_NOTE: [&str; 2] = [
    "Note: This is an unexported type. In Go code, it's defined with a lowercase identifier.",
    "It cannot be accessed directly from outside the package.",
];

const UNEXPORTED_FIELD_NOTE: [&str; 2] = [
    "Note: This is an unexported field. In Go code, it's defined with a lowercase identifier.",
    "It cannot be accessed directly from outside the package.",
];

/// Options for TypeScript generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypeScriptOptions {
    /// Union token for pointer elements of slices (and map values, see below).
    pub element_nullability: Nullability,
    /// Render pointer map values as nullable (`Record<K, V | null>`).
    pub nullable_map_values: bool,
    /// Append `| null` to the type of pointer fields.
    pub nullable_fields: bool,
    /// Emit `/* eslint-disable */` after the header.
    pub eslint_disable: bool,
}

impl Default for TypeScriptOptions {
    fn default() -> Self {
        Self {
            element_nullability: Nullability::default(),
            nullable_map_values: false,
            nullable_fields: true,
            eslint_disable: true,
        }
    }
}

impl TypeScriptOptions {
    fn style(&self) -> RenderStyle {
        RenderStyle {
            element_nullability: self.element_nullability,
            nullable_map_values: self.nullable_map_values,
        }
    }
}

/// Renders a [`TypeRegistry`] as a TypeScript declaration file.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptEmitter {
    pub options: TypeScriptOptions,
}

impl TypeScriptEmitter {
    pub fn new(options: TypeScriptOptions) -> Self {
        Self { options }
    }

    /// Render the whole file. The output depends only on the arguments.
    pub fn emit(&self, registry: &TypeRegistry, generated_at: NaiveDateTime) -> String {
        generate_typescript(registry, &self.options, generated_at)
    }
}

/// Names referenced by field types that no registry entry declares.
///
/// Names used directly as a field type come first, then names only seen
/// inside array or map types. Each group keeps first-encounter order.
pub fn placeholder_names(registry: &TypeRegistry) -> Vec<&str> {
    let mut direct: Vec<&str> = Vec::new();
    let mut wrapped: Vec<&str> = Vec::new();
    for decl in registry.iter() {
        for field in decl.fields() {
            field.ty.visit_names(&mut |name, in_wrapper| {
                if registry.contains(name) {
                    return;
                }
                let bucket = if in_wrapper { &mut wrapped } else { &mut direct };
                if !bucket.contains(&name) {
                    bucket.push(name);
                }
            });
        }
    }
    for name in wrapped {
        if !direct.contains(&name) {
            direct.push(name);
        }
    }
    direct
}

/// Generate the complete TypeScript file for `registry`.
pub fn generate_typescript(
    registry: &TypeRegistry,
    options: &TypeScriptOptions,
    generated_at: NaiveDateTime,
) -> String {
    let placeholders = placeholder_names(registry);
    let mut out = Vec::new();

    out.push("// This file is auto-generated. Do not edit directly.".to_string());
    out.push(format!(
        "// Generated at: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push(
        "// Note: This file includes both exported and unexported types and fields.".to_string(),
    );
    out.push(String::new());
    if options.eslint_disable {
        out.push("/* eslint-disable */".to_string());
        out.push(String::new());
    }

    if !placeholders.is_empty() {
        out.push("// Placeholders for undefined types".to_string());
        for name in placeholders {
            out.push(format!("type {} = any;", name));
        }
        out.push(String::new());
    }

    for decl in registry.iter() {
        render_declaration(decl, options, &mut out);
        out.push(String::new());
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Render one declaration (docs, advisory, body) without a trailing blank line.
pub fn render_declaration(decl: &TypeDeclaration, options: &TypeScriptOptions, out: &mut Vec<String>) {
    let mut doc: Vec<String> = decl
        .docs
        .as_deref()
        .map(|d| d.trim().lines().map(|l| l.trim().to_string()).collect())
        .unwrap_or_default();

    let groups = decl.endpoint_groups();
    if !groups.is_empty() {
        if !doc.is_empty() {
            doc.push(String::new());
        }
        doc.push("@api Used in the following endpoints:".to_string());
        for group in groups {
            let directions: Vec<String> = group.directions.iter().map(|d| d.to_string()).collect();
            doc.push(format!("- {} ({})", group.route, directions.join(", ")));
        }
    }
    push_doc_block(out, "", &doc);

    if !decl.is_exported {
        push_doc_block(out, "", &UNEXPORTED_TYPE_NOTE);
    }

    let style = options.style();
    match &decl.kind {
        DeclKind::Record(fields) => {
            out.push(format!("export interface {} {{", decl.name));
            for field in fields {
                render_field(field, options, out);
            }
            out.push("}".to_string());
        }
        DeclKind::Alias(value) => {
            out.push(format!("export type {} = {};", decl.name, value.ty.render(style)));
        }
    }
}

fn render_field(field: &FieldEntry, options: &TypeScriptOptions, out: &mut Vec<String>) {
    let mut doc: Vec<String> = field
        .docs
        .as_deref()
        .map(|d| d.trim().lines().map(|l| l.trim().to_string()).collect())
        .unwrap_or_default();
    if !field.validation.is_empty() {
        if !doc.is_empty() {
            doc.push(String::new());
        }
        doc.push("@validation".to_string());
        doc.extend(field.validation.iter().map(|rule| format!("  - {}", rule)));
    }
    push_doc_block(out, "  ", &doc);

    if !field.is_exported {
        push_doc_block(out, "  ", &UNEXPORTED_FIELD_NOTE);
    }

    let mut ty = field.ty.render(options.style());
    if field.nullable && options.nullable_fields {
        ty.push_str(" | null");
    }
    out.push(format!(
        "  {}{}: {};",
        property_name(&field.name),
        if field.optional { "?" } else { "" },
        ty
    ));
}

fn push_doc_block<S: AsRef<str>>(out: &mut Vec<String>, indent: &str, lines: &[S]) {
    if lines.is_empty() {
        return;
    }
    out.push(format!("{}/**", indent));
    for line in lines {
        let line = line.as_ref();
        if line.is_empty() {
            out.push(format!("{} *", indent));
        } else {
            // A literal `*/` would end the comment early.
            out.push(format!("{} * {}", indent, line.replace("*/", "*\\/")));
        }
    }
    out.push(format!("{} */", indent));
}

/// Quote property names that are not plain identifiers (`"first-name"`).
fn property_name(name: &str) -> String {
    let mut chars = name.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
