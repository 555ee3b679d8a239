//! Intermediate representation shared by extraction, correlation and emission.
//!
//! Declarations are built once by the extractor, gain [`EndpointUsage`]
//! entries during correlation, and are only read by the emitter.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// A TypeScript type expression produced from a Go type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    Boolean,
    Number,
    String,
    /// `time.Time`, emitted as an annotated string.
    Timestamp,
    Any,
    /// A declared type referenced by name.
    Named(String),
    /// `T[]`, or `(T | null ...)[]` when the Go elements are pointers.
    Array {
        element: Box<TsType>,
        nullable_elements: bool,
    },
    /// `Record<K, V>`.
    Record {
        key: Box<TsType>,
        value: Box<TsType>,
        nullable_value: bool,
    },
}

/// Union token appended to nullable array elements (and map values when enabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nullability {
    /// `T | null | undefined`
    #[default]
    NullOrUndefined,
    /// `T | null`
    Null,
    /// `T | undefined`
    Undefined,
}

impl Nullability {
    fn suffix(self) -> &'static str {
        match self {
            Nullability::NullOrUndefined => " | null | undefined",
            Nullability::Null => " | null",
            Nullability::Undefined => " | undefined",
        }
    }
}

/// How [`TsType::render`] spells nullable element positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStyle {
    pub element_nullability: Nullability,
    pub nullable_map_values: bool,
}

impl TsType {
    pub fn named(name: impl Into<String>) -> Self {
        TsType::Named(name.into())
    }

    pub fn array(element: TsType) -> Self {
        TsType::Array {
            element: Box::new(element),
            nullable_elements: false,
        }
    }

    pub fn nullable_array(element: TsType) -> Self {
        TsType::Array {
            element: Box::new(element),
            nullable_elements: true,
        }
    }

    pub fn record(key: TsType, value: TsType, nullable_value: bool) -> Self {
        TsType::Record {
            key: Box::new(key),
            value: Box::new(value),
            nullable_value,
        }
    }

    /// True for types that need no declaration of their own.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TsType::Boolean | TsType::Number | TsType::String | TsType::Timestamp | TsType::Any
        )
    }

    /// Render the expression as TypeScript source text.
    pub fn render(&self, style: RenderStyle) -> String {
        match self {
            TsType::Boolean => "boolean".to_string(),
            TsType::Number => "number".to_string(),
            TsType::String => "string".to_string(),
            TsType::Timestamp => "string /* RFC3339 */".to_string(),
            TsType::Any => "any".to_string(),
            TsType::Named(name) => name.clone(),
            TsType::Array {
                element,
                nullable_elements,
            } => {
                let inner = element.render(style);
                if *nullable_elements {
                    format!("({}{})[]", inner, style.element_nullability.suffix())
                } else {
                    // Element renderings never contain a top-level union.
                    format!("{}[]", inner)
                }
            }
            TsType::Record {
                key,
                value,
                nullable_value,
            } => {
                let value_text = value.render(style);
                if *nullable_value && style.nullable_map_values {
                    format!(
                        "Record<{}, {}{}>",
                        key.render(style),
                        value_text,
                        style.element_nullability.suffix()
                    )
                } else {
                    format!("Record<{}, {}>", key.render(style), value_text)
                }
            }
        }
    }

    /// Visit every declared-type name in this expression.
    ///
    /// The callback receives the name and whether it sits under an array or
    /// map wrapper.
    pub fn visit_names<'a>(&'a self, f: &mut impl FnMut(&'a str, bool)) {
        self.visit_names_inner(false, f);
    }

    fn visit_names_inner<'a>(&'a self, wrapped: bool, f: &mut impl FnMut(&'a str, bool)) {
        match self {
            TsType::Named(name) => f(name, wrapped),
            TsType::Array { element, .. } => element.visit_names_inner(true, f),
            TsType::Record { key, value, .. } => {
                key.visit_names_inner(true, f);
                value.visit_names_inner(true, f);
            }
            _ => {}
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(RenderStyle::default()))
    }
}

/// One field of a record declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    /// Name used in the emitted declaration.
    pub name: String,
    pub ty: TsType,
    /// May be absent (`name?:`).
    pub optional: bool,
    /// May be explicitly `null` (`| null`).
    pub nullable: bool,
    pub docs: Option<String>,
    /// Verbatim `key: value` validation annotations, in tag order.
    pub validation: Vec<String>,
    pub is_exported: bool,
}

impl FieldEntry {
    /// The synthetic field that carries an alias's underlying type.
    pub fn alias_value(ty: TsType) -> Self {
        Self {
            name: "value".to_string(),
            ty,
            optional: false,
            nullable: false,
            docs: None,
            validation: Vec::new(),
            is_exported: true,
        }
    }
}

/// Shape of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    /// A struct, emitted as an `interface`.
    Record(Vec<FieldEntry>),
    /// A named synonym, emitted as `type X = ...`.
    Alias(FieldEntry),
}

/// Whether a type is consumed or produced by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Request,
    Response,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Request => f.write_str("Request"),
            Direction::Response => f.write_str("Response"),
        }
    }
}

/// A documented endpoint that uses a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointUsage {
    pub method: String,
    pub path: String,
    pub direction: Direction,
}

/// Usages of a single `method path` pair, directions de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointGroup {
    pub route: String,
    pub directions: Vec<Direction>,
}

/// A type declaration extracted from Go source.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: DeclKind,
    pub is_exported: bool,
    pub is_api_type: bool,
    pub docs: Option<String>,
    pub endpoints: Vec<EndpointUsage>,
    /// File the declaration was found in.
    pub path: PathBuf,
}

impl TypeDeclaration {
    pub fn fields(&self) -> &[FieldEntry] {
        match &self.kind {
            DeclKind::Record(fields) => fields,
            DeclKind::Alias(value) => std::slice::from_ref(value),
        }
    }

    pub fn add_endpoint(&mut self, usage: EndpointUsage) {
        self.endpoints.push(usage);
    }

    /// Group endpoint usages by `method path` in order of first appearance.
    pub fn endpoint_groups(&self) -> Vec<EndpointGroup> {
        let mut groups: Vec<EndpointGroup> = Vec::new();
        for usage in &self.endpoints {
            let route = format!("{} {}", usage.method, usage.path);
            let idx = match groups.iter().position(|g| g.route == route) {
                Some(idx) => idx,
                None => {
                    groups.push(EndpointGroup {
                        route,
                        directions: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            if !group.directions.contains(&usage.direction) {
                group.directions.push(usage.direction);
            }
        }
        groups
    }
}
