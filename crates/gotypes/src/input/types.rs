//! Go type expression → TypeScript type mapping.

use crate::ir::TsType;
use tree_sitter::Node;

/// Pointer-ness of a mapped Go type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    None,
    /// `*T`
    Direct,
    /// `[]*T`
    Elements,
}

impl Pointer {
    /// The mapper's pointer flag: set for `*T` and `[]*T`.
    pub fn is_pointer(self) -> bool {
        !matches!(self, Pointer::None)
    }
}

/// Result of mapping one Go type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub ty: TsType,
    pub pointer: Pointer,
}

impl MappedType {
    fn plain(ty: TsType) -> Self {
        Self {
            ty,
            pointer: Pointer::None,
        }
    }
}

/// Map a predeclared or declared type identifier.
pub fn map_identifier(name: &str) -> TsType {
    match name {
        "bool" => TsType::Boolean,
        "string" => TsType::String,
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "uintptr" | "float32" | "float64" | "complex64" | "complex128" | "byte"
        | "rune" => TsType::Number,
        "any" => TsType::Any,
        _ => TsType::named(name),
    }
}

/// Maps tree-sitter Go type nodes against their source text.
pub struct TypeMapper<'a> {
    source: &'a str,
}

impl<'a> TypeMapper<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Map a type node to its TypeScript form and pointer classification.
    pub fn map(&self, node: Node) -> MappedType {
        match node.kind() {
            "type_identifier" => MappedType::plain(map_identifier(self.text(node))),

            "qualified_type" => MappedType::plain(self.map_qualified(node)),

            "pointer_type" => match first_named_child(node) {
                Some(inner) => MappedType {
                    ty: self.map(inner).ty,
                    pointer: Pointer::Direct,
                },
                None => MappedType::plain(TsType::Any),
            },

            "slice_type" | "array_type" => {
                let Some(element) = node.child_by_field_name("element") else {
                    return MappedType::plain(TsType::array(TsType::Any));
                };
                let mapped = self.map(element);
                if mapped.pointer == Pointer::Direct {
                    MappedType {
                        ty: TsType::nullable_array(mapped.ty),
                        pointer: Pointer::Elements,
                    }
                } else {
                    MappedType::plain(TsType::array(mapped.ty))
                }
            }

            "map_type" => {
                let key = node
                    .child_by_field_name("key")
                    .map(|k| self.map(k).ty)
                    .unwrap_or(TsType::Any);
                let value = node.child_by_field_name("value").map(|v| self.map(v));
                let (value, nullable_value) = match value {
                    Some(v) => (v.ty, v.pointer == Pointer::Direct),
                    None => (TsType::Any, false),
                };
                MappedType::plain(TsType::record(key, value, nullable_value))
            }

            "parenthesized_type" => match first_named_child(node) {
                Some(inner) => self.map(inner),
                None => MappedType::plain(TsType::Any),
            },

            // interface{}, channels, funcs, inline structs, generic instantiations
            _ => MappedType::plain(TsType::Any),
        }
    }

    fn map_qualified(&self, node: Node) -> TsType {
        let package = node
            .child_by_field_name("package")
            .map(|n| self.text(n))
            .unwrap_or("");
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or("");
        match (package, name) {
            ("time", "Time") => TsType::Timestamp,
            (_, "") => TsType::Any,
            (_, name) => TsType::named(name),
        }
    }
}

fn first_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() != "comment")
}
