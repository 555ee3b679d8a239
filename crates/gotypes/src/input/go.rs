//! Go type extraction.
//!
//! Walks a tree-sitter Go syntax tree and turns each top-level `type`
//! declaration into a [`TypeDeclaration`].

use super::classify::{is_api_type, is_exported, to_camel_case};
use super::tags::{StructTag, resolve_tag, tag_body};
use super::types::{Pointer, TypeMapper};
use crate::error::ParseError;
use crate::ir::{DeclKind, FieldEntry, TypeDeclaration};
use serde::Deserialize;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Options that affect how declarations are extracted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// camelCase exported field names of non-API records.
    pub camel_case_fields: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            camel_case_fields: true,
        }
    }
}

/// Parse Go source and extract its type declarations.
pub fn parse_go_source(
    source: &str,
    path: &Path,
    options: &ExtractOptions,
) -> Result<Vec<TypeDeclaration>, ParseError> {
    let tree = parse_tree(source)?;
    Ok(extract_declarations(&tree, source, path, options))
}

/// Parse Go source into a syntax tree, rejecting trees with syntax errors.
pub fn parse_tree(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_go::language().into())
        .map_err(|e| ParseError::Grammar(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::Grammar("parser produced no tree".into()))?;

    if let Some(node) = first_error(tree.root_node()) {
        let pos = node.start_position();
        return Err(ParseError::Syntax {
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }
    Ok(tree)
}

fn first_error(node: Node) -> Option<Node> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error)
        .or(Some(node))
}

/// Extract declarations from an already parsed tree.
pub fn extract_declarations(
    tree: &Tree,
    source: &str,
    path: &Path,
    options: &ExtractOptions,
) -> Vec<TypeDeclaration> {
    ExtractContext {
        source,
        path,
        options,
        mapper: TypeMapper::new(source),
    }
    .extract(tree)
}

/// Every comment group in the file, cleaned of comment markers.
///
/// A group is a run of comments on consecutive lines with nothing else
/// between them.
pub fn comment_blocks(tree: &Tree, source: &str) -> Vec<String> {
    let mut comments = Vec::new();
    let mut cursor = tree.walk();
    'walk: loop {
        let node = cursor.node();
        if node.kind() == "comment" {
            comments.push(node);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    let mut groups: Vec<Vec<Node>> = Vec::new();
    for comment in comments {
        let joins_previous = groups.last().and_then(|g| g.last()).is_some_and(|prev| {
            comment.prev_named_sibling() == Some(*prev)
                && comment.start_position().row <= prev.end_position().row + 1
        });
        match groups.last_mut() {
            Some(group) if joins_previous => group.push(comment),
            _ => groups.push(vec![comment]),
        }
    }

    groups
        .iter()
        .filter_map(|group| comment_text(group, source))
        .collect()
}

/// Strip comment markers and surrounding blank lines from a comment group.
fn comment_text(comments: &[Node], source: &str) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    for comment in comments {
        let text = comment.utf8_text(source.as_bytes()).unwrap_or("");
        if let Some(line) = text.strip_prefix("//") {
            // Compiler directives are not documentation.
            if line.starts_with("go:") || line.starts_with("line ") {
                continue;
            }
            lines.push(line.strip_prefix(' ').unwrap_or(line).trim_end().to_string());
        } else if let Some(block) = text.strip_prefix("/*").and_then(|t| t.strip_suffix("*/")) {
            lines.extend(block.lines().map(|l| l.trim_end().to_string()));
        }
    }

    let mut out: Vec<&str> = Vec::new();
    for line in &lines {
        if line.is_empty() && out.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    if out.is_empty() {
        None
    } else {
        Some(out.join("\n"))
    }
}

struct ExtractContext<'a> {
    source: &'a str,
    path: &'a Path,
    options: &'a ExtractOptions,
    mapper: TypeMapper<'a>,
}

impl<'a> ExtractContext<'a> {
    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn extract(&self, tree: &Tree) -> Vec<TypeDeclaration> {
        let root = tree.root_node();
        let mut decls = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "type_declaration" {
                self.extract_type_declaration(child, &mut decls);
            }
        }
        decls
    }

    fn extract_type_declaration(&self, node: Node, out: &mut Vec<TypeDeclaration>) {
        let decl_docs = self.leading_docs(node);
        let mut cursor = node.walk();
        for spec in node.named_children(&mut cursor) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let docs = self.leading_docs(spec).or_else(|| decl_docs.clone());
            if let Some(decl) = self.extract_spec(spec, docs) {
                out.push(decl);
            }
        }
    }

    fn extract_spec(&self, spec: Node, docs: Option<String>) -> Option<TypeDeclaration> {
        let name = self.node_text(spec.child_by_field_name("name")?).to_string();
        let ty = spec.child_by_field_name("type")?;

        if spec.child_by_field_name("type_parameters").is_some() {
            tracing::debug!(name = %name, path = %self.path.display(), "skipping generic type");
            return None;
        }

        let is_api = is_api_type(&name, self.path);
        let kind = if ty.kind() == "struct_type" {
            DeclKind::Record(self.extract_fields(ty, is_api))
        } else {
            DeclKind::Alias(FieldEntry::alias_value(self.mapper.map(ty).ty))
        };

        Some(TypeDeclaration {
            is_exported: is_exported(&name),
            is_api_type: is_api,
            name,
            kind,
            docs,
            endpoints: Vec::new(),
            path: self.path.to_path_buf(),
        })
    }

    fn extract_fields(&self, struct_type: Node, is_api: bool) -> Vec<FieldEntry> {
        let mut fields = Vec::new();
        let mut cursor = struct_type.walk();
        let Some(list) = struct_type
            .named_children(&mut cursor)
            .find(|n| n.kind() == "field_declaration_list")
        else {
            return fields;
        };

        let mut cursor = list.walk();
        for field in list.named_children(&mut cursor) {
            if field.kind() == "field_declaration" {
                self.extract_field_declaration(field, is_api, &mut fields);
            }
        }
        fields
    }

    fn extract_field_declaration(&self, field: Node, is_api: bool, out: &mut Vec<FieldEntry>) {
        let mut cursor = field.walk();
        let names: Vec<&str> = field
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.node_text(n))
            .collect();
        // Embedded fields have no name.
        if names.is_empty() {
            return;
        }
        let Some(ty) = field.child_by_field_name("type") else {
            return;
        };

        let mapped = self.mapper.map(ty);
        let tag = field
            .child_by_field_name("tag")
            .and_then(|t| tag_body(self.node_text(t)))
            .map(|body| StructTag::parse(&body));
        let docs = self.field_docs(field);

        for ident in names {
            let resolved = resolve_tag(tag.as_ref(), ident, mapped.pointer.is_pointer());
            let exported = is_exported(ident);
            let name = if self.options.camel_case_fields && !is_api && exported {
                to_camel_case(&resolved.name)
            } else {
                resolved.name
            };
            // Names sharing one tag resolve to the same property.
            if out.iter().any(|f| f.name == name) {
                tracing::debug!(
                    field = %ident,
                    name = %name,
                    path = %self.path.display(),
                    "duplicate field name skipped"
                );
                continue;
            }
            out.push(FieldEntry {
                name,
                ty: mapped.ty.clone(),
                optional: resolved.optional,
                nullable: mapped.pointer == Pointer::Direct,
                docs: docs.clone(),
                validation: resolved.validation,
                is_exported: exported,
            });
        }
    }

    /// Comments directly above `node`, skipping a trailing comment of the
    /// preceding sibling.
    fn leading_docs(&self, node: Node) -> Option<String> {
        let mut comments = Vec::new();
        let mut expected_row = node.start_position().row;
        let mut current = node.prev_named_sibling();
        while let Some(prev) = current {
            if prev.kind() != "comment" || prev.end_position().row + 1 != expected_row {
                break;
            }
            let before = prev.prev_named_sibling();
            if before.is_some_and(|b| {
                b.kind() != "comment" && b.end_position().row == prev.start_position().row
            }) {
                break;
            }
            comments.push(prev);
            expected_row = prev.start_position().row;
            current = before;
        }
        comments.reverse();
        comment_text(&comments, self.source)
    }

    fn field_docs(&self, field: Node) -> Option<String> {
        let above = self.leading_docs(field);
        let trailing = field
            .next_named_sibling()
            .filter(|n| {
                n.kind() == "comment" && n.start_position().row == field.end_position().row
            })
            .and_then(|n| comment_text(&[n], self.source));
        match (above, trailing) {
            (Some(a), Some(t)) => Some(format!("{}\n{}", a, t)),
            (a, t) => a.or(t),
        }
    }
}
