//! Node extraction from TypeScript source using tree-sitter.
//!
//! Flattens the AST of one source file into a preorder list of
//! [`NodeRecord`]s: every named node gets a record, and nodes that match a
//! query category (interfaces, classes, methods, ...) are tagged with their
//! [`DeclKind`] so the executor can collect them without re-walking trees.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::language::Dialect;
use super::{DeclKind, NodeRecord};
use crate::error::{AstqlError, Result};

/// Parse a source file and flatten it into node records.
///
/// Record 0 is always the synthetic `SourceFile` record covering the whole
/// file; the rest follow in preorder, which preserves in-file declaration
/// order.
pub(super) fn extract_file(path: &Path, source: &str) -> Result<Vec<NodeRecord>> {
    let dialect = Dialect::from_path(path)
        .ok_or_else(|| AstqlError::UnsupportedFile(path.to_path_buf()))?;

    let mut parser = Parser::new();
    parser
        .set_language(&dialect.tree_sitter_language())
        .map_err(|e| AstqlError::ParserInit(path.to_path_buf(), e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AstqlError::ParseFailed(path.to_path_buf()))?;
    let root = tree.root_node();

    let mut records = Vec::new();
    records.push(NodeRecord {
        kind: "SourceFile".to_string(),
        category: None,
        name: None,
        modifiers: None,
        start_byte: 0,
        end_byte: source.len(),
        line: 1,
    });

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        visit(&child, source, root.kind(), None, &mut records);
    }

    Ok(records)
}

/// Recursively record a node and its children.
///
/// `export_prefix` carries the `export` / `export default` keywords of a
/// wrapping export statement down to the declaration it exports, so the
/// declaration's modifier text matches how it reads in the source.
fn visit(
    node: &Node,
    source: &str,
    parent_kind: &str,
    export_prefix: Option<&str>,
    records: &mut Vec<NodeRecord>,
) {
    let kind = node.kind();

    if node.is_named() {
        let category = classify(kind, parent_kind);
        let name = node
            .child_by_field_name("name")
            .and_then(|n| node_text(&n, source))
            .map(str::to_string);
        // The export prefix belongs to the exported declaration, not to
        // incidental children like the export clause or module specifier.
        let prefix = if category.is_some() {
            export_prefix
        } else {
            None
        };
        let modifiers = collect_modifiers(node, source, prefix);

        records.push(NodeRecord {
            kind: pascal_case(kind),
            category,
            name,
            modifiers,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            line: node.start_position().row + 1,
        });
    }

    // Export statements pass their keywords to the declaration they wrap;
    // variable statements forward it to their declarators.
    let child_prefix = match kind {
        "export_statement" => {
            let has_default = has_child_kind(node, "default");
            Some(if has_default { "export default" } else { "export" })
        }
        "lexical_declaration" | "variable_declaration" => export_prefix,
        _ => None,
    };

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(&child, source, kind, child_prefix, records);
    }
}

/// Map a tree-sitter node kind onto a query category.
fn classify(kind: &str, parent_kind: &str) -> Option<DeclKind> {
    match kind {
        "interface_declaration" => Some(DeclKind::Interface),
        "class_declaration" | "abstract_class_declaration" => Some(DeclKind::Class),
        "function_declaration" | "generator_function_declaration" => Some(DeclKind::Function),
        "method_definition" if parent_kind == "class_body" => Some(DeclKind::Method),
        "public_field_definition" | "property_signature" => Some(DeclKind::Property),
        "variable_declarator" => Some(DeclKind::Variable),
        "type_alias_declaration" => Some(DeclKind::TypeAlias),
        "enum_declaration" => Some(DeclKind::Enum),
        "import_statement" => Some(DeclKind::Import),
        "export_statement" => Some(DeclKind::Export),
        _ => None,
    }
}

/// Modifier keywords collected in source order and space-joined.
///
/// Returns `None` for nodes with no modifier list, which predicate
/// evaluation treats as an absent attribute.
fn collect_modifiers(node: &Node, source: &str, export_prefix: Option<&str>) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(prefix) = export_prefix {
        parts.push(prefix);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "accessibility_modifier" => {
                if let Some(text) = node_text(&child, source) {
                    parts.push(text);
                }
            }
            "static" | "async" | "readonly" | "abstract" | "declare" | "override" => {
                parts.push(child.kind());
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn has_child_kind(node: &Node, kind: &str) -> bool {
    (0..node.child_count()).any(|i| node.child(i).map_or(false, |c| c.kind() == kind))
}

fn node_text<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    source.get(node.start_byte()..node.end_byte())
}

/// `interface_declaration` → `InterfaceDeclaration`, `identifier` →
/// `Identifier`, and so on for every grammar kind.
fn pascal_case(kind: &str) -> String {
    let mut out = String::with_capacity(kind.len());
    for part in kind.split('_') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
