//! Query descriptor and result types.
//!
//! Separated for modularity - types can evolve independently of logic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::program::{DeclKind, NodeRef};

/// The node category a query selects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// `*` — every named node in scope.
    Any,
    /// Source files themselves, filtered by file-level attributes.
    SourceFile,
    /// One declaration kind (interface, class, ...).
    Decl(DeclKind),
}

impl Category {
    /// Parse a `FROM` target, case-insensitively.
    ///
    /// Accepts both short spellings (`interface`) and TypeScript-style
    /// kind labels (`InterfaceDeclaration`).
    pub fn parse(token: &str) -> Option<Category> {
        let kind = match token.to_ascii_lowercase().as_str() {
            "*" | "any" | "node" => return Some(Category::Any),
            "file" | "sourcefile" => return Some(Category::SourceFile),
            "interface" | "interfacedeclaration" => DeclKind::Interface,
            "class" | "classdeclaration" => DeclKind::Class,
            "function" | "functiondeclaration" => DeclKind::Function,
            "method" | "methoddeclaration" | "methoddefinition" => DeclKind::Method,
            "property" | "propertydeclaration" | "propertysignature" => DeclKind::Property,
            "variable" | "variabledeclaration" | "variabledeclarator" => DeclKind::Variable,
            "type" | "typealias" | "typealiasdeclaration" => DeclKind::TypeAlias,
            "enum" | "enumdeclaration" => DeclKind::Enum,
            "import" | "importdeclaration" | "importstatement" => DeclKind::Import,
            "export" | "exportdeclaration" | "exportstatement" => DeclKind::Export,
            _ => return None,
        };
        Some(Category::Decl(kind))
    }
}

/// The node attribute a predicate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    /// Declaration identifier name; absent on unnamed nodes.
    Name,
    /// Syntactic kind label, e.g. `InterfaceDeclaration`; always present.
    Kind,
    /// Full original source text of the node; always present.
    Text,
    /// Space-joined modifier keywords; absent without a modifier list.
    Modifier,
    /// Containing file's path (the file's own path for file handles).
    Path,
    /// Containing file's name including extension.
    BaseName,
    /// Containing file's extension including the leading dot.
    Extension,
}

impl Attribute {
    pub fn parse(token: &str) -> Option<Attribute> {
        match token.to_ascii_lowercase().as_str() {
            "name" => Some(Attribute::Name),
            "kind" => Some(Attribute::Kind),
            "text" => Some(Attribute::Text),
            "modifier" | "modifiers" => Some(Attribute::Modifier),
            "path" | "filepath" => Some(Attribute::Path),
            "basename" => Some(Attribute::BaseName),
            "extension" => Some(Attribute::Extension),
            _ => None,
        }
    }
}

/// The comparison a predicate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Like,
    NotLike,
    In,
    NotIn,
}

/// Predicate operand: one string, or an ordered list for IN/NOT IN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Single(String),
    List(Vec<String>),
}

/// One WHERE condition. Conditions are implicitly AND-combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub attribute: Attribute,
    pub operator: Operator,
    pub operand: Operand,
}

/// Immutable result of parsing a query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub category: Category,
    /// AND-combined, in source order. Empty matches everything of the
    /// category.
    pub predicates: Vec<FilterPredicate>,
    /// Set by a trailing `WITH REFERENCES` clause.
    pub include_references: bool,
}

/// Matched declarations and, when requested, their references.
///
/// Both are views into the program that produced them; the program owns
/// all node data.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Discovery order: file iteration order, then in-file order.
    pub matches: Vec<NodeRef>,
    /// Present only for `WITH REFERENCES` queries. Declarations with zero
    /// occurrences are omitted entirely.
    pub references: Option<HashMap<NodeRef, Vec<NodeRef>>>,
}

/// Outcome of [`validate`](crate::query::parser::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
