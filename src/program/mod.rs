//! In-memory representation of a parsed TypeScript program.
//!
//! A [`Program`] is a forest of per-file syntax trees flattened into
//! preorder node records. Query results hold [`NodeRef`] handles into the
//! program; the program owns all text and node data for its entire
//! lifetime, and is treated as read-only while queries run against it.

mod builder;
mod extractor;
mod language;
mod references;

pub use language::Dialect;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The declaration categories a query can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    Interface,
    Class,
    Function,
    Method,
    Property,
    Variable,
    TypeAlias,
    Enum,
    Import,
    Export,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeclKind::Interface => "InterfaceDeclaration",
            DeclKind::Class => "ClassDeclaration",
            DeclKind::Function => "FunctionDeclaration",
            DeclKind::Method => "MethodDeclaration",
            DeclKind::Property => "PropertyDeclaration",
            DeclKind::Variable => "VariableDeclaration",
            DeclKind::TypeAlias => "TypeAliasDeclaration",
            DeclKind::Enum => "EnumDeclaration",
            DeclKind::Import => "ImportDeclaration",
            DeclKind::Export => "ExportDeclaration",
        };
        f.write_str(label)
    }
}

/// One flattened AST node: kind label, optional declaration category,
/// optional name and modifier text, byte span, and 1-based start line.
///
/// Record 0 of every file is a synthetic whole-file record with kind
/// `SourceFile` spanning the entire source.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    /// PascalCase kind label, e.g. `InterfaceDeclaration`, `Identifier`.
    pub kind: String,
    /// Set when the node is a declaration a query category can target.
    pub category: Option<DeclKind>,
    /// The declaration's identifier name, when it has one.
    pub name: Option<String>,
    /// Space-joined modifier keywords (`export`, `private readonly`, ...).
    pub modifiers: Option<String>,
    pub start_byte: usize,
    pub end_byte: usize,
    /// 1-based line of the node's first byte.
    pub line: usize,
}

/// A parsed source file: path, full text, and preorder node records.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    source: String,
    nodes: Vec<NodeRecord>,
}

impl SourceFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute-ish path with forward slashes, as matched by file globs.
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    /// File name including extension.
    pub fn base_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// File extension including the leading dot.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }
}

/// A handle to one node record inside a [`Program`].
///
/// Plain indices; only meaningful against the program that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub file: usize,
    pub node: usize,
}

/// The parsed program a query executes over.
#[derive(Debug, Default)]
pub struct Program {
    files: Vec<SourceFile>,
}

impl Program {
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, index: usize) -> &SourceFile {
        &self.files[index]
    }

    pub fn record(&self, handle: NodeRef) -> &NodeRecord {
        &self.files[handle.file].nodes[handle.node]
    }

    /// The original source text spanned by the node.
    pub fn node_text(&self, handle: NodeRef) -> &str {
        let file = &self.files[handle.file];
        let record = &file.nodes[handle.node];
        &file.source[record.start_byte..record.end_byte]
    }

    pub fn stats(&self) -> ProgramStats {
        let mut stats = ProgramStats {
            file_count: self.files.len(),
            ..ProgramStats::default()
        };
        for file in &self.files {
            stats.node_count += file.nodes.len();
            stats.declaration_count +=
                file.nodes.iter().filter(|n| n.category.is_some()).count();
        }
        stats
    }
}

/// Counts reported by `astql stats`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgramStats {
    pub file_count: usize,
    pub node_count: usize,
    pub declaration_count: usize,
}

impl fmt::Display for ProgramStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} nodes, {} declarations",
            self.file_count, self.node_count, self.declaration_count
        )
    }
}
