//! # astql
//!
//! SQL-like queries over parsed TypeScript programs.
//!
//! astql parses a constrained SQL grammar into a query descriptor, then
//! executes it against a tree-sitter-parsed forest of TypeScript source
//! files: collect candidates of the requested declaration category, filter
//! them through AND-combined predicates, and optionally resolve every
//! cross-file reference to the survivors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use astql::Project;
//! use std::path::Path;
//!
//! let project = Project::open(Path::new("."))?;
//! let result = project.query(
//!     "SELECT * FROM InterfaceDeclaration WHERE name LIKE '%Props' WITH REFERENCES",
//! )?;
//! // Matched declarations in file-then-declaration order, plus a map of
//! // every occurrence referring to each of them.
//! # Ok::<(), astql::AstqlError>(())
//! ```
//!
//! ## Grammar
//!
//! ```text
//! SELECT * FROM <category> [WHERE <cond> [AND <cond>]...] [WITH REFERENCES]
//! cond := attr = 'v' | attr != 'v' | attr [NOT] LIKE 'v%' | attr [NOT] IN ('a', 'b')
//! ```
//!
//! Categories cover interfaces, classes, functions, methods, properties,
//! variables, type aliases, enums, imports, exports, source files, and the
//! `*` wildcard. Attributes: `name`, `kind`, `text`, `modifier`, `path`,
//! `baseName`, `extension`.

pub mod error;
pub mod program;
pub mod project;
pub mod query;

// Re-exports for convenience
pub use error::{AstqlError, Result};
pub use program::{DeclKind, NodeRef, Program, ProgramStats, SourceFile};
pub use project::Project;
pub use query::{
    execute, parse, validate, Attribute, Category, ExecuteOptions, FilterPredicate, Operand,
    Operator, QueryDescriptor, QueryResult, Validation,
};
