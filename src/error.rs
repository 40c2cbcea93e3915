//! Crate-wide error type.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AstqlError>;

#[derive(Debug, Error)]
pub enum AstqlError {
    /// The query has no `FROM <category>` clause.
    #[error("malformed query: missing FROM clause")]
    MissingFromClause,

    /// The `FROM` target is not a recognized declaration category.
    #[error("malformed query: unknown category '{0}'")]
    UnknownCategory(String),

    /// A file-scope glob pattern failed to compile.
    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidFilePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A LIKE pattern produced an uncompilable regex.
    #[error("invalid LIKE pattern: {0}")]
    InvalidLikePattern(#[from] regex::Error),

    /// The file's extension is not a TypeScript dialect.
    #[error("unsupported file type: {0}")]
    UnsupportedFile(PathBuf),

    /// tree-sitter rejected the grammar handle.
    #[error("parser initialization failed for {0}: {1}")]
    ParserInit(PathBuf, String),

    /// tree-sitter returned no parse tree.
    #[error("tree-sitter failed to parse {0}")]
    ParseFailed(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
