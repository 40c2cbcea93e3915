//! TypeScript dialect selection by file extension.

use std::path::Path;

use tree_sitter::Language;

/// Which TypeScript grammar parses a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Detect the dialect from a file extension, or `None` for files this
    /// crate does not parse.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn detects_dialects() {
        assert_eq!(
            Dialect::from_path(Path::new("a/b.ts")),
            Some(Dialect::TypeScript)
        );
        assert_eq!(Dialect::from_path(Path::new("c.tsx")), Some(Dialect::Tsx));
        assert_eq!(
            Dialect::from_path(Path::new("mod.mts")),
            Some(Dialect::TypeScript)
        );
        assert_eq!(Dialect::from_path(Path::new("main.js")), None);
        assert_eq!(Dialect::from_path(Path::new("Makefile")), None);
    }
}
