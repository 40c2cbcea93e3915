//! Program construction — from a directory tree or from in-memory sources.
//!
//! Directory loads walk files respecting .gitignore, parse each TypeScript
//! file with tree-sitter in parallel, and assemble the flattened program in
//! a deterministic (path-sorted) file order.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{info, warn};

use super::extractor::extract_file;
use super::language::Dialect;
use super::{Program, SourceFile};
use crate::error::Result;

impl Program {
    /// Build a program from all TypeScript files under `root`.
    ///
    /// Respects .gitignore, skips hidden files, and parses in parallel.
    /// Files that fail to read or parse are skipped with a warning; file
    /// iteration order (and therefore match order) is the sorted path
    /// order, stable across calls.
    pub fn open(root: &Path) -> Result<Program> {
        let mut paths: Vec<PathBuf> = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map_or(false, |ft| ft.is_file()))
            .filter(|entry| Dialect::from_path(entry.path()).is_some())
            .map(|entry| entry.into_path())
            .collect();
        paths.sort();

        let parsed: Mutex<Vec<SourceFile>> = Mutex::new(Vec::with_capacity(paths.len()));

        paths.par_iter().for_each(|path| {
            let source = match fs::read_to_string(path) {
                Ok(source) => source,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable file");
                    return;
                }
            };
            match extract_file(path, &source) {
                Ok(nodes) => {
                    if let Ok(mut files) = parsed.lock() {
                        files.push(SourceFile {
                            path: path.clone(),
                            source,
                            nodes,
                        });
                    }
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unparseable file"),
            }
        });

        let mut files = parsed.into_inner().unwrap_or_default();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let program = Program { files };
        let stats = program.stats();
        info!(%stats, "program loaded");
        Ok(program)
    }

    /// Build a program from in-memory `(path, source)` pairs.
    ///
    /// File iteration order is the order given. Used for tests and for
    /// embedding without touching the file system.
    pub fn from_sources<P, S>(sources: impl IntoIterator<Item = (P, S)>) -> Result<Program>
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let mut files = Vec::new();
        for (path, source) in sources {
            let path = path.into();
            let source = source.into();
            let nodes = extract_file(&path, &source)?;
            files.push(SourceFile {
                path,
                source,
                nodes,
            });
        }
        Ok(Program { files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ts"), "export interface A { id: number; }").unwrap();
        fs::write(dir.path().join("b.ts"), "export class B {}").unwrap();
        fs::write(dir.path().join("notes.md"), "# not code").unwrap();

        let program = Program::open(dir.path()).unwrap();
        assert_eq!(program.files().len(), 2);
        // Sorted path order.
        assert_eq!(program.file(0).base_name().as_deref(), Some("a.ts"));
        assert_eq!(program.file(1).base_name().as_deref(), Some("b.ts"));
    }

    #[test]
    fn respects_gitignore() {
        let dir = tempfile::tempdir().unwrap();
        // gitignore rules only apply inside a git work tree.
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "dist/\n").unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist").join("bundle.ts"), "const x = 1;").unwrap();
        fs::write(dir.path().join("main.ts"), "const y = 2;").unwrap();

        let program = Program::open(dir.path()).unwrap();
        let names: Vec<_> = program.files().iter().filter_map(|f| f.base_name()).collect();
        assert_eq!(names, vec!["main.ts"]);
    }

    #[test]
    fn from_sources_preserves_order() {
        let program = Program::from_sources([
            ("z.ts", "interface Z {}"),
            ("a.ts", "interface A {}"),
        ])
        .unwrap();
        assert_eq!(program.file(0).base_name().as_deref(), Some("z.ts"));
        assert_eq!(program.file(1).base_name().as_deref(), Some("a.ts"));
    }
}
