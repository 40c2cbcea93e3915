//! Thin façade pairing a parsed program with default execution options.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::program::Program;
use crate::query::{execute, parse, validate, ExecuteOptions, QueryResult, Validation};

/// A loaded project: one program plus the scope options every query on it
/// shares.
#[derive(Debug)]
pub struct Project {
    program: Program,
    options: ExecuteOptions,
}

impl Project {
    /// Load every TypeScript file under `root`.
    pub fn open(root: &Path) -> Result<Project> {
        Ok(Project {
            program: Program::open(root)?,
            options: ExecuteOptions::default(),
        })
    }

    /// Build a project from in-memory `(path, source)` pairs.
    pub fn from_sources<P, S>(sources: impl IntoIterator<Item = (P, S)>) -> Result<Project>
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Ok(Project {
            program: Program::from_sources(sources)?,
            options: ExecuteOptions::default(),
        })
    }

    /// Replace the default execution options.
    pub fn with_options(mut self, options: ExecuteOptions) -> Project {
        self.options = options;
        self
    }

    /// Parse and execute a query in one step.
    pub fn query(&self, query: &str) -> Result<QueryResult> {
        let descriptor = parse(query)?;
        execute(&self.program, &descriptor, &self.options)
    }

    /// Check a query string without executing it.
    pub fn validate(&self, query: &str) -> Validation {
        validate(query)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}
