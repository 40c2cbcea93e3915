//! Query module — the SQL-like query language core.
//!
//! Two halves, evaluated in dependency order:
//!
//! ```ignore
//! let descriptor = parse("SELECT * FROM InterfaceDeclaration WHERE name = 'User'")?;
//! let result = execute(&program, &descriptor, &ExecuteOptions::default())?;
//! ```

pub mod executor;
pub mod parser;
mod pattern;
pub mod types;

pub use executor::{execute, ExecuteOptions};
pub use parser::{parse, validate};
pub use types::{
    Attribute, Category, FilterPredicate, Operand, Operator, QueryDescriptor, QueryResult,
    Validation,
};
