//! Query execution against a parsed program.
//!
//! Collects candidate nodes for the descriptor's category, filters them
//! through the AND-combined predicates, and optionally resolves every
//! cross-file reference to the survivors. Execution is a read-only pass;
//! the program must be stable for the duration of a call.

use std::borrow::Cow;
use std::collections::HashMap;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use tracing::debug;

use super::pattern::compile_like;
use super::types::{
    Attribute, Category, FilterPredicate, Operand, Operator, QueryDescriptor, QueryResult,
};
use crate::error::{AstqlError, Result};
use crate::program::{NodeRef, Program};

/// Caller-supplied execution scope.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Glob patterns matched against forward-slash file paths; empty means
    /// every file is in scope.
    pub file_patterns: Vec<String>,
    /// Truncate the match list (not the reference lists) to this count.
    pub max_results: Option<usize>,
}

/// Execute a parsed descriptor against a program.
///
/// Categories with no occurrences produce an empty result, never an
/// error. The only failure modes are malformed scope globs and (in
/// principle) uncompilable LIKE patterns.
pub fn execute(
    program: &Program,
    descriptor: &QueryDescriptor,
    options: &ExecuteOptions,
) -> Result<QueryResult> {
    let scope = build_scope(&options.file_patterns)?;

    // Step 1+2: candidate collection in file-then-declaration order.
    let mut candidates: Vec<NodeRef> = Vec::new();
    for (file_idx, file) in program.files().iter().enumerate() {
        if let Some(scope) = &scope {
            if !scope.is_match(file.path_str()) {
                continue;
            }
        }
        match descriptor.category {
            Category::SourceFile => candidates.push(NodeRef {
                file: file_idx,
                node: 0,
            }),
            Category::Any => {
                candidates.extend((0..file.nodes().len()).map(|node| NodeRef {
                    file: file_idx,
                    node,
                }));
            }
            Category::Decl(kind) => {
                candidates.extend(file.nodes().iter().enumerate().filter_map(
                    |(node, record)| {
                        (record.category == Some(kind)).then_some(NodeRef {
                            file: file_idx,
                            node,
                        })
                    },
                ));
            }
        }
    }

    // Step 3: AND-combined predicate filtering.
    let compiled = compile_predicates(&descriptor.predicates)?;
    let mut matches: Vec<NodeRef> = candidates
        .into_iter()
        .filter(|&candidate| {
            descriptor
                .predicates
                .iter()
                .zip(&compiled)
                .all(|(predicate, like)| evaluate(program, candidate, predicate, like.as_ref()))
        })
        .collect();

    debug!(count = matches.len(), "query matched");

    // Step 4: reference resolution for surviving declarations.
    let references = if descriptor.include_references {
        let mut map: HashMap<NodeRef, Vec<NodeRef>> = HashMap::new();
        for &decl in &matches {
            let occurrences = program.find_references(decl);
            if !occurrences.is_empty() {
                map.insert(decl, occurrences);
            }
        }
        Some(map)
    } else {
        None
    };

    // Step 5: optional truncation of the match list only.
    if let Some(limit) = options.max_results {
        matches.truncate(limit);
    }

    Ok(QueryResult {
        matches,
        references,
    })
}

fn build_scope(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| AstqlError::InvalidFilePattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|source| AstqlError::InvalidFilePattern {
            pattern: patterns.join(", "),
            source,
        })?;
    Ok(Some(set))
}

/// Pre-compile LIKE/NOT LIKE operands; other operators need no regex.
fn compile_predicates(predicates: &[FilterPredicate]) -> Result<Vec<Option<Regex>>> {
    predicates
        .iter()
        .map(|predicate| match (&predicate.operator, &predicate.operand) {
            (Operator::Like | Operator::NotLike, Operand::Single(pattern)) => {
                compile_like(pattern).map(Some)
            }
            _ => Ok(None),
        })
        .collect()
}

/// One predicate against one candidate. An absent attribute fails the
/// predicate for every operator, including the negated ones.
fn evaluate(
    program: &Program,
    candidate: NodeRef,
    predicate: &FilterPredicate,
    like: Option<&Regex>,
) -> bool {
    let value = match extract(program, candidate, predicate.attribute) {
        Some(value) => value,
        None => return false,
    };

    let value = value.as_ref();
    match (&predicate.operator, &predicate.operand) {
        (Operator::Equals, Operand::Single(operand)) => value == operand,
        (Operator::NotEquals, Operand::Single(operand)) => value != operand,
        (Operator::Like, Operand::Single(_)) => {
            like.map_or(false, |re| re.is_match(value))
        }
        (Operator::NotLike, Operand::Single(_)) => {
            like.map_or(false, |re| !re.is_match(value))
        }
        (Operator::In, Operand::List(items)) => items.iter().any(|item| item == value),
        (Operator::NotIn, Operand::List(items)) => items.iter().all(|item| item != value),
        // Operator/operand shape mismatches cannot come out of the parser.
        _ => false,
    }
}

/// Extract a candidate's attribute value, or `None` when the attribute is
/// not applicable to the node.
fn extract<'a>(program: &'a Program, candidate: NodeRef, attribute: Attribute) -> Option<Cow<'a, str>> {
    let record = program.record(candidate);
    let file = program.file(candidate.file);
    match attribute {
        Attribute::Name => record.name.as_deref().map(Cow::Borrowed),
        Attribute::Kind => Some(Cow::Borrowed(record.kind.as_str())),
        Attribute::Text => Some(Cow::Borrowed(program.node_text(candidate))),
        Attribute::Modifier => record.modifiers.as_deref().map(Cow::Borrowed),
        Attribute::Path => Some(Cow::Owned(file.path_str())),
        Attribute::BaseName => file.base_name().map(Cow::Owned),
        Attribute::Extension => file.extension().map(Cow::Owned),
    }
}
