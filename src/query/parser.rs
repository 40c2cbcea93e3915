//! Parser for the SQL-like query grammar.
//!
//! ```text
//! query        := SELECT * FROM category [where-clause] [with-clause]
//! where-clause := WHERE condition (AND condition)*
//! condition    := attribute (= | != | [NOT] LIKE | [NOT] IN (...)) value
//! with-clause  := WITH REFERENCES
//! ```
//!
//! Keywords are case-insensitive and whitespace collapses. The `AND` split
//! is deliberately naive: it does not respect quoting, so a quoted value
//! containing `" AND "` mis-splits. Condition segments that match none of
//! the three shapes are silently dropped rather than rejected.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::types::{
    Attribute, Category, FilterPredicate, Operand, Operator, QueryDescriptor, Validation,
};
use crate::error::{AstqlError, Result};

static WITH_REFERENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+WITH\s+REFERENCES\s*$").expect("valid regex"));
static FROM_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bFROM\s+(\S+)").expect("valid regex"));
static WHERE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bWHERE\s+(.+)$").expect("valid regex"));
static AND_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+AND\s+").expect("valid regex"));

static IN_COND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([A-Za-z_][A-Za-z0-9_]*)\s+(NOT\s+)?IN\s*\((.+)\)$").expect("valid regex")
});
static LIKE_COND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^([A-Za-z_][A-Za-z0-9_]*)\s+(NOT\s+)?LIKE\s+(?:'([^']*)'|"([^"]*)")$"#)
        .expect("valid regex")
});
static CMP_COND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^([A-Za-z_][A-Za-z0-9_]*)\s*(!=|=)\s*(?:'([^']*)'|"([^"]*)")$"#)
        .expect("valid regex")
});

/// Parse a query string into a [`QueryDescriptor`].
///
/// Fails on a missing `FROM` clause or an unrecognized category; never
/// returns a partially constructed descriptor.
pub fn parse(query: &str) -> Result<QueryDescriptor> {
    let normalized = query.split_whitespace().collect::<Vec<_>>().join(" ");

    let (body, include_references) = match WITH_REFERENCES.find(&normalized) {
        Some(m) => (normalized[..m.start()].to_string(), true),
        None => (normalized, false),
    };

    let from = FROM_CLAUSE
        .captures(&body)
        .ok_or(AstqlError::MissingFromClause)?;
    let category_token = &from[1];
    let category = Category::parse(category_token)
        .ok_or_else(|| AstqlError::UnknownCategory(category_token.to_string()))?;

    let mut predicates = Vec::new();
    if let Some(where_clause) = WHERE_CLAUSE.captures(&body) {
        for segment in AND_SPLIT.split(&where_clause[1]) {
            match parse_condition(segment) {
                Some(predicate) => predicates.push(predicate),
                None => debug!(segment, "dropping unparseable WHERE segment"),
            }
        }
    }

    Ok(QueryDescriptor {
        category,
        predicates,
        include_references,
    })
}

/// Attempt `parse` and report the outcome without raising.
pub fn validate(query: &str) -> Validation {
    match parse(query) {
        Ok(_) => Validation {
            valid: true,
            error: None,
        },
        Err(e) => Validation {
            valid: false,
            error: Some(e.to_string()),
        },
    }
}

/// Classify one WHERE segment against the three condition shapes, tried
/// in fixed priority order: IN, then LIKE, then =/!=. First match wins;
/// no match (or an unknown attribute) means the segment is dropped.
fn parse_condition(segment: &str) -> Option<FilterPredicate> {
    let segment = segment.trim();

    if let Some(caps) = IN_COND.captures(segment) {
        let attribute = Attribute::parse(&caps[1])?;
        let negated = caps.get(2).is_some();
        let items: Vec<String> = caps[3]
            .split(',')
            .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if items.is_empty() {
            return None;
        }
        return Some(FilterPredicate {
            attribute,
            operator: if negated { Operator::NotIn } else { Operator::In },
            operand: Operand::List(items),
        });
    }

    if let Some(caps) = LIKE_COND.captures(segment) {
        let attribute = Attribute::parse(&caps[1])?;
        let negated = caps.get(2).is_some();
        let value = quoted_value(&caps, 3);
        return Some(FilterPredicate {
            attribute,
            operator: if negated {
                Operator::NotLike
            } else {
                Operator::Like
            },
            operand: Operand::Single(value),
        });
    }

    if let Some(caps) = CMP_COND.captures(segment) {
        let attribute = Attribute::parse(&caps[1])?;
        let operator = if &caps[2] == "!=" {
            Operator::NotEquals
        } else {
            Operator::Equals
        };
        let value = quoted_value(&caps, 3);
        return Some(FilterPredicate {
            attribute,
            operator,
            operand: Operand::Single(value),
        });
    }

    None
}

/// The quoted operand sits in capture `first` (single quotes) or
/// `first + 1` (double quotes).
fn quoted_value(caps: &regex::Captures<'_>, first: usize) -> String {
    caps.get(first)
        .or_else(|| caps.get(first + 1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
