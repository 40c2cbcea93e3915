//! SQL LIKE pattern compilation.

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Compile a SQL LIKE pattern into an anchored, case-insensitive regex.
///
/// `%` matches zero or more of any character, `_` exactly one; everything
/// else is matched literally against the entire value.
pub fn compile_like(pattern: &str) -> Result<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 2);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '%' => expr.push_str(".*"),
            '_' => expr.push('.'),
            ch => expr.push_str(&regex::escape(&ch.to_string())),
        }
    }
    expr.push('$');

    let regex = RegexBuilder::new(&expr)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()?;
    Ok(regex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_matches_any_run() {
        let re = compile_like("%Service").unwrap();
        assert!(re.is_match("UserService"));
        assert!(re.is_match("Service"));
        assert!(!re.is_match("ServiceImpl"));
    }

    #[test]
    fn underscore_matches_exactly_one() {
        let re = compile_like("ab_").unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("ab"));
        assert!(!re.is_match("abcd"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let re = compile_like("user%").unwrap();
        assert!(re.is_match("UserService"));
        assert!(re.is_match("USERNAME"));
    }

    #[test]
    fn literals_are_escaped() {
        let re = compile_like("a.b+c").unwrap();
        assert!(re.is_match("a.b+c"));
        assert!(!re.is_match("aXb+c"));
    }

    #[test]
    fn wildcard_spans_newlines() {
        let re = compile_like("%class%").unwrap();
        assert!(re.is_match("export\nclass Foo {}"));
    }

    #[test]
    fn match_is_full_string() {
        let re = compile_like("User").unwrap();
        assert!(re.is_match("User"));
        assert!(!re.is_match("UserService"));
    }
}
