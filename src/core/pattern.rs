//! Wildcard search patterns (`*.dat`, `file?.txt`) as used by `enumerate_files`.
//!
//! The translation reproduces the host shell rules rather than generic glob rules:
//! a pattern ending in a dot followed only by wildcards (`*.*`, `readme.*`, `name.`)
//! also matches names without any extension, and `?` matches zero or one character
//! other than a dot.

use regex::Regex;

use crate::core::error::{Error, Result};
use crate::core::utils;

#[derive(Debug, Clone)]
enum Matcher {
    Everything,
    Regex(Regex),
}

/// A compiled search pattern. Matching is applied to a bare file name and is
/// case sensitive.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    source: String,
    matcher: Matcher,
}

impl SearchPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = utils::validate_pattern(pattern)?;
        if pattern == "*" {
            return Ok(Self {
                source: pattern.to_string(),
                matcher: Matcher::Everything,
            });
        }

        let (head, optional_tail) = split_extension_wildcards(pattern);
        let mut expr = String::with_capacity(pattern.len() * 2 + 8);
        expr.push('^');
        push_translated(&mut expr, head);
        if let Some(tail) = optional_tail {
            expr.push_str("(?:");
            push_translated(&mut expr, tail);
            expr.push_str(")?");
        }
        expr.push('$');

        let regex = Regex::new(&expr)
            .map_err(|e| Error::invalid_argument("pattern", format!("{}: {}", pattern, e)))?;
        Ok(Self {
            source: pattern.to_string(),
            matcher: Matcher::Regex(regex),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        match &self.matcher {
            Matcher::Everything => true,
            Matcher::Regex(regex) => regex.is_match(file_name),
        }
    }
}

/// Splits `pattern` into the part that must match and a trailing `.` + wildcards run
/// that may be absent from the name.
fn split_extension_wildcards(pattern: &str) -> (&str, Option<&str>) {
    let without_wildcards = pattern.trim_end_matches(['*', '?']);
    match without_wildcards.strip_suffix('.') {
        Some(head) => (head, Some(&pattern[head.len()..])),
        None => (pattern, None),
    }
}

fn push_translated(expr: &mut String, part: &str) {
    let mut buf = [0u8; 4];
    for c in part.chars() {
        match c {
            '*' => expr.push_str(".*"),
            '?' => expr.push_str("[^.]?"),
            _ => expr.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
}
