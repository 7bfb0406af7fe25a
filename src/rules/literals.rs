use std::sync::LazyLock;

use compact_str::CompactString;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use smallvec::SmallVec;

use super::{Issue, QueryRule, RuleCategory, RuleInfo};
use crate::lines::Line;

/// `= '<text>'` with optional whitespace after `=`.
static EQUALS_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\s*'([^']*)'").expect("valid regex"));

/// Only punctuation, e.g. `'--'` or `'%'`.
static PUNCTUATION_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\w\s]+$").expect("valid regex"));

/// Occurrences of one normalized literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiteralRecord {
    /// Total matches, including repeats on the same line
    pub count: usize,
    /// Ascending, duplicate-free line numbers
    pub lines: SmallVec<[usize; 4]>
}

impl LiteralRecord {
    fn record(&mut self, line: usize) {
        self.count += 1;
        if let Err(pos) = self.lines.binary_search(&line) {
            self.lines.insert(pos, line);
        }
    }
}

fn normalize_literal(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || PUNCTUATION_ONLY.is_match(trimmed) || trimmed.chars().count() == 1 {
        return None;
    }
    Some(trimmed)
}

/// Collects string literals compared with `=`, keyed by trimmed text in
/// first-seen order.
///
/// Empty, single-character and punctuation-only literals are skipped.
///
/// # Example
///
/// ```
/// use sql_convention_validator::{lines::split_lines, rules::collect_string_literals};
///
/// let lines = split_lines("WHERE s = 'ACTIVE'\nAND t = ' ACTIVE ' AND u = 'x'");
/// let literals = collect_string_literals(&lines);
///
/// assert_eq!(literals.len(), 1);
/// assert_eq!(literals["ACTIVE"].count, 2);
/// assert_eq!(literals["ACTIVE"].lines.as_slice(), &[1, 2]);
/// ```
pub fn collect_string_literals(lines: &[Line<'_>]) -> IndexMap<CompactString, LiteralRecord> {
    let mut literals: IndexMap<CompactString, LiteralRecord> = IndexMap::new();
    for line in lines {
        for caps in EQUALS_LITERAL.captures_iter(line.text) {
            let Some(literal) = normalize_literal(&caps[1]) else {
                continue;
            };
            literals
                .entry(CompactString::from(literal))
                .or_default()
                .record(line.number);
        }
    }
    literals
}

/// The same string literal compared against in several places.
pub struct RepeatedLiteral;

impl QueryRule for RepeatedLiteral {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "LIT001",
            name:     "Repeated string literal",
            category: RuleCategory::Literals
        }
    }

    fn check(&self, lines: &[Line<'_>]) -> Vec<Issue> {
        collect_string_literals(lines)
            .iter()
            .filter(|(_, record)| record.count >= 2)
            .map(|(literal, record)| {
                let used_lines: Vec<String> = record.lines.iter().map(usize::to_string).collect();
                Issue::query(
                    self.info().id,
                    format!(
                        "String literal '{}' is used {} times (lines: {}). Consider using a \
                         variable or parameter.",
                        literal,
                        record.count,
                        used_lines.join(", ")
                    )
                )
            })
            .collect()
    }
}
