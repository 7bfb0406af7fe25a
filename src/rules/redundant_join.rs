use std::sync::LazyLock;

use compact_str::CompactString;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use super::{Issue, QueryRule, RuleCategory, RuleInfo, is_join_on_line};
use crate::lines::Line;

static ON_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bON\b").expect("valid regex"));

static AND_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AND\s+").expect("valid regex"));

/// Usage of one normalized ON predicate across the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinConditionRecord {
    /// Number of times the predicate was seen
    pub count:      usize,
    /// Predicate as written where it was first seen
    pub first_text: CompactString,
    /// Line of the first occurrence
    pub first_line: usize
}

/// Lowercased with all whitespace removed.
fn normalize_predicate(predicate: &str) -> CompactString {
    predicate
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Predicates of the ON clause: the text between the first `ON` and the next
/// one (or the end of the line), split on `AND`.
fn on_clause_predicates(text: &str) -> Vec<&str> {
    let Some(clause) = ON_KEYWORD.splitn(text, 3).nth(1) else {
        return vec![];
    };
    AND_KEYWORD
        .split(clause)
        .map(str::trim)
        .collect()
}

/// Collects ON predicates of every `JOIN ... ON` line, keyed by normalized
/// text in first-seen order.
///
/// # Example
///
/// ```
/// use sql_convention_validator::{lines::split_lines, rules::collect_join_conditions};
///
/// let lines = split_lines(
///     "FROM a JOIN b ON a.ID = b.ID AND b.Kind = 1\nFROM c JOIN d ON A.id=B.id"
/// );
/// let conditions = collect_join_conditions(&lines);
///
/// assert_eq!(conditions["a.id=b.id"].count, 2);
/// assert_eq!(conditions["a.id=b.id"].first_line, 1);
/// assert_eq!(conditions["b.kind=1"].count, 1);
/// ```
pub fn collect_join_conditions(
    lines: &[Line<'_>]
) -> IndexMap<CompactString, JoinConditionRecord> {
    let mut conditions: IndexMap<CompactString, JoinConditionRecord> = IndexMap::new();
    for line in lines {
        if !is_join_on_line(&line.lower()) {
            continue;
        }
        for predicate in on_clause_predicates(line.text) {
            conditions
                .entry(normalize_predicate(predicate))
                .and_modify(|record| record.count += 1)
                .or_insert_with(|| JoinConditionRecord {
                    count:      1,
                    first_text: CompactString::from(predicate),
                    first_line: line.number
                });
        }
    }
    conditions
}

/// The same ON predicate repeated across joins.
///
/// One issue per distinct predicate, reported at its first line only.
pub struct RedundantJoinCondition;

impl QueryRule for RedundantJoinCondition {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "JOIN002",
            name:     "Redundant join condition",
            category: RuleCategory::Joins
        }
    }

    fn check(&self, lines: &[Line<'_>]) -> Vec<Issue> {
        collect_join_conditions(lines)
            .iter()
            .filter(|(_, record)| record.count > 1)
            .map(|(condition, record)| {
                Issue::at_line(
                    self.info().id,
                    record.first_line,
                    format!(
                        "Redundant join condition '{}' appears in multiple joins. Consider \
                         removing duplicates.",
                        condition
                    )
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::split_lines;

    fn check(query: &str) -> Vec<String> {
        RedundantJoinCondition
            .check(&split_lines(query))
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_repeated_predicate_reports_first_line() {
        let query = "SELECT 1\nFROM x JOIN a ON A.ID = B.ID\nFROM y JOIN b ON A.ID = B.ID\nFROM z \
                     JOIN c ON a.id=b.id";
        assert_eq!(
            check(query),
            vec![
                "Line 2: Redundant join condition 'a.id=b.id' appears in multiple joins. \
                 Consider removing duplicates."
            ]
        );
    }

    #[test]
    fn test_distinct_predicates() {
        assert!(check("FROM x JOIN a ON A.ID = B.ID\nFROM y JOIN b ON A.ID = C.ID").is_empty());
    }

    #[test]
    fn test_repeat_within_one_line() {
        assert_eq!(
            check("FROM x JOIN a ON a.Kind = 1 and a.Kind = 1"),
            vec![
                "Line 1: Redundant join condition 'a.kind=1' appears in multiple joins. \
                 Consider removing duplicates."
            ]
        );
    }

    #[test]
    fn test_lines_without_trigger_are_ignored() {
        assert!(check("JOIN a ON A.ID = B.ID\nJOIN b ON A.ID = B.ID").is_empty());
    }

    #[test]
    fn test_first_seen_order() {
        let query = "FROM x JOIN a ON b.k = 2 AND a.k = 1\nFROM y JOIN b ON a.k = 1 AND b.k = 2";
        let issues = check(query);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("'b.k=2'"));
        assert!(issues[1].contains("'a.k=1'"));
        assert!(issues.iter().all(|i| i.starts_with("Line 1:")));
    }

    #[test]
    fn test_clause_stops_at_second_on() {
        assert_eq!(
            on_clause_predicates("FROM x JOIN a ON a.id = b.id JOIN c ON c.id = a.id"),
            vec!["a.id = b.id JOIN c"]
        );
    }

    #[test]
    fn test_dangling_on_and_and_record_empty_predicate() {
        let query = "History: Mar 2024 - AL - ACME-24-0031\nFROM x JOIN a ON \nFROM y JOIN b ON a.id \
                     = b.id AND ";
        assert_eq!(
            check(query),
            vec![
                "Line 2: Redundant join condition '' appears in multiple joins. Consider \
                 removing duplicates."
            ]
        );
        assert_eq!(on_clause_predicates("FROM x JOIN a ON "), vec![""]);
    }

    #[test]
    fn test_first_text_is_kept_as_written() {
        let conditions = collect_join_conditions(&split_lines(
            "FROM x JOIN a ON A.ID = B.ID\nFROM y JOIN b ON a.id=b.id"
        ));
        let record = &conditions["a.id=b.id"];
        assert_eq!(record.first_text, "A.ID = B.ID");
        assert_eq!(record.count, 2);
    }
}
