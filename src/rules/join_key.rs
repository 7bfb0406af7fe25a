use std::sync::LazyLock;

use regex::Regex;

use super::{Issue, LineRule, RuleCategory, RuleInfo, is_join_on_line};
use crate::lines::Line;

/// First `ON <ident> = <ident>` on the line.
static ON_EQUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:ON)\b\s+([a-zA-Z0-9_.]+)\s*=\s*([a-zA-Z0-9_.]+)").expect("valid regex")
});

/// Column names that may legitimately be joined to a differently named key.
///
/// The left side is exempted by `entityvalue` and the right side by
/// `entityvalueid`. The pairing is asymmetric and kept as such.
const LEFT_EXEMPT_COLUMN: &str = "entityvalue";
const RIGHT_EXEMPT_COLUMN: &str = "entityvalueid";

/// Trailing component after the last dot, lowercased.
fn column_name(identifier: &str) -> String {
    identifier
        .rsplit('.')
        .next()
        .unwrap_or(identifier)
        .to_lowercase()
}

/// JOIN predicates equating columns with different names (`A.TypeID =
/// B.PersonID`).
pub struct JoinKeyMismatch;

impl LineRule for JoinKeyMismatch {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "JOIN001",
            name:     "Join key mismatch",
            category: RuleCategory::Joins
        }
    }

    fn check(&self, line: &Line<'_>) -> Vec<Issue> {
        if !is_join_on_line(&line.lower()) {
            return vec![];
        }
        let Some(caps) = ON_EQUALITY.captures(line.text) else {
            return vec![];
        };
        let (left, right) = (&caps[1], &caps[2]);
        let left_col = column_name(left);
        let right_col = column_name(right);
        if left_col != right_col && left_col != LEFT_EXEMPT_COLUMN && right_col != RIGHT_EXEMPT_COLUMN
        {
            return vec![Issue::at_line(
                self.info().id,
                line.number,
                format!(
                    "Suspicious join condition `{} = {}`. Column names differ; check for \
                     unrelated keys.",
                    left, right
                )
            )];
        }
        vec![]
    }
}
