use std::sync::LazyLock;

use regex::Regex;

use super::{Issue, QueryRule, RuleCategory, RuleInfo};
use crate::lines::Line;

/// Case-sensitive prefix a history line must start with after trimming.
pub const HISTORY_PREFIX: &str = "History:";

/// `<Month YYYY> - <Initials> - <Client>-<YY>-<####>`, e.g. `Mar 2024 - AL -
/// ACME-24-0031`.
static HISTORY_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4}\s+-\s+[A-Z]{2,4}\s+-\s+[A-Z0-9]+-\d{2}-\d{4}"
    )
    .expect("valid regex")
});

/// Whether any `History:` line carries a well-formed entry.
///
/// Lines without the prefix are ignored even when they contain a matching
/// entry.
///
/// # Example
///
/// ```
/// use sql_convention_validator::{lines::split_lines, rules::is_history_comment_present};
///
/// let ok = split_lines("-- header\n  History: Mar 2024 - AL - ACME-24-0031");
/// assert!(is_history_comment_present(&ok));
///
/// let unprefixed = split_lines("-- Mar 2024 - AL - ACME-24-0031");
/// assert!(!is_history_comment_present(&unprefixed));
/// ```
pub fn is_history_comment_present(lines: &[Line<'_>]) -> bool {
    lines
        .iter()
        .filter(|line| line.text.trim().starts_with(HISTORY_PREFIX))
        .any(|line| HISTORY_ENTRY.is_match(line.text))
}

/// Query without a change-log annotation.
pub struct MissingHistoryComment;

impl QueryRule for MissingHistoryComment {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "HIST001",
            name:     "Missing history comment",
            category: RuleCategory::Documentation
        }
    }

    fn check(&self, lines: &[Line<'_>]) -> Vec<Issue> {
        if is_history_comment_present(lines) {
            return vec![];
        }
        vec![Issue::query(self.info().id, "Missing valid history comment.")]
    }
}
