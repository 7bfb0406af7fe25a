use std::sync::LazyLock;

use regex::Regex;

use super::{Issue, LineRule, RuleCategory, RuleInfo};
use crate::lines::Line;

/// `FROM dbo.` or `JOIN dbo.` with a word boundary on the keyword.
static FROM_OR_JOIN_DBO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(from|join)\s+dbo\.").expect("valid regex"));

const ROUTINE_PREFIXES: [&str; 3] = ["dbo.uf", "dbo.up", "dbo.cp"];

/// Context flags computed for a line that references a `dbo.` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TableReference {
    has_lock_hint:          bool,
    updatable_view_context: bool,
    trigger_context:        bool,
    references_view:        bool,
    references_routine:     bool
}

impl TableReference {
    /// Returns `None` when the line has no `FROM dbo.` / `JOIN dbo.`.
    fn detect(text: &str) -> Option<Self> {
        if !FROM_OR_JOIN_DBO.is_match(text) {
            return None;
        }
        let lower = text.to_lowercase();
        // Only spaces are collapsed, tabs inside the hint still break it.
        let collapsed = lower.replace(' ', "");
        Some(Self {
            has_lock_hint:          collapsed.contains("with(nolock)"),
            updatable_view_context: lower.contains("updatable"),
            trigger_context:        lower.contains("inserted") || lower.contains("deleted"),
            references_view:        lower.contains("dbo.v"),
            references_routine:     ROUTINE_PREFIXES.iter().any(|p| lower.contains(p))
        })
    }
}

/// NOLOCK policy and view-versus-base-table guidance on `dbo.` references.
///
/// Four independent checks; one line may produce several issues.
pub struct LockHintPolicy;

impl LineRule for LockHintPolicy {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "LOCK001",
            name:     "Lock hint and table reference",
            category: RuleCategory::Locking
        }
    }

    fn check(&self, line: &Line<'_>) -> Vec<Issue> {
        let Some(table) = TableReference::detect(line.text) else {
            return vec![];
        };
        let id = self.info().id;
        let mut issues = Vec::new();
        if !table.has_lock_hint
            && !(table.updatable_view_context
                || table.trigger_context
                || table.references_routine)
        {
            issues.push(Issue::at_line(
                id,
                line.number,
                "Missing WITH (NOLOCK) on FROM or JOIN. Required unless using updatable views or \
                 trigger context."
            ));
        }
        if table.has_lock_hint && table.updatable_view_context && table.references_view {
            issues.push(Issue::at_line(
                id,
                line.number,
                "WITH (NOLOCK) should not be used on an updatable view."
            ));
        }
        if !table.references_view && !table.references_routine {
            issues.push(Issue::at_line(
                id,
                line.number,
                "Consider using views instead of referencing base tables."
            ));
        }
        if table.has_lock_hint && table.references_routine {
            issues.push(Issue::at_line(
                id,
                line.number,
                "WITH (NOLOCK) should not be used with functions or procedures (e.g., dbo.uf..., \
                 dbo.up..., dbo.cp...)."
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &str = "Missing WITH (NOLOCK) on FROM or JOIN. Required unless using \
                           updatable views or trigger context.";
    const BASE_TABLE: &str = "Consider using views instead of referencing base tables.";

    fn check(text: &str) -> Vec<String> {
        LockHintPolicy
            .check(&Line::new(7, text))
            .into_iter()
            .map(|i| i.message)
            .collect()
    }

    #[test]
    fn test_irrelevant_line() {
        assert!(check("SELECT * FROM Customer").is_empty());
        assert!(check("SELECT dbo.fn(1)").is_empty());
        assert!(check("FROMdbo.Customer").is_empty());
    }

    #[test]
    fn test_base_table_without_hint() {
        assert_eq!(check("SELECT * FROM dbo.Customer"), vec![MISSING, BASE_TABLE]);
    }

    #[test]
    fn test_base_table_with_hint() {
        assert_eq!(check("SELECT * FROM dbo.Customer WITH (NOLOCK)"), vec![BASE_TABLE]);
    }

    #[test]
    fn test_view_with_hint_is_clean() {
        assert!(check("  join DBO.vOrders o with ( nolock ) on o.Id = c.Id").is_empty());
    }

    #[test]
    fn test_hint_on_updatable_view() {
        assert_eq!(
            check("UPDATE x FROM dbo.Vorders WITH (NOLOCK) -- updatable"),
            vec!["WITH (NOLOCK) should not be used on an updatable view."]
        );
    }

    #[test]
    fn test_trigger_context_skips_missing_hint() {
        assert_eq!(check("JOIN dbo.Orders o ON o.Id = inserted.Id"), vec![BASE_TABLE]);
    }

    #[test]
    fn test_hint_on_routine() {
        assert_eq!(
            check("SELECT * FROM dbo.ufGetOrders(1) WITH (NOLOCK)"),
            vec![
                "WITH (NOLOCK) should not be used with functions or procedures (e.g., \
                 dbo.uf..., dbo.up..., dbo.cp...)."
            ]
        );
    }

    #[test]
    fn test_routine_without_hint_is_clean() {
        assert!(check("SELECT * FROM dbo.cpListOrders").is_empty());
    }

    #[test]
    fn test_tab_breaks_collapsed_hint() {
        assert_eq!(check("FROM dbo.vOrders WITH\t(NOLOCK)"), vec![MISSING]);
    }

    #[test]
    fn test_line_number_prefix() {
        let issues = LockHintPolicy.check(&Line::new(12, "FROM dbo.vOrders"));
        assert_eq!(issues[0].to_string(), format!("Line 12: {}", MISSING));
    }
}
