//! Convention rule engine for SQL text.
//!
//! The engine scans raw SQL line by line and reports violations of house
//! conventions. It is not a parser: every rule is a regex or substring
//! heuristic over the text of a single line or over all lines at once.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │   Query     │────▶│  RuleRunner  │────▶│ ValidationReport │
//! └─────────────┘     └──────────────┘     └──────────────────┘
//!                            │
//!               ┌────────────┴────────────┐
//!               │                         │
//!        ┌──────┴──────┐          ┌───────┴──────┐
//!        │ Line rules  │          │ Query rules  │
//!        │ (per line)  │          │ (all lines)  │
//!        └─────────────┘          └──────────────┘
//! ```
//!
//! Lines and rules are evaluated in parallel with [`rayon`]; results are
//! merged back in a fixed order, so the output is identical to a sequential
//! pass.
//!
//! # Output Order
//!
//! 1. For each line in ascending order: `LOCK001`, then `JOIN001`
//! 2. `LIT001` repeated literals, in first-seen order
//! 3. `HIST001` missing history comment
//! 4. `JOIN002` redundant join conditions, in first-seen order
//!
//! Callers match issue strings by position, so this order is part of the
//! contract.
//!
//! # Rules
//!
//! | ID | Name | Scope |
//! |----|------|-------|
//! | LOCK001 | Lock hint and table reference | line |
//! | JOIN001 | Join key mismatch | line |
//! | LIT001 | Repeated string literal | query |
//! | HIST001 | Missing history comment | query |
//! | JOIN002 | Redundant join condition | query |
//!
//! # Configuration
//!
//! ```toml
//! [rules]
//! disabled = ["LIT001"]
//! ```

mod history;
mod join_key;
mod literals;
mod lock_hint;
mod redundant_join;
mod types;

pub use history::{HISTORY_PREFIX, MissingHistoryComment, is_history_comment_present};
pub use join_key::JoinKeyMismatch;
pub use literals::{LiteralRecord, RepeatedLiteral, collect_string_literals};
pub use lock_hint::LockHintPolicy;
pub use redundant_join::{JoinConditionRecord, RedundantJoinCondition, collect_join_conditions};
use rayon::prelude::*;
use tracing::debug;
pub use types::{Issue, RuleCategory, RuleInfo, ValidationReport};

use crate::{
    config::RulesConfig,
    lines::{Line, split_lines}
};

/// Rule evaluated independently on every line.
///
/// # Example
///
/// ```
/// use sql_convention_validator::{
///     lines::Line,
///     rules::{Issue, LineRule, RuleCategory, RuleInfo}
/// };
///
/// struct NoSelectStar;
///
/// impl LineRule for NoSelectStar {
///     fn info(&self) -> RuleInfo {
///         RuleInfo {
///             id:       "CUSTOM001",
///             name:     "No SELECT *",
///             category: RuleCategory::Joins
///         }
///     }
///
///     fn check(&self, line: &Line<'_>) -> Vec<Issue> {
///         if line.lower().contains("select *") {
///             vec![Issue::at_line("CUSTOM001", line.number, "Avoid SELECT *.")]
///         } else {
///             vec![]
///         }
///     }
/// }
///
/// let issues = NoSelectStar.check(&Line::new(3, "SELECT * FROM t"));
/// assert_eq!(issues[0].to_string(), "Line 3: Avoid SELECT *.");
/// ```
pub trait LineRule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Checks one line and returns its issues in emission order.
    fn check(&self, line: &Line<'_>) -> Vec<Issue>;
}

/// Rule that aggregates over all lines of a query.
pub trait QueryRule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Checks the full line sequence and returns its issues in emission
    /// order.
    fn check(&self, lines: &[Line<'_>]) -> Vec<Issue>;
}

/// Parallel rule execution engine.
///
/// # Example
///
/// ```
/// use sql_convention_validator::{config::RulesConfig, rules::RuleRunner};
///
/// let config = RulesConfig {
///     disabled: vec!["HIST001".into()]
/// };
///
/// let runner = RuleRunner::with_config(config);
/// let report = runner.analyze("SELECT 1");
///
/// assert!(report.is_clean());
/// ```
pub struct RuleRunner {
    line_rules:  Vec<Box<dyn LineRule>>,
    query_rules: Vec<Box<dyn QueryRule>>
}

impl Default for RuleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRunner {
    /// Create a new runner with all default rules
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Create a new runner with configuration
    ///
    /// Disabled rules are dropped; the remaining ones keep their output
    /// order.
    pub fn with_config(config: RulesConfig) -> Self {
        let line_rules: Vec<Box<dyn LineRule>> =
            vec![Box::new(LockHintPolicy), Box::new(JoinKeyMismatch)];
        let query_rules: Vec<Box<dyn QueryRule>> = vec![
            Box::new(RepeatedLiteral),
            Box::new(MissingHistoryComment),
            Box::new(RedundantJoinCondition),
        ];
        Self {
            line_rules:  line_rules
                .into_iter()
                .filter(|r| !config.is_disabled(r.info().id))
                .collect(),
            query_rules: query_rules
                .into_iter()
                .filter(|r| !config.is_disabled(r.info().id))
                .collect()
        }
    }

    /// Metadata of every enabled rule, in output order.
    pub fn rules(&self) -> Vec<RuleInfo> {
        self.line_rules
            .iter()
            .map(|r| r.info())
            .chain(self.query_rules.iter().map(|r| r.info()))
            .collect()
    }

    /// Run all rules on the query text
    pub fn analyze(&self, query: &str) -> ValidationReport {
        let lines = split_lines(query);
        let mut report =
            ValidationReport::new(lines.len(), self.line_rules.len() + self.query_rules.len());
        let per_line: Vec<Vec<Issue>> = lines
            .par_iter()
            .map(|line| {
                self.line_rules
                    .iter()
                    .flat_map(|rule| rule.check(line))
                    .collect()
            })
            .collect();
        let per_query: Vec<Vec<Issue>> = self
            .query_rules
            .par_iter()
            .map(|rule| rule.check(&lines))
            .collect();
        report.extend(per_line.into_iter().flatten());
        report.extend(per_query.into_iter().flatten());
        debug!(
            lines = report.lines_count,
            rules = report.rules_count,
            issues = report.issues.len(),
            "validation finished"
        );
        report
    }
}

/// Validates a query with the default rule set.
///
/// Returns the rendered issue strings in output order; an empty vector
/// means the query follows every convention.
///
/// # Example
///
/// ```
/// use sql_convention_validator::rules::validate;
///
/// let issues = validate("SELECT * FROM dbo.vCustomer WITH (NOLOCK)");
/// assert_eq!(issues, vec!["Missing valid history comment."]);
/// ```
pub fn validate(query: &str) -> Vec<String> {
    RuleRunner::new().analyze(query).messages()
}

/// Lowercased line containing both `" join "` and `" on "`.
pub(crate) fn is_join_on_line(lower: &str) -> bool {
    lower.contains(" join ") && lower.contains(" on ")
}
