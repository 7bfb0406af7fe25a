//! Type definitions for the convention rule system.
//!
//! This module defines the core types used throughout the rule engine:
//! - [`RuleCategory`] - Rule categories (Locking, Joins, Literals,
//!   Documentation)
//! - [`Issue`] - Individual findings, optionally bound to a line
//! - [`ValidationReport`] - Complete validation results

use std::fmt;

use serde::Serialize;

/// Category of a rule for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleCategory {
    /// Lock hints and table-reference guidance
    Locking,
    /// JOIN predicate sanity
    Joins,
    /// Repeated literal values
    Literals,
    /// Required change-log annotations
    Documentation
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locking => write!(f, "Locking"),
            Self::Joins => write!(f, "Joins"),
            Self::Literals => write!(f, "Literals"),
            Self::Documentation => write!(f, "Documentation")
        }
    }
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    /// Unique rule identifier (e.g., "LOCK001")
    pub id:       &'static str,
    /// Human-readable rule name
    pub name:     &'static str,
    /// Rule category
    pub category: RuleCategory
}

/// A single finding produced by a rule.
///
/// Line-scoped issues render as `Line N: <message>`; query-scoped issues
/// render as the bare message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Identifier of the rule that produced this issue
    pub rule_id: &'static str,
    /// 1-based source line, if the finding is tied to one
    pub line:    Option<usize>,
    /// Description without the line prefix
    pub message: String
}

impl Issue {
    pub fn at_line(rule_id: &'static str, line: usize, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            line: Some(line),
            message: message.into()
        }
    }

    pub fn query(rule_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            line: None,
            message: message.into()
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => write!(f, "{}", self.message)
        }
    }
}

/// Complete validation report for one query.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Issues in emission order
    pub issues:      Vec<Issue>,
    /// Number of lines the query was split into
    pub lines_count: usize,
    /// Number of rules executed
    pub rules_count: usize
}

impl ValidationReport {
    pub fn new(lines_count: usize, rules_count: usize) -> Self {
        Self {
            issues: Vec::new(),
            lines_count,
            rules_count
        }
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Rendered issue strings in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    pub fn count_for(&self, rule_id: &str) -> usize {
        self.issues
            .iter()
            .filter(|i| i.rule_id.eq_ignore_ascii_case(rule_id))
            .count()
    }
}
