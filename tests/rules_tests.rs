use sql_convention_validator::{
    config::RulesConfig,
    rules::{RuleRunner, validate}
};

const HISTORY: &str = "-- History: Mar 2024 - AL - ACME-24-0031";
const VALID_HISTORY: &str = "History: Mar 2024 - AL - ACME-24-0031";
const MISSING_HINT: &str = "Missing WITH (NOLOCK) on FROM or JOIN. Required unless using \
                            updatable views or trigger context.";
const BASE_TABLE: &str = "Consider using views instead of referencing base tables.";
const MISSING_HISTORY: &str = "Missing valid history comment.";

fn with_history(body: &str) -> String {
    format!("{}\n{}", VALID_HISTORY, body)
}

fn rule_ids(query: &str) -> Vec<String> {
    RuleRunner::new()
        .analyze(query)
        .issues
        .iter()
        .map(|i| i.rule_id.to_string())
        .collect()
}

#[test]
fn test_no_triggers_yields_nothing() {
    let query = with_history("SELECT a, b\nFROM Customer\nWHERE a = 1\n\nORDER BY b");
    assert!(validate(&query).is_empty());
}

#[test]
fn test_empty_query_only_misses_history() {
    assert_eq!(validate(""), vec![MISSING_HISTORY]);
}

#[test]
fn test_missing_hint_on_base_table() {
    let issues = validate(&with_history("SELECT * FROM dbo.Customer"));
    assert_eq!(
        issues,
        vec![
            format!("Line 2: {}", MISSING_HINT),
            format!("Line 2: {}", BASE_TABLE),
        ]
    );
}

#[test]
fn test_adding_hint_removes_missing_hint() {
    let issues = validate(&with_history("SELECT * FROM dbo.Customer WITH (NOLOCK)"));
    assert_eq!(issues, vec![format!("Line 2: {}", BASE_TABLE)]);
}

#[test]
fn test_hint_on_updatable_view() {
    let issues = validate(&with_history(
        "SELECT * FROM dbo.Vorders WITH (NOLOCK) -- updatable"
    ));
    assert_eq!(
        issues,
        vec!["Line 2: WITH (NOLOCK) should not be used on an updatable view."]
    );
}

#[test]
fn test_join_key_mismatch() {
    let query =
        with_history("FROM dbo.vA A WITH (NOLOCK) JOIN dbo.Orders B ON A.TypeID = B.PersonID");
    let issues = validate(&query);
    assert!(issues.contains(
        &"Line 2: Suspicious join condition `A.TypeID = B.PersonID`. Column names differ; \
          check for unrelated keys."
            .to_string()
    ));

    let fixed =
        with_history("FROM dbo.vA A WITH (NOLOCK) JOIN dbo.Orders B ON A.TypeID = B.TypeID");
    assert!(!rule_ids(&fixed).contains(&"JOIN001".to_string()));
}

#[test]
fn test_literal_on_two_lines() {
    let query = with_history("WHERE Status = 'ACTIVE'\nAND Kind = 1\nOR Other = 'ACTIVE'");
    assert_eq!(
        validate(&query),
        vec![
            "String literal 'ACTIVE' is used 2 times (lines: 2, 4). Consider using a variable \
             or parameter."
        ]
    );
}

#[test]
fn test_literal_noise_never_counts() {
    let query = with_history("a = 'ACTIVE'\nb = 'a'\nc = 'a'\nd = ''\ne = ''");
    assert!(validate(&query).is_empty());
}

#[test]
fn test_history_present_and_missing() {
    assert!(validate(VALID_HISTORY).is_empty());
    assert_eq!(validate("SELECT 1"), vec![MISSING_HISTORY]);
    assert_eq!(validate(HISTORY), vec![MISSING_HISTORY]);
}

#[test]
fn test_redundant_join_condition_first_line() {
    let query = with_history(
        "SELECT 1\nFROM x JOIN y ON A.ID = B.ID\nFROM z JOIN w ON A.ID = B.ID"
    );
    assert_eq!(
        validate(&query),
        vec![
            "Line 3: Redundant join condition 'a.id=b.id' appears in multiple joins. Consider \
             removing duplicates."
        ]
    );
}

#[test]
fn test_dangling_join_predicates_are_counted() {
    let query = with_history("FROM x JOIN a ON \nFROM y JOIN b ON a.id = b.id AND ");
    assert_eq!(
        validate(&query),
        vec![
            "Line 2: Redundant join condition '' appears in multiple joins. Consider removing \
             duplicates."
        ]
    );
}

#[test]
fn test_aggregator_order() {
    let query = [
        "SELECT * FROM dbo.Customer c",
        "    JOIN dbo.vOrders o WITH (NOLOCK) ON c.TypeID = o.PersonID AND o.Kind = 'OPEN'",
        "    JOIN dbo.vItems i WITH (NOLOCK) ON c.TypeID = o.PersonID AND i.Kind = 'OPEN'"
    ]
    .join("\n");
    let ids = rule_ids(&query);
    assert_eq!(
        ids,
        vec![
            "LOCK001", "LOCK001", "JOIN001", "JOIN001", "LIT001", "HIST001", "JOIN002"
        ]
    );
    let issues = validate(&query);
    assert!(issues[0].starts_with("Line 1: Missing WITH (NOLOCK)"));
    assert!(issues[1].starts_with("Line 1: Consider using views"));
    assert!(issues[2].starts_with("Line 2: Suspicious join condition"));
    assert!(issues[3].starts_with("Line 3: Suspicious join condition"));
    assert!(issues[4].starts_with("String literal 'OPEN' is used 2 times (lines: 2, 3)"));
    assert_eq!(issues[5], MISSING_HISTORY);
    assert!(issues[6].starts_with("Line 2: Redundant join condition 'c.typeid=o.personid'"));
}

#[test]
fn test_line_numbers_follow_original_split() {
    let query = "\n\n   \nSELECT * FROM dbo.Customer";
    let issues = validate(query);
    assert!(issues[0].starts_with("Line 4: "));
}

#[test]
fn test_idempotent() {
    let query = [
        "History: Jan 2023 - JD - X9-23-1234",
        "SELECT * FROM dbo.Customer c",
        "JOIN dbo.Orders o ON c.ID = o.ID",
        "JOIN dbo.Items i ON c.ID = o.ID AND i.Kind = 'OPEN'",
        "WHERE c.Kind = 'OPEN'"
    ]
    .join("\n");
    let first = validate(&query);
    let second = validate(&query);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_disabled_rules_are_skipped() {
    let runner = RuleRunner::with_config(RulesConfig {
        disabled: vec!["LOCK001".to_string(), "HIST001".to_string()]
    });
    let report = runner.analyze("SELECT * FROM dbo.Customer");
    assert!(report.is_clean());
    assert_eq!(report.rules_count, 3);
    assert_eq!(report.lines_count, 1);
}
