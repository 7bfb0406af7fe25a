//! Line splitting for rule evaluation.
//!
//! Every rule addresses the query by 1-based line numbers taken from the
//! original, unmodified text. Comparison copies (lowercased, collapsed) are
//! built by the rules themselves and never replace the raw line.

/// A single source line with its 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line number, starting at 1
    pub number: usize,
    /// Raw text without the trailing `\n`
    pub text:   &'a str
}

impl<'a> Line<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self {
            number,
            text
        }
    }

    /// Lowercased copy used for keyword checks.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Splits a query on `\n` into numbered lines.
///
/// Empty lines are kept and nothing is trimmed, so an empty query yields a
/// single empty line and `"a\n"` yields two lines.
///
/// # Example
///
/// ```
/// use sql_convention_validator::lines::split_lines;
///
/// let lines = split_lines("SELECT 1\n\nFROM dbo.vUsers");
/// assert_eq!(lines.len(), 3);
/// assert_eq!(lines[2].number, 3);
/// assert_eq!(lines[1].text, "");
/// ```
pub fn split_lines(query: &str) -> Vec<Line<'_>> {
    query
        .split('\n')
        .enumerate()
        .map(|(idx, text)| Line::new(idx + 1, text))
        .collect()
}
