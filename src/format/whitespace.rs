//! Whitespace normalization
//!
//! The layout passes build every line break themselves, so the working text
//! is flattened to single spaces before they run and cleaned up afterwards.

use crate::parser::patterns::WHITESPACE_RE;

/// Collapse every whitespace run (newlines included) to one space and trim
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Drop empty and whitespace-only lines
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip trailing whitespace from every line and trim the whole text
#[must_use]
pub fn trim_lines(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  SELECT\ta,\n\n   b \r\n FROM t  "),
            "SELECT a, b FROM t"
        );
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n  \nb\n"), "a\nb");
    }

    #[test]
    fn test_trim_lines() {
        assert_eq!(trim_lines("\n  a  \nb\t\n\n"), "a\nb");
    }
}
