//! Static keyword and function registries
//!
//! Entries are canonical (uppercase, single-spaced) phrases. Matching is
//! case-insensitive, whole-word, and tolerant of any whitespace run between
//! the words of a phrase, so `group   by` still matches `GROUP BY`.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Keywords that start a new line.
///
/// `ON` is listed so it can be detected as a clause, but the join-on pass
/// folds it back onto the line of the join it belongs to.
pub const CLAUSE_KEYWORDS: &[&str] = &[
    "WITH",
    "SELECT",
    "FROM",
    "WHERE",
    "GROUP BY",
    "HAVING",
    "ORDER BY",
    "LIMIT",
    "OFFSET",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "RIGHT JOIN",
    "RIGHT OUTER JOIN",
    "FULL JOIN",
    "FULL OUTER JOIN",
    "OUTER JOIN",
    "CROSS JOIN",
    "ON",
    "AND",
    "OR",
    "UNION",
    "UNION ALL",
    "INTERSECT",
    "EXCEPT",
    "INSERT INTO",
    "VALUES",
    "UPDATE",
    "SET",
    "DELETE FROM",
    "RETURNING",
    "CREATE TABLE",
    "ALTER TABLE",
    "DROP TABLE",
    "TRUNCATE",
];

/// Keywords that are only re-cased, never moved.
pub const INLINE_KEYWORDS: &[&str] = &[
    "AS",
    "IN",
    "NOT IN",
    "NOT",
    "IS",
    "NULL",
    "IS NULL",
    "IS NOT NULL",
    "EXISTS",
    "NOT EXISTS",
    "DISTINCT",
    "ALL",
    "ANY",
    "BETWEEN",
    "LIKE",
    "ILIKE",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
    "ASC",
    "DESC",
    "NULLS FIRST",
    "NULLS LAST",
    "RECURSIVE",
    "OVER",
    "PARTITION BY",
    "TRUE",
    "FALSE",
    "PRIMARY KEY",
    "FOREIGN KEY",
    "REFERENCES",
    "DEFAULT",
];

/// Function names whose calls are protected spans.
pub const FUNCTIONS: &[&str] = &[
    "COUNT",
    "SUM",
    "AVG",
    "MIN",
    "MAX",
    "COALESCE",
    "NULLIF",
    "IFNULL",
    "ISNULL",
    "CAST",
    "CONVERT",
    "CONCAT",
    "CONCAT_WS",
    "LOWER",
    "UPPER",
    "SUBSTRING",
    "SUBSTR",
    "TRIM",
    "LTRIM",
    "RTRIM",
    "LENGTH",
    "CHAR_LENGTH",
    "REPLACE",
    "POSITION",
    "ROUND",
    "FLOOR",
    "CEIL",
    "CEILING",
    "ABS",
    "MOD",
    "POWER",
    "SQRT",
    "NOW",
    "CURRENT_DATE",
    "CURRENT_TIMESTAMP",
    "DATE",
    "DATE_TRUNC",
    "DATE_PART",
    "EXTRACT",
    "TO_CHAR",
    "TO_DATE",
    "TO_TIMESTAMP",
    "GREATEST",
    "LEAST",
    "ROW_NUMBER",
    "RANK",
    "DENSE_RANK",
    "NTILE",
    "LAG",
    "LEAD",
    "FIRST_VALUE",
    "LAST_VALUE",
    "STRING_AGG",
    "ARRAY_AGG",
    "GROUP_CONCAT",
    "JSON_AGG",
    "JSON_BUILD_OBJECT",
];

/// Build a case-insensitive regex from a pattern assembled from the registries.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns are built from the constant
/// registries above and are covered by tests.
pub(crate) fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

/// Turn a registry phrase into a pattern fragment (`GROUP BY` -> `GROUP\s+BY`)
fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Alternation of phrases, longest first so no phrase is shadowed by its prefix
#[must_use]
pub fn alternation(phrases: &[&str]) -> String {
    let mut sorted: Vec<&str> = phrases.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted
        .iter()
        .map(|p| phrase_pattern(p))
        .collect::<Vec<_>>()
        .join("|")
}

/// Every keyword, for case normalization
pub static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let all: Vec<&str> = CLAUSE_KEYWORDS
        .iter()
        .chain(INLINE_KEYWORDS.iter())
        .copied()
        .collect();
    build_re(&format!(r"\b(?:{})\b", alternation(&all)))
});

/// Clause keywords, with the whitespace around them so breaks replace it
pub static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"\s*\b({})\b[ \t]*",
        alternation(CLAUSE_KEYWORDS)
    ))
});

/// Registry function name directly followed by its opening parenthesis
pub static FUNCTION_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"\b({})(\s*\()", alternation(FUNCTIONS))));

/// Collapse internal whitespace of a matched phrase to single spaces
#[must_use]
pub fn collapse_phrase(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
