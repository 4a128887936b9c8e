/// Regex patterns for SQL layout rules
///
/// All patterns are compiled once at first use via `LazyLock` and are
/// case-insensitive. Patterns that must recognize protected-span tokens
/// embed the token class of the relevant channel.
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::protect::SpanKind;
use crate::parser::registry::build_re;

/// Any run of whitespace
pub static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s+"));

// ===== ALIASES =====

/// `AS` with whatever horizontal spacing surrounds it
pub static AS_SPACING_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"[ \t]+(AS)[ \t]+"));

/// `term AS alias` on a single line; list commas delimit both terms
pub static ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"([^\s,]+) (AS) ([^\s,]+)"));

// ===== LISTS =====

/// A comma with its surrounding whitespace and an optional inline comment after it
pub static COMMA_RE: LazyLock<Regex> = LazyLock::new(|| {
    let inline = SpanKind::InlineComment.class_body();
    build_re(&format!(r"\s*,[ \t]*([{inline}])?\s*"))
});

/// An inline comment followed by more code on the same line
pub static INLINE_THEN_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let inline = SpanKind::InlineComment.class_body();
    build_re(&format!(r"([{inline}])[ \t]*(\S)"))
});

/// Line opening a `GROUP BY` clause
pub static GROUP_BY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^\s*GROUP\s+BY\b"));

// ===== CLAUSES =====

/// Line that starts with `ON`
pub static ON_LINE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*ON\b"));

/// Line that starts with `AND` or `OR`
pub static BOOLEAN_LINE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*(AND|OR)\b"));

/// Text ending in `BETWEEN <operand>`, whose next `AND` is not a clause
pub static BETWEEN_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"\bBETWEEN\s+\S+\s*$"));

/// Statement terminator with surrounding whitespace
pub static SEMICOLON_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s*;\s*"));

// ===== CTE =====

/// Line that opens a CTE body: `<name> AS (` at end of line, optionally
/// preceded by `WITH [RECURSIVE]` or a leading comma and followed by an
/// inline comment
pub static CTE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let inline = SpanKind::InlineComment.class_body();
    build_re(&format!(
        r"^\s*(?:WITH\s+(?:RECURSIVE\s+)?|,\s*)?\w+(?:\s*\([^()]*\))?\s+AS\s*\(\s*[{inline}]?$"
    ))
});
