//! Line segmentation
//!
//! Decides where lines start: before clause keywords, after inline comments
//! that trail code, and around statement terminators. `ON` is pulled back
//! onto the line of the join it belongs to.

use crate::config::CaseMode;
use crate::format::case_convert::case_keyword;
use crate::parser::patterns::{
    BETWEEN_TAIL_RE, INLINE_THEN_CODE_RE, ON_LINE_RE, SEMICOLON_RE,
};
use crate::parser::registry::CLAUSE_RE;

/// Indentation of code that continues after a broken inline comment
const CONTINUATION_INDENT: &str = "       ";

/// Insert a line break before every clause keyword
///
/// The whitespace around the keyword is replaced by the break and exactly
/// one trailing space. Keywords directly after `.` are column or table
/// names and stay put, as does the `AND` of `BETWEEN x AND y`.
#[must_use]
pub fn break_clauses(text: &str, mode: CaseMode) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut last = 0;

    for caps in CLAUSE_RE.captures_iter(text) {
        let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        last = whole.end();

        if whole.start() == keyword.start() && out.ends_with('.') {
            out.push_str(&text[keyword.start()..whole.end()]);
            continue;
        }

        let cased = case_keyword(keyword.as_str(), mode);
        if keyword.as_str().eq_ignore_ascii_case("and") && BETWEEN_TAIL_RE.is_match(&out) {
            out.push(' ');
            out.push_str(&cased);
            out.push(' ');
            continue;
        }

        let kept = out.trim_end_matches([' ', '\t']).len();
        out.truncate(kept);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&cased);
        out.push(' ');
    }
    out.push_str(&text[last..]);
    out
}

/// Break the line after an inline comment that is followed by more code
#[must_use]
pub fn break_after_inline_comments(text: &str) -> String {
    INLINE_THEN_CODE_RE
        .replace_all(text, format!("${{1}}\n{CONTINUATION_INDENT}${{2}}"))
        .into_owned()
}

/// Append every line starting with `ON` to the line before it
#[must_use]
pub fn join_on_clauses(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        match lines.last_mut() {
            Some(previous) if ON_LINE_RE.is_match(line) => {
                previous.push(' ');
                previous.push_str(line.trim());
            }
            _ => lines.push(line.to_string()),
        }
    }
    lines.join("\n")
}

/// Put every `;` on a line of its own
#[must_use]
pub fn split_statements(text: &str) -> String {
    SEMICOLON_RE.replace_all(text, "\n;\n").into_owned()
}
