//! Continuation lines
//!
//! Handles lines that continue the clause above them: the items of a
//! `GROUP BY` list and `AND`/`OR` conditions.

use crate::config::CommaPosition;
use crate::format::indenter::paren_balance;
use crate::parser::patterns::{BOOLEAN_LINE_RE, GROUP_BY_LINE_RE};
use crate::parser::protect::{classify_token, SpanKind};

/// Indent of an `AND`/`OR` line relative to its clause
const BOOLEAN_INDENT: &str = "  ";
/// Leading-comma indent that puts `GROUP BY` items under the first item
const GROUP_BY_COMMA_INDENT: &str = "       ";

/// Check whether a line ends with an inline-comment token
fn ends_with_inline_comment(line: &str) -> bool {
    line.trim_end()
        .chars()
        .next_back()
        .and_then(classify_token)
        .is_some_and(|(kind, _)| kind == SpanKind::InlineComment)
}

/// Check whether a line ends in a list comma, looking past an inline comment
fn ends_with_list_comma(line: &str) -> bool {
    let line = line.trim_end();
    let line = if ends_with_inline_comment(line) {
        line.trim_end_matches(|c: char| {
            classify_token(c).is_some_and(|(kind, _)| kind == SpanKind::InlineComment)
        })
        .trim_end()
    } else {
        line
    };
    line.ends_with(',')
}

/// Check whether `line` continues the list on `previous`
fn continues_list(previous: &str, line: &str, position: CommaPosition) -> bool {
    match position {
        CommaPosition::Leading => line.trim_start().starts_with(','),
        CommaPosition::Trailing => ends_with_list_comma(previous),
    }
}

/// Lay out the item lines of every `GROUP BY` clause
///
/// With `single_line` the items are joined back onto the `GROUP BY` line,
/// except after an inline comment, which must keep its line break. Without
/// it, leading commas are realigned under the first item; trailing-comma
/// lists are already aligned.
#[must_use]
pub fn layout_group_by(text: &str, position: CommaPosition, single_line: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    // Open parentheses since `GROUP BY`; `None` outside a list. A list
    // ends where it closes a parenthesis opened before it, as at the end
    // of a CTE body.
    let mut depth: Option<isize> = None;

    for line in text.lines() {
        if GROUP_BY_LINE_RE.is_match(line) {
            depth = Some(paren_balance(line)).filter(|d| *d >= 0);
            lines.push(line.to_string());
            continue;
        }

        let continues = depth.is_some()
            && lines
                .last()
                .is_some_and(|previous| continues_list(previous, line, position));
        if !continues {
            depth = None;
            lines.push(line.to_string());
            continue;
        }
        depth = depth
            .map(|d| d + paren_balance(line))
            .filter(|d| *d >= 0);

        let item = line.trim();
        let merge = single_line
            && lines
                .last()
                .is_some_and(|previous| !ends_with_inline_comment(previous));
        if let (true, Some(previous)) = (merge, lines.last_mut()) {
            match position {
                CommaPosition::Leading => {
                    previous.push_str(", ");
                    previous.push_str(item.trim_start_matches(',').trim_start());
                }
                CommaPosition::Trailing => {
                    previous.push(' ');
                    previous.push_str(item);
                }
            }
            continue;
        }

        let realigned = match position {
            CommaPosition::Leading => format!(
                "{GROUP_BY_COMMA_INDENT}, {}",
                item.trim_start_matches(',').trim_start()
            ),
            CommaPosition::Trailing => line.to_string(),
        };
        lines.push(realigned);
    }
    lines.join("\n")
}

/// Indent every `AND`/`OR` line by two spaces
#[must_use]
pub fn indent_boolean_continuations(text: &str) -> String {
    text.lines()
        .map(|line| {
            if BOOLEAN_LINE_RE.is_match(line) {
                format!("{BOOLEAN_INDENT}{}", line.trim())
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
