//! Restoration of protected spans and comment-only lines

use crate::config::CaseMode;
use crate::format::case_convert::convert_function_case;
use crate::parser::protect::{CommentLine, SpanKind, SpanTable};

/// Replace every token in `text` with its original span
///
/// Function calls get their names re-cased. An inline comment is preceded
/// by at least one space, unless it directly follows a quote: a `--` inside a
/// string literal is cut out as a comment too, and must come back unchanged.
#[must_use]
pub fn restore_spans(text: &str, spans: &SpanTable, function_case: CaseMode) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    restore_into(text, spans, function_case, &mut out);
    out
}

fn restore_into(text: &str, spans: &SpanTable, function_case: CaseMode, out: &mut String) {
    for c in text.chars() {
        match spans.get(c) {
            None => out.push(c),
            Some((SpanKind::Verbatim, original)) => out.push_str(original),
            Some((SpanKind::Function, original)) => {
                let cased = convert_function_case(original, function_case);
                restore_into(&cased, spans, function_case, out);
            }
            Some((SpanKind::BlockComment, original)) => {
                restore_into(original, spans, function_case, out);
            }
            Some((SpanKind::InlineComment, original)) => {
                if out
                    .chars()
                    .next_back()
                    .is_some_and(|p| !p.is_whitespace() && p != '\'' && p != '"')
                {
                    out.push(' ');
                }
                restore_into(original, spans, function_case, out);
            }
        }
    }
}

/// Put comment-only lines back at their recorded line index
///
/// A comment recorded at index `n` goes before the `n`th formatted line;
/// indices past the end append the comment after the last line.
#[must_use]
pub fn splice_comment_lines(lines: Vec<String>, comments: &[CommentLine]) -> Vec<String> {
    if comments.is_empty() {
        return lines;
    }

    let mut spliced = Vec::with_capacity(lines.len() + comments.len());
    let mut pending = comments.iter().peekable();
    for (index, line) in lines.into_iter().enumerate() {
        while let Some(comment) = pending.next_if(|comment| comment.index <= index) {
            spliced.push(comment.text.clone());
        }
        spliced.push(line);
    }
    spliced.extend(pending.map(|comment| comment.text.clone()));
    spliced
}
