//! Case conversion for SQL keywords and function names
//!
//! Keywords are re-cased on the live working text. Function names are
//! re-cased on the saved function-call spans while they are restored, so
//! the layout rules never see function internals.

use crate::config::CaseMode;
use crate::parser::registry::{collapse_phrase, FUNCTION_HEAD_RE, KEYWORD_RE};

/// Apply case conversion based on mode
#[must_use]
pub fn apply_case(s: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Preserve => s.to_string(),
        CaseMode::Lowercase => s.to_lowercase(),
        CaseMode::Uppercase => s.to_uppercase(),
    }
}

/// Case a matched keyword phrase, collapsing its internal whitespace
#[must_use]
pub fn case_keyword(matched: &str, mode: CaseMode) -> String {
    apply_case(&collapse_phrase(matched), mode)
}

/// Re-case every registry keyword in `text`
///
/// Word-boundary matching keeps identifiers such as `assets` or `order_id`
/// intact.
#[must_use]
pub fn convert_keyword_case(text: &str, mode: CaseMode) -> String {
    if mode == CaseMode::Preserve {
        return text.to_string();
    }
    KEYWORD_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            case_keyword(&caps[0], mode)
        })
        .into_owned()
}

/// Re-case registry function names in a saved function-call span
///
/// Only names that are called (followed by `(`) are touched, so a column
/// that happens to be named `date` keeps its spelling.
#[must_use]
pub fn convert_function_case(span: &str, mode: CaseMode) -> String {
    if mode == CaseMode::Preserve {
        return span.to_string();
    }
    FUNCTION_HEAD_RE
        .replace_all(span, |caps: &regex::Captures<'_>| {
            format!("{}{}", apply_case(&caps[1], mode), &caps[2])
        })
        .into_owned()
}
