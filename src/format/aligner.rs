//! Alias alignment
//!
//! Every `term AS alias` in the fragment is padded so the `AS` keywords line
//! up. The alignment is global: one target width is computed for the whole
//! fragment, not per clause. Widths are measured on restored text, so a
//! protected function call counts for its full length.

use regex::Captures;

use crate::parser::patterns::{ALIAS_RE, AS_SPACING_RE};
use crate::parser::protect::SpanTable;

/// Normalize spacing around `AS` to a single space on each side
#[must_use]
pub fn standardize_as_spacing(text: &str) -> String {
    AS_SPACING_RE.replace_all(text, " $1 ").into_owned()
}

/// `AS` followed by `(` opens a CTE body and is not an alias
fn is_alias(caps: &Captures<'_>) -> bool {
    !caps[3].starts_with('(')
}

/// Pad the left-hand term of every alias to a common width
#[must_use]
pub fn align_aliases(text: &str, spans: &SpanTable) -> String {
    let text = standardize_as_spacing(text);

    let Some(target) = ALIAS_RE
        .captures_iter(&text)
        .filter(is_alias)
        .map(|caps| spans.display_width(&caps[1]))
        .max()
    else {
        return text;
    };

    ALIAS_RE
        .replace_all(&text, |caps: &Captures<'_>| {
            if !is_alias(caps) {
                return caps[0].to_string();
            }
            let lhs = &caps[1];
            let pad = target.saturating_sub(spans.display_width(lhs));
            format!("{lhs}{} {} {}", " ".repeat(pad), &caps[2], &caps[3])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::protect_function_calls;

    #[test]
    fn test_standardize_as_spacing() {
        assert_eq!(standardize_as_spacing("a   AS  x, b\tas y"), "a AS x, b as y");
    }

    #[test]
    fn test_align_aliases_global_width() {
        let spans = SpanTable::new();
        assert_eq!(
            align_aliases("SELECT a AS x, bbbbb AS y\nFROM t", &spans),
            "SELECT a     AS x, bbbbb AS y\nFROM t"
        );
    }

    #[test]
    fn test_align_aliases_counts_function_width() {
        let mut spans = SpanTable::new();
        let text = protect_function_calls("SELECT COUNT(*) AS n, id AS i", &mut spans);
        let aligned = align_aliases(&text, &spans);
        assert_eq!(
            spans.expand(&aligned),
            "SELECT COUNT(*) AS n, id       AS i"
        );
    }

    #[test]
    fn test_cte_opener_not_aligned() {
        let spans = SpanTable::new();
        assert_eq!(
            align_aliases("WITH totals AS (\nSELECT a AS x", &spans),
            "WITH totals AS (\nSELECT a AS x"
        );
    }

    #[test]
    fn test_no_aliases_unchanged() {
        let spans = SpanTable::new();
        assert_eq!(align_aliases("SELECT a\nFROM t", &spans), "SELECT a\nFROM t");
    }
}
