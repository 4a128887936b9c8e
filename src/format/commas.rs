//! List comma placement
//!
//! Every comma ends a list item. Items continue at column 7, the column
//! after `SELECT `, in both styles:
//!
//! ```text
//! SELECT id,          SELECT id
//!        name              , name
//! ```
//!
//! An inline comment written after a comma stays on the line of the item
//! it annotates.

use regex::Captures;

use crate::config::CommaPosition;
use crate::parser::patterns::COMMA_RE;

/// Indentation of an item after a trailing comma
pub const ITEM_INDENT: &str = "       ";
/// Indentation of a leading comma, which puts the item at column 7
pub const LEADING_COMMA_INDENT: &str = "     ";

/// Break the text at every comma according to `position`
#[must_use]
pub fn place_commas(text: &str, position: CommaPosition) -> String {
    COMMA_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let comment = caps
                .get(1)
                .map(|m| format!(" {}", m.as_str()))
                .unwrap_or_default();
            match position {
                CommaPosition::Trailing => format!(",{comment}\n{ITEM_INDENT}"),
                CommaPosition::Leading => format!("{comment}\n{LEADING_COMMA_INDENT}, "),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::protect::{SpanKind, SpanTable};

    #[test]
    fn test_trailing_commas() {
        assert_eq!(
            place_commas("SELECT id, name\nFROM users", CommaPosition::Trailing),
            "SELECT id,\n       name\nFROM users"
        );
    }

    #[test]
    fn test_leading_commas() {
        assert_eq!(
            place_commas("SELECT id, name\nFROM users", CommaPosition::Leading),
            "SELECT id\n     , name\nFROM users"
        );
    }

    #[test]
    fn test_comma_spacing_normalized() {
        assert_eq!(
            place_commas("SELECT a ,b", CommaPosition::Trailing),
            "SELECT a,\n       b"
        );
    }

    #[test]
    fn test_comment_after_comma_stays_with_item() {
        let mut spans = SpanTable::new();
        let token = spans
            .insert(SpanKind::InlineComment, "-- first".to_string())
            .unwrap();
        let text = format!("SELECT a, {token} b");
        assert_eq!(
            place_commas(&text, CommaPosition::Trailing),
            format!("SELECT a, {token}\n       b")
        );
        assert_eq!(
            place_commas(&text, CommaPosition::Leading),
            format!("SELECT a {token}\n     , b")
        );
    }
}
