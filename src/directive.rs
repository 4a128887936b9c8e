//! Inline directive parsing for `-- sqlprettier:` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `-- sqlprettier: --comma-position leading --cte-indent 2`

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{CaseMode, CommaPosition, Config, PartialConfig};

/// Pattern to match sqlprettier directives
static SQLPRETTIER_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*--\s*sqlprettier:\s*(.*?)\s*$").unwrap());

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveOverrides {
    pub keyword_case: Option<CaseMode>,
    pub function_case: Option<CaseMode>,
    pub comma_position: Option<CommaPosition>,
    pub group_by_single_line: Option<bool>,
    pub cte_indent: Option<usize>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyword_case.is_none()
            && self.function_case.is_none()
            && self.comma_position.is_none()
            && self.group_by_single_line.is_none()
            && self.cte_indent.is_none()
    }

    /// Override the fields of `config` that the directive sets
    pub fn apply_to(&self, config: &mut Config) {
        config.apply_partial(&PartialConfig {
            keyword_case: self.keyword_case,
            function_case: self.function_case,
            comma_position: self.comma_position,
            group_by_single_line: self.group_by_single_line,
            cte_indent: self.cte_indent,
        });
    }
}

/// Check if a line contains an sqlprettier directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    SQLPRETTIER_DIRECTIVE_RE.is_match(line)
}

/// Parse an sqlprettier directive line and return option overrides
///
/// Returns `None` if the line is not a directive or sets no option.
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = SQLPRETTIER_DIRECTIVE_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();
    parse_directive_args(args_str)
}

/// Parse a boolean flag value
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Parse directive arguments into overrides
fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let tokens: Vec<&str> = args_str.split_whitespace().collect();
    let mut i = 0;

    while i < tokens.len() {
        let (flag, inline_value) = match tokens[i].split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (tokens[i], None),
        };
        // Value either after `=` or in the next token
        let take_value = |i: &mut usize| {
            if inline_value.is_some() {
                return inline_value;
            }
            *i += 1;
            tokens.get(*i).copied()
        };

        match flag {
            "-k" | "--keyword-case" => {
                overrides.keyword_case = take_value(&mut i).and_then(|v| v.parse().ok());
            }
            "-F" | "--function-case" => {
                overrides.function_case = take_value(&mut i).and_then(|v| v.parse().ok());
            }
            "--comma-position" => {
                overrides.comma_position = take_value(&mut i).and_then(|v| v.parse().ok());
            }
            "--cte-indent" => {
                overrides.cte_indent = take_value(&mut i).and_then(|v| v.parse().ok());
            }
            "--group-by-single-line" => {
                overrides.group_by_single_line = match inline_value {
                    Some(value) => parse_bool(value),
                    None => Some(true),
                };
            }
            "--no-group-by-single-line" => {
                overrides.group_by_single_line = Some(false);
            }
            _ => {
                // Unknown option, skip
            }
        }
        i += 1;
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan input for sqlprettier directives and return the first found
///
/// Only the first directive is used (subsequent ones are ignored).
pub fn find_directive<R: std::io::BufRead>(input: &mut R) -> Option<DirectiveOverrides> {
    let mut buffer = String::new();

    while input.read_line(&mut buffer).ok()? > 0 {
        if is_directive_line(&buffer) {
            return parse_directive(&buffer);
        }
        buffer.clear();
    }

    None
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_is_directive_line() {
        assert!(is_directive_line("-- sqlprettier: --keyword-case lower"));
        assert!(is_directive_line("   --sqlprettier: --cte-indent 2"));
        assert!(is_directive_line("-- SQLPRETTIER: --cte-indent 2"));
        assert!(!is_directive_line("-- just a comment"));
        assert!(!is_directive_line("SELECT 1"));
    }

    #[test]
    fn test_parse_directive_case() {
        let overrides =
            parse_directive("-- sqlprettier: --keyword-case lowercase -F preserve").unwrap();
        assert_eq!(overrides.keyword_case, Some(CaseMode::Lowercase));
        assert_eq!(overrides.function_case, Some(CaseMode::Preserve));
    }

    #[test]
    fn test_parse_directive_comma_position() {
        let overrides = parse_directive("-- sqlprettier: --comma-position=start").unwrap();
        assert_eq!(overrides.comma_position, Some(CommaPosition::Leading));
    }

    #[test]
    fn test_parse_directive_group_by() {
        let overrides = parse_directive("-- sqlprettier: --group-by-single-line").unwrap();
        assert_eq!(overrides.group_by_single_line, Some(true));
        let overrides = parse_directive("-- sqlprettier: --group-by-single-line=false").unwrap();
        assert_eq!(overrides.group_by_single_line, Some(false));
    }

    #[test]
    fn test_parse_directive_multiple() {
        let overrides =
            parse_directive("-- sqlprettier: --cte-indent 2 --bogus --keyword-case upper")
                .unwrap();
        assert_eq!(overrides.cte_indent, Some(2));
        assert_eq!(overrides.keyword_case, Some(CaseMode::Uppercase));
    }

    #[test]
    fn test_parse_invalid_directive() {
        assert!(parse_directive("-- sqlprettier:").is_none());
        assert!(parse_directive("-- sqlprettier: --unknown 3").is_none());
    }

    #[test]
    fn test_apply_to_config() {
        let mut config = Config::default();
        let overrides = parse_directive("-- sqlprettier: --comma-position leading").unwrap();
        overrides.apply_to(&mut config);
        assert_eq!(config.comma_position, CommaPosition::Leading);
        assert_eq!(config.keyword_case, CaseMode::Uppercase);
    }

    #[test]
    fn test_find_directive_first_wins() {
        let mut input = Cursor::new(
            "SELECT 1;\n-- sqlprettier: --cte-indent 2\n-- sqlprettier: --cte-indent 8\n",
        );
        let overrides = find_directive(&mut input).unwrap();
        assert_eq!(overrides.cte_indent, Some(2));
    }
}
