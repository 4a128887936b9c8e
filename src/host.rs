//! Formatting-host interface
//!
//! A host formats SQL through two calls: [`parse`] wraps a fragment in a
//! node, [`print`] formats it. Finding SQL inside host-language sources is
//! the host's business; it plugs in through [`SqlDetector`], and the helpers
//! below implement the usual heuristics.

use std::path::Path;

use crate::config::{CaseMode, CommaPosition, Config};
use crate::process::format_sql;

/// Name under which the language is registered with a host
pub const LANGUAGE_NAME: &str = "sql";

/// File extensions formatted directly, without detection
pub const EXTENSIONS: &[&str] = &[".sql"];

/// Template tags that mark a tagged literal as SQL
pub const SQL_TAGS: &[&str] = &["sql", "SQL", "sqlTemplate"];

/// Kind of a parsed node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Sql,
    /// A node some other parser produced
    Other(String),
}

/// A fragment as handed between [`parse`] and [`print`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlNode {
    pub kind: NodeKind,
    pub value: String,
}

impl SqlNode {
    #[must_use]
    pub fn is_sql(&self) -> bool {
        self.kind == NodeKind::Sql
    }
}

/// Wrap `text` in an SQL node. Never fails.
#[must_use]
pub fn parse(text: &str) -> SqlNode {
    SqlNode {
        kind: NodeKind::Sql,
        value: text.to_string(),
    }
}

/// Start offset of the node in its source
#[must_use]
pub fn loc_start(_node: &SqlNode) -> usize {
    0
}

/// End offset of the node in its source
#[must_use]
pub fn loc_end(node: &SqlNode) -> usize {
    node.value.len()
}

/// Format an SQL node; any other node prints as the empty string
#[must_use]
pub fn print(node: &SqlNode, config: &Config) -> String {
    if !node.is_sql() {
        tracing::debug!(kind = ?node.kind, "not an SQL node");
        return String::new();
    }
    format_sql(&node.value, config)
}

/// Capability a host implements to surface SQL literals from its own AST
pub trait SqlDetector {
    type Node;

    /// The literal SQL text of `node`, or `None` if it is not SQL
    fn detect(&self, node: &Self::Node) -> Option<String>;
}

/// Format whatever the detector surfaces for `node`
pub fn embed<D: SqlDetector>(detector: &D, node: &D::Node, config: &Config) -> Option<String> {
    let text = detector.detect(node)?;
    Some(print(&parse(&text), config))
}

/// Check a template tag name
#[must_use]
pub fn is_sql_tag(tag: &str) -> bool {
    SQL_TAGS.contains(&tag)
}

/// Check a variable name, which counts as SQL if it contains `sql` in any case
#[must_use]
pub fn is_sql_variable(name: &str) -> bool {
    name.to_ascii_lowercase().contains("sql")
}

/// Check whether a path has an SQL extension
#[must_use]
pub fn is_sql_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            EXTENSIONS
                .iter()
                .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Description of one option as a host presents it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOption {
    pub name: &'static str,
    pub description: &'static str,
    pub default: String,
    /// Accepted values; empty for free-form options
    pub choices: &'static [&'static str],
}

/// The options a host should expose, with their defaults
#[must_use]
pub fn host_options() -> Vec<HostOption> {
    let defaults = Config::default();
    vec![
        HostOption {
            name: "keywordCase",
            description: "Case of SQL keywords",
            default: defaults.keyword_case.to_string(),
            choices: CaseMode::NAMES,
        },
        HostOption {
            name: "functionCase",
            description: "Case of known function names",
            default: defaults.function_case.to_string(),
            choices: CaseMode::NAMES,
        },
        HostOption {
            name: "commaPosition",
            description: "Put list commas at the start or end of lines",
            default: defaults.comma_position.to_string(),
            choices: CommaPosition::NAMES,
        },
        HostOption {
            name: "groupBySingleLine",
            description: "Keep GROUP BY columns on one line",
            default: defaults.group_by_single_line.to_string(),
            choices: &["true", "false"],
        },
        HostOption {
            name: "cteIndent",
            description: "Spaces of indentation inside CTE bodies",
            default: defaults.cte_indent.to_string(),
            choices: &[],
        },
    ]
}
