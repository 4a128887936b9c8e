//! Integration tests for sqlprettier
//!
//! These tests verify that the components work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;
use std::io::{BufReader, Cursor};

use pretty_assertions::assert_eq;
use sqlprettier::host::{embed, host_options, is_sql_path, is_sql_tag, is_sql_variable, NodeKind};
use sqlprettier::process::format_file;
use sqlprettier::{
    find_directive, format_sql, parse, parse_args_from, print, CaseMode, CommaPosition, Config,
    SqlDetector, SqlNode,
};

fn leading() -> Config {
    Config {
        comma_position: CommaPosition::Leading,
        ..Config::default()
    }
}

/// Formatting already formatted output must change nothing
fn assert_stable(input: &str, config: &Config) -> String {
    let once = format_sql(input, config);
    let twice = format_sql(&once, config);
    assert_eq!(twice, once, "second pass changed the output of {input:?}");
    once
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_ctes_with_trailing_commas() {
    let input = "with recent_orders as (select customer_id, count(*) as order_count \
                 from orders where created_at > now() - interval '30 days' \
                 group by customer_id), top as (select customer_id from recent_orders \
                 where order_count > 5) select c.name, t.customer_id from customers c \
                 join top t on c.id = t.customer_id order by c.name;";
    let expected = "\
WITH recent_orders AS (
    SELECT customer_id,
           COUNT(*) AS order_count
    FROM orders
    WHERE created_at > NOW() - interval '30 days'
    GROUP BY customer_id
),
top AS (
    SELECT customer_id
    FROM recent_orders
    WHERE order_count > 5
)
SELECT c.name,
       t.customer_id
FROM customers c
JOIN top t ON c.id = t.customer_id
ORDER BY c.name
;";
    assert_eq!(assert_stable(input, &Config::default()), expected);
}

#[test]
fn test_ctes_with_leading_commas() {
    let input = "with a as (select 1 as one), b as (select 2 as two) select * from a, b";
    let expected = "\
WITH a AS (
    SELECT 1 AS one
)
, b AS (
    SELECT 2 AS two
)
SELECT *
FROM a
     , b";
    assert_eq!(assert_stable(input, &leading()), expected);
}

#[test]
fn test_cte_indent_width() {
    let config = Config {
        cte_indent: 2,
        ..Config::default()
    };
    assert_eq!(
        format_sql("with a as (select x from t) select x from a", &config),
        "WITH a AS (\n  SELECT x\n  FROM t\n)\nSELECT x\nFROM a"
    );
}

#[test]
fn test_leading_commas_and_boolean_continuations() {
    let input = "SELECT dept, role, SUM(salary) AS total, AVG(salary) AS average \
                 FROM staff WHERE active = true AND hired < '2020-01-01' \
                 OR manager IS NULL GROUP BY dept, role HAVING SUM(salary) > 1000";
    let expected = "\
SELECT dept
     , role
     , SUM(salary) AS total
     , AVG(salary) AS average
FROM staff
WHERE active = TRUE
  AND hired < '2020-01-01'
  OR manager IS NULL
GROUP BY dept
       , role
HAVING SUM(salary) > 1000";
    assert_eq!(assert_stable(input, &leading()), expected);
}

#[test]
fn test_group_by_single_line() {
    let config = Config {
        group_by_single_line: true,
        ..Config::default()
    };
    assert_eq!(
        assert_stable("select a, b, count(*) from t group by a, b order by a", &config),
        "SELECT a,\n       b,\n       COUNT(*)\nFROM t\nGROUP BY a, b\nORDER BY a"
    );
}

#[test]
fn test_group_by_single_line_inside_cte() {
    let config = Config {
        group_by_single_line: true,
        ..Config::default()
    };
    assert_eq!(
        format_sql(
            "with a as (select x from t group by x, y), b as (select 1) select * from a",
            &config
        ),
        "WITH a AS (\n    SELECT x\n    FROM t\n    GROUP BY x, y\n),\nb AS (\n    SELECT 1\n)\nSELECT *\nFROM a"
    );
}

#[test]
fn test_alias_alignment() {
    assert_eq!(
        assert_stable("SELECT a AS x, bbbbb AS y FROM t", &Config::default()),
        "SELECT a     AS x,\n       bbbbb AS y\nFROM t"
    );
}

#[test]
fn test_function_call_kept_whole() {
    assert_eq!(
        assert_stable("SELECT COUNT(a, b) FROM t", &leading()),
        "SELECT COUNT(a, b)\nFROM t"
    );
    assert_eq!(
        format_sql("select coalesce( a ,  b ) from t", &Config::default()),
        "SELECT COALESCE( a , b )\nFROM t"
    );
}

#[test]
fn test_join_and_boolean() {
    assert_eq!(
        assert_stable(
            "select * from a left join b on a.id = b.a_id and b.x = 1 where a.y = 2",
            &Config::default()
        ),
        "SELECT *\nFROM a\nLEFT JOIN b ON a.id = b.a_id\n  AND b.x = 1\nWHERE a.y = 2"
    );
}

#[test]
fn test_statement_terminators() {
    assert_eq!(
        assert_stable("select 1; select 2;", &Config::default()),
        "SELECT 1\n;\nSELECT 2\n;"
    );
}

#[test]
fn test_between_and_stays_on_line() {
    assert_eq!(
        format_sql("select a from t where a between 1 and 5", &Config::default()),
        "SELECT a\nFROM t\nWHERE a BETWEEN 1 AND 5"
    );
}

// ============================================================================
// Whitespace and case
// ============================================================================

#[test]
fn test_whitespace_insensitive() {
    let config = Config::default();
    assert_eq!(format_sql("select id from t", &config), "SELECT id\nFROM t");
    assert_eq!(format_sql("SELECT   id\nFROM t", &config), "SELECT id\nFROM t");
    assert_eq!(format_sql("\n\n  select\tid\n\n from t  \n", &config), "SELECT id\nFROM t");
}

#[test]
fn test_identifiers_keep_their_case() {
    assert_eq!(
        format_sql("Select Id From T", &Config::default()),
        "SELECT Id\nFROM T"
    );
}

#[test]
fn test_lowercase_keywords() {
    let config = Config {
        keyword_case: CaseMode::Lowercase,
        ..Config::default()
    };
    assert_eq!(
        assert_stable("SELECT Name FROM Users", &config),
        "select Name\nfrom Users"
    );
}

#[test]
fn test_preserve_function_case() {
    let config = Config {
        function_case: CaseMode::Preserve,
        ..Config::default()
    };
    assert_eq!(
        format_sql("select Sum(x) from t", &config),
        "SELECT Sum(x)\nFROM t"
    );
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_comments_preserved() {
    let input = "-- monthly report\nselect id, -- primary key\n  name /* display */ from users -- all users\nwhere id = 1";
    let expected = "\
-- monthly report
SELECT id, -- primary key
       name /* display */
FROM users -- all users
WHERE id = 1";
    assert_eq!(assert_stable(input, &Config::default()), expected);
}

#[test]
fn test_comment_text_untouched() {
    let formatted = format_sql(
        "select a /* from  b,  c */ from t -- select x from y",
        &Config::default(),
    );
    assert!(formatted.contains("/* from  b,  c */"), "{formatted}");
    assert!(formatted.contains("-- select x from y"), "{formatted}");
}

#[test]
fn test_comment_marker_in_literal_unchanged() {
    assert_eq!(
        format_sql("SELECT '--x', a FROM t", &Config::default()),
        "SELECT '--x', a FROM t"
    );
}

#[test]
fn test_comment_marker_inside_block_comment() {
    // The `--` is taken as an inline comment first and runs to the end of
    // the line, so nothing after it is laid out
    let input = "/* a -- b */ SELECT a, b FROM t";
    assert_eq!(format_sql(input, &Config::default()), input);
}

#[test]
fn test_comment_only_input() {
    assert_eq!(
        format_sql("-- nothing here\n", &Config::default()),
        "-- nothing here"
    );
}

// ============================================================================
// Robustness
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(format_sql("", &Config::default()), "");
    assert_eq!(format_sql(" \n\t ", &Config::default()), "");
}

#[test]
fn test_unbalanced_parentheses_do_not_panic() {
    let formatted = format_sql("with a as (select (1 from t", &Config::default());
    assert!(formatted.starts_with("WITH a AS ("), "{formatted}");
    let formatted = format_sql("select a) from t)", &Config::default());
    assert!(formatted.contains("FROM t)"), "{formatted}");
}

#[test]
fn test_private_use_characters_survive() {
    let formatted = format_sql("SELECT '\u{F0001}' FROM t", &Config::default());
    assert_eq!(formatted, "SELECT '\u{F0001}'\nFROM t");
}

// ============================================================================
// Files and directives
// ============================================================================

#[test]
fn test_format_file_trailing_newline() {
    let reader = BufReader::new(Cursor::new("select 1".as_bytes()));
    let mut output = Vec::new();
    format_file(reader, &mut output, &Config::default(), "one.sql").unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "SELECT 1\n");
}

#[test]
fn test_directive_overrides_config() {
    let source = "-- sqlprettier: --comma-position leading\nselect a, b from t";
    let mut config = Config::default();
    let overrides = find_directive(&mut Cursor::new(source)).unwrap();
    overrides.apply_to(&mut config);

    assert_eq!(
        format_sql(source, &config),
        "-- sqlprettier: --comma-position leading\nSELECT a\n     , b\nFROM t"
    );
}

#[test]
fn test_discovered_config_applies() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("queries");
    fs::create_dir(&nested).unwrap();
    fs::write(
        dir.path().join("sqlprettier.toml"),
        "keyword_case = \"lowercase\"\ncte_indent = 8\n",
    )
    .unwrap();
    fs::write(nested.join("sqlprettier.toml"), "cteIndent = 2\n").unwrap();
    let file = nested.join("q.sql");
    fs::write(&file, "select 1").unwrap();

    let config = Config::from_discovered_files(&file);
    assert_eq!(config.keyword_case, CaseMode::Lowercase);
    assert_eq!(config.cte_indent, 2);
    assert_eq!(format_sql("SELECT 1 FROM t", &config), "select 1\nfrom t");
}

#[test]
fn test_cli_overrides_config() {
    let args = parse_args_from(vec![
        "sqlprettier",
        "--comma-position",
        "leading",
        "--group-by-single-line",
        "q.sql",
    ]);
    let mut config = Config::default();
    args.apply_to(&mut config);
    assert_eq!(config.comma_position, CommaPosition::Leading);
    assert!(config.group_by_single_line);
    assert!(config.validate().is_none());
}

// ============================================================================
// Host interface
// ============================================================================

struct TaggedTemplate;

impl SqlDetector for TaggedTemplate {
    type Node = (&'static str, &'static str);

    fn detect(&self, node: &Self::Node) -> Option<String> {
        let (tag, body) = node;
        is_sql_tag(tag).then(|| (*body).to_string())
    }
}

#[test]
fn test_host_parse_and_print() {
    let node = parse("select a from t");
    assert!(node.is_sql());
    assert_eq!(print(&node, &Config::default()), "SELECT a\nFROM t");

    let other = SqlNode {
        kind: NodeKind::Other("js".to_string()),
        value: "select a from t".to_string(),
    };
    assert_eq!(print(&other, &Config::default()), "");
}

#[test]
fn test_host_embed() {
    let config = Config::default();
    assert_eq!(
        embed(&TaggedTemplate, &("sql", "select 1"), &config),
        Some("SELECT 1".to_string())
    );
    assert_eq!(embed(&TaggedTemplate, &("html", "select 1"), &config), None);
}

#[test]
fn test_host_detection_helpers() {
    assert!(is_sql_variable("userSql"));
    assert!(is_sql_variable("SQL_QUERY"));
    assert!(!is_sql_variable("query"));
    assert!(is_sql_path(std::path::Path::new("db/report.SQL")));
    assert!(!is_sql_path(std::path::Path::new("db/report.txt")));
}

#[test]
fn test_host_options_defaults() {
    assert_eq!(sqlprettier::host::LANGUAGE_NAME, "sql");
    let options = host_options();
    let comma = options
        .iter()
        .find(|o| o.name == "commaPosition")
        .unwrap();
    assert_eq!(comma.default, "trailing");
    assert!(options.iter().any(|o| o.name == "cteIndent" && o.default == "4"));
}
