//! Compatibility tests against expected output
//!
//! These tests format the files under `tests/fixtures/in` and compare the
//! result line by line with the files of the same name under
//! `tests/fixtures/out`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;
use std::io::{BufReader, Cursor};

use sqlprettier::process::format_file;
use sqlprettier::{CommaPosition, Config};

/// Run sqlprettier on input and compare with expected output
fn test_compatibility(input_path: &str, expected_path: &str, config: &Config) {
    let input = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read input file {input_path}: {e}"));

    let expected = fs::read_to_string(expected_path)
        .unwrap_or_else(|e| panic!("Failed to read expected file {expected_path}: {e}"));

    let result = run_format(&input, config, input_path);

    // Compare line by line for better error messages
    let result_lines: Vec<&str> = result.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if result_lines.len() != expected_lines.len() {
        eprintln!("=== Line count mismatch for {input_path} ===");
        eprintln!(
            "Expected {} lines, got {} lines",
            expected_lines.len(),
            result_lines.len()
        );
        eprintln!("\n=== Output ===\n{result}");
        panic!("Line count mismatch");
    }

    let differences: Vec<(usize, &str, &str)> = result_lines
        .iter()
        .zip(expected_lines.iter())
        .enumerate()
        .filter(|(_, (got, want))| got != want)
        .map(|(i, (got, want))| (i + 1, *want, *got))
        .collect();

    if !differences.is_empty() {
        eprintln!("\n=== Differences in {input_path} ===");
        for (line_num, expected, got) in &differences {
            eprintln!("\nLine {line_num}:");
            eprintln!("  expected: {expected:?}");
            eprintln!("  got:      {got:?}");
        }
        panic!("{} differences found", differences.len());
    }

    // Formatting the expected output must be a no-op
    let second = run_format(&expected, config, expected_path);
    assert_eq!(second, expected, "output of {input_path} is not stable");
}

fn run_format(input: &str, config: &Config, filename: &str) -> String {
    let reader = BufReader::new(Cursor::new(input.as_bytes()));
    let mut output = Vec::new();

    format_file(reader, &mut output, config, filename)
        .unwrap_or_else(|e| panic!("sqlprettier failed on {filename}: {e}"));

    String::from_utf8(output)
        .unwrap_or_else(|e| panic!("Invalid UTF-8 in output for {filename}: {e}"))
}

/// Get paths relative to the project root
fn get_fixture_path(dir: &str, file: &str) -> String {
    format!("tests/fixtures/{dir}/{file}")
}

// ============================================================================
// Fixture files
// ============================================================================

/// Two CTEs with trailing commas, a join and a terminator
#[test]
fn test_cte_report_compatibility() {
    test_compatibility(
        &get_fixture_path("in", "cte_report.sql"),
        &get_fixture_path("out", "cte_report.sql"),
        &Config::default(),
    );
}

/// Leading commas, boolean continuations and a multi-line GROUP BY
#[test]
fn test_payroll_compatibility() {
    let config = Config {
        comma_position: CommaPosition::Leading,
        ..Default::default()
    };
    test_compatibility(
        &get_fixture_path("in", "payroll.sql"),
        &get_fixture_path("out", "payroll.sql"),
        &config,
    );
}

/// Comment-only lines, inline comments and block comments
#[test]
fn test_commented_compatibility() {
    test_compatibility(
        &get_fixture_path("in", "commented.sql"),
        &get_fixture_path("out", "commented.sql"),
        &Config::default(),
    );
}

// ============================================================================
// Individual Feature Tests - Smaller scope for debugging
// ============================================================================

/// Test alias alignment across the select list
#[test]
fn test_compat_alias_alignment() {
    let result = run_format("SELECT a AS x, bbbbb AS y FROM t\n", &Config::default(), "t.sql");
    assert_eq!(
        result, "SELECT a     AS x,\n       bbbbb AS y\nFROM t\n",
        "Alias alignment mismatch"
    );
}

/// Test that function arguments are never split
#[test]
fn test_compat_function_opacity() {
    let config = Config {
        comma_position: CommaPosition::Leading,
        ..Default::default()
    };
    let result = run_format("SELECT COUNT(a, b) FROM t\n", &config, "t.sql");
    assert_eq!(result, "SELECT COUNT(a, b)\nFROM t\n", "Function call was split");
}

/// Test statement terminators
#[test]
fn test_compat_statement_terminators() {
    let result = run_format("select 1; select 2;", &Config::default(), "t.sql");
    assert_eq!(result, "SELECT 1\n;\nSELECT 2\n;\n", "Terminator mismatch");
}

/// Test JOIN ... ON and boolean continuation
#[test]
fn test_compat_join_and_boolean() {
    let result = run_format(
        "select * from a left join b on a.id = b.a_id and b.x = 1 where a.y = 2",
        &Config::default(),
        "t.sql",
    );
    assert_eq!(
        result,
        "SELECT *\nFROM a\nLEFT JOIN b ON a.id = b.a_id\n  AND b.x = 1\nWHERE a.y = 2\n",
        "JOIN layout mismatch"
    );
}

/// Test that empty input produces no output at all
#[test]
fn test_compat_empty_input() {
    assert_eq!(run_format("  \n\n", &Config::default(), "empty.sql"), "");
}
