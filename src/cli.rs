//! Command-line interface for sqlprettier.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Arg, ArgAction, Command};

use crate::config::{CaseMode, CommaPosition, Config};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// Casing of SQL keywords
    pub keyword_case: Option<CaseMode>,

    /// Casing of known function names
    pub function_case: Option<CaseMode>,

    /// Comma placement in broken lists
    pub comma_position: Option<CommaPosition>,

    /// Keep `GROUP BY` lists on one line
    pub group_by_single_line: Option<bool>,

    /// Spaces of indentation inside CTE bodies
    pub cte_indent: Option<usize>,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Show diff without modifying files
    pub diff: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom SQL file extensions (in addition to `sql`)
    pub sql_extensions: Vec<String>,

    /// Exclude files with more than this many lines
    pub exclude_max_lines: Option<usize>,

    /// Enable debug output
    pub debug: bool,
}

impl CliArgs {
    /// Override the fields of `config` given on the command line
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(v) = self.keyword_case {
            config.keyword_case = v;
        }
        if let Some(v) = self.function_case {
            config.function_case = v;
        }
        if let Some(v) = self.comma_position {
            config.comma_position = v;
        }
        if let Some(v) = self.group_by_single_line {
            config.group_by_single_line = v;
        }
        if let Some(v) = self.cte_indent {
            config.cte_indent = v;
        }
    }
}

fn case_mode_arg(id: &'static str) -> Arg {
    Arg::new(id).value_name("CASE").value_parser(
        PossibleValuesParser::new(CaseMode::NAMES.iter().copied())
            .map(|s| s.parse::<CaseMode>().unwrap_or_default()),
    )
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("sqlprettier")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Formatter for SQL files and fragments")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format ('-' reads stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            case_mode_arg("keyword-case")
                .short('k')
                .long("keyword-case")
                .help("Case of SQL keywords [default: uppercase]"),
        )
        .arg(
            case_mode_arg("function-case")
                .short('F')
                .long("function-case")
                .help("Case of known function names [default: uppercase]"),
        )
        .arg(
            Arg::new("comma-position")
                .long("comma-position")
                .help("Put list commas at the start or end of lines [default: trailing]")
                .value_name("POSITION")
                .value_parser(
                    PossibleValuesParser::new(CommaPosition::NAMES.iter().copied())
                        .map(|s| s.parse::<CommaPosition>().unwrap_or_default()),
                ),
        )
        .arg(
            Arg::new("group-by-single-line")
                .long("group-by-single-line")
                .help("Keep GROUP BY columns on one line")
                .value_name("BOOL")
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(clap::value_parser!(bool)),
        )
        .arg(
            Arg::new("cte-indent")
                .long("cte-indent")
                .help("Spaces of indentation inside CTE bodies [default: 4]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of modifying files in-place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diff")
                .short('d')
                .long("diff")
                .help("Show diff without modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively format directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("extension")
                .short('x')
                .long("extension")
                .help("Additional SQL file extension (can be repeated, e.g., -x pgsql -x ddl)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude-max-lines")
                .short('m')
                .long("exclude-max-lines")
                .help("Exclude files with more than this many lines")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config and per-file diagnostics)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no output, for editor integration)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        keyword_case: matches.get_one::<CaseMode>("keyword-case").copied(),
        function_case: matches.get_one::<CaseMode>("function-case").copied(),
        comma_position: matches.get_one::<CommaPosition>("comma-position").copied(),
        group_by_single_line: matches.get_one::<bool>("group-by-single-line").copied(),
        cte_indent: matches.get_one::<usize>("cte-indent").copied(),
        stdout: matches.get_flag("stdout"),
        diff: matches.get_flag("diff"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        sql_extensions: matches
            .get_many::<String>("extension")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        exclude_max_lines: matches.get_one::<usize>("exclude-max-lines").copied(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
    }
}
