//! sqlprettier - Formatter for SQL fragments
//!
//! Lays out SQL text with lexical rewrite rules: clause keywords start new
//! lines, aliases are aligned, commas are placed consistently and CTE bodies
//! are indented. Comments and function calls pass through untouched.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod format;
pub mod host;
pub mod parser;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::{CaseMode, CommaPosition, Config};
pub use directive::{find_directive, parse_directive, DirectiveOverrides};
pub use error::Result;
pub use host::{parse, print, SqlDetector, SqlNode};
pub use process::format_sql;
