//! sqlprettier - Formatter for SQL files and fragments

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use rayon::prelude::*;
use sqlprettier::host::is_sql_path;
use sqlprettier::process::{format_file, unified_diff};
use sqlprettier::{find_directive, parse_args, CliArgs, Config, Result};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    let args = parse_args();
    init_tracing(args.debug);

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // An explicit config file applies to every file; otherwise each file
    // discovers its own
    let base_config = if args.config.is_some() {
        Some(build_config(&args, None)?)
    } else {
        None
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                tracing::warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No SQL files found to format.");
        }
        return Ok(());
    }

    let use_sequential = args.stdout || args.diff || args.jobs == Some(1);
    if use_sequential {
        process_files_sequential(&files, base_config.as_ref(), &args);
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args);
    }

    Ok(())
}

/// Install the log subscriber; `RUST_LOG` wins unless `--debug` is given
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("sqlprettier=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!(path = %config_path.display(), "using explicit config file");
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        if tracing::enabled!(tracing::Level::DEBUG) {
            for found in Config::discover_config_files(&start) {
                tracing::debug!(path = %found.display(), "discovered config file");
            }
        }
        Config::from_discovered_files(&start)
    };

    args.apply_to(&mut config);

    tracing::debug!(?config, "effective configuration");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("ignoring invalid exclude pattern '{p}': {e}");
                None
            }
        })
        .collect();

    let custom_extensions = &args.sql_extensions;
    let wanted = |path: &Path| {
        path.is_file()
            && is_sql_file(path, custom_extensions)
            && !is_excluded(path, &exclude_patterns)
    };

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Symlink loops come back as errors and are skipped
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    if wanted(entry.path()) {
                        files.push(entry.path().to_path_buf());
                    }
                }
            } else if let Ok(entries) = std::fs::read_dir(input) {
                for entry in entries.filter_map(std::result::Result::ok) {
                    let path = entry.path();
                    if wanted(&path) {
                        files.push(path);
                    }
                }
            }
        } else {
            tracing::warn!("no such file or directory: {}", input.display());
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
            || path.components().any(|component| match component {
                std::path::Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

/// Count the number of lines in a byte buffer
#[allow(clippy::naive_bytecount)]
fn count_lines(contents: &[u8]) -> usize {
    let newlines = contents.iter().filter(|&&b| b == b'\n').count();
    if contents.is_empty() {
        0
    } else if contents.last() == Some(&b'\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Check if a file has an SQL extension, built in or given with `-x`
fn is_sql_file(path: &Path, custom_extensions: &[String]) -> bool {
    if is_sql_path(path) {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            custom_extensions
                .iter()
                .any(|custom| custom.strip_prefix('.').unwrap_or(custom) == ext)
        })
}

/// Format one file with either the shared config or its discovered one
fn format_with_config(path: &Path, base_config: Option<&Config>, args: &CliArgs) -> Result<()> {
    match base_config {
        Some(config) => process_single_file(path, config, args),
        None => process_single_file(path, &build_config(args, Some(path))?, args),
    }
}

/// Process files sequentially (for stdout and diff output)
fn process_files_sequential(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    for path in files {
        if let Err(e) = format_with_config(path, base_config, args) {
            eprintln!("Error formatting {}: {}", path.display(), e);
        }
    }
}

/// Process files in parallel using Rayon
fn process_files_parallel(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        match format_with_config(path, base_config, args) {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error formatting {}: {}", path.display(), e);
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Formatted {success} files successfully.");
        } else {
            eprintln!("Formatted {success} files, {errors} errors.");
        }
    }
}

/// Apply directive overrides from file contents to a configuration
fn apply_directive_overrides(config: &mut Config, contents: &[u8], source_name: &str) {
    let cursor = Cursor::new(contents);
    if let Some(overrides) = find_directive(&mut BufReader::new(cursor)) {
        tracing::debug!(source = source_name, ?overrides, "applying file directive");
        overrides.apply_to(config);
    }
}

/// Process a single file
fn process_single_file(path: &Path, config: &Config, args: &CliArgs) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                file_size / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        return Ok(());
    }

    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&file_contents);
        if line_count > max_lines {
            if !args.silent {
                eprintln!(
                    "Skipping {} ({} lines exceeds limit of {})",
                    path.display(),
                    line_count,
                    max_lines
                );
            }
            return Ok(());
        }
    }

    if !args.silent && !args.stdout && !args.diff {
        eprintln!("Formatting: {}", path.display());
    }

    let name = path.to_string_lossy();

    // Per-file copy of config that directives may override
    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, &file_contents, &name);

    let reader = BufReader::new(Cursor::new(&file_contents));
    let mut output = Vec::new();
    format_file(reader, &mut output, &file_config, &name)?;

    if args.stdout {
        io::stdout().write_all(&output)?;
    } else if args.diff {
        let original = String::from_utf8_lossy(&file_contents);
        let formatted = String::from_utf8_lossy(&output);
        if let Some(diff) = unified_diff(&path.to_string_lossy(), &original, &formatted) {
            io::stdout().write_all(diff.as_bytes())?;
        }
    } else if output != file_contents {
        std::fs::write(path, &output)?;
    }

    Ok(())
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    let stdin_size = u64::try_from(stdin_contents.len()).unwrap_or(u64::MAX);
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, &stdin_contents, "stdin");

    let reader = BufReader::new(Cursor::new(&stdin_contents));
    let mut output = Vec::new();
    format_file(reader, &mut output, &file_config, "stdin")?;

    io::stdout().write_all(&output)?;

    if !args.silent {
        eprintln!("Formatted stdin successfully.");
    }

    Ok(())
}

fn print_usage() {
    println!(
        "sqlprettier v{} - SQL formatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  sqlprettier [OPTIONS] <FILE>...");
    println!("  sqlprettier [OPTIONS] -r <DIRECTORY>");
    println!("  sqlprettier [OPTIONS] -              # Read from stdin");
    println!("  cat query.sql | sqlprettier         # Pipe input");
    println!();
    println!("Examples:");
    println!("  sqlprettier query.sql                    # Format single file in-place");
    println!("  sqlprettier -r db/                       # Recursively format directory");
    println!("  sqlprettier --stdout query.sql           # Output to stdout");
    println!("  sqlprettier --comma-position leading q.sql");
    println!("  sqlprettier -k lowercase - < query.sql   # Read from stdin, write to stdout");
    println!();
    println!("Options:");
    println!("  -k, --keyword-case <CASE>        uppercase|lowercase|preserve [default: uppercase]");
    println!("  -F, --function-case <CASE>       uppercase|lowercase|preserve [default: uppercase]");
    println!("  --comma-position <POSITION>      leading|trailing [default: trailing]");
    println!("  --group-by-single-line[=BOOL]    Keep GROUP BY columns on one line");
    println!("  --cte-indent <NUM>               Indent of CTE bodies [default: 4]");
    println!("  -r, --recursive                  Process directories recursively");
    println!("  -e, --exclude <PATTERN>          Exclude files/dirs matching pattern (repeatable)");
    println!("  -x, --extension <EXT>            Additional SQL extension (repeatable)");
    println!("  -m, --exclude-max-lines <NUM>    Skip files with more than NUM lines");
    println!("  -D, --debug                      Enable debug output");
    println!("  -j, --jobs <NUM>                 Parallel jobs (0=auto, 1=sequential)");
    println!("  -s, --stdout                     Output to stdout");
    println!("  -d, --diff                       Show changes without writing");
    println!("  -c, --config <FILE>              Config file path (overrides auto-discovery)");
    println!("  -S, --silent                     Silent mode");
    println!("  -h, --help                       Print help");
    println!();
    println!("In-file directive:");
    println!("  -- sqlprettier: --comma-position leading --cte-indent 2");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for sqlprettier.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks sqlprettier.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
