//! Configuration management for sqlprettier.
//!
//! This module provides the [`Config`] struct which controls all formatting behavior.
//! Configuration can be loaded from:
//! - TOML files (`sqlprettier.toml`)
//! - Host-supplied option maps (camelCase names such as `keywordCase`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`-- sqlprettier: --keyword-case lowercase`)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["sqlprettier.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

/// Letter casing applied to keywords or function names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    #[default]
    #[serde(alias = "upper")]
    Uppercase,
    #[serde(alias = "lower")]
    Lowercase,
    Preserve,
}

impl CaseMode {
    /// Names accepted on the command line and in directives
    pub const NAMES: &'static [&'static str] =
        &["uppercase", "lowercase", "preserve", "upper", "lower"];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CaseMode::Uppercase => "uppercase",
            CaseMode::Lowercase => "lowercase",
            CaseMode::Preserve => "preserve",
        }
    }
}

impl FromStr for CaseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uppercase" | "upper" => Ok(CaseMode::Uppercase),
            "lowercase" | "lower" => Ok(CaseMode::Lowercase),
            "preserve" => Ok(CaseMode::Preserve),
            other => Err(format!(
                "unknown case mode '{other}' (expected uppercase, lowercase or preserve)"
            )),
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where list commas go when a list is broken over several lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommaPosition {
    /// `\n     , item`
    #[serde(alias = "start")]
    Leading,
    /// `item,\n       next`
    #[default]
    #[serde(alias = "end")]
    Trailing,
}

impl CommaPosition {
    /// Names accepted on the command line and in directives
    pub const NAMES: &'static [&'static str] = &["leading", "trailing", "start", "end"];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CommaPosition::Leading => "leading",
            CommaPosition::Trailing => "trailing",
        }
    }
}

impl FromStr for CommaPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "leading" | "start" => Ok(CommaPosition::Leading),
            "trailing" | "end" => Ok(CommaPosition::Trailing),
            other => Err(format!(
                "unknown comma position '{other}' (expected leading or trailing)"
            )),
        }
    }
}

impl fmt::Display for CommaPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serde default functions
fn default_cte_indent() -> usize {
    4
}

/// Main configuration struct for sqlprettier
///
/// Fixed for the duration of a formatting call; stages only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Casing of SQL keywords (default: uppercase)
    #[serde(default, alias = "keywordCase")]
    pub keyword_case: CaseMode,

    /// Casing of known function names (default: uppercase)
    #[serde(default, alias = "functionCase")]
    pub function_case: CaseMode,

    /// Comma placement in broken lists (default: trailing)
    #[serde(default, alias = "commaPosition")]
    pub comma_position: CommaPosition,

    /// Keep `GROUP BY` column lists on one line (default: false)
    #[serde(default, alias = "groupBySingleLine")]
    pub group_by_single_line: bool,

    /// Spaces added to every line of a CTE body (default: 4)
    #[serde(default = "default_cte_indent", alias = "cteIndent")]
    pub cte_indent: usize,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PartialConfig {
    #[serde(alias = "keywordCase")]
    pub keyword_case: Option<CaseMode>,
    #[serde(alias = "functionCase")]
    pub function_case: Option<CaseMode>,
    #[serde(alias = "commaPosition")]
    pub comma_position: Option<CommaPosition>,
    #[serde(alias = "groupBySingleLine")]
    pub group_by_single_line: Option<bool>,
    #[serde(alias = "cteIndent")]
    pub cte_indent: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keyword_case: CaseMode::Uppercase,
            function_case: CaseMode::Uppercase,
            comma_position: CommaPosition::Trailing,
            group_by_single_line: false,
            cte_indent: 4,
        }
    }
}

impl Config {
    /// Maximum reasonable CTE indent size
    const MAX_CTE_INDENT: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.cte_indent == 0 {
            return Some("cte_indent must be at least 1".to_string());
        }
        if self.cte_indent > Self::MAX_CTE_INDENT {
            return Some(format!(
                "cte_indent {} exceeds maximum of {}",
                self.cte_indent,
                Self::MAX_CTE_INDENT
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text, defaulting unset fields
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let partial: PartialConfig = toml::from_str(contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    pub(crate) fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.keyword_case {
            self.keyword_case = v;
        }
        if let Some(v) = partial.function_case {
            self.function_case = v;
        }
        if let Some(v) = partial.comma_position {
            self.comma_position = v;
        }
        if let Some(v) = partial.group_by_single_line {
            self.group_by_single_line = v;
        }
        if let Some(v) = partial.cte_indent {
            self.cte_indent = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Home directory config has the lowest priority
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so closer files override
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => tracing::warn!(path = %path.display(), "failed to parse config: {e}"),
                },
                Err(e) => tracing::warn!(path = %path.display(), "failed to read config: {e}"),
            }
        }
        config
    }
}
