//! Organizer configuration.
//!
//! This module loads the classification tables and file filtering rules from
//! TOML configuration files. Everything is optional; missing keys fall back to
//! the built-in category table and English month names.
//!
//! # Configuration File Format
//!
//! ```toml
//! months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun",
//!           "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
//! report_format = "csv"
//!
//! [categories]
//! Images = [".jpg", ".png", ".webp"]
//!
//! [filters.exclude]
//! filenames = ["Thumbs.db", ".DS_Store"]
//! patterns = ["*.part"]
//! extensions = ["tmp"]
//! regex = ["^~\\$"]
//! ```

use crate::file_category::{Category, CategoryTable};
use crate::planner::{MonthTable, PathPlanner};
use crate::report::ReportFormat;
use glob::Pattern;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".organizerrc.toml";

/// Errors that can occur during configuration loading and compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// A `[categories]` key is not a known category.
    UnknownCategory(String),
    /// `months` does not have exactly twelve entries.
    InvalidMonths(usize),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::UnknownCategory(name) => {
                let known: Vec<&str> = Category::ALL.iter().map(|c| c.dir_name()).collect();
                write!(
                    f,
                    "Unknown category '{}': expected one of {}",
                    name,
                    known.join(", ")
                )
            }
            ConfigError::InvalidMonths(count) => {
                write!(f, "Expected 12 month names, found {}", count)
            }
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw configuration as deserialized from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizerConfig {
    /// Twelve month names, January first.
    #[serde(default)]
    pub months: Option<Vec<String>>,

    /// Per-category extension overrides, keyed by category directory name.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,

    /// Default report format when none is given on the command line.
    #[serde(default)]
    pub report_format: Option<ReportFormat>,

    #[serde(default)]
    pub filters: FilterRules,
}

/// Root-level filter rules configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterRules {
    /// Rules for excluding files.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Rules for excluding files from organization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., ".DS_Store", "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to exclude (e.g., "*.part").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// File extensions to exclude, without the dot (e.g., "tmp").
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Configuration turned into the values the organizer runs with.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub planner: PathPlanner,
    pub filters: CompiledFilters,
    pub report_format: Option<ReportFormat>,
}

impl OrganizerConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.organizerrc.toml` in the current directory
    /// 3. Look for `~/.config/datesort/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read, or if any discovered file is not valid TOML.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("datesort")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Validate the configuration and build the planner and filters.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown category names, a month list that is
    /// not twelve long, or invalid glob/regex patterns.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        let mut categories = CategoryTable::default();
        for (name, extensions) in &self.categories {
            let category = Category::from_dir_name(name)
                .ok_or_else(|| ConfigError::UnknownCategory(name.clone()))?;
            categories.set_extensions(category, extensions);
        }

        let months = match self.months {
            Some(names) => {
                MonthTable::new(names).map_err(|names| ConfigError::InvalidMonths(names.len()))?
            }
            None => MonthTable::default(),
        };

        Ok(CompiledConfig {
            planner: PathPlanner::new(categories, months),
            filters: CompiledFilters::new(self.filters)?,
            report_format: self.report_format,
        })
    }
}

/// Compiled filter structures for file matching.
///
/// Glob and regex patterns are compiled once so that matching a file does
/// not reparse them.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
        })
    }

    /// Check if a file should be organized (not excluded).
    ///
    /// Checks are performed in this order, with early termination:
    /// 1. Exact filename match
    /// 2. File extension match
    /// 3. Glob pattern match on the file name or the full path
    /// 4. Regex pattern match on the file name
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&file_name) || pattern.matches_path(file_path))
        {
            return false;
        }

        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
    }
}
