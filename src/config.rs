//! Scan filtering configuration.
//!
//! An optional TOML file controls which files a sort run is allowed to touch.
//! Without a config file every regular file is included, hidden files too.
//!
//! # Configuration File Format
//!
//! ```toml
//! [filters]
//! include_hidden = false
//!
//! [filters.exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! extensions = ["bak", "tmp"]
//! patterns = ["*.part", "**/node_modules/**"]
//!
//! [filters.include]
//! patterns = [".keepme"]
//! ```
//!
//! Include patterns are a whitelist: a file matching one is always kept, no
//! matter what the exclude rules say.

use glob::Pattern;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading or compiling a filter configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No file exists at the given config path.
    NotFound(PathBuf),
    /// The file exists but is not valid TOML for this schema.
    Invalid(String),
    /// A glob pattern in the file failed to compile.
    InvalidPattern { pattern: String, reason: String },
    /// The file could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid glob pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Filter configuration as deserialized from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: FilterRules,
}

/// The `[filters]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterRules {
    /// Whether dotfiles take part in sorting. Defaults to true so that an
    /// absent config file means "sort everything".
    #[serde(default = "default_include_hidden")]
    pub include_hidden: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,

    #[serde(default)]
    pub include: IncludeRules,
}

impl Default for FilterRules {
    fn default() -> Self {
        FilterRules {
            include_hidden: true,
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

fn default_include_hidden() -> bool {
    true
}

/// The `[filters.exclude]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to leave alone.
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Extensions to leave alone, matched case-insensitively, no leading dot.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns to leave alone, matched against the file path.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// The `[filters.include]` table. Whitelist patterns override excludes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludeRules {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl FilterConfig {
    /// Loads a configuration.
    ///
    /// `Some(path)` reads and parses that file, erroring if it is missing or
    /// malformed. `None` yields the permissive default (everything included).
    pub fn load(path: Option<&Path>) -> Result<FilterConfig, ConfigError> {
        let Some(path) = path else {
            return Ok(FilterConfig::default());
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Compiles the glob patterns so matching is cheap per file.
    pub fn compile(&self) -> Result<ScanFilters, ConfigError> {
        let compile_all = |patterns: &[String]| -> Result<Vec<Pattern>, ConfigError> {
            patterns
                .iter()
                .map(|p| {
                    Pattern::new(p).map_err(|e| ConfigError::InvalidPattern {
                        pattern: p.clone(),
                        reason: e.to_string(),
                    })
                })
                .collect()
        };

        Ok(ScanFilters {
            include_hidden: self.filters.include_hidden,
            exclude_filenames: self.filters.exclude.filenames.iter().cloned().collect(),
            exclude_extensions: self
                .filters
                .exclude
                .extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            exclude_patterns: compile_all(&self.filters.exclude.patterns)?,
            include_patterns: compile_all(&self.filters.include.patterns)?,
        })
    }
}

/// Compiled, ready-to-match filter rules handed to the scanner.
#[derive(Debug, Clone)]
pub struct ScanFilters {
    include_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    include_patterns: Vec<Pattern>,
}

impl ScanFilters {
    /// Decides whether a file takes part in the sort run.
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        // Whitelist wins over every exclude rule.
        if self
            .include_patterns
            .iter()
            .any(|p| p.matches_path(file_path))
        {
            return true;
        }

        if !self.include_hidden && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| p.matches_path(file_path))
    }
}
