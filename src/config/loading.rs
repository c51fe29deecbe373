//! Configuration discovery and loading.
//!
//! Priority order:
//! 1. An explicit `--config` path is used standalone and must exist.
//! 2. Otherwise the directory tree is walked upward from the working
//!    directory; the walk stops after the first directory containing `.git`,
//!    so a repository boundary is never crossed.
//! 3. Otherwise the platform's user configuration directory is consulted.
//! 4. Otherwise built-in defaults apply.

use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

use super::types::{Config, ConfigError};

/// Config file names probed in each searched directory, in precedence order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".sassfmt.toml", "sassfmt.toml"];

/// Maximum upward traversal depth during discovery.
const MAX_DEPTH: usize = 100;

/// A loaded configuration plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// Path of the file the configuration was read from, if any.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Load configuration for the current working directory.
    ///
    /// With `explicit` set, that file must exist; without it, discovery
    /// falls through to built-in defaults rather than erroring.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::debug!("[sassfmt-config] Explicit config path provided: {}", path.display());
            if !path.is_file() {
                return Err(ConfigError::NotFound {
                    path: path.display().to_string(),
                });
            }
            return Self::from_file(path);
        }

        let start_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                log::debug!("[sassfmt-config] Failed to get current directory: {e}");
                return Ok(Self::default());
            }
        };

        if let Some(path) = discover_project_config(&start_dir) {
            return Self::from_file(&path);
        }

        if let Some(path) = user_config_file()
            && path.is_file()
        {
            log::debug!("[sassfmt-config] Using user configuration: {}", path.display());
            return Self::from_file(&path);
        }

        log::debug!("[sassfmt-config] No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Read and parse a single configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display_path = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            source: e,
            path: display_path.clone(),
        })?;
        let config = parse_config(&content, &display_path)?;
        log::debug!("[sassfmt-config] Loaded configuration from {display_path}");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }
}

/// Parse TOML content into a [`Config`], warning about unrecognized keys.
pub fn parse_config(content: &str, display_path: &str) -> Result<Config, ConfigError> {
    let table: toml::Table = content.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: display_path.to_string(),
        message: e.to_string(),
    })?;
    let value = toml::Value::Table(table);

    warn_unknown_keys(&value, display_path);

    Config::deserialize(value).map_err(|e| ConfigError::Parse {
        path: display_path.to_string(),
        message: e.to_string(),
    })
}

/// Warn about keys sassfmt does not understand. Unknown keys never fail the
/// load; a typo should not take the formatter down.
fn warn_unknown_keys(value: &toml::Value, display_path: &str) {
    const KNOWN_KEYS: &[&str] = &[
        "sass-path",
        "timeout",
        "dasherize",
        "indent",
        "default-encoding",
        "use-single-quotes",
        "inline-comments",
        "number-leading-zero",
        "unix-newlines",
        "files",
    ];
    const KNOWN_FILES_KEYS: &[&str] = &["include", "exclude", "respect-gitignore"];

    let Some(table) = value.as_table() else { return };

    for key in table.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            log::warn!("unknown key in {display_path}: {key}");
        }
    }

    if let Some(files) = table.get("files").and_then(|v| v.as_table()) {
        for key in files.keys() {
            if !KNOWN_FILES_KEYS.contains(&key.as_str()) {
                log::warn!("unknown key in {display_path} under [files]: {key}");
            }
        }
    }
}

/// Walk upward from `start`, returning the first config file found.
///
/// The search checks the first directory containing `.git` and then stops,
/// so configuration never leaks in from outside the repository.
pub fn discover_project_config(start: &Path) -> Option<PathBuf> {
    let mut current = start;

    for _ in 0..MAX_DEPTH {
        log::debug!("[sassfmt-config] Searching for config in: {}", current.display());

        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                log::debug!("[sassfmt-config] Found config file: {}", candidate.display());
                return Some(candidate);
            }
        }

        if current.join(".git").exists() {
            log::debug!("[sassfmt-config] Stopping at .git directory");
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    None
}

/// `sassfmt/sassfmt.toml` under the platform's user configuration directory.
pub fn user_config_file() -> Option<PathBuf> {
    match choose_base_strategy() {
        Ok(strategy) => Some(strategy.config_dir().join("sassfmt").join("sassfmt.toml")),
        Err(e) => {
            log::debug!("[sassfmt-config] Failed to determine user config directory: {e}");
            None
        }
    }
}

/// Expand a leading `~/` using the platform home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Ok(strategy) = choose_base_strategy()
    {
        return strategy.home_dir().join(rest);
    }
    PathBuf::from(path)
}

/// Default configuration written by `sassfmt init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sassfmt configuration file
# https://docs.rs/sassfmt

# Directory containing the sass-convert executable.
# Leave unset to resolve sass-convert through PATH.
# sass-path = "/usr/local/bin"

# Converter timeout in milliseconds. 0 disables the bound.
# timeout = 30000

# Indentation: a space count, or "t" for hard tabs.
indent = 2

# Convert underscores to dashes in identifiers.
dasherize = false

# Character encoding passed to the converter ("default" omits the flag).
default-encoding = "default"

# Rewrite double-quoted strings to single quotes (comments are preserved).
use-single-quotes = false

# Keep trailing comments on the line they annotate.
inline-comments = true

# When false, decimals below one lose their leading zero (0.5em -> .5em).
number-leading-zero = true

[files]
# include = ["src/**/*.scss"]
# exclude = ["vendor/**"]
respect-gitignore = true
"#;

/// Create a default configuration file at `path`.
///
/// Returns `Ok(true)` if the file was written and `Ok(false)` if it already
/// exists and `force` is not set.
pub fn create_default_config(path: &Path, force: bool) -> Result<bool, ConfigError> {
    if path.exists() && !force {
        return Ok(false);
    }
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::Io {
        source: e,
        path: path.display().to_string(),
    })?;
    Ok(true)
}
