//!
//! This module defines configuration structures and loading logic for
//! sassfmt. Configuration lives in a flat kebab-case TOML file
//! (`.sassfmt.toml` or `sassfmt.toml`) discovered upward from the working
//! directory, with a user-level file as fallback.

pub mod types;
pub use types::*;

pub mod loading;
pub use loading::{
    CONFIG_FILE_NAMES, DEFAULT_CONFIG_TEMPLATE, LoadedConfig, create_default_config, discover_project_config,
    expand_tilde, user_config_file,
};
