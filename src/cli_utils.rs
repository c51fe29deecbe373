use std::path::Path;

use colored::Colorize;

use sassfmt_lib::config::LoadedConfig;
use sassfmt_lib::exit_codes::exit;

/// Load configuration for a CLI command, exiting with a tool error when an
/// explicitly requested file is missing or malformed.
pub fn load_config_or_exit(explicit: Option<&str>) -> LoadedConfig {
    match LoadedConfig::load(explicit.map(Path::new)) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}
