//! Handler for the `config` command.

use colored::*;

use sassfmt_lib::config::Config;
use sassfmt_lib::convert::FormatService;
use sassfmt_lib::exit_codes::exit;

use crate::cli_types::ConfigSubcommand;
use crate::cli_utils::load_config_or_exit;

/// Handle the config command: show or query configuration.
pub fn handle_config(subcmd: Option<ConfigSubcommand>, defaults: bool, output: &str, config_path: Option<&str>) {
    match subcmd {
        Some(ConfigSubcommand::File) => handle_config_file(config_path),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(&key, defaults, config_path),
        None => handle_config_display(defaults, output, config_path),
    }
}

fn effective_config(defaults: bool, config_path: Option<&str>) -> Config {
    if defaults {
        Config::default()
    } else {
        load_config_or_exit(config_path).config
    }
}

fn handle_config_file(config_path: Option<&str>) {
    let loaded = load_config_or_exit(config_path);
    match loaded.source {
        Some(path) => match std::fs::canonicalize(&path) {
            Ok(absolute) => println!("{}", absolute.display()),
            Err(_) => println!("{}", path.display()),
        },
        None => println!("No configuration file found (using defaults)"),
    }
}

fn handle_config_get(key: &str, defaults: bool, config_path: Option<&str>) {
    let config = effective_config(defaults, config_path);
    let value = toml::Value::try_from(&config).unwrap_or_else(|e| {
        eprintln!("{}: Failed to serialize config: {}", "Error".red().bold(), e);
        exit::tool_error();
    });

    let normalized = key.trim().to_ascii_lowercase().replace('_', "-");
    match lookup(&value, &normalized) {
        Some(found) => println!("{found}"),
        None => {
            eprintln!("Unknown config key: {key}");
            exit::tool_error();
        }
    }
}

/// Walk a dotted key (e.g. `files.exclude`) down a TOML value tree.
fn lookup<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for segment in key.split('.') {
        current = current.as_table()?.get(segment)?;
    }
    Some(current)
}

fn handle_config_display(defaults: bool, output: &str, config_path: Option<&str>) {
    let config = effective_config(defaults, config_path);

    // Round-trip through toml::Value so the flattened sections serialize
    // with scalar keys before the [files] table.
    let value = toml::Value::try_from(&config).unwrap_or_else(|e| {
        eprintln!("{}: Failed to serialize config: {}", "Error".red().bold(), e);
        exit::tool_error();
    });

    let rendered = if output == "json" {
        serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
            eprintln!("{}: Failed to serialize config to JSON: {}", "Error".red().bold(), e);
            exit::tool_error();
        })
    } else {
        toml::to_string_pretty(&value).unwrap_or_else(|e| {
            eprintln!("{}: Failed to serialize config to TOML: {}", "Error".red().bold(), e);
            exit::tool_error();
        })
    };
    println!("{rendered}");

    // Informational: where the resolved settings point the formatter.
    let service = FormatService::new(config);
    eprintln!("{} {}", "converter:".dimmed(), service.command().display());
}
