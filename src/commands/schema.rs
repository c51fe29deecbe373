//! Handler for the `schema` command.

use colored::*;

use sassfmt_lib::config::Config;
use sassfmt_lib::exit_codes::exit;

/// Print the JSON Schema for the configuration file.
pub fn handle_schema() {
    use schemars::schema_for;

    let schema = schema_for!(Config);
    let schema_json = serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
        eprintln!("{}: Failed to serialize schema: {}", "Error".red().bold(), e);
        exit::tool_error();
    });

    println!("{schema_json}");
}
