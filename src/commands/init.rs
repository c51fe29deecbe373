//! Handler for the `init` command.

use std::path::Path;

use colored::*;

use sassfmt_lib::config::{CONFIG_FILE_NAMES, create_default_config};
use sassfmt_lib::exit_codes::exit;

/// Create a starter configuration file in the current directory.
pub fn handle_init(force: bool) {
    let path = Path::new(CONFIG_FILE_NAMES[0]);
    match create_default_config(path, force) {
        Ok(true) => println!("Created {}", path.display()),
        Ok(false) => println!("{} already exists (use --force to overwrite)", path.display()),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
