//! Handler for the `fmt` command.

use std::fs;
use std::io::Read;
use std::path::Path;

use colored::*;

use sassfmt_lib::Dialect;
use sassfmt_lib::config::{Config, Indent};
use sassfmt_lib::convert::{CONVERSION_FAILED_MESSAGE, ConvertError, FormatService};
use sassfmt_lib::exit_codes::exit;
use sassfmt_lib::output::OutputWriter;

use crate::cli_types::FmtArgs;
use crate::cli_utils::load_config_or_exit;
use crate::files::discover_stylesheets;

enum FileOutcome {
    Unchanged,
    Changed,
}

/// Handle the fmt command: format stylesheets in place, from stdin, or
/// report what would change with `--check`.
pub fn handle_fmt(args: FmtArgs) {
    let loaded = load_config_or_exit(args.config.as_deref());
    let mut config = loaded.config;
    apply_cli_overrides(&mut config, &args);

    let service = FormatService::new(config);

    // A missing converter is reported up front, but formatting still runs:
    // each file then fails with its own diagnostic.
    match service.verify() {
        Ok(version) => {
            log::info!("using {} ({})", service.command().display(), version.trim());
        }
        Err(e) => {
            log::warn!("converter check failed: {e}");
            if !args.silent {
                eprintln!(
                    "{}: {}",
                    "Warning".yellow().bold(),
                    service.command().unreachable_message()
                );
            }
        }
    }

    if args.stdin || args.paths.iter().any(|p| p == "-") {
        format_stdin(&service, &args);
    }

    if args.paths.is_empty() {
        if !args.silent {
            eprintln!(
                "{}: No paths provided. Pass files or directories, or use --stdin.",
                "Error".red().bold()
            );
        }
        exit::tool_error();
    }

    format_paths(&service, &args);
}

fn apply_cli_overrides(config: &mut Config, args: &FmtArgs) {
    if let Some(sass_path) = args.sass_path.as_deref() {
        config.converter.sass_path = Some(sass_path.to_string());
    }
    if let Some(timeout) = args.timeout {
        config.converter.timeout = timeout;
    }
    if let Some(indent) = args.indent.as_deref() {
        match indent.parse::<Indent>() {
            Ok(value) => config.style.indent = value,
            Err(e) => {
                eprintln!("{}: Invalid --indent value: {}", "Error".red().bold(), e);
                exit::tool_error();
            }
        }
    }
    if let Some(respect) = args.respect_gitignore {
        config.files.respect_gitignore = respect;
    }
}

/// Pick the dialect for stdin input: `--syntax` wins, then the extension of
/// `--stdin-filename`, then SCSS.
fn stdin_dialect(args: &FmtArgs) -> Dialect {
    if let Some(syntax) = args.syntax.as_deref()
        && let Some(dialect) = Dialect::from_language_id(syntax)
    {
        return dialect;
    }
    if let Some(name) = args.stdin_filename.as_deref()
        && let Some(dialect) = Dialect::from_path(Path::new(name))
    {
        return dialect;
    }
    Dialect::Scss
}

fn format_stdin(service: &FormatService, args: &FmtArgs) -> ! {
    let dialect = stdin_dialect(args);

    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        if !args.silent {
            eprintln!("{}: Failed to read from stdin: {}", "Error".red().bold(), e);
        }
        exit::tool_error();
    }

    match service.format(&input, dialect) {
        Ok(formatted) => {
            if args.check {
                if formatted == input {
                    exit::success();
                }
                if !args.silent {
                    let label = args.stdin_filename.as_deref().unwrap_or("<stdin>");
                    eprintln!("{label} is not formatted");
                }
                exit::changes_detected();
            }
            print!("{formatted}");
            exit::success();
        }
        Err(e) => {
            if !args.silent {
                eprintln!("{}: {}", "Error".red().bold(), CONVERSION_FAILED_MESSAGE);
                eprint!("{}", e.diagnostic());
            }
            exit::tool_error();
        }
    }
}

fn format_paths(service: &FormatService, args: &FmtArgs) -> ! {
    let stylesheets = match discover_stylesheets(&args.paths, &service.config().files) {
        Ok(found) => found,
        Err(message) => {
            if !args.silent {
                eprintln!("{}: {}", "Error".red().bold(), message);
            }
            exit::tool_error();
        }
    };

    let output = OutputWriter::new(false, args.silent);
    let mut changed = 0usize;
    let mut failed = 0usize;

    for path in &stylesheets {
        match format_file(service, path, !args.check) {
            Ok(FileOutcome::Unchanged) => {}
            Ok(FileOutcome::Changed) => {
                changed += 1;
                if !args.quiet {
                    if args.check {
                        let _ = output.writeln(&format!("{} {}", "Would reformat:".yellow(), path.display()));
                    } else {
                        let _ = output.writeln(&format!("{} {}", "Formatted".green(), path.display()));
                    }
                }
            }
            Err(e) => {
                failed += 1;
                let _ = output.write_error(&format!("{}: {}: {}", "Error".red().bold(), path.display(), e));
                if let ConvertError::Failed { .. } = &e {
                    let detail = e.diagnostic();
                    let detail = detail.trim_end();
                    if !detail.is_empty() {
                        let _ = output.write_error(detail);
                    }
                }
            }
        }
    }

    if !args.quiet {
        let total = stylesheets.len();
        let summary = if args.check {
            format!("{changed} of {total} file(s) would be reformatted")
        } else {
            format!("Formatted {changed} of {total} file(s)")
        };
        let _ = output.writeln(&summary);
    }
    if failed > 0 {
        let _ = output.write_error(&format!("{failed} file(s) failed to format"));
        exit::tool_error();
    }
    if args.check && changed > 0 {
        exit::changes_detected();
    }
    exit::success();
}

fn format_file(service: &FormatService, path: &Path, write: bool) -> Result<FileOutcome, ConvertError> {
    let dialect = Dialect::from_path(path).unwrap_or(Dialect::Scss);
    let source = fs::read_to_string(path).map_err(|e| ConvertError::Io {
        context: format!("failed to read {}", path.display()),
        source: e,
    })?;

    let formatted = service.format(&source, dialect)?;
    if formatted == source {
        return Ok(FileOutcome::Unchanged);
    }

    if write {
        fs::write(path, &formatted).map_err(|e| ConvertError::Io {
            context: format!("failed to write {}", path.display()),
            source: e,
        })?;
    }
    Ok(FileOutcome::Changed)
}
