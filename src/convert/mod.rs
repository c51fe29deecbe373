//! Conversion through the external `sass-convert` tool.
//!
//! sassfmt does not parse stylesheets itself. Formatting is delegated to
//! the Ruby Sass `sass-convert` executable, driven over stdin/stdout as a
//! self-round-trip (`--from X --to X`), with regex fixups applied around
//! the subprocess for the options sass-convert has no flag for.
//!
//! The pieces:
//! - [`command`]: resolving and verifying the executable
//! - [`options`]: building the fixed-order argument list
//! - [`executor`]: running the subprocess under a deadline
//! - [`fixups`]: comment, quote and leading-zero transforms
//! - [`pipeline`]: one request through all of the above
//!
//! [`FormatService`] ties a configuration snapshot to a resolved command;
//! it is the entry point both the CLI and the language server use.

pub mod command;
pub mod executor;
pub mod fixups;
pub mod options;
pub mod pipeline;

pub use command::{
    CONVERSION_FAILED_MESSAGE, ConverterCommand, INVALID_SASS_PATH_MESSAGE, MISSING_COMMAND_MESSAGE, SASS_CONVERT,
};
pub use executor::{ConvertExecutor, ConvertOutput};
pub use options::convert_args;
pub use pipeline::{FormatPipeline, clean_converter_diagnostic};

use crate::config::Config;
use crate::dialect::Dialect;

/// Error from resolving or running the converter.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The converter process could not be spawned at all.
    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran past the configured deadline and was killed.
    #[error("{program} timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    /// The converter exited with a non-zero status.
    #[error("{program} exited with status {exit_code}")]
    Failed {
        program: String,
        exit_code: i32,
        stderr: String,
    },

    /// Reading or writing one of the converter's pipes failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Human-readable diagnostic for the reporting surface.
    ///
    /// Converter stderr is cleaned of its banner and trace hints; other
    /// failures render their display form, newline-terminated either way.
    pub fn diagnostic(&self) -> String {
        match self {
            ConvertError::Failed { stderr, .. } => clean_converter_diagnostic(stderr),
            other => format!("{other}\n"),
        }
    }
}

/// A configuration snapshot bound to a resolved converter command.
///
/// Captured once per CLI run and refreshed on configuration change in the
/// language server; individual format requests only ever read it, so a
/// mid-flight configuration change affects the next request, not the
/// current one.
#[derive(Debug, Clone)]
pub struct FormatService {
    command: ConverterCommand,
    config: Config,
}

impl FormatService {
    /// Build a snapshot from configuration, resolving the converter command.
    pub fn new(config: Config) -> Self {
        let command = ConverterCommand::resolve(&config.converter);
        crate::config::note_deprecated_options(&config.style);
        Self { command, config }
    }

    pub fn command(&self) -> &ConverterCommand {
        &self.command
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Advisory reachability check; returns the converter's version line.
    ///
    /// A failure here never blocks later format attempts, which will fail
    /// on their own terms with the same diagnostics.
    pub fn verify(&self) -> Result<String, ConvertError> {
        self.command.verify(self.config.converter.timeout)
    }

    /// Format `text` as `dialect` through the converter.
    pub fn format(&self, text: &str, dialect: Dialect) -> Result<String, ConvertError> {
        FormatPipeline::new(&self.command, &self.config.style, self.config.converter.timeout).format(text, dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_resolves_command_from_config() {
        let mut config = Config::default();
        config.converter.sass_path = Some("/opt/sass/bin".to_string());
        let service = FormatService::new(config);
        assert!(!service.command().is_default());
        assert_eq!(service.command().unreachable_message(), INVALID_SASS_PATH_MESSAGE);
    }

    #[test]
    fn test_default_service_uses_path_lookup() {
        let service = FormatService::new(Config::default());
        assert!(service.command().is_default());
        assert_eq!(service.command().unreachable_message(), MISSING_COMMAND_MESSAGE);
    }

    #[test]
    fn test_diagnostic_for_failed_cleans_stderr() {
        let err = ConvertError::Failed {
            program: "sass-convert".to_string(),
            exit_code: 65,
            stderr: "banner\nError: nope\n  Use --trace for backtrace.\n".to_string(),
        };
        assert_eq!(err.diagnostic(), "Error: nope\n");
    }

    #[test]
    fn test_diagnostic_for_timeout_is_display_form() {
        let err = ConvertError::Timeout {
            program: "sass-convert".to_string(),
            timeout_ms: 30_000,
        };
        assert_eq!(err.diagnostic(), "sass-convert timed out after 30000ms\n");
    }

    #[test]
    fn test_diagnostic_for_launch_names_the_program() {
        let err = ConvertError::Launch {
            program: "/opt/sass/bin/sass-convert".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let diagnostic = err.diagnostic();
        assert!(diagnostic.starts_with("failed to run /opt/sass/bin/sass-convert"));
        assert!(diagnostic.ends_with('\n'));
    }
}
