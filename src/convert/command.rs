//! Resolution and verification of the `sass-convert` executable.

use std::path::{Path, PathBuf};

use crate::config::{ConverterSettings, expand_tilde};

use super::ConvertError;
use super::executor::ConvertExecutor;

/// Executable name resolved through `PATH` when no `sass-path` is set.
pub const SASS_CONVERT: &str = "sass-convert";

/// Shown when the default command is unreachable.
pub const MISSING_COMMAND_MESSAGE: &str =
    "sass-convert was not found. Please install the sass command line tools from https://sass-lang.com/install to use sassfmt.";

/// Shown when a configured sass-path does not yield a working command.
pub const INVALID_SASS_PATH_MESSAGE: &str = "The sass-path setting is not valid: sass-convert was not found there.";

/// Shown when a conversion fails; details go to the log output.
pub const CONVERSION_FAILED_MESSAGE: &str = "There was an error formatting your stylesheet. See the log for details.";

/// The resolved converter invocation target.
///
/// Holds only the program path. Per-request flags are built in
/// [`super::options::convert_args`]; nothing about a request is cached here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterCommand {
    program: PathBuf,
}

impl ConverterCommand {
    /// Resolve the command from settings.
    ///
    /// A configured `sass-path` names the directory holding the executable;
    /// a single trailing separator is tolerated and a leading `~/` expands
    /// to the home directory. Without it, the bare name is left to `PATH`.
    pub fn resolve(settings: &ConverterSettings) -> Self {
        let configured = settings
            .sass_path
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty());

        let program = match configured {
            Some(dir) => {
                let dir = dir.strip_suffix('/').or_else(|| dir.strip_suffix('\\')).unwrap_or(dir);
                expand_tilde(dir).join(SASS_CONVERT)
            }
            None => PathBuf::from(SASS_CONVERT),
        };

        log::debug!("resolved converter command: {}", program.display());
        Self { program }
    }

    /// Build a command for an explicit program, bypassing resolution.
    pub fn for_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program invoked for conversions.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Display form for logs and messages.
    pub fn display(&self) -> std::path::Display<'_> {
        self.program.display()
    }

    /// Whether this is the bare default rather than a `sass-path` override.
    ///
    /// The choice between the two unreachable-command messages keys off this
    /// comparison alone, never off the OS error that came back.
    pub fn is_default(&self) -> bool {
        self.program.as_os_str() == SASS_CONVERT
    }

    /// Which user message applies when this command is unreachable.
    pub fn unreachable_message(&self) -> &'static str {
        if self.is_default() {
            MISSING_COMMAND_MESSAGE
        } else {
            INVALID_SASS_PATH_MESSAGE
        }
    }

    /// Advisory reachability probe: run `--version` and return its output.
    pub fn verify(&self, timeout_ms: u64) -> Result<String, ConvertError> {
        let output = ConvertExecutor::new(timeout_ms).run(self, &["--version".to_string()], "")?;
        if output.success {
            Ok(output.stdout.trim().to_string())
        } else {
            Err(ConvertError::Failed {
                program: self.display().to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            })
        }
    }
}
