//! The formatting pipeline around one converter invocation.

use crate::config::StyleOptions;
use crate::dialect::Dialect;

use super::command::ConverterCommand;
use super::executor::ConvertExecutor;
use super::{ConvertError, fixups, options};

/// Drives one span of stylesheet text through sass-convert and the
/// configured fixups.
///
/// Stateless across calls: every [`format`](Self::format) is an independent
/// request/response cycle with exactly one subprocess attempt behind it.
pub struct FormatPipeline<'a> {
    command: &'a ConverterCommand,
    style: &'a StyleOptions,
    executor: ConvertExecutor,
}

impl<'a> FormatPipeline<'a> {
    pub fn new(command: &'a ConverterCommand, style: &'a StyleOptions, timeout_ms: u64) -> Self {
        Self {
            command,
            style,
            executor: ConvertExecutor::new(timeout_ms),
        }
    }

    /// Format `text` as `dialect`, returning the converted and
    /// post-processed result. The input is never modified on failure.
    pub fn format(&self, text: &str, dialect: Dialect) -> Result<String, ConvertError> {
        let args = options::convert_args(dialect, self.style);
        log::debug!("running {} {}", self.command.display(), args.join(" "));

        let input = if self.style.inline_comments {
            let (marked, count) = fixups::mark_inline_comments(text);
            if count > 0 {
                log::debug!("marked {count} inline comment(s)");
            }
            marked
        } else {
            text.to_string()
        };

        let output = self.executor.run(self.command, &args, &input)?;
        if !output.success {
            return Err(ConvertError::Failed {
                program: self.command.display().to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let mut result = output.stdout;
        if self.style.inline_comments {
            result = fixups::restore_inline_comments(&result);
        }
        if self.style.use_single_quotes {
            result = fixups::prefer_single_quotes(&result);
        }
        if !self.style.number_leading_zero {
            result = fixups::strip_leading_zeros(&result);
        }

        Ok(result)
    }
}

/// Clean a converter stderr payload for display.
///
/// Drops the first line (the invocation banner), removes `Use --trace for
/// backtrace` hints, trims surrounding whitespace and guarantees exactly
/// one trailing newline.
pub fn clean_converter_diagnostic(raw: &str) -> String {
    let without_banner = raw.trim().lines().skip(1).collect::<Vec<_>>().join("\n");
    let without_hints = without_banner
        .replace("Use --trace for backtrace.", "")
        .replace("Use --trace for backtrace", "");

    let mut cleaned = without_hints.trim().to_string();
    cleaned.push('\n');
    cleaned
}
