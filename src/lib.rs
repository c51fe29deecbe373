pub mod config;
pub mod convert;
pub mod dialect;
pub mod exit_codes;
pub mod lsp;
pub mod output;

pub use crate::convert::{ConvertError, FormatService};
pub use crate::dialect::Dialect;

/// Format a stylesheet through sass-convert with the given configuration.
///
/// Convenience wrapper that resolves a fresh converter command per call;
/// callers formatting repeatedly should build one [`FormatService`] and
/// reuse it.
pub fn format_source(text: &str, dialect: Dialect, config: config::Config) -> Result<String, ConvertError> {
    FormatService::new(config).format(text, dialect)
}
