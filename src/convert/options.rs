//! Converter argument construction.

use crate::config::{DEFAULT_ENCODING_SENTINEL, StyleOptions};
use crate::dialect::Dialect;

/// Flags appended to every invocation, after all configurable flags.
pub const FIXED_TRAILING_FLAGS: [&str; 2] = ["--no-cache", "--quiet"];

/// Build the sass-convert argument list for one request.
///
/// The order is fixed and part of the tool's contract with sass-convert:
/// the `--from`/`--to` syntax pair, style flags, `--stdin`, the optional
/// encoding, then the fixed trailing flags. `--indent` is always present;
/// `--default-encoding` only when the setting differs from the "default"
/// sentinel. The deprecated unix-newlines option maps to no flag at all.
pub fn convert_args(dialect: Dialect, style: &StyleOptions) -> Vec<String> {
    let mut args = Vec::with_capacity(12);

    let syntax = dialect.convert_syntax();
    args.push("--from".to_string());
    args.push(syntax.to_string());
    args.push("--to".to_string());
    args.push(syntax.to_string());

    if style.dasherize {
        args.push("--dasherize".to_string());
    }
    args.push("--indent".to_string());
    args.push(style.indent.flag_value());

    args.push("--stdin".to_string());
    if style.default_encoding != DEFAULT_ENCODING_SENTINEL {
        args.push("--default-encoding".to_string());
        args.push(style.default_encoding.clone());
    }

    args.extend(FIXED_TRAILING_FLAGS.iter().map(|flag| flag.to_string()));

    args
}
