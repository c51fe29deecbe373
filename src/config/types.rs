//!
//! Configuration structures for sassfmt: converter settings, style options,
//! and batch-mode file selection, with serde support for the TOML config
//! file and the JSON schema.

use std::fmt;
use std::io;
use std::sync::Once;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Value of `default-encoding` that means "do not pass the flag".
pub const DEFAULT_ENCODING_SENTINEL: &str = "default";

/// Errors that can occur when loading or creating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io { source: io::Error, path: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Configuration file not found: {path}")]
    NotFound { path: String },
}

/// Complete sassfmt configuration.
///
/// Serialized as a flat kebab-case TOML table with one `[files]` sub-table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    #[serde(flatten)]
    pub converter: ConverterSettings,

    #[serde(flatten)]
    pub style: StyleOptions,

    /// File selection for batch formatting.
    pub files: FilesConfig,
}

/// Settings for locating and supervising the converter process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConverterSettings {
    /// Directory containing the `sass-convert` executable. When unset, the
    /// bare command name is resolved through `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sass_path: Option<String>,

    /// Bound on each converter invocation, in milliseconds. 0 disables it.
    pub timeout: u64,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            sass_path: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30_000
}

/// Formatting style options.
///
/// Each option maps independently to either one converter flag or one
/// post-processing step; none of them interact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case", default)]
pub struct StyleOptions {
    /// Convert underscores to dashes in identifiers (`--dasherize`).
    pub dasherize: bool,

    /// Indentation emitted by the converter (`--indent`).
    pub indent: Indent,

    /// Character encoding passed as `--default-encoding`. The literal
    /// string "default" omits the flag entirely.
    pub default_encoding: String,

    /// Rewrite double-quoted strings to single quotes after conversion.
    /// Quotes inside comments are left alone.
    pub use_single_quotes: bool,

    /// Keep trailing `//` and `/* ... */` comments on the line they
    /// annotate instead of letting the converter move them.
    pub inline_comments: bool,

    /// When false, decimals below one lose their leading zero
    /// (`0.5em` becomes `.5em`).
    pub number_leading_zero: bool,

    /// Deprecated and without effect; line endings belong to the editor.
    /// Setting it only produces a one-time notice.
    pub unix_newlines: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            dasherize: false,
            indent: Indent::default(),
            default_encoding: DEFAULT_ENCODING_SENTINEL.to_string(),
            use_single_quotes: false,
            inline_comments: true,
            number_leading_zero: true,
            unix_newlines: false,
        }
    }
}

/// Indentation width: a number of spaces, or hard tabs.
///
/// Accepts a TOML integer or the strings `"t"`/`"tab"` (sass-convert
/// spells hard tabs as `--indent t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indent {
    Spaces(u32),
    Tabs,
}

impl Indent {
    /// The value passed to `--indent`.
    pub fn flag_value(self) -> String {
        match self {
            Indent::Spaces(n) => n.to_string(),
            Indent::Tabs => "t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indent::Spaces(n) => write!(f, "{n}"),
            Indent::Tabs => f.write_str("t"),
        }
    }
}

impl std::str::FromStr for Indent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "t" | "tab" | "tabs" => Ok(Indent::Tabs),
            _ => s
                .parse::<u32>()
                .map(Indent::Spaces)
                .map_err(|_| format!("expected a number or \"t\"/\"tab\", got {s:?}")),
        }
    }
}

impl Serialize for Indent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Indent::Spaces(n) => serializer.serialize_u32(*n),
            Indent::Tabs => serializer.serialize_str("t"),
        }
    }
}

impl<'de> Deserialize<'de> for Indent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndentVisitor;

        impl Visitor<'_> for IndentVisitor {
            type Value = Indent;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a space count or \"t\"/\"tab\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Indent, E> {
                u32::try_from(value)
                    .map(Indent::Spaces)
                    .map_err(|_| E::custom("indent is out of range"))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Indent, E> {
                if value < 0 {
                    return Err(E::custom("indent cannot be negative"));
                }
                self.visit_u64(value as u64)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Indent, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IndentVisitor)
    }
}

impl schemars::JsonSchema for Indent {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Borrowed("Indent")
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "description": "Indentation width: a space count, or \"t\"/\"tab\" for hard tabs",
            "anyOf": [
                { "type": "integer", "minimum": 0 },
                { "type": "string", "enum": ["t", "tab", "tabs"] }
            ]
        })
    }
}

/// File selection for batch formatting (the `[files]` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case", default)]
pub struct FilesConfig {
    /// Glob patterns to include. Empty means every discovered stylesheet.
    pub include: Vec<String>,

    /// Glob patterns to exclude.
    pub exclude: Vec<String>,

    /// Respect .gitignore files when walking directories.
    pub respect_gitignore: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }
}

/// Emit the notice for deprecated options, at most once per process.
pub fn note_deprecated_options(style: &StyleOptions) {
    static UNIX_NEWLINES_NOTICE: Once = Once::new();

    if style.unix_newlines {
        UNIX_NEWLINES_NOTICE.call_once(|| {
            log::warn!(
                "the unix-newlines option is deprecated and has no effect; \
                 configure line endings in your editor instead"
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(content: &str) -> Config {
        crate::config::loading::parse_config(content, "test.toml").unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.converter.sass_path, None);
        assert_eq!(config.converter.timeout, 30_000);
        assert!(!config.style.dasherize);
        assert_eq!(config.style.indent, Indent::Spaces(2));
        assert_eq!(config.style.default_encoding, "default");
        assert!(!config.style.use_single_quotes);
        assert!(config.style.inline_comments);
        assert!(config.style.number_leading_zero);
        assert!(!config.style.unix_newlines);
        assert!(config.files.include.is_empty());
        assert!(config.files.exclude.is_empty());
        assert!(config.files.respect_gitignore);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        assert_eq!(parse(""), Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
sass-path = "/opt/sass/bin"
timeout = 5000
dasherize = true
indent = 4
default-encoding = "UTF-8"
use-single-quotes = true
inline-comments = false
number-leading-zero = false

[files]
include = ["src/**/*.scss"]
exclude = ["vendor/**"]
respect-gitignore = false
"#,
        );

        assert_eq!(config.converter.sass_path.as_deref(), Some("/opt/sass/bin"));
        assert_eq!(config.converter.timeout, 5000);
        assert!(config.style.dasherize);
        assert_eq!(config.style.indent, Indent::Spaces(4));
        assert_eq!(config.style.default_encoding, "UTF-8");
        assert!(config.style.use_single_quotes);
        assert!(!config.style.inline_comments);
        assert!(!config.style.number_leading_zero);
        assert_eq!(config.files.include, vec!["src/**/*.scss"]);
        assert_eq!(config.files.exclude, vec!["vendor/**"]);
        assert!(!config.files.respect_gitignore);
    }

    #[test]
    fn test_indent_accepts_number_or_tab_strings() {
        assert_eq!(parse("indent = 0").style.indent, Indent::Spaces(0));
        assert_eq!(parse("indent = 8").style.indent, Indent::Spaces(8));
        assert_eq!(parse("indent = \"t\"").style.indent, Indent::Tabs);
        assert_eq!(parse("indent = \"tab\"").style.indent, Indent::Tabs);
        assert_eq!(parse("indent = \"tabs\"").style.indent, Indent::Tabs);
    }

    #[test]
    fn test_indent_rejects_garbage() {
        let result = crate::config::loading::parse_config("indent = \"wide\"", "test.toml");
        assert!(result.is_err());
        let result = crate::config::loading::parse_config("indent = -2", "test.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_indent_flag_values() {
        assert_eq!(Indent::Spaces(2).flag_value(), "2");
        assert_eq!(Indent::Spaces(0).flag_value(), "0");
        assert_eq!(Indent::Tabs.flag_value(), "t");
    }

    #[test]
    fn test_indent_from_str() {
        assert_eq!("4".parse::<Indent>(), Ok(Indent::Spaces(4)));
        assert_eq!("t".parse::<Indent>(), Ok(Indent::Tabs));
        assert_eq!("tab".parse::<Indent>(), Ok(Indent::Tabs));
        assert!("wide".parse::<Indent>().is_err());
        assert!("-1".parse::<Indent>().is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = Config::default();
        config.converter.sass_path = Some("/usr/local/bin".to_string());
        config.style.indent = Indent::Tabs;
        config.style.use_single_quotes = true;
        config.files.exclude = vec!["node_modules/**".to_string()];

        let value = toml::Value::try_from(&config).unwrap();
        let rendered = toml::to_string_pretty(&value).unwrap();
        let reparsed = crate::config::loading::parse_config(&rendered, "roundtrip.toml").unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        // Unrecognized keys warn but never fail the load.
        let config = parse("indent = 4\nfancy-mode = true");
        assert_eq!(config.style.indent, Indent::Spaces(4));
    }
}
