//! Stylesheet dialect detection.
//!
//! The dialect is derived purely from the file extension (or, in the
//! language server, from the language id the editor declared) and selects
//! the `--from`/`--to` syntax pair passed to the converter.

use std::path::Path;

/// A stylesheet syntax recognized by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Scss,
    Sass,
    Css,
}

impl Dialect {
    /// Detect the dialect from a file path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Detect the dialect from a bare extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "scss" => Some(Dialect::Scss),
            "sass" => Some(Dialect::Sass),
            "css" => Some(Dialect::Css),
            _ => None,
        }
    }

    /// Detect the dialect from an LSP language id.
    ///
    /// Editors use the same identifiers as the file extensions.
    pub fn from_language_id(id: &str) -> Option<Self> {
        Self::from_extension(id)
    }

    /// The syntax name passed to `--from`/`--to`.
    ///
    /// CSS maps to `scss`: sass-convert has no CSS output dialect, so `.css`
    /// files are read and written as SCSS. Round-tripping a `.css` file is
    /// therefore not guaranteed to reproduce CSS-only syntax.
    pub fn convert_syntax(self) -> &'static str {
        match self {
            Dialect::Scss | Dialect::Css => "scss",
            Dialect::Sass => "sass",
        }
    }

    /// The canonical extension for this dialect.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Scss => "scss",
            Dialect::Sass => "sass",
            Dialect::Css => "css",
        }
    }
}
