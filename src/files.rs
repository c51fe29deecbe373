//! Stylesheet discovery for paths given on the command line

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use sassfmt_lib::Dialect;
use sassfmt_lib::config::FilesConfig;

/// Compile a list of glob patterns into a single matcher.
fn build_globset(patterns: &[String]) -> Result<GlobSet, String> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| format!("Invalid glob pattern '{pattern}': {e}"))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| format!("Error building glob set: {e}"))
}

/// Resolve the paths given on the command line to the list of stylesheets to
/// format.
///
/// Explicitly named files are trusted: they only need to exist and carry a
/// stylesheet extension. Directories are walked recursively, honoring ignore
/// files when `respect_gitignore` is set, and filtered through the configured
/// include/exclude patterns.
pub fn discover_stylesheets(paths: &[String], files: &FilesConfig) -> Result<Vec<PathBuf>, String> {
    let include = build_globset(&files.include)?;
    let exclude = build_globset(&files.exclude)?;

    let mut stylesheets = Vec::new();
    let mut directories = Vec::new();

    for path_str in paths {
        let path = Path::new(path_str);
        if !path.exists() {
            return Err(format!("File not found: {path_str}"));
        }
        if path.is_dir() {
            directories.push(path.to_path_buf());
        } else if Dialect::from_path(path).is_some() {
            stylesheets.push(path.to_path_buf());
        } else {
            log::warn!("Skipping {path_str}: not a stylesheet");
        }
    }

    if let Some(first) = directories.first() {
        let mut walk_builder = WalkBuilder::new(first);
        for dir in directories.iter().skip(1) {
            walk_builder.add(dir);
        }

        let use_gitignore = files.respect_gitignore;
        walk_builder.ignore(use_gitignore); // Enable/disable .ignore
        walk_builder.git_ignore(use_gitignore); // Enable/disable .gitignore
        walk_builder.git_global(use_gitignore); // Enable/disable global gitignore
        walk_builder.git_exclude(use_gitignore); // Enable/disable .git/info/exclude
        walk_builder.parents(use_gitignore); // Enable/disable parent ignores
        walk_builder.hidden(true); // Skip hidden files and directories
        walk_builder.require_git(false); // Honor ignore files even without a repo

        for result in walk_builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking directory: {err}");
                    continue;
                }
            };
            let entry_path = entry.path();
            if !entry_path.is_file() || Dialect::from_path(entry_path).is_none() {
                continue;
            }
            // Patterns are written relative to the scan root, so match
            // against the path with any leading "./" removed.
            let match_path = entry_path.strip_prefix(".").unwrap_or(entry_path);
            if !files.include.is_empty() && !include.is_match(match_path) {
                continue;
            }
            if exclude.is_match(match_path) {
                continue;
            }
            stylesheets.push(entry_path.to_path_buf());
        }
    }

    stylesheets.sort();
    stylesheets.dedup();
    Ok(stylesheets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "a { color: red; }\n").unwrap();
    }

    fn names(found: &[PathBuf], root: &Path) -> Vec<String> {
        found
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap_or(p)
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_directory_scan_filters_by_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "main.scss");
        touch(tmp.path(), "legacy.sass");
        touch(tmp.path(), "plain.css");
        touch(tmp.path(), "readme.txt");

        let files = FilesConfig::default();
        let found = discover_stylesheets(&[tmp.path().display().to_string()], &files).unwrap();
        let found = names(&found, tmp.path());
        assert_eq!(found, vec!["legacy.sass", "main.scss", "plain.css"]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let files = FilesConfig::default();
        let err = discover_stylesheets(&["no/such/file.scss".to_string()], &files).unwrap_err();
        assert!(err.contains("File not found"), "unexpected error: {err}");
    }

    #[test]
    fn test_explicit_file_skips_pattern_filters() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "vendor/theme.scss");

        let files = FilesConfig {
            exclude: vec!["vendor/**".to_string()],
            ..Default::default()
        };
        let explicit = tmp.path().join("vendor/theme.scss").display().to_string();
        let found = discover_stylesheets(&[explicit], &files).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_exclude_pattern_prunes_directory_scan() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app.scss");
        touch(tmp.path(), "vendor/theme.scss");

        let files = FilesConfig {
            exclude: vec!["**/vendor/**".to_string()],
            ..Default::default()
        };
        let found = discover_stylesheets(&[tmp.path().display().to_string()], &files).unwrap();
        let found = names(&found, tmp.path());
        assert_eq!(found, vec!["app.scss"]);
    }

    #[test]
    fn test_include_pattern_limits_directory_scan() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "styles/app.scss");
        touch(tmp.path(), "other/extra.scss");

        let files = FilesConfig {
            include: vec!["**/styles/**".to_string()],
            ..Default::default()
        };
        let found = discover_stylesheets(&[tmp.path().display().to_string()], &files).unwrap();
        let found = names(&found, tmp.path());
        assert_eq!(found, vec!["styles/app.scss"]);
    }

    #[test]
    fn test_gitignore_respected_when_enabled() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app.scss");
        touch(tmp.path(), "generated.scss");
        fs::write(tmp.path().join(".gitignore"), "generated.scss\n").unwrap();

        let respecting = FilesConfig::default();
        let found = discover_stylesheets(&[tmp.path().display().to_string()], &respecting).unwrap();
        assert_eq!(names(&found, tmp.path()), vec!["app.scss"]);

        let ignoring = FilesConfig {
            respect_gitignore: false,
            ..Default::default()
        };
        let found = discover_stylesheets(&[tmp.path().display().to_string()], &ignoring).unwrap();
        assert_eq!(names(&found, tmp.path()), vec!["app.scss", "generated.scss"]);
    }

    #[test]
    fn test_invalid_glob_reports_pattern() {
        let files = FilesConfig {
            exclude: vec!["[".to_string()],
            ..Default::default()
        };
        let err = discover_stylesheets(&[".".to_string()], &files).unwrap_err();
        assert!(err.contains("Invalid glob pattern"), "unexpected error: {err}");
    }

    #[test]
    fn test_hidden_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app.scss");
        touch(tmp.path(), ".cache/old.scss");

        let files = FilesConfig::default();
        let found = discover_stylesheets(&[tmp.path().display().to_string()], &files).unwrap();
        assert_eq!(names(&found, tmp.path()), vec!["app.scss"]);
    }

    #[test]
    fn test_explicit_non_stylesheet_is_skipped_with_warning() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes.txt");

        let files = FilesConfig::default();
        let explicit = tmp.path().join("notes.txt").display().to_string();
        let found = discover_stylesheets(&[explicit], &files).unwrap();
        assert!(found.is_empty());
    }
}
