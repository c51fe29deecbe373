#![allow(dead_code)]

//! Shared helpers for CLI integration tests.
//!
//! The converter-driven tests never require a real sass-convert install.
//! They drop a small shell script named `sass-convert` into a temporary
//! directory and put that directory at the front of `PATH`.

use std::path::{Path, PathBuf};

/// Script body that answers `--version` and otherwise copies stdin to stdout
/// unchanged.
#[cfg(unix)]
pub const PASSTHROUGH: &str = r#"for arg in "$@"; do
  if [ "$arg" = "--version" ]; then
    echo "Ruby Sass 3.7.4"
    exit 0
  fi
done
cat"#;

/// Script body that records its arguments (one per line) to `$ARGS_FILE`
/// before copying stdin through.
#[cfg(unix)]
pub const ARGS_DUMP: &str = r#"for arg in "$@"; do
  if [ "$arg" = "--version" ]; then
    echo "Ruby Sass 3.7.4"
    exit 0
  fi
done
printf '%s\n' "$@" > "$ARGS_FILE"
cat"#;

/// Script body that strips every space, so any input containing a space
/// comes back different.
#[cfg(unix)]
pub const SPACE_STRIPPER: &str = r#"for arg in "$@"; do
  if [ "$arg" = "--version" ]; then
    echo "Ruby Sass 3.7.4"
    exit 0
  fi
done
tr -d ' '"#;

/// Script body that fails the way sass-convert does: a banner line, the
/// real error, and a backtrace hint on stderr.
#[cfg(unix)]
pub const FAILING: &str = r#"for arg in "$@"; do
  if [ "$arg" = "--version" ]; then
    echo "Ruby Sass 3.7.4"
    exit 0
  fi
done
cat > /dev/null
echo 'DEPRECATION WARNING: sass-convert is deprecated' >&2
echo 'Error: Invalid CSS after "a {": expected "}"' >&2
echo '  Use --trace for backtrace.' >&2
exit 65"#;

/// Script body that hangs long enough to trip any sub-second timeout.
#[cfg(unix)]
pub const SLEEPER: &str = r#"for arg in "$@"; do
  if [ "$arg" = "--version" ]; then
    echo "Ruby Sass 3.7.4"
    exit 0
  fi
done
sleep 5
cat"#;

/// Install a fake `sass-convert` script into `dir` and return its path.
#[cfg(unix)]
pub fn install_fake_converter(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("sass-convert");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// PATH value that resolves `sass-convert` to `fake_dir` first.
pub fn path_with(fake_dir: &Path) -> String {
    let existing = std::env::var("PATH").unwrap_or_default();
    format!("{}:{existing}", fake_dir.display())
}
