//! Output routing for the sassfmt CLI
//!
//! Formatted stylesheet text always goes to stdout; progress and summary
//! lines go through this writer so `--quiet`/`--silent` and stderr routing
//! stay consistent across commands.

use std::io::{self, Write};

/// Output writer that handles stdout/stderr routing
pub struct OutputWriter {
    use_stderr: bool,
    silent: bool,
}

impl OutputWriter {
    pub fn new(use_stderr: bool, silent: bool) -> Self {
        Self { use_stderr, silent }
    }

    /// Write output to the appropriate stream
    pub fn write(&self, content: &str) -> io::Result<()> {
        if self.silent {
            return Ok(());
        }

        if self.use_stderr {
            eprint!("{content}");
            io::stderr().flush()?;
        } else {
            print!("{content}");
            io::stdout().flush()?;
        }
        Ok(())
    }

    /// Write a line to the appropriate stream
    pub fn writeln(&self, content: &str) -> io::Result<()> {
        if self.silent {
            return Ok(());
        }

        if self.use_stderr {
            eprintln!("{content}");
        } else {
            println!("{content}");
        }
        Ok(())
    }

    /// Write error output (always to stderr unless silent)
    pub fn write_error(&self, content: &str) -> io::Result<()> {
        if self.silent {
            return Ok(());
        }

        eprintln!("{content}");
        Ok(())
    }
}
