use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Files or directories to format (use '-' for stdin)
    #[arg(required = false)]
    pub paths: Vec<String>,

    /// Exit with code 1 if any file would be reformatted, without writing (for CI)
    #[arg(long, help = "Exit with code 1 if any file would be reformatted, without writing (for CI)")]
    pub check: bool,

    /// Read from stdin and write the result to stdout
    #[arg(long, help = "Read from stdin and write the result to stdout")]
    pub stdin: bool,

    /// Filename to use for stdin input (picks the dialect and labels messages)
    #[arg(long, help = "Filename to use when reading from stdin (e.g., main.scss)")]
    pub stdin_filename: Option<String>,

    /// Dialect for stdin input when no filename is given
    #[arg(long, value_parser = ["scss", "sass", "css"],
          help = "Stylesheet dialect for stdin input: scss (default), sass, or css")]
    pub syntax: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory containing the sass-convert executable
    #[arg(long, help = "Directory containing the sass-convert executable (overrides sass-path in config)")]
    pub sass_path: Option<String>,

    /// Indentation override: a space count, or "t" for hard tabs
    #[arg(long)]
    pub indent: Option<String>,

    /// Converter timeout in milliseconds (0 disables the bound)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Respect .gitignore files when scanning directories
    /// When not specified, uses config file value (default: true)
    #[arg(
        long,
        num_args(0..=1),
        require_equals(true),
        default_missing_value = "true",
        help = "Respect .gitignore files when scanning directories (does not apply to explicitly provided paths)"
    )]
    pub respect_gitignore: Option<bool>,

    /// Print diagnostics, but no per-file progress
    #[arg(short, long, help = "Print diagnostics, but no per-file progress")]
    pub quiet: bool,

    /// Disable all output (but still exit with the corresponding status code)
    #[arg(short, long, help = "Disable all output (but still exit with the corresponding status code)")]
    pub silent: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the path of the configuration file in use
    File,

    /// Print a single configuration value
    Get {
        /// Configuration key, e.g. `indent` or `files.exclude`
        key: String,
    },
}
