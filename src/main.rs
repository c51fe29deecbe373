use clap::{Parser, Subcommand};
use clap_complete::Shell;

mod cli_types;
mod cli_utils;
mod commands;
mod files;

use cli_types::{ConfigSubcommand, FmtArgs};

#[derive(Parser)]
#[command(
    name = "sassfmt",
    author,
    version,
    about = "Format Sass, SCSS and CSS files with sass-convert",
    long_about = None
)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format stylesheet files in place, or stdin to stdout
    #[command(visible_alias = "format")]
    Fmt(FmtArgs),

    /// Start the Language Server Protocol server
    Server {
        /// TCP port to listen on (uses stdio when omitted)
        #[arg(long)]
        port: Option<u16>,

        /// Use stdio transport (the default; accepted for editor launch configs)
        #[arg(long)]
        stdio: bool,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,
    },

    /// Show the effective configuration
    Config {
        #[command(subcommand)]
        subcmd: Option<ConfigSubcommand>,

        /// Show built-in defaults instead of the loaded configuration
        #[arg(long)]
        defaults: bool,

        /// Output format
        #[arg(long, value_parser = ["toml", "json"], default_value = "toml")]
        output: String,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Create a default .sassfmt.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the JSON schema for the configuration file
    Schema,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (auto-detected when omitted)
        shell: Option<Shell>,

        /// List available shells
        #[arg(long)]
        list: bool,
    },

    /// Print version information
    Version,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Fmt(args) => commands::fmt::handle_fmt(args),
        Commands::Server { port, stdio, config } => commands::server::handle_server(port, stdio, cli.verbose, config),
        Commands::Config {
            subcmd,
            defaults,
            output,
            config,
        } => commands::config::handle_config(subcmd, defaults, &output, config.as_deref()),
        Commands::Init { force } => commands::init::handle_init(force),
        Commands::Schema => commands::schema::handle_schema(),
        Commands::Completions { shell, list } => commands::completions::handle_completions(shell, list),
        Commands::Version => commands::version::handle_version(),
    }
}
