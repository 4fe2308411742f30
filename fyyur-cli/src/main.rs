//! fyyur CLI - run and configure the fyyur booking server
//!
//! - `serve`: start the HTTP server against a SQLite database
//! - `config`: locate or print the effective configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::FyyurConfig;
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "fyyur",
    author,
    version,
    about = "Venue and artist booking server",
    long_about = "List venues and artists, link them with shows, and serve it all as JSON \
                  over HTTP from a single SQLite file."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.fyyur/config.toml)
    #[arg(long, global = true, env = "FYYUR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Inspect fyyur configuration (path, show)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so .env values reach clap's `env` fallbacks
    let dotenv_files = config::load_dotenv();
    let cli = Cli::parse();

    init_tracing(&TracingConfig { debug: cli.debug })?;
    if dotenv_files.is_empty() {
        tracing::debug!("No .env files found (current dir or ~/.fyyur)");
    }
    for path in &dotenv_files {
        tracing::debug!("Loaded .env from {}", path.display());
    }

    let config_path = cli.config.unwrap_or_else(FyyurConfig::config_path);

    match cli.command {
        Commands::Serve(args) => {
            let file_config = FyyurConfig::load_from(&config_path)?;
            commands::serve::run_serve(args, file_config).await
        }
        Commands::Config(args) => config::run_config(args, &config_path),
    }
}
