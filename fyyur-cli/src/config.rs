//! Configuration: `~/.fyyur/config.toml` plus `.env` files
//!
//! Precedence, lowest first: built-in defaults, the config file,
//! environment variables, command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fyyur_server::db::pool::DEFAULT_MAX_CONNECTIONS;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fyyur.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Effective fyyur configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FyyurConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

impl FyyurConfig {
    /// Get config file path: ~/.fyyur/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fyyur/config.toml")
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content).context(format!("Failed to parse config file (invalid TOML): {:?}", path))
    }

    /// Apply `DATABASE_URL` and `FYYUR_BIND` from the environment.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(bind) = std::env::var("FYYUR_BIND") {
            self.server.bind = bind
                .parse()
                .context(format!("FYYUR_BIND is not a socket address: {}", bind))?;
        }
        Ok(self)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Load environment variables from .env files
///
/// Searches in order (first found wins per variable):
/// 1. Current directory (.env)
/// 2. ~/.fyyur/.env
///
/// Runs before tracing is set up, so the loaded paths are returned for the
/// caller to log.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(home_dir) = dirs::home_dir() {
        let env_file = home_dir.join(".fyyur").join(".env");
        // dotenvy doesn't overwrite existing vars
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded.push(env_file);
        }
    }

    loaded
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
}

pub fn run_config(args: ConfigArgs, path: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = FyyurConfig::load_from(path)?.with_env_overrides()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
