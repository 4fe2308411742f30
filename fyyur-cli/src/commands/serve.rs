//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use fyyur_server::db::create_pool_with_options;
use fyyur_server::http::{run_server, ServerConfig};

use crate::config::FyyurConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:5000)
    #[arg(long, short = 'b', env = "FYYUR_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl ServeArgs {
    /// Layer flags over the file configuration.
    pub fn resolve(self, mut config: FyyurConfig) -> FyyurConfig {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: FyyurConfig) -> Result<()> {
    let config = args.resolve(config);

    tracing::info!("Starting fyyur server on {}", config.server.bind);

    let pool = create_pool_with_options(&config.database.url, config.database.max_connections)
        .await
        .context(format!("Failed to open database {}", config.database.url))?;

    let server_config = ServerConfig {
        bind_addr: config.server.bind,
        cors_permissive: config.server.cors_permissive,
    };

    // Blocks until shutdown
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
