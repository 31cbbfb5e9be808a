//! objectgate CLI
//!
//! Command-line interface for running and configuring the gateway.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use objectgate::{store, Config, GatewayServer};

#[derive(Parser)]
#[command(name = "objectgate")]
#[command(author = "Wolf Software Systems Ltd")]
#[command(version)]
#[command(about = "HTTP gateway for object storage uploads, deletes, and serving", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "/etc/objectgate/config.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gateway server
    Serve,

    /// Write a default configuration file
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Serve => {
            // Load config if it exists
            let mut config = if cli.config.exists() {
                match Config::load(&cli.config) {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                info!("No config file found, using defaults");
                Config::default()
            };

            // ACCESS_KEY / SECRET_KEY from the environment take precedence
            config.apply_env_overrides();

            if config.credentials.access_key.is_empty() || config.credentials.secret_key.is_empty()
            {
                warn!("Gateway credentials are empty; every upload and delete will be rejected");
            }

            let store = match store::build_store(&config.store) {
                Ok(s) => s,
                Err(e) => {
                    error!("Failed to create store backend: {}", e);
                    std::process::exit(1);
                }
            };

            let server = GatewayServer::new(
                config.server.bind.clone(),
                store,
                config.credentials.clone(),
                config.server.max_upload_bytes,
            );

            if let Err(e) = server.run().await {
                error!("Server failed: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Init => {
            info!("Writing default configuration to {:?}", cli.config);

            if let Some(parent) = cli.config.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    error!("Failed to create {:?}: {}", parent, e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = Config::default().save(&cli.config) {
                error!("Failed to write config: {}", e);
                std::process::exit(1);
            }

            info!("Configuration written. Set [credentials] before serving.");
        }
    }
}
