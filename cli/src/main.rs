//! Auth service CLI
//!
//! ```sh
//! # Run with default config (~/.config/auth-service/config.toml)
//! auth-service
//!
//! # Custom config path and port
//! auth-service --config /etc/auth-service/config.toml --port 50052
//!
//! # Validate config without starting
//! auth-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use auth_service::config::AppConfig;
use auth_service::server::{init_tracing, ServerHandle, ServerOptions};

/// User account registry serving user_v1.UserV1.
#[derive(Parser, Debug)]
#[command(
    name = "auth-service",
    version,
    about = "User account registry serving user_v1.UserV1",
    long_about = "Create and fetch user accounts stored in PostgreSQL.\n\n\
                  Default config: ~/.config/auth-service/config.toml\n\
                  Environment overrides: GRPC_HOST, GRPC_PORT, PG_DSN"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "AUTH_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(auth_service::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {e}");
            return Err(e.into());
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.redacted_url());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.wait().await;

    Ok(())
}
