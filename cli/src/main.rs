//! Resort booking engine, CLI server
//!
//! ```sh
//! # Run with default config (~/.config/resort-booking/config.toml)
//! resort-booking
//!
//! # Custom config path and port
//! resort-booking --config /etc/resort-booking/config.toml --port 9000
//!
//! # Throwaway in-memory instance
//! resort-booking --in-memory --log-level debug
//!
//! # Validate config without starting
//! resort-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use resort_booking::config::{AppConfig, StorageBackend};
use resort_booking::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "resort-booking",
    version,
    about = "Resort booking engine: availability, pricing and booking lifecycle",
    long_about = "REST API server for resort room availability, pricing and bookings.\n\n\
                  Default config: ~/.config/resort-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML). Defaults to
    /// `$RESORT_BOOKING_CONFIG`, then ~/.config/resort-booking/config.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Keep everything in memory instead of SQLite.
    #[arg(long)]
    in_memory: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(resort_booking::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.in_memory {
        config.database.backend = StorageBackend::Memory;
    }
    config.validate()?;

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Storage     : {}", config.database.connection_url());
        println!("   Currency    : {}", config.booking.currency);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
