//! Laporan TD Penyiaran: CLI server
//!
//! Headless broadcast report service, runnable as a systemd service,
//! Docker container or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/siaran-report/config.toml)
//! siaran-report
//!
//! # Custom config path
//! siaran-report --config /etc/siaran-report/config.toml
//!
//! # Override the API port
//! siaran-report --api-port 8080
//!
//! # Validate config without starting
//! siaran-report --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use siaran_report::config::AppConfig;
use siaran_report::server::{init_tracing, ServerHandle, ServerOptions};

/// Broadcast quality reports for TVRI technical directors.
#[derive(Parser, Debug)]
#[command(
    name = "siaran-report",
    version,
    about = "Laporan TD Penyiaran report service",
    long_about = "REST API for recording broadcast shift reports, \
                  with spreadsheet and PDF exports.\n\n\
                  Default config: ~/.config/siaran-report/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SIARAN_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(siaran_report::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Station     : {}", config.export.station_name);
        println!("   Staff       : {}", config.reports.staff_roster.join(", "));
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
