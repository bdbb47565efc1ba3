//! grape-hub entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use grape_hub::api::{create_router, with_cors, AppState};
use grape_hub::config::Config;
use grape_hub::grapes::InMemoryGrapeStore;
use grape_hub::hub::GrapeHub;
use grape_hub::metrics;
use grape_hub::utils::shutdown_signal;
use grape_hub::AppError;

/// HATEOAS grape API with a WebSocket change hub.
#[derive(Parser, Debug)]
#[command(name = "grape-hub")]
#[command(about = "Serve the grape collection and push change events to hub clients")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load().map_err(AppError::from)?;

    init_tracing(&config, args.verbose);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { port }) => cmd_serve(config, port).await,
        None => cmd_serve(config, None).await,
    }
}

fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("grape_hub=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if config.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("GRAPE HUB - CONFIGURATION CHECK");
    println!("======================================================================");

    match config.validate() {
        Ok(()) => {
            println!("Bind address:   {}", config.bind_addr());
            println!("Public host:    {}", config.public_host);
            println!("Hub capacity:   {}", config.hub_capacity);
            println!("CORS permissive: {}", config.cors_permissive);
            println!("Configuration OK");
            Ok(())
        }
        Err(reason) => {
            println!("Configuration INVALID: {}", reason);
            Err(AppError::InvalidConfig(reason).into())
        }
    }
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(mut config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    config.validate().map_err(AppError::InvalidConfig)?;

    let prometheus = metrics::install_recorder().map_err(AppError::from)?;
    metrics::init_metrics();

    let hub = GrapeHub::new(config.hub_capacity);
    let store = Arc::new(InMemoryGrapeStore::new());
    let app_state = AppState::with_hub(store, hub)
        .with_public_host(config.public_host.clone())
        .with_metrics(prometheus);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("HTTP server listening on {}", addr);

    let router = with_cors(create_router(app_state.clone()), config.cors_permissive);

    app_state.set_ready(true);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "HTTP server failed");
        return Err(AppError::from(e).into());
    }

    info!("HTTP server stopped");
    Ok(())
}
