//! Trivia question API entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trivia_api::api::{create_router, AppState};
use trivia_api::config::Config;
use trivia_api::metrics;
use trivia_api::report::DataReport;
use trivia_api::service::QuestionService;
use trivia_api::store::JsonFileStore;
use trivia_api::utils::shutdown_signal;
use trivia_api::AppError;

/// Trivia question API.
#[derive(Parser, Debug)]
#[command(name = "trivia-api")]
#[command(about = "Serves trivia questions from JSON files over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the question files (overrides DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load every question file and report what was found.
    CheckData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let mut config = Config::load().map_err(AppError::from)?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if args.verbose {
        config.verbose = true;
    }

    // Initialize logging
    let filter = if config.verbose {
        EnvFilter::new("trivia_api=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckData) => cmd_check_data(&config),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Load every question file and print per-file and per-category counts.
fn cmd_check_data(config: &Config) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&config.data_dir);
    let report = DataReport::collect(&store).map_err(AppError::from)?;

    println!("{}", report);
    Ok(())
}

/// Load the questions and serve them until shutdown.
async fn cmd_serve(mut config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    config.validate().map_err(AppError::InvalidConfig)?;

    let handle = match metrics::install_recorder() {
        Ok(handle) => {
            metrics::spawn_upkeep(handle.clone(), metrics::UPKEEP_INTERVAL);
            Some(handle)
        }
        Err(e) => {
            warn!(error = %e, "Prometheus recorder not installed");
            None
        }
    };

    info!(data_dir = %config.data_dir.display(), "Loading questions");
    let store = Arc::new(JsonFileStore::new(&config.data_dir));
    let service = QuestionService::load(store).map_err(AppError::from)?;

    let mut state = AppState::new(Arc::new(service));
    if let Some(handle) = handle {
        state = state.with_metrics(handle);
    }
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;
    let listener = TcpListener::bind(addr).await?;
    info!("API lista en puerto {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
