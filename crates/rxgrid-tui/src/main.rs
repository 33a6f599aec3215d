//! `rxgrid` — terminal viewer for a pharmaceutical product catalog.
//!
//! Loads drug records, the column layout, and the manufacturer list
//! from a read-only HTTP backend, then renders a filterable, paginated
//! table. All orchestration lives in `rxgrid-core`; this binary is one
//! presentation skin bound to the controller's state snapshots.
//!
//! Logs are written to a file (default `/tmp/rxgrid.log`) to avoid
//! corrupting the terminal UI.

mod app;
mod event;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rxgrid_core::{ApiClient, TableController, TransportConfig};

use crate::app::App;

/// Terminal viewer for the rxgrid drug catalog.
#[derive(Parser, Debug)]
#[command(name = "rxgrid", version, about)]
struct Cli {
    /// Backend base URL (e.g. http://localhost:3001/api)
    #[arg(short = 'u', long, env = "RXGRID_API_URL")]
    api_url: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/rxgrid.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application so logs flush on exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rxgrid={log_level},rxgrid_core={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("rxgrid.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build the controller from config file + environment + CLI flags.
fn build_controller(cli: &Cli) -> Result<TableController> {
    let mut config = rxgrid_config::load_config_or_default();
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }

    let base_url = config
        .base_url()
        .map_err(|e| eyre!("configuration error: {e}"))?;
    let transport = TransportConfig {
        timeout: config.timeout(),
    };
    let client = ApiClient::new(base_url, &transport)?;

    Ok(TableController::with_page_size(
        client,
        config.items_per_page,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let controller = build_controller(&cli)?;
    info!(
        url = cli.api_url.as_deref().unwrap_or("(from config)"),
        "starting rxgrid"
    );

    let mut app = App::new(controller);
    app.run().await?;

    Ok(())
}
