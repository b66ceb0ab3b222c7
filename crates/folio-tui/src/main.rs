//! Folio TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Open on the home page
//! folio-tui
//!
//! # Open on the contact page, logging to a file
//! RUST_LOG=debug folio-tui --path /contact --log-file folio.log
//! ```

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use clap::Parser;
use folio_core::{
    config::{DEFAULT_INITIAL_PATH, SiteConfig},
    router::RouteTable,
};
use folio_tui::{Runtime, SystemEnv, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Folio portfolio in the terminal
#[derive(Parser, Debug)]
#[command(name = "folio-tui")]
#[command(about = "Browse the Folio portfolio site in a terminal")]
#[command(version)]
struct Args {
    /// Route to open on
    #[arg(short, long, default_value = DEFAULT_INITIAL_PATH)]
    path: String,

    /// Redraw interval in milliseconds
    #[arg(long, default_value = "50")]
    tick_ms: u64,

    /// Write logs to this file. Logs are discarded otherwise, since the
    /// terminal belongs to the UI.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Install a file subscriber. Without a file no subscriber is installed and
/// every event is dropped.
fn init_logging(log_file: Option<&Path>) -> Result<(), std::io::Error> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);

    tracing_subscriber::registry().with(filter).with(layer).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = SiteConfig { initial_path: args.path, ..SiteConfig::default() };
    // Fail before the terminal switches to raw mode
    config.validate(&RouteTable::standard())?;

    tracing::info!(path = %config.initial_path, tick_ms = args.tick_ms, "folio starting");

    let driver = TerminalDriver::new(Duration::from_millis(args.tick_ms.max(1)))?;
    let runtime = Runtime::new(driver, SystemEnv::new(), config)?;
    runtime.run().await?;

    tracing::info!("folio stopped");
    Ok(())
}
