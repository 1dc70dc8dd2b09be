#![forbid(unsafe_code)]

mod color;
mod config;
mod constants;
mod gui;
mod persistence;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::ConfigStore;
use constants::timing;
use gui::LaunchOptions;
use persistence::{FileStorage, MemoryStorage, SettingsStorage};

/// Device mockup configurator
#[derive(Debug, Parser)]
#[command(name = "mockup-studio", version, about)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH", conflicts_with = "ephemeral")]
    settings: Option<PathBuf>,

    /// Keep settings in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Restore default settings before launching
    #[arg(long)]
    reset: bool,

    /// Enter fullscreen once the window is up
    #[arg(long)]
    fullscreen: bool,

    /// Keep the website URL editable while in fullscreen
    #[arg(long)]
    allow_url_edit_in_fullscreen: bool,

    /// Print the layer stack of the saved settings as JSON and exit
    #[arg(long)]
    dump_composition: bool,

    /// trace, debug, info, warn or error (defaults to $LOG_LEVEL, then info)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn parse_log_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn open_storage(cli: &Cli) -> Box<dyn SettingsStorage> {
    if cli.ephemeral {
        info!("Settings kept in memory only");
        return Box::new(MemoryStorage::new());
    }
    let storage = match &cli.settings {
        Some(path) => FileStorage::new(path.clone()),
        None => FileStorage::default(),
    };
    info!(path = %storage.path().display(), "Using settings file");
    Box::new(storage)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .map(|level| parse_log_level(&level))
        .unwrap_or(TraceLevel::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install log subscriber")?;

    let mut store = ConfigStore::open(open_storage(&cli)).with_debounce(timing::PERSIST_DEBOUNCE);
    if cli.reset {
        store.reset();
    }

    if cli.dump_composition {
        let session = session::Session::new(std::time::Instant::now());
        let composition = render::compose(store.config(), &session.render_context());
        let dump = serde_json::json!({
            "composition": composition,
            "styles": composition.style_sheet(),
        });
        let json = serde_json::to_string_pretty(&dump).context("Failed to serialize composition")?;
        println!("{json}");
        return Ok(());
    }

    gui::run_gui(
        store,
        LaunchOptions {
            start_fullscreen: cli.fullscreen,
            allow_url_edit_in_fullscreen: cli.allow_url_edit_in_fullscreen,
        },
    )
}
