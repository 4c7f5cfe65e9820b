use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::RecvTimeoutError;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{self, CatalogError};
use crate::clock::{Clock, SystemClock};
use crate::config::{self, Config, ConfigError};
use crate::contract::SearchResultDto;
use crate::hotkey::HotkeyError;
use crate::hotkey_runtime::HotkeyHub;
use crate::model::DocumentIndex;
use crate::mount::MountedPalette;
use crate::search::search;
use crate::transport;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("hotkey error: {0}")]
    Hotkey(#[from] HotkeyError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "docpalette-core",
    about = "Search palette controller for the learn portal",
    version
)]
pub struct CliOptions {
    /// Config file (TOML). Defaults to the temp-dir location.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog file (.json, .json5, or .toml). Overrides `catalog_path` from the config.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Print the results for one query as JSON and exit.
    #[arg(long)]
    pub query: Option<String>,
}

pub fn parse_cli_args<I, T>(args: I) -> Result<CliOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliOptions::try_parse_from(args)
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config.as_deref())?;
    crate::logging::init(&config.log_filter);
    info!(
        hotkey = %config.hotkey,
        config_path = %config.config_path.display(),
        "startup"
    );

    let index = resolve_index(&config, options.catalog)?;
    info!(entries = index.len(), "index ready");

    if let Some(query) = options.query {
        let results: Vec<SearchResultDto> = search(index.entries(), &query)
            .into_iter()
            .map(SearchResultDto::from)
            .collect();
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", serde_json::to_string(&results)?)?;
        return Ok(());
    }

    run_event_loop(&config, index)
}

fn resolve_index(config: &Config, catalog_override: Option<PathBuf>) -> Result<DocumentIndex, RuntimeError> {
    match catalog_override.or_else(|| config.catalog_path.clone()) {
        Some(path) => Ok(catalog::load_catalog(&path)?),
        None => Ok(catalog::builtin_catalog()?),
    }
}

/// One request per stdin line, one response per stdout line. A deferred close that
/// fires between lines pushes an extra snapshot line.
fn run_event_loop(config: &Config, index: DocumentIndex) -> Result<(), RuntimeError> {
    let clock = SystemClock::default();
    let hub = HotkeyHub::default();
    let palette = MountedPalette::mount(&hub, index, config, Box::new(clock.clone()))?;

    let (tx, rx) = crossbeam_channel::unbounded::<std::io::Result<String>>();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut stdout = std::io::stdout().lock();
    info!("event loop running");
    loop {
        let received = match palette.controller().next_deadline() {
            Some(due_at) => rx.recv_timeout(due_at.saturating_sub(clock.now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let response = transport::handle_json(&hub, &palette, &line);
                writeln!(stdout, "{response}")?;
                stdout.flush()?;
            }
            Err(RecvTimeoutError::Timeout) => {
                if palette.controller_mut().tick() {
                    writeln!(stdout, "{}", transport::snapshot_json(&palette))?;
                    stdout.flush()?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                debug!("stdin closed");
                break;
            }
        }
    }

    palette.unmount();
    info!(listeners = hub.listener_count(), "event loop stopped");
    Ok(())
}
