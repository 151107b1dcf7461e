//! Vitrine - main entry point.
//!
//! Loads configuration, runs the initial keyword search so the first frame
//! already has a result set, and hands the terminal to the app.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vitrine_client::{Fetcher, HttpFetcher};
use vitrine_core::{AppConfig, QueryResultSet, API_KEY_ENV};
use vitrine_ui::{App, QueryOrchestrator, StateHandle};

/// Route diagnostics to a file; the terminal belongs to the UI.
fn init_tracing() {
    let Some(dir) = dirs::data_dir().map(|p| p.join("vitrine")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("vitrine.log")) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("vitrine: {error}");
            std::process::exit(1);
        }
    };
    if config.api_key.is_empty() {
        eprintln!("vitrine: no API key configured; set {API_KEY_ENV} or api_key in config.toml");
        std::process::exit(1);
    }

    let fetcher = Arc::new(HttpFetcher::new(&config));

    // The container owns the first result set; the views never initialize it.
    let initial = match fetcher.fetch_initial().await {
        Ok(results) => results,
        Err(error) => {
            tracing::warn!(%error, "initial query failed, starting empty");
            QueryResultSet::default()
        }
    };

    let state = StateHandle::new(initial);
    let orchestrator = QueryOrchestrator::new(fetcher, state.clone());

    if let Err(error) = App::new(state, orchestrator).run().await {
        eprintln!("vitrine: {error}");
        std::process::exit(1);
    }
}
