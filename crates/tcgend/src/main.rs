//! tcgend - QA test-case generation daemon.
//!
//! Accepts planning-document PDFs over HTTP, asks a Gemini model for a
//! 13-column test-case table and returns the parsed rows as a preview
//! or as a styled spreadsheet download.

mod config;
mod gemini;
mod pdf;
mod routes;
mod server;

use anyhow::Result;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("tcgend v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load()?;
    let gemini = gemini::GeminiClient::new(&config)?;
    info!("Using model {}", config.model);

    server::run(server::AppState::new(config, gemini)).await
}
