//! bandroute - the band site server
//!
//! ```bash
//! cargo run --bin bandroute -- --bind 127.0.0.1:3000
//! ```
//!
//! Then browse to `/albums` and click through to an album.

mod cli;
mod config;
mod telemetry;

use anyhow::{Context, Result};
use bandroute_core::prelude::*;
use bandroute_http::HttpIngress;
use clap::Parser;

use crate::cli::Cli;
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)?;
    telemetry::init_stdout_tracing(&config.log_filter);

    let source: Box<dyn AlbumSource> = match &config.seed_file {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(FixtureSource),
    };

    let session = Session::bootstrap(source.as_ref(), config.id_scheme)
        .await
        .context("failed to load the initial albums")?
        .shared();

    HttpIngress::new(session)?
        .bind(config.bind.clone())
        .body_limit(config.body_limit)
        .run()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("server on {} stopped with an error", config.bind))
}
