//! Album sources
//!
//! A source is the data-loading boundary: it delivers the initial album list
//! once, before any page is served. Nothing here talks to the network.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::album::Album;
use crate::error::BandError;

#[async_trait]
pub trait AlbumSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<Album>, BandError>;
}

/// The built-in album list.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl FixtureSource {
    pub fn albums() -> Vec<Album> {
        vec![
            Album::new("1", "Black Sabbath", "1970"),
            Album::new("2", "Master of Reality", "1971"),
            Album::new("3", "Sabotage", "1975"),
            Album::new("4", "Kittens For Everyone!", "2022"),
        ]
    }
}

#[async_trait]
impl AlbumSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch(&self) -> Result<Vec<Album>, BandError> {
        Ok(Self::albums())
    }
}

/// Reads a JSON array of `{ "id", "title", "year" }` objects from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AlbumSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn fetch(&self) -> Result<Vec<Album>, BandError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| BandError::SourceIo {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_slice(&raw).map_err(|source| BandError::SourceFormat {
            path: self.path.clone(),
            source,
        })
    }
}
