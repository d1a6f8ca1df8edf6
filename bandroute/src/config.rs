//! `bandroute.toml`
//!
//! ```toml
//! bind = "0.0.0.0:8080"
//! id_scheme = "monotonic"     # sequential | monotonic | uuid
//! seed_file = "albums.json"   # omit to use the built-in albums
//! body_limit = 16384
//! log_filter = "info,bandroute_http=debug"
//! ```
//!
//! Every key is optional. Command-line flags win over the file and
//! `RUST_LOG` wins over `log_filter`.

use bandroute_core::store::IdScheme;
use bandroute_http::ingress::{DEFAULT_ADDR, DEFAULT_BODY_LIMIT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_LOG_FILTER: &str = "info,bandroute=debug";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub bind: String,
    pub id_scheme: IdScheme,
    pub seed_file: Option<PathBuf>,
    pub body_limit: usize,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_ADDR.to_string(),
            id_scheme: IdScheme::default(),
            seed_file: None,
            body_limit: DEFAULT_BODY_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the config file (if any), then CLI flags.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(bind) = &cli.bind {
            config.bind = bind.clone();
        }
        if let Some(scheme) = cli.id_scheme {
            config.id_scheme = scheme;
        }
        if let Some(seed) = &cli.seed_file {
            config.seed_file = Some(seed.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.id_scheme, IdScheme::Sequential);
    }

    #[test]
    fn file_values_are_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bind = \"0.0.0.0:8080\"\nid_scheme = \"monotonic\"\nseed_file = \"albums.json\""
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.id_scheme, IdScheme::Monotonic);
        assert_eq!(config.seed_file, Some(PathBuf::from("albums.json")));
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 3000").unwrap();
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn cli_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind = \"0.0.0.0:8080\"\nid_scheme = \"uuid\"").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from([
            "bandroute",
            "--config",
            path,
            "--bind",
            "127.0.0.1:9000",
        ]);
        let config = AppConfig::resolve(&cli).unwrap();

        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.id_scheme, IdScheme::Uuid);
    }
}
