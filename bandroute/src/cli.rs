use bandroute_core::store::IdScheme;
use clap::Parser;
use std::path::PathBuf;

/// Band site with list-to-detail album routing
#[derive(Parser, Debug)]
#[command(name = "bandroute")]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a bandroute.toml config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on (default: 127.0.0.1:3000)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// How new album ids are assigned: sequential, monotonic or uuid
    #[arg(long)]
    pub id_scheme: Option<IdScheme>,

    /// JSON file with the initial album list (default: built-in albums)
    #[arg(long)]
    pub seed_file: Option<PathBuf>,
}
