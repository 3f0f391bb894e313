use std::path::PathBuf;

use clap::Parser;

use crate::search::{SortMode, ViewMode};

/// Browse the app catalog
#[derive(Debug, Default, Parser)]
#[command(version)]
pub struct Cli {
    /// Site serving /apps.json
    #[arg(long, conflicts_with = "file")]
    pub base_url: Option<String>,
    /// Read the catalog from a local file instead
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Domain whose subdomains name the apps
    #[arg(long)]
    pub root_domain: Option<String>,
    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Ignore proxy settings from the environment
    #[arg(long)]
    pub no_proxy: bool,
    /// Search text (remembered)
    #[arg(long, short)]
    pub query: Option<String>,
    /// Category to show, or "all" (remembered)
    #[arg(long, short)]
    pub category: Option<String>,
    /// Ordering (remembered)
    #[arg(long, short, value_enum)]
    pub sort: Option<SortMode>,
    /// Layout (remembered)
    #[arg(long, short, value_enum)]
    pub view: Option<ViewMode>,
    /// Forget remembered choices before applying the others
    #[arg(long)]
    pub reset: bool,
    /// Print the derived catalog as JSON
    #[arg(long)]
    pub json: bool,
}
