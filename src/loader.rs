use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use reqwest::{
    StatusCode, Url,
    header::{CACHE_CONTROL, PRAGMA},
};
use serde_json::Value;
use tokio::sync::oneshot;

use crate::app_record::Catalog;
use crate::constants::CATALOG_PATH;
use crate::fl;

const FALLBACK_CATALOG: &str = include_str!("../res/apps.json");

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no catalog source configured")]
    NoSource,
    #[error("invalid catalog url {url:?}: {reason}")]
    Url { url: String, reason: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(StatusCode),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(serde_json::Error),
    #[error("catalog must be a list or an object with an \"apps\" list")]
    Shape,
    #[error("catalog entry is invalid: {0}")]
    Record(serde_json::Error),
    #[error("catalog is empty")]
    Empty,
}

/// Where the catalog document comes from
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CatalogSource {
    /// `/apps.json` below this base URL
    Remote(String),
    File(PathBuf),
    None,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(base) => write!(f, "{}", base),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::None => write!(f, "<none>"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    /// Loaded from the configured source
    Remote,
    /// Bundled catalog substituted after a failed load
    Fallback,
}

#[derive(Clone, Debug)]
pub struct LoadedCatalog {
    pub apps: Catalog,
    pub origin: CatalogOrigin,
    /// Message for the user when the fallback catalog is shown
    pub advisory: Option<String>,
}

impl LoadedCatalog {
    fn fallback() -> Self {
        Self {
            apps: fallback_catalog(),
            origin: CatalogOrigin::Fallback,
            advisory: Some(fl!("fallback-advisory")),
        }
    }
}

/// Parse a catalog document: either a list of records or an object holding
/// the list under `apps`. An empty list is an error.
pub fn parse_catalog(data: &[u8]) -> Result<Catalog, LoadError> {
    let value: Value = serde_json::from_slice(data).map_err(LoadError::Json)?;
    let list = match value {
        Value::Array(list) => list,
        Value::Object(mut object) => match object.remove("apps") {
            Some(Value::Array(list)) => list,
            _ => return Err(LoadError::Shape),
        },
        _ => return Err(LoadError::Shape),
    };
    if list.is_empty() {
        return Err(LoadError::Empty);
    }
    serde_json::from_value(Value::Array(list)).map_err(LoadError::Record)
}

/// The catalog shipped with the binary
pub fn fallback_catalog() -> Catalog {
    match parse_catalog(FALLBACK_CATALOG.as_bytes()) {
        Ok(apps) => apps,
        Err(err) => {
            log::error!("bundled catalog is invalid: {}", err);
            Vec::new()
        }
    }
}

#[derive(Clone, Debug)]
pub struct CatalogLoader {
    source: CatalogSource,
    timeout: Duration,
    system_proxy: bool,
}

impl CatalogLoader {
    pub fn new(source: CatalogSource, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            system_proxy: true,
        }
    }

    /// Ignore proxy settings from the environment
    pub fn no_proxy(mut self) -> Self {
        self.system_proxy = false;
        self
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    fn catalog_url(base: &str) -> Result<Url, LoadError> {
        Url::parse(base)
            .and_then(|base| base.join(CATALOG_PATH))
            .map_err(|err| LoadError::Url {
                url: base.to_string(),
                reason: err.to_string(),
            })
    }

    async fn fetch_remote(&self, base: &str) -> Result<Catalog, LoadError> {
        let url = Self::catalog_url(base)?;
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if !self.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        log::info!("downloading catalog from {}", url);
        let response = client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LoadError::Status(response.status()));
        }

        let bytes = response.bytes().await?;
        parse_catalog(&bytes)
    }

    async fn fetch_file(&self, path: &Path) -> Result<Catalog, LoadError> {
        log::info!("reading catalog from {:?}", path);
        let data = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_catalog(&data)
    }

    async fn fetch(&self) -> Result<Catalog, LoadError> {
        match &self.source {
            CatalogSource::Remote(base) => self.fetch_remote(base).await,
            CatalogSource::File(path) => self.fetch_file(path).await,
            CatalogSource::None => Err(LoadError::NoSource),
        }
    }

    /// Load the catalog, substituting the bundled one on any failure
    pub async fn load(&self) -> LoadedCatalog {
        let start = Instant::now();
        match self.fetch().await {
            Ok(apps) => {
                log::info!(
                    "loaded {} apps from {} in {:?}",
                    apps.len(),
                    self.source,
                    start.elapsed()
                );
                LoadedCatalog {
                    apps,
                    origin: CatalogOrigin::Remote,
                    advisory: None,
                }
            }
            Err(err) => {
                log::warn!(
                    "failed to load catalog from {}, using bundled catalog: {}",
                    self.source,
                    err
                );
                LoadedCatalog::fallback()
            }
        }
    }
}

/// Shared flag telling a running load that its consumer went away
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A load running in the background
pub struct LoadHandle {
    cancel: CancelFlag,
    receiver: oneshot::Receiver<LoadedCatalog>,
}

impl LoadHandle {
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Result of the load, or `None` once cancelled
    pub async fn wait(self) -> Option<LoadedCatalog> {
        let Self { cancel, receiver } = self;
        if cancel.is_cancelled() {
            return None;
        }
        let loaded = receiver.await.ok()?;
        if cancel.is_cancelled() {
            return None;
        }
        Some(loaded)
    }
}

pub fn spawn_load(loader: CatalogLoader) -> LoadHandle {
    let cancel = CancelFlag::default();
    let (sender, receiver) = oneshot::channel();
    let task_cancel = cancel.clone();
    tokio::spawn(async move {
        let loaded = loader.load().await;
        if task_cancel.is_cancelled() {
            log::debug!("catalog load from {} cancelled", loader.source());
            return;
        }
        let _ = sender.send(loaded);
    });
    LoadHandle { cancel, receiver }
}
