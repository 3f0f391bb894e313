//! View, sort and filter choices remembered between sessions

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::{Serialize, de::DeserializeOwned};

use crate::constants::{ALL_CATEGORIES, STATE_PREFIX};
use crate::search::{CatalogQuery, SortMode, ViewMode};

const QUERY_KEY: &str = "query";
const SORT_MODE_KEY: &str = "sort-mode";
const VIEW_MODE_KEY: &str = "view-mode";
const CATEGORY_KEY: &str = "category";

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("no data directory available")]
    NoDirectory,
    #[error("failed to access {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Durable string-keyed storage, last write wins
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StateError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError>;
}

/// One file per key below a directory
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the user's data directory
    pub fn user() -> Result<Self, StateError> {
        let dir = dirs::data_dir().ok_or(StateError::NoDirectory)?;
        Ok(Self::new(dir.join(STATE_PREFIX)))
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        let path = self.path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StateError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        let path = self.path(key);
        std::fs::create_dir_all(&self.dir).map_err(|source| StateError::Io {
            path: self.dir.clone(),
            source,
        })?;
        AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(value.as_bytes()))
            .map_err(|err| {
                let source = match err {
                    atomicwrites::Error::Internal(err) | atomicwrites::Error::User(err) => err,
                };
                StateError::Io { path, source }
            })
    }
}

/// Store that forgets everything on exit
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A value mirrored into a [`KeyValueStore`] under a prefixed key
#[derive(Clone, Debug)]
struct Persisted<T> {
    key: String,
    value: T,
}

impl<T: Serialize + DeserializeOwned> Persisted<T> {
    fn load(store: &dyn KeyValueStore, name: &str, default: T) -> Self {
        let key = format!("{}.{}", STATE_PREFIX, name);
        let value = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    log::debug!("ignoring corrupt state {:?}: {}", key, err);
                    default
                }
            },
            Ok(None) => default,
            Err(err) => {
                log::debug!("failed to read state {:?}: {}", key, err);
                default
            }
        };
        Self { key, value }
    }

    fn set(&mut self, store: &mut dyn KeyValueStore, value: T) {
        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(err) = store.set(&self.key, &raw) {
                    log::warn!("failed to save state {:?}: {}", self.key, err);
                }
            }
            Err(err) => log::warn!("failed to serialize state {:?}: {}", self.key, err),
        }
        self.value = value;
    }
}

/// UI choices of the catalog view, each persisted as soon as it changes
pub struct UiState {
    store: Box<dyn KeyValueStore>,
    query: Persisted<String>,
    sort_mode: Persisted<SortMode>,
    view_mode: Persisted<ViewMode>,
    category: Persisted<String>,
}

impl UiState {
    /// Read every field from `store`, defaulting what is missing or unreadable
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let query = Persisted::load(store.as_ref(), QUERY_KEY, String::new());
        let sort_mode = Persisted::load(store.as_ref(), SORT_MODE_KEY, SortMode::default());
        let view_mode = Persisted::load(store.as_ref(), VIEW_MODE_KEY, ViewMode::default());
        let category = Persisted::load(
            store.as_ref(),
            CATEGORY_KEY,
            ALL_CATEGORIES.to_string(),
        );
        Self {
            store,
            query,
            sort_mode,
            view_mode,
            category,
        }
    }

    pub fn query(&self) -> &str {
        &self.query.value
    }

    pub fn set_query(&mut self, query: String) {
        self.query.set(self.store.as_mut(), query);
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode.value
    }

    pub fn set_sort_mode(&mut self, sort_mode: SortMode) {
        self.sort_mode.set(self.store.as_mut(), sort_mode);
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode.value
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode.set(self.store.as_mut(), view_mode);
    }

    pub fn category(&self) -> &str {
        &self.category.value
    }

    pub fn set_category(&mut self, category: String) {
        self.category.set(self.store.as_mut(), category);
    }

    /// Put every field back to its default
    pub fn reset(&mut self) {
        self.set_query(String::new());
        self.set_sort_mode(SortMode::default());
        self.set_view_mode(ViewMode::default());
        self.set_category(ALL_CATEGORIES.to_string());
    }

    pub fn catalog_query(&self, root_domain: &str) -> CatalogQuery {
        CatalogQuery {
            text: self.query().to_string(),
            category: self.category().to_string(),
            sort_mode: self.sort_mode(),
            root_domain: root_domain.to_string(),
        }
    }
}
