//! Query and result types for the catalog pipeline

use serde::{Deserialize, Serialize};

use crate::app_record::AppRecord;
use crate::constants::{ALL_CATEGORIES, DEFAULT_ROOT_DOMAIN};

/// Catalog sorting mode
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// By sort key (subdomain or host)
    #[default]
    Name,
    /// By category, then by sort key
    #[value(alias = "category")]
    CategoryName,
}

/// Catalog layout
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Grouped,
    Flat,
}

/// Inputs of the pipeline besides the catalog itself
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CatalogQuery {
    pub text: String,
    pub category: String,
    pub sort_mode: SortMode,
    pub root_domain: String,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_mode: SortMode::default(),
            root_domain: DEFAULT_ROOT_DOMAIN.to_string(),
        }
    }
}

/// Records sharing one category key, in sorted order
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub apps: Vec<&'a AppRecord>,
}

impl CategoryGroup<'_> {
    pub fn count(&self) -> usize {
        self.apps.len()
    }
}

/// Output of [`crate::catalog_logic::derive`]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Derived<'a> {
    pub sorted: Vec<&'a AppRecord>,
    pub grouped: Vec<CategoryGroup<'a>>,
    pub category_options: Vec<String>,
}

impl Derived<'_> {
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}
