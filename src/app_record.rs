use serde::{Deserialize, Serialize};

use crate::constants::UNCATEGORIZED;

/// One entry of the catalog document
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppRecord {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl AppRecord {
    /// Category used for grouping, filtering and sorting
    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

pub type Catalog = Vec<AppRecord>;

#[cfg(test)]
pub fn record(title: &str, url: &str, category: Option<&str>) -> AppRecord {
    AppRecord {
        title: title.to_string(),
        url: url.to_string(),
        description: None,
        category: category.map(str::to_string),
        thumbnail: None,
    }
}
