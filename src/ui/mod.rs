//! Terminal presentation of the derived catalog

use std::fmt::Write;

use serde::Serialize;

use crate::app_record::AppRecord;
use crate::fl;
use crate::host::{hostname, sort_key};
use crate::loader::{CatalogOrigin, LoadedCatalog};
use crate::placeholder::Thumbnail;
use crate::search::{Derived, SortMode, ViewMode};

pub mod cards;
pub use cards::write_card;

/// Render the catalog view as text
pub fn render_text(loaded: &LoadedCatalog, derived: &Derived<'_>, view_mode: ViewMode) -> String {
    let mut out = String::new();

    if let Some(advisory) = &loaded.advisory {
        let _ = writeln!(out, "! {}\n", advisory);
    }

    if derived.is_empty() {
        let _ = writeln!(out, "{}", fl!("empty-results"));
    } else {
        match view_mode {
            ViewMode::Grouped => {
                for group in &derived.grouped {
                    let _ = writeln!(
                        out,
                        "{}",
                        fl!(
                            "group-header",
                            category = group.category,
                            count = group.count()
                        )
                    );
                    for app in &group.apps {
                        write_card(&mut out, app, "  ");
                    }
                    out.push('\n');
                }
            }
            ViewMode::Flat => {
                for app in &derived.sorted {
                    write_card(&mut out, app, "");
                }
                out.push('\n');
            }
        }
        let _ = writeln!(out, "{}", fl!("app-count", count = derived.sorted.len()));
    }

    let _ = writeln!(
        out,
        "{}",
        fl!("categories", list = derived.category_options.join(", "))
    );
    out
}

#[derive(Serialize)]
struct JsonApp<'a> {
    #[serde(flatten)]
    app: &'a AppRecord,
    host: String,
    sort_key: String,
    thumbnail: Thumbnail<'a>,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    category: &'a str,
    count: usize,
    apps: Vec<JsonApp<'a>>,
}

#[derive(Serialize)]
struct JsonView<'a> {
    origin: CatalogOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisory: Option<&'a str>,
    sort_mode: SortMode,
    view_mode: ViewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    apps: Option<Vec<JsonApp<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<JsonGroup<'a>>>,
    category_options: &'a [String],
}

fn json_app<'a>(app: &'a AppRecord, root_domain: &str) -> JsonApp<'a> {
    JsonApp {
        app,
        host: hostname(&app.url),
        sort_key: sort_key(&app.url, root_domain),
        thumbnail: Thumbnail::for_record(app),
    }
}

/// Render the catalog view as JSON, in the shape of the chosen layout
pub fn render_json(
    loaded: &LoadedCatalog,
    derived: &Derived<'_>,
    sort_mode: SortMode,
    view_mode: ViewMode,
    root_domain: &str,
) -> Result<String, serde_json::Error> {
    let (apps, groups) = match view_mode {
        ViewMode::Flat => (
            Some(derived.sorted.iter().map(|app| json_app(app, root_domain)).collect()),
            None,
        ),
        ViewMode::Grouped => (
            None,
            Some(
                derived
                    .grouped
                    .iter()
                    .map(|group| JsonGroup {
                        category: group.category,
                        count: group.count(),
                        apps: group.apps.iter().map(|app| json_app(app, root_domain)).collect(),
                    })
                    .collect(),
            ),
        ),
    };
    serde_json::to_string_pretty(&JsonView {
        origin: loaded.origin,
        advisory: loaded.advisory.as_deref(),
        sort_mode,
        view_mode,
        apps,
        groups,
        category_options: &derived.category_options,
    })
}
