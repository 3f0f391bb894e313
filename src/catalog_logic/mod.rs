//! Filter, sort and group the catalog for display

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::app_record::AppRecord;
use crate::constants::ALL_CATEGORIES;
use crate::host::{hostname, sort_key};
use crate::localize::LANGUAGE_SORTER;
use crate::search::{CatalogQuery, CategoryGroup, Derived, SortMode};

#[cfg(test)]
mod catalog_logic_tests;

/// Free-text predicate over the searchable fields of a record
enum TextFilter {
    Any,
    Pattern(regex::Regex),
    Folded(String),
}

impl TextFilter {
    fn new(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Any;
        }
        let pattern = regex::escape(input);
        match regex::RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
        {
            Ok(ok) => Self::Pattern(ok),
            Err(err) => {
                log::warn!("failed to parse regex {:?}: {}", pattern, err);
                Self::Folded(input.to_lowercase())
            }
        }
    }

    fn matches(&self, haystack: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(regex) => regex.is_match(haystack),
            Self::Folded(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// A record with its derived ordering keys, computed once per derivation
struct Keyed<'a> {
    app: &'a AppRecord,
    category: String,
    sort_key: String,
}

impl<'a> Keyed<'a> {
    fn new(app: &'a AppRecord, sort_key: String) -> Self {
        Self {
            app,
            category: app.category_key().to_lowercase(),
            sort_key: sort_key.to_lowercase(),
        }
    }
}

fn compare_folded(a: &str, b: &str) -> Ordering {
    LANGUAGE_SORTER.compare(a, b)
}

/// Display order of category keys.
///
/// Keys differing only in case collate equal after folding, the raw key
/// breaks that tie so each key keeps one contiguous run.
fn compare_category(a: &str, a_folded: &str, b: &str, b_folded: &str) -> Ordering {
    compare_folded(a_folded, b_folded).then_with(|| a.cmp(b))
}

fn passes_category(app: &AppRecord, category: &str) -> bool {
    category == ALL_CATEGORIES || app.category_key().to_lowercase() == category.to_lowercase()
}

fn searchable_text(app: &AppRecord, host: &str, sort_key: &str) -> String {
    [app.title.as_str(), app.description(), app.url.as_str(), host, sort_key].join(" ")
}

fn filter<'a>(catalog: &'a [AppRecord], query: &CatalogQuery) -> Vec<Keyed<'a>> {
    let text_filter = TextFilter::new(&query.text);
    catalog
        .iter()
        .filter(|app| passes_category(app, &query.category))
        .filter_map(|app| {
            let key = sort_key(&app.url, &query.root_domain);
            if !matches!(text_filter, TextFilter::Any) {
                let host = hostname(&app.url);
                if !text_filter.matches(&searchable_text(app, &host, &key)) {
                    return None;
                }
            }
            Some(Keyed::new(app, key))
        })
        .collect()
}

fn sort(items: &mut [Keyed<'_>], sort_mode: SortMode) {
    // sort_by is stable, equal keys keep catalog order
    match sort_mode {
        SortMode::Name => {
            items.sort_by(|a, b| compare_folded(&a.sort_key, &b.sort_key));
        }
        SortMode::CategoryName => {
            items.sort_by(|a, b| {
                match compare_category(
                    a.app.category_key(),
                    &a.category,
                    b.app.category_key(),
                    &b.category,
                ) {
                    Ordering::Equal => compare_folded(&a.sort_key, &b.sort_key),
                    ordering => ordering,
                }
            });
        }
    }
}

fn group<'a>(sorted: &[Keyed<'a>]) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<(String, CategoryGroup<'a>)> = Vec::new();
    for item in sorted {
        let category = item.app.category_key();
        match groups.iter_mut().find(|entry| entry.1.category == category) {
            Some((_, group)) => group.apps.push(item.app),
            None => groups.push((
                item.category.clone(),
                CategoryGroup {
                    category,
                    apps: vec![item.app],
                },
            )),
        }
    }
    groups.sort_by(|(a_folded, a), (b_folded, b)| {
        compare_category(a.category, a_folded, b.category, b_folded)
    });
    groups.into_iter().map(|(_, group)| group).collect()
}

/// Category filter choices: "all" then every distinct category key of the
/// whole catalog in plain lexicographic order
pub fn category_options(catalog: &[AppRecord]) -> Vec<String> {
    let categories: BTreeSet<&str> = catalog
        .iter()
        .map(AppRecord::category_key)
        .filter(|category| {
            let keep = *category != ALL_CATEGORIES;
            if !keep {
                log::debug!("category {:?} is only reachable as the all filter", category);
            }
            keep
        })
        .collect();
    std::iter::once(ALL_CATEGORIES)
        .chain(categories)
        .map(str::to_string)
        .collect()
}

/// Derive everything the catalog view displays from the loaded catalog and
/// the current query. The catalog is never modified.
pub fn derive<'a>(catalog: &'a [AppRecord], query: &CatalogQuery) -> Derived<'a> {
    let mut items = filter(catalog, query);
    sort(&mut items, query.sort_mode);
    let grouped = group(&items);
    Derived {
        sorted: items.iter().map(|item| item.app).collect(),
        grouped,
        category_options: category_options(catalog),
    }
}
