use super::*;
use crate::app_record::record;
use crate::search::CatalogQuery;

fn query(text: &str, category: &str, sort_mode: SortMode) -> CatalogQuery {
    CatalogQuery {
        text: text.to_string(),
        category: category.to_string(),
        sort_mode,
        ..CatalogQuery::default()
    }
}

fn titles(apps: &[&AppRecord]) -> Vec<String> {
    apps.iter().map(|app| app.title.clone()).collect()
}

fn two_apps() -> Vec<AppRecord> {
    vec![
        record("Studio", "https://studio.example.dev", Some("Portal")),
        record("Docs", "https://docs.example.dev", None),
    ]
}

fn sample() -> Vec<AppRecord> {
    let mut apps = vec![
        record("Voice Conversion", "https://voice.example.dev", Some("Audio")),
        record("Studio", "https://studio.example.dev", Some("Portal")),
        record("Docs", "https://docs.example.dev", None),
        record("Transcribe", "https://transcribe.example.dev", Some("Audio")),
        record("Dashboard", "https://example.dev", Some("Portal")),
        record("Partner", "https://www.partner.org/app", Some("external")),
    ];
    apps[3].description = Some("Batch speech-to-text".to_string());
    apps
}

#[test]
fn name_order_uses_subdomains() {
    let apps = two_apps();
    let derived = derive(&apps, &query("", "all", SortMode::Name));
    assert_eq!(titles(&derived.sorted), ["Docs", "Studio"]);
    assert_eq!(
        derived.category_options,
        ["all", "Portal", "uncategorized"]
    );
}

#[test]
fn category_name_order_puts_portal_first() {
    let apps = two_apps();
    let derived = derive(&apps, &query("", "all", SortMode::CategoryName));
    // "portal" collates before "uncategorized"
    assert_eq!(titles(&derived.sorted), ["Studio", "Docs"]);
}

#[test]
fn query_ignores_case() {
    let apps = two_apps();
    for text in ["studio", "STUDIO", "  StUdIo  "] {
        let derived = derive(&apps, &query(text, "all", SortMode::Name));
        assert_eq!(titles(&derived.sorted), ["Studio"]);
    }
}

#[test]
fn query_searches_description_and_host() {
    let apps = sample();
    let derived = derive(&apps, &query("speech", "all", SortMode::Name));
    assert_eq!(titles(&derived.sorted), ["Transcribe"]);

    let derived = derive(&apps, &query("partner.org", "all", SortMode::Name));
    assert_eq!(titles(&derived.sorted), ["Partner"]);
}

#[test]
fn query_is_literal_text() {
    let apps = sample();
    let derived = derive(&apps, &query(".*", "all", SortMode::Name));
    assert!(derived.sorted.is_empty());
}

#[test]
fn unmatched_query_yields_nothing() {
    let apps = sample();
    let derived = derive(&apps, &query("zzz-not-here", "all", SortMode::Name));
    assert!(derived.sorted.is_empty());
    assert!(derived.grouped.is_empty());
    assert!(derived.is_empty());
    // options still come from the whole catalog
    assert_eq!(derived.category_options.len(), 5);
}

#[test]
fn empty_query_keeps_every_record() {
    let apps = sample();
    for sort_mode in [SortMode::Name, SortMode::CategoryName] {
        let derived = derive(&apps, &query("   ", "all", sort_mode));
        assert_eq!(derived.sorted.len(), apps.len());
        for app in &apps {
            let count = derived
                .sorted
                .iter()
                .filter(|sorted| std::ptr::eq(**sorted, app))
                .count();
            assert_eq!(count, 1, "{} should appear once", app.title);
        }
    }
}

#[test]
fn category_filter_ignores_case() {
    let apps = sample();
    let derived = derive(&apps, &query("", "portal", SortMode::Name));
    // apex "example.dev" sorts before subdomain "studio"
    assert_eq!(titles(&derived.sorted), ["Dashboard", "Studio"]);

    let derived = derive(&apps, &query("", "UNCATEGORIZED", SortMode::Name));
    assert_eq!(titles(&derived.sorted), ["Docs"]);
}

#[test]
fn text_and_category_must_both_pass() {
    let apps = sample();
    let derived = derive(&apps, &query("studio", "Audio", SortMode::Name));
    assert!(derived.sorted.is_empty());
}

#[test]
fn name_order_is_numeric_aware() {
    let apps = vec![
        record("Ten", "https://item10.example.dev", None),
        record("Two", "https://item2.example.dev", None),
        record("One", "https://item1.example.dev", None),
    ];
    let derived = derive(&apps, &query("", "all", SortMode::Name));
    assert_eq!(titles(&derived.sorted), ["One", "Two", "Ten"]);
}

#[test]
fn name_order_ignores_title() {
    let apps = vec![
        record("Alpha", "https://zeta.example.dev", None),
        record("Zulu", "https://alpha.example.dev", None),
    ];
    let derived = derive(&apps, &query("", "all", SortMode::Name));
    assert_eq!(titles(&derived.sorted), ["Zulu", "Alpha"]);
}

#[test]
fn equal_keys_keep_catalog_order() {
    let apps = vec![
        record("First", "https://same.example.dev/a", None),
        record("Second", "https://same.example.dev/b", None),
        record("Third", "https://SAME.example.dev/c", None),
    ];
    let derived = derive(&apps, &query("", "all", SortMode::Name));
    assert_eq!(titles(&derived.sorted), ["First", "Second", "Third"]);
}

#[test]
fn derivation_is_deterministic() {
    let apps = sample();
    for sort_mode in [SortMode::Name, SortMode::CategoryName] {
        let q = query("", "all", sort_mode);
        let first = derive(&apps, &q);
        let second = derive(&apps, &q);
        assert_eq!(first, second);
    }
}

#[test]
fn grouped_flattens_to_sorted_in_category_mode() {
    let mut apps = sample();
    apps.push(record("Lower", "https://lower.example.dev", Some("audio")));
    let derived = derive(&apps, &query("", "all", SortMode::CategoryName));
    let flattened: Vec<&AppRecord> = derived
        .grouped
        .iter()
        .flat_map(|group| group.apps.iter().copied())
        .collect();
    assert_eq!(flattened, derived.sorted);
}

#[test]
fn grouping_rebuckets_in_name_mode() {
    let apps = sample();
    let derived = derive(&apps, &query("", "all", SortMode::Name));
    let categories: Vec<&str> = derived.grouped.iter().map(|group| group.category).collect();
    assert_eq!(
        categories,
        ["Audio", "external", "Portal", "uncategorized"]
    );
    let audio = &derived.grouped[0];
    assert_eq!(audio.count(), 2);
    // transcribe < voice
    assert_eq!(titles(&audio.apps), ["Transcribe", "Voice Conversion"]);

    let total: usize = derived.grouped.iter().map(CategoryGroup::count).sum();
    assert_eq!(total, derived.sorted.len());
}

#[test]
fn every_record_in_exactly_one_group() {
    let apps = sample();
    let derived = derive(&apps, &query("", "all", SortMode::Name));
    for app in &apps {
        let groups = derived
            .grouped
            .iter()
            .filter(|group| group.apps.iter().any(|grouped| std::ptr::eq(*grouped, app)))
            .count();
        assert_eq!(groups, 1);
    }
}

#[test]
fn category_options_are_lexicographic_and_unique() {
    let apps = sample();
    let derived = derive(&apps, &query("studio", "Portal", SortMode::Name));
    // plain byte order puts uppercase before lowercase
    assert_eq!(
        derived.category_options,
        ["all", "Audio", "Portal", "external", "uncategorized"]
    );
}

#[test]
fn category_options_skip_a_literal_all() {
    let apps = vec![record("Odd", "https://odd.example.dev", Some("all"))];
    assert_eq!(category_options(&apps), ["all"]);
}

#[test]
fn empty_catalog() {
    let derived = derive(&[], &CatalogQuery::default());
    assert!(derived.sorted.is_empty());
    assert!(derived.grouped.is_empty());
    assert_eq!(derived.category_options, ["all"]);
}

#[test]
fn catalog_is_not_modified() {
    let apps = sample();
    let before = apps.clone();
    let _ = derive(&apps, &query("a", "Audio", SortMode::CategoryName));
    assert_eq!(apps, before);
}
