//! Hostname and sort key derivation for catalog URLs

use reqwest::Url;

/// Host component of `url`, or `url` itself when it does not parse or has no host
pub fn hostname(url: &str) -> String {
    host_of(url).unwrap_or_else(|| url.to_string())
}

fn host_of(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .map(str::to_string),
        Err(err) => {
            log::debug!("failed to parse url {:?}: {}", url, err);
            None
        }
    }
}

/// Key used when ordering by name.
///
/// Hosts below `root_domain` with at least three labels sort by their first
/// label (the subdomain). Everything else, including the apex domain and
/// foreign hosts, sorts by the full host. The root domain must match whole
/// labels, so `studio.notexample.dev` is not below `example.dev`. A url
/// without a host is its own key.
pub fn sort_key(url: &str, root_domain: &str) -> String {
    let Some(host) = host_of(url) else {
        return url.to_string();
    };
    if is_below(&host, root_domain) && host.split('.').count() >= 3 {
        if let Some(label) = host.split('.').next() {
            return label.to_string();
        }
    }
    host
}

fn is_below(host: &str, root_domain: &str) -> bool {
    let root_domain = root_domain.trim_start_matches('.').to_ascii_lowercase();
    if root_domain.is_empty() {
        return false;
    }
    host.to_ascii_lowercase()
        .strip_suffix(root_domain.as_str())
        .is_some_and(|rest| rest.len() > 1 && rest.ends_with('.'))
}
