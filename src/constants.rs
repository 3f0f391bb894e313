//! Application-wide constants

/// Root-relative path of the catalog document
pub const CATALOG_PATH: &str = "/apps.json";

/// Category key used for records without a category
pub const UNCATEGORIZED: &str = "uncategorized";

/// Category filter value that lets every record through
pub const ALL_CATEGORIES: &str = "all";

/// Root domain whose subdomains are used as sort keys
pub const DEFAULT_ROOT_DOMAIN: &str = "example.dev";

/// Request timeout for the catalog fetch, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Prefix for every persisted UI state key
pub const STATE_PREFIX: &str = "app-catalog";

/// Initials shown when a title is blank
pub const INITIALS_FALLBACK: &str = "?";

/// Saturation of placeholder tiles (percent)
pub const PLACEHOLDER_SATURATION: u8 = 65;

/// Lightness of placeholder tiles (percent)
pub const PLACEHOLDER_LIGHTNESS: u8 = 50;
