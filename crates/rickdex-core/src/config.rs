// ── Runtime catalog configuration ──
//
// Describes *where* the catalog lives and how aggressively to cache it.
// Never touches disk: `rickdex-config` builds a `CatalogConfig` and hands
// it in.

use std::time::Duration;

use url::Url;

use crate::cache::CachePolicy;

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. `https://rickandmortyapi.com/api/`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// TTL and capacity for both the list and the lookup cache.
    pub cache: CachePolicy,
    /// How many related entities a list view resolves per item.
    pub preview_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: rickdex_api::transport::DEFAULT_TIMEOUT,
            cache: CachePolicy::default(),
            preview_limit: 10,
        }
    }
}
