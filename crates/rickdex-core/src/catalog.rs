// ── Catalog facade ──
//
// One request cycle: the list view builds its parameters, the list cache
// answers or delegates upstream, the pager reconciles with the reported
// totals, and reference previews go through the batch resolver. Every
// step waits on the previous one's data; no explicit locking beyond the
// caches' own.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use rickdex_api::{CatalogClient, TransportConfig};

use crate::cache::ResourceCache;
use crate::clock::{Clock, SystemClock};
use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::model::{Entity, EntityKind, ListResponse};
use crate::pager::PagerSignal;
use crate::query::RequestParams;
use crate::resolver::{BatchResolver, Resolution};
use crate::session::ListView;
use crate::signature::Signature;
use crate::source;

/// A list page as served to a view, after pager reconciliation.
#[derive(Debug, Clone)]
pub struct ViewPage {
    pub response: Arc<ListResponse>,
    /// Set when the view's page was past the end of the result set and
    /// the pager fell back to page 1 (the page that was re-requested).
    pub reset_from: Option<u32>,
}

/// Entry counts of the two caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub lists: usize,
    pub lookups: usize,
}

struct CatalogInner {
    config: CatalogConfig,
    client: Arc<CatalogClient>,
    lists: ResourceCache<ListResponse>,
    resolver: BatchResolver,
}

/// Cheaply cloneable handle to the catalog. Clones share caches.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Result<Self, CoreError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build with an explicit cache clock.
    pub fn with_clock(config: CatalogConfig, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = CatalogClient::new(config.base_url.as_str(), &transport)?;
        Ok(Self::from_client(config, client, clock))
    }

    /// Build around an existing API client.
    pub fn from_client(config: CatalogConfig, client: CatalogClient, clock: Arc<dyn Clock>) -> Self {
        let client = Arc::new(client);
        let lists = ResourceCache::with_clock(config.cache, Arc::clone(&clock));
        let lookups = ResourceCache::with_clock(config.cache, clock);
        let resolver = BatchResolver::new(Arc::clone(&client), lookups);
        Self {
            inner: Arc::new(CatalogInner {
                config,
                client,
                lists,
                resolver,
            }),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    pub fn resolver(&self) -> &BatchResolver {
        &self.inner.resolver
    }

    // ── Lists ────────────────────────────────────────────────────────

    /// Fetch one list page, memoized by request signature.
    ///
    /// An upstream 404 carrying the catalog's `{"error": ...}` body means
    /// "no matches" and comes back as an empty page; it is not cached. A
    /// bare 404 points at a wrong base URL and stays an error.
    pub async fn list(
        &self,
        kind: EntityKind,
        params: &RequestParams,
    ) -> Result<Arc<ListResponse>, CoreError> {
        let signature = Signature::list(kind, params);
        if let Some(hit) = self.inner.lists.get(&signature) {
            return Ok(hit);
        }

        debug!(%signature, "list cache miss");
        match source::fetch_list(&self.inner.client, kind, params).await {
            Ok(response) => Ok(self.inner.lists.put(signature, response)),
            Err(e) if e.is_reported_not_found() => {
                debug!(%signature, "no matches");
                Ok(Arc::new(ListResponse::empty(kind, params.page)))
            }
            Err(e) => {
                if e.is_not_found() {
                    warn!(%signature, error = %e, "list endpoint not found, check catalog.base_url");
                }
                Err(e.into())
            }
        }
    }

    /// Load the page a view points at, keeping its pager in bounds.
    ///
    /// When the reported total no longer reaches the view's page, the pager
    /// resets to 1 and page 1 is requested in its place.
    pub async fn load_view(&self, view: &mut ListView) -> Result<ViewPage, CoreError> {
        let response = self.list(view.kind(), &view.request()).await?;

        match view.pager_mut().observe(&response.page_info) {
            PagerSignal::InRange => Ok(ViewPage {
                response,
                reset_from: None,
            }),
            PagerSignal::Reset { from } => {
                info!(kind = %view.kind(), from, "page out of range, back to page 1");
                let response = self.list(view.kind(), &view.request()).await?;
                view.pager_mut().observe(&response.page_info);
                Ok(ViewPage {
                    response,
                    reset_from: Some(from),
                })
            }
        }
    }

    // ── Detail ───────────────────────────────────────────────────────

    /// Fetch a single entity for a detail screen.
    pub async fn entity(&self, kind: EntityKind, id: u32) -> Result<Entity, CoreError> {
        let found = self.inner.resolver.fetch(kind, &[id]).await.map_err(|e| {
            if e.is_not_found() {
                CoreError::NotFound { kind, id }
            } else {
                e.into()
            }
        })?;
        found
            .iter()
            .find(|e| e.id() == id)
            .or_else(|| found.first())
            .cloned()
            .ok_or(CoreError::NotFound { kind, id })
    }

    // ── References ───────────────────────────────────────────────────

    pub async fn resolve_batch(&self, urls: &[String], max_count: usize) -> Resolution {
        self.inner.resolver.resolve_batch(urls, max_count).await
    }

    /// Resolve every reference of a named field (e.g. all episodes of a
    /// character for its detail screen).
    pub async fn resolve_field(&self, entity: &Entity, field: &str) -> Resolution {
        match entity.reference_field(field) {
            Some(field) => {
                self.inner
                    .resolver
                    .resolve_field(field, field.urls.len())
                    .await
            }
            None => Resolution::default(),
        }
    }

    /// Resolve each item's primary references, up to the configured
    /// preview limit, concurrently. Output order matches `items`.
    pub async fn previews(&self, items: &[Arc<Entity>]) -> Vec<Resolution> {
        let limit = self.inner.config.preview_limit;
        join_all(items.iter().map(|item| {
            let field = item.primary_references();
            self.inner.resolver.resolve_field(field, limit)
        }))
        .await
    }

    // ── Maintenance ──────────────────────────────────────────────────

    /// Drop expired entries from both caches. Returns how many went.
    pub fn invalidate_expired(&self) -> usize {
        self.inner.lists.invalidate_expired() + self.inner.resolver.cache().invalidate_expired()
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            lists: self.inner.lists.len(),
            lookups: self.inner.resolver.cache().len(),
        }
    }
}
