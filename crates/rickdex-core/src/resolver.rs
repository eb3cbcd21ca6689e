// ── Batch reference resolution ──
//
// Turns the reference URLs on an entity into resolved entities with one
// bulk lookup (`{kind}/{id1,id2,...}`). Resolution failures are reported
// as a notice next to an empty result; they never abort the page that
// asked for them.

use std::sync::Arc;

use rickdex_api::CatalogClient;
use tracing::{debug, trace, warn};

use crate::cache::ResourceCache;
use crate::model::{Entity, EntityKind, ReferenceField};
use crate::reference::{parse_id, reference_kind};
use crate::signature::Signature;
use crate::source;

/// Outcome of resolving one batch of references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub entities: Vec<Entity>,
    /// Set when the lookup failed; `entities` is then empty.
    pub notice: Option<String>,
}

impl Resolution {
    fn failed(notice: String) -> Self {
        Self {
            entities: Vec::new(),
            notice: Some(notice),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// The single request a batch of references turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub kind: EntityKind,
    pub ids: Vec<u32>,
}

/// Resolves homogeneous reference lists through a memoizing cache.
///
/// Callers must pass references of one kind per call. The kind comes from
/// the first URL that names a collection; references of any other kind are
/// skipped with a warning.
pub struct BatchResolver {
    client: Arc<CatalogClient>,
    cache: ResourceCache<Vec<Entity>>,
}

impl BatchResolver {
    pub fn new(client: Arc<CatalogClient>, cache: ResourceCache<Vec<Entity>>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &ResourceCache<Vec<Entity>> {
        &self.cache
    }

    /// Work out the request for `urls` without touching the network.
    ///
    /// Malformed references and references that do not name the batch
    /// kind are dropped. Repeated ids are requested once, the id list is
    /// truncated to `max_count`, and `None` means there is nothing to fetch.
    pub fn plan(urls: &[String], max_count: usize) -> Option<BatchPlan> {
        if max_count == 0 {
            return None;
        }
        let kind = urls.iter().find_map(|u| reference_kind(u))?;

        let mut ids: Vec<u32> = Vec::new();
        for url in urls {
            match reference_kind(url) {
                Some(k) if k == kind => {}
                Some(k) => {
                    warn!(%url, expected = %kind, found = %k, "skipping reference of a different kind");
                    continue;
                }
                None => {
                    trace!(%url, "skipping reference without a known kind");
                    continue;
                }
            }
            let Some(id) = parse_id(url) else {
                trace!(%url, "skipping malformed reference");
                continue;
            };
            if !ids.contains(&id) {
                ids.push(id);
            }
            if ids.len() == max_count {
                break;
            }
        }

        if ids.is_empty() {
            None
        } else {
            Some(BatchPlan { kind, ids })
        }
    }

    /// Resolve up to `max_count` references with a single lookup.
    pub async fn resolve_batch(&self, urls: &[String], max_count: usize) -> Resolution {
        let Some(plan) = Self::plan(urls, max_count) else {
            return Resolution::default();
        };

        match self.fetch(plan.kind, &plan.ids).await {
            Ok(entities) => Resolution {
                entities: entities.as_ref().clone(),
                notice: None,
            },
            Err(e) => {
                warn!(kind = %plan.kind, error = %e, "batch resolution failed");
                Resolution::failed(format!("Error fetching related {}: {e}", plan.kind.plural()))
            }
        }
    }

    /// Resolve one declared reference field of an entity.
    pub async fn resolve_field(&self, field: ReferenceField<'_>, max_count: usize) -> Resolution {
        debug!(field = field.name, target = %field.target, count = field.urls.len(), "resolving references");
        self.resolve_batch(field.urls, max_count).await
    }

    /// Cached bulk lookup by id. Failures are not cached.
    pub async fn fetch(
        &self,
        kind: EntityKind,
        ids: &[u32],
    ) -> Result<Arc<Vec<Entity>>, rickdex_api::Error> {
        let signature = Signature::batch(kind, ids);
        if let Some(hit) = self.cache.get(&signature) {
            return Ok(hit);
        }

        let entities = source::fetch_many(&self.client, kind, ids).await?;
        Ok(self.cache.put(signature, entities))
    }
}
