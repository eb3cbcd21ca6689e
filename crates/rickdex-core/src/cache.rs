// ── Time- and size-bounded resource cache ──
//
// Memoizes successful catalog responses by `Signature`. Entries expire a
// fixed TTL after insertion; when the store is full the least-recently
// inserted entry goes first. Failures are never stored, so the next
// request for the same signature retries upstream.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use tracing::trace;

use crate::clock::{Clock, SystemClock};
use crate::signature::Signature;

/// Freshness and capacity bounds for a `ResourceCache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 50,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: Arc<V>,
    inserted_at: Instant,
}

/// Bounded memoizing store, safe to share across tasks.
///
/// All mutations go through one mutex, which keeps the entry-count
/// invariant intact under concurrent sessions. Insertion order doubles as
/// the eviction order.
#[derive(Debug)]
pub struct ResourceCache<V> {
    policy: CachePolicy,
    clock: Arc<dyn Clock>,
    entries: Mutex<IndexMap<Signature, CacheEntry<V>>>,
}

impl<V> ResourceCache<V> {
    pub fn new(policy: CachePolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: CachePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            entries: Mutex::new(IndexMap::new()),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Look up a fresh entry. Expired entries are dropped on the way out.
    pub fn get(&self, signature: &Signature) -> Option<Arc<V>> {
        let now = self.clock.now();
        let mut entries = self.lock();

        let fresh = entries
            .get(signature)
            .map(|entry| self.is_fresh(entry, now))?;
        if fresh {
            trace!(%signature, "cache hit");
            entries.get(signature).map(|entry| Arc::clone(&entry.value))
        } else {
            trace!(%signature, "cache entry expired");
            entries.shift_remove(signature);
            None
        }
    }

    /// Store a value, evicting the oldest entries if the store is full.
    ///
    /// Re-putting an existing signature replaces the value and restarts
    /// its TTL. Returns the shared handle to the stored value.
    pub fn put(&self, signature: Signature, value: V) -> Arc<V> {
        let value = Arc::new(value);
        if self.policy.max_entries == 0 {
            return value;
        }

        let now = self.clock.now();
        let mut entries = self.lock();

        entries.shift_remove(&signature);
        while entries.len() >= self.policy.max_entries {
            match entries.shift_remove_index(0) {
                Some((evicted, _)) => trace!(signature = %evicted, "cache eviction"),
                None => break,
            }
        }

        trace!(%signature, "cache insert");
        entries.insert(
            signature,
            CacheEntry {
                value: Arc::clone(&value),
                inserted_at: now,
            },
        );
        value
    }

    /// Drop every entry older than the TTL. Returns how many were removed.
    pub fn invalidate_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry, now));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn is_fresh(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) < self.policy.ttl
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<Signature, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
