// ── Filter state and request parameters ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// User-entered filter values for one list view.
///
/// An empty (or whitespace-only) value means "no constraint". Values are
/// kept trimmed; empty values are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set a filter value. Returns `true` if the effective value changed.
    pub fn set(&mut self, name: impl Into<String>, value: impl AsRef<str>) -> bool {
        let name = name.into();
        let value = value.as_ref().trim();
        if self.get(&name).unwrap_or("") == value {
            return false;
        }
        if value.is_empty() {
            self.values.remove(&name);
        } else {
            self.values.insert(name, value.to_owned());
        }
        true
    }

    /// Remove every filter. Returns `true` if any was set.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.values.is_empty();
        self.values.clear();
        had_any
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }

    /// Active `(name, value)` pairs in name order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }
}

/// Parameters for one list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestParams {
    pub page: u32,
    /// Non-empty filters, sorted by name.
    pub filters: Vec<(String, String)>,
}

impl RequestParams {
    /// Query pairs in the form the API client takes, page first.
    pub fn query_pairs(&self) -> Vec<(&str, String)> {
        std::iter::once(("page", self.page.to_string()))
            .chain(self.filters.iter().map(|(k, v)| (k.as_str(), v.clone())))
            .collect()
    }
}

/// Assembles request parameters from filter state.
pub struct QueryBuilder;

impl QueryBuilder {
    /// Build the parameters for `page` (clamped to at least 1).
    ///
    /// Empty filters are omitted entirely rather than sent as `name=`.
    pub fn build(filters: &FilterState, page: u32) -> RequestParams {
        RequestParams {
            page: page.max(1),
            filters: filters
                .active()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }
}
