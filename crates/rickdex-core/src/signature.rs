// ── Request signatures ──
//
// The cache key for a request: endpoint plus normalized parameters.
// Filter pairs are sorted and form-encoded so that equal requests always
// serialize to the same string and no value can forge a separator.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::model::EntityKind;
use crate::query::RequestParams;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Signature(String);

impl Signature {
    /// List request: `character?gender=male&name=rick&page=2`.
    pub fn list(kind: EntityKind, params: &RequestParams) -> Self {
        let mut pairs: Vec<(&str, &str)> = params
            .filters
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable();

        let page = params.page.to_string();
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .append_pair("page", &page)
            .finish();
        Self(format!("{}?{query}", kind.path()))
    }

    /// Identifier lookup: `episode/1,2,3`, ids in request order.
    pub fn batch(kind: EntityKind, ids: &[u32]) -> Self {
        let joined = ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self(format!("{}/{joined}", kind.path()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterState, QueryBuilder};

    #[test]
    fn list_signature_is_order_independent() {
        let mut a = FilterState::new();
        a.set("status", "alive");
        a.set("name", "rick");
        let mut b = FilterState::new();
        b.set("name", "rick");
        b.set("status", "alive");

        let sig_a = Signature::list(EntityKind::Character, &QueryBuilder::build(&a, 2));
        let sig_b = Signature::list(EntityKind::Character, &QueryBuilder::build(&b, 2));
        assert_eq!(sig_a, sig_b);
        assert_eq!(sig_a.as_str(), "character?name=rick&status=alive&page=2");
    }

    #[test]
    fn page_and_endpoint_distinguish_signatures() {
        let filters = FilterState::new();
        let p1 = Signature::list(EntityKind::Episode, &QueryBuilder::build(&filters, 1));
        let p2 = Signature::list(EntityKind::Episode, &QueryBuilder::build(&filters, 2));
        let loc = Signature::list(EntityKind::Location, &QueryBuilder::build(&filters, 1));
        assert_ne!(p1, p2);
        assert_ne!(p1, loc);
    }

    #[test]
    fn values_are_encoded() {
        let mut filters = FilterState::new();
        filters.set("name", "a&page=9");
        let sig = Signature::list(EntityKind::Character, &QueryBuilder::build(&filters, 1));
        assert_eq!(sig.as_str(), "character?name=a%26page%3D9&page=1");
    }

    #[test]
    fn batch_signature_keeps_id_order() {
        assert_eq!(Signature::batch(EntityKind::Episode, &[3, 1, 2]).as_str(), "episode/3,1,2");
    }
}
