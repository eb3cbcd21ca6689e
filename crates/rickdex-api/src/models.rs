// ── Wire types for the catalog API ──
//
// Shapes exactly as the upstream serves them. `rickdex-core` converts
// these into its domain model; nothing here interprets the data.

use serde::{Deserialize, Serialize};

/// Pagination block of a list response.
///
/// Counts are signed on the wire so that an out-of-contract negative
/// value decodes and can be clamped downstream instead of failing the
/// whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub pages: Option<i64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// `{ info, results }` envelope returned by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    #[serde(default)]
    pub info: Option<PageMeta>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Identifier lookups return a bare object for one id and an array for
/// several.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Named link to a location (a character's origin or last known place).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    #[serde(default, rename = "type")]
    pub character_type: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: PlaceRef,
    #[serde(default)]
    pub location: PlaceRef,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub air_date: String,
    /// Season/episode code, e.g. `S01E01`.
    #[serde(default)]
    pub episode: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub id: u32,
    pub name: String,
    #[serde(default, rename = "type")]
    pub location_type: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn one_or_many_accepts_bare_object() {
        let raw = json!({ "id": 28, "name": "The Ricklantis Mixup" });
        let parsed: OneOrMany<EpisodeResponse> = serde_json::from_value(raw).unwrap();
        let items = parsed.into_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 28);
    }

    #[test]
    fn one_or_many_accepts_array() {
        let raw = json!([{ "id": 1, "name": "Pilot" }, { "id": 2, "name": "Lawnmower Dog" }]);
        let parsed: OneOrMany<EpisodeResponse> = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.into_vec().len(), 2);
    }

    #[test]
    fn envelope_without_info_decodes() {
        let raw = json!({ "results": [{ "id": 3, "name": "Citadel of Ricks", "type": "Space station" }] });
        let page: PageEnvelope<LocationResponse> = serde_json::from_value(raw).unwrap();
        assert!(page.info.is_none());
        assert_eq!(page.results[0].location_type, "Space station");
    }
}
