use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Life status as reported by the catalog (`Alive`, `Dead`, `unknown`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LifeStatus {
    Alive,
    Dead,
    #[default]
    Unknown,
}

impl LifeStatus {
    /// Lenient parse: anything unrecognized is `Unknown`.
    pub fn from_wire(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }
}

/// A named place with an optional reference URL to the location entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// Empty when the catalog has no location record for the place.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: LifeStatus,
    pub species: String,
    /// Sub-species or variant; often empty.
    pub character_type: String,
    pub gender: String,
    pub origin: Place,
    pub last_location: Place,
    pub image: String,
    /// Reference URLs of the episodes the character appears in.
    pub episodes: Vec<String>,
    pub url: String,
    pub created: Option<DateTime<Utc>>,
}
