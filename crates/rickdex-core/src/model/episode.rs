use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    /// Air date exactly as the catalog prints it ("December 2, 2013").
    pub air_date: String,
    /// Season/episode code, e.g. `S01E01`.
    pub code: String,
    /// Reference URLs of the characters appearing in the episode.
    pub characters: Vec<String>,
    pub url: String,
    pub created: Option<DateTime<Utc>>,
}
