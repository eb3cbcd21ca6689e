use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub location_type: String,
    pub dimension: String,
    /// Reference URLs of the characters last seen here.
    pub residents: Vec<String>,
    pub url: String,
    pub created: Option<DateTime<Utc>>,
}
