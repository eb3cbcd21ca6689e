// ── Catalog resource kinds ──
//
// The three entity collections the catalog exposes. Each kind maps to one
// endpoint segment (`{base}/{kind}`) and declares the query filters the
// upstream accepts on its list endpoint.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the catalog's entity collections.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EntityKind {
    #[strum(to_string = "character", serialize = "characters")]
    Character,
    #[strum(to_string = "episode", serialize = "episodes")]
    Episode,
    #[strum(to_string = "location", serialize = "locations")]
    Location,
}

impl EntityKind {
    /// Endpoint path segment, relative to the API base.
    pub fn path(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Episode => "episode",
            Self::Location => "location",
        }
    }

    /// Filter parameters the list endpoint understands.
    pub fn filter_fields(self) -> &'static [&'static str] {
        match self {
            Self::Character => &["name", "status", "species", "type", "gender"],
            Self::Episode => &["name", "episode"],
            Self::Location => &["name", "type", "dimension"],
        }
    }

    pub fn accepts_filter(self, field: &str) -> bool {
        self.filter_fields().contains(&field)
    }

    /// Plural label for headings and messages.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Character => "characters",
            Self::Episode => "episodes",
            Self::Location => "locations",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural() {
        assert_eq!("character".parse::<EntityKind>().unwrap(), EntityKind::Character);
        assert_eq!("Episodes".parse::<EntityKind>().unwrap(), EntityKind::Episode);
        assert!("planet".parse::<EntityKind>().is_err());
    }

    #[test]
    fn display_matches_path() {
        assert_eq!(EntityKind::Location.to_string(), EntityKind::Location.path());
    }

    #[test]
    fn filter_fields_are_kind_specific() {
        assert!(EntityKind::Character.accepts_filter("gender"));
        assert!(!EntityKind::Episode.accepts_filter("gender"));
        assert!(EntityKind::Location.accepts_filter("dimension"));
    }
}
