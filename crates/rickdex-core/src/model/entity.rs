// ── Tagged entity variant ──
//
// Characters, episodes, and locations share one resolution code path.
// Each variant declares its reference fields explicitly so the resolver
// never has to guess which strings are links.

use std::slice;

use serde::{Deserialize, Serialize};

use super::{Character, EntityKind, Episode, Location};

/// Any record from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Character(Character),
    Episode(Episode),
    Location(Location),
}

/// A named group of reference URLs on an entity, all pointing at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceField<'a> {
    pub name: &'static str,
    pub target: EntityKind,
    pub urls: &'a [String],
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Character(_) => EntityKind::Character,
            Self::Episode(_) => EntityKind::Episode,
            Self::Location(_) => EntityKind::Location,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Self::Character(c) => c.id,
            Self::Episode(e) => e.id,
            Self::Location(l) => l.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Character(c) => &c.name,
            Self::Episode(e) => &e.name,
            Self::Location(l) => &l.name,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Character(c) => &c.url,
            Self::Episode(e) => &e.url,
            Self::Location(l) => &l.url,
        }
    }

    /// Every reference field the variant carries, in declaration order.
    pub fn reference_fields(&self) -> Vec<ReferenceField<'_>> {
        match self {
            Self::Character(c) => vec![
                ReferenceField {
                    name: "episode",
                    target: EntityKind::Episode,
                    urls: &c.episodes,
                },
                ReferenceField {
                    name: "origin",
                    target: EntityKind::Location,
                    urls: slice::from_ref(&c.origin.url),
                },
                ReferenceField {
                    name: "location",
                    target: EntityKind::Location,
                    urls: slice::from_ref(&c.last_location.url),
                },
            ],
            Self::Episode(e) => vec![ReferenceField {
                name: "characters",
                target: EntityKind::Character,
                urls: &e.characters,
            }],
            Self::Location(l) => vec![ReferenceField {
                name: "residents",
                target: EntityKind::Character,
                urls: &l.residents,
            }],
        }
    }

    /// The field a list view previews: a character's episodes, an
    /// episode's cast, a location's residents.
    pub fn primary_references(&self) -> ReferenceField<'_> {
        let fields = self.reference_fields();
        // Every variant declares at least one field, primary first.
        fields.into_iter().next().unwrap_or(ReferenceField {
            name: "",
            target: self.kind(),
            urls: &[],
        })
    }

    pub fn reference_field(&self, name: &str) -> Option<ReferenceField<'_>> {
        self.reference_fields().into_iter().find(|f| f.name == name)
    }

    pub fn as_character(&self) -> Option<&Character> {
        match self {
            Self::Character(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_episode(&self) -> Option<&Episode> {
        match self {
            Self::Episode(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_location(&self) -> Option<&Location> {
        match self {
            Self::Location(l) => Some(l),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LifeStatus, Place};

    fn morty() -> Entity {
        Entity::Character(Character {
            id: 2,
            name: "Morty Smith".into(),
            status: LifeStatus::Alive,
            species: "Human".into(),
            character_type: String::new(),
            gender: "Male".into(),
            origin: Place {
                name: "unknown".into(),
                url: String::new(),
            },
            last_location: Place {
                name: "Citadel of Ricks".into(),
                url: "https://rickandmortyapi.com/api/location/3".into(),
            },
            image: String::new(),
            episodes: vec!["https://rickandmortyapi.com/api/episode/1".into()],
            url: "https://rickandmortyapi.com/api/character/2".into(),
            created: None,
        })
    }

    #[test]
    fn character_declares_episode_field_first() {
        let entity = morty();
        let primary = entity.primary_references();
        assert_eq!(primary.name, "episode");
        assert_eq!(primary.target, EntityKind::Episode);
        assert_eq!(primary.urls.len(), 1);
    }

    #[test]
    fn place_fields_point_at_locations() {
        let entity = morty();
        let location = entity.reference_field("location");
        assert_eq!(location.map(|f| f.target), Some(EntityKind::Location));
        assert_eq!(
            location.map(|f| f.urls),
            Some(&["https://rickandmortyapi.com/api/location/3".to_owned()][..])
        );
        assert!(entity.reference_field("residents").is_none());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(morty()).ok();
        let kind = json.as_ref().and_then(|v| v.get("kind")).and_then(|k| k.as_str());
        assert_eq!(kind, Some("character"));
    }
}
