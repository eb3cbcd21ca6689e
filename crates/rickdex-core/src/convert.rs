// ── API-to-domain type conversions ──
//
// Bridges raw `rickdex_api` response types into canonical `crate::model`
// types. Pure data mapping; nothing here touches the network.

use chrono::{DateTime, Utc};

use rickdex_api::{CharacterResponse, EpisodeResponse, LocationResponse, PlaceRef};

use crate::model::{Character, Entity, Episode, LifeStatus, Location, Place};

/// Parse the catalog's `created` timestamp. Unparseable values become `None`.
fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl From<PlaceRef> for Place {
    fn from(p: PlaceRef) -> Self {
        Self {
            name: p.name,
            url: p.url,
        }
    }
}

impl From<CharacterResponse> for Character {
    fn from(c: CharacterResponse) -> Self {
        Self {
            id: c.id,
            status: LifeStatus::from_wire(&c.status),
            created: parse_created(&c.created),
            name: c.name,
            species: c.species,
            character_type: c.character_type,
            gender: c.gender,
            origin: c.origin.into(),
            last_location: c.location.into(),
            image: c.image,
            episodes: c.episode,
            url: c.url,
        }
    }
}

impl From<EpisodeResponse> for Episode {
    fn from(e: EpisodeResponse) -> Self {
        Self {
            id: e.id,
            created: parse_created(&e.created),
            name: e.name,
            air_date: e.air_date,
            code: e.episode,
            characters: e.characters,
            url: e.url,
        }
    }
}

impl From<LocationResponse> for Location {
    fn from(l: LocationResponse) -> Self {
        Self {
            id: l.id,
            created: parse_created(&l.created),
            name: l.name,
            location_type: l.location_type,
            dimension: l.dimension,
            residents: l.residents,
            url: l.url,
        }
    }
}

impl From<CharacterResponse> for Entity {
    fn from(c: CharacterResponse) -> Self {
        Self::Character(c.into())
    }
}

impl From<EpisodeResponse> for Entity {
    fn from(e: EpisodeResponse) -> Self {
        Self::Episode(e.into())
    }
}

impl From<LocationResponse> for Entity {
    fn from(l: LocationResponse) -> Self {
        Self::Location(l.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn character_conversion_maps_places_and_status() {
        let raw: CharacterResponse = serde_json::from_value(json!({
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
            "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
            "episode": ["https://rickandmortyapi.com/api/episode/1"],
            "created": "2017-11-04T18:48:46.250Z"
        }))
        .unwrap();

        let character = Character::from(raw);
        assert_eq!(character.status, LifeStatus::Alive);
        assert_eq!(character.origin.name, "Earth (C-137)");
        assert_eq!(character.last_location.name, "Citadel of Ricks");
        assert_eq!(character.episodes.len(), 1);
        assert!(character.created.is_some());
    }

    #[test]
    fn bad_timestamp_is_none() {
        assert!(parse_created("yesterday").is_none());
        assert!(parse_created("").is_none());
    }

    #[test]
    fn episode_code_is_carried() {
        let raw: EpisodeResponse = serde_json::from_value(json!({
            "id": 28, "name": "The Ricklantis Mixup", "episode": "S03E07", "air_date": "September 10, 2017"
        }))
        .unwrap();
        let entity = Entity::from(raw);
        assert_eq!(entity.as_episode().map(|e| e.code.as_str()), Some("S03E07"));
    }
}
