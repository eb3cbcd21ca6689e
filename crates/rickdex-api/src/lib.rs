// rickdex-api: Async Rust client for the Rick and Morty catalog REST API

pub mod client;
pub mod error;
pub mod kind;
pub mod models;
pub mod transport;

pub use client::CatalogClient;
pub use error::Error;
pub use kind::EntityKind;
pub use models::{
    CharacterResponse, EpisodeResponse, LocationResponse, OneOrMany, PageEnvelope, PageMeta,
    PlaceRef,
};
pub use transport::TransportConfig;
