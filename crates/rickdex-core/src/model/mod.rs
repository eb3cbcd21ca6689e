// ── Domain model ──
//
// Canonical types the rest of the workspace consumes. Wire shapes live in
// `rickdex_api::models`; `crate::convert` maps them into these.

mod character;
mod entity;
mod episode;
mod location;
mod page;

pub use character::{Character, LifeStatus, Place};
pub use entity::{Entity, ReferenceField};
pub use episode::Episode;
pub use location::Location;
pub use page::{ListResponse, PageInfo};

pub use rickdex_api::EntityKind;
