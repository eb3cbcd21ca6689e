//! Browsing core between `rickdex-api` and presentation consumers (the CLI).
//!
//! This crate owns the reference-resolution and pagination layer of the
//! catalog browser:
//!
//! - **[`Catalog`]**: Facade over the API client. Serves list pages
//!   through a [`ResourceCache`], resolves cross-entity references through
//!   the [`BatchResolver`], and keeps [`ListView`] pagers in bounds.
//!
//! - **[`ResourceCache`]**: TTL + capacity bounded memoization keyed by
//!   [`Signature`], with an injectable [`Clock`] so expiry is testable.
//!
//! - **[`BatchResolver`]**: Turns a list of reference URLs into entities
//!   with a single bulk lookup. Failures become a non-fatal notice.
//!
//! - **[`Pager`]** / **[`QueryBuilder`]**: Deterministic page transitions
//!   and filter-to-parameter assembly.
//!
//! - **[`SessionContext`]**: Explicit, serializable navigation state
//!   holding the active screen, the per-kind list views and the theme.

pub mod cache;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod pager;
pub mod query;
pub mod reference;
pub mod resolver;
pub mod session;
pub mod signature;

mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CachePolicy, ResourceCache};
pub use catalog::{Catalog, CacheStats, ViewPage};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CatalogConfig;
pub use error::{CoreError, ErrorBody};
pub use pager::{Pager, PagerSignal};
pub use query::{FilterState, QueryBuilder, RequestParams};
pub use resolver::{BatchResolver, Resolution};
pub use session::{ListView, Screen, SessionContext, Theme};
pub use signature::Signature;

pub use model::{
    Character, Entity, EntityKind, Episode, LifeStatus, ListResponse, Location, PageInfo, Place,
    ReferenceField,
};
