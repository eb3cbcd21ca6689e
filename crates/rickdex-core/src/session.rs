// ── Session context ──
//
// All navigation state one user carries between interactions: the active
// screen, a list view (filters + pager) per entity kind, and the theme.
// Presentation code threads this value through explicitly and persists it
// however it likes; it is plain serde data.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::EntityKind;
use crate::pager::Pager;
use crate::query::{FilterState, QueryBuilder, RequestParams};

/// Filters and page cursor of one paginated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    kind: EntityKind,
    #[serde(default)]
    filters: FilterState,
    #[serde(default)]
    pager: Pager,
}

impl ListView {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            filters: FilterState::new(),
            pager: Pager::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn page(&self) -> u32 {
        self.pager.page()
    }

    /// Set one filter. A change resets the pager to page 1 before the next
    /// request is built. Returns whether the filter changed.
    pub fn set_filter(&mut self, field: &str, value: &str) -> Result<bool, CoreError> {
        if !self.kind.accepts_filter(field) {
            return Err(CoreError::UnknownFilter {
                kind: self.kind,
                field: field.to_owned(),
                expected: self.kind.filter_fields().join(", "),
            });
        }
        let changed = self.filters.set(field, value);
        if changed {
            self.on_filter_changed();
        }
        Ok(changed)
    }

    /// Replace every filter at once; resets the pager if anything differs.
    pub fn replace_filters<'a>(
        &mut self,
        values: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<bool, CoreError> {
        let mut next = ListView::new(self.kind);
        for (field, value) in values {
            next.set_filter(field, value)?;
        }
        if next.filters == self.filters {
            return Ok(false);
        }
        self.filters = next.filters;
        self.on_filter_changed();
        Ok(true)
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = self.filters.clear();
        if changed {
            self.on_filter_changed();
        }
        changed
    }

    /// Filter edits invalidate the page cursor: the narrowed result set may
    /// not reach the page that was being shown.
    pub fn on_filter_changed(&mut self) {
        self.pager.reset();
    }

    pub fn request(&self) -> RequestParams {
        QueryBuilder::build(&self.filters, self.pager.page())
    }
}

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    List { kind: EntityKind },
    Detail { kind: EntityKind, id: u32 },
}

impl Default for Screen {
    fn default() -> Self {
        Self::List {
            kind: EntityKind::Character,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Per-user navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub screen: Screen,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "characters_view")]
    characters: ListView,
    #[serde(default = "episodes_view")]
    episodes: ListView,
    #[serde(default = "locations_view")]
    locations: ListView,
}

fn characters_view() -> ListView {
    ListView::new(EntityKind::Character)
}
fn episodes_view() -> ListView {
    ListView::new(EntityKind::Episode)
}
fn locations_view() -> ListView {
    ListView::new(EntityKind::Location)
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            screen: Screen::default(),
            theme: Theme::default(),
            characters: characters_view(),
            episodes: episodes_view(),
            locations: locations_view(),
        }
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, kind: EntityKind) -> &ListView {
        match kind {
            EntityKind::Character => &self.characters,
            EntityKind::Episode => &self.episodes,
            EntityKind::Location => &self.locations,
        }
    }

    pub fn view_mut(&mut self, kind: EntityKind) -> &mut ListView {
        match kind {
            EntityKind::Character => &mut self.characters,
            EntityKind::Episode => &mut self.episodes,
            EntityKind::Location => &mut self.locations,
        }
    }

    /// The kind whose list is shown, or whose list a detail returns to.
    pub fn active_kind(&self) -> EntityKind {
        match self.screen {
            Screen::List { kind } | Screen::Detail { kind, .. } => kind,
        }
    }

    /// Switch to a list. Its filters and page are kept from last time.
    pub fn open_list(&mut self, kind: EntityKind) {
        self.screen = Screen::List { kind };
    }

    pub fn open_detail(&mut self, kind: EntityKind, id: u32) {
        self.screen = Screen::Detail { kind, id };
    }

    /// From a detail screen back to the list it came from.
    pub fn back(&mut self) {
        self.screen = Screen::List {
            kind: self.active_kind(),
        };
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::PageInfo;

    fn observe(view: &mut ListView, total_pages: u32) {
        let info = PageInfo {
            total_count: u64::from(total_pages) * 20,
            total_pages,
            current_page: view.page(),
        };
        view.pager_mut().observe(&info);
    }

    #[test]
    fn filter_change_resets_page_before_next_build() {
        let mut view = ListView::new(EntityKind::Character);
        observe(&mut view, 10);
        view.pager_mut().jump(4);
        assert_eq!(view.request().page, 4);

        assert!(view.set_filter("status", "alive").unwrap());
        let params = view.request();
        assert_eq!(params.page, 1);
        assert_eq!(params.filters, vec![("status".to_owned(), "alive".to_owned())]);
    }

    #[test]
    fn unchanged_filter_keeps_page() {
        let mut view = ListView::new(EntityKind::Character);
        view.set_filter("name", "rick").unwrap();
        observe(&mut view, 3);
        view.pager_mut().next();

        assert!(!view.set_filter("name", "rick").unwrap());
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let mut view = ListView::new(EntityKind::Episode);
        let err = view.set_filter("gender", "female").unwrap_err();
        assert!(matches!(err, CoreError::UnknownFilter { .. }));
    }

    #[test]
    fn replace_filters_resets_only_on_difference() {
        let mut view = ListView::new(EntityKind::Location);
        view.replace_filters([("type", "Planet")]).unwrap();
        observe(&mut view, 5);
        view.pager_mut().jump(3);

        assert!(!view.replace_filters([("type", "Planet"), ("name", "")]).unwrap());
        assert_eq!(view.page(), 3);

        assert!(view.replace_filters([("dimension", "C-137")]).unwrap());
        assert_eq!(view.page(), 1);
        assert_eq!(view.filters().get("type"), None);
    }

    #[test]
    fn detail_navigation_round_trip() {
        let mut session = SessionContext::new();
        session.open_list(EntityKind::Episode);
        session.open_detail(EntityKind::Episode, 28);
        assert_eq!(
            session.screen,
            Screen::Detail {
                kind: EntityKind::Episode,
                id: 28
            }
        );

        session.back();
        assert_eq!(session.screen, Screen::List { kind: EntityKind::Episode });
    }

    #[test]
    fn views_are_independent() {
        let mut session = SessionContext::new();
        observe(session.view_mut(EntityKind::Character), 42);
        session.view_mut(EntityKind::Character).pager_mut().jump(7);

        assert_eq!(session.view(EntityKind::Character).page(), 7);
        assert_eq!(session.view(EntityKind::Episode).page(), 1);
    }

    #[test]
    fn theme_toggles() {
        let mut session = SessionContext::new();
        assert_eq!(session.theme, Theme::Dark);
        assert_eq!(session.toggle_theme(), Theme::Light);
        assert_eq!(session.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn survives_serialization() {
        let mut session = SessionContext::new();
        session.view_mut(EntityKind::Character).set_filter("gender", "female").unwrap();
        session.open_detail(EntityKind::Character, 1);

        let json = serde_json::to_string(&session).unwrap();
        let restored: SessionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn partial_session_fills_defaults() {
        let restored: SessionContext = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(restored.theme, Theme::Light);
        assert_eq!(restored.view(EntityKind::Location).kind(), EntityKind::Location);
    }
}
