//! Interactive browser over the persisted session.
//!
//! Each step renders the current screen, asks for one action, applies it
//! to the `SessionContext`, and saves the session. Action menus and their
//! effects are plain functions over the session so they can be tested
//! without a terminal.

use std::fmt;
use std::io::{self, IsTerminal};
use std::sync::Arc;

use dialoguer::{Input, Select};
use strum::IntoEnumIterator;
use tabled::{Table, settings::Style};
use tracing::{debug, warn};

use rickdex_core::{Catalog, Entity, EntityKind, ListView, Resolution, Screen, SessionContext};

use crate::cli::{BrowseArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::characters::CharacterRow;
use super::episodes::EpisodeRow;
use super::locations::LocationRow;
use super::util;

// ── Actions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListAction {
    NextPage,
    PrevPage,
    JumpToPage,
    OpenDetail,
    EditFilters,
    ClearFilters,
    SwitchTo(EntityKind),
    ToggleTheme,
    Quit,
}

impl fmt::Display for ListAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NextPage => f.write_str("Next page"),
            Self::PrevPage => f.write_str("Previous page"),
            Self::JumpToPage => f.write_str("Jump to page..."),
            Self::OpenDetail => f.write_str("Open details..."),
            Self::EditFilters => f.write_str("Edit filters..."),
            Self::ClearFilters => f.write_str("Clear filters"),
            Self::SwitchTo(kind) => write!(f, "Browse {}", kind.plural()),
            Self::ToggleTheme => f.write_str("Toggle theme"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailAction {
    Back,
    OpenRelated,
    ToggleTheme,
    Quit,
}

impl fmt::Display for DetailAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Back => "Back to list",
            Self::OpenRelated => "Open related...",
            Self::ToggleTheme => "Toggle theme",
            Self::Quit => "Quit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Menu for a list screen. Page moves are offered only when they would move.
fn list_actions(view: &ListView, has_items: bool) -> Vec<ListAction> {
    let pager = view.pager();
    let mut actions = Vec::new();
    if pager.has_next() {
        actions.push(ListAction::NextPage);
    }
    if pager.has_prev() {
        actions.push(ListAction::PrevPage);
    }
    if pager.total_pages() > 1 {
        actions.push(ListAction::JumpToPage);
    }
    if has_items {
        actions.push(ListAction::OpenDetail);
    }
    actions.push(ListAction::EditFilters);
    if !view.filters().is_empty() {
        actions.push(ListAction::ClearFilters);
    }
    for kind in EntityKind::iter() {
        if kind != view.kind() {
            actions.push(ListAction::SwitchTo(kind));
        }
    }
    actions.push(ListAction::ToggleTheme);
    actions.push(ListAction::Quit);
    actions
}

fn detail_actions(has_related: bool) -> Vec<DetailAction> {
    let mut actions = vec![DetailAction::Back];
    if has_related {
        actions.push(DetailAction::OpenRelated);
    }
    actions.push(DetailAction::ToggleTheme);
    actions.push(DetailAction::Quit);
    actions
}

/// Apply a list action that needs no further input.
fn apply_list_action(session: &mut SessionContext, kind: EntityKind, action: ListAction) -> Flow {
    match action {
        ListAction::NextPage => {
            session.view_mut(kind).pager_mut().next();
        }
        ListAction::PrevPage => {
            session.view_mut(kind).pager_mut().prev();
        }
        ListAction::ClearFilters => {
            session.view_mut(kind).clear_filters();
        }
        ListAction::SwitchTo(other) => session.open_list(other),
        ListAction::ToggleTheme => {
            session.toggle_theme();
        }
        ListAction::Quit => return Flow::Quit,
        ListAction::JumpToPage | ListAction::OpenDetail | ListAction::EditFilters => {}
    }
    Flow::Continue
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(catalog: &Catalog, args: BrowseArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(CliError::NotInteractive {
            command: "browse".into(),
        });
    }

    let mut session = if args.fresh {
        SessionContext::default()
    } else {
        config::load_session_or_default()
    };
    if let Some(kind) = args.kind {
        session.open_list(kind.into());
    }

    let mut browser = Browser {
        catalog,
        global,
        painter: Painter::for_global(global, session.theme),
        session,
    };
    browser.run().await
}

struct Browser<'a> {
    catalog: &'a Catalog,
    global: &'a GlobalOpts,
    painter: Painter,
    session: SessionContext,
}

impl Browser<'_> {
    async fn run(&mut self) -> Result<(), CliError> {
        loop {
            let flow = match self.session.screen {
                Screen::List { kind } => self.list_step(kind).await?,
                Screen::Detail { kind, id } => self.detail_step(kind, id).await?,
            };
            self.persist();
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn persist(&mut self) {
        self.painter = self.painter.with_theme(self.session.theme);
        match config::save_session(&self.session) {
            Ok(path) => debug!(path = %path.display(), "session saved"),
            Err(e) => warn!(error = %e, "could not save session"),
        }
    }

    fn report(&self, err: CliError) {
        output::notice(&format!("error: {err}"), false);
        if let Some(help) = miette::Diagnostic::help(&err) {
            output::notice(&self.painter.dim(&help.to_string()), false);
        }
    }

    // ── List screen ──────────────────────────────────────────────────

    async fn list_step(&mut self, kind: EntityKind) -> Result<Flow, CliError> {
        let loaded = output::with_spinner(
            self.global,
            self.catalog.load_view(self.session.view_mut(kind)),
        )
        .await;

        let items: Vec<Arc<Entity>> = match loaded {
            Ok(page) => {
                if let Some(from) = page.reset_from {
                    output::notice(
                        &format!("Page {from} is out of range; back to page 1."),
                        false,
                    );
                }
                self.render_list(kind, &page.response.items).await;
                println!("{}", self.painter.dim(&output::page_footer(&page.response.page_info)));
                page.response.items.clone()
            }
            Err(e) => {
                self.report(e.into());
                Vec::new()
            }
        };

        let view = self.session.view(kind);
        let actions = list_actions(view, !items.is_empty());
        let prompt = format!(
            "{} | page {}/{}",
            kind.plural(),
            view.page(),
            view.pager().total_pages()
        );
        let Some(action) = choose(&prompt, &actions)? else {
            return Ok(Flow::Quit);
        };

        match action {
            ListAction::JumpToPage => {
                let total = self.session.view(kind).pager().total_pages();
                let page: u32 = Input::new()
                    .with_prompt(format!("Page (1-{total})"))
                    .interact_text()?;
                self.session.view_mut(kind).pager_mut().jump(page);
            }
            ListAction::OpenDetail => {
                let labels: Vec<String> = items
                    .iter()
                    .map(|e| format!("#{} {}", e.id(), e.name()))
                    .collect();
                let picked = Select::new()
                    .with_prompt("Open")
                    .items(&labels)
                    .default(0)
                    .interact_opt()?;
                if let Some(entity) = picked.and_then(|i| items.get(i)) {
                    self.session.open_detail(entity.kind(), entity.id());
                }
            }
            ListAction::EditFilters => self.edit_filters(kind)?,
            other => return Ok(apply_list_action(&mut self.session, kind, other)),
        }
        Ok(Flow::Continue)
    }

    async fn render_list(&self, kind: EntityKind, items: &[Arc<Entity>]) {
        if items.is_empty() {
            println!("No {} matched your query.", kind.plural());
            return;
        }
        let table = match kind {
            EntityKind::Character => {
                let rows = items
                    .iter()
                    .filter_map(|e| e.as_character())
                    .map(|c| CharacterRow::new(c, &self.painter));
                Table::new(rows).with(Style::rounded()).to_string()
            }
            EntityKind::Episode | EntityKind::Location => {
                let previews = output::with_spinner(self.global, self.catalog.previews(items)).await;
                let table = preview_table(items, &previews);
                for notice in previews.iter().filter_map(|p| p.notice.as_deref()).take(1) {
                    output::notice(notice, false);
                }
                table
            }
        };
        println!("{table}");
    }

    fn edit_filters(&mut self, kind: EntityKind) -> Result<(), CliError> {
        let current = self.session.view(kind).filters().clone();
        let mut values = Vec::new();
        for field in kind.filter_fields() {
            let value: String = Input::new()
                .with_prompt(format!("{field} (blank for any)"))
                .with_initial_text(current.get(field).unwrap_or_default())
                .allow_empty(true)
                .interact_text()?;
            values.push((*field, value));
        }

        let changed = self
            .session
            .view_mut(kind)
            .replace_filters(values.iter().map(|(f, v)| (*f, v.as_str())))?;
        if changed {
            output::notice("Filters updated; back to page 1.", false);
        }
        Ok(())
    }

    // ── Detail screen ────────────────────────────────────────────────

    async fn detail_step(&mut self, kind: EntityKind, id: u32) -> Result<Flow, CliError> {
        let detail = match output::with_spinner(
            self.global,
            util::load_detail(self.catalog, kind, id),
        )
        .await
        {
            Ok(detail) => detail,
            Err(e) => {
                self.report(e.into());
                self.session.back();
                return Ok(Flow::Continue);
            }
        };
        println!("{}", util::detail_text(&detail, &self.painter));

        let actions = detail_actions(!detail.related.is_empty());
        let prompt = format!("{kind} #{id}");
        let Some(action) = choose(&prompt, &actions)? else {
            return Ok(Flow::Quit);
        };

        match action {
            DetailAction::Back => self.session.back(),
            DetailAction::OpenRelated => {
                let labels: Vec<String> = detail
                    .related
                    .iter()
                    .map(|e| format!("#{} {}", e.id(), e.name()))
                    .collect();
                let picked = Select::new()
                    .with_prompt("Open")
                    .items(&labels)
                    .default(0)
                    .interact_opt()?;
                if let Some(entity) = picked.and_then(|i| detail.related.get(i)) {
                    self.session.open_detail(entity.kind(), entity.id());
                }
            }
            DetailAction::ToggleTheme => {
                self.session.toggle_theme();
            }
            DetailAction::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Show a menu; `None` when the user escapes out of it.
fn choose<T: Copy + fmt::Display>(prompt: &str, actions: &[T]) -> Result<Option<T>, CliError> {
    let picked = Select::new()
        .with_prompt(prompt)
        .items(actions)
        .default(0)
        .interact_opt()?;
    Ok(picked.and_then(|i| actions.get(i).copied()))
}

fn preview_table(items: &[Arc<Entity>], previews: &[Resolution]) -> String {
    let mut episodes = Vec::new();
    let mut locations = Vec::new();
    for (item, preview) in items.iter().zip(previews) {
        let names = util::names(preview);
        match item.as_ref() {
            Entity::Episode(e) => episodes.push(EpisodeRow::new(e, &names)),
            Entity::Location(l) => locations.push(LocationRow::new(l, &names)),
            Entity::Character(_) => {}
        }
    }
    if locations.is_empty() {
        Table::new(episodes).with(Style::rounded()).to_string()
    } else {
        Table::new(locations).with(Style::rounded()).to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rickdex_core::{PageInfo, Theme};

    fn observed(kind: EntityKind, page: u32, total_pages: u32) -> ListView {
        let mut view = ListView::new(kind);
        view.pager_mut().observe(&PageInfo {
            total_count: u64::from(total_pages) * 20,
            total_pages,
            current_page: 1,
        });
        view.pager_mut().jump(page);
        view
    }

    #[test]
    fn single_page_offers_no_paging() {
        let view = observed(EntityKind::Character, 1, 1);
        let actions = list_actions(&view, true);
        assert!(!actions.contains(&ListAction::NextPage));
        assert!(!actions.contains(&ListAction::PrevPage));
        assert!(!actions.contains(&ListAction::JumpToPage));
        assert!(!actions.contains(&ListAction::ClearFilters));
        assert_eq!(actions.last(), Some(&ListAction::Quit));
    }

    #[test]
    fn middle_page_offers_both_directions() {
        let view = observed(EntityKind::Location, 3, 7);
        let actions = list_actions(&view, true);
        assert_eq!(
            &actions[..4],
            &[
                ListAction::NextPage,
                ListAction::PrevPage,
                ListAction::JumpToPage,
                ListAction::OpenDetail
            ]
        );
        assert!(actions.contains(&ListAction::SwitchTo(EntityKind::Character)));
        assert!(!actions.contains(&ListAction::SwitchTo(EntityKind::Location)));
    }

    #[test]
    fn empty_page_cannot_open_details() {
        let mut view = observed(EntityKind::Episode, 1, 1);
        view.set_filter("name", "zzzz").unwrap();
        let actions = list_actions(&view, false);
        assert!(!actions.contains(&ListAction::OpenDetail));
        assert!(actions.contains(&ListAction::ClearFilters));
    }

    #[test]
    fn actions_move_the_session() {
        let mut session = SessionContext::default();
        *session.view_mut(EntityKind::Character) = observed(EntityKind::Character, 1, 3);

        let flow = apply_list_action(&mut session, EntityKind::Character, ListAction::NextPage);
        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.view(EntityKind::Character).page(), 2);

        apply_list_action(&mut session, EntityKind::Character, ListAction::PrevPage);
        apply_list_action(&mut session, EntityKind::Character, ListAction::PrevPage);
        assert_eq!(session.view(EntityKind::Character).page(), 1);

        apply_list_action(&mut session, EntityKind::Character, ListAction::ToggleTheme);
        assert_eq!(session.theme, Theme::Light);

        apply_list_action(
            &mut session,
            EntityKind::Character,
            ListAction::SwitchTo(EntityKind::Episode),
        );
        assert_eq!(session.active_kind(), EntityKind::Episode);

        let flow = apply_list_action(&mut session, EntityKind::Episode, ListAction::Quit);
        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn clearing_filters_returns_to_first_page() {
        let mut session = SessionContext::default();
        let mut view = observed(EntityKind::Character, 1, 5);
        view.set_filter("status", "dead").unwrap();
        view.pager_mut().jump(4);
        *session.view_mut(EntityKind::Character) = view;
        assert_eq!(session.view(EntityKind::Character).page(), 4);

        apply_list_action(&mut session, EntityKind::Character, ListAction::ClearFilters);
        let view = session.view(EntityKind::Character);
        assert!(view.filters().is_empty());
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn detail_menu_depends_on_related() {
        assert_eq!(
            detail_actions(false),
            vec![DetailAction::Back, DetailAction::ToggleTheme, DetailAction::Quit]
        );
        assert!(detail_actions(true).contains(&DetailAction::OpenRelated));
    }
}
