//! Shared helpers for command handlers.

use std::fmt::Write as _;

use serde::Serialize;

use rickdex_core::{Catalog, CoreError, Entity, EntityKind, ListView, Pager, Resolution, ViewPage};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output::{self, Painter};

/// Painter for one-shot commands, themed by the saved session.
pub fn painter(global: &GlobalOpts) -> Painter {
    Painter::for_global(global, config::load_session_or_default().theme)
}

/// Collect the set flags of a list command as filter pairs.
pub fn filter_pairs<'a>(pairs: &[(&'static str, Option<&'a str>)]) -> Vec<(&'static str, &'a str)> {
    pairs
        .iter()
        .filter_map(|(field, value)| value.map(|v| (*field, v)))
        .collect()
}

/// Fetch one list page for a fresh view with the given filters and page.
///
/// A page past the end of the result set falls back to page 1 with a
/// notice on stderr.
pub async fn load_list(
    catalog: &Catalog,
    kind: EntityKind,
    filters: &[(&str, &str)],
    page: u32,
    global: &GlobalOpts,
) -> Result<ViewPage, CliError> {
    let mut view = ListView::new(kind);
    view.replace_filters(filters.iter().copied())?;
    *view.pager_mut() = Pager::starting_at(page);

    let loaded = output::with_spinner(global, catalog.load_view(&mut view)).await?;
    if let Some(from) = loaded.reset_from {
        output::notice(
            &format!(
                "Page {from} is past the last page ({}); showing page 1.",
                view.pager().total_pages()
            ),
            global.quiet,
        );
    }
    Ok(loaded)
}

/// An entity with its primary references resolved, as shown by `show`.
#[derive(Debug, Serialize)]
pub struct Detail {
    pub entity: Entity,
    pub related: Vec<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Fetch an entity and resolve every one of its primary references.
pub async fn load_detail(catalog: &Catalog, kind: EntityKind, id: u32) -> Result<Detail, CoreError> {
    let entity = catalog.entity(kind, id).await?;
    let field = entity.primary_references().name;
    let Resolution { entities, notice } = catalog.resolve_field(&entity, field).await;
    Ok(Detail {
        entity,
        related: entities,
        notice,
    })
}

/// Table-mode rendering of a detail, per entity kind.
pub fn detail_text(detail: &Detail, painter: &Painter) -> String {
    let mut out = match &detail.entity {
        Entity::Character(c) => super::characters::detail_text(c, &detail.related, painter),
        Entity::Episode(e) => super::episodes::detail_text(e, &detail.related, painter),
        Entity::Location(l) => super::locations::detail_text(l, &detail.related, painter),
    };
    if let Some(ref notice) = detail.notice {
        let _ = write!(out, "\n{}", painter.dim(notice));
    }
    out
}

/// Aligned `label  value` lines under a heading.
pub fn fields_block(painter: &Painter, title: &str, fields: &[(&str, &str)]) -> String {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.heading(title));
    for (label, value) in fields {
        let value = if value.is_empty() { "-" } else { value };
        let _ = writeln!(out, "  {label:<width$}  {value}");
    }
    out
}

/// Names of resolved entities, in upstream order.
pub fn names(resolution: &Resolution) -> Vec<&str> {
    resolution.entities.iter().map(Entity::name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Painter;
    use rickdex_core::Theme;

    #[test]
    fn filter_pairs_skip_unset_flags() {
        let pairs = filter_pairs(&[
            ("name", Some("rick")),
            ("status", None),
            ("species", Some("Human")),
        ]);
        assert_eq!(pairs, vec![("name", "rick"), ("species", "Human")]);
    }

    #[test]
    fn fields_block_aligns_and_fills_blanks() {
        let painter = Painter::new(Theme::Dark, false);
        let text = fields_block(&painter, "Rick Sanchez", &[("Status", "Alive"), ("Type", "")]);
        assert_eq!(text, "Rick Sanchez\n  Status  Alive\n  Type    -\n");
    }
}
