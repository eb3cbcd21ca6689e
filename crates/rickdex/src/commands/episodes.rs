//! Episode command handlers.

use std::fmt::Write as _;

use serde::Serialize;
use tabled::Tabled;

use rickdex_core::{Catalog, Entity, EntityKind, Episode, Resolution};

use crate::cli::{EpisodeFilters, EpisodesArgs, EpisodesCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Rows & listings ─────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct EpisodeRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Air date")]
    air_date: String,
    #[tabled(rename = "Characters")]
    characters: String,
}

/// An episode with its cast preview, as emitted by structured formats.
#[derive(Serialize)]
struct EpisodeListing<'a> {
    #[serde(flatten)]
    episode: &'a Episode,
    cast_preview: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
}

impl EpisodeRow {
    pub(crate) fn new(e: &Episode, cast: &[&str]) -> Self {
        Self {
            id: e.id,
            code: e.code.clone(),
            name: e.name.clone(),
            air_date: e.air_date.clone(),
            characters: output::preview_cell(cast, e.characters.len()),
        }
    }
}

#[derive(Tabled)]
struct CastRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Species")]
    species: String,
}

// ── Detail ──────────────────────────────────────────────────────────

pub(crate) fn detail_text(e: &Episode, cast: &[Entity], painter: &Painter) -> String {
    let mut out = util::fields_block(
        painter,
        &format!("{} (#{})", e.name, e.id),
        &[("Code", &e.code), ("Air date", &e.air_date)],
    );

    let rows: Vec<CastRow> = cast
        .iter()
        .filter_map(Entity::as_character)
        .map(|c| CastRow {
            id: c.id,
            name: c.name.clone(),
            status: painter.status(c.status),
            species: c.species.clone(),
        })
        .collect();
    let _ = writeln!(
        out,
        "\n{}",
        painter.heading(&format!("Characters ({})", e.characters.len()))
    );
    if rows.is_empty() {
        let _ = write!(out, "  {}", painter.dim("none resolved"));
    } else {
        let _ = write!(out, "{}", tabled::Table::new(rows).with(tabled::settings::Style::rounded()));
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: EpisodesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    match args.command {
        EpisodesCommand::List(filters) => {
            let loaded = util::load_list(
                catalog,
                EntityKind::Episode,
                &filter_pairs(&filters),
                filters.page.page,
                global,
            )
            .await?;
            if loaded.response.is_empty() {
                output::notice("No episodes matched your query.", global.quiet);
                return Ok(());
            }

            // ids only: skip resolving the casts
            let previews = if format == OutputFormat::Plain {
                vec![Resolution::default(); loaded.response.items.len()]
            } else {
                output::with_spinner(global, catalog.previews(&loaded.response.items)).await
            };

            let listings: Vec<EpisodeListing<'_>> = loaded
                .response
                .items
                .iter()
                .zip(&previews)
                .filter_map(|(item, preview)| {
                    item.as_episode().map(|episode| EpisodeListing {
                        episode,
                        cast_preview: util::names(preview),
                        notice: preview.notice.as_deref(),
                    })
                })
                .collect();

            let out = output::render_list(
                format,
                &listings,
                |l| EpisodeRow::new(l.episode, &l.cast_preview),
                |l| l.episode.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if format == OutputFormat::Table {
                let mut notices: Vec<&str> =
                    previews.iter().filter_map(|p| p.notice.as_deref()).collect();
                notices.dedup();
                for notice in notices {
                    output::notice(notice, global.quiet);
                }
                output::notice(&output::page_footer(&loaded.response.page_info), global.quiet);
            }
            Ok(())
        }

        EpisodesCommand::Show { id } => {
            let detail =
                output::with_spinner(global, util::load_detail(catalog, EntityKind::Episode, id))
                    .await?;
            let painter = util::painter(global);
            let out = output::render_single(
                format,
                &detail,
                |d| util::detail_text(d, &painter),
                |d| d.entity.id().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn filter_pairs(filters: &EpisodeFilters) -> Vec<(&'static str, &str)> {
    util::filter_pairs(&[
        ("name", filters.name.as_deref()),
        ("episode", filters.code.as_deref()),
    ])
}
