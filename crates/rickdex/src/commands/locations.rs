//! Location command handlers.

use std::fmt::Write as _;

use serde::Serialize;
use tabled::Tabled;

use rickdex_core::{Catalog, Entity, EntityKind, Location, Resolution};

use crate::cli::{GlobalOpts, LocationFilters, LocationsArgs, LocationsCommand, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Rows & listings ─────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct LocationRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    location_type: String,
    #[tabled(rename = "Dimension")]
    dimension: String,
    #[tabled(rename = "Residents")]
    residents: String,
}

impl LocationRow {
    pub(crate) fn new(l: &Location, residents: &[&str]) -> Self {
        Self {
            id: l.id,
            name: l.name.clone(),
            location_type: l.location_type.clone(),
            dimension: l.dimension.clone(),
            residents: output::preview_cell(residents, l.residents.len()),
        }
    }
}

/// A location with its resident preview, as emitted by structured formats.
#[derive(Serialize)]
struct LocationListing<'a> {
    #[serde(flatten)]
    location: &'a Location,
    resident_preview: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
}

#[derive(Tabled)]
struct ResidentRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Origin")]
    origin: String,
}

// ── Detail ──────────────────────────────────────────────────────────

pub(crate) fn detail_text(l: &Location, residents: &[Entity], painter: &Painter) -> String {
    let mut out = util::fields_block(
        painter,
        &format!("{} (#{})", l.name, l.id),
        &[("Type", &l.location_type), ("Dimension", &l.dimension)],
    );

    let rows: Vec<ResidentRow> = residents
        .iter()
        .filter_map(Entity::as_character)
        .map(|c| ResidentRow {
            id: c.id,
            name: c.name.clone(),
            status: painter.status(c.status),
            species: c.species.clone(),
            origin: c.origin.name.clone(),
        })
        .collect();
    let _ = writeln!(
        out,
        "\n{}",
        painter.heading(&format!("Residents ({})", l.residents.len()))
    );
    if rows.is_empty() {
        let _ = write!(out, "  {}", painter.dim("none"));
    } else {
        let _ = write!(out, "{}", tabled::Table::new(rows).with(tabled::settings::Style::rounded()));
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: LocationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    match args.command {
        LocationsCommand::List(filters) => {
            let loaded = util::load_list(
                catalog,
                EntityKind::Location,
                &filter_pairs(&filters),
                filters.page.page,
                global,
            )
            .await?;
            if loaded.response.is_empty() {
                output::notice("No locations matched your query.", global.quiet);
                return Ok(());
            }

            let previews = if format == OutputFormat::Plain {
                vec![Resolution::default(); loaded.response.items.len()]
            } else {
                output::with_spinner(global, catalog.previews(&loaded.response.items)).await
            };

            let listings: Vec<LocationListing<'_>> = loaded
                .response
                .items
                .iter()
                .zip(&previews)
                .filter_map(|(item, preview)| {
                    item.as_location().map(|location| LocationListing {
                        location,
                        resident_preview: util::names(preview),
                        notice: preview.notice.as_deref(),
                    })
                })
                .collect();

            let out = output::render_list(
                format,
                &listings,
                |l| LocationRow::new(l.location, &l.resident_preview),
                |l| l.location.id.to_string(),
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

        LocationsCommand::Show { id } => {
            let detail =
                output::with_spinner(global, util::load_detail(catalog, EntityKind::Location, id))
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

fn filter_pairs(filters: &LocationFilters) -> Vec<(&'static str, &str)> {
    util::filter_pairs(&[
        ("name", filters.name.as_deref()),
        ("type", filters.location_type.as_deref()),
        ("dimension", filters.dimension.as_deref()),
    ])
}
