//! Character command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use rickdex_core::{Catalog, Character, Entity, EntityKind};

use crate::cli::{
    CharacterFilters, CharactersArgs, CharactersCommand, GenderArg, GlobalOpts, OutputFormat,
    StatusArg,
};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct CharacterRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Last seen")]
    last_seen: String,
    #[tabled(rename = "Episodes")]
    episodes: usize,
}

impl CharacterRow {
    pub(crate) fn new(c: &Character, painter: &Painter) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            status: painter.status(c.status),
            species: c.species.clone(),
            gender: c.gender.clone(),
            last_seen: c.last_location.name.clone(),
            episodes: c.episodes.len(),
        }
    }
}

#[derive(Tabled)]
struct AppearanceRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Air date")]
    air_date: String,
}

// ── Detail ──────────────────────────────────────────────────────────

pub(crate) fn detail_text(c: &Character, episodes: &[Entity], painter: &Painter) -> String {
    let status = painter.status(c.status);
    let created = c
        .created
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let mut out = util::fields_block(
        painter,
        &format!("{} (#{})", c.name, c.id),
        &[
            ("Status", &status),
            ("Species", &c.species),
            ("Type", &c.character_type),
            ("Gender", &c.gender),
            ("Origin", &c.origin.name),
            ("Last seen", &c.last_location.name),
            ("Image", &c.image),
            ("Created", &created),
        ],
    );

    let rows: Vec<AppearanceRow> = episodes
        .iter()
        .filter_map(Entity::as_episode)
        .map(|e| AppearanceRow {
            id: e.id,
            code: e.code.clone(),
            name: e.name.clone(),
            air_date: e.air_date.clone(),
        })
        .collect();
    let _ = writeln!(
        out,
        "\n{}",
        painter.heading(&format!("Episodes they appeared in ({})", c.episodes.len()))
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
    args: CharactersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    match args.command {
        CharactersCommand::List(filters) => {
            let loaded = util::load_list(
                catalog,
                EntityKind::Character,
                &filter_pairs(&filters),
                filters.page.page,
                global,
            )
            .await?;

            let characters: Vec<&Character> = loaded
                .response
                .items
                .iter()
                .filter_map(|e| e.as_character())
                .collect();
            if characters.is_empty() {
                output::notice("No characters matched your query.", global.quiet);
                return Ok(());
            }

            let painter = util::painter(global);
            let out = output::render_list(
                format,
                &characters,
                |c| CharacterRow::new(c, &painter),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if format == OutputFormat::Table {
                output::notice(&output::page_footer(&loaded.response.page_info), global.quiet);
            }
            Ok(())
        }

        CharactersCommand::Show { id } => {
            let detail = output::with_spinner(
                global,
                util::load_detail(catalog, EntityKind::Character, id),
            )
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

fn filter_pairs(filters: &CharacterFilters) -> Vec<(&'static str, &str)> {
    util::filter_pairs(&[
        ("name", filters.name.as_deref()),
        ("status", filters.status.map(StatusArg::as_filter)),
        ("species", filters.species.as_deref()),
        ("type", filters.character_type.as_deref()),
        ("gender", filters.gender.map(GenderArg::as_filter)),
    ])
}
