//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use rickdex_core::{LifeStatus, PageInfo, Theme};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Status and accent colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    theme: Theme,
    enabled: bool,
}

impl Painter {
    pub fn new(theme: Theme, enabled: bool) -> Self {
        Self { theme, enabled }
    }

    pub fn for_global(global: &GlobalOpts, theme: Theme) -> Self {
        Self::new(theme, should_color(global.color_mode()))
    }

    pub fn with_theme(self, theme: Theme) -> Self {
        Self { theme, ..self }
    }

    /// Status label: green alive, red dead, yellow unknown. The light
    /// theme uses the darker variants.
    pub fn status(&self, status: LifeStatus) -> String {
        let label = status_label(status);
        if !self.enabled {
            return label.to_owned();
        }
        match (self.theme, status) {
            (Theme::Dark, LifeStatus::Alive) => label.bright_green().to_string(),
            (Theme::Dark, LifeStatus::Dead) => label.bright_red().to_string(),
            (Theme::Dark, LifeStatus::Unknown) => label.bright_yellow().to_string(),
            (Theme::Light, LifeStatus::Alive) => label.green().to_string(),
            (Theme::Light, LifeStatus::Dead) => label.red().to_string(),
            (Theme::Light, LifeStatus::Unknown) => label.yellow().to_string(),
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_owned();
        }
        match self.theme {
            Theme::Dark => text.bold().bright_cyan().to_string(),
            Theme::Light => text.bold().blue().to_string(),
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_owned()
        }
    }
}

pub fn status_label(status: LifeStatus) -> &'static str {
    match status {
        LifeStatus::Alive => "Alive",
        LifeStatus::Dead => "Dead",
        LifeStatus::Unknown => "Unknown",
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since detail views don't use the `Tabled` derive.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a non-fatal message on stderr, respecting quiet mode.
pub fn notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

/// Footer line under a list table.
pub fn page_footer(info: &PageInfo) -> String {
    format!(
        "Page {} of {} | {} total",
        info.current_page, info.total_pages, info.total_count
    )
}

/// Join related names for a table cell, noting how many were left out.
pub fn preview_cell(names: &[&str], total: usize) -> String {
    let shown = names.join(", ");
    let hidden = total.saturating_sub(names.len());
    if hidden == 0 {
        shown
    } else if shown.is_empty() {
        format!("({hidden} more)")
    } else {
        format!("{shown} (+{hidden} more)")
    }
}

// ── Progress ─────────────────────────────────────────────────────────

/// Await `fut` behind a stderr spinner when stderr is a terminal.
pub async fn with_spinner<F: Future>(global: &GlobalOpts, fut: F) -> F::Output {
    if global.quiet || !io::stderr().is_terminal() {
        return fut.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Fetching data from the multiverse...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    if compact {
        render_json_compact(data)
    } else {
        render_json_pretty(data)
    }
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
