//! Clap derive structures for the `rickdex` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use rickdex_core::EntityKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rickdex -- browse the Rick and Morty multiverse from a terminal
#[derive(Debug, Parser)]
#[command(
    name = "rickdex",
    version,
    about = "Browse Rick and Morty characters, episodes, and locations",
    long_about = "A command-line browser for the public Rick and Morty catalog.\n\n\
        Lists are paginated and filterable, related entities are resolved in\n\
        a single bulk lookup, and responses are cached for five minutes.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Catalog API root (overrides config)
    #[arg(long, env = "RICKDEX_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "RICKDEX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "RICKDEX_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search and inspect characters
    #[command(alias = "chars", alias = "c")]
    Characters(CharactersArgs),

    /// Search episodes and their cast
    #[command(alias = "ep", alias = "e")]
    Episodes(EpisodesArgs),

    /// Search locations and their residents
    #[command(alias = "loc", alias = "l")]
    Locations(LocationsArgs),

    /// Interactive browser with a persisted session
    #[command(alias = "b")]
    Browse(BrowseArgs),

    /// Inspect or reset the saved browse session
    Session(SessionArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "character")]
    Characters,
    #[value(alias = "episode")]
    Episodes,
    #[value(alias = "location")]
    Locations,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Characters => Self::Character,
            KindArg::Episodes => Self::Episode,
            KindArg::Locations => Self::Location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Alive,
    Dead,
    Unknown,
}

impl StatusArg {
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Female,
    Male,
    Genderless,
    Unknown,
}

impl GenderArg {
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Genderless => "genderless",
            Self::Unknown => "unknown",
        }
    }
}

/// Page selection shared by every list command.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page to show (out-of-range pages fall back to 1)
    #[arg(long, short = 'p', default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CHARACTERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CharactersArgs {
    #[command(subcommand)]
    pub command: CharactersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CharactersCommand {
    /// List characters matching the filters
    #[command(alias = "ls")]
    List(CharacterFilters),

    /// Show one character and every episode they appear in
    Show {
        /// Character ID
        id: u32,
    },
}

#[derive(Debug, Args)]
pub struct CharacterFilters {
    /// Name contains (e.g., "Rick Sanchez")
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Life status
    #[arg(long, short = 's')]
    pub status: Option<StatusArg>,

    /// Species (e.g., Human, Alien)
    #[arg(long)]
    pub species: Option<String>,

    /// Sub-species or variant
    #[arg(long = "type", short = 't')]
    pub character_type: Option<String>,

    /// Gender
    #[arg(long, short = 'g')]
    pub gender: Option<GenderArg>,

    #[command(flatten)]
    pub page: PageArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EPISODES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EpisodesArgs {
    #[command(subcommand)]
    pub command: EpisodesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EpisodesCommand {
    /// List episodes with a preview of their cast
    #[command(alias = "ls")]
    List(EpisodeFilters),

    /// Show one episode and its full cast
    Show {
        /// Episode ID
        id: u32,
    },
}

#[derive(Debug, Args)]
pub struct EpisodeFilters {
    /// Name contains (e.g., "Pilot")
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Episode code (e.g., S01E01, or S01 for a season)
    #[arg(long, short = 'c')]
    pub code: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOCATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LocationsArgs {
    #[command(subcommand)]
    pub command: LocationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocationsCommand {
    /// List locations with a preview of their residents
    #[command(alias = "ls")]
    List(LocationFilters),

    /// Show one location and all of its residents
    Show {
        /// Location ID
        id: u32,
    },
}

#[derive(Debug, Args)]
pub struct LocationFilters {
    /// Name contains (e.g., "Citadel of Ricks")
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Location type (e.g., Planet)
    #[arg(long = "type", short = 't')]
    pub location_type: Option<String>,

    /// Dimension (e.g., "Dimension C-137")
    #[arg(long, short = 'd')]
    pub dimension: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BROWSE / SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// List to open (defaults to wherever the last session left off)
    pub kind: Option<KindArg>,

    /// Start from a fresh session instead of the saved one
    #[arg(long)]
    pub fresh: bool,
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Display the saved session (screen, filters, pages, theme)
    Show,

    /// Forget the saved session
    Reset,

    /// Print the session file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init {
        /// Write the defaults without prompting
        #[arg(long)]
        defaults: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
