//! Shared configuration for the rickdex CLI.
//!
//! TOML config with `RICKDEX_*` environment overrides, translation to
//! `rickdex_core::CatalogConfig`, and on-disk persistence of the browse
//! session. The CLI adds `GlobalOpts`-aware wrappers on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use rickdex_core::{CachePolicy, CatalogConfig, SessionContext, config::DEFAULT_BASE_URL};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("unreadable session file {}: {reason}", path.display())]
    Session { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Output defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,

    /// Where the catalog lives.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Cache freshness and size.
    #[serde(default)]
    pub cache: CacheSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSection {
    /// API root (e.g., "https://rickandmortyapi.com/api/").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Related entities resolved per item on list pages.
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            preview_limit: default_preview_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheSection {
    /// Entry lifetime in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u64,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl: default_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    20
}
fn default_preview_limit() -> usize {
    10
}
fn default_ttl() -> u64 {
    300
}
fn default_max_entries() -> usize {
    50
}

// ── Platform paths ──────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "rickdex", "rickdex")
}

fn dirs_fallback(kind: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(kind);
    p.push("rickdex");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the browse session is kept between runs.
pub fn session_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share").join("session.json"),
        |dirs| dirs.data_dir().join("session.json"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("RICKDEX_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(&path, cfg)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build the runtime `CatalogConfig`.
pub fn to_catalog_config(cfg: &Config) -> Result<CatalogConfig, ConfigError> {
    let base_url: url::Url =
        cfg.catalog
            .base_url
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "catalog.base_url".into(),
                reason: format!("invalid URL: {}", cfg.catalog.base_url),
            })?;

    if cfg.catalog.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "catalog.timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    Ok(CatalogConfig {
        base_url,
        timeout: Duration::from_secs(cfg.catalog.timeout),
        cache: CachePolicy {
            ttl: Duration::from_secs(cfg.cache.ttl),
            max_entries: cfg.cache.max_entries,
        },
        preview_limit: cfg.catalog.preview_limit,
    })
}

// ── Session persistence ─────────────────────────────────────────────

/// Load the saved session, or a fresh one when none was saved yet.
pub fn load_session() -> Result<SessionContext, ConfigError> {
    load_session_from(&session_path())
}

pub fn load_session_from(path: &Path) -> Result<SessionContext, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved session");
            return Ok(SessionContext::default());
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&raw).map_err(|e| ConfigError::Session {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn save_session(session: &SessionContext) -> Result<PathBuf, ConfigError> {
    let path = session_path();
    save_session_to(&path, session)?;
    Ok(path)
}

pub fn save_session_to(path: &Path, session: &SessionContext) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session).map_err(|e| ConfigError::Session {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Forget the saved session. Returns whether a file was removed.
pub fn clear_session_at(path: &Path) -> Result<bool, ConfigError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
