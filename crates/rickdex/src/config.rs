//! CLI configuration: thin wrapper around `rickdex_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--base-url, --timeout, -o, --color).

use clap::ValueEnum;
use tracing::warn;

use rickdex_core::{CatalogConfig, SessionContext};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use rickdex_config::{
    Config, clear_session_at, config_path, load_config, load_config_or_default, load_session,
    save_config, save_session, session_path,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Fill unset output flags from the config file's `[defaults]`.
///
/// Unparseable config values are ignored with a warning rather than
/// failing every command.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = parse_value::<OutputFormat>("defaults.output", &cfg.defaults.output);
    }
    if global.color.is_none() {
        global.color = parse_value::<ColorMode>("defaults.color", &cfg.defaults.color);
    }
}

fn parse_value<T: ValueEnum>(key: &str, raw: &str) -> Option<T> {
    match T::from_str(raw, true) {
        Ok(value) => Some(value),
        Err(reason) => {
            warn!(key, value = raw, %reason, "ignoring invalid config value");
            None
        }
    }
}

/// Translate config + global flags into a `CatalogConfig`.
///
/// CLI flag overrides take priority over config values.
pub fn resolve_catalog_config(cfg: &Config, global: &GlobalOpts) -> Result<CatalogConfig, CliError> {
    let mut cfg = cfg.clone();
    if let Some(ref url) = global.base_url {
        cfg.catalog.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.catalog.timeout = timeout;
    }
    Ok(rickdex_config::to_catalog_config(&cfg)?)
}

/// The saved session, or a fresh one if it is missing or unreadable.
pub fn load_session_or_default() -> SessionContext {
    load_session().unwrap_or_else(|e| {
        warn!(error = %e, "discarding unreadable session");
        SessionContext::default()
    })
}
