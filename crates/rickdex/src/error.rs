//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use rickdex_config::ConfigError;
use rickdex_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the catalog at {url}")]
    #[diagnostic(
        code(rickdex::connection_failed),
        help(
            "Check your network connection and the catalog URL.\n\
             URL: {url}\n\
             Override with: rickdex --base-url <URL> ..."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(rickdex::timeout),
        help("Increase timeout with --timeout or set catalog.timeout in the config file.")
    )]
    Timeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────

    #[error("No {kind} with id {id}")]
    #[diagnostic(
        code(rickdex::not_found),
        help("Run: rickdex {list_command} to see available ids")
    )]
    NotFound {
        kind: String,
        id: u32,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(rickdex::api_error))]
    ApiError {
        status: Option<u16>,
        message: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rickdex::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(rickdex::config),
        help("Check the config file or RICKDEX_* environment variables.")
    )]
    Config(Box<figment::Error>),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(rickdex::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error("Saved session at {path} is unreadable: {reason}")]
    #[diagnostic(
        code(rickdex::session),
        help("Start over with: rickdex session reset")
    )]
    Session { path: String, reason: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{command}' needs an interactive terminal")]
    #[diagnostic(
        code(rickdex::not_interactive),
        help("Use the list/show subcommands for scripting, e.g. rickdex characters list -o json")
    )]
    NotInteractive { command: String },

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(rickdex::prompt))]
    Prompt(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not serialize config: {0}")]
    #[diagnostic(code(rickdex::toml))]
    Toml(#[from] toml::ser::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. }
            | Self::ApiError {
                status: Some(404),
                ..
            } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ConfigExists { .. } | Self::NotInteractive { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound { kind, id } => CliError::NotFound {
                kind: kind.to_string(),
                id,
                list_command: format!("{} list", kind.plural()),
            },

            CoreError::UnknownFilter {
                kind,
                field,
                expected,
            } => CliError::Validation {
                field,
                reason: format!("not a {kind} filter (expected one of: {expected})"),
            },

            CoreError::Upstream { message, status } => CliError::ApiError { status, message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                status: None,
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(inner) => CliError::Config(inner),
            ConfigError::Session { path, reason } => CliError::Session {
                path: path.display().to_string(),
                reason,
            },
            ConfigError::Serialization(e) => CliError::Toml(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
