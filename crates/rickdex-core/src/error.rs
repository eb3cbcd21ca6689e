// ── Core error types ──
//
// User-facing errors from rickdex-core. Consumers never match on HTTP
// plumbing directly; the `From<rickdex_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::EntityKind;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the catalog at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Catalog request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("No {kind} with id {id}")]
    NotFound { kind: EntityKind, id: u32 },

    #[error("Unknown {kind} filter '{field}' (expected one of: {expected})")]
    UnknownFilter {
        kind: EntityKind,
        field: String,
        expected: String,
    },

    // ── Upstream errors (wrapped, not exposed raw) ───────────────────
    #[error("{message}")]
    Upstream {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The `{ "error": "..." }` shape handed to presentation code that wants
/// to render a failure as data instead of an exception path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl CoreError {
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Upstream {
                    status: Some(404),
                    ..
                }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<rickdex_api::Error> for CoreError {
    fn from(err: rickdex_api::Error) -> Self {
        match err {
            rickdex_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Upstream {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            rickdex_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            rickdex_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            rickdex_api::Error::HttpClient(msg) => CoreError::Config {
                message: format!("HTTP client setup failed: {msg}"),
            },
            rickdex_api::Error::Upstream { status, message, .. } => CoreError::Upstream {
                message: format!("API Error {status}: {message}"),
                status: Some(status),
            },
            rickdex_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_kept() {
        let err = CoreError::from(rickdex_api::Error::Upstream {
            status: 500,
            message: "boom".into(),
            reported: true,
        });
        assert!(matches!(err, CoreError::Upstream { status: Some(500), .. }));
        assert_eq!(err.to_error_body().error, "API Error 500: boom");
    }

    #[test]
    fn not_found_detection() {
        let err = CoreError::NotFound {
            kind: EntityKind::Character,
            id: 9999,
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No character with id 9999");
    }
}
