use thiserror::Error;

/// Top-level error type for the `rickdex-api` crate.
///
/// Covers every failure mode of a catalog request: building the HTTP
/// client, transport, upstream status, and JSON decoding.
/// `rickdex-core` maps these into user-facing values.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    // ── Upstream ────────────────────────────────────────────────────
    /// Non-success status. `message` is the upstream `{"error": ...}`
    /// text when present (`reported`), otherwise a preview of the raw body.
    #[error("API error {status}: {message}")]
    Upstream {
        status: u16,
        message: String,
        reported: bool,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the upstream answered 404.
    ///
    /// List endpoints use 404 for "no results"; id lookups use it for
    /// unknown identifiers.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Upstream { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` for a 404 that the catalog itself answered with an
    /// `{"error": ...}` body, as opposed to a path the server does not know.
    pub fn is_reported_not_found(&self) -> bool {
        matches!(
            self,
            Self::Upstream {
                status: 404,
                reported: true,
                ..
            }
        )
    }

    /// HTTP status code, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
