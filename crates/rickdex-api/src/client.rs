// Async HTTP client for the catalog REST API.
//
// List endpoints:   GET {base}/{kind}?page=N&name=...
// Lookup endpoints: GET {base}/{kind}/{id1,id2,...}

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::kind::EntityKind;
use crate::models::{OneOrMany, PageEnvelope};
use crate::transport::TransportConfig;

// ── Error response shape from the catalog ───────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the catalog API.
///
/// Stateless apart from the connection pool inside `reqwest::Client`;
/// cheap to share behind an `Arc`.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl CatalogClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL (e.g. `https://rickandmortyapi.com/api/`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: crate::transport::DEFAULT_TIMEOUT,
        })
    }

    /// The base URL always ends with `/` so that relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch one page of a list endpoint with the given query pairs.
    pub async fn list<T: DeserializeOwned>(
        &self,
        kind: EntityKind,
        params: &[(&str, String)],
    ) -> Result<PageEnvelope<T>, Error> {
        let url = self.url(kind.path())?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        self.handle_response(resp).await
    }

    /// Fetch several entities of one kind in a single call.
    ///
    /// The upstream answers a one-id lookup with a bare object; both
    /// shapes come back as a `Vec`. An empty id list never hits the wire.
    pub async fn get_many<T: DeserializeOwned>(
        &self,
        kind: EntityKind,
        ids: &[u32],
    ) -> Result<Vec<T>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.url(&format!("{}/{joined}", kind.path()))?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let body: OneOrMany<T> = self.handle_response(resp).await?;
        Ok(body.into_vec())
    }

    // ── Response handling ────────────────────────────────────────────

    /// Timeouts carry the configured bound whether they hit while sending
    /// or while reading the body.
    fn map_transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(|e| self.map_transport_error(e))?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = preview(&body);
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let (message, reported) = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse { error: Some(msg) }) => (msg, true),
            _ if raw.is_empty() => (status.to_string(), false),
            _ => (preview(&raw).to_owned(), false),
        };

        Error::Upstream {
            status: status.as_u16(),
            message,
            reported,
        }
    }
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
