//! Authenticated session against a Filelocker server

use super::wire::{NoData, Wire, Xml};
use crate::error::{Error, Result};
use crate::models::Envelope;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Login endpoint, relative to the base URL
pub const LOGIN_PATH: &str = "/cli/CLI_login";

/// A logged-in Filelocker session.
///
/// Holds the HTTP client (and with it the session cookie set at login), the
/// base URL and the request origin token. The origin never changes after
/// construction, so a `Session` can be shared across threads for independent
/// requests.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    base_url: String,
    origin: String,
}

impl Session {
    /// Log in and return a ready session.
    ///
    /// Posts `userId` and `CLIkey` to [`LOGIN_PATH`]. The first informational
    /// message of the response becomes the request origin. The HTTP status is
    /// not consulted; only the response body decides.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if `base_url` is malformed (no request is made)
    /// - transport errors ([`Error::Http`], [`Error::ConnectionError`], [`Error::Timeout`])
    /// - [`Error::Decode`] if the body is not well-formed XML
    /// - [`Error::LoginRejected`] if the server reported errors
    /// - [`Error::NoOrigin`] if no origin token was returned
    pub fn login(user_id: &str, api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = build_http_client(timeout)?;

        let url = format!("{base_url}{LOGIN_PATH}");
        debug!(%url, user_id, "logging in");
        let request = client
            .post(&url)
            .form(&[("CLIkey", api_key), ("userId", user_id)]);
        let envelope: Envelope<NoData> = execute::<Xml, _>(request, &url)?;
        let origin = origin_from(envelope)?;

        info!(user_id, "login succeeded");
        Ok(Self {
            client,
            base_url,
            origin,
        })
    }

    /// Build a session from a known request origin without logging in.
    ///
    /// The HTTP client starts with an empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for a malformed base URL and
    /// [`Error::NoOrigin`] if `origin` is empty.
    pub fn with_origin(base_url: &str, origin: &str, timeout: Duration) -> Result<Self> {
        if origin.is_empty() {
            return Err(Error::NoOrigin);
        }
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: normalize_base_url(base_url)?,
            origin: origin.to_string(),
        })
    }

    /// The request origin token obtained at login
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The normalized base URL (no trailing slash)
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Origin for state-changing calls.
    pub(crate) fn require_origin(&self) -> Result<&str> {
        if self.origin.is_empty() {
            return Err(Error::NoOrigin);
        }
        Ok(&self.origin)
    }

    /// POST form fields to `path` and decode the answer in format `W`.
    pub(crate) fn post_form<W, T>(&self, path: &str, form: &[(&str, String)]) -> Result<Envelope<T>>
    where
        W: Wire,
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint(path);
        let request = self.client.post(&url).form(form);
        execute::<W, T>(request, &url)
    }

    /// Start a POST to `path` for callers that need a custom body.
    pub(crate) fn post(&self, path: &str) -> (RequestBuilder, String) {
        let url = self.endpoint(path);
        (self.client.post(&url), url)
    }
}

/// Send `request` and decode its body in format `W`.
pub(crate) fn execute<W, T>(request: RequestBuilder, url: &str) -> Result<Envelope<T>>
where
    W: Wire,
    T: DeserializeOwned + Default,
{
    let response = request.header(ACCEPT, W::ACCEPT).send()?;
    let status = response.status();
    let body = response.bytes()?;
    debug!(url, status = status.as_u16(), bytes = body.len(), "POST complete");
    W::decode_envelope(&body)
}

/// Pick the origin out of a login response.
fn origin_from(envelope: Envelope<NoData>) -> Result<String> {
    if envelope.has_errors() {
        return Err(Error::LoginRejected(envelope.errors));
    }
    match envelope.info.into_iter().next() {
        Some(origin) if !origin.is_empty() => Ok(origin),
        _ => Err(Error::NoOrigin),
    }
}

/// Validate a base URL and strip trailing slashes.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] unless `raw` is an absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .user_agent(concat!("filelocker/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Http(format!("Failed to create HTTP client: {e}")))
}
