//! HTTP client for the Monster Siren API.
//!
//! All requests are plain `GET`s against a fixed base URL:
//!
//! 1. The resource service builds a path relative to the base, e.g.
//!    `album/8930/detail` or `search/news?keyword=...&lastCid=...`
//! 2. The [`Transport`] fetches the whole body
//! 3. The body is decoded into a [`ResponsePackage`]
//!
//! The transport knows nothing about envelopes. Services own the
//! `code`-to-error mapping, so the same transport serves every resource.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::album::AlbumService;
use crate::envelope::ResponsePackage;
use crate::error::{Result, SirenError};
use crate::news::NewsService;
use crate::search::SearchService;
use crate::song::SongService;

/// Root of the public API.
pub const BASE_URL: &str = "https://monster-siren.hypergryph.com/api/";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches raw response bodies.
///
/// One call is one `GET`. Implementations must not decode or retry, and
/// must report every network-level failure as [`SirenError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `path` (relative to the base URL, query string included) and
    /// return the full body.
    async fn get(&self, path: &str) -> Result<Vec<u8>>;
}

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root. Always ends with `/` so relative paths join beneath it.
    pub base_url: Url,
    pub user_agent: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(BASE_URL).expect("BASE_URL is a valid URL"),
            user_agent: USER_AGENT.to_owned(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// Default settings pointed at a different API root.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            base_url: url,
            ..Self::default()
        })
    }
}

/// [`Transport`] backed by a single [`reqwest::Client`].
///
/// The base URL is fixed at construction. The client is safe to share
/// between concurrent calls.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build the underlying `reqwest::Client` from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url,
        })
    }

    /// The API root every request path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| SirenError::Transport(Box::new(e)))?;
        tracing::debug!(%url, "GET");

        let resp = self.http.get(url).send().await?.error_for_status()?;
        let status = resp.status();
        let body = resp.bytes().await?;
        tracing::trace!(%status, len = body.len(), "response received");

        Ok(body.to_vec())
    }
}

/// Shared handle to the API.
///
/// Cheap to clone: every clone and every service obtained from it uses the
/// same underlying [`Transport`]. Resource operations live on the four
/// services returned by [`albums`](Self::albums), [`songs`](Self::songs),
/// [`news`](Self::news) and [`search`](Self::search).
#[derive(Clone)]
pub struct SirenClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for SirenClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SirenClient").finish_non_exhaustive()
    }
}

impl SirenClient {
    /// Create a client for the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create an HTTP-backed client with explicit settings.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client over any [`Transport`] (useful for testing).
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Album listing, summary and detail lookups.
    pub fn albums(&self) -> AlbumService {
        AlbumService::new(self.clone())
    }

    /// Song listing and detail lookups.
    pub fn songs(&self) -> SongService {
        SongService::new(self.clone())
    }

    /// News listing, detail and recommendations.
    pub fn news(&self) -> NewsService {
        NewsService::new(self.clone())
    }

    /// Keyword search over albums and news.
    pub fn search(&self) -> SearchService {
        SearchService::new(self.clone())
    }

    /// Issue one `GET` and decode the body as `ResponsePackage<T>`.
    ///
    /// Does not inspect `code`; see [`ResponsePackage::into_data`].
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ResponsePackage<T>> {
        let body = self.transport.get(path).await?;
        let pkg = ResponsePackage::from_slice(&body)?;
        if !pkg.is_success() {
            tracing::debug!(path, code = pkg.code, message = %pkg.message, "envelope rejected");
        }
        Ok(pkg)
    }

    /// Fetch an endpoint that takes no caller input. Rejections become
    /// [`SirenError::Operational`].
    pub(crate) async fn fetch_operational<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(path)
            .await?
            .into_data(path, |code, message| SirenError::Operational { code, message })
    }

    /// Fetch a single entity by cid. Rejections become
    /// [`SirenError::ServerRejected`] carrying the cid, and an all-defaults
    /// payload becomes [`SirenError::MissingPayload`] instead of being
    /// returned as if it were real.
    pub(crate) async fn fetch_entity<T>(&self, path: &str, cid: &str) -> Result<T>
    where
        T: DeserializeOwned + Default + PartialEq,
    {
        let entity: T = self.fetch_targeted(path, cid).await?;
        if entity == T::default() {
            return Err(SirenError::MissingPayload {
                endpoint: path.to_owned(),
            });
        }
        Ok(entity)
    }

    /// Fetch an endpoint keyed by caller input. Rejections become
    /// [`SirenError::ServerRejected`] carrying `target`.
    pub(crate) async fn fetch_targeted<T: DeserializeOwned>(
        &self,
        path: &str,
        target: &str,
    ) -> Result<T> {
        self.fetch(path)
            .await?
            .into_data(path, |code, message| SirenError::ServerRejected {
                code,
                message,
                target: Some(target.to_owned()),
            })
    }
}

/// Reject empty or whitespace-only arguments before any I/O.
pub(crate) fn require(name: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SirenError::InvalidArgument { name });
    }
    Ok(())
}

/// Validate an optional pagination cursor. A present cursor must not be blank.
pub(crate) fn require_cursor(last_cid: Option<&str>) -> Result<()> {
    last_cid.map_or(Ok(()), |cid| require("last_cid", cid))
}

/// Build `path?key=value&...`, percent-encoding each value and skipping
/// absent ones.
pub(crate) fn with_query(path: &str, params: &[(&str, Option<&str>)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={}", urlencoding::encode(v))))
        .collect();
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{}", query.join("&"))
    }
}

/// Validate a cid and percent-encode it for use as a path segment.
///
/// `.` and `..` are rejected: URL resolution treats them (even when
/// percent-encoded) as relative segments and would hit another endpoint.
pub(crate) fn segment(cid: &str) -> Result<std::borrow::Cow<'_, str>> {
    require("cid", cid)?;
    if matches!(cid.trim(), "." | "..") {
        return Err(SirenError::InvalidArgument { name: "cid" });
    }
    Ok(urlencoding::encode(cid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_arguments_are_rejected() {
        assert!(require("cid", "8930").is_ok());
        for blank in ["", " ", "\t\n"] {
            let err = require("cid", blank).unwrap_err();
            assert!(matches!(err, SirenError::InvalidArgument { name: "cid" }));
        }
    }

    #[test]
    fn dot_segments_are_not_valid_cids() {
        for cid in [".", "..", " .. "] {
            let err = segment(cid).unwrap_err();
            assert!(matches!(err, SirenError::InvalidArgument { name: "cid" }));
        }
        assert!(segment("").is_err());
        assert_eq!(segment("a/b").unwrap(), "a%2Fb");
        assert_eq!(segment("v1.2").unwrap(), "v1.2");
    }

    #[test]
    fn absent_cursor_is_allowed() {
        assert!(require_cursor(None).is_ok());
        assert!(require_cursor(Some("7781")).is_ok());
        assert!(require_cursor(Some("  ")).is_err());
    }

    #[test]
    fn query_skips_absent_values_and_encodes() {
        assert_eq!(with_query("news", &[("lastCid", None)]), "news");
        assert_eq!(
            with_query("search/album", &[("keyword", Some("a b&c")), ("lastCid", Some("12"))]),
            "search/album?keyword=a%20b%26c&lastCid=12"
        );
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ClientConfig::with_base_url("http://localhost:8080/api").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/api/");
        assert_eq!(
            config.base_url.join("album/1/detail").unwrap().as_str(),
            "http://localhost:8080/api/album/1/detail"
        );
    }

    #[test]
    fn bad_base_url_is_reported() {
        let err = ClientConfig::with_base_url("not a url").unwrap_err();
        assert!(matches!(err, SirenError::InvalidBaseUrl(_)));
    }

    #[test]
    fn default_config_points_at_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), BASE_URL);
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
    }
}
