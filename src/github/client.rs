use std::io;
use std::sync::Arc;

use futures_util::TryStreamExt;
use log::debug;
use reqwest::{
    Method, Request, Response, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tokio_util::io::{StreamReader, SyncIoBridge};

use super::error::ApiError;
use super::types::{Asset, Release, RepoInfo};
use crate::http::{InvalidToken, TokenAuthenticatedTransport, Transport};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_HOST: &str = "github.com";

const USER_AGENT_STRING: &str = concat!("ghapi/", env!("GHAPI_VERSION"));

/// Client for the GitHub REST API.
///
/// Every operation performs a single round trip. Clones share the same transport.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    api_url: String,
}

impl Client {
    /// Creates a client, authenticating every request when `token` is non-empty.
    pub fn new(token: &str) -> Self {
        Self::with_base(reqwest::Client::new(), token)
    }

    /// Like [`Client::new`], sending through the given reqwest client.
    pub fn with_base(base: reqwest::Client, token: &str) -> Self {
        if token.is_empty() {
            Self::with_transport(base)
        } else {
            Self::with_transport(TokenAuthenticatedTransport::new(base, token))
        }
    }

    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Points the client at a different API origin (tests, GitHub Enterprise).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns `owner/project` if `source_url` points into a GitHub project,
    /// otherwise an empty string.
    ///
    /// The host is compared as written, so a different case or an explicit
    /// port never matches. The path is percent-decoded but not normalized.
    pub fn project_for_url(&self, source_url: &str) -> String {
        if Url::parse(source_url).is_err() {
            return String::new();
        }
        let Some((host, path)) = split_authority(source_url) else {
            return String::new();
        };
        if host != GITHUB_HOST {
            return String::new();
        }
        let Ok(path) = urlencoding::decode(path) else {
            return String::new();
        };
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() < 3 {
            return String::new();
        }
        parts[1..3].join("/")
    }

    /// Repository information for `owner/name`.
    #[tracing::instrument(skip(self))]
    pub async fn repo(&self, repo: &str) -> Result<RepoInfo, ApiError> {
        let url = format!("{}/repos/{}", self.api_url, repo);
        self.decode(&url).await
    }

    /// The latest published release of `owner/name`.
    #[tracing::instrument(skip(self))]
    pub async fn latest_release(&self, repo: &str) -> Result<Release, ApiError> {
        let url = format!("{}/repos/{}/releases/latest", self.api_url, repo);
        self.decode(&url).await
    }

    /// Releases of `owner/name`, first page only.
    #[tracing::instrument(skip(self))]
    pub async fn releases(&self, repo: &str) -> Result<Vec<Release>, ApiError> {
        let url = format!("{}/repos/{}/releases", self.api_url, repo);
        self.decode(&url).await
    }

    /// Starts downloading a release asset.
    ///
    /// The response is returned as soon as its head arrives; the status is not
    /// checked and the body is left unread. Dropping the response releases the
    /// connection.
    #[tracing::instrument(skip(self, asset), fields(asset = %asset.name))]
    pub async fn download(&self, asset: &Asset) -> Result<Response, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/octet-stream"));
        let request = self.request(&asset.url, headers)?;
        self.send(request, &asset.url).await
    }

    async fn decode<T>(&self, url: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self.request(url, HeaderMap::new())?;
        let response = self.send(request, url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        // serde_json reads synchronously, so feed it the body stream from a blocking task.
        let body = response.bytes_stream().map_err(io::Error::other);
        let reader = SyncIoBridge::new(StreamReader::new(Box::pin(body)));
        let decoded = tokio::task::spawn_blocking(move || serde_json::from_reader::<_, T>(reader))
            .await
            .unwrap_or_else(|join_error| {
                Err(<serde_json::Error as serde::de::Error>::custom(join_error))
            });

        decoded.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn send(&self, request: Request, url: &str) -> Result<Response, ApiError> {
        debug!("GET {}...", url);
        self.transport
            .send(request)
            .await
            .map_err(|source| {
                if source.is::<InvalidToken>() {
                    ApiError::Request {
                        url: url.to_string(),
                        source,
                    }
                } else {
                    ApiError::Transport {
                        url: url.to_string(),
                        source,
                    }
                }
            })
    }

    fn request(&self, url: &str, mut headers: HeaderMap) -> Result<Request, ApiError> {
        let parsed = Url::parse(url).map_err(|source| ApiError::Request {
            url: url.to_string(),
            source: source.into(),
        })?;
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));

        let mut request = Request::new(Method::GET, parsed);
        *request.headers_mut() = headers;
        Ok(request)
    }
}

/// Splits an absolute URL into its host (including any port, case preserved)
/// and its raw, still-encoded path.
fn split_authority(source_url: &str) -> Option<(&str, &str)> {
    let (_, rest) = source_url.split_once("://")?;
    let (authority, tail) = rest.split_at(rest.find(['/', '?', '#']).unwrap_or(rest.len()));
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let path = &tail[..tail.find(['?', '#']).unwrap_or(tail.len())];
    Some((host, path))
}
