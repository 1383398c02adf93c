//! Request transports: the plain reqwest client and a token-authenticating decorator.

use async_trait::async_trait;
use log::debug;
use reqwest::{
    Client, Request, Response,
    header::{AUTHORIZATION, HeaderValue},
};
use thiserror::Error;

/// Error produced by a transport while sending a request.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The configured token cannot be carried in an `Authorization` header.
#[derive(Debug, Error)]
#[error("authentication token is not a valid header value")]
pub struct InvalidToken;

/// Sends a fully built request and hands back the response head.
///
/// Implementations perform exactly one round trip and never read the body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, BoxError>;
}

#[async_trait]
impl Transport for Client {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        Ok(self.execute(request).await?)
    }
}

/// Adds `Authorization: Bearer <token>` to every request before delegating
/// to the wrapped transport.
pub struct TokenAuthenticatedTransport<T = Client> {
    inner: T,
    token: String,
}

impl<T: Transport> TokenAuthenticatedTransport<T> {
    pub fn new(inner: T, token: impl Into<String>) -> Self {
        debug!("HTTP transport configured with authentication");
        Self {
            inner,
            token: token.into(),
        }
    }

    fn credential(&self) -> Result<HeaderValue, InvalidToken> {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait]
impl<T: Transport> Transport for TokenAuthenticatedTransport<T> {
    async fn send(&self, mut request: Request) -> Result<Response, BoxError> {
        let credential = self.credential()?;
        request.headers_mut().insert(AUTHORIZATION, credential);
        self.inner.send(request).await
    }
}
