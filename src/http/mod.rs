//! HTTP transport layer used by the API client.

mod transport;

pub use transport::{BoxError, InvalidToken, TokenAuthenticatedTransport, Transport};

#[cfg(test)]
pub use transport::MockTransport;
