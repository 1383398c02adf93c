use log::debug;

use crate::github::{Client, DEFAULT_API_URL};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub token: Option<String>,
    pub api_url: Option<String>,
}

impl Config {
    pub fn new(token: Option<String>, api_url: Option<String>) -> Self {
        Self { token, api_url }
    }

    /// Builds the API client. An empty token counts as no token.
    pub fn client(&self) -> Client {
        let token = self.token.as_deref().unwrap_or_default();
        if token.is_empty() {
            debug!("No GITHUB_TOKEN configured, sending unauthenticated requests");
        } else {
            debug!("Using GITHUB_TOKEN for authentication");
        }

        let api_url = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Client::new(token).with_api_url(api_url)
    }
}
