//! Page fetching for release-notes documents.
//!
//! Uses reqwest for the HTTP GET. The workflow only sees the [`PageSource`]
//! trait so it can be driven from memory in tests.

use crate::config::HttpSettings;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this tool
pub const USER_AGENT: &str = concat!(
    "noteworthy/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/cladam/noteworthy)"
);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch URL: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Anything that can hand back the raw document behind a URL.
pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`PageSource`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured timeout and User-Agent
    pub fn new(settings: &HttpSettings) -> Result<Self, FetchError> {
        let client = create_client(settings)?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Create a configured HTTP client
fn create_client(settings: &HttpSettings) -> Result<Client, reqwest::Error> {
    let user_agent = settings.user_agent.as_deref().unwrap_or(USER_AGENT);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
}
