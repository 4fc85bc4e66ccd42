// src/core/resolver/fetcher.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error, info};

use super::ContentFetcher;
use crate::core::error::{ResolveError, Result};

/// Plain HTTP GET against the reference URL.
///
/// The reference lives on the site's API host and is fetched without
/// certificate validation, same as the browser that discovered it
/// (`--ignore-certificate-errors`).
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client.");
                ResolveError::Http(e)
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching reference body.");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        info!(%status, "Received reference response.");

        // Only a plain 200 counts; anything else is reported with its code.
        if status != StatusCode::OK {
            return Err(ResolveError::FetchFailed { status: status.as_u16() });
        }
        Ok(response.text().await?)
    }
}
