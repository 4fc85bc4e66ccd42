// src/core/resolver/browser.rs

//! Headless Chromium driven over CDP, recording the page's network activity.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventRequestWillBeSent, EventResponseReceived,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{BrowserLauncher, BrowserSession};
use crate::config::ResolverConfig;
use crate::core::error::{ResolveError, Result};
use crate::core::models::NetworkLogEntry;

/// Find a Chromium binary.
///
/// Order: explicit configuration, then the usual names on `PATH`, then the
/// default macOS install. `None` leaves discovery to chromiumoxide itself.
pub fn find_chromium(config: &ResolverConfig) -> Option<PathBuf> {
    if let Some(path) = &config.chrome_executable {
        if path.exists() {
            return Some(path.clone());
        }
        warn!(path = %path.display(), "Configured browser executable does not exist.");
    }

    for name in ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Launches one fresh browser process per resolution.
pub struct ChromiumLauncher {
    config: ResolverConfig,
}

impl ChromiumLauncher {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .arg("--ignore-certificate-errors")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");

        if let Some(path) = find_chromium(&self.config) {
            debug!(path = %path.display(), "Using browser executable.");
            builder = builder.chrome_executable(path);
        }
        if !self.config.headless {
            builder = builder.with_head();
        }

        builder
            .build()
            .map_err(|e| ResolveError::Browser(format!("invalid browser config: {e}")))
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let browser_config = self.browser_config()?;

        let (mut browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            error!(error = %e, "Failed to launch browser.");
            ResolveError::Browser(e.to_string())
        })?;

        // The handler drives the CDP connection and must be polled for as
        // long as the browser lives.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "CDP handler event error.");
                }
            }
        });

        let log = Arc::new(Mutex::new(Vec::new()));
        match instrumented_page(&browser, Arc::clone(&log)).await {
            Ok((page, collector)) => {
                info!("Browser session ready.");
                Ok(Box::new(ChromiumSession {
                    browser,
                    page,
                    log,
                    collector,
                    handler_task,
                    navigation_timeout: self.config.navigation_timeout,
                }))
            }
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!(error = %close_err, "Failed to close half-started browser.");
                }
                if let Err(wait_err) = browser.wait().await {
                    warn!(error = %wait_err, "Failed to reap half-started browser.");
                }
                handler_task.abort();
                Err(e)
            }
        }
    }
}

/// Opens a blank page with the Network domain enabled and a task copying
/// request/response events into `log`.
async fn instrumented_page(
    browser: &Browser,
    log: Arc<Mutex<Vec<NetworkLogEntry>>>,
) -> Result<(Page, JoinHandle<()>)> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| ResolveError::Browser(format!("failed to create page: {e}")))?;

    let responses = page
        .event_listener::<EventResponseReceived>()
        .await
        .map_err(|e| ResolveError::Browser(format!("failed to listen for responses: {e}")))?;
    let requests = page
        .event_listener::<EventRequestWillBeSent>()
        .await
        .map_err(|e| ResolveError::Browser(format!("failed to listen for requests: {e}")))?;

    page.execute(EnableParams::default())
        .await
        .map_err(|e| ResolveError::Browser(format!("failed to enable network events: {e}")))?;

    let responses = responses.map(|event| response_entry(&event.response.url, event.response.status));
    let requests = requests.map(|_| NetworkLogEntry::request());
    let mut events = Box::pin(futures::stream::select(responses, requests));

    let collector = tokio::spawn(async move {
        while let Some(entry) = events.next().await {
            log.lock().await.push(entry);
        }
    });

    Ok((page, collector))
}

/// Log entry for a `Network.responseReceived` event. Statuses outside the
/// HTTP range are recorded as 0.
fn response_entry(url: &str, status: i64) -> NetworkLogEntry {
    NetworkLogEntry::response(url, u16::try_from(status).unwrap_or_default())
}

/// A running browser with one instrumented page.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    log: Arc<Mutex<Vec<NetworkLogEntry>>>,
    collector: JoinHandle<()>,
    handler_task: JoinHandle<()>,
    navigation_timeout: std::time::Duration,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        info!(url, "Navigating.");
        let result = tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await;

        match result {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => {
                error!(url, error = %e, "Navigation failed.");
                Err(ResolveError::Navigation(e.to_string()))
            }
            Err(_) => Err(ResolveError::Navigation(format!(
                "timed out after {}s",
                self.navigation_timeout.as_secs()
            ))),
        }
    }

    async fn network_log(&self) -> Vec<NetworkLogEntry> {
        self.log.lock().await.clone()
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let mut session = *self;
        session.collector.abort();

        let closed = session
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| ResolveError::Teardown(e.to_string()));
        if closed.is_ok() {
            // Reap the child so no zombie is left behind.
            if let Err(e) = session.browser.wait().await {
                warn!(error = %e, "Failed to reap browser process.");
            }
        }
        session.handler_task.abort();

        debug!(ok = closed.is_ok(), "Browser session closed.");
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RESPONSE_RECEIVED;

    #[test]
    fn test_response_entry_keeps_url_and_status() {
        let entry = response_entry("https://www.songsterr.com/api/meta/1/revisions", 200);
        assert_eq!(entry.method, RESPONSE_RECEIVED);
        assert_eq!(entry.response_url.as_deref(), Some("https://www.songsterr.com/api/meta/1/revisions"));
        assert_eq!(entry.status, Some(200));
    }

    #[test]
    fn test_response_entry_zeroes_out_of_range_status() {
        assert_eq!(response_entry("https://a", -1).status, Some(0));
        assert_eq!(response_entry("https://a", 70_000).status, Some(0));
    }

    #[test]
    fn test_configured_executable_wins() {
        let fake_chrome = tempfile::NamedTempFile::new().unwrap();
        let config = ResolverConfig {
            chrome_executable: Some(fake_chrome.path().to_path_buf()),
            ..ResolverConfig::default()
        };
        assert_eq!(find_chromium(&config), Some(fake_chrome.path().to_path_buf()));
    }

    #[test]
    fn test_missing_configured_executable_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-chrome");
        let config = ResolverConfig {
            chrome_executable: Some(missing.clone()),
            ..ResolverConfig::default()
        };
        assert_ne!(find_chromium(&config), Some(missing));
    }
}
