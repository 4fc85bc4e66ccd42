// src/core/resolver/mod.rs

// The link resolver turns a page URL into a direct tablature file URL.
// Each stage lives in its own module; the traits below are the seams where
// the real browser, HTTP client and OS opener get swapped out in tests.
pub mod browser;
pub mod extractor;
pub mod fetcher;
pub mod log_scanner;
pub mod opener;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::core::error::{ResolveError, Result};
use crate::core::models::{FileReference, NetworkLogEntry};
use crate::core::reporter::StatusReporter;

use self::browser::ChromiumLauncher;
use self::extractor::extract_file_reference;
use self::fetcher::HttpFetcher;
use self::log_scanner::find_reference;

/// Starts browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// A live, network-instrumented browser session.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the session's page to `url`.
    async fn navigate(&mut self, url: &str) -> Result<()>;
    /// Snapshot of every network event captured so far, in arrival order.
    async fn network_log(&self) -> Vec<NetworkLogEntry>;
    /// Shut the browser down.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Fetches the raw text of the reference response.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Hands a resolved file URL to whatever performs the download.
#[async_trait]
pub trait DownloadTrigger: Send + Sync {
    async fn open(&self, file: &FileReference) -> Result<()>;
}

/// Outcome of one resolution.
///
/// The browser shutdown is kept apart from the pipeline result so callers can
/// report it after the outcome. A launch failure leaves `teardown` as `Ok`.
#[must_use]
pub struct Resolution {
    pub file: Result<FileReference>,
    pub teardown: Result<()>,
}

/// Runs the browser → log scan → fetch → extract pipeline.
pub struct Resolver {
    config: ResolverConfig,
    launcher: Arc<dyn BrowserLauncher>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl Resolver {
    /// Builds a resolver backed by Chromium and reqwest.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let launcher = Arc::new(ChromiumLauncher::new(config.clone()));
        let fetcher = Arc::new(HttpFetcher::new()?);
        Ok(Self::with_parts(config, launcher, fetcher))
    }

    pub fn with_parts(
        config: ResolverConfig,
        launcher: Arc<dyn BrowserLauncher>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> Self {
        Self { config, launcher, fetcher }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `page_url` to a file reference.
    ///
    /// The browser session is closed exactly once after it has been launched,
    /// whatever the pipeline outcome. A failed close ends up in
    /// [`Resolution::teardown`] and never replaces the pipeline result.
    pub async fn resolve(&self, page_url: &str, reporter: &StatusReporter) -> Resolution {
        info!(url = page_url, "Starting resolution.");
        let mut session = match self.launcher.launch().await {
            Ok(session) => session,
            Err(e) => return Resolution { file: Err(e), teardown: Ok(()) },
        };

        let file = self.drive(session.as_mut(), page_url, reporter).await;

        let teardown = session.close().await;
        if let Err(e) = &teardown {
            warn!(error = %e, "Browser session did not close cleanly.");
        }

        match &file {
            Ok(file) => info!(file = %file, "Resolution finished."),
            Err(e) => info!(error = %e, "Resolution failed."),
        }
        Resolution { file, teardown }
    }

    async fn drive(
        &self,
        session: &mut dyn BrowserSession,
        page_url: &str,
        reporter: &StatusReporter,
    ) -> Result<FileReference> {
        reporter.info("Loading website...").await;
        session.navigate(page_url).await?;

        reporter.info("Extracting logs...").await;
        let reference_url = self.wait_for_reference(session).await?;
        info!(reference = %reference_url, "Reference response located.");

        let body = self.fetcher.fetch_text(&reference_url).await?;
        debug!(bytes = body.len(), "Reference body fetched.");

        extract_file_reference(&body, &self.config.file_extension_marker)
    }

    /// Polls the network log until a reference response shows up or the
    /// configured timeout runs out. The log is always checked at least once.
    async fn wait_for_reference(&self, session: &dyn BrowserSession) -> Result<String> {
        let deadline = Instant::now() + self.config.reference_timeout;
        loop {
            let log = session.network_log().await;
            if let Some(url) = find_reference(&log, &self.config.reference_marker) {
                return Ok(url.to_string());
            }
            if Instant::now() >= deadline {
                debug!(entries = log.len(), "No reference response before timeout.");
                return Err(ResolveError::ReferenceNotFound {
                    marker: self.config.reference_marker.clone(),
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted fakes for the resolver seams.

    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counters shared between a fake launcher and the sessions it creates.
    #[derive(Default)]
    pub struct Calls {
        pub launches: AtomicUsize,
        pub navigations: AtomicUsize,
        pub polls: AtomicUsize,
        pub closes: AtomicUsize,
        pub fetched: Mutex<Vec<String>>,
        pub opened: Mutex<Vec<String>>,
    }

    impl Calls {
        pub fn launches(&self) -> usize {
            self.launches.load(Ordering::SeqCst)
        }
        pub fn navigations(&self) -> usize {
            self.navigations.load(Ordering::SeqCst)
        }
        pub fn polls(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
        pub fn closes(&self) -> usize {
            self.closes.load(Ordering::SeqCst)
        }
        pub fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
        pub fn opened(&self) -> Vec<String> {
            self.opened.lock().unwrap().clone()
        }
    }

    pub struct FakeLauncher {
        pub calls: Arc<Calls>,
        pub log: Vec<NetworkLogEntry>,
        /// Polls answered with an empty log before `log` shows up.
        pub empty_polls: usize,
        pub fail_launch: bool,
        pub fail_navigation: bool,
        pub fail_close: bool,
    }

    impl FakeLauncher {
        pub fn new(calls: Arc<Calls>, log: Vec<NetworkLogEntry>) -> Self {
            Self { calls, log, empty_polls: 0, fail_launch: false, fail_navigation: false, fail_close: false }
        }
    }

    #[async_trait]
    impl BrowserLauncher for FakeLauncher {
        async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
            self.calls.launches.fetch_add(1, Ordering::SeqCst);
            if self.fail_launch {
                return Err(ResolveError::Browser("no browser".into()));
            }
            Ok(Box::new(FakeSession {
                calls: Arc::clone(&self.calls),
                log: self.log.clone(),
                empty_polls: self.empty_polls,
                fail_navigation: self.fail_navigation,
                fail_close: self.fail_close,
            }))
        }
    }

    pub struct FakeSession {
        calls: Arc<Calls>,
        log: Vec<NetworkLogEntry>,
        empty_polls: usize,
        fail_navigation: bool,
        fail_close: bool,
    }

    #[async_trait]
    impl BrowserSession for FakeSession {
        async fn navigate(&mut self, _url: &str) -> Result<()> {
            self.calls.navigations.fetch_add(1, Ordering::SeqCst);
            if self.fail_navigation {
                return Err(ResolveError::Navigation("net::ERR_NAME_NOT_RESOLVED".into()));
            }
            Ok(())
        }

        async fn network_log(&self) -> Vec<NetworkLogEntry> {
            let poll = self.calls.polls.fetch_add(1, Ordering::SeqCst);
            if poll < self.empty_polls {
                return Vec::new();
            }
            self.log.clone()
        }

        async fn close(self: Box<Self>) -> Result<()> {
            self.calls.closes.fetch_add(1, Ordering::SeqCst);
            if self.fail_close {
                return Err(ResolveError::Teardown("browser already gone".into()));
            }
            Ok(())
        }
    }

    /// Answers every fetch with the same outcome.
    pub struct FakeFetcher {
        pub calls: Arc<Calls>,
        pub status: u16,
        pub body: String,
    }

    #[async_trait]
    impl ContentFetcher for FakeFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.calls.fetched.lock().unwrap().push(url.to_string());
            if self.status != 200 {
                return Err(ResolveError::FetchFailed { status: self.status });
            }
            Ok(self.body.clone())
        }
    }

    pub struct FakeTrigger {
        pub calls: Arc<Calls>,
        pub fail: bool,
    }

    #[async_trait]
    impl DownloadTrigger for FakeTrigger {
        async fn open(&self, file: &FileReference) -> Result<()> {
            self.calls.opened.lock().unwrap().push(file.to_string());
            if self.fail {
                return Err(ResolveError::Open("no handler for https".into()));
            }
            Ok(())
        }
    }

    pub fn fast_config() -> ResolverConfig {
        ResolverConfig {
            reference_timeout: std::time::Duration::from_millis(30),
            poll_interval: std::time::Duration::from_millis(5),
            ..ResolverConfig::default()
        }
    }

    pub const REVISIONS_BODY: &str = r#"[{"revisionId":1,"source":"https://cdn.example.com/tabs/song.gp5","title":"Song"}]"#;
}
