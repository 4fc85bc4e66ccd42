// src/core/job.rs

use std::sync::Arc;

use tracing::{info, instrument};

use crate::core::input::validate_link;
use crate::core::models::FileReference;
use crate::core::reporter::StatusReporter;
use crate::core::resolver::{DownloadTrigger, Resolver};

/// Everything a single "Download" press needs, cheap to clone into a task.
#[derive(Clone)]
pub struct DownloadJob {
    resolver: Arc<Resolver>,
    trigger: Arc<dyn DownloadTrigger>,
}

impl DownloadJob {
    pub fn new(resolver: Arc<Resolver>, trigger: Arc<dyn DownloadTrigger>) -> Self {
        Self { resolver, trigger }
    }

    /// Runs one download attempt from raw user input to the OS hand-off.
    ///
    /// Nothing is returned: the outcome is told to the user through
    /// `reporter`, and the run always ends with "Processing complete.".
    #[instrument(skip_all)]
    pub async fn run(&self, raw_input: &str, reporter: &StatusReporter) {
        self.attempt(raw_input, reporter).await;
        reporter.success("Processing complete.").await;
    }

    async fn attempt(&self, raw_input: &str, reporter: &StatusReporter) {
        let max = self.resolver.config().max_link_length;
        let link = match validate_link(raw_input, max) {
            Ok(link) => link,
            Err(e) => {
                reporter.error(format!("Error: {e}")).await;
                return;
            }
        };

        reporter.info(format!("Processing link: {link}")).await;

        let resolution = self.resolver.resolve(&link, reporter).await;
        match resolution.file {
            Ok(file) => self.hand_off(&file, reporter).await,
            Err(e) => reporter.error(format!("Error: {e}")).await,
        }

        // Shutdown problems come after the outcome, never instead of it.
        if let Err(e) = resolution.teardown {
            reporter.error(format!("Error: {e}")).await;
        }
    }

    async fn hand_off(&self, file: &FileReference, reporter: &StatusReporter) {
        match self.trigger.open(file).await {
            Ok(()) => {
                info!(file = %file, "Download handed off.");
                reporter.success("File successfully processed.").await;
            }
            Err(e) => reporter.error(format!("Error: {e}")).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{MessageKind, NetworkLogEntry, StatusMessage};
    use crate::core::resolver::testing::*;
    use tokio::sync::mpsc;

    struct Harness {
        calls: Arc<Calls>,
        job: DownloadJob,
    }

    fn harness(log: Vec<NetworkLogEntry>, status: u16, fail_open: bool) -> Harness {
        let calls = Arc::new(Calls::default());
        let launcher = FakeLauncher::new(Arc::clone(&calls), log);
        harness_from(calls, launcher, status, fail_open)
    }

    fn harness_from(calls: Arc<Calls>, launcher: FakeLauncher, status: u16, fail_open: bool) -> Harness {
        let fetcher = FakeFetcher { calls: Arc::clone(&calls), status, body: REVISIONS_BODY.to_string() };
        let resolver = Resolver::with_parts(fast_config(), Arc::new(launcher), Arc::new(fetcher));
        let trigger = FakeTrigger { calls: Arc::clone(&calls), fail: fail_open };
        Harness { calls, job: DownloadJob::new(Arc::new(resolver), Arc::new(trigger)) }
    }

    fn matching_log() -> Vec<NetworkLogEntry> {
        vec![
            NetworkLogEntry::response("https://www.songsterr.com/a/wsa/tab-s1", 200),
            NetworkLogEntry::response("https://www.songsterr.com/api/meta/1/revisions", 200),
        ]
    }

    async fn run(h: &Harness, input: &str) -> Vec<StatusMessage> {
        let (tx, mut rx) = mpsc::channel(64);
        let reporter = StatusReporter::new(tx);
        h.job.run(input, &reporter).await;
        drop(reporter);
        let mut messages = Vec::new();
        while let Some(message) = rx.recv().await {
            messages.push(message);
        }
        messages
    }

    fn texts(messages: &[StatusMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_successful_run_opens_file_and_reports() {
        let h = harness(matching_log(), 200, false);
        let messages = run(&h, "https://www.songsterr.com/a/wsa/tab-s1").await;

        assert_eq!(
            texts(&messages),
            vec![
                "Processing link: https://www.songsterr.com/a/wsa/tab-s1",
                "Loading website...",
                "Extracting logs...",
                "File successfully processed.",
                "Processing complete.",
            ]
        );
        assert_eq!(messages[0].kind, MessageKind::Info);
        assert_eq!(messages[3].kind, MessageKind::Success);
        assert_eq!(h.calls.opened(), vec!["https://cdn.example.com/tabs/song.gp5"]);
    }

    #[tokio::test]
    async fn test_too_long_input_never_touches_the_browser() {
        let h = harness(matching_log(), 200, false);
        let messages = run(&h, &format!("https://www.songsterr.com/{}", "a".repeat(300))).await;

        assert_eq!(h.calls.launches(), 0);
        assert!(h.calls.fetched().is_empty());
        assert_eq!(
            texts(&messages),
            vec!["Error: Link is too long. Max length is 300 characters.", "Processing complete."]
        );
        assert_eq!(messages[0].kind, MessageKind::Error);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let h = harness(matching_log(), 200, false);
        let messages = run(&h, "   ").await;

        assert_eq!(h.calls.launches(), 0);
        assert_eq!(messages[0].text, "Error: Please enter a Songsterr link!");
    }

    #[tokio::test]
    async fn test_not_found_is_reported_and_session_closed() {
        let h = harness(vec![NetworkLogEntry::request()], 200, false);
        let messages = run(&h, "https://www.songsterr.com/a/wsa/tab-s1").await;

        assert!(texts(&messages).contains(&"Error: 'revisions' file not found!"));
        assert_eq!(h.calls.closes(), 1);
        assert!(h.calls.opened().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported_with_status() {
        let h = harness(matching_log(), 500, false);
        let messages = run(&h, "https://www.songsterr.com/a/wsa/tab-s1").await;

        assert!(texts(&messages).contains(&"Error: Failed to load file: 500"));
        assert_eq!(h.calls.closes(), 1);
        assert!(h.calls.opened().is_empty());
    }

    #[tokio::test]
    async fn test_opener_failure_is_an_error_message() {
        let h = harness(matching_log(), 200, true);
        let messages = run(&h, "https://www.songsterr.com/a/wsa/tab-s1").await;

        let last_two: Vec<_> = messages.iter().rev().take(2).map(|m| m.kind).collect();
        assert_eq!(last_two, vec![MessageKind::Success, MessageKind::Error]);
        assert!(!texts(&messages).contains(&"File successfully processed."));
    }

    #[tokio::test]
    async fn test_close_failure_is_reported_after_the_outcome() {
        let calls = Arc::new(Calls::default());
        let mut launcher = FakeLauncher::new(Arc::clone(&calls), matching_log());
        launcher.fail_close = true;
        let h = harness_from(calls, launcher, 200, false);

        let messages = run(&h, "https://www.songsterr.com/a/wsa/tab-s1").await;

        assert_eq!(
            texts(&messages),
            vec![
                "Processing link: https://www.songsterr.com/a/wsa/tab-s1",
                "Loading website...",
                "Extracting logs...",
                "File successfully processed.",
                "Error: Failed to properly close the browser: browser already gone",
                "Processing complete.",
            ]
        );
        assert_eq!(h.calls.opened(), vec!["https://cdn.example.com/tabs/song.gp5"]);
    }

    #[tokio::test]
    async fn test_close_failure_follows_a_pipeline_error() {
        let calls = Arc::new(Calls::default());
        let mut launcher = FakeLauncher::new(Arc::clone(&calls), matching_log());
        launcher.fail_close = true;
        let h = harness_from(calls, launcher, 500, false);

        let messages = run(&h, "https://www.songsterr.com/a/wsa/tab-s1").await;

        let tail: Vec<_> = texts(&messages).into_iter().rev().take(3).rev().collect();
        assert_eq!(
            tail,
            vec![
                "Error: Failed to load file: 500",
                "Error: Failed to properly close the browser: browser already gone",
                "Processing complete.",
            ]
        );
    }
}
