// src/config.rs

use crate::logging::PROJECT_NAME;
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

lazy_static! {
    pub static ref CHROME_ENV: String = format!("{}_CHROME", PROJECT_NAME.clone());
    pub static ref WAIT_ENV: String = format!("{}_WAIT_SECS", PROJECT_NAME.clone());
    pub static ref HEADFUL_ENV: String = format!("{}_HEADFUL", PROJECT_NAME.clone());
}

/// Longest link the input layer accepts, in characters.
pub const MAX_LINK_LENGTH: usize = 300;
/// Substring identifying the backend response that lists the tab revisions.
pub const REFERENCE_MARKER: &str = "revisions";
/// Substring identifying the segment that holds the tablature file URL.
pub const FILE_EXTENSION_MARKER: &str = ".gp";

/// Tunables for a single resolution run.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub max_link_length: usize,
    pub reference_marker: String,
    pub file_extension_marker: String,
    /// Upper bound for `Page.navigate` to return.
    pub navigation_timeout: Duration,
    /// How long to keep polling the network log for the reference response.
    pub reference_timeout: Duration,
    pub poll_interval: Duration,
    pub headless: bool,
    /// Explicit browser executable. `None` lets the launcher discover one.
    pub chrome_executable: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_link_length: MAX_LINK_LENGTH,
            reference_marker: REFERENCE_MARKER.to_string(),
            file_extension_marker: FILE_EXTENSION_MARKER.to_string(),
            navigation_timeout: Duration::from_secs(30),
            reference_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(250),
            headless: true,
            chrome_executable: None,
        }
    }
}

impl ResolverConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unparseable values are logged and ignored, leaving the default in place.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(CHROME_ENV.as_str()).filter(|p| !p.trim().is_empty()) {
            config.chrome_executable = Some(PathBuf::from(path.trim()));
        }

        if let Some(raw) = lookup(WAIT_ENV.as_str()) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.reference_timeout = Duration::from_secs(secs),
                _ => warn!(variable = WAIT_ENV.as_str(), value = %raw, "Ignoring invalid wait timeout."),
            }
        }

        if let Some(raw) = lookup(HEADFUL_ENV.as_str()) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.headless = false,
                "0" | "false" | "no" | "" => {}
                _ => warn!(variable = HEADFUL_ENV.as_str(), value = %raw, "Ignoring invalid headful flag."),
            }
        }

        config
    }
}
