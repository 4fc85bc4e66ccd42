// src/core/models.rs

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use strum::{AsRefStr, Display};
use url::Url;

use crate::core::error::{ResolveError, Result};

// --- Network Log ---

/// CDP method name of the event carrying a received response.
pub const RESPONSE_RECEIVED: &str = "Network.responseReceived";
/// CDP method name of the event emitted before a request goes out.
pub const REQUEST_WILL_BE_SENT: &str = "Network.requestWillBeSent";

/// One captured browser network event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLogEntry {
    /// CDP method name, e.g. `Network.responseReceived`.
    pub method: String,
    /// Final response URL. Only set for response events.
    pub response_url: Option<String>,
    /// HTTP status as reported by the browser. Only set for response events.
    pub status: Option<u16>,
}

impl NetworkLogEntry {
    pub fn response(url: impl Into<String>, status: u16) -> Self {
        Self {
            method: RESPONSE_RECEIVED.to_string(),
            response_url: Some(url.into()),
            status: Some(status),
        }
    }

    pub fn request() -> Self {
        Self {
            method: REQUEST_WILL_BE_SENT.to_string(),
            response_url: None,
            status: None,
        }
    }

    pub fn is_response(&self) -> bool {
        self.method == RESPONSE_RECEIVED
    }
}

// --- File Reference ---

// Guitar Pro family: .gp, .gp3 .. .gp7, .gpx
static RE_TAB_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.gp(x|[3-7])?$").expect("valid extension regex"));

/// A direct, downloadable tablature file URL.
///
/// Only constructible through [`FileReference::parse`], so a value of this
/// type is always an absolute URL whose path ends in a Guitar Pro extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference(Url);

impl FileReference {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| ResolveError::MalformedReference(format!("{raw} ({e})")))?;
        if !RE_TAB_EXTENSION.is_match(url.path()) {
            return Err(ResolveError::MalformedReference(format!(
                "{raw} (not a tablature file)"
            )));
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Last path segment, used for log lines.
    pub fn file_name(&self) -> &str {
        self.0
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for FileReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Status Messages ---

/// The three categories the front end colors differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// A single line for the status area.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
    pub at: DateTime<Local>,
}

impl StatusMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into(), at: Local::now() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, text)
    }
}
