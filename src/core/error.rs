// src/core/error.rs

use thiserror::Error;

/// Every way a download attempt can fail.
///
/// The `Display` output is shown to the user verbatim, prefixed with `Error: `.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Please enter a Songsterr link!")]
    EmptyInput,

    #[error("Link is too long. Max length is {max} characters.")]
    InputTooLong { max: usize },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("'{marker}' file not found!")]
    ReferenceNotFound { marker: String },

    #[error("Failed to load file: {status}")]
    FetchFailed { status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No '{marker}' file reference in the revisions response.")]
    FileReferenceNotFound { marker: String },

    #[error("Malformed file reference: {0}")]
    MalformedReference(String),

    #[error("Failed to properly close the browser: {0}")]
    Teardown(String),

    #[error("Failed to open the download link: {0}")]
    Open(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
