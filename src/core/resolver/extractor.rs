// src/core/resolver/extractor.rs

use crate::core::error::{ResolveError, Result};
use crate::core::models::FileReference;
use tracing::debug;

/// Pulls the tablature file URL out of a revisions response body.
///
/// The body is a loosely JSON-like array. Rather than parsing it, the first
/// and last two characters (`[{` / `}]`) are cut off and the rest is split on
/// commas; the first segment containing `marker` holds the URL after its
/// first colon, wrapped in double quotes.
///
/// # Arguments
/// * `body` - Raw response text.
/// * `marker` - Substring identifying the file segment, usually `.gp`.
///
/// # Returns
/// The validated `FileReference`, `FileReferenceNotFound` if no segment
/// carries the marker, or `MalformedReference` if the segment is unusable.
pub fn extract_file_reference(body: &str, marker: &str) -> Result<FileReference> {
    let inner = strip_wrapping(body);

    let segment = inner
        .split(',')
        .find(|segment| segment.contains(marker))
        .ok_or_else(|| ResolveError::FileReferenceNotFound { marker: marker.to_string() })?;
    debug!(segment, "File segment located.");

    let (_, value) = segment
        .split_once(':')
        .ok_or_else(|| ResolveError::MalformedReference(segment.to_string()))?;

    FileReference::parse(value.trim_matches('"'))
}

/// Drops two characters from each end, counting chars rather than bytes.
fn strip_wrapping(body: &str) -> &str {
    let total = body.chars().count();
    if total <= 4 {
        return "";
    }
    let start = body.char_indices().nth(2).map(|(i, _)| i).unwrap_or(0);
    let end = body.char_indices().nth(total - 2).map(|(i, _)| i).unwrap_or(body.len());
    &body[start..end]
}
