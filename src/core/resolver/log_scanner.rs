// src/core/resolver/log_scanner.rs

use crate::core::models::NetworkLogEntry;
use tracing::debug;

/// Returns the response URL of the first captured response containing `marker`.
///
/// Entries are scanned in capture order and the first hit wins, even if a
/// later entry would match "better". Non-response events are skipped.
pub fn find_reference<'a>(log: &'a [NetworkLogEntry], marker: &str) -> Option<&'a str> {
    let hit = log.iter().filter(|entry| entry.is_response()).find_map(|entry| {
        let url = entry.response_url.as_deref()?;
        url.contains(marker).then_some((url, entry.status))
    });

    match hit {
        Some((url, status)) => {
            debug!(entries = log.len(), marker, url, ?status, "Reference response in network log.");
            Some(url)
        }
        None => {
            debug!(entries = log.len(), marker, "No reference response in network log yet.");
            None
        }
    }
}
