// src/core/resolver/opener.rs

use std::io;

use async_trait::async_trait;
use tracing::{error, info};

use super::DownloadTrigger;
use crate::core::error::{ResolveError, Result};
use crate::core::models::FileReference;

/// Opens the file URL with the operating system's default handler, which for
/// a direct file link usually means the default browser starts a download.
pub struct SystemOpener {
    launch: fn(&str) -> io::Result<()>,
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self { launch: |url| open::that(url) }
    }
}

#[async_trait]
impl DownloadTrigger for SystemOpener {
    async fn open(&self, file: &FileReference) -> Result<()> {
        info!(file = %file, name = file.file_name(), "Handing file URL to the OS.");
        let launch = self.launch;
        let url = file.as_str().to_string();

        // Some platform handlers block until the browser has taken the URL.
        tokio::task::spawn_blocking(move || launch(&url))
            .await
            .map_err(|e| ResolveError::Open(format!("opener task failed: {e}")))?
            .map_err(|e| {
                error!(error = %e, "URL handler failed.");
                ResolveError::Open(e.to_string())
            })
    }
}
