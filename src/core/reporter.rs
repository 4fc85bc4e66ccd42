// src/core/reporter.rs

use crate::core::models::{MessageKind, StatusMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Sends status messages from a background job to the UI loop.
///
/// Every message is mirrored into the log file. A closed channel only means
/// the UI is gone, so send failures are ignored.
#[derive(Clone)]
pub struct StatusReporter {
    tx: mpsc::Sender<StatusMessage>,
}

impl StatusReporter {
    pub fn new(tx: mpsc::Sender<StatusMessage>) -> Self {
        Self { tx }
    }

    pub async fn info(&self, text: impl Into<String>) {
        self.send(StatusMessage::info(text)).await;
    }

    pub async fn success(&self, text: impl Into<String>) {
        self.send(StatusMessage::success(text)).await;
    }

    pub async fn error(&self, text: impl Into<String>) {
        self.send(StatusMessage::error(text)).await;
    }

    async fn send(&self, message: StatusMessage) {
        match message.kind {
            MessageKind::Error => error!(kind = message.kind.as_ref(), text = %message.text, "status"),
            _ => info!(kind = message.kind.as_ref(), text = %message.text, "status"),
        }
        if self.tx.send(message).await.is_err() {
            debug!("Status channel closed, dropping message.");
        }
    }
}
