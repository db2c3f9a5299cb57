//! Notification sinks: tracing log and fire-and-forget webhook.

use std::sync::Arc;

use tracing::{info, warn};

use kontor_core::notify::{DocumentEvent, NotificationSink};

/// Sink that logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, event: DocumentEvent) {
        info!(
            kind = %event.kind,
            document_id = %event.document_id,
            document_no = %event.document_no,
            action = %event.action,
            actor = %event.actor,
            "Document event"
        );
    }
}

/// Sink that POSTs events to a webhook URL.
///
/// Delivery runs in a spawned task; a failing or slow endpoint never blocks
/// or fails the transition that produced the event.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: Arc<str>,
}

impl WebhookSink {
    /// Creates a webhook sink targeting the given URL.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: Arc::from(url),
        }
    }
}

impl NotificationSink for WebhookSink {
    fn notify(&self, event: DocumentEvent) {
        let client = self.client.clone();
        let url = Arc::clone(&self.url);

        tokio::spawn(async move {
            let result = client.post(url.as_ref()).json(&event).send().await;
            match result {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    warn!(
                        status = %response.status(),
                        document_no = %event.document_no,
                        "Webhook notification rejected"
                    );
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        document_no = %event.document_no,
                        "Webhook notification failed"
                    );
                }
            }
        });
    }
}
