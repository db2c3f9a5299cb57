//! Notification seam for document workflow events.
//!
//! Sinks are informed after a transition commits; delivery is
//! fire-and-forget and a failing sink never rolls back or fails the
//! transition that produced the event.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::approval::types::DocumentKind;

/// The workflow actions external collaborators are told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    /// Document submitted for approval.
    Submitted,
    /// Document approved.
    Approved,
    /// Document rejected.
    Rejected,
}

impl EventAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document workflow event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEvent {
    /// The document kind.
    pub kind: DocumentKind,
    /// The document ID.
    pub document_id: Uuid,
    /// The document number (order_no, invoice_no, receipt_no).
    pub document_no: String,
    /// What happened.
    pub action: EventAction,
    /// The acting user.
    pub actor: Uuid,
}

/// Sink for document workflow events.
///
/// Implementations must not block the caller for long and must swallow
/// their own failures (logging them is fine).
pub trait NotificationSink: Send + Sync {
    /// Delivers one event. Must not fail the calling transition.
    fn notify(&self, event: DocumentEvent);
}

/// Sink that drops every event; used in tests and as a disabled default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _event: DocumentEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink {
        events: Mutex<Vec<DocumentEvent>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, event: DocumentEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_action_as_str() {
        assert_eq!(EventAction::Submitted.as_str(), "submitted");
        assert_eq!(EventAction::Approved.as_str(), "approved");
        assert_eq!(EventAction::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_sink_receives_event() {
        let sink = RecordingSink {
            events: Mutex::new(Vec::new()),
        };
        sink.notify(DocumentEvent {
            kind: DocumentKind::SaleOrder,
            document_id: Uuid::new_v4(),
            document_no: "SO-000001".to_string(),
            action: EventAction::Submitted,
            actor: Uuid::new_v4(),
        });
        assert_eq!(sink.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_null_sink_is_silent() {
        NullSink.notify(DocumentEvent {
            kind: DocumentKind::ArReceipt,
            document_id: Uuid::new_v4(),
            document_no: "RC-000001".to_string(),
            action: EventAction::Approved,
            actor: Uuid::new_v4(),
        });
    }
}
