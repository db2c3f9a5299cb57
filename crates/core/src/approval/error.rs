//! Error types for the approval workflow.

use thiserror::Error;
use uuid::Uuid;

use crate::approval::types::{ApprovalStatus, DocumentKind};

/// Errors that can occur during approval workflow operations.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Attempted an invalid approval transition.
    #[error("Invalid approval transition from {from} to {to}")]
    InvalidTransition {
        /// The current approval status.
        from: ApprovalStatus,
        /// The attempted target status.
        to: ApprovalStatus,
    },

    /// Acting role may not approve this document kind.
    #[error("Role {role} is not an approver for {kind}")]
    NotApprover {
        /// The acting role code.
        role: String,
        /// The document kind.
        kind: DocumentKind,
    },

    /// Acting role may not create or submit this document kind.
    #[error("Role {role} may not submit {kind}")]
    NotSubmitter {
        /// The acting role code.
        role: String,
        /// The document kind.
        kind: DocumentKind,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectReasonRequired,

    /// Document not found.
    #[error("{kind} {id} not found")]
    DocumentNotFound {
        /// The document kind.
        kind: DocumentKind,
        /// The document ID.
        id: Uuid,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ApprovalError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 422,
            Self::RejectReasonRequired => 400,
            Self::NotApprover { .. } | Self::NotSubmitter { .. } => 403,
            Self::DocumentNotFound { .. } => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotApprover { .. } => "NOT_APPROVER",
            Self::NotSubmitter { .. } => "NOT_SUBMITTER",
            Self::RejectReasonRequired => "REJECT_REASON_REQUIRED",
            Self::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = ApprovalError::InvalidTransition {
            from: ApprovalStatus::Draft,
            to: ApprovalStatus::Approved,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("draft"));
        assert!(err.to_string().contains("approved"));
    }

    #[test]
    fn test_not_approver_error() {
        let err = ApprovalError::NotApprover {
            role: "sales".to_string(),
            kind: DocumentKind::SaleOrder,
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_APPROVER");
    }

    #[test]
    fn test_reject_reason_required_error() {
        let err = ApprovalError::RejectReasonRequired;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "REJECT_REASON_REQUIRED");
    }

    #[test]
    fn test_document_not_found_error() {
        let err = ApprovalError::DocumentNotFound {
            kind: DocumentKind::ArInvoice,
            id: Uuid::nil(),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "DOCUMENT_NOT_FOUND");
    }
}
