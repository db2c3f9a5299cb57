//! Approval workflow types shared by all approvable documents.
//!
//! Every document tracks two independent lifecycles: the approval chain
//! defined here, and an operational status owned by the document module
//! (order confirmation, invoice posting, ...). Operational transitions are
//! gated on the approval chain reaching `Approved`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Approval status in the sign-off workflow.
///
/// The valid transitions are:
/// - Draft → WaitingApproval (submit)
/// - Rejected → WaitingApproval (resubmit)
/// - WaitingApproval → Approved (approve)
/// - WaitingApproval → Rejected (reject)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Document is being drafted and has not been submitted.
    Draft,
    /// Document has been submitted and awaits an approver.
    WaitingApproval,
    /// Document has been signed off.
    Approved,
    /// Document was rejected; it can be fixed and resubmitted.
    Rejected,
}

impl ApprovalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::WaitingApproval => "waiting_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "waiting_approval" => Some(Self::WaitingApproval),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the document can be submitted from this status.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Returns true if the document content can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of document moving through the approval workflow.
///
/// The kind selects which roles may submit and approve (see
/// [`crate::approval::roles::UserRole`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Customer sale order.
    SaleOrder,
    /// Accounts-receivable invoice.
    ArInvoice,
    /// Accounts-receivable receipt (customer payment).
    ArReceipt,
}

impl DocumentKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SaleOrder => "sale_order",
            Self::ArInvoice => "ar_invoice",
            Self::ArReceipt => "ar_receipt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Approval action representing a validated transition with audit data.
///
/// Each variant captures the resulting status and the audit trail
/// information (who, when, why). Repositories apply the action in a single
/// UPDATE; nothing is mutated if validation fails.
#[derive(Debug, Clone)]
pub enum ApprovalAction {
    /// Submit a draft or rejected document for approval.
    Submit {
        /// The new approval status after submission.
        new_status: ApprovalStatus,
        /// The user who submitted the document.
        submitted_by: Uuid,
        /// When the document was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a waiting document.
    Approve {
        /// The new approval status after approval.
        new_status: ApprovalStatus,
        /// The user who approved the document.
        approved_by: Uuid,
        /// When the document was approved.
        approved_at: DateTime<Utc>,
    },
    /// Reject a waiting document.
    Reject {
        /// The new approval status after rejection.
        new_status: ApprovalStatus,
        /// The reason for rejection.
        reject_reason: String,
    },
}

impl ApprovalAction {
    /// Returns the new approval status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> ApprovalStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. } => *new_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(ApprovalStatus::Draft.as_str(), "draft");
        assert_eq!(ApprovalStatus::WaitingApproval.as_str(), "waiting_approval");
        assert_eq!(ApprovalStatus::Approved.as_str(), "approved");
        assert_eq!(ApprovalStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            ApprovalStatus::parse("draft"),
            Some(ApprovalStatus::Draft)
        );
        assert_eq!(
            ApprovalStatus::parse("WAITING_APPROVAL"),
            Some(ApprovalStatus::WaitingApproval)
        );
        assert_eq!(
            ApprovalStatus::parse("Approved"),
            Some(ApprovalStatus::Approved)
        );
        assert_eq!(
            ApprovalStatus::parse("rejected"),
            Some(ApprovalStatus::Rejected)
        );
        assert_eq!(ApprovalStatus::parse("invalid"), None);
    }

    #[test]
    fn test_status_submittable() {
        assert!(ApprovalStatus::Draft.is_submittable());
        assert!(ApprovalStatus::Rejected.is_submittable());
        assert!(!ApprovalStatus::WaitingApproval.is_submittable());
        assert!(!ApprovalStatus::Approved.is_submittable());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            format!("{}", ApprovalStatus::WaitingApproval),
            "waiting_approval"
        );
    }

    #[test]
    fn test_document_kind_as_str() {
        assert_eq!(DocumentKind::SaleOrder.as_str(), "sale_order");
        assert_eq!(DocumentKind::ArInvoice.as_str(), "ar_invoice");
        assert_eq!(DocumentKind::ArReceipt.as_str(), "ar_receipt");
    }
}
