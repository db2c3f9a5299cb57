//! Approval state machine shared by all approvable documents.
//!
//! All methods are associated functions that validate a transition and the
//! acting role, returning the appropriate [`ApprovalAction`] with audit
//! trail information. Callers persist the action; nothing here mutates
//! state, so a failed validation leaves the document untouched.

use chrono::Utc;
use uuid::Uuid;

use crate::approval::error::ApprovalError;
use crate::approval::roles::UserRole;
use crate::approval::types::{ApprovalAction, ApprovalStatus, DocumentKind};

/// Stateless service for approval workflow transitions.
pub struct ApprovalService;

impl ApprovalService {
    /// Submit a draft or rejected document for approval.
    ///
    /// # Arguments
    /// * `kind` - The document kind being submitted
    /// * `current` - The document's current approval status
    /// * `role` - The acting user's role
    /// * `submitted_by` - The acting user
    ///
    /// # Returns
    /// * `Ok(ApprovalAction::Submit)` if the transition is valid
    /// * `Err(ApprovalError::NotSubmitter)` if the role may not submit this kind
    /// * `Err(ApprovalError::InvalidTransition)` if not in Draft or Rejected
    pub fn submit(
        kind: DocumentKind,
        current: ApprovalStatus,
        role: UserRole,
        submitted_by: Uuid,
    ) -> Result<ApprovalAction, ApprovalError> {
        if !role.can_submit(kind) {
            return Err(ApprovalError::NotSubmitter {
                role: role.as_str().to_string(),
                kind,
            });
        }

        if current.is_submittable() {
            Ok(ApprovalAction::Submit {
                new_status: ApprovalStatus::WaitingApproval,
                submitted_by,
                submitted_at: Utc::now(),
            })
        } else {
            Err(ApprovalError::InvalidTransition {
                from: current,
                to: ApprovalStatus::WaitingApproval,
            })
        }
    }

    /// Approve a waiting document.
    ///
    /// # Arguments
    /// * `kind` - The document kind being approved
    /// * `current` - The document's current approval status
    /// * `role` - The acting user's role
    /// * `approved_by` - The acting user
    ///
    /// # Returns
    /// * `Ok(ApprovalAction::Approve)` if the transition is valid
    /// * `Err(ApprovalError::NotApprover)` if the role may not approve this kind
    /// * `Err(ApprovalError::InvalidTransition)` if not in WaitingApproval
    pub fn approve(
        kind: DocumentKind,
        current: ApprovalStatus,
        role: UserRole,
        approved_by: Uuid,
    ) -> Result<ApprovalAction, ApprovalError> {
        if !role.can_approve(kind) {
            return Err(ApprovalError::NotApprover {
                role: role.as_str().to_string(),
                kind,
            });
        }

        match current {
            ApprovalStatus::WaitingApproval => Ok(ApprovalAction::Approve {
                new_status: ApprovalStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current,
                to: ApprovalStatus::Approved,
            }),
        }
    }

    /// Reject a waiting document.
    ///
    /// # Arguments
    /// * `kind` - The document kind being rejected
    /// * `current` - The document's current approval status
    /// * `role` - The acting user's role
    /// * `reject_reason` - The reason for rejection (required)
    ///
    /// # Returns
    /// * `Ok(ApprovalAction::Reject)` if the transition is valid
    /// * `Err(ApprovalError::NotApprover)` if the role may not approve this kind
    /// * `Err(ApprovalError::RejectReasonRequired)` if the reason is empty
    /// * `Err(ApprovalError::InvalidTransition)` if not in WaitingApproval
    pub fn reject(
        kind: DocumentKind,
        current: ApprovalStatus,
        role: UserRole,
        reject_reason: String,
    ) -> Result<ApprovalAction, ApprovalError> {
        if !role.can_approve(kind) {
            return Err(ApprovalError::NotApprover {
                role: role.as_str().to_string(),
                kind,
            });
        }

        if reject_reason.trim().is_empty() {
            return Err(ApprovalError::RejectReasonRequired);
        }

        match current {
            ApprovalStatus::WaitingApproval => Ok(ApprovalAction::Reject {
                new_status: ApprovalStatus::Rejected,
                reject_reason,
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current,
                to: ApprovalStatus::Rejected,
            }),
        }
    }

    /// Check if an approval status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → WaitingApproval (submit)
    /// - Rejected → WaitingApproval (resubmit)
    /// - WaitingApproval → Approved (approve)
    /// - WaitingApproval → Rejected (reject)
    #[must_use]
    pub fn is_valid_transition(from: ApprovalStatus, to: ApprovalStatus) -> bool {
        matches!(
            (from, to),
            (
                ApprovalStatus::Draft | ApprovalStatus::Rejected,
                ApprovalStatus::WaitingApproval
            ) | (
                ApprovalStatus::WaitingApproval,
                ApprovalStatus::Approved | ApprovalStatus::Rejected
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_from_draft() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::submit(
            DocumentKind::SaleOrder,
            ApprovalStatus::Draft,
            UserRole::Sales,
            user_id,
        );
        let action = result.unwrap();
        assert_eq!(action.new_status(), ApprovalStatus::WaitingApproval);
    }

    #[test]
    fn test_resubmit_from_rejected() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::submit(
            DocumentKind::ArInvoice,
            ApprovalStatus::Rejected,
            UserRole::Account,
            user_id,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_submit_from_waiting_fails() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::submit(
            DocumentKind::SaleOrder,
            ApprovalStatus::WaitingApproval,
            UserRole::Sales,
            user_id,
        );
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_submit_wrong_role_fails() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::submit(
            DocumentKind::ArReceipt,
            ApprovalStatus::Draft,
            UserRole::Sales,
            user_id,
        );
        assert!(matches!(result, Err(ApprovalError::NotSubmitter { .. })));
    }

    #[test]
    fn test_approve_from_waiting() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::approve(
            DocumentKind::SaleOrder,
            ApprovalStatus::WaitingApproval,
            UserRole::SalesManager,
            user_id,
        );
        assert_eq!(result.unwrap().new_status(), ApprovalStatus::Approved);
    }

    #[test]
    fn test_ceo_approves_order() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::approve(
            DocumentKind::SaleOrder,
            ApprovalStatus::WaitingApproval,
            UserRole::Ceo,
            user_id,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_chacc_approves_invoice_and_receipt() {
        let user_id = Uuid::new_v4();
        for kind in [DocumentKind::ArInvoice, DocumentKind::ArReceipt] {
            let result = ApprovalService::approve(
                kind,
                ApprovalStatus::WaitingApproval,
                UserRole::ChiefAccountant,
                user_id,
            );
            assert!(result.is_ok());
        }
    }

    #[test]
    fn test_approve_from_draft_fails() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::approve(
            DocumentKind::SaleOrder,
            ApprovalStatus::Draft,
            UserRole::SalesManager,
            user_id,
        );
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_approve_from_approved_fails() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::approve(
            DocumentKind::SaleOrder,
            ApprovalStatus::Approved,
            UserRole::SalesManager,
            user_id,
        );
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_approve_wrong_role_fails() {
        let user_id = Uuid::new_v4();
        let result = ApprovalService::approve(
            DocumentKind::ArInvoice,
            ApprovalStatus::WaitingApproval,
            UserRole::SalesManager,
            user_id,
        );
        assert!(matches!(result, Err(ApprovalError::NotApprover { .. })));
    }

    #[test]
    fn test_reject_from_waiting() {
        let result = ApprovalService::reject(
            DocumentKind::SaleOrder,
            ApprovalStatus::WaitingApproval,
            UserRole::SalesManager,
            "Price below floor".to_string(),
        );
        assert_eq!(result.unwrap().new_status(), ApprovalStatus::Rejected);
    }

    #[test]
    fn test_reject_empty_reason_fails() {
        let result = ApprovalService::reject(
            DocumentKind::SaleOrder,
            ApprovalStatus::WaitingApproval,
            UserRole::SalesManager,
            String::new(),
        );
        assert!(matches!(result, Err(ApprovalError::RejectReasonRequired)));
    }

    #[test]
    fn test_reject_whitespace_reason_fails() {
        let result = ApprovalService::reject(
            DocumentKind::ArReceipt,
            ApprovalStatus::WaitingApproval,
            UserRole::ChiefAccountant,
            "   ".to_string(),
        );
        assert!(matches!(result, Err(ApprovalError::RejectReasonRequired)));
    }

    #[test]
    fn test_reject_from_approved_fails() {
        let result = ApprovalService::reject(
            DocumentKind::SaleOrder,
            ApprovalStatus::Approved,
            UserRole::SalesManager,
            "Too late".to_string(),
        );
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        // Valid transitions
        assert!(ApprovalService::is_valid_transition(
            ApprovalStatus::Draft,
            ApprovalStatus::WaitingApproval
        ));
        assert!(ApprovalService::is_valid_transition(
            ApprovalStatus::Rejected,
            ApprovalStatus::WaitingApproval
        ));
        assert!(ApprovalService::is_valid_transition(
            ApprovalStatus::WaitingApproval,
            ApprovalStatus::Approved
        ));
        assert!(ApprovalService::is_valid_transition(
            ApprovalStatus::WaitingApproval,
            ApprovalStatus::Rejected
        ));

        // Invalid transitions
        assert!(!ApprovalService::is_valid_transition(
            ApprovalStatus::Draft,
            ApprovalStatus::Approved
        ));
        assert!(!ApprovalService::is_valid_transition(
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected
        ));
        assert!(!ApprovalService::is_valid_transition(
            ApprovalStatus::Approved,
            ApprovalStatus::WaitingApproval
        ));
    }
}
