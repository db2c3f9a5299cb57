//! Receipt lifecycle transitions.

use rust_decimal::Decimal;

use crate::approval::types::ApprovalStatus;
use crate::receipt::error::ReceiptError;
use crate::receipt::types::ReceiptStatus;

/// Stateless service for receipt lifecycle transitions.
pub struct ReceiptService;

impl ReceiptService {
    /// Validates a new receipt's amount.
    pub fn validate_amount(amount: Decimal) -> Result<(), ReceiptError> {
        if amount <= Decimal::ZERO {
            return Err(ReceiptError::InvalidAmount { amount });
        }
        Ok(())
    }

    /// Post an approved draft receipt.
    ///
    /// # Errors
    ///
    /// Returns `ReceiptError::NotApproved` if the approval chain has not
    /// reached `Approved`, or `ReceiptError::InvalidStatusTransition` if
    /// the receipt is not in `Draft`.
    pub fn post(
        status: ReceiptStatus,
        approval: ApprovalStatus,
    ) -> Result<ReceiptStatus, ReceiptError> {
        if approval != ApprovalStatus::Approved {
            return Err(ReceiptError::NotApproved { approval });
        }
        match status {
            ReceiptStatus::Draft => Ok(ReceiptStatus::Posted),
            _ => Err(ReceiptError::InvalidStatusTransition {
                from: status,
                to: ReceiptStatus::Posted,
            }),
        }
    }

    /// Cancel a draft receipt with no allocations.
    pub fn cancel(status: ReceiptStatus, allocated: Decimal) -> Result<ReceiptStatus, ReceiptError> {
        if allocated > Decimal::ZERO {
            return Err(ReceiptError::HasAllocations);
        }
        match status {
            ReceiptStatus::Draft => Ok(ReceiptStatus::Cancelled),
            _ => Err(ReceiptError::InvalidStatusTransition {
                from: status,
                to: ReceiptStatus::Cancelled,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_amount() {
        assert!(ReceiptService::validate_amount(dec!(100)).is_ok());
        assert!(matches!(
            ReceiptService::validate_amount(dec!(0)),
            Err(ReceiptError::InvalidAmount { .. })
        ));
        assert!(matches!(
            ReceiptService::validate_amount(dec!(-5)),
            Err(ReceiptError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_post_requires_approval() {
        let result = ReceiptService::post(ReceiptStatus::Draft, ApprovalStatus::Draft);
        assert!(matches!(result, Err(ReceiptError::NotApproved { .. })));
    }

    #[test]
    fn test_post_approved_draft() {
        let result = ReceiptService::post(ReceiptStatus::Draft, ApprovalStatus::Approved);
        assert_eq!(result.unwrap(), ReceiptStatus::Posted);
    }

    #[test]
    fn test_post_twice_fails() {
        let result = ReceiptService::post(ReceiptStatus::Posted, ApprovalStatus::Approved);
        assert!(matches!(
            result,
            Err(ReceiptError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_cancel_draft() {
        let result = ReceiptService::cancel(ReceiptStatus::Draft, dec!(0));
        assert_eq!(result.unwrap(), ReceiptStatus::Cancelled);
    }

    #[test]
    fn test_cancel_with_allocations_fails() {
        let result = ReceiptService::cancel(ReceiptStatus::Draft, dec!(100));
        assert!(matches!(result, Err(ReceiptError::HasAllocations)));
    }

    #[test]
    fn test_cancel_posted_fails() {
        let result = ReceiptService::cancel(ReceiptStatus::Posted, dec!(0));
        assert!(matches!(
            result,
            Err(ReceiptError::InvalidStatusTransition { .. })
        ));
    }
}
