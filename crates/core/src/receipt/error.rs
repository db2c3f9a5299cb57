//! Error types for receipt lifecycle operations and the allocation engine.

use rust_decimal::Decimal;
use thiserror::Error;

use kontor_shared::types::{InvoiceId, PartnerId, ReceiptId};

use crate::approval::types::ApprovalStatus;
use crate::ledger::error::LedgerError;
use crate::receipt::types::ReceiptStatus;

/// Errors that can occur during receipt lifecycle operations.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Receipt amount is zero or negative.
    #[error("Receipt amount must be positive, got {amount}")]
    InvalidAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// Payment method is not recognised.
    #[error("Unknown payment method: {method}")]
    UnknownPaymentMethod {
        /// The offending method string.
        method: String,
    },

    /// The paying customer does not exist.
    #[error("Customer {0} not found")]
    CustomerNotFound(PartnerId),

    /// Attempted an invalid operational status transition.
    #[error("Invalid receipt status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: ReceiptStatus,
        /// The attempted target status.
        to: ReceiptStatus,
    },

    /// Posting requires the receipt to be approved first.
    #[error("Receipt must be approved before posting (approval status is {approval})")]
    NotApproved {
        /// The current approval status.
        approval: ApprovalStatus,
    },

    /// A receipt with allocations cannot be cancelled.
    #[error("Receipt with allocations cannot be cancelled")]
    HasAllocations,

    /// Receipt not found.
    #[error("Receipt {0} not found")]
    NotFound(ReceiptId),

    /// Ledger entry generation failed during posting.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ReceiptError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. }
            | Self::UnknownPaymentMethod { .. }
            | Self::CustomerNotFound(_) => 400,
            Self::InvalidStatusTransition { .. }
            | Self::NotApproved { .. }
            | Self::HasAllocations => 422,
            Self::NotFound(_) => 404,
            Self::Ledger(e) => e.status_code(),
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::UnknownPaymentMethod { .. } => "UNKNOWN_PAYMENT_METHOD",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::NotApproved { .. } => "RECEIPT_NOT_APPROVED",
            Self::HasAllocations => "RECEIPT_HAS_ALLOCATIONS",
            Self::NotFound(_) => "RECEIPT_NOT_FOUND",
            Self::Ledger(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Errors that can occur while allocating a receipt to invoices.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Receipt must be posted before allocation.
    #[error("Receipt must be posted before allocation (status is {status})")]
    ReceiptNotPosted {
        /// The receipt's operational status.
        status: ReceiptStatus,
    },

    /// Receipt must be approved before allocation.
    #[error("Receipt must be approved before allocation (approval status is {approval})")]
    ReceiptNotApproved {
        /// The receipt's approval status.
        approval: ApprovalStatus,
    },

    /// The batch contains no allocations.
    #[error("Allocation batch must contain at least one allocation")]
    EmptyBatch,

    /// The batch names the same invoice twice.
    #[error("Invoice {0} appears more than once in the batch")]
    DuplicateInvoice(InvoiceId),

    /// A referenced invoice was not found.
    #[error("Invoice {0} not found")]
    InvoiceNotFound(InvoiceId),

    /// A referenced invoice belongs to a different customer.
    #[error("Invoice {invoice_id} belongs to a different customer than the receipt")]
    CustomerMismatch {
        /// The offending invoice.
        invoice_id: InvoiceId,
    },

    /// A referenced invoice is not open for allocation.
    #[error("Invoice {invoice_id} is not open for allocation")]
    InvoiceNotOpen {
        /// The offending invoice.
        invoice_id: InvoiceId,
    },

    /// An applied amount is zero or negative.
    #[error("Applied amount for invoice {invoice_id} must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending invoice.
        invoice_id: InvoiceId,
        /// The offending amount.
        amount: Decimal,
    },

    /// An applied amount exceeds the invoice's open balance.
    #[error(
        "Applied amount {requested} exceeds open balance {open} of invoice {invoice_id}"
    )]
    ExceedsInvoiceBalance {
        /// The offending invoice.
        invoice_id: InvoiceId,
        /// The requested amount.
        requested: Decimal,
        /// The invoice's open balance.
        open: Decimal,
    },

    /// The batch total exceeds the receipt's unallocated remainder.
    #[error("Batch total {requested} exceeds unallocated remainder {remainder} of the receipt")]
    ExceedsReceiptRemainder {
        /// The batch total.
        requested: Decimal,
        /// The receipt's unallocated remainder.
        remainder: Decimal,
    },

    /// Receipt not found.
    #[error("Receipt {0} not found")]
    ReceiptNotFound(ReceiptId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AllocationError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyBatch | Self::DuplicateInvoice(_) | Self::NonPositiveAmount { .. } => 400,
            Self::ReceiptNotPosted { .. }
            | Self::ReceiptNotApproved { .. }
            | Self::InvoiceNotOpen { .. } => 422,
            Self::CustomerMismatch { .. }
            | Self::ExceedsInvoiceBalance { .. }
            | Self::ExceedsReceiptRemainder { .. } => 409,
            Self::InvoiceNotFound(_) | Self::ReceiptNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ReceiptNotPosted { .. } => "RECEIPT_NOT_POSTED",
            Self::ReceiptNotApproved { .. } => "RECEIPT_NOT_APPROVED",
            Self::EmptyBatch => "EMPTY_BATCH",
            Self::DuplicateInvoice(_) => "DUPLICATE_INVOICE",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::CustomerMismatch { .. } => "CUSTOMER_MISMATCH",
            Self::InvoiceNotOpen { .. } => "INVOICE_NOT_OPEN",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::ExceedsInvoiceBalance { .. } => "EXCEEDS_INVOICE_BALANCE",
            Self::ExceedsReceiptRemainder { .. } => "EXCEEDS_RECEIPT_REMAINDER",
            Self::ReceiptNotFound(_) => "RECEIPT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_over_allocation_is_conflict() {
        let err = AllocationError::ExceedsInvoiceBalance {
            invoice_id: InvoiceId::new(),
            requested: dec!(1200),
            open: dec!(1000),
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "EXCEEDS_INVOICE_BALANCE");

        let err = AllocationError::ExceedsReceiptRemainder {
            requested: dec!(500),
            remainder: dec!(100),
        };
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_state_errors_are_422() {
        let err = AllocationError::ReceiptNotPosted {
            status: ReceiptStatus::Draft,
        };
        assert_eq!(err.status_code(), 422);

        let err = AllocationError::ReceiptNotApproved {
            approval: ApprovalStatus::WaitingApproval,
        };
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_input_errors_are_400() {
        assert_eq!(AllocationError::EmptyBatch.status_code(), 400);
        assert_eq!(
            AllocationError::NonPositiveAmount {
                invoice_id: InvoiceId::new(),
                amount: dec!(0),
            }
            .status_code(),
            400
        );
    }
}
