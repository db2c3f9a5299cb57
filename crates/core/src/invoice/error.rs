//! Error types for AR invoice operations.

use thiserror::Error;

use kontor_shared::types::{InvoiceId, OrderId};

use crate::approval::types::ApprovalStatus;
use crate::invoice::types::InvoiceStatus;
use crate::ledger::error::LedgerError;
use crate::order::types::OrderStatus;

/// Errors that can occur during AR invoice operations.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Source order has not been approved.
    #[error("Order must be approved before invoicing (approval status is {approval})")]
    OrderNotApproved {
        /// The order's approval status.
        approval: ApprovalStatus,
    },

    /// Source order has not been confirmed.
    #[error("Order must be confirmed before invoicing (status is {status})")]
    OrderNotConfirmed {
        /// The order's operational status.
        status: OrderStatus,
    },

    /// Source order has no lines to bill.
    #[error("Order has no lines to invoice")]
    EmptyOrder,

    /// An invoice already exists for the order.
    #[error("An invoice already exists for order {order_id}")]
    AlreadyInvoiced {
        /// The order that is already billed.
        order_id: OrderId,
    },

    /// A copied order line failed validation.
    #[error("Order line is not billable: {0}")]
    InvalidLine(String),

    /// Attempted an invalid operational status transition.
    #[error("Invalid invoice status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: InvoiceStatus,
        /// The attempted target status.
        to: InvoiceStatus,
    },

    /// Posting requires the invoice to be approved first.
    #[error("Invoice must be approved before posting (approval status is {approval})")]
    NotApproved {
        /// The current approval status.
        approval: ApprovalStatus,
    },

    /// Invoice not found.
    #[error("Invoice {0} not found")]
    NotFound(InvoiceId),

    /// Source order not found.
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// Ledger entry generation failed during posting.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl InvoiceError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::OrderNotApproved { .. }
            | Self::OrderNotConfirmed { .. }
            | Self::EmptyOrder
            | Self::InvalidLine(_)
            | Self::InvalidStatusTransition { .. }
            | Self::NotApproved { .. } => 422,
            Self::AlreadyInvoiced { .. } => 409,
            Self::NotFound(_) | Self::OrderNotFound(_) => 404,
            Self::Ledger(e) => e.status_code(),
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::OrderNotApproved { .. } => "ORDER_NOT_APPROVED",
            Self::OrderNotConfirmed { .. } => "ORDER_NOT_CONFIRMED",
            Self::EmptyOrder => "EMPTY_ORDER",
            Self::InvalidLine(_) => "INVALID_LINE",
            Self::AlreadyInvoiced { .. } => "ALREADY_INVOICED",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::NotApproved { .. } => "INVOICE_NOT_APPROVED",
            Self::NotFound(_) => "INVOICE_NOT_FOUND",
            Self::OrderNotFound(_) => "ORDER_NOT_FOUND",
            Self::Ledger(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_invoiced_is_conflict() {
        let err = InvoiceError::AlreadyInvoiced {
            order_id: OrderId::new(),
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_INVOICED");
    }

    #[test]
    fn test_preconditions_are_422() {
        let err = InvoiceError::OrderNotApproved {
            approval: ApprovalStatus::WaitingApproval,
        };
        assert_eq!(err.status_code(), 422);

        let err = InvoiceError::OrderNotConfirmed {
            status: OrderStatus::Draft,
        };
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_not_found_is_404() {
        assert_eq!(InvoiceError::NotFound(InvoiceId::new()).status_code(), 404);
    }
}
