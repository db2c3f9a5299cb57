//! Error types for sale order operations.

use rust_decimal::Decimal;
use thiserror::Error;

use kontor_shared::types::{OrderId, PartnerId, ProductId, TaxRateId};

use crate::approval::types::ApprovalStatus;
use crate::order::types::OrderStatus;

/// Errors that can occur during sale order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order has no lines.
    #[error("Order must have at least one line")]
    EmptyLines,

    /// Line quantity is zero or negative.
    #[error("Line quantity must be positive, got {quantity}")]
    InvalidQuantity {
        /// The offending quantity.
        quantity: Decimal,
    },

    /// Line unit price is negative.
    #[error("Line unit price must not be negative, got {unit_price}")]
    InvalidUnitPrice {
        /// The offending unit price.
        unit_price: Decimal,
    },

    /// Line tax rate is negative.
    #[error("Line tax rate must not be negative, got {tax_rate}")]
    InvalidTaxRate {
        /// The offending tax rate.
        tax_rate: Decimal,
    },

    /// Attempted an invalid operational status transition.
    #[error("Invalid order status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: OrderStatus,
        /// The attempted target status.
        to: OrderStatus,
    },

    /// Operational transition requires the order to be approved first.
    #[error("Order must be approved before this operation (approval status is {approval})")]
    NotApproved {
        /// The current approval status.
        approval: ApprovalStatus,
    },

    /// Order cannot be modified once submitted.
    #[error("Order can only be modified while draft or rejected")]
    NotEditable,

    /// Order not found.
    #[error("Order {0} not found")]
    NotFound(OrderId),

    /// The ordering customer does not exist.
    #[error("Customer {0} not found")]
    CustomerNotFound(PartnerId),

    /// A referenced product does not exist.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// A referenced tax rate does not exist.
    #[error("Tax rate {0} not found")]
    TaxRateNotFound(TaxRateId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl OrderError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyLines
            | Self::InvalidQuantity { .. }
            | Self::InvalidUnitPrice { .. }
            | Self::InvalidTaxRate { .. } => 400,
            Self::InvalidStatusTransition { .. } | Self::NotApproved { .. } | Self::NotEditable => {
                422
            }
            Self::CustomerNotFound(_) | Self::ProductNotFound(_) | Self::TaxRateNotFound(_) => 400,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLines => "EMPTY_LINES",
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::InvalidUnitPrice { .. } => "INVALID_UNIT_PRICE",
            Self::InvalidTaxRate { .. } => "INVALID_TAX_RATE",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::NotApproved { .. } => "ORDER_NOT_APPROVED",
            Self::NotEditable => "ORDER_NOT_EDITABLE",
            Self::NotFound(_) => "ORDER_NOT_FOUND",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::TaxRateNotFound(_) => "TAX_RATE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_errors_are_400() {
        assert_eq!(OrderError::EmptyLines.status_code(), 400);
        assert_eq!(
            OrderError::InvalidQuantity { quantity: dec!(0) }.status_code(),
            400
        );
    }

    #[test]
    fn test_precondition_errors_are_422() {
        let err = OrderError::InvalidStatusTransition {
            from: OrderStatus::Draft,
            to: OrderStatus::Shipped,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INVALID_STATUS_TRANSITION");

        let err = OrderError::NotApproved {
            approval: ApprovalStatus::Draft,
        };
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_not_found_is_404() {
        assert_eq!(OrderError::NotFound(OrderId::new()).status_code(), 404);
    }
}
