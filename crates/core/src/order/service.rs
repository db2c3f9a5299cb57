//! Operational status transitions for sale orders.
//!
//! The approval chain is handled by [`crate::approval::ApprovalService`];
//! this service owns the parallel operational lifecycle
//! (draft → confirmed → shipped → completed, cancel before shipment).

use crate::approval::types::ApprovalStatus;
use crate::order::error::OrderError;
use crate::order::types::{OrderLine, OrderStatus};

/// Stateless service for sale order operational transitions.
pub struct OrderService;

impl OrderService {
    /// Validates the lines of a new or edited order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order has no lines or any line carries a
    /// non-positive quantity, negative price, or negative tax rate.
    pub fn validate_lines(lines: &[OrderLine]) -> Result<(), OrderError> {
        if lines.is_empty() {
            return Err(OrderError::EmptyLines);
        }
        for line in lines {
            crate::order::totals::price_line(line)?;
        }
        Ok(())
    }

    /// Confirm an approved draft order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotApproved` if the approval chain has not
    /// reached `Approved`, or `OrderError::InvalidStatusTransition` if the
    /// order is not in `Draft`.
    pub fn confirm(
        status: OrderStatus,
        approval: ApprovalStatus,
    ) -> Result<OrderStatus, OrderError> {
        if approval != ApprovalStatus::Approved {
            return Err(OrderError::NotApproved { approval });
        }
        match status {
            OrderStatus::Draft => Ok(OrderStatus::Confirmed),
            _ => Err(OrderError::InvalidStatusTransition {
                from: status,
                to: OrderStatus::Confirmed,
            }),
        }
    }

    /// Mark a confirmed order as shipped.
    pub fn ship(status: OrderStatus) -> Result<OrderStatus, OrderError> {
        match status {
            OrderStatus::Confirmed => Ok(OrderStatus::Shipped),
            _ => Err(OrderError::InvalidStatusTransition {
                from: status,
                to: OrderStatus::Shipped,
            }),
        }
    }

    /// Mark a shipped order as completed.
    pub fn complete(status: OrderStatus) -> Result<OrderStatus, OrderError> {
        match status {
            OrderStatus::Shipped => Ok(OrderStatus::Completed),
            _ => Err(OrderError::InvalidStatusTransition {
                from: status,
                to: OrderStatus::Completed,
            }),
        }
    }

    /// Cancel an order before shipment.
    pub fn cancel(status: OrderStatus) -> Result<OrderStatus, OrderError> {
        match status {
            OrderStatus::Draft | OrderStatus::Confirmed => Ok(OrderStatus::Cancelled),
            _ => Err(OrderError::InvalidStatusTransition {
                from: status,
                to: OrderStatus::Cancelled,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontor_shared::types::{ProductId, TaxRateId};
    use rust_decimal_macros::dec;

    fn valid_line() -> OrderLine {
        OrderLine {
            product_id: ProductId::new(),
            quantity: dec!(1),
            unit_price: dec!(100),
            tax_rate_id: TaxRateId::new(),
            tax_rate: dec!(0.10),
        }
    }

    #[test]
    fn test_validate_lines_ok() {
        assert!(OrderService::validate_lines(&[valid_line()]).is_ok());
    }

    #[test]
    fn test_validate_lines_empty_fails() {
        assert!(matches!(
            OrderService::validate_lines(&[]),
            Err(OrderError::EmptyLines)
        ));
    }

    #[test]
    fn test_validate_lines_bad_quantity_fails() {
        let mut line = valid_line();
        line.quantity = dec!(-1);
        assert!(matches!(
            OrderService::validate_lines(&[line]),
            Err(OrderError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_confirm_requires_approval() {
        let result = OrderService::confirm(OrderStatus::Draft, ApprovalStatus::WaitingApproval);
        assert!(matches!(result, Err(OrderError::NotApproved { .. })));
    }

    #[test]
    fn test_confirm_approved_draft() {
        let result = OrderService::confirm(OrderStatus::Draft, ApprovalStatus::Approved);
        assert_eq!(result.unwrap(), OrderStatus::Confirmed);
    }

    #[test]
    fn test_confirm_twice_fails() {
        let result = OrderService::confirm(OrderStatus::Confirmed, ApprovalStatus::Approved);
        assert!(matches!(
            result,
            Err(OrderError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_ship_complete_chain() {
        let shipped = OrderService::ship(OrderStatus::Confirmed).unwrap();
        assert_eq!(shipped, OrderStatus::Shipped);
        let completed = OrderService::complete(shipped).unwrap();
        assert_eq!(completed, OrderStatus::Completed);
    }

    #[test]
    fn test_ship_from_draft_fails() {
        assert!(matches!(
            OrderService::ship(OrderStatus::Draft),
            Err(OrderError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_cancel_before_shipment() {
        assert_eq!(
            OrderService::cancel(OrderStatus::Draft).unwrap(),
            OrderStatus::Cancelled
        );
        assert_eq!(
            OrderService::cancel(OrderStatus::Confirmed).unwrap(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_cancel_after_shipment_fails() {
        assert!(matches!(
            OrderService::cancel(OrderStatus::Shipped),
            Err(OrderError::InvalidStatusTransition { .. })
        ));
        assert!(matches!(
            OrderService::cancel(OrderStatus::Completed),
            Err(OrderError::InvalidStatusTransition { .. })
        ));
    }
}
