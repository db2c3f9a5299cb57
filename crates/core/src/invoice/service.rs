//! Invoice construction and operational transitions.
//!
//! An invoice is always derived from an approved, confirmed sale order.
//! Lines are copied verbatim; totals are recomputed by summing the copied
//! lines rather than copying the order's stored totals, so line-level
//! rounding can never drift between the two documents.

use crate::approval::types::ApprovalStatus;
use crate::invoice::error::InvoiceError;
use crate::invoice::types::{InvoiceDraft, InvoiceStatus};
use crate::order::totals::{document_totals, price_line};
use crate::order::types::{OrderLine, OrderStatus};
use kontor_shared::types::{OrderId, PartnerId};

/// The slice of a sale order needed to build its invoice.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    /// The order ID.
    pub id: OrderId,
    /// The ordering customer.
    pub customer_id: PartnerId,
    /// The order's operational status.
    pub status: OrderStatus,
    /// The order's approval status.
    pub approval_status: ApprovalStatus,
    /// The order lines to bill.
    pub lines: Vec<OrderLine>,
}

/// Stateless service for invoice construction and transitions.
pub struct InvoiceService;

impl InvoiceService {
    /// Builds an invoice from an order.
    ///
    /// Preconditions: the order is approved AND confirmed and has at least
    /// one line. The one-invoice-per-order guard is enforced by the
    /// repository inside the creation transaction; this function is pure.
    ///
    /// # Errors
    ///
    /// Returns an error if a precondition fails or a copied line fails
    /// validation.
    pub fn build_from_order(order: &OrderSnapshot) -> Result<InvoiceDraft, InvoiceError> {
        if order.approval_status != ApprovalStatus::Approved {
            return Err(InvoiceError::OrderNotApproved {
                approval: order.approval_status,
            });
        }
        if order.status != OrderStatus::Confirmed {
            return Err(InvoiceError::OrderNotConfirmed {
                status: order.status,
            });
        }
        if order.lines.is_empty() {
            return Err(InvoiceError::EmptyOrder);
        }

        let mut lines = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            let priced = price_line(line).map_err(|e| InvoiceError::InvalidLine(e.to_string()))?;
            lines.push(priced);
        }

        let totals = document_totals(&lines);

        Ok(InvoiceDraft {
            order_id: order.id,
            customer_id: order.customer_id,
            lines,
            totals,
        })
    }

    /// Post an approved draft invoice.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::NotApproved` if the approval chain has not
    /// reached `Approved`, or `InvoiceError::InvalidStatusTransition` if
    /// the invoice is not in `Draft`.
    pub fn post(
        status: InvoiceStatus,
        approval: ApprovalStatus,
    ) -> Result<InvoiceStatus, InvoiceError> {
        if approval != ApprovalStatus::Approved {
            return Err(InvoiceError::NotApproved { approval });
        }
        match status {
            InvoiceStatus::Draft => Ok(InvoiceStatus::Posted),
            _ => Err(InvoiceError::InvalidStatusTransition {
                from: status,
                to: InvoiceStatus::Posted,
            }),
        }
    }

    /// Cancel a draft invoice.
    pub fn cancel(status: InvoiceStatus) -> Result<InvoiceStatus, InvoiceError> {
        match status {
            InvoiceStatus::Draft => Ok(InvoiceStatus::Cancelled),
            _ => Err(InvoiceError::InvalidStatusTransition {
                from: status,
                to: InvoiceStatus::Cancelled,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontor_shared::types::{ProductId, TaxRateId};
    use rust_decimal_macros::dec;

    fn snapshot(status: OrderStatus, approval: ApprovalStatus) -> OrderSnapshot {
        OrderSnapshot {
            id: OrderId::new(),
            customer_id: PartnerId::new(),
            status,
            approval_status: approval,
            lines: vec![
                OrderLine {
                    product_id: ProductId::new(),
                    quantity: dec!(2),
                    unit_price: dec!(500),
                    tax_rate_id: TaxRateId::new(),
                    tax_rate: dec!(0.10),
                },
                OrderLine {
                    product_id: ProductId::new(),
                    quantity: dec!(1),
                    unit_price: dec!(2000),
                    tax_rate_id: TaxRateId::new(),
                    tax_rate: dec!(0.10),
                },
            ],
        }
    }

    #[test]
    fn test_build_from_approved_confirmed_order() {
        let order = snapshot(OrderStatus::Confirmed, ApprovalStatus::Approved);
        let draft = InvoiceService::build_from_order(&order).unwrap();

        assert_eq!(draft.order_id, order.id);
        assert_eq!(draft.customer_id, order.customer_id);
        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.totals.total_before_tax, dec!(3000));
        assert_eq!(draft.totals.total_tax, dec!(300.00));
        assert_eq!(draft.totals.total_after_tax, dec!(3300.00));
    }

    #[test]
    fn test_build_copies_lines_verbatim() {
        let order = snapshot(OrderStatus::Confirmed, ApprovalStatus::Approved);
        let draft = InvoiceService::build_from_order(&order).unwrap();

        for (copied, source) in draft.lines.iter().zip(&order.lines) {
            assert_eq!(&copied.line, source);
        }
    }

    #[test]
    fn test_build_from_unapproved_order_fails() {
        let order = snapshot(OrderStatus::Confirmed, ApprovalStatus::WaitingApproval);
        let result = InvoiceService::build_from_order(&order);
        assert!(matches!(result, Err(InvoiceError::OrderNotApproved { .. })));
    }

    #[test]
    fn test_build_from_unconfirmed_order_fails() {
        let order = snapshot(OrderStatus::Draft, ApprovalStatus::Approved);
        let result = InvoiceService::build_from_order(&order);
        assert!(matches!(
            result,
            Err(InvoiceError::OrderNotConfirmed { .. })
        ));
    }

    #[test]
    fn test_build_from_empty_order_fails() {
        let mut order = snapshot(OrderStatus::Confirmed, ApprovalStatus::Approved);
        order.lines.clear();
        let result = InvoiceService::build_from_order(&order);
        assert!(matches!(result, Err(InvoiceError::EmptyOrder)));
    }

    #[test]
    fn test_post_requires_approval() {
        let result = InvoiceService::post(InvoiceStatus::Draft, ApprovalStatus::WaitingApproval);
        assert!(matches!(result, Err(InvoiceError::NotApproved { .. })));
    }

    #[test]
    fn test_post_approved_draft() {
        let result = InvoiceService::post(InvoiceStatus::Draft, ApprovalStatus::Approved);
        assert_eq!(result.unwrap(), InvoiceStatus::Posted);
    }

    #[test]
    fn test_post_twice_fails() {
        let result = InvoiceService::post(InvoiceStatus::Posted, ApprovalStatus::Approved);
        assert!(matches!(
            result,
            Err(InvoiceError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_cancel_only_from_draft() {
        assert_eq!(
            InvoiceService::cancel(InvoiceStatus::Draft).unwrap(),
            InvoiceStatus::Cancelled
        );
        assert!(matches!(
            InvoiceService::cancel(InvoiceStatus::Posted),
            Err(InvoiceError::InvalidStatusTransition { .. })
        ));
    }
}
