//! Receipt allocation engine.
//!
//! Validates a batch of receipt-to-invoice allocations as one unit: the
//! first failure rejects the whole batch, so the repository either persists
//! every row or none. Balance checks run against snapshots the repository
//! reads under row locks, which keeps two concurrent batches from jointly
//! over-allocating a receipt or an invoice.

use rust_decimal::Decimal;
use std::collections::HashSet;

use kontor_shared::types::{InvoiceId, PartnerId, ReceiptId};

use crate::approval::types::ApprovalStatus;
use crate::receipt::error::AllocationError;
use crate::receipt::types::{
    AllocationBatchOutcome, AllocationRequest, AllocationStatus, OpenInvoice, ReceiptSnapshot,
    ReceiptStatus,
};

/// Derives a receipt's allocation status from its amount and the sum of its
/// allocations.
///
/// This is the single source of truth for the derivation; every allocation
/// mutation recomputes the status through this function.
#[must_use]
pub fn derive_allocation_status(amount: Decimal, allocated: Decimal) -> AllocationStatus {
    if allocated <= Decimal::ZERO {
        AllocationStatus::Unallocated
    } else if allocated < amount {
        AllocationStatus::PartiallyAllocated
    } else {
        AllocationStatus::FullyAllocated
    }
}

/// Stateless engine validating allocation batches.
pub struct AllocationEngine;

impl AllocationEngine {
    /// Validates an allocation batch against the receipt and the referenced
    /// invoices.
    ///
    /// Validation order:
    /// 1. receipt is posted and approved;
    /// 2. batch is non-empty and names each invoice at most once;
    /// 3. every invoice exists in `invoices`, belongs to the receipt's
    ///    customer, and is open for allocation;
    /// 4. each applied amount is positive and within the invoice's open
    ///    balance;
    /// 5. the batch total is within the receipt's unallocated remainder.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule; nothing about the batch is usable
    /// on error.
    pub fn validate_batch(
        receipt: &ReceiptSnapshot,
        invoices: &[OpenInvoice],
        batch: &[AllocationRequest],
    ) -> Result<AllocationBatchOutcome, AllocationError> {
        if receipt.status != ReceiptStatus::Posted {
            return Err(AllocationError::ReceiptNotPosted {
                status: receipt.status,
            });
        }
        if receipt.approval_status != ApprovalStatus::Approved {
            return Err(AllocationError::ReceiptNotApproved {
                approval: receipt.approval_status,
            });
        }
        if batch.is_empty() {
            return Err(AllocationError::EmptyBatch);
        }

        let mut seen: HashSet<InvoiceId> = HashSet::with_capacity(batch.len());
        for request in batch {
            if !seen.insert(request.invoice_id) {
                return Err(AllocationError::DuplicateInvoice(request.invoice_id));
            }
        }

        let mut batch_total = Decimal::ZERO;
        let mut paid_invoices = Vec::new();

        for request in batch {
            let invoice = invoices
                .iter()
                .find(|i| i.id == request.invoice_id)
                .ok_or(AllocationError::InvoiceNotFound(request.invoice_id))?;

            if invoice.customer_id != receipt.customer_id {
                return Err(AllocationError::CustomerMismatch {
                    invoice_id: invoice.id,
                });
            }
            if !invoice.status.is_open_for_allocation() {
                return Err(AllocationError::InvoiceNotOpen {
                    invoice_id: invoice.id,
                });
            }
            if request.applied_amount <= Decimal::ZERO {
                return Err(AllocationError::NonPositiveAmount {
                    invoice_id: invoice.id,
                    amount: request.applied_amount,
                });
            }

            let open = invoice.open_balance();
            if request.applied_amount > open {
                return Err(AllocationError::ExceedsInvoiceBalance {
                    invoice_id: invoice.id,
                    requested: request.applied_amount,
                    open,
                });
            }
            if request.applied_amount == open {
                paid_invoices.push(invoice.id);
            }

            batch_total += request.applied_amount;
        }

        let remainder_before = receipt.amount - receipt.allocated;
        if batch_total > remainder_before {
            return Err(AllocationError::ExceedsReceiptRemainder {
                requested: batch_total,
                remainder: remainder_before,
            });
        }

        let new_allocated = receipt.allocated + batch_total;

        Ok(AllocationBatchOutcome {
            new_allocated,
            allocation_status: derive_allocation_status(receipt.amount, new_allocated),
            remainder: receipt.amount - new_allocated,
            paid_invoices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::types::InvoiceStatus;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn receipt(amount: Decimal, allocated: Decimal) -> ReceiptSnapshot {
        ReceiptSnapshot {
            id: ReceiptId::new(),
            customer_id: PartnerId::new(),
            amount,
            status: ReceiptStatus::Posted,
            approval_status: ApprovalStatus::Approved,
            allocated,
        }
    }

    fn invoice_for(
        receipt: &ReceiptSnapshot,
        total_after_tax: Decimal,
        allocated: Decimal,
    ) -> OpenInvoice {
        OpenInvoice {
            id: InvoiceId::new(),
            customer_id: receipt.customer_id,
            total_after_tax,
            allocated,
            status: InvoiceStatus::Posted,
        }
    }

    #[test]
    fn test_full_allocation_one_invoice() {
        // Receipt 1100 fully applied to an invoice of 1100
        let receipt = receipt(dec!(1100), dec!(0));
        let invoice = invoice_for(&receipt, dec!(1100), dec!(0));

        let outcome = AllocationEngine::validate_batch(
            &receipt,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(1100),
            }],
        )
        .unwrap();

        assert_eq!(outcome.allocation_status, AllocationStatus::FullyAllocated);
        assert_eq!(outcome.remainder, dec!(0));
        assert_eq!(outcome.paid_invoices, vec![invoice.id]);
    }

    #[test]
    fn test_partial_allocation_leaves_invoice_open() {
        // Receipt 1000 applied to an invoice of 2200 leaves 1200 unpaid
        let receipt = receipt(dec!(1000), dec!(0));
        let invoice = invoice_for(&receipt, dec!(2200), dec!(0));

        let outcome = AllocationEngine::validate_batch(
            &receipt,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(1000),
            }],
        )
        .unwrap();

        assert_eq!(outcome.allocation_status, AllocationStatus::FullyAllocated);
        assert_eq!(outcome.remainder, dec!(0));
        assert!(outcome.paid_invoices.is_empty());
        assert_eq!(invoice.open_balance() - dec!(1000), dec!(1200));
    }

    #[test]
    fn test_over_allocation_of_invoice_rejected() {
        // 1200 against an invoice with only 1000 open
        let receipt = receipt(dec!(5000), dec!(0));
        let invoice = invoice_for(&receipt, dec!(2200), dec!(1200));
        assert_eq!(invoice.open_balance(), dec!(1000));

        let result = AllocationEngine::validate_batch(
            &receipt,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(1200),
            }],
        );

        assert!(matches!(
            result,
            Err(AllocationError::ExceedsInvoiceBalance { .. })
        ));
    }

    #[test]
    fn test_over_allocation_of_receipt_rejected() {
        let receipt = receipt(dec!(1000), dec!(800));
        let invoice = invoice_for(&receipt, dec!(5000), dec!(0));

        let result = AllocationEngine::validate_batch(
            &receipt,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(500),
            }],
        );

        assert!(matches!(
            result,
            Err(AllocationError::ExceedsReceiptRemainder { .. })
        ));
    }

    #[test]
    fn test_partial_batch_is_allowed() {
        // The batch may distribute less than the remainder
        let receipt = receipt(dec!(1000), dec!(0));
        let invoice = invoice_for(&receipt, dec!(5000), dec!(0));

        let outcome = AllocationEngine::validate_batch(
            &receipt,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(400),
            }],
        )
        .unwrap();

        assert_eq!(
            outcome.allocation_status,
            AllocationStatus::PartiallyAllocated
        );
        assert_eq!(outcome.remainder, dec!(600));
    }

    #[test]
    fn test_batch_across_two_invoices() {
        let receipt = receipt(dec!(3000), dec!(0));
        let inv_a = invoice_for(&receipt, dec!(1100), dec!(0));
        let inv_b = invoice_for(&receipt, dec!(2200), dec!(0));

        let outcome = AllocationEngine::validate_batch(
            &receipt,
            &[inv_a, inv_b],
            &[
                AllocationRequest {
                    invoice_id: inv_a.id,
                    applied_amount: dec!(1100),
                },
                AllocationRequest {
                    invoice_id: inv_b.id,
                    applied_amount: dec!(1900),
                },
            ],
        )
        .unwrap();

        assert_eq!(outcome.allocation_status, AllocationStatus::FullyAllocated);
        assert_eq!(outcome.paid_invoices, vec![inv_a.id]);
    }

    #[test]
    fn test_unposted_receipt_rejected() {
        let mut r = receipt(dec!(1000), dec!(0));
        r.status = ReceiptStatus::Draft;
        let invoice = invoice_for(&r, dec!(1000), dec!(0));

        let result = AllocationEngine::validate_batch(
            &r,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(100),
            }],
        );
        assert!(matches!(
            result,
            Err(AllocationError::ReceiptNotPosted { .. })
        ));
    }

    #[test]
    fn test_unapproved_receipt_rejected() {
        let mut r = receipt(dec!(1000), dec!(0));
        r.approval_status = ApprovalStatus::WaitingApproval;
        let invoice = invoice_for(&r, dec!(1000), dec!(0));

        let result = AllocationEngine::validate_batch(
            &r,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(100),
            }],
        );
        assert!(matches!(
            result,
            Err(AllocationError::ReceiptNotApproved { .. })
        ));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let r = receipt(dec!(1000), dec!(0));
        let result = AllocationEngine::validate_batch(&r, &[], &[]);
        assert!(matches!(result, Err(AllocationError::EmptyBatch)));
    }

    #[test]
    fn test_duplicate_invoice_rejected() {
        let r = receipt(dec!(1000), dec!(0));
        let invoice = invoice_for(&r, dec!(1000), dec!(0));

        let result = AllocationEngine::validate_batch(
            &r,
            &[invoice],
            &[
                AllocationRequest {
                    invoice_id: invoice.id,
                    applied_amount: dec!(100),
                },
                AllocationRequest {
                    invoice_id: invoice.id,
                    applied_amount: dec!(200),
                },
            ],
        );
        assert!(matches!(result, Err(AllocationError::DuplicateInvoice(_))));
    }

    #[test]
    fn test_customer_mismatch_rejected() {
        let r = receipt(dec!(1000), dec!(0));
        let mut invoice = invoice_for(&r, dec!(1000), dec!(0));
        invoice.customer_id = PartnerId::new();

        let result = AllocationEngine::validate_batch(
            &r,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(100),
            }],
        );
        assert!(matches!(
            result,
            Err(AllocationError::CustomerMismatch { .. })
        ));
    }

    #[test]
    fn test_draft_invoice_rejected() {
        let r = receipt(dec!(1000), dec!(0));
        let mut invoice = invoice_for(&r, dec!(1000), dec!(0));
        invoice.status = InvoiceStatus::Draft;

        let result = AllocationEngine::validate_batch(
            &r,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(100),
            }],
        );
        assert!(matches!(result, Err(AllocationError::InvoiceNotOpen { .. })));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let r = receipt(dec!(1000), dec!(0));
        let invoice = invoice_for(&r, dec!(1000), dec!(0));

        let result = AllocationEngine::validate_batch(
            &r,
            &[invoice],
            &[AllocationRequest {
                invoice_id: invoice.id,
                applied_amount: dec!(0),
            }],
        );
        assert!(matches!(
            result,
            Err(AllocationError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn test_unknown_invoice_rejected() {
        let r = receipt(dec!(1000), dec!(0));
        let invoice = invoice_for(&r, dec!(1000), dec!(0));

        let result = AllocationEngine::validate_batch(
            &r,
            &[invoice],
            &[AllocationRequest {
                invoice_id: InvoiceId::new(),
                applied_amount: dec!(100),
            }],
        );
        assert!(matches!(result, Err(AllocationError::InvoiceNotFound(_))));
    }

    #[test]
    fn test_derive_allocation_status() {
        assert_eq!(
            derive_allocation_status(dec!(1000), dec!(0)),
            AllocationStatus::Unallocated
        );
        assert_eq!(
            derive_allocation_status(dec!(1000), dec!(400)),
            AllocationStatus::PartiallyAllocated
        );
        assert_eq!(
            derive_allocation_status(dec!(1000), dec!(1000)),
            AllocationStatus::FullyAllocated
        );
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// A validated batch never allocates beyond the receipt amount.
        #[test]
        fn prop_receipt_never_over_allocated(
            amount in amount_strategy(),
            already in amount_strategy(),
            requested in amount_strategy(),
        ) {
            prop_assume!(already <= amount);
            let r = receipt(amount, already);
            let invoice = invoice_for(&r, amount + requested, Decimal::ZERO);

            let batch = [AllocationRequest { invoice_id: invoice.id, applied_amount: requested }];
            if let Ok(outcome) = AllocationEngine::validate_batch(&r, &[invoice], &batch) {
                prop_assert!(outcome.new_allocated <= r.amount);
                prop_assert!(outcome.remainder >= Decimal::ZERO);
            } else {
                // Rejected batches must actually violate the remainder rule
                prop_assert!(requested > amount - already);
            }
        }

        /// A validated batch never pushes an invoice past its total.
        #[test]
        fn prop_invoice_never_over_allocated(
            total in amount_strategy(),
            already in amount_strategy(),
            requested in amount_strategy(),
        ) {
            prop_assume!(already <= total);
            let r = receipt(total + requested, Decimal::ZERO);
            let invoice = invoice_for(&r, total, already);

            let batch = [AllocationRequest { invoice_id: invoice.id, applied_amount: requested }];
            if AllocationEngine::validate_batch(&r, &[invoice], &batch).is_ok() {
                prop_assert!(invoice.allocated + requested <= invoice.total_after_tax);
            } else {
                prop_assert!(requested > invoice.open_balance());
            }
        }

        /// The derived status always matches the amount/allocated relation.
        #[test]
        fn prop_derived_status_consistent(
            amount in amount_strategy(),
            allocated in amount_strategy(),
        ) {
            prop_assume!(allocated <= amount);
            let status = derive_allocation_status(amount, allocated);
            if allocated.is_zero() {
                prop_assert_eq!(status, AllocationStatus::Unallocated);
            } else if allocated < amount {
                prop_assert_eq!(status, AllocationStatus::PartiallyAllocated);
            } else {
                prop_assert_eq!(status, AllocationStatus::FullyAllocated);
            }
        }
    }
}
