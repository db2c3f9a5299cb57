//! Posting templates for documents with a GL impact.
//!
//! Each template carries the lines plus the reference triple
//! (reference_type, reference_id, purpose) that ties the entry back to its
//! document. The triple is unique in the schema, so a retried posting
//! cannot produce a second entry.

use rust_decimal::Decimal;
use uuid::Uuid;

use kontor_shared::types::{InvoiceId, ReceiptId};

use crate::ledger::entry::{EntryLine, LedgerAccount, ReferenceType};
use crate::ledger::error::LedgerError;
use crate::ledger::validation::validate_lines;
use crate::order::types::DocumentTotals;

/// Posting purpose recorded alongside the document reference.
pub const PURPOSE_POSTING: &str = "posting";

/// A validated ledger entry ready to persist.
#[derive(Debug, Clone)]
pub struct EntryTemplate {
    /// The document type producing this entry.
    pub reference_type: ReferenceType,
    /// The document producing this entry.
    pub reference_id: Uuid,
    /// The purpose of the posting, unique per document.
    pub purpose: &'static str,
    /// Human-readable description.
    pub description: String,
    /// The balanced entry lines.
    pub lines: Vec<EntryLine>,
}

/// Builds the entry for a posted invoice:
/// debit AR for the gross total, credit Revenue for the net total, credit
/// Tax Payable for the tax portion (omitted when the document carries no
/// tax).
///
/// # Errors
///
/// Returns an error if the resulting lines do not balance, which indicates
/// corrupted document totals.
pub fn invoice_posting(
    invoice_id: InvoiceId,
    invoice_no: &str,
    totals: &DocumentTotals,
) -> Result<EntryTemplate, LedgerError> {
    let mut lines = vec![
        EntryLine::debit(LedgerAccount::AccountsReceivable, totals.total_after_tax),
        EntryLine::credit(LedgerAccount::Revenue, totals.total_before_tax),
    ];
    if totals.total_tax > Decimal::ZERO {
        lines.push(EntryLine::credit(LedgerAccount::TaxPayable, totals.total_tax));
    }

    validate_lines(&lines)?;

    Ok(EntryTemplate {
        reference_type: ReferenceType::ArInvoice,
        reference_id: invoice_id.into_inner(),
        purpose: PURPOSE_POSTING,
        description: format!("Invoice {invoice_no} posted"),
        lines,
    })
}

/// Builds the entry for a posted receipt: debit Cash, credit AR.
///
/// # Errors
///
/// Returns an error if the amount is not positive.
pub fn receipt_posting(
    receipt_id: ReceiptId,
    receipt_no: &str,
    amount: Decimal,
) -> Result<EntryTemplate, LedgerError> {
    let lines = vec![
        EntryLine::debit(LedgerAccount::Cash, amount),
        EntryLine::credit(LedgerAccount::AccountsReceivable, amount),
    ];

    validate_lines(&lines)?;

    Ok(EntryTemplate {
        reference_type: ReferenceType::ArReceipt,
        reference_id: receipt_id.into_inner(),
        purpose: PURPOSE_POSTING,
        description: format!("Receipt {receipt_no} posted"),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invoice_posting_balances() {
        // debit 1100 AR = credit 1000 Revenue + credit 100 Tax Payable
        let totals = DocumentTotals {
            total_before_tax: dec!(1000),
            total_tax: dec!(100),
            total_after_tax: dec!(1100),
        };
        let template = invoice_posting(InvoiceId::new(), "INV-000001", &totals).unwrap();

        assert_eq!(template.lines.len(), 3);
        assert_eq!(template.reference_type, ReferenceType::ArInvoice);
        let debits: Decimal = template.lines.iter().map(|l| l.debit).sum();
        let credits: Decimal = template.lines.iter().map(|l| l.credit).sum();
        assert_eq!(debits, credits);
        assert_eq!(debits, dec!(1100));
    }

    #[test]
    fn test_invoice_posting_without_tax_omits_tax_line() {
        let totals = DocumentTotals {
            total_before_tax: dec!(500),
            total_tax: dec!(0),
            total_after_tax: dec!(500),
        };
        let template = invoice_posting(InvoiceId::new(), "INV-000002", &totals).unwrap();
        assert_eq!(template.lines.len(), 2);
        assert!(
            !template
                .lines
                .iter()
                .any(|l| l.account == LedgerAccount::TaxPayable)
        );
    }

    #[test]
    fn test_invoice_posting_corrupt_totals_rejected() {
        // after-tax total does not cover net + tax
        let totals = DocumentTotals {
            total_before_tax: dec!(1000),
            total_tax: dec!(100),
            total_after_tax: dec!(1050),
        };
        let result = invoice_posting(InvoiceId::new(), "INV-000003", &totals);
        assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
    }

    #[test]
    fn test_receipt_posting_balances() {
        let template = receipt_posting(ReceiptId::new(), "RC-000001", dec!(1100)).unwrap();
        assert_eq!(template.lines.len(), 2);
        assert_eq!(template.reference_type, ReferenceType::ArReceipt);
        assert_eq!(template.lines[0].debit, dec!(1100));
        assert_eq!(template.lines[1].credit, dec!(1100));
    }

    #[test]
    fn test_receipt_posting_zero_amount_rejected() {
        let result = receipt_posting(ReceiptId::new(), "RC-000002", dec!(0));
        assert!(matches!(result, Err(LedgerError::InvalidLine)));
    }

    #[test]
    fn test_description_carries_document_number() {
        let totals = DocumentTotals {
            total_before_tax: dec!(100),
            total_tax: dec!(10),
            total_after_tax: dec!(110),
        };
        let template = invoice_posting(InvoiceId::new(), "INV-000042", &totals).unwrap();
        assert!(template.description.contains("INV-000042"));
    }
}
