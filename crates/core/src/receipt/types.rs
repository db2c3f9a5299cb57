//! AR receipt domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use kontor_shared::types::{InvoiceId, PartnerId, ReceiptId};

use crate::approval::types::ApprovalStatus;
use crate::invoice::types::InvoiceStatus;

/// Operational status of an AR receipt.
///
/// The valid transitions are:
/// - Draft → Posted (post, requires approval)
/// - Draft → Cancelled (cancel, only while nothing is allocated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// Receipt is being drafted.
    Draft,
    /// Receipt has been posted; its amount can be allocated to invoices.
    Posted,
    /// Receipt cancelled before posting.
    Cancelled,
}

impl ReceiptStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "posted" => Some(Self::Posted),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How far a receipt's amount has been distributed across invoices.
///
/// Always derived from `sum(allocations)` vs `amount` through
/// [`crate::receipt::allocation::derive_allocation_status`]; never set by
/// hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Nothing allocated yet.
    Unallocated,
    /// Part of the amount is allocated.
    PartiallyAllocated,
    /// The whole amount is allocated.
    FullyAllocated,
}

impl AllocationStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unallocated => "unallocated",
            Self::PartiallyAllocated => "partially_allocated",
            Self::FullyAllocated => "fully_allocated",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unallocated" => Some(Self::Unallocated),
            "partially_allocated" => Some(Self::PartiallyAllocated),
            "fully_allocated" => Some(Self::FullyAllocated),
            _ => None,
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method recorded on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Card payment.
    Card,
    /// Cheque payment.
    Cheque,
}

impl PaymentMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Card => "card",
            Self::Cheque => "cheque",
        }
    }

    /// Parses a method from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "bank_transfer" => Some(Self::BankTransfer),
            "card" => Some(Self::Card),
            "cheque" => Some(Self::Cheque),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One requested allocation: apply part of a receipt to one invoice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// The invoice to apply money to.
    pub invoice_id: InvoiceId,
    /// The amount to apply.
    pub applied_amount: Decimal,
}

/// The slice of a receipt the allocation engine validates against.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptSnapshot {
    /// The receipt ID.
    pub id: ReceiptId,
    /// The paying customer.
    pub customer_id: PartnerId,
    /// The receipt amount.
    pub amount: Decimal,
    /// The receipt's operational status.
    pub status: ReceiptStatus,
    /// The receipt's approval status.
    pub approval_status: ApprovalStatus,
    /// Sum of already-persisted allocations for this receipt.
    pub allocated: Decimal,
}

/// The slice of an invoice the allocation engine validates against.
#[derive(Debug, Clone, Copy)]
pub struct OpenInvoice {
    /// The invoice ID.
    pub id: InvoiceId,
    /// The billed customer.
    pub customer_id: PartnerId,
    /// The invoice total including tax.
    pub total_after_tax: Decimal,
    /// Sum of already-persisted allocations against this invoice.
    pub allocated: Decimal,
    /// The invoice's operational status.
    pub status: InvoiceStatus,
}

impl OpenInvoice {
    /// The unpaid balance still open for allocation.
    #[must_use]
    pub fn open_balance(&self) -> Decimal {
        self.total_after_tax - self.allocated
    }
}

/// Result of a validated allocation batch, ready to persist.
#[derive(Debug, Clone)]
pub struct AllocationBatchOutcome {
    /// Total allocated to the receipt after the batch.
    pub new_allocated: Decimal,
    /// The receipt's allocation status after the batch.
    pub allocation_status: AllocationStatus,
    /// Receipt amount still unallocated after the batch.
    pub remainder: Decimal,
    /// Invoices whose open balance reaches zero with this batch.
    pub paid_invoices: Vec<InvoiceId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_receipt_status_roundtrip() {
        for status in [
            ReceiptStatus::Draft,
            ReceiptStatus::Posted,
            ReceiptStatus::Cancelled,
        ] {
            assert_eq!(ReceiptStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_allocation_status_roundtrip() {
        for status in [
            AllocationStatus::Unallocated,
            AllocationStatus::PartiallyAllocated,
            AllocationStatus::FullyAllocated,
        ] {
            assert_eq!(AllocationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AllocationStatus::parse("allocated"), None);
    }

    #[test]
    fn test_payment_method_roundtrip() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::BankTransfer,
            PaymentMethod::Card,
            PaymentMethod::Cheque,
        ] {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
    }

    #[test]
    fn test_open_balance() {
        let invoice = OpenInvoice {
            id: InvoiceId::new(),
            customer_id: PartnerId::new(),
            total_after_tax: dec!(2200),
            allocated: dec!(1000),
            status: InvoiceStatus::Posted,
        };
        assert_eq!(invoice.open_balance(), dec!(1200));
    }
}
