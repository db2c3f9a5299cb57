//! AR invoice domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

use kontor_shared::types::{OrderId, PartnerId};

use crate::order::types::{DocumentTotals, PricedLine};

/// Operational status of an AR invoice.
///
/// The valid transitions are:
/// - Draft → Posted (post, requires approval)
/// - Posted → Paid (derived when allocations cover the total)
/// - Draft → Cancelled (cancel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice is being drafted.
    Draft,
    /// Invoice has been posted to the ledger and is collectible.
    Posted,
    /// Invoice fully covered by receipt allocations.
    Paid,
    /// Invoice cancelled before posting.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "posted" => Some(Self::Posted),
            "paid" => Some(Self::Paid),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the invoice can accept receipt allocations.
    #[must_use]
    pub fn is_open_for_allocation(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated invoice ready to be persisted, built from an order.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    /// The order this invoice bills.
    pub order_id: OrderId,
    /// The customer billed.
    pub customer_id: PartnerId,
    /// Lines copied verbatim from the order.
    pub lines: Vec<PricedLine>,
    /// Totals recomputed from the copied lines.
    pub totals: DocumentTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status_roundtrip() {
        for status in [
            InvoiceStatus::Draft,
            InvoiceStatus::Posted,
            InvoiceStatus::Paid,
            InvoiceStatus::Cancelled,
        ] {
            assert_eq!(InvoiceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(InvoiceStatus::parse("void"), None);
    }

    #[test]
    fn test_only_posted_is_open_for_allocation() {
        assert!(InvoiceStatus::Posted.is_open_for_allocation());
        assert!(!InvoiceStatus::Draft.is_open_for_allocation());
        assert!(!InvoiceStatus::Paid.is_open_for_allocation());
        assert!(!InvoiceStatus::Cancelled.is_open_for_allocation());
    }
}
