//! Ledger entry line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The accounts touched by the order-to-cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerAccount {
    /// Asset account for money owed by customers.
    AccountsReceivable,
    /// Revenue account for billed sales.
    Revenue,
    /// Liability account for collected tax.
    TaxPayable,
    /// Asset account for received money.
    Cash,
}

impl LedgerAccount {
    /// Returns the account code used in the ledger schema.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountsReceivable => "1200",
            Self::Revenue => "4000",
            Self::TaxPayable => "2300",
            Self::Cash => "1000",
        }
    }

    /// Returns the string representation of the account.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountsReceivable => "accounts_receivable",
            Self::Revenue => "revenue",
            Self::TaxPayable => "tax_payable",
            Self::Cash => "cash",
        }
    }

    /// Parses an account from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "accounts_receivable" => Some(Self::AccountsReceivable),
            "revenue" => Some(Self::Revenue),
            "tax_payable" => Some(Self::TaxPayable),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for LedgerAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The document type a ledger entry references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// Entry produced by posting an AR invoice.
    ArInvoice,
    /// Entry produced by posting an AR receipt.
    ArReceipt,
}

impl ReferenceType {
    /// Returns the string representation of the reference type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArInvoice => "ar_invoice",
            Self::ArReceipt => "ar_receipt",
        }
    }

    /// Parses a reference type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ar_invoice" => Some(Self::ArInvoice),
            "ar_receipt" => Some(Self::ArReceipt),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of a ledger entry.
///
/// Exactly one of `debit`/`credit` is positive; the other is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLine {
    /// The account the line posts to.
    pub account: LedgerAccount,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

impl EntryLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account: LedgerAccount, amount: Decimal) -> Self {
        Self {
            account,
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account: LedgerAccount, amount: Decimal) -> Self {
        Self {
            account,
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_roundtrip() {
        for account in [
            LedgerAccount::AccountsReceivable,
            LedgerAccount::Revenue,
            LedgerAccount::TaxPayable,
            LedgerAccount::Cash,
        ] {
            assert_eq!(LedgerAccount::parse(account.as_str()), Some(account));
        }
    }

    #[test]
    fn test_account_codes_unique() {
        let codes = [
            LedgerAccount::AccountsReceivable.code(),
            LedgerAccount::Revenue.code(),
            LedgerAccount::TaxPayable.code(),
            LedgerAccount::Cash.code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_reference_type_roundtrip() {
        for rt in [ReferenceType::ArInvoice, ReferenceType::ArReceipt] {
            assert_eq!(ReferenceType::parse(rt.as_str()), Some(rt));
        }
    }

    #[test]
    fn test_line_constructors() {
        let d = EntryLine::debit(LedgerAccount::Cash, dec!(100));
        assert_eq!(d.debit, dec!(100));
        assert_eq!(d.credit, dec!(0));

        let c = EntryLine::credit(LedgerAccount::Revenue, dec!(100));
        assert_eq!(c.debit, dec!(0));
        assert_eq!(c.credit, dec!(100));
    }
}
