//! Role gates for document creation and approval.
//!
//! Unlike a strict privilege ladder, approval rights here are routed per
//! document kind: sales management signs off orders, the chief accountant
//! signs off invoices and receipts, and the CEO can approve anywhere a
//! sales manager can.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::approval::types::DocumentKind;

/// User role in the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Creates and submits sale orders.
    Sales,
    /// Approves sale orders.
    SalesManager,
    /// Creates invoices and receipts.
    Account,
    /// Chief accountant; approves invoices and receipts.
    #[serde(rename = "chacc")]
    ChiefAccountant,
    /// Approves sale orders alongside sales managers.
    Ceo,
}

impl UserRole {
    /// Parse a role from its code.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sales" => Some(Self::Sales),
            "salesmanager" => Some(Self::SalesManager),
            "account" => Some(Self::Account),
            "chacc" => Some(Self::ChiefAccountant),
            "ceo" => Some(Self::Ceo),
            _ => None,
        }
    }

    /// Returns the role code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::SalesManager => "salesmanager",
            Self::Account => "account",
            Self::ChiefAccountant => "chacc",
            Self::Ceo => "ceo",
        }
    }

    /// Returns true if this role may create and submit documents of the kind.
    #[must_use]
    pub fn can_submit(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::SaleOrder => {
                matches!(self, Self::Sales | Self::SalesManager | Self::Ceo)
            }
            DocumentKind::ArInvoice | DocumentKind::ArReceipt => {
                matches!(self, Self::Account | Self::ChiefAccountant)
            }
        }
    }

    /// Returns true if this role is a designated approver for the kind.
    #[must_use]
    pub fn can_approve(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::SaleOrder => matches!(self, Self::SalesManager | Self::Ceo),
            DocumentKind::ArInvoice | DocumentKind::ArReceipt => {
                matches!(self, Self::ChiefAccountant)
            }
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("sales"), Some(UserRole::Sales));
        assert_eq!(UserRole::parse("SALESMANAGER"), Some(UserRole::SalesManager));
        assert_eq!(UserRole::parse("account"), Some(UserRole::Account));
        assert_eq!(UserRole::parse("chacc"), Some(UserRole::ChiefAccountant));
        assert_eq!(UserRole::parse("Ceo"), Some(UserRole::Ceo));
        assert_eq!(UserRole::parse("warehouse"), None);
    }

    #[test]
    fn test_role_as_str_roundtrip() {
        for role in [
            UserRole::Sales,
            UserRole::SalesManager,
            UserRole::Account,
            UserRole::ChiefAccountant,
            UserRole::Ceo,
        ] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[rstest]
    #[case(UserRole::SalesManager, DocumentKind::SaleOrder, true)]
    #[case(UserRole::Ceo, DocumentKind::SaleOrder, true)]
    #[case(UserRole::Sales, DocumentKind::SaleOrder, false)]
    #[case(UserRole::ChiefAccountant, DocumentKind::SaleOrder, false)]
    #[case(UserRole::ChiefAccountant, DocumentKind::ArInvoice, true)]
    #[case(UserRole::ChiefAccountant, DocumentKind::ArReceipt, true)]
    #[case(UserRole::Account, DocumentKind::ArInvoice, false)]
    #[case(UserRole::Ceo, DocumentKind::ArInvoice, false)]
    fn test_can_approve(
        #[case] role: UserRole,
        #[case] kind: DocumentKind,
        #[case] expected: bool,
    ) {
        assert_eq!(role.can_approve(kind), expected);
    }

    #[rstest]
    #[case(UserRole::Sales, DocumentKind::SaleOrder, true)]
    #[case(UserRole::Account, DocumentKind::ArInvoice, true)]
    #[case(UserRole::Account, DocumentKind::ArReceipt, true)]
    #[case(UserRole::Sales, DocumentKind::ArInvoice, false)]
    #[case(UserRole::Account, DocumentKind::SaleOrder, false)]
    fn test_can_submit(
        #[case] role: UserRole,
        #[case] kind: DocumentKind,
        #[case] expected: bool,
    ) {
        assert_eq!(role.can_submit(kind), expected);
    }
}
