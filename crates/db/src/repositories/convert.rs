//! Conversions between core domain enums and database enums.
//!
//! The core crate keeps its own pure enums so business logic never depends
//! on `SeaORM`; repositories translate at the boundary.

use kontor_core::approval::{ApprovalStatus, UserRole};
use kontor_core::invoice::InvoiceStatus;
use kontor_core::ledger::{LedgerAccount, ReferenceType};
use kontor_core::order::OrderStatus;
use kontor_core::receipt::{AllocationStatus, PaymentMethod, ReceiptStatus};

use crate::entities::sea_orm_active_enums as db;

/// Converts a database approval status to the core enum.
#[must_use]
pub fn approval_to_core(status: &db::ApprovalStatus) -> ApprovalStatus {
    match status {
        db::ApprovalStatus::Draft => ApprovalStatus::Draft,
        db::ApprovalStatus::WaitingApproval => ApprovalStatus::WaitingApproval,
        db::ApprovalStatus::Approved => ApprovalStatus::Approved,
        db::ApprovalStatus::Rejected => ApprovalStatus::Rejected,
    }
}

/// Converts a core approval status to the database enum.
#[must_use]
pub fn approval_to_db(status: ApprovalStatus) -> db::ApprovalStatus {
    match status {
        ApprovalStatus::Draft => db::ApprovalStatus::Draft,
        ApprovalStatus::WaitingApproval => db::ApprovalStatus::WaitingApproval,
        ApprovalStatus::Approved => db::ApprovalStatus::Approved,
        ApprovalStatus::Rejected => db::ApprovalStatus::Rejected,
    }
}

/// Converts a database order status to the core enum.
#[must_use]
pub fn order_status_to_core(status: &db::OrderStatus) -> OrderStatus {
    match status {
        db::OrderStatus::Draft => OrderStatus::Draft,
        db::OrderStatus::Confirmed => OrderStatus::Confirmed,
        db::OrderStatus::Shipped => OrderStatus::Shipped,
        db::OrderStatus::Completed => OrderStatus::Completed,
        db::OrderStatus::Cancelled => OrderStatus::Cancelled,
    }
}

/// Converts a core order status to the database enum.
#[must_use]
pub fn order_status_to_db(status: OrderStatus) -> db::OrderStatus {
    match status {
        OrderStatus::Draft => db::OrderStatus::Draft,
        OrderStatus::Confirmed => db::OrderStatus::Confirmed,
        OrderStatus::Shipped => db::OrderStatus::Shipped,
        OrderStatus::Completed => db::OrderStatus::Completed,
        OrderStatus::Cancelled => db::OrderStatus::Cancelled,
    }
}

/// Converts a database invoice status to the core enum.
#[must_use]
pub fn invoice_status_to_core(status: &db::InvoiceStatus) -> InvoiceStatus {
    match status {
        db::InvoiceStatus::Draft => InvoiceStatus::Draft,
        db::InvoiceStatus::Posted => InvoiceStatus::Posted,
        db::InvoiceStatus::Paid => InvoiceStatus::Paid,
        db::InvoiceStatus::Cancelled => InvoiceStatus::Cancelled,
    }
}

/// Converts a core invoice status to the database enum.
#[must_use]
pub fn invoice_status_to_db(status: InvoiceStatus) -> db::InvoiceStatus {
    match status {
        InvoiceStatus::Draft => db::InvoiceStatus::Draft,
        InvoiceStatus::Posted => db::InvoiceStatus::Posted,
        InvoiceStatus::Paid => db::InvoiceStatus::Paid,
        InvoiceStatus::Cancelled => db::InvoiceStatus::Cancelled,
    }
}

/// Converts a database receipt status to the core enum.
#[must_use]
pub fn receipt_status_to_core(status: &db::ReceiptStatus) -> ReceiptStatus {
    match status {
        db::ReceiptStatus::Draft => ReceiptStatus::Draft,
        db::ReceiptStatus::Posted => ReceiptStatus::Posted,
        db::ReceiptStatus::Cancelled => ReceiptStatus::Cancelled,
    }
}

/// Converts a core receipt status to the database enum.
#[must_use]
pub fn receipt_status_to_db(status: ReceiptStatus) -> db::ReceiptStatus {
    match status {
        ReceiptStatus::Draft => db::ReceiptStatus::Draft,
        ReceiptStatus::Posted => db::ReceiptStatus::Posted,
        ReceiptStatus::Cancelled => db::ReceiptStatus::Cancelled,
    }
}

/// Converts a core allocation status to the database enum.
#[must_use]
pub fn allocation_status_to_db(status: AllocationStatus) -> db::AllocationStatus {
    match status {
        AllocationStatus::Unallocated => db::AllocationStatus::Unallocated,
        AllocationStatus::PartiallyAllocated => db::AllocationStatus::PartiallyAllocated,
        AllocationStatus::FullyAllocated => db::AllocationStatus::FullyAllocated,
    }
}

/// Converts a database allocation status to the core enum.
#[must_use]
pub fn allocation_status_to_core(status: &db::AllocationStatus) -> AllocationStatus {
    match status {
        db::AllocationStatus::Unallocated => AllocationStatus::Unallocated,
        db::AllocationStatus::PartiallyAllocated => AllocationStatus::PartiallyAllocated,
        db::AllocationStatus::FullyAllocated => AllocationStatus::FullyAllocated,
    }
}

/// Converts a core payment method to the database enum.
#[must_use]
pub fn payment_method_to_db(method: PaymentMethod) -> db::PaymentMethod {
    match method {
        PaymentMethod::Cash => db::PaymentMethod::Cash,
        PaymentMethod::BankTransfer => db::PaymentMethod::BankTransfer,
        PaymentMethod::Card => db::PaymentMethod::Card,
        PaymentMethod::Cheque => db::PaymentMethod::Cheque,
    }
}

/// Converts a database payment method to the core enum.
#[must_use]
pub fn payment_method_to_core(method: &db::PaymentMethod) -> PaymentMethod {
    match method {
        db::PaymentMethod::Cash => PaymentMethod::Cash,
        db::PaymentMethod::BankTransfer => PaymentMethod::BankTransfer,
        db::PaymentMethod::Card => PaymentMethod::Card,
        db::PaymentMethod::Cheque => PaymentMethod::Cheque,
    }
}

/// Converts a database user role to the core enum.
#[must_use]
pub fn user_role_to_core(role: &db::UserRole) -> UserRole {
    match role {
        db::UserRole::Sales => UserRole::Sales,
        db::UserRole::SalesManager => UserRole::SalesManager,
        db::UserRole::Account => UserRole::Account,
        db::UserRole::Chacc => UserRole::ChiefAccountant,
        db::UserRole::Ceo => UserRole::Ceo,
    }
}

/// Converts a core ledger account to the database enum.
#[must_use]
pub fn ledger_account_to_db(account: LedgerAccount) -> db::LedgerAccount {
    match account {
        LedgerAccount::AccountsReceivable => db::LedgerAccount::AccountsReceivable,
        LedgerAccount::Revenue => db::LedgerAccount::Revenue,
        LedgerAccount::TaxPayable => db::LedgerAccount::TaxPayable,
        LedgerAccount::Cash => db::LedgerAccount::Cash,
    }
}

/// Converts a core reference type to the database enum.
#[must_use]
pub fn reference_type_to_db(reference_type: ReferenceType) -> db::GlReferenceType {
    match reference_type {
        ReferenceType::ArInvoice => db::GlReferenceType::ArInvoice,
        ReferenceType::ArReceipt => db::GlReferenceType::ArReceipt,
    }
}

/// Converts a database reference type to the core enum.
#[must_use]
pub fn reference_type_to_core(reference_type: &db::GlReferenceType) -> ReferenceType {
    match reference_type {
        db::GlReferenceType::ArInvoice => ReferenceType::ArInvoice,
        db::GlReferenceType::ArReceipt => ReferenceType::ArReceipt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_roundtrip() {
        for status in [
            ApprovalStatus::Draft,
            ApprovalStatus::WaitingApproval,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
        ] {
            assert_eq!(approval_to_core(&approval_to_db(status)), status);
        }
    }

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Draft,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(order_status_to_core(&order_status_to_db(status)), status);
        }
    }

    #[test]
    fn test_invoice_status_roundtrip() {
        for status in [
            InvoiceStatus::Draft,
            InvoiceStatus::Posted,
            InvoiceStatus::Paid,
            InvoiceStatus::Cancelled,
        ] {
            assert_eq!(
                invoice_status_to_core(&invoice_status_to_db(status)),
                status
            );
        }
    }

    #[test]
    fn test_receipt_status_roundtrip() {
        for status in [
            ReceiptStatus::Draft,
            ReceiptStatus::Posted,
            ReceiptStatus::Cancelled,
        ] {
            assert_eq!(
                receipt_status_to_core(&receipt_status_to_db(status)),
                status
            );
        }
    }

    #[test]
    fn test_allocation_status_roundtrip() {
        for status in [
            AllocationStatus::Unallocated,
            AllocationStatus::PartiallyAllocated,
            AllocationStatus::FullyAllocated,
        ] {
            assert_eq!(
                allocation_status_to_core(&allocation_status_to_db(status)),
                status
            );
        }
    }

    #[test]
    fn test_chacc_maps_to_chief_accountant() {
        assert_eq!(
            user_role_to_core(&db::UserRole::Chacc),
            UserRole::ChiefAccountant
        );
    }
}
