//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Approval workflow status shared by all approvable documents.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Document is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Document awaits an approver.
    #[sea_orm(string_value = "waiting_approval")]
    WaitingApproval,
    /// Document has been signed off.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Document was rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Operational status of a sale order.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Order confirmed for fulfilment and invoicing.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Goods shipped.
    #[sea_orm(string_value = "shipped")]
    Shipped,
    /// Order completed.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Order cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Operational status of an AR invoice.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Invoice is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Invoice posted to the ledger.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Invoice fully paid by allocations.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Invoice cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Operational status of an AR receipt.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "receipt_status")]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Receipt is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Receipt posted; amount allocatable.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Receipt cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Allocation progress of an AR receipt.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "allocation_status")]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Nothing allocated yet.
    #[sea_orm(string_value = "unallocated")]
    Unallocated,
    /// Part of the amount allocated.
    #[sea_orm(string_value = "partially_allocated")]
    PartiallyAllocated,
    /// The whole amount allocated.
    #[sea_orm(string_value = "fully_allocated")]
    FullyAllocated,
}

/// Payment method recorded on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer.
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    /// Card payment.
    #[sea_orm(string_value = "card")]
    Card,
    /// Cheque payment.
    #[sea_orm(string_value = "cheque")]
    Cheque,
}

/// User role code.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Creates and submits sale orders.
    #[sea_orm(string_value = "sales")]
    Sales,
    /// Approves sale orders.
    #[sea_orm(string_value = "salesmanager")]
    SalesManager,
    /// Creates invoices and receipts.
    #[sea_orm(string_value = "account")]
    Account,
    /// Chief accountant; approves invoices and receipts.
    #[sea_orm(string_value = "chacc")]
    Chacc,
    /// Approves sale orders alongside sales managers.
    #[sea_orm(string_value = "ceo")]
    Ceo,
}

/// Document type a GL entry references.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "gl_reference_type")]
#[serde(rename_all = "snake_case")]
pub enum GlReferenceType {
    /// Entry produced by an AR invoice posting.
    #[sea_orm(string_value = "ar_invoice")]
    ArInvoice,
    /// Entry produced by an AR receipt posting.
    #[sea_orm(string_value = "ar_receipt")]
    ArReceipt,
}

/// Ledger account a GL entry line posts to.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ledger_account")]
#[serde(rename_all = "snake_case")]
pub enum LedgerAccount {
    /// Money owed by customers.
    #[sea_orm(string_value = "accounts_receivable")]
    AccountsReceivable,
    /// Billed sales.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Collected tax.
    #[sea_orm(string_value = "tax_payable")]
    TaxPayable,
    /// Received money.
    #[sea_orm(string_value = "cash")]
    Cash,
}
