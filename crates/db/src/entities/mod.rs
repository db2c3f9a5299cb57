//! `SeaORM` entity definitions for the order-to-cash schema.

pub mod ar_invoice_lines;
pub mod ar_invoices;
pub mod ar_receipt_allocations;
pub mod ar_receipts;
pub mod gl_entries;
pub mod gl_entry_lines;
pub mod partners;
pub mod products;
pub mod sale_order_lines;
pub mod sale_orders;
pub mod sea_orm_active_enums;
pub mod tax_rates;
pub mod users;
