//! Repository abstractions for data access.

pub mod convert;
pub mod invoice;
pub mod ledger;
pub mod order;
pub mod partner;
pub mod product;
pub mod receipt;
pub mod sequence;

pub use invoice::InvoiceRepository;
pub use ledger::LedgerRepository;
pub use order::OrderRepository;
pub use partner::PartnerRepository;
pub use product::{ProductRepository, TaxRateRepository};
pub use receipt::ReceiptRepository;
