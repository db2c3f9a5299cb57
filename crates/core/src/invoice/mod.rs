//! AR invoice domain: construction from approved orders and posting status.

pub mod error;
pub mod service;
pub mod types;

pub use error::InvoiceError;
pub use service::{InvoiceService, OrderSnapshot};
pub use types::{InvoiceDraft, InvoiceStatus};
