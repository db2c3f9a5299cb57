//! Double-entry ledger: posting templates and validation.

pub mod entry;
pub mod error;
pub mod posting;
pub mod validation;

pub use entry::{EntryLine, LedgerAccount, ReferenceType};
pub use error::LedgerError;
pub use posting::{EntryTemplate, PURPOSE_POSTING, invoice_posting, receipt_posting};
pub use validation::validate_lines;
