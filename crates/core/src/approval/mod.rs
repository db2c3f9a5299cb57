//! Document approval workflow shared by sale orders, invoices, and receipts.

pub mod error;
pub mod roles;
pub mod service;
pub mod types;

pub use error::ApprovalError;
pub use roles::UserRole;
pub use service::ApprovalService;
pub use types::{ApprovalAction, ApprovalStatus, DocumentKind};
