//! AR receipt domain: payment records and the allocation engine.

pub mod allocation;
pub mod error;
pub mod service;
pub mod types;

pub use allocation::{AllocationEngine, derive_allocation_status};
pub use error::{AllocationError, ReceiptError};
pub use service::ReceiptService;
pub use types::{
    AllocationBatchOutcome, AllocationRequest, AllocationStatus, OpenInvoice, PaymentMethod,
    ReceiptSnapshot, ReceiptStatus,
};
