//! Error types for ledger operations.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while building or validating ledger entries.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Entry lines do not balance.
    #[error("Entry is unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Entry has no lines.
    #[error("Entry must have at least one line")]
    NoLines,

    /// Entry has only one side (all debits or all credits).
    #[error("Entry must have both debit and credit lines")]
    SingleSided,

    /// A line has both sides set, or a zero/negative amount.
    #[error("Entry line must carry exactly one positive side")]
    InvalidLine,

    /// An entry already exists for the document and purpose.
    #[error("Ledger entry already exists for {reference_type} {reference_id} ({purpose})")]
    DuplicatePosting {
        /// The reference type.
        reference_type: String,
        /// The referenced document.
        reference_id: Uuid,
        /// The posting purpose.
        purpose: String,
    },

    /// Entry not found.
    #[error("Ledger entry {0} not found")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // An unbalanced entry reaching the posting path is an internal
            // integrity failure, not caller input.
            Self::Unbalanced { .. } | Self::NoLines | Self::SingleSided | Self::InvalidLine => 500,
            Self::DuplicatePosting { .. } => 409,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unbalanced { .. } => "ENTRY_UNBALANCED",
            Self::NoLines => "ENTRY_NO_LINES",
            Self::SingleSided => "ENTRY_SINGLE_SIDED",
            Self::InvalidLine => "ENTRY_INVALID_LINE",
            Self::DuplicatePosting { .. } => "DUPLICATE_POSTING",
            Self::NotFound(_) => "ENTRY_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unbalanced_is_integrity_error() {
        let err = LedgerError::Unbalanced {
            debits: dec!(1100),
            credits: dec!(1000),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "ENTRY_UNBALANCED");
        assert!(err.to_string().contains("1100"));
    }

    #[test]
    fn test_duplicate_posting_is_conflict() {
        let err = LedgerError::DuplicatePosting {
            reference_type: "ar_invoice".to_string(),
            reference_id: Uuid::nil(),
            purpose: "posting".to_string(),
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "DUPLICATE_POSTING");
    }
}
