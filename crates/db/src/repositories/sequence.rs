//! Server-side document number generation.
//!
//! Numbers come from PostgreSQL sequences created by the initial migration,
//! so two concurrent creations can never mint the same number.

use sea_orm::{ConnectionTrait, DbErr, Statement};

/// Sequence backing sale order numbers.
pub const SALE_ORDER_NO_SEQ: &str = "sale_order_no_seq";
/// Sequence backing invoice numbers.
pub const AR_INVOICE_NO_SEQ: &str = "ar_invoice_no_seq";
/// Sequence backing receipt numbers.
pub const AR_RECEIPT_NO_SEQ: &str = "ar_receipt_no_seq";
/// Sequence backing GL entry numbers.
pub const GL_ENTRY_NO_SEQ: &str = "gl_entry_no_seq";

/// Draws the next number from a sequence and formats it with the document
/// prefix, e.g. `SO-000042`.
///
/// # Errors
///
/// Returns an error if the sequence query fails.
pub async fn next_document_number<C: ConnectionTrait>(
    conn: &C,
    sequence: &str,
    prefix: &str,
) -> Result<String, DbErr> {
    let stmt = Statement::from_string(
        conn.get_database_backend(),
        format!("SELECT nextval('{sequence}') AS seq"),
    );
    let row = conn
        .query_one(stmt)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("sequence {sequence} returned no row")))?;
    let seq: i64 = row.try_get("", "seq")?;

    Ok(format_document_number(prefix, seq))
}

/// Formats a document number from a prefix and sequence value.
#[must_use]
pub fn format_document_number(prefix: &str, seq: i64) -> String {
    format!("{prefix}-{seq:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_document_number() {
        assert_eq!(format_document_number("SO", 1), "SO-000001");
        assert_eq!(format_document_number("INV", 42), "INV-000042");
        assert_eq!(format_document_number("RC", 999_999), "RC-999999");
        // Wide values keep their digits
        assert_eq!(format_document_number("GL", 1_234_567), "GL-1234567");
    }
}
