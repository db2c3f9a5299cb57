//! Integration tests for the receipt allocation repository.
//!
//! These tests run against a migrated PostgreSQL database; they are skipped
//! when `DATABASE_URL` is not set.

use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use kontor_core::receipt::{AllocationError, AllocationRequest, PaymentMethod, ReceiptError};
use kontor_db::repositories::receipt::{CreateReceiptInput, ReceiptRepository};
use kontor_shared::types::{InvoiceId, PartnerId, ReceiptId};

async fn connect() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Database::connect(&url).await.ok()
}

#[tokio::test]
async fn test_allocate_missing_receipt_not_found() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = ReceiptRepository::new(db);
    let receipt_id = Uuid::new_v4();

    let result = repo
        .allocate(
            receipt_id,
            vec![AllocationRequest {
                invoice_id: InvoiceId::new(),
                applied_amount: dec!(100),
            }],
            Uuid::new_v4(),
        )
        .await;

    match result {
        Err(AllocationError::ReceiptNotFound(id)) => {
            assert_eq!(id, ReceiptId::from_uuid(receipt_id));
        }
        other => panic!("Expected ReceiptNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_receipt_rejects_non_positive_amount() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = ReceiptRepository::new(db);

    let result = repo
        .create_receipt(CreateReceiptInput {
            customer_id: Uuid::new_v4(),
            amount: dec!(0),
            method: PaymentMethod::BankTransfer,
            created_by: Uuid::new_v4(),
        })
        .await;

    assert!(matches!(result, Err(ReceiptError::InvalidAmount { .. })));
}

#[tokio::test]
async fn test_create_receipt_unknown_customer_rejected() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = ReceiptRepository::new(db);
    let customer_id = Uuid::new_v4();

    let result = repo
        .create_receipt(CreateReceiptInput {
            customer_id,
            amount: dec!(1000),
            method: PaymentMethod::Cash,
            created_by: Uuid::new_v4(),
        })
        .await;

    match result {
        Err(ReceiptError::CustomerNotFound(id)) => {
            assert_eq!(id, PartnerId::from_uuid(customer_id));
        }
        other => panic!("Expected CustomerNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_missing_receipt_not_found() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = ReceiptRepository::new(db);
    let result = repo.post_receipt(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result, Err(ReceiptError::NotFound(_))));
}
