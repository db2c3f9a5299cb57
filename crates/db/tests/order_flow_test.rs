//! Integration tests for the order workflow repositories.
//!
//! These tests run against a migrated PostgreSQL database; they are skipped
//! when `DATABASE_URL` is not set.

use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use kontor_core::approval::{ApprovalError, UserRole};
use kontor_core::invoice::InvoiceError;
use kontor_core::order::OrderError;
use kontor_db::repositories::invoice::InvoiceRepository;
use kontor_db::repositories::order::OrderRepository;
use kontor_shared::types::{OrderId, PartnerId};

async fn connect() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Database::connect(&url).await.ok()
}

#[tokio::test]
async fn test_submit_missing_order_not_found() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = OrderRepository::new(db);
    let order_id = Uuid::new_v4();

    let result = repo
        .submit_order(order_id, UserRole::Sales, Uuid::new_v4())
        .await;

    match result {
        Err(ApprovalError::DocumentNotFound { id, .. }) => assert_eq!(id, order_id),
        other => panic!("Expected DocumentNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_approve_missing_order_not_found() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = OrderRepository::new(db);
    let result = repo
        .approve_order(Uuid::new_v4(), UserRole::SalesManager, Uuid::new_v4())
        .await;

    assert!(matches!(
        result,
        Err(ApprovalError::DocumentNotFound { .. })
    ));
}

#[tokio::test]
async fn test_confirm_missing_order_not_found() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = OrderRepository::new(db);
    let result = repo.confirm_order(Uuid::new_v4()).await;

    assert!(matches!(result, Err(OrderError::NotFound(_))));
}

#[tokio::test]
async fn test_create_order_unknown_customer_rejected() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = OrderRepository::new(db);
    let customer_id = Uuid::new_v4();

    let result = repo
        .create_order(kontor_db::repositories::order::CreateOrderInput {
            customer_id,
            lines: vec![],
            created_by: Uuid::new_v4(),
        })
        .await;

    match result {
        Err(OrderError::CustomerNotFound(id)) => {
            assert_eq!(id, PartnerId::from_uuid(customer_id));
        }
        other => panic!("Expected CustomerNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invoice_missing_order_not_found() {
    let Some(db) = connect().await else {
        return;
    };

    let repo = InvoiceRepository::new(db);
    let order_id = Uuid::new_v4();

    let result = repo.create_from_order(order_id, Uuid::new_v4()).await;

    match result {
        Err(InvoiceError::OrderNotFound(id)) => assert_eq!(id, OrderId::from_uuid(order_id)),
        other => panic!("Expected OrderNotFound, got {other:?}"),
    }
}
