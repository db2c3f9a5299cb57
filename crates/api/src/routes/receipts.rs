//! AR receipt routes: creation, workflow transitions, posting, and
//! allocation.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_json, routes::orders::approval_error_response};
use kontor_core::approval::DocumentKind;
use kontor_core::notify::{DocumentEvent, EventAction};
use kontor_core::receipt::{
    AllocationError, AllocationRequest, AllocationStatus, PaymentMethod, ReceiptError,
    ReceiptStatus,
};
use kontor_db::entities::{ar_receipt_allocations, ar_receipts};
use kontor_db::repositories::receipt::{
    CreateReceiptInput, ReceiptFilter, ReceiptRepository, ReceiptWithAllocations,
};
use kontor_shared::types::{InvoiceId, PageResponse};

/// Creates the receipt routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/receipts", get(list_receipts))
        .route("/receipts", post(create_receipt))
        .route("/receipts/{receipt_id}", get(get_receipt))
        .route("/receipts/{receipt_id}/submit", post(submit_receipt))
        .route("/receipts/{receipt_id}/approve", post(approve_receipt))
        .route("/receipts/{receipt_id}/reject", post(reject_receipt))
        .route("/receipts/{receipt_id}/post", post(post_receipt))
        .route("/receipts/{receipt_id}/cancel", post(cancel_receipt))
        .route("/receipts/{receipt_id}/allocations", post(allocate_receipt))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing receipts.
#[derive(Debug, Deserialize)]
pub struct ListReceiptsQuery {
    /// Filter by operational status.
    pub status: Option<String>,
    /// Filter by allocation status.
    pub allocation_status: Option<String>,
    /// Filter by customer.
    pub customer: Option<Uuid>,
    /// Page number (1-indexed).
    pub page: Option<u64>,
    /// Page size (default: 20, max: 100).
    pub limit: Option<u64>,
}

/// Request body for recording a receipt.
#[derive(Debug, Deserialize)]
pub struct CreateReceiptRequest {
    /// The paying customer.
    pub customer_id: Uuid,
    /// The payment amount (decimal string).
    pub amount: String,
    /// The payment method.
    pub method: String,
}

/// Request body for rejecting a receipt.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// The reason for rejection.
    pub reason: String,
}

/// Request body for one allocation in a batch.
#[derive(Debug, Deserialize)]
pub struct AllocationRequestBody {
    /// The invoice to apply money to.
    pub invoice_id: Uuid,
    /// The amount to apply (decimal string).
    pub applied_amount: String,
}

/// Request body for an allocation batch.
#[derive(Debug, Deserialize)]
pub struct AllocateRequest {
    /// The allocations to apply, all or nothing.
    pub allocations: Vec<AllocationRequestBody>,
}

/// Response for an allocation row.
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    /// Allocation ID.
    pub id: Uuid,
    /// The receipt allocated from.
    pub receipt_id: Uuid,
    /// The invoice allocated to.
    pub invoice_id: Uuid,
    /// The applied amount.
    pub applied_amount: String,
    /// Created at timestamp.
    pub created_at: String,
}

/// Response for a receipt.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    /// Receipt ID.
    pub id: Uuid,
    /// Receipt number.
    pub receipt_no: String,
    /// Customer ID.
    pub customer_id: Uuid,
    /// The payment amount.
    pub amount: String,
    /// The payment method.
    pub method: String,
    /// Operational status.
    pub status: String,
    /// Approval status.
    pub approval_status: String,
    /// Allocation status.
    pub allocation_status: String,
    /// Rejection reason, if rejected.
    pub reject_reason: Option<String>,
    /// Posted at timestamp, if posted.
    pub posted_at: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
    /// Allocation rows.
    pub allocations: Vec<AllocationResponse>,
}

impl ReceiptResponse {
    fn from_model(receipt: ar_receipts::Model, allocations: Vec<ar_receipt_allocations::Model>) -> Self {
        Self {
            id: receipt.id,
            receipt_no: receipt.receipt_no,
            customer_id: receipt.customer_id,
            amount: receipt.amount.to_string(),
            method: method_string(&receipt.method),
            status: status_string(&receipt.status),
            approval_status: approval_string(&receipt.approval_status),
            allocation_status: allocation_string(&receipt.allocation_status),
            reject_reason: receipt.reject_reason,
            posted_at: receipt.posted_at.map(|t| t.to_rfc3339()),
            created_at: receipt.created_at.to_rfc3339(),
            updated_at: receipt.updated_at.to_rfc3339(),
            allocations: allocations
                .into_iter()
                .map(|a| AllocationResponse {
                    id: a.id,
                    receipt_id: a.receipt_id,
                    invoice_id: a.invoice_id,
                    applied_amount: a.applied_amount.to_string(),
                    created_at: a.created_at.to_rfc3339(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/receipts` - Record a draft receipt.
async fn create_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateReceiptRequest>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };
    if !role.can_submit(DocumentKind::ArReceipt) {
        return error_json(403, "NOT_SUBMITTER", "Role may not record receipts");
    }

    let Ok(amount) = Decimal::from_str(&payload.amount) else {
        return error_json(400, "INVALID_AMOUNT", "Invalid amount format");
    };
    let Some(method) = PaymentMethod::parse(&payload.method) else {
        return error_json(400, "UNKNOWN_PAYMENT_METHOD", "Unknown payment method");
    };

    let repo = ReceiptRepository::new((*state.db).clone());
    let input = CreateReceiptInput {
        customer_id: payload.customer_id,
        amount,
        method,
        created_by: auth.user_id(),
    };

    match repo.create_receipt(input).await {
        Ok(receipt) => {
            info!(receipt_id = %receipt.id, receipt_no = %receipt.receipt_no, "Receipt recorded");
            (
                StatusCode::CREATED,
                Json(ReceiptResponse::from_model(receipt, vec![])),
            )
                .into_response()
        }
        Err(e) => receipt_error_response(&e),
    }
}

/// GET `/receipts` - List receipts with filters.
async fn list_receipts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListReceiptsQuery>,
) -> Response {
    let mut filter = ReceiptFilter {
        customer_id: query.customer,
        ..ReceiptFilter::default()
    };
    if let Some(raw) = &query.status {
        match ReceiptStatus::parse(raw) {
            Some(status) => filter.status = Some(status),
            None => return error_json(400, "INVALID_STATUS", "Unknown receipt status"),
        }
    }
    if let Some(raw) = &query.allocation_status {
        match AllocationStatus::parse(raw) {
            Some(status) => filter.allocation_status = Some(status),
            None => return error_json(400, "INVALID_STATUS", "Unknown allocation status"),
        }
    }

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.limit.unwrap_or(20).clamp(1, 100);

    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.list_receipts(filter, page, per_page).await {
        Ok((receipts, total)) => {
            let items: Vec<ReceiptResponse> = receipts
                .into_iter()
                .map(|r| ReceiptResponse::from_model(r, vec![]))
                .collect();
            #[allow(clippy::cast_possible_truncation)]
            let response = PageResponse::new(items, page as u32, per_page as u32, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => receipt_error_response(&e),
    }
}

/// GET `/receipts/{receipt_id}` - Get a receipt with its allocations.
async fn get_receipt(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(receipt_id): Path<Uuid>,
) -> Response {
    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.get_receipt(receipt_id).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ReceiptResponse::from_model(result.receipt, result.allocations)),
        )
            .into_response(),
        Err(e) => receipt_error_response(&e),
    }
}

/// POST `/receipts/{receipt_id}/submit` - Submit for approval.
async fn submit_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(receipt_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.submit_receipt(receipt_id, role, auth.user_id()).await {
        Ok(receipt) => {
            notify_receipt(&state, &receipt, EventAction::Submitted, auth.user_id());
            (
                StatusCode::OK,
                Json(ReceiptResponse::from_model(receipt, vec![])),
            )
                .into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/receipts/{receipt_id}/approve` - Approve a waiting receipt.
async fn approve_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(receipt_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.approve_receipt(receipt_id, role, auth.user_id()).await {
        Ok(receipt) => {
            notify_receipt(&state, &receipt, EventAction::Approved, auth.user_id());
            (
                StatusCode::OK,
                Json(ReceiptResponse::from_model(receipt, vec![])),
            )
                .into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/receipts/{receipt_id}/reject` - Reject a waiting receipt.
async fn reject_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(receipt_id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.reject_receipt(receipt_id, role, payload.reason).await {
        Ok(receipt) => {
            notify_receipt(&state, &receipt, EventAction::Rejected, auth.user_id());
            (
                StatusCode::OK,
                Json(ReceiptResponse::from_model(receipt, vec![])),
            )
                .into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/receipts/{receipt_id}/post` - Post an approved receipt.
async fn post_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(receipt_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };
    if !role.can_approve(DocumentKind::ArReceipt) {
        return error_json(403, "NOT_APPROVER", "Role may not post receipts");
    }

    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.post_receipt(receipt_id, auth.user_id()).await {
        Ok(receipt) => {
            info!(receipt_id = %receipt.id, receipt_no = %receipt.receipt_no, "Receipt posted");
            (
                StatusCode::OK,
                Json(ReceiptResponse::from_model(receipt, vec![])),
            )
                .into_response()
        }
        Err(e) => receipt_error_response(&e),
    }
}

/// POST `/receipts/{receipt_id}/cancel` - Cancel a draft receipt.
async fn cancel_receipt(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(receipt_id): Path<Uuid>,
) -> Response {
    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.cancel_receipt(receipt_id).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(ReceiptResponse::from_model(receipt, vec![])),
        )
            .into_response(),
        Err(e) => receipt_error_response(&e),
    }
}

/// POST `/receipts/{receipt_id}/allocations` - Allocate a receipt to
/// invoices, all or nothing.
async fn allocate_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(receipt_id): Path<Uuid>,
    Json(payload): Json<AllocateRequest>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };
    if !role.can_submit(DocumentKind::ArReceipt) {
        return error_json(403, "NOT_SUBMITTER", "Role may not allocate receipts");
    }

    let mut batch = Vec::with_capacity(payload.allocations.len());
    for allocation in &payload.allocations {
        let Ok(applied_amount) = Decimal::from_str(&allocation.applied_amount) else {
            return error_json(400, "INVALID_AMOUNT", "Invalid applied amount format");
        };
        batch.push(AllocationRequest {
            invoice_id: InvoiceId::from_uuid(allocation.invoice_id),
            applied_amount,
        });
    }

    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.allocate(receipt_id, batch, auth.user_id()).await {
        Ok(ReceiptWithAllocations {
            receipt,
            allocations,
        }) => {
            info!(
                receipt_id = %receipt.id,
                receipt_no = %receipt.receipt_no,
                allocations = allocations.len(),
                allocation_status = %allocation_string(&receipt.allocation_status),
                "Receipt allocated"
            );
            (
                StatusCode::OK,
                Json(ReceiptResponse::from_model(receipt, allocations)),
            )
                .into_response()
        }
        Err(e) => allocation_error_response(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn status_string(status: &kontor_db::entities::sea_orm_active_enums::ReceiptStatus) -> String {
    kontor_db::repositories::convert::receipt_status_to_core(status)
        .as_str()
        .to_string()
}

fn approval_string(status: &kontor_db::entities::sea_orm_active_enums::ApprovalStatus) -> String {
    kontor_db::repositories::convert::approval_to_core(status)
        .as_str()
        .to_string()
}

fn allocation_string(
    status: &kontor_db::entities::sea_orm_active_enums::AllocationStatus,
) -> String {
    kontor_db::repositories::convert::allocation_status_to_core(status)
        .as_str()
        .to_string()
}

fn method_string(method: &kontor_db::entities::sea_orm_active_enums::PaymentMethod) -> String {
    kontor_db::repositories::convert::payment_method_to_core(method)
        .as_str()
        .to_string()
}

fn notify_receipt(
    state: &AppState,
    receipt: &ar_receipts::Model,
    action: EventAction,
    actor: Uuid,
) {
    state.notifier.notify(DocumentEvent {
        kind: DocumentKind::ArReceipt,
        document_id: receipt.id,
        document_no: receipt.receipt_no.clone(),
        action,
        actor,
    });
}

fn receipt_error_response(e: &ReceiptError) -> Response {
    if e.status_code() >= 500 {
        error!(error = %e, "Receipt operation failed");
        return error_json(500, "INTERNAL_ERROR", "An error occurred");
    }
    error_json(e.status_code(), e.error_code(), &e.to_string())
}

fn allocation_error_response(e: &AllocationError) -> Response {
    if e.status_code() >= 500 {
        error!(error = %e, "Allocation failed");
        return error_json(500, "INTERNAL_ERROR", "An error occurred");
    }
    error_json(e.status_code(), e.error_code(), &e.to_string())
}
