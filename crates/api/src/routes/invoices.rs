//! AR invoice routes: queries, workflow transitions, and posting.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_json, routes::orders::approval_error_response};
use kontor_core::approval::{ApprovalStatus, DocumentKind};
use kontor_core::invoice::{InvoiceError, InvoiceStatus};
use kontor_core::notify::{DocumentEvent, EventAction};
use kontor_db::entities::{ar_invoice_lines, ar_invoices};
use kontor_db::repositories::invoice::{InvoiceFilter, InvoiceRepository, InvoiceWithLines};
use kontor_shared::types::PageResponse;

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices))
        .route("/invoices/{invoice_id}", get(get_invoice))
        .route("/invoices/{invoice_id}/submit", post(submit_invoice))
        .route("/invoices/{invoice_id}/approve", post(approve_invoice))
        .route("/invoices/{invoice_id}/reject", post(reject_invoice))
        .route("/invoices/{invoice_id}/post", post(post_invoice))
        .route("/invoices/{invoice_id}/cancel", post(cancel_invoice))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing invoices.
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    /// Filter by operational status.
    pub status: Option<String>,
    /// Filter by approval status.
    pub approval_status: Option<String>,
    /// Filter by customer.
    pub customer: Option<Uuid>,
    /// Page number (1-indexed).
    pub page: Option<u64>,
    /// Page size (default: 20, max: 100).
    pub limit: Option<u64>,
}

/// Request body for rejecting an invoice.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// The reason for rejection.
    pub reason: String,
}

/// Response for an invoice line.
#[derive(Debug, Serialize)]
pub struct InvoiceLineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Product ID.
    pub product_id: Uuid,
    /// Quantity.
    pub quantity: String,
    /// Unit price.
    pub unit_price: String,
    /// Tax rate ID.
    pub tax_rate_id: Uuid,
    /// Tax rate fraction.
    pub tax_rate: String,
    /// Line total before tax.
    pub line_total: String,
    /// Line total after tax.
    pub line_total_after_tax: String,
}

/// Response for an invoice with lines.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    /// Invoice ID.
    pub id: Uuid,
    /// Invoice number.
    pub invoice_no: String,
    /// The billed order.
    pub order_id: Uuid,
    /// Customer ID.
    pub customer_id: Uuid,
    /// Operational status.
    pub status: String,
    /// Approval status.
    pub approval_status: String,
    /// Total before tax.
    pub total_before_tax: String,
    /// Total tax.
    pub total_tax: String,
    /// Total after tax.
    pub total_after_tax: String,
    /// Rejection reason, if rejected.
    pub reject_reason: Option<String>,
    /// Posted at timestamp, if posted.
    pub posted_at: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
    /// Invoice lines.
    pub lines: Vec<InvoiceLineResponse>,
}

/// Response for an invoice list item (without lines).
#[derive(Debug, Serialize)]
pub struct InvoiceListItem {
    /// Invoice ID.
    pub id: Uuid,
    /// Invoice number.
    pub invoice_no: String,
    /// The billed order.
    pub order_id: Uuid,
    /// Customer ID.
    pub customer_id: Uuid,
    /// Operational status.
    pub status: String,
    /// Approval status.
    pub approval_status: String,
    /// Total after tax.
    pub total_after_tax: String,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<ar_invoices::Model> for InvoiceListItem {
    fn from(invoice: ar_invoices::Model) -> Self {
        Self {
            id: invoice.id,
            invoice_no: invoice.invoice_no,
            order_id: invoice.order_id,
            customer_id: invoice.customer_id,
            status: status_string(&invoice.status),
            approval_status: approval_string(&invoice.approval_status),
            total_after_tax: invoice.total_after_tax.to_string(),
            created_at: invoice.created_at.to_rfc3339(),
        }
    }
}

pub(crate) fn invoice_response(result: InvoiceWithLines) -> InvoiceResponse {
    let lines = result
        .lines
        .into_iter()
        .map(|l: ar_invoice_lines::Model| InvoiceLineResponse {
            id: l.id,
            product_id: l.product_id,
            quantity: l.quantity.to_string(),
            unit_price: l.unit_price.to_string(),
            tax_rate_id: l.tax_rate_id,
            tax_rate: l.tax_rate.to_string(),
            line_total: l.line_total.to_string(),
            line_total_after_tax: l.line_total_after_tax.to_string(),
        })
        .collect();

    let invoice = result.invoice;
    InvoiceResponse {
        id: invoice.id,
        invoice_no: invoice.invoice_no,
        order_id: invoice.order_id,
        customer_id: invoice.customer_id,
        status: status_string(&invoice.status),
        approval_status: approval_string(&invoice.approval_status),
        total_before_tax: invoice.total_before_tax.to_string(),
        total_tax: invoice.total_tax.to_string(),
        total_after_tax: invoice.total_after_tax.to_string(),
        reject_reason: invoice.reject_reason,
        posted_at: invoice.posted_at.map(|t| t.to_rfc3339()),
        created_at: invoice.created_at.to_rfc3339(),
        updated_at: invoice.updated_at.to_rfc3339(),
        lines,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/invoices` - List invoices with filters.
async fn list_invoices(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListInvoicesQuery>,
) -> Response {
    let mut filter = InvoiceFilter {
        customer_id: query.customer,
        ..InvoiceFilter::default()
    };
    if let Some(raw) = &query.status {
        match InvoiceStatus::parse(raw) {
            Some(status) => filter.status = Some(status),
            None => return error_json(400, "INVALID_STATUS", "Unknown invoice status"),
        }
    }
    if let Some(raw) = &query.approval_status {
        match ApprovalStatus::parse(raw) {
            Some(status) => filter.approval_status = Some(status),
            None => return error_json(400, "INVALID_STATUS", "Unknown approval status"),
        }
    }

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.limit.unwrap_or(20).clamp(1, 100);

    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.list_invoices(filter, page, per_page).await {
        Ok((invoices, total)) => {
            let items: Vec<InvoiceListItem> = invoices.into_iter().map(Into::into).collect();
            #[allow(clippy::cast_possible_truncation)]
            let response = PageResponse::new(items, page as u32, per_page as u32, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => invoice_error_response(&e),
    }
}

/// GET `/invoices/{invoice_id}` - Get an invoice with lines.
async fn get_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Response {
    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.get_invoice(invoice_id).await {
        Ok(result) => (StatusCode::OK, Json(invoice_response(result))).into_response(),
        Err(e) => invoice_error_response(&e),
    }
}

/// POST `/invoices/{invoice_id}/submit` - Submit for approval.
async fn submit_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.submit_invoice(invoice_id, role, auth.user_id()).await {
        Ok(invoice) => {
            notify_invoice(&state, &invoice, EventAction::Submitted, auth.user_id());
            (StatusCode::OK, Json(InvoiceListItem::from(invoice))).into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/invoices/{invoice_id}/approve` - Approve a waiting invoice.
async fn approve_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.approve_invoice(invoice_id, role, auth.user_id()).await {
        Ok(invoice) => {
            notify_invoice(&state, &invoice, EventAction::Approved, auth.user_id());
            (StatusCode::OK, Json(InvoiceListItem::from(invoice))).into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/invoices/{invoice_id}/reject` - Reject a waiting invoice.
async fn reject_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.reject_invoice(invoice_id, role, payload.reason).await {
        Ok(invoice) => {
            notify_invoice(&state, &invoice, EventAction::Rejected, auth.user_id());
            (StatusCode::OK, Json(InvoiceListItem::from(invoice))).into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/invoices/{invoice_id}/post` - Post an approved invoice to the ledger.
async fn post_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };
    if !role.can_approve(DocumentKind::ArInvoice) {
        return error_json(403, "NOT_APPROVER", "Role may not post invoices");
    }

    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.post_invoice(invoice_id, auth.user_id()).await {
        Ok(invoice) => {
            info!(invoice_id = %invoice.id, invoice_no = %invoice.invoice_no, "Invoice posted");
            (StatusCode::OK, Json(InvoiceListItem::from(invoice))).into_response()
        }
        Err(e) => invoice_error_response(&e),
    }
}

/// POST `/invoices/{invoice_id}/cancel` - Cancel a draft invoice.
async fn cancel_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Response {
    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.cancel_invoice(invoice_id).await {
        Ok(invoice) => (StatusCode::OK, Json(InvoiceListItem::from(invoice))).into_response(),
        Err(e) => invoice_error_response(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn status_string(status: &kontor_db::entities::sea_orm_active_enums::InvoiceStatus) -> String {
    kontor_db::repositories::convert::invoice_status_to_core(status)
        .as_str()
        .to_string()
}

fn approval_string(status: &kontor_db::entities::sea_orm_active_enums::ApprovalStatus) -> String {
    kontor_db::repositories::convert::approval_to_core(status)
        .as_str()
        .to_string()
}

fn notify_invoice(
    state: &AppState,
    invoice: &ar_invoices::Model,
    action: EventAction,
    actor: Uuid,
) {
    state.notifier.notify(DocumentEvent {
        kind: DocumentKind::ArInvoice,
        document_id: invoice.id,
        document_no: invoice.invoice_no.clone(),
        action,
        actor,
    });
}

pub(crate) fn invoice_error_response(e: &InvoiceError) -> Response {
    if e.status_code() >= 500 {
        error!(error = %e, "Invoice operation failed");
        return error_json(500, "INTERNAL_ERROR", "An error occurred");
    }
    error_json(e.status_code(), e.error_code(), &e.to_string())
}
