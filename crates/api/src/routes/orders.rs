//! Sale order routes: creation, queries, and workflow transitions.

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

use crate::{AppState, middleware::AuthUser, routes::error_json};
use kontor_core::approval::{ApprovalError, ApprovalStatus, DocumentKind};
use kontor_core::notify::{DocumentEvent, EventAction};
use kontor_core::order::{OrderError, OrderStatus};
use kontor_db::repositories::order::{
    CreateOrderInput, CreateOrderLineInput, OrderFilter, OrderRepository, OrderWithLines,
};
use kontor_db::entities::{sale_order_lines, sale_orders};
use kontor_shared::types::PageResponse;

/// Creates the order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders", post(create_order))
        .route("/orders/{order_id}", get(get_order))
        .route("/orders/{order_id}/submit", post(submit_order))
        .route("/orders/{order_id}/approve", post(approve_order))
        .route("/orders/{order_id}/reject", post(reject_order))
        .route("/orders/{order_id}/confirm", post(confirm_order))
        .route("/orders/{order_id}/ship", post(ship_order))
        .route("/orders/{order_id}/complete", post(complete_order))
        .route("/orders/{order_id}/cancel", post(cancel_order))
        .route("/orders/{order_id}/invoice", post(create_invoice_for_order))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing orders.
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
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

/// Request body for creating an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// The ordering customer.
    pub customer_id: Uuid,
    /// The order lines.
    pub lines: Vec<CreateOrderLineRequest>,
}

/// Request body for a single order line.
#[derive(Debug, Deserialize)]
pub struct CreateOrderLineRequest {
    /// The product being sold.
    pub product_id: Uuid,
    /// Quantity ordered (decimal string).
    pub quantity: String,
    /// Unit price (decimal string); defaults to the product master price.
    pub unit_price: Option<String>,
    /// The tax rate applied to the line.
    pub tax_rate_id: Uuid,
}

/// Request body for rejecting an order.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// The reason for rejection.
    pub reason: String,
}

/// Response for an order line.
#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
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

/// Response for an order with lines.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    /// Order ID.
    pub id: Uuid,
    /// Order number.
    pub order_no: String,
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
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
    /// Order lines.
    pub lines: Vec<OrderLineResponse>,
}

/// Response for an order list item (without lines).
#[derive(Debug, Serialize)]
pub struct OrderListItem {
    /// Order ID.
    pub id: Uuid,
    /// Order number.
    pub order_no: String,
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

impl From<sale_orders::Model> for OrderListItem {
    fn from(order: sale_orders::Model) -> Self {
        Self {
            id: order.id,
            order_no: order.order_no,
            customer_id: order.customer_id,
            status: status_string(&order.status),
            approval_status: approval_string(&order.approval_status),
            total_after_tax: order.total_after_tax.to_string(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

fn order_response(result: OrderWithLines) -> OrderResponse {
    let lines = result
        .lines
        .into_iter()
        .map(|l: sale_order_lines::Model| OrderLineResponse {
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

    let order = result.order;
    OrderResponse {
        id: order.id,
        order_no: order.order_no,
        customer_id: order.customer_id,
        status: status_string(&order.status),
        approval_status: approval_string(&order.approval_status),
        total_before_tax: order.total_before_tax.to_string(),
        total_tax: order.total_tax.to_string(),
        total_after_tax: order.total_after_tax.to_string(),
        reject_reason: order.reject_reason,
        created_at: order.created_at.to_rfc3339(),
        updated_at: order.updated_at.to_rfc3339(),
        lines,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/orders` - Create a draft sale order.
async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };
    if !role.can_submit(DocumentKind::SaleOrder) {
        return error_json(403, "NOT_SUBMITTER", "Role may not create sale orders");
    }

    let mut lines = Vec::with_capacity(payload.lines.len());
    for line in &payload.lines {
        let Some(quantity) = parse_amount(&line.quantity) else {
            return error_json(400, "INVALID_QUANTITY", "Invalid quantity format");
        };
        let unit_price = match &line.unit_price {
            Some(raw) => match parse_amount(raw) {
                Some(price) => Some(price),
                None => {
                    return error_json(400, "INVALID_UNIT_PRICE", "Invalid unit price format");
                }
            },
            None => None,
        };

        lines.push(CreateOrderLineInput {
            product_id: line.product_id,
            quantity,
            unit_price,
            tax_rate_id: line.tax_rate_id,
        });
    }

    let repo = OrderRepository::new((*state.db).clone());
    let input = CreateOrderInput {
        customer_id: payload.customer_id,
        lines,
        created_by: auth.user_id(),
    };

    match repo.create_order(input).await {
        Ok(result) => {
            info!(order_id = %result.order.id, order_no = %result.order.order_no, "Order created");
            (StatusCode::CREATED, Json(order_response(result))).into_response()
        }
        Err(e) => order_error_response(&e),
    }
}

/// GET `/orders` - List orders with filters.
async fn list_orders(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListOrdersQuery>,
) -> Response {
    let mut filter = OrderFilter {
        customer_id: query.customer,
        ..OrderFilter::default()
    };
    if let Some(raw) = &query.status {
        match OrderStatus::parse(raw) {
            Some(status) => filter.status = Some(status),
            None => return error_json(400, "INVALID_STATUS", "Unknown order status"),
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

    let repo = OrderRepository::new((*state.db).clone());
    match repo.list_orders(filter, page, per_page).await {
        Ok((orders, total)) => {
            let items: Vec<OrderListItem> = orders.into_iter().map(Into::into).collect();
            #[allow(clippy::cast_possible_truncation)]
            let response =
                PageResponse::new(items, page as u32, per_page as u32, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => order_error_response(&e),
    }
}

/// GET `/orders/{order_id}` - Get an order with lines.
async fn get_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Response {
    let repo = OrderRepository::new((*state.db).clone());
    match repo.get_order(order_id).await {
        Ok(result) => (StatusCode::OK, Json(order_response(result))).into_response(),
        Err(e) => order_error_response(&e),
    }
}

/// POST `/orders/{order_id}/submit` - Submit for approval.
async fn submit_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = OrderRepository::new((*state.db).clone());
    match repo.submit_order(order_id, role, auth.user_id()).await {
        Ok(order) => {
            notify_order(&state, &order, EventAction::Submitted, auth.user_id());
            (StatusCode::OK, Json(OrderListItem::from(order))).into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/orders/{order_id}/approve` - Approve a waiting order.
async fn approve_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = OrderRepository::new((*state.db).clone());
    match repo.approve_order(order_id, role, auth.user_id()).await {
        Ok(order) => {
            notify_order(&state, &order, EventAction::Approved, auth.user_id());
            (StatusCode::OK, Json(OrderListItem::from(order))).into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/orders/{order_id}/reject` - Reject a waiting order.
async fn reject_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };

    let repo = OrderRepository::new((*state.db).clone());
    match repo.reject_order(order_id, role, payload.reason).await {
        Ok(order) => {
            notify_order(&state, &order, EventAction::Rejected, auth.user_id());
            (StatusCode::OK, Json(OrderListItem::from(order))).into_response()
        }
        Err(e) => approval_error_response(&e),
    }
}

/// POST `/orders/{order_id}/confirm` - Confirm an approved order.
async fn confirm_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Response {
    let repo = OrderRepository::new((*state.db).clone());
    match repo.confirm_order(order_id).await {
        Ok(order) => (StatusCode::OK, Json(OrderListItem::from(order))).into_response(),
        Err(e) => order_error_response(&e),
    }
}

/// POST `/orders/{order_id}/ship` - Mark a confirmed order shipped.
async fn ship_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Response {
    let repo = OrderRepository::new((*state.db).clone());
    match repo.ship_order(order_id).await {
        Ok(order) => (StatusCode::OK, Json(OrderListItem::from(order))).into_response(),
        Err(e) => order_error_response(&e),
    }
}

/// POST `/orders/{order_id}/complete` - Mark a shipped order completed.
async fn complete_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Response {
    let repo = OrderRepository::new((*state.db).clone());
    match repo.complete_order(order_id).await {
        Ok(order) => (StatusCode::OK, Json(OrderListItem::from(order))).into_response(),
        Err(e) => order_error_response(&e),
    }
}

/// POST `/orders/{order_id}/cancel` - Cancel an order before shipment.
async fn cancel_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Response {
    let repo = OrderRepository::new((*state.db).clone());
    match repo.cancel_order(order_id).await {
        Ok(order) => (StatusCode::OK, Json(OrderListItem::from(order))).into_response(),
        Err(e) => order_error_response(&e),
    }
}

/// POST `/orders/{order_id}/invoice` - Create the invoice for an order.
async fn create_invoice_for_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Response {
    let role = match auth.role() {
        Ok(role) => role,
        Err(response) => return response,
    };
    if !role.can_submit(DocumentKind::ArInvoice) {
        return error_json(403, "NOT_SUBMITTER", "Role may not create invoices");
    }

    let repo = kontor_db::repositories::invoice::InvoiceRepository::new((*state.db).clone());
    match repo.create_from_order(order_id, auth.user_id()).await {
        Ok(result) => {
            info!(
                order_id = %order_id,
                invoice_id = %result.invoice.id,
                invoice_no = %result.invoice.invoice_no,
                "Invoice created from order"
            );
            (
                StatusCode::CREATED,
                Json(super::invoices::invoice_response(result)),
            )
                .into_response()
        }
        Err(e) => super::invoices::invoice_error_response(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw).ok()
}

fn status_string(status: &kontor_db::entities::sea_orm_active_enums::OrderStatus) -> String {
    kontor_db::repositories::convert::order_status_to_core(status)
        .as_str()
        .to_string()
}

fn approval_string(status: &kontor_db::entities::sea_orm_active_enums::ApprovalStatus) -> String {
    kontor_db::repositories::convert::approval_to_core(status)
        .as_str()
        .to_string()
}

fn notify_order(
    state: &AppState,
    order: &sale_orders::Model,
    action: EventAction,
    actor: Uuid,
) {
    state.notifier.notify(DocumentEvent {
        kind: DocumentKind::SaleOrder,
        document_id: order.id,
        document_no: order.order_no.clone(),
        action,
        actor,
    });
}

fn order_error_response(e: &OrderError) -> Response {
    if e.status_code() >= 500 {
        error!(error = %e, "Order operation failed");
        return error_json(500, "INTERNAL_ERROR", "An error occurred");
    }
    error_json(e.status_code(), e.error_code(), &e.to_string())
}

pub(crate) fn approval_error_response(e: &ApprovalError) -> Response {
    if e.status_code() >= 500 {
        error!(error = %e, "Approval operation failed");
        return error_json(500, "INTERNAL_ERROR", "An error occurred");
    }
    error_json(e.status_code(), e.error_code(), &e.to_string())
}
