//! General ledger routes: entry queries.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_json};
use kontor_core::ledger::LedgerError;
use kontor_db::entities::{gl_entries, gl_entry_lines};
use kontor_db::repositories::ledger::{EntryWithLines, LedgerRepository};
use kontor_shared::types::PageResponse;

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger/entries", get(list_entries))
        .route("/ledger/entries/{entry_id}", get(get_entry))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Page number (1-indexed).
    pub page: Option<u64>,
    /// Page size (default: 20, max: 100).
    pub limit: Option<u64>,
}

/// Response for an entry line.
#[derive(Debug, Serialize)]
pub struct EntryLineResponse {
    /// Line ID.
    pub id: Uuid,
    /// The account posted to.
    pub account: String,
    /// The account code.
    pub account_code: String,
    /// Debit amount.
    pub debit: String,
    /// Credit amount.
    pub credit: String,
}

/// Response for an entry with lines.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Entry number.
    pub entry_no: String,
    /// The document type that produced the entry.
    pub reference_type: String,
    /// The document that produced the entry.
    pub reference_id: Uuid,
    /// The posting purpose.
    pub purpose: String,
    /// Description.
    pub description: String,
    /// Posted at timestamp.
    pub posted_at: String,
    /// Entry lines.
    pub lines: Vec<EntryLineResponse>,
}

/// Response for an entry list item (without lines).
#[derive(Debug, Serialize)]
pub struct EntryListItem {
    /// Entry ID.
    pub id: Uuid,
    /// Entry number.
    pub entry_no: String,
    /// The document type that produced the entry.
    pub reference_type: String,
    /// The document that produced the entry.
    pub reference_id: Uuid,
    /// Description.
    pub description: String,
    /// Posted at timestamp.
    pub posted_at: String,
}

impl From<gl_entries::Model> for EntryListItem {
    fn from(entry: gl_entries::Model) -> Self {
        Self {
            id: entry.id,
            entry_no: entry.entry_no,
            reference_type: reference_string(&entry.reference_type),
            reference_id: entry.reference_id,
            description: entry.description,
            posted_at: entry.posted_at.to_rfc3339(),
        }
    }
}

fn entry_response(result: EntryWithLines) -> EntryResponse {
    let lines = result
        .lines
        .into_iter()
        .map(|l: gl_entry_lines::Model| EntryLineResponse {
            id: l.id,
            account: account_string(&l.account),
            account_code: l.account_code,
            debit: l.debit.to_string(),
            credit: l.credit.to_string(),
        })
        .collect();

    let entry = result.entry;
    EntryResponse {
        id: entry.id,
        entry_no: entry.entry_no,
        reference_type: reference_string(&entry.reference_type),
        reference_id: entry.reference_id,
        purpose: entry.purpose,
        description: entry.description,
        posted_at: entry.posted_at.to_rfc3339(),
        lines,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/ledger/entries` - List GL entries, newest first.
async fn list_entries(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListEntriesQuery>,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.limit.unwrap_or(20).clamp(1, 100);

    let repo = LedgerRepository::new((*state.db).clone());
    match repo.list_entries(page, per_page).await {
        Ok((entries, total)) => {
            let items: Vec<EntryListItem> = entries.into_iter().map(Into::into).collect();
            #[allow(clippy::cast_possible_truncation)]
            let response = PageResponse::new(items, page as u32, per_page as u32, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/ledger/entries/{entry_id}` - Get an entry with lines.
async fn get_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(entry_id): Path<Uuid>,
) -> Response {
    let repo = LedgerRepository::new((*state.db).clone());
    match repo.get_entry(entry_id).await {
        Ok(result) => (StatusCode::OK, Json(entry_response(result))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn reference_string(
    reference: &kontor_db::entities::sea_orm_active_enums::GlReferenceType,
) -> String {
    kontor_db::repositories::convert::reference_type_to_core(reference)
        .as_str()
        .to_string()
}

fn account_string(account: &kontor_db::entities::sea_orm_active_enums::LedgerAccount) -> String {
    match account {
        kontor_db::entities::sea_orm_active_enums::LedgerAccount::AccountsReceivable => {
            "accounts_receivable".to_string()
        }
        kontor_db::entities::sea_orm_active_enums::LedgerAccount::Revenue => "revenue".to_string(),
        kontor_db::entities::sea_orm_active_enums::LedgerAccount::TaxPayable => {
            "tax_payable".to_string()
        }
        kontor_db::entities::sea_orm_active_enums::LedgerAccount::Cash => "cash".to_string(),
    }
}

fn ledger_error_response(e: &LedgerError) -> Response {
    if e.status_code() >= 500 {
        error!(error = %e, "Ledger operation failed");
        return error_json(500, "INTERNAL_ERROR", "An error occurred");
    }
    error_json(e.status_code(), e.error_code(), &e.to_string())
}
