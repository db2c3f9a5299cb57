//! AR invoice repository: creation from orders, queries, workflow
//! transitions, and posting.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use kontor_core::approval::{
    ApprovalAction, ApprovalError, ApprovalService, ApprovalStatus, DocumentKind, UserRole,
};
use kontor_core::invoice::{InvoiceError, InvoiceService, OrderSnapshot};
use kontor_core::ledger::invoice_posting;
use kontor_core::order::DocumentTotals;
use kontor_shared::types::{InvoiceId, OrderId, PartnerId};

use crate::entities::{ar_invoice_lines, ar_invoices, sale_orders};
use crate::repositories::convert::{
    approval_to_core, approval_to_db, invoice_status_to_core, invoice_status_to_db,
    order_status_to_core,
};
use crate::repositories::ledger::LedgerRepository;
use crate::repositories::order::load_core_lines;
use crate::repositories::sequence::{AR_INVOICE_NO_SEQ, next_document_number};

/// Filter options for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    /// Filter by operational status.
    pub status: Option<kontor_core::invoice::InvoiceStatus>,
    /// Filter by approval status.
    pub approval_status: Option<ApprovalStatus>,
    /// Filter by customer.
    pub customer_id: Option<Uuid>,
}

/// An invoice with its lines.
#[derive(Debug, Clone)]
pub struct InvoiceWithLines {
    /// Invoice header.
    pub invoice: ar_invoices::Model,
    /// Invoice lines.
    pub lines: Vec<ar_invoice_lines::Model>,
}

/// AR invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an invoice from an approved, confirmed order.
    ///
    /// The order row is locked for the duration of the transaction and the
    /// no-existing-invoice check runs under that lock, so two concurrent
    /// calls cannot both insert; the unique index on `ar_invoices.order_id`
    /// backs the guard up at the schema level. Lines are copied verbatim
    /// and totals recomputed from the copies.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is missing, not approved, not
    /// confirmed, already invoiced, or the database operation fails.
    pub async fn create_from_order(
        &self,
        order_id: Uuid,
        created_by: Uuid,
    ) -> Result<InvoiceWithLines, InvoiceError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        // Lock the order row: the duplicate check below must not race
        let order = sale_orders::Entity::find_by_id(order_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?
            .ok_or_else(|| InvoiceError::OrderNotFound(OrderId::from_uuid(order_id)))?;

        let existing = ar_invoices::Entity::find()
            .filter(ar_invoices::Column::OrderId.eq(order_id))
            .one(&txn)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;
        if existing.is_some() {
            return Err(InvoiceError::AlreadyInvoiced {
                order_id: OrderId::from_uuid(order_id),
            });
        }

        let lines = load_core_lines(&txn, order_id)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        let snapshot = OrderSnapshot {
            id: OrderId::from_uuid(order.id),
            customer_id: PartnerId::from_uuid(order.customer_id),
            status: order_status_to_core(&order.status),
            approval_status: approval_to_core(&order.approval_status),
            lines,
        };

        let draft = InvoiceService::build_from_order(&snapshot)?;

        let invoice_no = next_document_number(&txn, AR_INVOICE_NO_SEQ, "INV")
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        let now = Utc::now().into();
        let invoice_id = Uuid::new_v4();

        let invoice = ar_invoices::ActiveModel {
            id: Set(invoice_id),
            invoice_no: Set(invoice_no),
            order_id: Set(draft.order_id.into_inner()),
            customer_id: Set(draft.customer_id.into_inner()),
            status: Set(invoice_status_to_db(
                kontor_core::invoice::InvoiceStatus::Draft,
            )),
            approval_status: Set(approval_to_db(ApprovalStatus::Draft)),
            total_before_tax: Set(draft.totals.total_before_tax),
            total_tax: Set(draft.totals.total_tax),
            total_after_tax: Set(draft.totals.total_after_tax),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let invoice = invoice
            .insert(&txn)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        let mut line_models = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let model = ar_invoice_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                invoice_id: Set(invoice_id),
                product_id: Set(line.line.product_id.into_inner()),
                quantity: Set(line.line.quantity),
                unit_price: Set(line.line.unit_price),
                tax_rate_id: Set(line.line.tax_rate_id.into_inner()),
                tax_rate: Set(line.line.tax_rate),
                line_total: Set(line.line_total),
                line_total_after_tax: Set(line.line_total_after_tax),
                created_at: Set(now),
            };
            line_models.push(
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| InvoiceError::Database(e.to_string()))?,
            );
        }

        txn.commit()
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        debug!(
            order_id = %order_id,
            invoice_id = %invoice.id,
            lines = line_models.len(),
            "Invoice created from order"
        );

        Ok(InvoiceWithLines {
            invoice,
            lines: line_models,
        })
    }

    /// Lists invoices with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_invoices(
        &self,
        filter: InvoiceFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ar_invoices::Model>, u64), InvoiceError> {
        let mut query = ar_invoices::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(ar_invoices::Column::Status.eq(invoice_status_to_db(status)));
        }
        if let Some(approval) = filter.approval_status {
            query = query.filter(ar_invoices::Column::ApprovalStatus.eq(approval_to_db(approval)));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(ar_invoices::Column::CustomerId.eq(customer_id));
        }

        let paginator = query
            .order_by_desc(ar_invoices::Column::CreatedAt)
            .paginate(&self.db, per_page.max(1));

        let total = paginator
            .num_items()
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;
        let invoices = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        Ok((invoices, total))
    }

    /// Gets an invoice by ID with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found or the query fails.
    pub async fn get_invoice(&self, invoice_id: Uuid) -> Result<InvoiceWithLines, InvoiceError> {
        let invoice = ar_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?
            .ok_or_else(|| InvoiceError::NotFound(InvoiceId::from_uuid(invoice_id)))?;

        let lines = ar_invoice_lines::Entity::find()
            .filter(ar_invoice_lines::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(ar_invoice_lines::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        Ok(InvoiceWithLines { invoice, lines })
    }

    /// Submits a draft or rejected invoice for approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found, the acting role may
    /// not submit invoices, the transition is invalid, or the update fails.
    pub async fn submit_invoice(
        &self,
        invoice_id: Uuid,
        role: UserRole,
        submitted_by: Uuid,
    ) -> Result<ar_invoices::Model, ApprovalError> {
        let invoice = self.fetch_for_approval(invoice_id).await?;
        let current = approval_to_core(&invoice.approval_status);

        let action = ApprovalService::submit(DocumentKind::ArInvoice, current, role, submitted_by)?;

        self.apply_approval_action(invoice, &action).await
    }

    /// Approves a waiting invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found, the acting role is not
    /// a designated approver, the transition is invalid, or the update
    /// fails.
    pub async fn approve_invoice(
        &self,
        invoice_id: Uuid,
        role: UserRole,
        approved_by: Uuid,
    ) -> Result<ar_invoices::Model, ApprovalError> {
        let invoice = self.fetch_for_approval(invoice_id).await?;
        let current = approval_to_core(&invoice.approval_status);

        let action = ApprovalService::approve(DocumentKind::ArInvoice, current, role, approved_by)?;

        self.apply_approval_action(invoice, &action).await
    }

    /// Rejects a waiting invoice with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found, the acting role is not
    /// a designated approver, the reason is empty, the transition is
    /// invalid, or the update fails.
    pub async fn reject_invoice(
        &self,
        invoice_id: Uuid,
        role: UserRole,
        reject_reason: String,
    ) -> Result<ar_invoices::Model, ApprovalError> {
        let invoice = self.fetch_for_approval(invoice_id).await?;
        let current = approval_to_core(&invoice.approval_status);

        let action =
            ApprovalService::reject(DocumentKind::ArInvoice, current, role, reject_reason)?;

        self.apply_approval_action(invoice, &action).await
    }

    /// Posts an approved invoice and writes its GL entry.
    ///
    /// The status update and the ledger entry are one transaction: if the
    /// entry fails the debit = credit check or is already posted, the
    /// invoice stays in its pre-posting state.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found, not approved, not in
    /// draft, the entry does not balance, an entry already exists, or the
    /// database operation fails.
    pub async fn post_invoice(
        &self,
        invoice_id: Uuid,
        posted_by: Uuid,
    ) -> Result<ar_invoices::Model, InvoiceError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        let invoice = ar_invoices::Entity::find_by_id(invoice_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?
            .ok_or_else(|| InvoiceError::NotFound(InvoiceId::from_uuid(invoice_id)))?;

        let status = invoice_status_to_core(&invoice.status);
        let approval = approval_to_core(&invoice.approval_status);

        let new_status = InvoiceService::post(status, approval)?;

        let totals = DocumentTotals {
            total_before_tax: invoice.total_before_tax,
            total_tax: invoice.total_tax,
            total_after_tax: invoice.total_after_tax,
        };
        let template = invoice_posting(InvoiceId::from_uuid(invoice.id), &invoice.invoice_no, &totals)?;

        LedgerRepository::insert_template(&txn, &template, posted_by).await?;

        let now = Utc::now().into();
        let mut active: ar_invoices::ActiveModel = invoice.into();
        active.status = Set(invoice_status_to_db(new_status));
        active.posted_at = Set(Some(now));
        active.posted_by = Set(Some(posted_by));
        active.updated_at = Set(now);

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?;

        Ok(updated)
    }

    /// Cancels a draft invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found, not in draft, or the
    /// update fails.
    pub async fn cancel_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<ar_invoices::Model, InvoiceError> {
        let invoice = ar_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))?
            .ok_or_else(|| InvoiceError::NotFound(InvoiceId::from_uuid(invoice_id)))?;

        let status = invoice_status_to_core(&invoice.status);
        let new_status = InvoiceService::cancel(status)?;

        let mut active: ar_invoices::ActiveModel = invoice.into();
        active.status = Set(invoice_status_to_db(new_status));
        active.updated_at = Set(Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| InvoiceError::Database(e.to_string()))
    }

    async fn fetch_for_approval(
        &self,
        invoice_id: Uuid,
    ) -> Result<ar_invoices::Model, ApprovalError> {
        ar_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await
            .map_err(|e| ApprovalError::Database(e.to_string()))?
            .ok_or(ApprovalError::DocumentNotFound {
                kind: DocumentKind::ArInvoice,
                id: invoice_id,
            })
    }

    async fn apply_approval_action(
        &self,
        invoice: ar_invoices::Model,
        action: &ApprovalAction,
    ) -> Result<ar_invoices::Model, ApprovalError> {
        let now = Utc::now().into();
        let mut active: ar_invoices::ActiveModel = invoice.into();

        match action {
            ApprovalAction::Submit {
                new_status,
                submitted_by,
                submitted_at,
            } => {
                active.approval_status = Set(approval_to_db(*new_status));
                active.submitted_at = Set(Some((*submitted_at).into()));
                active.submitted_by = Set(Some(*submitted_by));
                active.reject_reason = Set(None);
            }
            ApprovalAction::Approve {
                new_status,
                approved_by,
                approved_at,
            } => {
                active.approval_status = Set(approval_to_db(*new_status));
                active.approved_at = Set(Some((*approved_at).into()));
                active.approved_by = Set(Some(*approved_by));
            }
            ApprovalAction::Reject {
                new_status,
                reject_reason,
            } => {
                active.approval_status = Set(approval_to_db(*new_status));
                active.reject_reason = Set(Some(reject_reason.clone()));
            }
        }
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| ApprovalError::Database(e.to_string()))
    }
}
