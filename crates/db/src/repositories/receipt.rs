//! AR receipt repository: creation, workflow transitions, posting, and the
//! allocation engine's persistence side.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use kontor_core::approval::{
    ApprovalAction, ApprovalError, ApprovalService, ApprovalStatus, DocumentKind, UserRole,
};
use kontor_core::ledger::receipt_posting;
use kontor_core::receipt::{
    AllocationEngine, AllocationError, AllocationRequest, OpenInvoice, PaymentMethod,
    ReceiptError, ReceiptService, ReceiptSnapshot,
};
use kontor_shared::types::{InvoiceId, PartnerId, ReceiptId};

use crate::entities::{ar_invoices, ar_receipt_allocations, ar_receipts, partners};
use crate::repositories::convert::{
    allocation_status_to_db, approval_to_core, approval_to_db, invoice_status_to_core,
    invoice_status_to_db, payment_method_to_db, receipt_status_to_core, receipt_status_to_db,
};
use crate::repositories::ledger::LedgerRepository;
use crate::repositories::sequence::{AR_RECEIPT_NO_SEQ, next_document_number};

/// Input for recording a receipt.
#[derive(Debug, Clone)]
pub struct CreateReceiptInput {
    /// The paying customer.
    pub customer_id: Uuid,
    /// The payment amount.
    pub amount: Decimal,
    /// The payment method.
    pub method: PaymentMethod,
    /// The user recording the receipt.
    pub created_by: Uuid,
}

/// Filter options for listing receipts.
#[derive(Debug, Clone, Default)]
pub struct ReceiptFilter {
    /// Filter by operational status.
    pub status: Option<kontor_core::receipt::ReceiptStatus>,
    /// Filter by allocation status.
    pub allocation_status: Option<kontor_core::receipt::AllocationStatus>,
    /// Filter by customer.
    pub customer_id: Option<Uuid>,
}

/// A receipt with its allocations.
#[derive(Debug, Clone)]
pub struct ReceiptWithAllocations {
    /// Receipt header.
    pub receipt: ar_receipts::Model,
    /// Allocation rows.
    pub allocations: Vec<ar_receipt_allocations::Model>,
}

/// AR receipt repository.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    db: DatabaseConnection,
}

impl ReceiptRepository {
    /// Creates a new receipt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a draft receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive, the customer does
    /// not exist, or the database operation fails.
    pub async fn create_receipt(
        &self,
        input: CreateReceiptInput,
    ) -> Result<ar_receipts::Model, ReceiptError> {
        ReceiptService::validate_amount(input.amount)?;

        let customer = partners::Entity::find_by_id(input.customer_id)
            .filter(partners::Column::IsCustomer.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?
            .ok_or_else(|| ReceiptError::CustomerNotFound(PartnerId::from_uuid(input.customer_id)))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        let receipt_no = next_document_number(&txn, AR_RECEIPT_NO_SEQ, "RC")
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        let now = Utc::now().into();

        let receipt = ar_receipts::ActiveModel {
            id: Set(Uuid::new_v4()),
            receipt_no: Set(receipt_no),
            customer_id: Set(customer.id),
            amount: Set(input.amount),
            method: Set(payment_method_to_db(input.method)),
            status: Set(receipt_status_to_db(
                kontor_core::receipt::ReceiptStatus::Draft,
            )),
            approval_status: Set(approval_to_db(ApprovalStatus::Draft)),
            allocation_status: Set(allocation_status_to_db(
                kontor_core::receipt::AllocationStatus::Unallocated,
            )),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let receipt = receipt
            .insert(&txn)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        Ok(receipt)
    }

    /// Lists receipts with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_receipts(
        &self,
        filter: ReceiptFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ar_receipts::Model>, u64), ReceiptError> {
        let mut query = ar_receipts::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(ar_receipts::Column::Status.eq(receipt_status_to_db(status)));
        }
        if let Some(allocation) = filter.allocation_status {
            query = query
                .filter(ar_receipts::Column::AllocationStatus.eq(allocation_status_to_db(allocation)));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(ar_receipts::Column::CustomerId.eq(customer_id));
        }

        let paginator = query
            .order_by_desc(ar_receipts::Column::CreatedAt)
            .paginate(&self.db, per_page.max(1));

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;
        let receipts = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        Ok((receipts, total))
    }

    /// Gets a receipt by ID with its allocations.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is not found or the query fails.
    pub async fn get_receipt(
        &self,
        receipt_id: Uuid,
    ) -> Result<ReceiptWithAllocations, ReceiptError> {
        let receipt = ar_receipts::Entity::find_by_id(receipt_id)
            .one(&self.db)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?
            .ok_or_else(|| ReceiptError::NotFound(ReceiptId::from_uuid(receipt_id)))?;

        let allocations = ar_receipt_allocations::Entity::find()
            .filter(ar_receipt_allocations::Column::ReceiptId.eq(receipt_id))
            .order_by_asc(ar_receipt_allocations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        Ok(ReceiptWithAllocations {
            receipt,
            allocations,
        })
    }

    /// Submits a draft or rejected receipt for approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is not found, the acting role may
    /// not submit receipts, the transition is invalid, or the update fails.
    pub async fn submit_receipt(
        &self,
        receipt_id: Uuid,
        role: UserRole,
        submitted_by: Uuid,
    ) -> Result<ar_receipts::Model, ApprovalError> {
        let receipt = self.fetch_for_approval(receipt_id).await?;
        let current = approval_to_core(&receipt.approval_status);

        let action = ApprovalService::submit(DocumentKind::ArReceipt, current, role, submitted_by)?;

        self.apply_approval_action(receipt, &action).await
    }

    /// Approves a waiting receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is not found, the acting role is not
    /// a designated approver, the transition is invalid, or the update
    /// fails.
    pub async fn approve_receipt(
        &self,
        receipt_id: Uuid,
        role: UserRole,
        approved_by: Uuid,
    ) -> Result<ar_receipts::Model, ApprovalError> {
        let receipt = self.fetch_for_approval(receipt_id).await?;
        let current = approval_to_core(&receipt.approval_status);

        let action = ApprovalService::approve(DocumentKind::ArReceipt, current, role, approved_by)?;

        self.apply_approval_action(receipt, &action).await
    }

    /// Rejects a waiting receipt with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is not found, the acting role is not
    /// a designated approver, the reason is empty, the transition is
    /// invalid, or the update fails.
    pub async fn reject_receipt(
        &self,
        receipt_id: Uuid,
        role: UserRole,
        reject_reason: String,
    ) -> Result<ar_receipts::Model, ApprovalError> {
        let receipt = self.fetch_for_approval(receipt_id).await?;
        let current = approval_to_core(&receipt.approval_status);

        let action =
            ApprovalService::reject(DocumentKind::ArReceipt, current, role, reject_reason)?;

        self.apply_approval_action(receipt, &action).await
    }

    /// Posts an approved receipt and writes its GL entry (debit Cash,
    /// credit AR) in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is not found, not approved, not in
    /// draft, the entry does not balance, an entry already exists, or the
    /// database operation fails.
    pub async fn post_receipt(
        &self,
        receipt_id: Uuid,
        posted_by: Uuid,
    ) -> Result<ar_receipts::Model, ReceiptError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        let receipt = ar_receipts::Entity::find_by_id(receipt_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?
            .ok_or_else(|| ReceiptError::NotFound(ReceiptId::from_uuid(receipt_id)))?;

        let status = receipt_status_to_core(&receipt.status);
        let approval = approval_to_core(&receipt.approval_status);

        let new_status = ReceiptService::post(status, approval)?;

        let template = receipt_posting(
            ReceiptId::from_uuid(receipt.id),
            &receipt.receipt_no,
            receipt.amount,
        )?;
        LedgerRepository::insert_template(&txn, &template, posted_by).await?;

        let now = Utc::now().into();
        let mut active: ar_receipts::ActiveModel = receipt.into();
        active.status = Set(receipt_status_to_db(new_status));
        active.posted_at = Set(Some(now));
        active.posted_by = Set(Some(posted_by));
        active.updated_at = Set(now);

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        Ok(updated)
    }

    /// Cancels a draft receipt with no allocations.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is not found, already posted, has
    /// allocations, or the update fails.
    pub async fn cancel_receipt(
        &self,
        receipt_id: Uuid,
    ) -> Result<ar_receipts::Model, ReceiptError> {
        let receipt = ar_receipts::Entity::find_by_id(receipt_id)
            .one(&self.db)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?
            .ok_or_else(|| ReceiptError::NotFound(ReceiptId::from_uuid(receipt_id)))?;

        let allocated = self
            .sum_receipt_allocations_on(&self.db, receipt_id)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))?;

        let status = receipt_status_to_core(&receipt.status);
        let new_status = ReceiptService::cancel(status, allocated)?;

        let mut active: ar_receipts::ActiveModel = receipt.into();
        active.status = Set(receipt_status_to_db(new_status));
        active.updated_at = Set(Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| ReceiptError::Database(e.to_string()))
    }

    /// Allocates a receipt's amount across one or more invoices.
    ///
    /// The receipt row and every referenced invoice row are locked for the
    /// duration of the transaction (invoices in ID order, so two batches
    /// touching the same invoices cannot deadlock); the balance checks run
    /// against the locked rows and the allocation rows, receipt status, and
    /// any invoice `paid` transitions are written together. A validation
    /// failure persists nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is missing or not posted/approved,
    /// an invoice is missing, foreign, or closed, an amount is invalid, or
    /// the batch would over-allocate the receipt or an invoice.
    pub async fn allocate(
        &self,
        receipt_id: Uuid,
        batch: Vec<AllocationRequest>,
        created_by: Uuid,
    ) -> Result<ReceiptWithAllocations, AllocationError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AllocationError::Database(e.to_string()))?;

        let receipt = ar_receipts::Entity::find_by_id(receipt_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| AllocationError::Database(e.to_string()))?
            .ok_or_else(|| AllocationError::ReceiptNotFound(ReceiptId::from_uuid(receipt_id)))?;

        let allocated = self
            .sum_receipt_allocations_on(&txn, receipt_id)
            .await
            .map_err(|e| AllocationError::Database(e.to_string()))?;

        let snapshot = ReceiptSnapshot {
            id: ReceiptId::from_uuid(receipt.id),
            customer_id: PartnerId::from_uuid(receipt.customer_id),
            amount: receipt.amount,
            status: receipt_status_to_core(&receipt.status),
            approval_status: approval_to_core(&receipt.approval_status),
            allocated,
        };

        // Lock invoices in ID order to keep concurrent batches deadlock-free
        let mut invoice_ids: Vec<Uuid> = batch.iter().map(|a| a.invoice_id.into_inner()).collect();
        invoice_ids.sort_unstable();
        invoice_ids.dedup();

        let mut open_invoices = Vec::with_capacity(invoice_ids.len());
        for invoice_id in &invoice_ids {
            let Some(invoice) = ar_invoices::Entity::find_by_id(*invoice_id)
                .lock_exclusive()
                .one(&txn)
                .await
                .map_err(|e| AllocationError::Database(e.to_string()))?
            else {
                // Let the engine report it in validation order
                continue;
            };

            let invoice_allocated = self
                .sum_invoice_allocations(&txn, *invoice_id)
                .await
                .map_err(|e| AllocationError::Database(e.to_string()))?;

            open_invoices.push(OpenInvoice {
                id: InvoiceId::from_uuid(invoice.id),
                customer_id: PartnerId::from_uuid(invoice.customer_id),
                total_after_tax: invoice.total_after_tax,
                allocated: invoice_allocated,
                status: invoice_status_to_core(&invoice.status),
            });
        }

        let outcome = AllocationEngine::validate_batch(&snapshot, &open_invoices, &batch)?;

        let now = Utc::now().into();
        let mut rows = Vec::with_capacity(batch.len());
        for request in &batch {
            let model = ar_receipt_allocations::ActiveModel {
                id: Set(Uuid::new_v4()),
                receipt_id: Set(receipt_id),
                invoice_id: Set(request.invoice_id.into_inner()),
                applied_amount: Set(request.applied_amount),
                created_by: Set(created_by),
                created_at: Set(now),
            };
            rows.push(
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| AllocationError::Database(e.to_string()))?,
            );
        }

        // Derived status is recomputed through the single core function
        let mut active: ar_receipts::ActiveModel = receipt.into();
        active.allocation_status = Set(allocation_status_to_db(outcome.allocation_status));
        active.updated_at = Set(now);
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| AllocationError::Database(e.to_string()))?;

        // Invoices fully covered by this batch become paid
        for invoice_id in &outcome.paid_invoices {
            let invoice = ar_invoices::Entity::find_by_id(invoice_id.into_inner())
                .one(&txn)
                .await
                .map_err(|e| AllocationError::Database(e.to_string()))?
                .ok_or(AllocationError::InvoiceNotFound(*invoice_id))?;

            let mut active: ar_invoices::ActiveModel = invoice.into();
            active.status = Set(invoice_status_to_db(
                kontor_core::invoice::InvoiceStatus::Paid,
            ));
            active.updated_at = Set(now);
            active
                .update(&txn)
                .await
                .map_err(|e| AllocationError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AllocationError::Database(e.to_string()))?;

        debug!(
            receipt_id = %receipt_id,
            rows = rows.len(),
            remainder = %outcome.remainder,
            "Allocation batch persisted"
        );

        Ok(ReceiptWithAllocations {
            receipt: updated,
            allocations: rows,
        })
    }

    async fn sum_receipt_allocations_on<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        receipt_id: Uuid,
    ) -> Result<Decimal, sea_orm::DbErr> {
        let allocations = ar_receipt_allocations::Entity::find()
            .filter(ar_receipt_allocations::Column::ReceiptId.eq(receipt_id))
            .all(conn)
            .await?;
        Ok(allocations.iter().map(|a| a.applied_amount).sum())
    }

    async fn sum_invoice_allocations(
        &self,
        txn: &DatabaseTransaction,
        invoice_id: Uuid,
    ) -> Result<Decimal, sea_orm::DbErr> {
        let allocations = ar_receipt_allocations::Entity::find()
            .filter(ar_receipt_allocations::Column::InvoiceId.eq(invoice_id))
            .all(txn)
            .await?;
        Ok(allocations.iter().map(|a| a.applied_amount).sum())
    }

    async fn fetch_for_approval(
        &self,
        receipt_id: Uuid,
    ) -> Result<ar_receipts::Model, ApprovalError> {
        ar_receipts::Entity::find_by_id(receipt_id)
            .one(&self.db)
            .await
            .map_err(|e| ApprovalError::Database(e.to_string()))?
            .ok_or(ApprovalError::DocumentNotFound {
                kind: DocumentKind::ArReceipt,
                id: receipt_id,
            })
    }

    async fn apply_approval_action(
        &self,
        receipt: ar_receipts::Model,
        action: &ApprovalAction,
    ) -> Result<ar_receipts::Model, ApprovalError> {
        let now = Utc::now().into();
        let mut active: ar_receipts::ActiveModel = receipt.into();

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
