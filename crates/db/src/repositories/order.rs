//! Sale order repository: creation, queries, and workflow transitions.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use kontor_core::approval::{
    ApprovalAction, ApprovalError, ApprovalService, ApprovalStatus, DocumentKind, UserRole,
};
use kontor_core::order::{OrderError, OrderLine, OrderService, document_totals, price_line};
use kontor_shared::types::{OrderId, PartnerId, ProductId, TaxRateId};

use crate::entities::{partners, products, sale_order_lines, sale_orders, tax_rates};
use crate::repositories::convert::{approval_to_core, approval_to_db, order_status_to_core, order_status_to_db};
use crate::repositories::sequence::{SALE_ORDER_NO_SEQ, next_document_number};

/// Input for creating a sale order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// The ordering customer.
    pub customer_id: Uuid,
    /// The order lines.
    pub lines: Vec<CreateOrderLineInput>,
    /// The user creating the order.
    pub created_by: Uuid,
}

/// Input for a single order line.
#[derive(Debug, Clone)]
pub struct CreateOrderLineInput {
    /// The product being sold.
    pub product_id: Uuid,
    /// Quantity ordered.
    pub quantity: Decimal,
    /// Unit price; defaults to the product master price when absent.
    pub unit_price: Option<Decimal>,
    /// The tax rate applied to the line.
    pub tax_rate_id: Uuid,
}

/// Filter options for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Filter by operational status.
    pub status: Option<kontor_core::order::OrderStatus>,
    /// Filter by approval status.
    pub approval_status: Option<ApprovalStatus>,
    /// Filter by customer.
    pub customer_id: Option<Uuid>,
}

/// A sale order with its lines.
#[derive(Debug, Clone)]
pub struct OrderWithLines {
    /// Order header.
    pub order: sale_orders::Model,
    /// Order lines.
    pub lines: Vec<sale_order_lines::Model>,
}

/// Sale order repository.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: DatabaseConnection,
}

impl OrderRepository {
    /// Creates a new order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft sale order with lines.
    ///
    /// Line prices default to the product master price; tax rates are frozen
    /// onto the line at creation time. Totals are computed by summing the
    /// priced lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer, a product, or a tax rate does not
    /// exist, a line fails validation, or the database operation fails.
    pub async fn create_order(&self, input: CreateOrderInput) -> Result<OrderWithLines, OrderError> {
        // Resolve master data before opening the transaction
        let customer = partners::Entity::find_by_id(input.customer_id)
            .filter(partners::Column::IsCustomer.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?
            .ok_or_else(|| OrderError::CustomerNotFound(PartnerId::from_uuid(input.customer_id)))?;

        let mut core_lines = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let product = products::Entity::find_by_id(line.product_id)
                .one(&self.db)
                .await
                .map_err(|e| OrderError::Database(e.to_string()))?
                .ok_or_else(|| OrderError::ProductNotFound(ProductId::from_uuid(line.product_id)))?;

            let tax_rate = tax_rates::Entity::find_by_id(line.tax_rate_id)
                .one(&self.db)
                .await
                .map_err(|e| OrderError::Database(e.to_string()))?
                .ok_or_else(|| OrderError::TaxRateNotFound(TaxRateId::from_uuid(line.tax_rate_id)))?;

            core_lines.push(OrderLine {
                product_id: ProductId::from_uuid(product.id),
                quantity: line.quantity,
                unit_price: line.unit_price.unwrap_or(product.unit_price),
                tax_rate_id: TaxRateId::from_uuid(tax_rate.id),
                tax_rate: tax_rate.rate,
            });
        }

        OrderService::validate_lines(&core_lines)?;

        let mut priced = Vec::with_capacity(core_lines.len());
        for line in &core_lines {
            priced.push(price_line(line)?);
        }
        let totals = document_totals(&priced);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?;

        let order_no = next_document_number(&txn, SALE_ORDER_NO_SEQ, "SO")
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?;

        let now = Utc::now().into();
        let order_id = Uuid::new_v4();

        let order = sale_orders::ActiveModel {
            id: Set(order_id),
            order_no: Set(order_no),
            customer_id: Set(customer.id),
            status: Set(order_status_to_db(kontor_core::order::OrderStatus::Draft)),
            approval_status: Set(approval_to_db(ApprovalStatus::Draft)),
            total_before_tax: Set(totals.total_before_tax),
            total_tax: Set(totals.total_tax),
            total_after_tax: Set(totals.total_after_tax),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let order = order
            .insert(&txn)
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?;

        let mut lines = Vec::with_capacity(priced.len());
        for line in &priced {
            let model = sale_order_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                product_id: Set(line.line.product_id.into_inner()),
                quantity: Set(line.line.quantity),
                unit_price: Set(line.line.unit_price),
                tax_rate_id: Set(line.line.tax_rate_id.into_inner()),
                tax_rate: Set(line.line.tax_rate),
                line_total: Set(line.line_total),
                line_total_after_tax: Set(line.line_total_after_tax),
                created_at: Set(now),
            };
            lines.push(
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| OrderError::Database(e.to_string()))?,
            );
        }

        txn.commit()
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?;

        Ok(OrderWithLines { order, lines })
    }

    /// Lists orders with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_orders(
        &self,
        filter: OrderFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<sale_orders::Model>, u64), OrderError> {
        let mut query = sale_orders::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(sale_orders::Column::Status.eq(order_status_to_db(status)));
        }
        if let Some(approval) = filter.approval_status {
            query = query.filter(sale_orders::Column::ApprovalStatus.eq(approval_to_db(approval)));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(sale_orders::Column::CustomerId.eq(customer_id));
        }

        let paginator = query
            .order_by_desc(sale_orders::Column::CreatedAt)
            .paginate(&self.db, per_page.max(1));

        let total = paginator
            .num_items()
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?;
        let orders = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?;

        Ok((orders, total))
    }

    /// Gets an order by ID with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the query fails.
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderWithLines, OrderError> {
        let order = sale_orders::Entity::find_by_id(order_id)
            .one(&self.db)
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?
            .ok_or_else(|| OrderError::NotFound(OrderId::from_uuid(order_id)))?;

        let lines = sale_order_lines::Entity::find()
            .filter(sale_order_lines::Column::OrderId.eq(order_id))
            .order_by_asc(sale_order_lines::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?;

        Ok(OrderWithLines { order, lines })
    }

    /// Submits a draft or rejected order for approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found, the acting role may not
    /// submit orders, the transition is invalid, or the update fails.
    pub async fn submit_order(
        &self,
        order_id: Uuid,
        role: UserRole,
        submitted_by: Uuid,
    ) -> Result<sale_orders::Model, ApprovalError> {
        let order = self.fetch_for_approval(order_id).await?;
        let current = approval_to_core(&order.approval_status);

        let action = ApprovalService::submit(DocumentKind::SaleOrder, current, role, submitted_by)?;

        self.apply_approval_action(order, &action).await
    }

    /// Approves a waiting order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found, the acting role is not a
    /// designated approver, the transition is invalid, or the update fails.
    pub async fn approve_order(
        &self,
        order_id: Uuid,
        role: UserRole,
        approved_by: Uuid,
    ) -> Result<sale_orders::Model, ApprovalError> {
        let order = self.fetch_for_approval(order_id).await?;
        let current = approval_to_core(&order.approval_status);

        let action = ApprovalService::approve(DocumentKind::SaleOrder, current, role, approved_by)?;

        self.apply_approval_action(order, &action).await
    }

    /// Rejects a waiting order with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found, the acting role is not a
    /// designated approver, the reason is empty, the transition is invalid,
    /// or the update fails.
    pub async fn reject_order(
        &self,
        order_id: Uuid,
        role: UserRole,
        reject_reason: String,
    ) -> Result<sale_orders::Model, ApprovalError> {
        let order = self.fetch_for_approval(order_id).await?;
        let current = approval_to_core(&order.approval_status);

        let action =
            ApprovalService::reject(DocumentKind::SaleOrder, current, role, reject_reason)?;

        self.apply_approval_action(order, &action).await
    }

    /// Confirms an approved draft order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found, not approved, not in
    /// draft, or the update fails.
    pub async fn confirm_order(&self, order_id: Uuid) -> Result<sale_orders::Model, OrderError> {
        self.apply_status_transition(order_id, |status, approval| {
            OrderService::confirm(status, approval)
        })
        .await
    }

    /// Marks a confirmed order as shipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found, not confirmed, or the
    /// update fails.
    pub async fn ship_order(&self, order_id: Uuid) -> Result<sale_orders::Model, OrderError> {
        self.apply_status_transition(order_id, |status, _| OrderService::ship(status))
            .await
    }

    /// Marks a shipped order as completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found, not shipped, or the
    /// update fails.
    pub async fn complete_order(&self, order_id: Uuid) -> Result<sale_orders::Model, OrderError> {
        self.apply_status_transition(order_id, |status, _| OrderService::complete(status))
            .await
    }

    /// Cancels an order before shipment.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found, already shipped, or the
    /// update fails.
    pub async fn cancel_order(&self, order_id: Uuid) -> Result<sale_orders::Model, OrderError> {
        self.apply_status_transition(order_id, |status, _| OrderService::cancel(status))
            .await
    }

    async fn fetch_for_approval(&self, order_id: Uuid) -> Result<sale_orders::Model, ApprovalError> {
        sale_orders::Entity::find_by_id(order_id)
            .one(&self.db)
            .await
            .map_err(|e| ApprovalError::Database(e.to_string()))?
            .ok_or(ApprovalError::DocumentNotFound {
                kind: DocumentKind::SaleOrder,
                id: order_id,
            })
    }

    async fn apply_approval_action(
        &self,
        order: sale_orders::Model,
        action: &ApprovalAction,
    ) -> Result<sale_orders::Model, ApprovalError> {
        let now = Utc::now().into();
        let mut active: sale_orders::ActiveModel = order.into();

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

    async fn apply_status_transition<F>(
        &self,
        order_id: Uuid,
        transition: F,
    ) -> Result<sale_orders::Model, OrderError>
    where
        F: FnOnce(
            kontor_core::order::OrderStatus,
            ApprovalStatus,
        ) -> Result<kontor_core::order::OrderStatus, OrderError>,
    {
        let order = sale_orders::Entity::find_by_id(order_id)
            .one(&self.db)
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?
            .ok_or_else(|| OrderError::NotFound(OrderId::from_uuid(order_id)))?;

        let status = order_status_to_core(&order.status);
        let approval = approval_to_core(&order.approval_status);

        let new_status = transition(status, approval)?;

        let mut active: sale_orders::ActiveModel = order.into();
        active.status = Set(order_status_to_db(new_status));
        active.updated_at = Set(Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| OrderError::Database(e.to_string()))
    }
}

/// Loads an order's lines inside an open transaction, converting them to
/// core order lines. Used by invoice creation.
pub(crate) async fn load_core_lines(
    txn: &DatabaseTransaction,
    order_id: Uuid,
) -> Result<Vec<OrderLine>, sea_orm::DbErr> {
    let lines = sale_order_lines::Entity::find()
        .filter(sale_order_lines::Column::OrderId.eq(order_id))
        .order_by_asc(sale_order_lines::Column::CreatedAt)
        .all(txn)
        .await?;

    Ok(lines
        .into_iter()
        .map(|l| OrderLine {
            product_id: ProductId::from_uuid(l.product_id),
            quantity: l.quantity,
            unit_price: l.unit_price,
            tax_rate_id: TaxRateId::from_uuid(l.tax_rate_id),
            tax_rate: l.tax_rate,
        })
        .collect())
}
