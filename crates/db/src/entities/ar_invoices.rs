//! `SeaORM` Entity for the ar_invoices table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ApprovalStatus, InvoiceStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ar_invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub invoice_no: String,
    /// At most one invoice per order, enforced by a unique index.
    #[sea_orm(unique)]
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub status: InvoiceStatus,
    pub approval_status: ApprovalStatus,
    pub total_before_tax: Decimal,
    pub total_tax: Decimal,
    pub total_after_tax: Decimal,
    pub submitted_at: Option<DateTimeWithTimeZone>,
    pub submitted_by: Option<Uuid>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub approved_by: Option<Uuid>,
    pub reject_reason: Option<String>,
    pub posted_at: Option<DateTimeWithTimeZone>,
    pub posted_by: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale_orders::Entity",
        from = "Column::OrderId",
        to = "super::sale_orders::Column::Id"
    )]
    SaleOrders,
    #[sea_orm(
        belongs_to = "super::partners::Entity",
        from = "Column::CustomerId",
        to = "super::partners::Column::Id"
    )]
    Partners,
    #[sea_orm(has_many = "super::ar_invoice_lines::Entity")]
    ArInvoiceLines,
    #[sea_orm(has_many = "super::ar_receipt_allocations::Entity")]
    ArReceiptAllocations,
}

impl Related<super::sale_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleOrders.def()
    }
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partners.def()
    }
}

impl Related<super::ar_invoice_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArInvoiceLines.def()
    }
}

impl Related<super::ar_receipt_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArReceiptAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
