//! `SeaORM` Entity for the ar_receipts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{
    AllocationStatus, ApprovalStatus, PaymentMethod, ReceiptStatus,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ar_receipts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub receipt_no: String,
    pub customer_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: ReceiptStatus,
    pub approval_status: ApprovalStatus,
    /// Derived from sum(allocations) vs amount after every allocation.
    pub allocation_status: AllocationStatus,
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
        belongs_to = "super::partners::Entity",
        from = "Column::CustomerId",
        to = "super::partners::Column::Id"
    )]
    Partners,
    #[sea_orm(has_many = "super::ar_receipt_allocations::Entity")]
    ArReceiptAllocations,
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partners.def()
    }
}

impl Related<super::ar_receipt_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArReceiptAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
