//! `SeaORM` Entity for the ar_receipt_allocations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ar_receipt_allocations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub receipt_id: Uuid,
    pub invoice_id: Uuid,
    pub applied_amount: Decimal,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ar_receipts::Entity",
        from = "Column::ReceiptId",
        to = "super::ar_receipts::Column::Id"
    )]
    ArReceipts,
    #[sea_orm(
        belongs_to = "super::ar_invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::ar_invoices::Column::Id"
    )]
    ArInvoices,
}

impl Related<super::ar_receipts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArReceipts.def()
    }
}

impl Related<super::ar_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
