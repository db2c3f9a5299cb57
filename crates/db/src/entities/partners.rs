//! `SeaORM` Entity for the partners table (customers and vendors).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "partners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub tax_code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_customer: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_orders::Entity")]
    SaleOrders,
    #[sea_orm(has_many = "super::ar_invoices::Entity")]
    ArInvoices,
    #[sea_orm(has_many = "super::ar_receipts::Entity")]
    ArReceipts,
}

impl Related<super::sale_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleOrders.def()
    }
}

impl Related<super::ar_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArInvoices.def()
    }
}

impl Related<super::ar_receipts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArReceipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
