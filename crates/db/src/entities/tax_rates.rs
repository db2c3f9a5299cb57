//! `SeaORM` Entity for the tax_rates table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    /// Rate as a fraction (0.10 = 10%).
    pub rate: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_order_lines::Entity")]
    SaleOrderLines,
    #[sea_orm(has_many = "super::ar_invoice_lines::Entity")]
    ArInvoiceLines,
}

impl Related<super::sale_order_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleOrderLines.def()
    }
}

impl Related<super::ar_invoice_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArInvoiceLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
