//! `SeaORM` Entity for the gl_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::GlReferenceType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gl_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub entry_no: String,
    /// (reference_type, reference_id, purpose) is unique so a retried
    /// posting cannot produce a second entry.
    pub reference_type: GlReferenceType,
    pub reference_id: Uuid,
    pub purpose: String,
    pub description: String,
    pub posted_by: Uuid,
    pub posted_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gl_entry_lines::Entity")]
    GlEntryLines,
}

impl Related<super::gl_entry_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GlEntryLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
