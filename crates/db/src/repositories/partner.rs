//! Partner repository: customer lookups for the order-to-cash flow.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::partners;

/// Partner repository for customer lookups.
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    db: DatabaseConnection,
}

impl PartnerRepository {
    /// Creates a new partner repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a partner by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<partners::Model>, DbErr> {
        partners::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a customer by ID; `None` for unknown partners and vendors.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_customer(&self, id: Uuid) -> Result<Option<partners::Model>, DbErr> {
        partners::Entity::find_by_id(id)
            .filter(partners::Column::IsCustomer.eq(true))
            .one(&self.db)
            .await
    }
}
