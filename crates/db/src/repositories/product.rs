//! Product and tax-rate repositories: master-data lookups used when
//! entering order lines.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use uuid::Uuid;

use crate::entities::{products, tax_rates};

/// Product repository for lookups.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<products::Model>, DbErr> {
        products::Entity::find_by_id(id).one(&self.db).await
    }
}

/// Tax rate repository for lookups.
#[derive(Debug, Clone)]
pub struct TaxRateRepository {
    db: DatabaseConnection,
}

impl TaxRateRepository {
    /// Creates a new tax rate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a tax rate by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<tax_rates::Model>, DbErr> {
        tax_rates::Entity::find_by_id(id).one(&self.db).await
    }
}
