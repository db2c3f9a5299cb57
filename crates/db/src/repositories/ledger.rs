//! General ledger repository: entry persistence and queries.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use kontor_core::ledger::{EntryTemplate, LedgerError, validate_lines};

use crate::entities::{gl_entries, gl_entry_lines};
use crate::repositories::convert::{ledger_account_to_db, reference_type_to_db};
use crate::repositories::sequence::{GL_ENTRY_NO_SEQ, next_document_number};

/// A GL entry with its lines.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// Entry header.
    pub entry: gl_entries::Model,
    /// Entry lines.
    pub lines: Vec<gl_entry_lines::Model>,
}

/// General ledger repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a posting template inside an open transaction.
    ///
    /// The debit = credit invariant is re-verified here, immediately before
    /// the write; the (reference_type, reference_id, purpose) triple is
    /// checked so a retried posting surfaces as a conflict instead of a
    /// second entry. The unique index backs this check up at the schema
    /// level.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines do not balance, an entry already
    /// exists for the document and purpose, or the insert fails.
    pub async fn insert_template<C: ConnectionTrait>(
        conn: &C,
        template: &EntryTemplate,
        posted_by: Uuid,
    ) -> Result<gl_entries::Model, LedgerError> {
        validate_lines(&template.lines)?;

        let reference_type = reference_type_to_db(template.reference_type);

        let existing = gl_entries::Entity::find()
            .filter(gl_entries::Column::ReferenceType.eq(reference_type.clone()))
            .filter(gl_entries::Column::ReferenceId.eq(template.reference_id))
            .filter(gl_entries::Column::Purpose.eq(template.purpose))
            .one(conn)
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        if existing.is_some() {
            return Err(LedgerError::DuplicatePosting {
                reference_type: template.reference_type.as_str().to_string(),
                reference_id: template.reference_id,
                purpose: template.purpose.to_string(),
            });
        }

        let entry_no = next_document_number(conn, GL_ENTRY_NO_SEQ, "GL")
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        let now = Utc::now().into();
        let entry_id = Uuid::new_v4();

        let entry = gl_entries::ActiveModel {
            id: Set(entry_id),
            entry_no: Set(entry_no),
            reference_type: Set(reference_type),
            reference_id: Set(template.reference_id),
            purpose: Set(template.purpose.to_string()),
            description: Set(template.description.clone()),
            posted_by: Set(posted_by),
            posted_at: Set(now),
            created_at: Set(now),
        };

        let entry = entry
            .insert(conn)
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        for line in &template.lines {
            let model = gl_entry_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                entry_id: Set(entry_id),
                account: Set(ledger_account_to_db(line.account)),
                account_code: Set(line.account.code().to_string()),
                debit: Set(line.debit),
                credit: Set(line.credit),
                created_at: Set(now),
            };
            model
                .insert(conn)
                .await
                .map_err(|e| LedgerError::Database(e.to_string()))?;
        }

        Ok(entry)
    }

    /// Gets an entry by ID with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is not found or the query fails.
    pub async fn get_entry(&self, entry_id: Uuid) -> Result<EntryWithLines, LedgerError> {
        let entry = gl_entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?
            .ok_or(LedgerError::NotFound(entry_id))?;

        let lines = self.load_lines(entry_id).await?;

        Ok(EntryWithLines { entry, lines })
    }

    /// Finds the entry referencing a document, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_reference(
        &self,
        reference_type: kontor_core::ledger::ReferenceType,
        reference_id: Uuid,
    ) -> Result<Option<EntryWithLines>, LedgerError> {
        let entry = gl_entries::Entity::find()
            .filter(gl_entries::Column::ReferenceType.eq(reference_type_to_db(reference_type)))
            .filter(gl_entries::Column::ReferenceId.eq(reference_id))
            .one(&self.db)
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        match entry {
            Some(entry) => {
                let lines = self.load_lines(entry.id).await?;
                Ok(Some(EntryWithLines { entry, lines }))
            }
            None => Ok(None),
        }
    }

    /// Lists entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_entries(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<gl_entries::Model>, u64), LedgerError> {
        let paginator = gl_entries::Entity::find()
            .order_by_desc(gl_entries::Column::PostedAt)
            .paginate(&self.db, per_page.max(1));

        let total = paginator
            .num_items()
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;
        let entries = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        Ok((entries, total))
    }

    async fn load_lines(&self, entry_id: Uuid) -> Result<Vec<gl_entry_lines::Model>, LedgerError> {
        gl_entry_lines::Entity::find()
            .filter(gl_entry_lines::Column::EntryId.eq(entry_id))
            .order_by_asc(gl_entry_lines::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))
    }
}
