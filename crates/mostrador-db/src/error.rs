//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  DbError (this module) ← categorized by constraint type             │
//! │       │                                                             │
//! │       ├── UniqueViolation on a classification insert is the one     │
//! │       │   TRANSIENT case: the resolver re-reads and recovers        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Everything else propagates to the caller and aborts the            │
//! │  in-progress save (no partial commits)                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use mostrador_core::CoreError;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - A concurrent resolver created the same classification value
    ///   first (the benign race - callers re-read and recover)
    /// - Inserting a duplicate barcode
    #[error("duplicate value for {constraint}")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Associating a SKU with classification ids that do not exist
    /// - Recording a sale line for a missing product
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Domain-level failure surfaced through the data layer
    /// (missing ancestor, SKU overflow, input validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal database error.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Whether this error is a unique-constraint violation - the signal
    /// the get-or-create resolver treats as "someone else just created
    /// it" and recovers from by re-reading.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → classified by SQLite message
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // UNIQUE: "UNIQUE constraint failed: <table>.<column>"
                // FK:     "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let constraint = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation { constraint }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<mostrador_core::ValidationError> for DbError {
    fn from(err: mostrador_core::ValidationError) -> Self {
        DbError::Core(CoreError::Validation(err))
    }
}

impl From<mostrador_core::SkuError> for DbError {
    fn from(err: mostrador_core::SkuError) -> Self {
        DbError::Core(CoreError::Sku(err))
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        let err = DbError::UniqueViolation {
            constraint: "brands.name".to_string(),
        };
        assert!(err.is_unique_violation());
        assert!(!DbError::PoolExhausted.is_unique_violation());
    }

    #[test]
    fn test_core_error_passes_through() {
        let err: DbError = CoreError::MissingAncestor { family_id: 9 }.into();
        assert_eq!(
            err.to_string(),
            "family 9 has no business line assigned; cannot encode a SKU"
        );
    }
}
