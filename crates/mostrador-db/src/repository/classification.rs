//! # Classification Repository
//!
//! Database operations for the classification hierarchy: business lines,
//! product families, brands, attribute values and attribute labels.
//!
//! ## Get-or-Create Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 How the Resolver Works                              │
//! │                                                                     │
//! │  resolve(Brand, "la serenísima")                                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SELECT id FROM brands WHERE name = ? COLLATE NOCASE                │
//! │       │                                                             │
//! │       ├── found ──────────────────────────► return existing id      │
//! │       │                                                             │
//! │       ▼ not found                                                   │
//! │  INSERT INTO brands (name) VALUES ('la serenísima')                 │
//! │       │                                                             │
//! │       ├── ok ─────────────────────────────► return new id           │
//! │       │                                                             │
//! │       ▼ UNIQUE constraint failed                                    │
//! │  A concurrent writer created the value between our SELECT and       │
//! │  INSERT. Re-read once and return the id it got.                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are matched case-insensitively but stored in the casing the
//! user submitted ("Coca Cola" wins over a later "coca cola", which just
//! resolves to the existing row).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use mostrador_core::validation::validate_classification_name;
use mostrador_core::{AttributeLabels, BusinessLine, CoreError, ProductFamily};

// =============================================================================
// Dimension
// =============================================================================

/// A classification dimension the get-or-create resolver can target.
///
/// Product families are deliberately absent: a family needs a parent
/// business line, so it is created through [`ClassificationRepository::create_family`]
/// instead of the generic value-to-id resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    BusinessLine,
    Brand,
    AttributeValue,
}

impl Dimension {
    /// Backing table name.
    const fn table(self) -> &'static str {
        match self {
            Dimension::BusinessLine => "business_lines",
            Dimension::Brand => "brands",
            Dimension::AttributeValue => "attribute_values",
        }
    }

    /// The unique value column within the table.
    const fn column(self) -> &'static str {
        match self {
            Dimension::BusinessLine => "name",
            Dimension::Brand => "name",
            Dimension::AttributeValue => "value",
        }
    }

    /// Field name used in validation error messages.
    const fn field(self) -> &'static str {
        match self {
            Dimension::BusinessLine => "business line",
            Dimension::Brand => "brand",
            Dimension::AttributeValue => "attribute value",
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for classification tables.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ClassificationRepository::new(pool);
///
/// let brand_id = repo.resolve(Dimension::Brand, "La Serenísima").await?;
/// let families = repo.families_for_business_line(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ClassificationRepository {
    pool: SqlitePool,
}

impl ClassificationRepository {
    /// Creates a new ClassificationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClassificationRepository { pool }
    }

    /// Maps a free-text classification value to its stable identifier,
    /// creating the row on first use.
    ///
    /// ## Behavior
    /// - The value is trimmed and must be non-empty (validation error
    ///   otherwise; nothing is persisted)
    /// - Lookup is case-insensitive against the dimension's unique column
    /// - On miss, the value is inserted in its original casing
    /// - A unique-constraint failure on insert means a concurrent writer
    ///   got there first; the resolver re-reads exactly once and returns
    ///   the existing id instead of surfacing the error
    ///
    /// Calling twice with the same value (any casing) returns the same
    /// id and leaves exactly one row behind.
    pub async fn resolve(&self, dimension: Dimension, value: &str) -> DbResult<i64> {
        let value = validate_classification_name(value, dimension.field())?;

        if let Some(id) = self.lookup(dimension, value).await? {
            debug!(table = dimension.table(), value = %value, id, "Resolved existing value");
            return Ok(id);
        }

        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES (?1)",
            dimension.table(),
            dimension.column()
        );

        match sqlx::query(&insert_sql).bind(value).execute(&self.pool).await {
            Ok(result) => {
                let id = result.last_insert_rowid();
                debug!(table = dimension.table(), value = %value, id, "Created new value");
                Ok(id)
            }
            Err(err) => {
                let err = DbError::from(err);
                if !err.is_unique_violation() {
                    return Err(err);
                }

                // Lost the insert race; the row exists now.
                debug!(table = dimension.table(), value = %value, "Insert raced, re-reading");
                match self.lookup(dimension, value).await? {
                    Some(id) => Ok(id),
                    // Re-read after a duplicate-key failure found nothing:
                    // the winner was rolled back or deleted in between.
                    // One retry only - surface the original failure.
                    None => Err(err),
                }
            }
        }
    }

    /// Case-insensitive id lookup, no creation.
    async fn lookup(&self, dimension: Dimension, value: &str) -> DbResult<Option<i64>> {
        let sql = format!(
            "SELECT id FROM {} WHERE {} = ?1 COLLATE NOCASE",
            dimension.table(),
            dimension.column()
        );

        let id: Option<i64> = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }

    // =========================================================================
    // Ancestor Resolution
    // =========================================================================

    /// Resolves the business line a family belongs to.
    ///
    /// ## Errors
    /// `CoreError::MissingAncestor` when the family does not exist or its
    /// business-line reference is NULL (parent was deleted). Such a
    /// family cannot be SKU-encoded until an operator reassigns it.
    pub async fn business_line_for_family(&self, family_id: i64) -> DbResult<i64> {
        let row: Option<Option<i64>> =
            sqlx::query_scalar("SELECT business_line_id FROM product_families WHERE id = ?1")
                .bind(family_id)
                .fetch_optional(&self.pool)
                .await?;

        match row.flatten() {
            Some(business_line_id) => Ok(business_line_id),
            None => Err(CoreError::MissingAncestor { family_id }.into()),
        }
    }

    // =========================================================================
    // Families
    // =========================================================================

    /// Creates a product family under a business line.
    ///
    /// Families are the one dimension with a parent, so they do not go
    /// through [`resolve`](Self::resolve); a duplicate name is an error
    /// here, not a silent get.
    pub async fn create_family(&self, business_line_id: i64, name: &str) -> DbResult<ProductFamily> {
        let name = validate_classification_name(name, "family")?;

        debug!(business_line_id, name = %name, "Creating product family");

        let result =
            sqlx::query("INSERT INTO product_families (business_line_id, name) VALUES (?1, ?2)")
                .bind(business_line_id)
                .bind(name)
                .execute(&self.pool)
                .await?;

        Ok(ProductFamily {
            id: result.last_insert_rowid(),
            business_line_id: Some(business_line_id),
            name: name.to_string(),
        })
    }

    /// Lists the families of a business line, sorted by name, for
    /// cascading selection (pick a business line, then one of its
    /// families).
    pub async fn families_for_business_line(
        &self,
        business_line_id: i64,
    ) -> DbResult<Vec<ProductFamily>> {
        let families = sqlx::query_as::<_, ProductFamily>(
            r#"
            SELECT id, business_line_id, name
            FROM product_families
            WHERE business_line_id = ?1
            ORDER BY name
            "#,
        )
        .bind(business_line_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(families)
    }

    // =========================================================================
    // Attribute Labels
    // =========================================================================

    /// Returns the display labels for a family's two attribute slots.
    ///
    /// Falls back to the generic "Atributo 1" / "Atributo 2" when no
    /// definition row exists - labels are cosmetic and must never block
    /// SKU generation.
    pub async fn attribute_labels(&self, family_id: i64) -> DbResult<AttributeLabels> {
        let labels = sqlx::query_as::<_, AttributeLabels>(
            "SELECT label_1, label_2 FROM attribute_labels WHERE family_id = ?1",
        )
        .bind(family_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(labels.unwrap_or_default())
    }

    /// Sets (insert or update) the attribute labels for a family.
    /// Management-tooling path; the encoding path never writes labels.
    pub async fn set_attribute_labels(
        &self,
        family_id: i64,
        labels: &AttributeLabels,
    ) -> DbResult<()> {
        debug!(family_id, label_1 = %labels.label_1, label_2 = %labels.label_2, "Setting attribute labels");

        sqlx::query(
            r#"
            INSERT INTO attribute_labels (family_id, label_1, label_2)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(family_id) DO UPDATE SET
                label_1 = excluded.label_1,
                label_2 = excluded.label_2
            "#,
        )
        .bind(family_id)
        .bind(&labels.label_1)
        .bind(&labels.label_2)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Listings (selection UIs)
    // =========================================================================

    /// Lists all business lines, sorted by name.
    pub async fn list_business_lines(&self) -> DbResult<Vec<BusinessLine>> {
        let lines = sqlx::query_as::<_, BusinessLine>(
            "SELECT id, name FROM business_lines ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists all brands, sorted by name.
    pub async fn list_brands(&self) -> DbResult<Vec<mostrador_core::Brand>> {
        let brands =
            sqlx::query_as::<_, mostrador_core::Brand>("SELECT id, name FROM brands ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(brands)
    }

    /// Lists the attribute value pool, sorted by value.
    pub async fn list_attribute_values(&self) -> DbResult<Vec<mostrador_core::AttributeValue>> {
        let values = sqlx::query_as::<_, mostrador_core::AttributeValue>(
            "SELECT id, value FROM attribute_values ORDER BY value",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use mostrador_core::ValidationError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_resolve_creates_then_returns_same_id() {
        let db = test_db().await;
        let repo = db.classifications();

        let first = repo.resolve(Dimension::Brand, "ACME").await.unwrap();
        let second = repo.resolve(Dimension::Brand, "acme").await.unwrap();
        let third = repo.resolve(Dimension::Brand, "  AcMe  ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, third);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_resolve_preserves_submitted_casing() {
        let db = test_db().await;
        let repo = db.classifications();

        let id = repo.resolve(Dimension::Brand, "Coca Cola").await.unwrap();
        repo.resolve(Dimension::Brand, "COCA COLA").await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT name FROM brands WHERE id = ?1")
            .bind(id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stored, "Coca Cola");
    }

    #[tokio::test]
    async fn test_resolve_rejects_blank_values() {
        let db = test_db().await;
        let repo = db.classifications();

        let err = repo
            .resolve(Dimension::AttributeValue, "   ")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));

        // Nothing persisted.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attribute_values")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_resolve_recovers_when_row_appears_concurrently() {
        let db = test_db().await;
        let repo = db.classifications();

        // Simulate the losing side of the race: the row already exists
        // (as if another process inserted between SELECT and INSERT).
        // The storage-level NOCASE unique constraint is the backstop the
        // resolver recovers through.
        sqlx::query("INSERT INTO brands (name) VALUES ('Georgalos')")
            .execute(db.pool())
            .await
            .unwrap();

        let id = repo.resolve(Dimension::Brand, "GEORGALOS").await.unwrap();

        let expected: i64 = sqlx::query_scalar("SELECT id FROM brands WHERE name = 'Georgalos'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(id, expected);
    }

    #[tokio::test]
    async fn test_dimensions_are_independent() {
        let db = test_db().await;
        let repo = db.classifications();

        repo.resolve(Dimension::Brand, "Rojo").await.unwrap();
        repo.resolve(Dimension::AttributeValue, "Rojo").await.unwrap();

        let brands: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let values: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attribute_values")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!((brands, values), (1, 1));
    }

    #[tokio::test]
    async fn test_business_line_for_family() {
        let db = test_db().await;
        let repo = db.classifications();

        let bl = repo
            .resolve(Dimension::BusinessLine, "Alimentos")
            .await
            .unwrap();
        let family = repo.create_family(bl, "Lácteos").await.unwrap();

        assert_eq!(
            repo.business_line_for_family(family.id).await.unwrap(),
            bl
        );
    }

    #[tokio::test]
    async fn test_missing_family_has_no_ancestor() {
        let db = test_db().await;
        let repo = db.classifications();

        let err = repo.business_line_for_family(999).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::MissingAncestor { family_id: 999 })
        ));
    }

    #[tokio::test]
    async fn test_orphaned_family_has_no_ancestor() {
        let db = test_db().await;
        let repo = db.classifications();

        // Family whose business line was deleted (FK nulled the reference).
        sqlx::query("INSERT INTO product_families (business_line_id, name) VALUES (NULL, 'Huérfana')")
            .execute(db.pool())
            .await
            .unwrap();
        let family_id: i64 =
            sqlx::query_scalar("SELECT id FROM product_families WHERE name = 'Huérfana'")
                .fetch_one(db.pool())
                .await
                .unwrap();

        let err = repo.business_line_for_family(family_id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::MissingAncestor { .. })
        ));
    }

    #[tokio::test]
    async fn test_families_sorted_by_name() {
        let db = test_db().await;
        let repo = db.classifications();

        let bl = repo
            .resolve(Dimension::BusinessLine, "Alimentos")
            .await
            .unwrap();
        repo.create_family(bl, "Panificados").await.unwrap();
        repo.create_family(bl, "Bebidas").await.unwrap();
        repo.create_family(bl, "Lácteos").await.unwrap();

        let names: Vec<String> = repo
            .families_for_business_line(bl)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Bebidas", "Lácteos", "Panificados"]);
    }

    #[tokio::test]
    async fn test_attribute_labels_fall_back_to_defaults() {
        let db = test_db().await;
        let repo = db.classifications();

        let bl = repo
            .resolve(Dimension::BusinessLine, "Indumentaria")
            .await
            .unwrap();
        let family = repo.create_family(bl, "Remeras").await.unwrap();

        // No definition row yet: generic labels, not an error.
        let labels = repo.attribute_labels(family.id).await.unwrap();
        assert_eq!(labels.label_1, "Atributo 1");
        assert_eq!(labels.label_2, "Atributo 2");

        let custom = AttributeLabels {
            label_1: "Color".to_string(),
            label_2: "Talle".to_string(),
        };
        repo.set_attribute_labels(family.id, &custom).await.unwrap();
        assert_eq!(repo.attribute_labels(family.id).await.unwrap(), custom);

        // Upsert overwrites in place.
        let updated = AttributeLabels {
            label_1: "Color".to_string(),
            label_2: "Medida".to_string(),
        };
        repo.set_attribute_labels(family.id, &updated).await.unwrap();
        assert_eq!(repo.attribute_labels(family.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_listings_sorted() {
        let db = test_db().await;
        let repo = db.classifications();

        repo.resolve(Dimension::AttributeValue, "Rojo").await.unwrap();
        repo.resolve(Dimension::AttributeValue, "Azul").await.unwrap();
        repo.resolve(Dimension::AttributeValue, "Negro").await.unwrap();

        let values: Vec<String> = repo
            .list_attribute_values()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.value)
            .collect();
        assert_eq!(values, vec!["Azul", "Negro", "Rojo"]);
    }
}
