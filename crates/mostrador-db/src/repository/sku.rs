//! # SKU Repository
//!
//! SKU generation, association and reverse classification lookup.
//!
//! ## Generation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   From Form Input to Stored SKU                     │
//! │                                                                     │
//! │  resolve("La Serenísima") ─► brand_id      = 12   (get-or-create)   │
//! │  resolve("Blanco")        ─► attribute_1   = 7                      │
//! │  resolve("1L")            ─► attribute_2   = 150                    │
//! │  family picked in form    ─► family_id     = 3                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  generate(3, 12, 7, 150)                                            │
//! │    1. ancestor lookup: family 3 → business line 1                   │
//! │    2. pure encode:     "010301207150"   (mostrador-core)            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  associate("010301207150", 3, 12, 7, 150)                           │
//! │    INSERT OR IGNORE ─ re-associating an existing SKU is a no-op,    │
//! │    because different barcodes legitimately share one SKU            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  product row saved with sku = "010301207150"                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::classification::ClassificationRepository;
use mostrador_core::{ProductSku, Sku, SkuBreakdown, SkuComponents};

/// Repository for SKU generation and the product_skus association table.
#[derive(Debug, Clone)]
pub struct SkuRepository {
    pool: SqlitePool,
}

impl SkuRepository {
    /// Creates a new SkuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SkuRepository { pool }
    }

    /// Generates the canonical 12-digit SKU for a classification tuple.
    ///
    /// ## Steps
    /// 1. Resolve the family's business line (fails with a missing-ancestor
    ///    error when the family is absent or orphaned)
    /// 2. Encode the five-id tuple (fails with a field overflow when any
    ///    id exceeds its digit-width ceiling)
    ///
    /// Persists nothing - callers decide when to [`associate`](Self::associate).
    pub async fn generate(
        &self,
        family_id: i64,
        brand_id: i64,
        attribute_1_id: i64,
        attribute_2_id: i64,
    ) -> DbResult<Sku> {
        let business_line_id = ClassificationRepository::new(self.pool.clone())
            .business_line_for_family(family_id)
            .await?;

        let sku = SkuComponents {
            business_line_id,
            family_id,
            brand_id,
            attribute_1_id,
            attribute_2_id,
        }
        .encode()?;

        debug!(sku = %sku, family_id, brand_id, "Generated SKU");
        Ok(sku)
    }

    /// Persists the association between a SKU and the classification ids
    /// that produced it.
    ///
    /// ## Idempotency
    /// `INSERT OR IGNORE`: if the SKU row already exists the call is a
    /// no-op - never an error, never a duplicate row. Distinct inventory
    /// items (different supplier barcodes) legitimately share one SKU.
    ///
    /// ## Errors
    /// A foreign-key violation when any referenced classification id does
    /// not exist. The surrounding product save must treat that as fatal.
    pub async fn associate(
        &self,
        sku: &Sku,
        family_id: i64,
        brand_id: i64,
        attribute_1_id: i64,
        attribute_2_id: i64,
    ) -> DbResult<()> {
        debug!(sku = %sku, "Associating SKU with classification");

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO product_skus
                (sku, family_id, brand_id, attribute_1_id, attribute_2_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(sku)
        .bind(family_id)
        .bind(brand_id)
        .bind(attribute_1_id)
        .bind(attribute_2_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets the stored association row for a SKU.
    pub async fn get(&self, sku: &Sku) -> DbResult<Option<ProductSku>> {
        let row = sqlx::query_as::<_, ProductSku>(
            r#"
            SELECT sku, family_id, brand_id, attribute_1_id, attribute_2_id
            FROM product_skus
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Reverse lookup: SKU → human-readable classification names.
    ///
    /// Joins the association row back through the four classification
    /// tables (and the family's business line) so inventory screens can
    /// show "Alimentos / Lácteos / La Serenísima / Blanco / 1L" instead
    /// of raw identifiers.
    pub async fn breakdown(&self, sku: &Sku) -> DbResult<Option<SkuBreakdown>> {
        let breakdown = sqlx::query_as::<_, SkuBreakdown>(
            r#"
            SELECT
                bl.name  AS business_line,
                f.name   AS family,
                b.name   AS brand,
                a1.value AS attribute_1,
                a2.value AS attribute_2
            FROM product_skus ps
            JOIN product_families f ON ps.family_id = f.id
            JOIN business_lines bl  ON f.business_line_id = bl.id
            JOIN brands b           ON ps.brand_id = b.id
            JOIN attribute_values a1 ON ps.attribute_1_id = a1.id
            JOIN attribute_values a2 ON ps.attribute_2_id = a2.id
            WHERE ps.sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(breakdown)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use mostrador_core::{CoreError, SkuError, SkuField};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Seeds the reference hierarchy with explicit ids:
    /// Alimentos(1) / Lácteos(3) / La Serenísima(12) / Blanco(7) / 1L(150).
    async fn seed_reference_hierarchy(db: &Database) {
        for stmt in [
            "INSERT INTO business_lines (id, name) VALUES (1, 'Alimentos')",
            "INSERT INTO product_families (id, business_line_id, name) VALUES (3, 1, 'Lácteos')",
            "INSERT INTO brands (id, name) VALUES (12, 'La Serenísima')",
            "INSERT INTO attribute_values (id, value) VALUES (7, 'Blanco')",
            "INSERT INTO attribute_values (id, value) VALUES (150, '1L')",
        ] {
            sqlx::query(stmt).execute(db.pool()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_generate_concrete_scenario() {
        let db = test_db().await;
        seed_reference_hierarchy(&db).await;

        let sku = db.skus().generate(3, 12, 7, 150).await.unwrap();
        assert_eq!(sku.as_str(), "010301207150");
    }

    #[tokio::test]
    async fn test_generate_is_deterministic() {
        let db = test_db().await;
        seed_reference_hierarchy(&db).await;
        let repo = db.skus();

        let first = repo.generate(3, 12, 7, 150).await.unwrap();
        let second = repo.generate(3, 12, 7, 150).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_generate_fails_without_ancestor() {
        let db = test_db().await;
        seed_reference_hierarchy(&db).await;

        // Unknown family.
        let err = db.skus().generate(42, 12, 7, 150).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::MissingAncestor { family_id: 42 })
        ));

        // No association row was created along the way.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_skus")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_generate_fails_on_width_overflow() {
        let db = test_db().await;
        seed_reference_hierarchy(&db).await;

        // The 1000th distinct attribute value: capacity ceiling hit.
        let err = db.skus().generate(3, 12, 7, 1000).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::Sku(SkuError::FieldOverflow {
                field: SkuField::Attribute2,
                value: 1000,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_associate_is_idempotent() {
        let db = test_db().await;
        seed_reference_hierarchy(&db).await;
        let repo = db.skus();

        let sku = repo.generate(3, 12, 7, 150).await.unwrap();
        repo.associate(&sku, 3, 12, 7, 150).await.unwrap();
        // Second barcode, same classification tuple: silently a no-op.
        repo.associate(&sku, 3, 12, 7, 150).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_skus")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_associate_enforces_referential_integrity() {
        let db = test_db().await;
        seed_reference_hierarchy(&db).await;
        let repo = db.skus();

        let sku = Sku::parse("990199901999").unwrap();
        let err = repo.associate(&sku, 99, 999, 99, 999).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_breakdown_round_trip() {
        let db = test_db().await;
        seed_reference_hierarchy(&db).await;
        let repo = db.skus();

        let sku = repo.generate(3, 12, 7, 150).await.unwrap();
        repo.associate(&sku, 3, 12, 7, 150).await.unwrap();

        let breakdown = repo.breakdown(&sku).await.unwrap().unwrap();
        assert_eq!(breakdown.business_line, "Alimentos");
        assert_eq!(breakdown.family, "Lácteos");
        assert_eq!(breakdown.brand, "La Serenísima");
        assert_eq!(breakdown.attribute_1, "Blanco");
        assert_eq!(breakdown.attribute_2, "1L");

        let stored = repo.get(&sku).await.unwrap().unwrap();
        assert_eq!(stored.family_id, 3);
        assert_eq!(stored.brand_id, 12);
        assert_eq!(stored.attribute_1_id, 7);
        assert_eq!(stored.attribute_2_id, 150);
    }

    #[tokio::test]
    async fn test_breakdown_missing_sku_is_none() {
        let db = test_db().await;

        let sku = Sku::parse("000000000000").unwrap();
        assert!(db.skus().breakdown(&sku).await.unwrap().is_none());
    }
}
