//! # Product Repository
//!
//! Database operations for inventory rows.
//!
//! ## Barcode-First Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                How the Register Finds a Product                     │
//! │                                                                     │
//! │  Cashier scans: 7790895000430                                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  get_by_barcode("7790895000430")                                    │
//! │       │                                                             │
//! │       ├── Some(product) ──► add to cart, decrement on sale          │
//! │       │                                                             │
//! │       └── None ──► open the inventory form to register it           │
//! │                    (classification + SKU generation happen there)   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Search screens filter by classification instead: the SKU association
//! row links each product to ids a user can pick by name.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use mostrador_core::validation::{validate_barcode, validate_price_cents, validate_product_name};
use mostrador_core::{NewProduct, Product};

// =============================================================================
// Filter
// =============================================================================

/// Classification-based inventory filter. All criteria are optional and
/// combine with AND; an attribute id matches either attribute slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub business_line_id: Option<i64>,
    pub family_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub attribute_value_id: Option<i64>,
    /// Case-insensitive substring match on the product name.
    pub name_like: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its scanned barcode.
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, barcode, name, price_cents, stock, kind, sku, created_at, updated_at
            FROM products
            WHERE barcode = ?1
            "#,
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// Callers classify first: when `sku` is set, the association row
    /// must already exist (the save aborts on a foreign-key violation
    /// rather than leaving a product pointing at a SKU that was never
    /// associated).
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        let barcode = validate_barcode(&new.barcode)?;
        let name = validate_product_name(&new.name)?;
        validate_price_cents(new.price_cents)?;

        debug!(barcode = %barcode, name = %name, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (barcode, name, price_cents, stock, kind, sku, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(barcode)
        .bind(name)
        .bind(new.price_cents)
        .bind(new.stock)
        .bind(new.kind)
        .bind(&new.sku)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            barcode: barcode.to_string(),
            name: name.to_string(),
            price_cents: new.price_cents,
            stock: new.stock,
            kind: new.kind,
            sku: new.sku.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates an existing product's editable fields.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        let name = validate_product_name(&product.name)?;
        validate_price_cents(product.price_cents)?;

        debug!(id = product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price_cents = ?3,
                stock = ?4,
                kind = ?5,
                sku = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.kind)
        .bind(&product.sku)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Applies a stock delta (negative for sales, positive for restocking).
    ///
    /// Delta updates compose: two terminals selling 3 and 2 units net to
    /// -5 regardless of ordering, which an absolute `SET stock = n`
    /// would not.
    pub async fn update_stock(&self, id: i64, delta: i64) -> DbResult<()> {
        debug!(id, delta, "Updating stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock = stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists the full inventory, sorted by name.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, barcode, name, price_cents, stock, kind, sku, created_at, updated_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Filters inventory by classification names' ids and/or a name
    /// substring, joining through the SKU association table.
    ///
    /// Products without a SKU only appear when no classification
    /// criterion is set.
    pub async fn filter(&self, filter: &ProductFilter) -> DbResult<Vec<Product>> {
        debug!(?filter, "Filtering products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.barcode, p.name, p.price_cents, p.stock, p.kind, p.sku,
                   p.created_at, p.updated_at
            FROM products p
            LEFT JOIN product_skus ps ON p.sku = ps.sku
            LEFT JOIN product_families f ON ps.family_id = f.id
            WHERE (?1 IS NULL OR f.business_line_id = ?1)
              AND (?2 IS NULL OR ps.family_id = ?2)
              AND (?3 IS NULL OR ps.brand_id = ?3)
              AND (?4 IS NULL OR ps.attribute_1_id = ?4 OR ps.attribute_2_id = ?4)
              AND (?5 IS NULL OR p.name LIKE '%' || ?5 || '%' COLLATE NOCASE)
            ORDER BY p.name
            "#,
        )
        .bind(filter.business_line_id)
        .bind(filter.family_id)
        .bind(filter.brand_id)
        .bind(filter.attribute_value_id)
        .bind(&filter.name_like)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts products (for diagnostics and seed-skip checks).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
