//! # Sale Repository
//!
//! Database operations for recording completed sales.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Recording a Sale                             │
//! │                                                                     │
//! │  Cart of SaleLine { product_id, quantity, unit_price_cents }        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  record_sale(lines, method, tendered)   ── one transaction ──┐      │
//! │       │                                                      │      │
//! │       ├── INSERT sales (totals, payment, change)             │      │
//! │       ├── INSERT sale_items (one per line)                   │      │
//! │       └── UPDATE products SET stock = stock - quantity       │      │
//! │                                                              │      │
//! │  Any failure rolls all three back ◄──────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The register only stores completed sales; there is no draft state to
//! resume, so a sale either lands whole or not at all.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use mostrador_core::validation::validate_quantity;
use mostrador_core::{PaymentMethod, Sale, SaleItem, SaleLine, ValidationError};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a completed sale: header, items, and stock decrements in
    /// a single transaction.
    ///
    /// ## Arguments
    /// * `lines` - The cart; must be non-empty
    /// * `method` - How the customer paid
    /// * `tendered_cents` - Cash handed over (`None` for card payments)
    ///
    /// ## Returns
    /// The persisted sale with its assigned id and computed change.
    ///
    /// ## Errors
    /// A line referencing an unknown product fails the item insert's
    /// foreign key; the whole sale rolls back, nothing is committed.
    pub async fn record_sale(
        &self,
        lines: &[SaleLine],
        method: PaymentMethod,
        tendered_cents: Option<i64>,
    ) -> DbResult<Sale> {
        if lines.is_empty() {
            return Err(ValidationError::Required {
                field: "sale items".to_string(),
            }
            .into());
        }
        for line in lines {
            validate_quantity(line.quantity)?;
        }

        let total_cents: i64 = lines.iter().map(|l| l.line_total_cents()).sum();
        // None means exact payment (card); store it as tendered = total.
        let tendered_cents = tendered_cents.unwrap_or(total_cents);
        let change_cents = tendered_cents - total_cents;
        if change_cents < 0 {
            return Err(ValidationError::InsufficientAmount {
                field: "tendered_cents".to_string(),
                amount: tendered_cents,
                required: total_cents,
            }
            .into());
        }

        let now = Utc::now();

        debug!(total_cents, ?method, items = lines.len(), "Recording sale");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (total_cents, payment_method, tendered_cents, change_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(total_cents)
        .bind(method)
        .bind(tendered_cents)
        .bind(change_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        let sale_id = result.last_insert_rowid();

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, unit_price_cents, line_total_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price_cents)
            .bind(line.line_total_cents())
            .execute(&mut *tx)
            .await?;

            // An unknown product already failed the item insert's foreign
            // key above, so this row always exists.
            sqlx::query(
                r#"
                UPDATE products SET
                    stock = stock - ?2,
                    updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Sale {
            id: sale_id,
            total_cents,
            payment_method: method,
            tendered_cents,
            change_cents,
            created_at: now,
        })
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, total_cents, payment_method, tendered_cents, change_cents, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale.
    pub async fn get_items(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, line_total_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Sums all sales recorded on the given calendar day (UTC).
    pub async fn daily_total_cents(&self, day: chrono::NaiveDate) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(total_cents)
            FROM sales
            WHERE date(created_at) = ?1
            "#,
        )
        .bind(day.format("%Y-%m-%d").to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
