//! # Domain Types
//!
//! Core domain types used throughout Mostrador POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Classification Hierarchy                          │
//! │                                                                     │
//! │   BusinessLine ("Alimentos")                                        │
//! │        │ 1:N                                                        │
//! │   ProductFamily ("Lácteos")        Brand ("La Serenísima")          │
//! │        │                                                            │
//! │   AttributeLabels ("Color","Talle")                                 │
//! │                                    AttributeValue ("Blanco","1L")   │
//! │                                    (flat pool, both slots)          │
//! │                                                                     │
//! │   ProductSku = Sku + (family, brand, attr1, attr2) ids              │
//! │   Product    = inventory row, references a ProductSku by string     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is an explicit typed record; classification "rows" are
//! never passed around as loose key-value maps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sku::Sku;

// =============================================================================
// Classification Entities
// =============================================================================

/// Top-level category of commerce (e.g. "Alimentos", "Cosmética").
/// Root of the classification hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BusinessLine {
    pub id: i64,
    /// Unique, case-insensitively.
    pub name: String,
}

/// A grouping of similar products under one business line (e.g. "Lácteos").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductFamily {
    pub id: i64,
    /// None when the parent business line was deleted; such a family
    /// cannot be SKU-encoded until it is reassigned.
    pub business_line_id: Option<i64>,
    pub name: String,
}

/// Manufacturer/brand name, independent of family and business line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

/// One entry in the flat pool of descriptive values (colors, sizes,
/// volumes). Both attribute slots of a SKU draw from this pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AttributeValue {
    pub id: i64,
    pub value: String,
}

// =============================================================================
// Attribute Labels
// =============================================================================

/// Display names for a family's two generic attribute slots
/// (e.g. "Color" / "Talle" for clothing).
///
/// Purely presentational: labels are never part of the encoding, and a
/// missing definition falls back to [`AttributeLabels::default`] rather
/// than blocking SKU generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AttributeLabels {
    pub label_1: String,
    pub label_2: String,
}

impl Default for AttributeLabels {
    fn default() -> Self {
        AttributeLabels {
            label_1: crate::DEFAULT_ATTRIBUTE_LABEL_1.to_string(),
            label_2: crate::DEFAULT_ATTRIBUTE_LABEL_2.to_string(),
        }
    }
}

// =============================================================================
// Product SKU Association
// =============================================================================

/// The durable record linking an encoded SKU to the classification
/// identifiers that produced it. One row per distinct encoded value;
/// several inventory rows (different barcodes) may share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSku {
    pub sku: Sku,
    pub family_id: i64,
    pub brand_id: i64,
    pub attribute_1_id: i64,
    pub attribute_2_id: i64,
}

/// Human-readable classification of a SKU, from the reverse lookup join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SkuBreakdown {
    pub business_line: String,
    pub family: String,
    pub brand: String,
    pub attribute_1: String,
    pub attribute_2: String,
}

// =============================================================================
// Product
// =============================================================================

/// How a product is measured at the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Sold by the piece.
    Unit,
    /// Sold by weight/volume.
    Bulk,
}

impl Default for ProductKind {
    fn default() -> Self {
        ProductKind::Unit
    }
}

/// An inventory row, keyed by supplier barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Scanned barcode - unique per inventory row.
    pub barcode: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Price in cents (smallest currency unit, never floats).
    pub price_cents: i64,

    /// Current stock level. May go negative for bulk corrections.
    pub stock: i64,

    pub kind: ProductKind,

    /// Classification SKU; None until the product has been classified,
    /// or after its SKU row was deleted.
    pub sku: Option<Sku>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input record for creating an inventory row (the database assigns the
/// id and timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub barcode: String,
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
    pub kind: ProductKind,
    pub sku: Option<Sku>,
}

// =============================================================================
// Sales
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

/// A recorded sale ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    /// Amount the customer handed over (cash).
    pub tendered_cents: i64,
    /// Change returned to the customer.
    pub change_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// A persisted line item of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// Input line for recording a sale: what was sold, how much, at what price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl SaleLine {
    /// Line total (unit price × quantity).
    #[inline]
    pub const fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_labels_default() {
        let labels = AttributeLabels::default();
        assert_eq!(labels.label_1, "Atributo 1");
        assert_eq!(labels.label_2, "Atributo 2");
    }

    #[test]
    fn test_product_kind_default() {
        assert_eq!(ProductKind::default(), ProductKind::Unit);
    }

    #[test]
    fn test_sale_line_total() {
        let line = SaleLine {
            product_id: 1,
            quantity: 3,
            unit_price_cents: 250,
        };
        assert_eq!(line.line_total_cents(), 750);
    }
}
