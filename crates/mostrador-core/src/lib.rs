//! # mostrador-core: Pure Business Logic for Mostrador POS
//!
//! This crate is the **heart** of Mostrador POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Mostrador Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────┐     │
//! │  │                  Shell (forms / terminal)                 │     │
//! │  │   Inventory form ──► SKU preview ──► Search filters       │     │
//! │  └──────────────────────────┬────────────────────────────────┘     │
//! │                             │                                       │
//! │  ┌──────────────────────────▼────────────────────────────────┐     │
//! │  │            ★ mostrador-core (THIS CRATE) ★                │     │
//! │  │                                                           │     │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐  │     │
//! │  │   │   sku   │  │  types  │  │  error  │  │ validation │  │     │
//! │  │   │ encode  │  │ records │  │  enums  │  │   rules    │  │     │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘  │     │
//! │  │                                                           │     │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS      │     │
//! │  └──────────────────────────┬────────────────────────────────┘     │
//! │                             │                                       │
//! │  ┌──────────────────────────▼────────────────────────────────┐     │
//! │  │              mostrador-db (Database Layer)                │     │
//! │  │        SQLite queries, migrations, repositories           │     │
//! │  └───────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sku`] - The 12-digit positional SKU: layout, encoding, parsing
//! - [`types`] - Domain types (classification entities, products, sales)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: SKU encoding is deterministic - same tuple in,
//!    same 12 characters out
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use mostrador_core::sku::SkuComponents;
//!
//! let sku = SkuComponents {
//!     business_line_id: 1,
//!     family_id: 3,
//!     brand_id: 12,
//!     attribute_1_id: 7,
//!     attribute_2_id: 150,
//! }
//! .encode()
//! .unwrap();
//!
//! assert_eq!(sku.as_str(), "010301207150");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod sku;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mostrador_core::Sku` instead of
// `use mostrador_core::sku::Sku`

pub use error::{CoreError, CoreResult, SkuError, ValidationError};
pub use sku::{Sku, SkuComponents, SkuField, SKU_LEN};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fallback display name for a family's first attribute slot.
///
/// Label definitions are cosmetic; when a family has none, readers use
/// these generic labels instead of failing, so label setup can never
/// block SKU generation.
pub const DEFAULT_ATTRIBUTE_LABEL_1: &str = "Atributo 1";

/// Fallback display name for a family's second attribute slot.
pub const DEFAULT_ATTRIBUTE_LABEL_2: &str = "Atributo 2";

/// Maximum length of a classification value (business line, family,
/// brand, attribute value), matching the storage column width.
pub const MAX_CLASSIFICATION_NAME_LEN: usize = 50;

/// Maximum length of a product barcode.
pub const MAX_BARCODE_LEN: usize = 50;

/// Maximum length of a product display name.
pub const MAX_PRODUCT_NAME_LEN: usize = 100;
