//! # mostrador-db: Database Layer for Mostrador POS
//!
//! This crate provides database access for the Mostrador POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mostrador Data Flow                               │
//! │                                                                         │
//! │  Caller (inventory form / register / search screen)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   mostrador-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │   Repositories   │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                  │   │ (embedded)  │  │   │
//! │  │   │               │    │ Classification   │   │             │  │   │
//! │  │   │ SqlitePool    │◄───│ Sku              │   │ 001_class.. │  │   │
//! │  │   │ Connection    │    │ Product          │   │ 002_inven.. │  │   │
//! │  │   │ Management    │    │ Sale             │   │ 003_sales   │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (mostrador.db, WAL mode, foreign keys on)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The SKU arithmetic itself lives in `mostrador-core`; this crate
//! supplies the ids (resolving names to rows, walking the family's
//! business line) and persists the results.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mostrador_db::{Database, DbConfig, Dimension};
//!
//! let db = Database::new(DbConfig::new("path/to/mostrador.db")).await?;
//!
//! // Resolve classification names to ids (creating rows as needed),
//! // then generate and associate the positional SKU.
//! let brand_id = db.classifications().resolve(Dimension::Brand, "Sancor").await?;
//! let sku = db.skus().generate(family_id, brand_id, a1, a2).await?;
//! db.skus().associate(&sku, family_id, brand_id, a1, a2).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::classification::{ClassificationRepository, Dimension};
pub use repository::product::{ProductFilter, ProductRepository};
pub use repository::sale::SaleRepository;
pub use repository::sku::SkuRepository;
