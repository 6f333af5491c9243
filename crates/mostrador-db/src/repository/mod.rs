//! # Repository Module
//!
//! Database repository implementations for Mostrador.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Caller (inventory form, register)                                     │
//! │       │                                                                 │
//! │       │  db.classifications().resolve(Dimension::Brand, "Sancor")      │
//! │       │  db.skus().generate(family_id, brand_id, a1, a2)               │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ClassificationRepository / SkuRepository / ...                        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test against an in-memory database                          │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ClassificationRepository`] - Classification hierarchy get-or-create
//! - [`SkuRepository`] - SKU generation, association, and breakdown
//! - [`ProductRepository`] - Inventory CRUD and filtered search
//! - [`SaleRepository`] - Sale recording and history
//!
//! [`ClassificationRepository`]: classification::ClassificationRepository
//! [`SkuRepository`]: sku::SkuRepository
//! [`ProductRepository`]: product::ProductRepository
//! [`SaleRepository`]: sale::SaleRepository

pub mod classification;
pub mod product;
pub mod sale;
pub mod sku;
