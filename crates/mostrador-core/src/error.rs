//! # Error Types
//!
//! Domain-specific error types for mostrador-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  mostrador-core errors (this file)                                  │
//! │  ├── CoreError        - General domain errors                       │
//! │  ├── SkuError         - SKU encoding/decoding failures              │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  mostrador-db errors (separate crate)                               │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  Flow: ValidationError/SkuError → CoreError → DbError → UI          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, id)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::sku::SkuField;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product family has no resolvable business line.
    ///
    /// ## When This Occurs
    /// - The family id does not exist
    /// - The family's business line was deleted, nulling the reference
    ///
    /// Surfaced to the operator as "category configuration incomplete";
    /// never retried automatically, the hierarchy must be corrected first.
    #[error("family {family_id} has no business line assigned; cannot encode a SKU")]
    MissingAncestor { family_id: i64 },

    /// SKU encoding or decoding failed (wraps SkuError).
    #[error(transparent)]
    Sku(#[from] SkuError),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// SKU Error
// =============================================================================

/// SKU encoding and decoding failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkuError {
    /// An identifier exceeds the digit width allotted to its field.
    ///
    /// ## When This Occurs
    /// The classification tables grew past the capacity the layout was
    /// sized for (e.g. the 1000th brand was created). This is a
    /// capacity-planning signal for an operator, so the offending field
    /// and value are named verbatim; the value is never truncated or
    /// wrapped into a shorter code.
    #[error("{field} {value} exceeds the maximum of {max} for SKU encoding")]
    FieldOverflow {
        field: SkuField,
        value: i64,
        max: i64,
    },

    /// A string does not have the 12-digit SKU shape.
    #[error("'{input}' is not a valid SKU: expected exactly 12 ASCII digits")]
    Malformed { input: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. non-digit characters in a barcode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An amount offered does not cover what is due (e.g. cash tendered
    /// short of the sale total).
    #[error("{field} of {amount} cents is less than the {required} cents due")]
    InsufficientAmount {
        field: String,
        amount: i64,
        required: i64,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_ancestor_message() {
        let err = CoreError::MissingAncestor { family_id: 7 };
        assert_eq!(
            err.to_string(),
            "family 7 has no business line assigned; cannot encode a SKU"
        );
    }

    #[test]
    fn test_field_overflow_message_names_field_and_value() {
        let err = SkuError::FieldOverflow {
            field: SkuField::Attribute2,
            value: 1000,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "attribute_2_id 1000 exceeds the maximum of 999 for SKU encoding"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "brand".to_string(),
        };
        assert_eq!(err.to_string(), "brand is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 50,
        };
        assert_eq!(err.to_string(), "name must be at most 50 characters");

        let err = ValidationError::InsufficientAmount {
            field: "tendered_cents".to_string(),
            amount: 2000,
            required: 2400,
        };
        assert_eq!(
            err.to_string(),
            "tendered_cents of 2000 cents is less than the 2400 cents due"
        );
    }

    #[test]
    fn test_sku_error_converts_to_core_error() {
        let sku_err = SkuError::Malformed {
            input: "abc".to_string(),
        };
        let core_err: CoreError = sku_err.into();
        assert!(matches!(core_err, CoreError::Sku(_)));
    }
}
