//! # Validation Module
//!
//! Input validation utilities for Mostrador POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Form/shell                                                │
//! │  └── Basic format checks, immediate user feedback                   │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  └── Business rule validation before any persistence                │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL / UNIQUE COLLATE NOCASE constraints                   │
//! │  └── Foreign key constraints                                        │
//! │                                                                     │
//! │  Defense in depth: multiple layers catch different errors           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_BARCODE_LEN, MAX_CLASSIFICATION_NAME_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a classification value (business line, brand, attribute value
/// or family name) before it reaches the get-or-create resolver.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - Must be at most 50 characters after trimming
///
/// ## Returns
/// The trimmed value - the resolver inserts it in its submitted casing.
///
/// ## Example
/// ```rust
/// use mostrador_core::validation::validate_classification_name;
///
/// assert_eq!(validate_classification_name("  Coca Cola ", "brand").unwrap(), "Coca Cola");
/// assert!(validate_classification_name("   ", "brand").is_err());
/// ```
pub fn validate_classification_name<'a>(
    value: &'a str,
    field: &str,
) -> ValidationResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_CLASSIFICATION_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_CLASSIFICATION_NAME_LEN,
        });
    }

    Ok(value)
}

/// Validates a product barcode.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Digits only (EAN-13, UPC-A and internal numeric codes)
pub fn validate_barcode(barcode: &str) -> ValidationResult<&str> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if !barcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(barcode)
}

/// Validates a product display name.
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents. Zero is allowed (unpriced/free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a sale line quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_classification_name() {
        assert_eq!(
            validate_classification_name("La Serenísima", "brand").unwrap(),
            "La Serenísima"
        );
        // Trims but does not lowercase.
        assert_eq!(
            validate_classification_name("  Blanco  ", "attribute").unwrap(),
            "Blanco"
        );

        assert!(validate_classification_name("", "brand").is_err());
        assert!(validate_classification_name("   ", "brand").is_err());
        assert!(validate_classification_name(&"a".repeat(51), "brand").is_err());
        assert!(validate_classification_name(&"a".repeat(50), "brand").is_ok());
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("7790895000430").is_ok());
        assert_eq!(validate_barcode(" 12345 ").unwrap(), "12345");

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("ABC123").is_err());
        assert!(validate_barcode(&"9".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Leche Entera 1L").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
    }
}
