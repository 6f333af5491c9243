//! # SKU Encoding
//!
//! The 12-digit positional SKU that classifies every product variant.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     SKU Layout (12 ASCII digits)                    │
//! │                                                                     │
//! │   position   0  1 │ 2  3 │ 4  5  6 │ 7  8 │ 9 10 11                │
//! │             ┌─────┼──────┼─────────┼──────┼─────────┐              │
//! │   field     │ BL  │ FAM  │  BRAND  │  A1  │   A2    │              │
//! │   width     │  2  │  2   │    3    │  2   │    3    │              │
//! │   ceiling   │ 99  │  99  │   999   │  99  │   999   │              │
//! │             └─────┴──────┴─────────┴──────┴─────────┘              │
//! │                                                                     │
//! │   "01" + "03" + "012" + "07" + "150"  =  "010301207150"            │
//! │    Alimentos  Lácteos  La Serenísima  Blanco  1L                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This layout is a durable on-disk contract: the SKU is stored as a
//! fixed 12-character column and inventory rows reference it by string.
//! Changing any field width requires migrating every persisted SKU, so
//! the widths live here as the single auditable definition.
//!
//! ## Properties
//! - **Pure**: encoding is a function of the five identifiers, nothing else
//! - **Deterministic**: same tuple in, same 12 characters out
//! - **Injective**: bounded-width fields cannot collide, so the code
//!   decodes back to the exact tuple that produced it
//! - **Total failure**: any ceiling violation fails the whole encode;
//!   a partial or truncated SKU is never produced

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SkuError;

/// Total length of an encoded SKU.
pub const SKU_LEN: usize = 12;

// =============================================================================
// SKU Field
// =============================================================================

/// One of the five positional fields of a SKU, in encoding order.
///
/// Carries the digit width and identifier ceiling for its slot. The
/// ceilings were sized for the expected catalog scale (tens of business
/// lines and families, hundreds of brands and attribute values); hitting
/// one is a capacity-planning event, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkuField {
    BusinessLine,
    Family,
    Brand,
    Attribute1,
    Attribute2,
}

impl SkuField {
    /// All fields in encoding order (also the positional order on disk).
    pub const ALL: [SkuField; 5] = [
        SkuField::BusinessLine,
        SkuField::Family,
        SkuField::Brand,
        SkuField::Attribute1,
        SkuField::Attribute2,
    ];

    /// Number of decimal digits allotted to this field.
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            SkuField::BusinessLine => 2,
            SkuField::Family => 2,
            SkuField::Brand => 3,
            SkuField::Attribute1 => 2,
            SkuField::Attribute2 => 3,
        }
    }

    /// Largest identifier that fits this field's width.
    #[inline]
    pub const fn max(self) -> i64 {
        match self {
            SkuField::BusinessLine => 99,
            SkuField::Family => 99,
            SkuField::Brand => 999,
            SkuField::Attribute1 => 99,
            SkuField::Attribute2 => 999,
        }
    }

    /// Byte offset of this field within an encoded SKU.
    pub const fn offset(self) -> usize {
        match self {
            SkuField::BusinessLine => 0,
            SkuField::Family => 2,
            SkuField::Brand => 4,
            SkuField::Attribute1 => 7,
            SkuField::Attribute2 => 9,
        }
    }
}

impl fmt::Display for SkuField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkuField::BusinessLine => "business_line_id",
            SkuField::Family => "family_id",
            SkuField::Brand => "brand_id",
            SkuField::Attribute1 => "attribute_1_id",
            SkuField::Attribute2 => "attribute_2_id",
        };
        f.write_str(name)
    }
}

// =============================================================================
// SKU Components
// =============================================================================

/// The five-identifier tuple a SKU encodes.
///
/// The business line is carried explicitly even though it is derived from
/// the family: ancestor resolution is the caller's (I/O-bound) step, and
/// encoding stays a pure function of the complete tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuComponents {
    pub business_line_id: i64,
    pub family_id: i64,
    pub brand_id: i64,
    pub attribute_1_id: i64,
    pub attribute_2_id: i64,
}

impl SkuComponents {
    /// Returns the identifier occupying the given field.
    pub const fn get(&self, field: SkuField) -> i64 {
        match field {
            SkuField::BusinessLine => self.business_line_id,
            SkuField::Family => self.family_id,
            SkuField::Brand => self.brand_id,
            SkuField::Attribute1 => self.attribute_1_id,
            SkuField::Attribute2 => self.attribute_2_id,
        }
    }

    /// Encodes the tuple into its canonical 12-digit SKU.
    ///
    /// ## Rules
    /// 1. Every identifier must be in `[0, field ceiling]`; checked per
    ///    field in encoding order, failing on the first violation with
    ///    the offending field and value.
    /// 2. Each identifier is zero-padded to its fixed width.
    /// 3. Fields concatenate in layout order.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::sku::SkuComponents;
    ///
    /// let sku = SkuComponents {
    ///     business_line_id: 1,
    ///     family_id: 3,
    ///     brand_id: 12,
    ///     attribute_1_id: 7,
    ///     attribute_2_id: 150,
    /// }
    /// .encode()
    /// .unwrap();
    ///
    /// assert_eq!(sku.as_str(), "010301207150");
    /// ```
    pub fn encode(&self) -> Result<Sku, SkuError> {
        let mut out = String::with_capacity(SKU_LEN);

        for field in SkuField::ALL {
            let value = self.get(field);
            if value < 0 || value > field.max() {
                return Err(SkuError::FieldOverflow {
                    field,
                    value,
                    max: field.max(),
                });
            }
            // width is 2 or 3; format widths must be literal, so match
            match field.width() {
                2 => out.push_str(&format!("{:02}", value)),
                _ => out.push_str(&format!("{:03}", value)),
            }
        }

        debug_assert_eq!(out.len(), SKU_LEN);
        Ok(Sku(out))
    }
}

// =============================================================================
// SKU
// =============================================================================

/// A validated 12-digit SKU.
///
/// Construction goes through [`SkuComponents::encode`] or [`Sku::parse`],
/// so a value of this type always holds exactly [`SKU_LEN`] ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Sku(String);

impl Sku {
    /// Parses a stored string back into a SKU, checking the shape.
    ///
    /// ## Errors
    /// `SkuError::Malformed` when the input is not exactly 12 ASCII digits.
    pub fn parse(input: &str) -> Result<Sku, SkuError> {
        if input.len() == SKU_LEN && input.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Sku(input.to_string()))
        } else {
            Err(SkuError::Malformed {
                input: input.to_string(),
            })
        }
    }

    /// The SKU as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the SKU back into the identifier tuple that produced it.
    ///
    /// Always succeeds on a constructed `Sku`: the layout is fixed and
    /// every segment is a zero-padded decimal number.
    pub fn components(&self) -> SkuComponents {
        let segment = |field: SkuField| -> i64 {
            let start = field.offset();
            // Slicing and parsing cannot fail: construction guarantees
            // 12 ASCII digits.
            self.0[start..start + field.width()]
                .parse()
                .unwrap_or_default()
        };

        SkuComponents {
            business_line_id: segment(SkuField::BusinessLine),
            family_id: segment(SkuField::Family),
            brand_id: segment(SkuField::Brand),
            attribute_1_id: segment(SkuField::Attribute1),
            attribute_2_id: segment(SkuField::Attribute2),
        }
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Sku> for String {
    fn from(sku: Sku) -> String {
        sku.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn components(bl: i64, fam: i64, brand: i64, a1: i64, a2: i64) -> SkuComponents {
        SkuComponents {
            business_line_id: bl,
            family_id: fam,
            brand_id: brand,
            attribute_1_id: a1,
            attribute_2_id: a2,
        }
    }

    #[test]
    fn test_encode_concrete_scenario() {
        // Alimentos(1) / Lácteos(3) / La Serenísima(12) / Blanco(7) / 1L(150)
        let sku = components(1, 3, 12, 7, 150).encode().unwrap();
        assert_eq!(sku.as_str(), "010301207150");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let tuple = components(42, 8, 512, 33, 640);
        assert_eq!(tuple.encode().unwrap(), tuple.encode().unwrap());
    }

    #[test]
    fn test_encode_always_twelve_ascii_digits() {
        for tuple in [
            components(0, 0, 0, 0, 0),
            components(99, 99, 999, 99, 999),
            components(5, 70, 4, 9, 31),
        ] {
            let sku = tuple.encode().unwrap();
            assert_eq!(sku.as_str().len(), SKU_LEN);
            assert!(sku.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_encode_width_boundaries() {
        // At the ceiling: succeeds, occupying the full width.
        let sku = components(1, 1, 999, 1, 1).encode().unwrap();
        assert_eq!(&sku.as_str()[4..7], "999");

        // One past the ceiling: hard failure naming the field.
        let err = components(1, 1, 1000, 1, 1).encode().unwrap_err();
        assert_eq!(
            err,
            SkuError::FieldOverflow {
                field: SkuField::Brand,
                value: 1000,
                max: 999,
            }
        );

        assert!(components(99, 1, 1, 1, 1).encode().is_ok());
        assert!(components(100, 1, 1, 1, 1).encode().is_err());
        assert!(components(1, 99, 1, 1, 1).encode().is_ok());
        assert!(components(1, 100, 1, 1, 1).encode().is_err());
        assert!(components(1, 1, 1, 99, 1).encode().is_ok());
        assert!(components(1, 1, 1, 100, 1).encode().is_err());
        assert!(components(1, 1, 1, 1, 999).encode().is_ok());
        assert!(components(1, 1, 1, 1, 1000).encode().is_err());
    }

    #[test]
    fn test_encode_rejects_negative_ids() {
        let err = components(-1, 1, 1, 1, 1).encode().unwrap_err();
        assert!(matches!(
            err,
            SkuError::FieldOverflow {
                field: SkuField::BusinessLine,
                value: -1,
                ..
            }
        ));
    }

    #[test]
    fn test_overflow_names_attribute_2() {
        // The 1000th distinct attribute value ever created.
        let err = components(1, 1, 1, 1, 1000).encode().unwrap_err();
        assert_eq!(
            err.to_string(),
            "attribute_2_id 1000 exceeds the maximum of 999 for SKU encoding"
        );
    }

    #[test]
    fn test_components_round_trip() {
        let tuple = components(7, 31, 402, 8, 999);
        let sku = tuple.encode().unwrap();
        assert_eq!(sku.components(), tuple);
    }

    #[test]
    fn test_parse_accepts_stored_sku() {
        let sku = Sku::parse("010301207150").unwrap();
        assert_eq!(sku.components().attribute_2_id, 150);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Sku::parse("").is_err());
        assert!(Sku::parse("12345").is_err());
        assert!(Sku::parse("0103012071500").is_err());
        assert!(Sku::parse("01030120715O").is_err()); // letter O
    }

    #[test]
    fn test_field_offsets_cover_layout() {
        let mut pos = 0;
        for field in SkuField::ALL {
            assert_eq!(field.offset(), pos);
            pos += field.width();
        }
        assert_eq!(pos, SKU_LEN);
    }
}
