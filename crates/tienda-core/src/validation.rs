//! # Validation Module
//!
//! Input validation utilities for Tienda.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Console (parse)                                           │
//! │  ├── Quantity string → f64 (reject non-numeric input)               │
//! │  └── SKU trimmed and upper-cased                                    │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (business rules)                              │
//! │  ├── SKU format and length                                          │
//! │  ├── Name presence                                                  │
//! │  └── Quantity/stock sign and finiteness                             │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Domain invariants (product / cart / store)                │
//! │  ├── Pricing category exists for the SKU                            │
//! │  ├── SKU uniqueness in the catalog                                  │
//! │  └── Stock availability                                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};

/// Maximum SKU length.
const MAX_SKU_LEN: usize = 50;

/// Maximum product name length.
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - May contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use tienda_core::validation::validate_sku;
///
/// assert!(validate_sku("EA001").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("EA 001").is_err());
/// ```
pub fn validate_sku(sku: &str) -> CoreResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(CoreError::Required { field: "sku" });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(CoreError::TooLong {
            field: "sku",
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::InvalidFormat {
            field: "sku",
            reason: "must contain only letters, numbers, hyphens, and underscores",
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> CoreResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(CoreError::Required { field: "name" });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::TooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity for cart operations.
///
/// Quantities are `f64` because weighed products sell fractional
/// kilograms. NaN and infinities are rejected along with non-positive
/// values.
///
/// ## Example
/// ```rust
/// use tienda_core::validation::validate_quantity;
///
/// assert!(validate_quantity(2.5).is_ok());
/// assert!(validate_quantity(0.0).is_err());
/// assert!(validate_quantity(-1.0).is_err());
/// assert!(validate_quantity(f64::NAN).is_err());
/// ```
pub fn validate_quantity(qty: f64) -> CoreResult<()> {
    if !qty.is_finite() || qty <= 0.0 {
        return Err(CoreError::InvalidQuantity(qty));
    }
    Ok(())
}

/// Validates an initial stock level at product registration.
pub fn validate_stock(stock: f64) -> CoreResult<()> {
    if !stock.is_finite() || stock < 0.0 {
        return Err(CoreError::NegativeStock(stock));
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
    fn test_validate_sku_accepts_normal_codes() {
        assert!(validate_sku("EA001").is_ok());
        assert!(validate_sku("WE-001").is_ok());
        assert!(validate_sku("SP_002").is_ok());
    }

    #[test]
    fn test_validate_sku_rejects_empty_and_whitespace() {
        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
    }

    #[test]
    fn test_validate_sku_rejects_bad_characters() {
        assert!(validate_sku("EA 001").is_err());
        assert!(validate_sku("EA#001").is_err());
    }

    #[test]
    fn test_validate_sku_rejects_too_long() {
        let long = "E".repeat(MAX_SKU_LEN + 1);
        assert!(validate_sku(&long).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Laptop Gaming").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1.0).is_ok());
        assert!(validate_quantity(0.25).is_ok());
        assert!(validate_quantity(0.0).is_err());
        assert!(validate_quantity(-3.0).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
        assert!(validate_quantity(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0.0).is_ok());
        assert!(validate_stock(5000.0).is_ok());
        assert!(validate_stock(-1.0).is_err());
        assert!(validate_stock(f64::NAN).is_err());
    }
}
