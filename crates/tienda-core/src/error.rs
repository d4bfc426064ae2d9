//! # Error Types
//!
//! Domain-specific error types for tienda-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  tienda-core errors (this file)                                     │
//! │  └── CoreError  - every business rule violation, as a variant       │
//! │                                                                     │
//! │  Console app                                                        │
//! │  └── catches CoreError and prints a one-line message                │
//! │                                                                     │
//! │  Flow: validation / pricing / cart / store → CoreError → Console    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// The lineage of this system mixed exceptions with boolean returns for the
/// same conditions; here every failure path goes through this one enum so
/// callers handle all of them uniformly.
#[derive(Debug, Error)]
pub enum CoreError {
    /// SKU prefix matches no known pricing category.
    ///
    /// ## When This Occurs
    /// - Registering a product whose SKU starts with anything other than
    ///   a prefix the rule registry knows (EA/WE/SP by default)
    #[error("No pricing category for SKU: {0}")]
    InvalidCode(String),

    /// Catalog registration collision.
    #[error("Product {0} already exists in the catalog")]
    DuplicateCode(String),

    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Quantity is zero, negative, or not a finite number.
    #[error("Invalid quantity: {0} (must be greater than 0)")]
    InvalidQuantity(f64),

    /// Requested quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 6)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "EA001", available: 5.0, requested: 6.0 }
    ///      │
    ///      ▼
    /// Console shows: "Insufficient stock for EA001: available 5, requested 6"
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: f64,
        requested: f64,
    },

    /// Checkout attempted on a cart with no lines.
    #[error("The cart is empty")]
    EmptyCart,

    /// The rule registry has no rule for a SKU.
    ///
    /// Should be unreachable through the public API: `Store::register`
    /// rejects unknown prefixes with [`CoreError::InvalidCode`] before a
    /// product ever exists.
    #[error("No pricing rule registered for SKU: {0}")]
    NoRuleFound(String),

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Invalid format (e.g., SKU with forbidden characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Initial stock below zero.
    #[error("Stock must not be negative, got {0}")]
    NegativeStock(f64),
}

// =============================================================================
// Result Type Alias
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
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            sku: "EA001".to_string(),
            available: 5.0,
            requested: 6.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for EA001: available 5, requested 6"
        );

        let err = CoreError::InvalidCode("XX001".to_string());
        assert_eq!(err.to_string(), "No pricing category for SKU: XX001");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = CoreError::Required { field: "sku" };
        assert_eq!(err.to_string(), "sku is required");

        let err = CoreError::TooLong {
            field: "name",
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }
}
