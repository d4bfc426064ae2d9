//! # Product
//!
//! The catalog entry: identity, stock, unit price, and the pricing rule
//! resolved once from the SKU prefix.
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: UUID v4 - immutable, machine identity
//! - `sku`: business identifier - human-readable, determines the pricing
//!   category by prefix (EA/WE/SP)
//!
//! ## Stock Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  stock is private and mutated through exactly one door:             │
//! │                                                                     │
//! │    deduct(qty) ── has_stock(qty)? ──► stock -= qty                  │
//! │                        │                                            │
//! │                        └──► Err(InsufficientStock), stock untouched │
//! │                                                                     │
//! │  Deduction fully succeeds or has no effect. Stock never goes        │
//! │  negative.                                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{PriceRule, QuantityUnit, RuleRegistry};
use crate::validation::{validate_product_name, validate_quantity, validate_sku, validate_stock};

/// Shared handle to a product.
///
/// The catalog owns products, and cart lines hold a second handle to the
/// same product so stock checks and deductions observe one inventory.
/// The system is single-threaded, so `Rc<RefCell<_>>` rather than a lock.
pub type SharedProduct = Rc<RefCell<Product>>;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Constructed only through [`Product::new`], which resolves and binds the
/// pricing rule for the SKU. The rule never changes afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    id: String,

    /// Stock Keeping Unit - business identifier, prefix selects the rule.
    sku: String,

    /// Display name shown in the catalog listing and on cart lines.
    name: String,

    /// Optional description for product details.
    description: Option<String>,

    /// Available stock, in the rule's quantity unit (units or kilograms).
    /// Never negative.
    stock: f64,

    /// Unit price. Per unit for counted products, per gram for weighed.
    unit_price: Money,

    /// Pricing rule, resolved from the SKU prefix at construction.
    rule: PriceRule,

    /// When the product was registered.
    created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product, resolving its pricing rule from the SKU prefix.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidCode`] when no rule in `registry` matches the SKU
    /// - [`CoreError::Required`] / [`CoreError::TooLong`] /
    ///   [`CoreError::InvalidFormat`] for malformed SKU or name
    /// - [`CoreError::NegativeStock`] for negative initial stock
    pub fn new(
        registry: &RuleRegistry,
        sku: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        stock: f64,
        unit_price: Money,
    ) -> CoreResult<Self> {
        let sku = sku.into();
        let name = name.into();

        validate_sku(&sku)?;
        validate_product_name(&name)?;
        validate_stock(stock)?;

        // An unrecognized prefix is a construction-time error: the registry
        // miss surfaces as InvalidCode so NoRuleFound stays unreachable
        // beyond this point.
        let rule = registry
            .rule_for(&sku)
            .map_err(|_| CoreError::InvalidCode(sku.clone()))?;

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            sku,
            name,
            description,
            stock,
            unit_price,
            rule,
            created_at: Utc::now(),
        })
    }

    /// Wraps the product in a shared handle.
    pub fn into_shared(self) -> SharedProduct {
        Rc::new(RefCell::new(self))
    }

    // -------------------------------------------------------------------------
    // Read accessors (no setters besides `deduct`)
    // -------------------------------------------------------------------------

    /// UUID identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Business SKU.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Current available stock.
    pub fn stock(&self) -> f64 {
        self.stock
    }

    /// Unit price (per unit or per gram, depending on the rule).
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// The pricing rule bound at construction.
    pub fn rule(&self) -> PriceRule {
        self.rule
    }

    /// Unit of measure for this product's quantities.
    pub fn unit(&self) -> QuantityUnit {
        self.rule.unit()
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // -------------------------------------------------------------------------
    // Stock operations
    // -------------------------------------------------------------------------

    /// Checks whether `qty` can currently be supplied.
    pub fn has_stock(&self, qty: f64) -> bool {
        qty <= self.stock
    }

    /// Deducts `qty` from stock.
    ///
    /// All-or-nothing: on failure the stock is untouched.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidQuantity`] for non-positive or non-finite `qty`
    /// - [`CoreError::InsufficientStock`] when `qty` exceeds available stock
    pub fn deduct(&mut self, qty: f64) -> CoreResult<()> {
        validate_quantity(qty)?;

        if !self.has_stock(qty) {
            return Err(CoreError::InsufficientStock {
                sku: self.sku.clone(),
                available: self.stock,
                requested: qty,
            });
        }

        // max(0.0) absorbs float residue when qty == stock up to rounding;
        // the invariant is that stock never goes negative.
        self.stock = (self.stock - qty).max(0.0);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Computes the total price for `qty` using the bound rule.
    ///
    /// Pure computation, no stock check and no mutation.
    pub fn price_for(&self, qty: f64) -> Money {
        self.rule.total(qty, self.unit_price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
