//! # Pricing Rules
//!
//! Strategy selection for line-total calculation, keyed by SKU prefix.
//!
//! ## Rule Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Pricing Dispatch                               │
//! │                                                                     │
//! │  SKU ──► RuleRegistry::rule_for ──► first rule whose prefix matches │
//! │                                                                     │
//! │  "EA001" ──► Standard   total = qty × unit_price                    │
//! │  "WE001" ──► ByWeight   total = qty(kg) × 1000 × unit_price(per g)  │
//! │  "SP001" ──► Tiered     20% off per complete group of 3, cap 50%    │
//! │  "XX001" ──► Err(NoRuleFound)                                       │
//! │                                                                     │
//! │  Rules are checked in registration order. Runtime additions are     │
//! │  appended, so built-in rules always win on overlapping prefixes     │
//! │  (first-match is the contract, not an accident).                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rule set is a closed enum rather than trait objects: the dispatch
//! is a single `match`, every rule is `Copy`, and a product can hold its
//! rule by value for the rest of its life.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Grams per kilogram, for by-weight pricing.
const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Units per discount group for tiered pricing.
const TIER_GROUP_SIZE: f64 = 3.0;

/// Discount per complete group, in basis points (2000 = 20%).
const TIER_DISCOUNT_BPS: u32 = 2000;

/// Discount ceiling, in basis points (5000 = 50%).
const TIER_DISCOUNT_CAP_BPS: u32 = 5000;

// =============================================================================
// Quantity Unit
// =============================================================================

/// The unit of measure a rule's quantity is expressed in.
///
/// Weighed products take fractional quantities (kilograms); everything
/// else counts whole units. The console uses this to decide between
/// `2.5 kg` and `3 units` when rendering a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    /// Discrete units (eaches).
    Units,
    /// Kilograms, priced per gram.
    Kilograms,
}

// =============================================================================
// Price Rule
// =============================================================================

/// A pricing strategy: a pure function of (quantity, unit price) → total.
///
/// Exactly one rule applies per valid SKU; the prefix determines the
/// category and the rule never changes after a product is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRule {
    /// Unit-counted products (`EA` prefix): total = quantity × unit price.
    Standard,
    /// Weighed products (`WE` prefix): quantity in kilograms, unit price
    /// per gram, so total = quantity × 1000 × unit price.
    ByWeight,
    /// Volume-discounted products (`SP` prefix): 20% off per complete
    /// group of 3 units, capped at 50% off.
    Tiered,
}

impl PriceRule {
    /// Checks whether this rule applies to a SKU.
    pub fn applies_to(&self, sku: &str) -> bool {
        match self {
            PriceRule::Standard => sku.starts_with("EA"),
            PriceRule::ByWeight => sku.starts_with("WE"),
            PriceRule::Tiered => sku.starts_with("SP"),
        }
    }

    /// The unit of measure for quantities under this rule.
    pub fn unit(&self) -> QuantityUnit {
        match self {
            PriceRule::ByWeight => QuantityUnit::Kilograms,
            PriceRule::Standard | PriceRule::Tiered => QuantityUnit::Units,
        }
    }

    /// Computes the total price for a quantity at a unit price.
    ///
    /// Pure calculation; quantity validity (positive, in stock) is the
    /// caller's concern.
    pub fn total(&self, quantity: f64, unit_price: Money) -> Money {
        match self {
            PriceRule::Standard => unit_price.multiply_decimal(quantity),

            PriceRule::ByWeight => unit_price.multiply_decimal(quantity * GRAMS_PER_KILOGRAM),

            PriceRule::Tiered => {
                let base = unit_price.multiply_decimal(quantity);
                let groups = (quantity / TIER_GROUP_SIZE).floor() as u32;
                let bps = (groups * TIER_DISCOUNT_BPS).min(TIER_DISCOUNT_CAP_BPS);
                base - base.percentage(bps)
            }
        }
    }
}

// =============================================================================
// Rule Registry
// =============================================================================

/// Ordered collection of pricing rules with first-match dispatch.
///
/// ## Ordering Contract
/// `rule_for` returns the **first** rule whose prefix predicate matches.
/// `register` appends, so rules added at runtime never shadow earlier
/// ones on overlapping prefixes.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<PriceRule>,
}

impl RuleRegistry {
    /// Creates a registry with the three built-in rules.
    pub fn new() -> Self {
        RuleRegistry {
            rules: vec![PriceRule::Standard, PriceRule::ByWeight, PriceRule::Tiered],
        }
    }

    /// Returns the first rule applicable to `sku`.
    ///
    /// ## Errors
    /// [`CoreError::NoRuleFound`] when no registered rule matches.
    pub fn rule_for(&self, sku: &str) -> CoreResult<PriceRule> {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(sku))
            .copied()
            .ok_or_else(|| CoreError::NoRuleFound(sku.to_string()))
    }

    /// Registers an additional rule at the end of the match order.
    pub fn register(&mut self, rule: PriceRule) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        RuleRegistry::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
