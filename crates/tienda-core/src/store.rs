//! # Store
//!
//! The catalog: owns the product set, creates carts, routes add-to-cart
//! requests by SKU, and accumulates completed-sale totals.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Store Data Flow                              │
//! │                                                                     │
//! │  register(sku, ..) ──► RuleRegistry ──► Product ──► products[]      │
//! │                                                                     │
//! │  add_to_cart(cart, sku, qty) ──► find(sku) ──► cart.add_item        │
//! │                                                                     │
//! │  checkout(cart) ──► cart.checkout() ──► total_sales += total        │
//! │                                                                     │
//! │  total_sales starts at zero and grows only through successful       │
//! │  checkouts. It is instance state: independent stores (e.g. in       │
//! │  tests) never interfere.                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{PriceRule, RuleRegistry};
use crate::product::{Product, SharedProduct};

// =============================================================================
// Store
// =============================================================================

/// The catalog and sales ledger for one session.
#[derive(Debug)]
pub struct Store {
    /// Products in registration order, unique by SKU.
    products: Vec<SharedProduct>,

    /// Pricing rule dispatch for product construction.
    registry: RuleRegistry,

    /// Running total of completed sales. Monotonically non-decreasing.
    total_sales: Money,
}

impl Store {
    /// Creates an empty store with the built-in pricing rules.
    pub fn new() -> Self {
        Store {
            products: Vec::new(),
            registry: RuleRegistry::new(),
            total_sales: Money::zero(),
        }
    }

    /// Registers a product in the catalog.
    ///
    /// ## Errors
    /// - [`CoreError::DuplicateCode`] when the SKU is already registered
    /// - [`CoreError::InvalidCode`] (and validation errors) propagated from
    ///   [`Product::new`]
    pub fn register(
        &mut self,
        sku: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        stock: f64,
        unit_price: Money,
    ) -> CoreResult<SharedProduct> {
        let sku = sku.into();

        if self.find(&sku).is_some() {
            return Err(CoreError::DuplicateCode(sku));
        }

        let product =
            Product::new(&self.registry, sku, name, description, stock, unit_price)?.into_shared();
        self.products.push(SharedProduct::clone(&product));
        Ok(product)
    }

    /// Looks up a product by SKU. Absence is not an error.
    pub fn find(&self, sku: &str) -> Option<SharedProduct> {
        self.products
            .iter()
            .find(|p| p.borrow().sku() == sku)
            .map(SharedProduct::clone)
    }

    /// All products, in registration order.
    pub fn list_all(&self) -> impl Iterator<Item = &SharedProduct> {
        self.products.iter()
    }

    /// Number of registered products.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Creates a fresh empty cart. The store keeps no link to it.
    pub fn create_cart(&self) -> Cart {
        Cart::new()
    }

    /// Adds `qty` of the product with `sku` to `cart`.
    ///
    /// ## Errors
    /// - [`CoreError::ProductNotFound`] when the SKU is not in the catalog
    /// - Everything [`Cart::add_item`] reports
    pub fn add_to_cart(&self, cart: &mut Cart, sku: &str, qty: f64) -> CoreResult<()> {
        let product = self
            .find(sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))?;
        cart.add_item(&product, qty)
    }

    /// Settles `cart` and records the sale.
    ///
    /// Delegates to [`Cart::checkout`]; on success the total is added to
    /// the sales accumulator and returned. On failure the accumulator is
    /// untouched.
    pub fn checkout(&mut self, cart: &mut Cart) -> CoreResult<Money> {
        let total = cart.checkout()?;
        self.total_sales += total;
        Ok(total)
    }

    /// Accumulated value of all completed sales.
    pub fn total_sales(&self) -> Money {
        self.total_sales
    }

    /// Registers an additional pricing rule, appended after the existing
    /// ones (first-match-wins order is preserved).
    ///
    /// Only affects products registered afterwards: existing products keep
    /// the rule bound at their construction.
    pub fn register_rule(&mut self, rule: PriceRule) {
        self.registry.register(rule);
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> Store {
        let mut store = Store::new();
        store
            .register("EA001", "Laptop", None, 10.0, Money::from_cents(150_000))
            .unwrap();
        store
            .register("WE001", "Beef", None, 5000.0, Money::from_cents(15))
            .unwrap();
        store
            .register("SP001", "Headphones", None, 20.0, Money::from_cents(8_000))
            .unwrap();
        store
    }

    #[test]
    fn test_register_and_find() {
        let store = seeded_store();
        assert_eq!(store.product_count(), 3);
        assert!(store.find("EA001").is_some());
        assert!(store.find("EA999").is_none());
    }

    #[test]
    fn test_register_duplicate_sku_fails() {
        let mut store = seeded_store();
        let err = store
            .register("EA001", "Another Laptop", None, 1.0, Money::zero())
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCode(sku) if sku == "EA001"));
        assert_eq!(store.product_count(), 3);
    }

    #[test]
    fn test_register_unknown_prefix_fails() {
        let mut store = Store::new();
        let err = store
            .register("XX001", "Mystery", None, 1.0, Money::zero())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidCode(_)));
        assert_eq!(store.product_count(), 0);
    }

    #[test]
    fn test_list_all_preserves_registration_order() {
        let store = seeded_store();
        let skus: Vec<String> = store
            .list_all()
            .map(|p| p.borrow().sku().to_string())
            .collect();
        assert_eq!(skus, ["EA001", "WE001", "SP001"]);
    }

    #[test]
    fn test_add_to_cart_unknown_sku_fails() {
        let store = seeded_store();
        let mut cart = store.create_cart();
        let err = store.add_to_cart(&mut cart, "EA999", 1.0).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_accumulates_sales() {
        let mut store = seeded_store();

        let mut cart = store.create_cart();
        store.add_to_cart(&mut cart, "EA001", 1.0).unwrap();
        let a = store.checkout(&mut cart).unwrap();

        let mut cart = store.create_cart();
        store.add_to_cart(&mut cart, "SP001", 3.0).unwrap();
        let b = store.checkout(&mut cart).unwrap();

        assert_eq!(store.total_sales(), a + b);
        assert_eq!(a.cents(), 150_000);
        assert_eq!(b.cents(), 19_200); // base 24,000, one group → 20% off
    }

    #[test]
    fn test_abandoned_cart_does_not_affect_sales() {
        let mut store = seeded_store();
        let before = store.total_sales();

        let mut abandoned = store.create_cart();
        store.add_to_cart(&mut abandoned, "EA001", 2.0).unwrap();
        drop(abandoned);

        assert_eq!(store.total_sales(), before);
        // And the stock is still fully available: nothing is deducted
        // before checkout.
        assert_eq!(store.find("EA001").unwrap().borrow().stock(), 10.0);
    }

    #[test]
    fn test_failed_checkout_leaves_accumulator_untouched() {
        let mut store = seeded_store();
        let mut cart = store.create_cart();
        assert!(matches!(
            store.checkout(&mut cart),
            Err(CoreError::EmptyCart)
        ));
        assert!(store.total_sales().is_zero());
    }

    #[test]
    fn test_checkout_deducts_catalog_stock() {
        let mut store = seeded_store();
        let mut cart = store.create_cart();
        store.add_to_cart(&mut cart, "WE001", 2.5).unwrap();
        store.checkout(&mut cart).unwrap();

        assert_eq!(store.find("WE001").unwrap().borrow().stock(), 4997.5);
    }

    #[test]
    fn test_register_rule_appends_without_shadowing() {
        let mut store = seeded_store();
        store.register_rule(PriceRule::Standard);

        // Built-in dispatch is unchanged for new registrations.
        let p = store
            .register("SP002", "Keyboard", None, 15.0, Money::from_cents(12_000))
            .unwrap();
        assert_eq!(p.borrow().rule(), PriceRule::Tiered);
    }

    #[test]
    fn test_independent_stores_do_not_interfere() {
        let mut a = seeded_store();
        let b = seeded_store();

        let mut cart = a.create_cart();
        a.add_to_cart(&mut cart, "EA001", 1.0).unwrap();
        a.checkout(&mut cart).unwrap();

        assert!(!a.total_sales().is_zero());
        assert!(b.total_sales().is_zero());
        assert_eq!(b.find("EA001").unwrap().borrow().stock(), 10.0);
    }
}
