//! # Cart
//!
//! The shopping cart: an ordered collection of lines, unique by product
//! SKU, with a checkout that commits stock deductions atomically.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                               │
//! │                                                                     │
//! │  Menu Action              Cart Change                               │
//! │  ───────────              ───────────                               │
//! │  Add (new SKU)    ──────► lines.push(CartLine::new(..)?)            │
//! │  Add (known SKU)  ──────► line.set_quantity(existing + qty)?        │
//! │  Remove (SKU)     ──────► lines.retain(..) → bool                   │
//! │  Checkout         ──────► validate ALL, deduct ALL, clear, total    │
//! │                                                                     │
//! │  Checkout is two-phase: if any line cannot be supplied, no          │
//! │  product is mutated and no line is cleared.                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::QuantityUnit;
use crate::product::SharedProduct;
use crate::validation::validate_quantity;

// =============================================================================
// Cart Line
// =============================================================================

/// One cart entry: a product handle, a quantity, and a cached total.
///
/// ## Cache Invariant
/// `total` always equals `product.price_for(quantity)`. It is recomputed
/// on every quantity change, never left stale.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// Shared handle to the catalog product (not a snapshot: stock checks
    /// and deductions go against live inventory).
    product: SharedProduct,

    /// Quantity in the product's unit (units or kilograms).
    quantity: f64,

    /// Cached line total.
    total: Money,
}

impl CartLine {
    /// Creates a line, validating quantity and availability.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidQuantity`] when `qty <= 0` or non-finite
    /// - [`CoreError::InsufficientStock`] when the product cannot supply `qty`
    pub fn new(product: SharedProduct, qty: f64) -> CoreResult<Self> {
        validate_quantity(qty)?;

        let total = {
            let p = product.borrow();
            if !p.has_stock(qty) {
                return Err(CoreError::InsufficientStock {
                    sku: p.sku().to_string(),
                    available: p.stock(),
                    requested: qty,
                });
            }
            p.price_for(qty)
        };

        Ok(CartLine {
            product,
            quantity: qty,
            total,
        })
    }

    /// Replaces the quantity and recomputes the cached total.
    ///
    /// When the quantity grows, availability is re-validated for the
    /// **increment** only (the previous quantity is already reserved
    /// logically). On failure nothing is mutated.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidQuantity`] when `new_qty <= 0` or non-finite
    /// - [`CoreError::InsufficientStock`] when the increment is unavailable
    pub fn set_quantity(&mut self, new_qty: f64) -> CoreResult<()> {
        validate_quantity(new_qty)?;

        let total = {
            let p = self.product.borrow();
            if new_qty > self.quantity {
                let increment = new_qty - self.quantity;
                if !p.has_stock(increment) {
                    return Err(CoreError::InsufficientStock {
                        sku: p.sku().to_string(),
                        available: p.stock(),
                        requested: increment,
                    });
                }
            }
            p.price_for(new_qty)
        };

        self.quantity = new_qty;
        self.total = total;
        Ok(())
    }

    /// Shared handle to the bound product.
    pub fn product(&self) -> &SharedProduct {
        &self.product
    }

    /// SKU of the bound product.
    pub fn sku(&self) -> String {
        self.product.borrow().sku().to_string()
    }

    /// Current quantity.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Cached line total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Unit of measure for this line's quantity.
    pub fn unit(&self) -> QuantityUnit {
        self.product.borrow().unit()
    }

    /// Whether the quantity has no fractional part.
    ///
    /// Unit-counted lines render as whole numbers; weighed lines may not.
    pub fn is_whole_quantity(&self) -> bool {
        self.quantity.fract() == 0.0
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product SKU (adding the same product merges
///   quantities into its existing line)
/// - Insertion order is preserved
/// - Checkout is all-or-nothing
#[derive(Debug, Clone)]
pub struct Cart {
    /// Lines in insertion order.
    lines: Vec<CartLine>,

    /// When the cart was created.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, merging into an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: `set_quantity(existing + qty)` on that
    ///   line; on shortage the error propagates and nothing changes
    /// - Product not in cart: a new line is validated and appended
    pub fn add_item(&mut self, product: &SharedProduct, qty: f64) -> CoreResult<()> {
        let sku = product.borrow().sku().to_string();

        if let Some(line) = self.lines.iter_mut().find(|l| l.sku() == sku) {
            let merged = line.quantity() + qty;
            return line.set_quantity(merged);
        }

        let line = CartLine::new(SharedProduct::clone(product), qty)?;
        self.lines.push(line);
        Ok(())
    }

    /// Removes the line bound to `sku`, reporting whether one was removed.
    ///
    /// A missing SKU is not an error.
    pub fn remove_item(&mut self, sku: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.sku() != sku);
        self.lines.len() != initial_len
    }

    /// Sum of all cached line totals. Zero for an empty cart.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.total())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Read-only iteration over the lines, in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Cart creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Settles the cart: deducts every line's quantity from its product,
    /// clears the lines, and returns the total.
    ///
    /// ## Atomicity
    /// Two-phase. Every line's stock is re-validated before the first
    /// deduction; a shortage anywhere aborts with no product mutated and
    /// no line cleared. Stock is not exclusively held between add and
    /// checkout, so the re-validation is what makes this all-or-nothing.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when there are no lines
    /// - [`CoreError::InsufficientStock`] when any line can no longer be
    ///   supplied
    pub fn checkout(&mut self) -> CoreResult<Money> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        // Phase 1: validate every line before touching any stock.
        for line in &self.lines {
            let p = line.product.borrow();
            if !p.has_stock(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    sku: p.sku().to_string(),
                    available: p.stock(),
                    requested: line.quantity,
                });
            }
        }

        // Phase 2: commit. Lines are SKU-unique, so each product is
        // borrowed at most once and every deduction was just validated.
        for line in &self.lines {
            line.product.borrow_mut().deduct(line.quantity)?;
        }

        let total = self.subtotal();
        self.lines.clear();
        Ok(total)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Display Snapshots
// =============================================================================

/// Serializable snapshot of one cart line, for display.
#[derive(Debug, Clone, Serialize)]
pub struct LineView {
    pub sku: String,
    pub name: String,
    pub quantity: f64,
    pub unit: QuantityUnit,
    /// True when the quantity has no fractional part (render `3`, not `3.0`).
    pub whole_quantity: bool,
    pub total: Money,
}

impl From<&CartLine> for LineView {
    fn from(line: &CartLine) -> Self {
        let p = line.product().borrow();
        LineView {
            sku: p.sku().to_string(),
            name: p.name().to_string(),
            quantity: line.quantity(),
            unit: line.unit(),
            whole_quantity: line.is_whole_quantity(),
            total: line.total(),
        }
    }
}

/// Serializable snapshot of the whole cart, for display.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<LineView>,
    pub subtotal: Money,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart.lines().map(LineView::from).collect(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::RuleRegistry;
    use crate::product::Product;

    fn shared_product(sku: &str, stock: f64, price_cents: i64) -> SharedProduct {
        Product::new(
            &RuleRegistry::new(),
            sku,
            format!("Product {sku}"),
            None,
            stock,
            Money::from_cents(price_cents),
        )
        .unwrap()
        .into_shared()
    }

    #[test]
    fn test_line_caches_total() {
        let p = shared_product("EA001", 10.0, 500);
        let line = CartLine::new(SharedProduct::clone(&p), 2.0).unwrap();
        assert_eq!(line.total().cents(), 1000);
        assert_eq!(line.total(), p.borrow().price_for(2.0));
    }

    #[test]
    fn test_line_rejects_invalid_quantity() {
        let p = shared_product("EA001", 10.0, 500);
        assert!(matches!(
            CartLine::new(SharedProduct::clone(&p), 0.0),
            Err(CoreError::InvalidQuantity(_))
        ));
        assert!(matches!(
            CartLine::new(p, -1.0),
            Err(CoreError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_line_rejects_insufficient_stock() {
        let p = shared_product("EA001", 5.0, 500);
        assert!(matches!(
            CartLine::new(p, 6.0),
            Err(CoreError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn test_set_quantity_recomputes_total() {
        let p = shared_product("SP001", 20.0, 100);
        let mut line = CartLine::new(SharedProduct::clone(&p), 2.0).unwrap();
        assert_eq!(line.total().cents(), 200); // below the discount tier

        line.set_quantity(3.0).unwrap();
        assert_eq!(line.total().cents(), 240); // one group → 20% off
        assert_eq!(line.total(), p.borrow().price_for(3.0));
    }

    #[test]
    fn test_set_quantity_validates_increment_only() {
        // Stock 5, line holds 4; growing to 8 needs an increment of 4,
        // which the product can still supply (stock is deducted only at
        // checkout), while growing by 6 cannot be.
        let p = shared_product("EA001", 5.0, 100);
        let mut line = CartLine::new(SharedProduct::clone(&p), 4.0).unwrap();

        assert!(line.set_quantity(8.0).is_ok());
        let err = line.set_quantity(15.0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { requested, .. } if requested == 7.0
        ));
        // Failed update must not mutate.
        assert_eq!(line.quantity(), 8.0);
        assert_eq!(line.total(), p.borrow().price_for(8.0));
    }

    #[test]
    fn test_whole_quantity_flag() {
        let units = shared_product("EA001", 10.0, 100);
        let weighed = shared_product("WE001", 10.0, 15);

        let line = CartLine::new(units, 3.0).unwrap();
        assert!(line.is_whole_quantity());
        assert_eq!(line.unit(), QuantityUnit::Units);

        let line = CartLine::new(weighed, 2.5).unwrap();
        assert!(!line.is_whole_quantity());
        assert_eq!(line.unit(), QuantityUnit::Kilograms);
    }

    #[test]
    fn test_add_item_merges_and_recomputes() {
        let p = shared_product("SP001", 20.0, 100);
        let mut cart = Cart::new();

        cart.add_item(&p, 2.0).unwrap();
        cart.add_item(&p, 3.0).unwrap();

        assert_eq!(cart.line_count(), 1);
        let line = cart.lines().next().unwrap();
        assert_eq!(line.quantity(), 5.0);
        // The merged total is a single price_for(5) computation, never the
        // sum of two separately cached totals.
        assert_eq!(line.total(), p.borrow().price_for(5.0));
        assert_eq!(line.total().cents(), 400); // base 500, one group → 20% off
    }

    #[test]
    fn test_add_item_insufficient_stock_leaves_cart_unchanged() {
        let p = shared_product("EA001", 5.0, 100);
        let other = shared_product("EA002", 5.0, 200);
        let mut cart = Cart::new();
        cart.add_item(&other, 1.0).unwrap();

        let err = cart.add_item(&p, 6.0).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines().next().unwrap().quantity(), 1.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let a = shared_product("EA001", 10.0, 100);
        let b = shared_product("WE001", 10.0, 15);
        let c = shared_product("SP001", 10.0, 100);
        let mut cart = Cart::new();
        cart.add_item(&a, 1.0).unwrap();
        cart.add_item(&b, 1.0).unwrap();
        cart.add_item(&c, 1.0).unwrap();

        let skus: Vec<String> = cart.lines().map(|l| l.sku()).collect();
        assert_eq!(skus, ["EA001", "WE001", "SP001"]);
    }

    #[test]
    fn test_remove_item() {
        let p = shared_product("EA001", 10.0, 100);
        let mut cart = Cart::new();
        cart.add_item(&p, 2.0).unwrap();

        assert!(!cart.remove_item("EA999"));
        assert_eq!(cart.line_count(), 1);

        assert!(cart.remove_item("EA001"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal() {
        let a = shared_product("EA001", 10.0, 500);
        let b = shared_product("WE001", 10.0, 15);
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Money::zero());

        cart.add_item(&a, 2.0).unwrap();
        cart.add_item(&b, 1.0).unwrap();
        assert_eq!(cart.subtotal().cents(), 1000 + 15_000);
    }

    #[test]
    fn test_checkout_deducts_clears_and_returns_total() {
        let a = shared_product("EA001", 10.0, 500);
        let b = shared_product("WE001", 5.0, 15);
        let mut cart = Cart::new();
        cart.add_item(&a, 2.0).unwrap();
        cart.add_item(&b, 1.5).unwrap();

        let expected = cart.subtotal();
        let total = cart.checkout().unwrap();

        assert_eq!(total, expected);
        assert!(cart.is_empty());
        assert_eq!(a.borrow().stock(), 8.0);
        assert_eq!(b.borrow().stock(), 3.5);
    }

    #[test]
    fn test_checkout_on_empty_cart_fails() {
        let mut cart = Cart::new();
        assert!(matches!(cart.checkout(), Err(CoreError::EmptyCart)));

        // And a second checkout right after a successful one.
        let p = shared_product("EA001", 10.0, 500);
        cart.add_item(&p, 1.0).unwrap();
        cart.checkout().unwrap();
        assert!(matches!(cart.checkout(), Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_checkout_is_all_or_nothing() {
        let a = shared_product("EA001", 10.0, 500);
        let b = shared_product("EA002", 5.0, 200);
        let mut cart = Cart::new();
        cart.add_item(&a, 2.0).unwrap();
        cart.add_item(&b, 5.0).unwrap();

        // A retroactive shortage on the *second* line: something else
        // drains its stock between add and checkout.
        b.borrow_mut().deduct(3.0).unwrap();

        let err = cart.checkout().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { ref sku, .. } if sku == "EA002"
        ));

        // No deduction anywhere (including the valid first line), lines intact.
        assert_eq!(a.borrow().stock(), 10.0);
        assert_eq!(b.borrow().stock(), 2.0);
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_cart_view_snapshot() {
        let a = shared_product("WE001", 10.0, 15);
        let mut cart = Cart::new();
        cart.add_item(&a, 2.5).unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].sku, "WE001");
        assert_eq!(view.lines[0].unit, QuantityUnit::Kilograms);
        assert!(!view.lines[0].whole_quantity);
        assert_eq!(view.subtotal, cart.subtotal());
    }
}
