//! # Display Formatting
//!
//! Console rendering for the catalog and the cart. Presentation only:
//! the core exposes the facts (quantity unit, whole-vs-fractional), this
//! module turns them into text.

use tienda_core::{Cart, CartView, LineView, QuantityUnit, Store};

/// Renders one cart line.
///
/// Weighed lines render their quantity in kilograms; unit-counted lines
/// render a plain count (`3 units`, never `3.0`).
pub fn format_line(line: &LineView) -> String {
    let quantity = match line.unit {
        QuantityUnit::Kilograms => format!("{} kg", line.quantity),
        QuantityUnit::Units => format!("{} units", line.quantity),
    };
    format!("{} - Quantity: {} - Subtotal: {}", line.name, quantity, line.total)
}

/// Prints the catalog listing.
pub fn print_catalog(store: &Store) {
    println!("\n=== CATALOG ===");
    let mut any = false;
    for product in store.list_all() {
        let p = product.borrow();
        println!(
            "{:<6} | {:<22} | {:>12} | available: {}",
            p.sku(),
            p.name(),
            p.unit_price().to_string(),
            p.stock()
        );
        any = true;
    }
    if !any {
        println!("(no products)");
    }
}

/// Prints the cart contents, or a placeholder when empty.
pub fn print_cart(cart: &Cart) {
    println!();
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    let view = CartView::from(cart);
    println!("=== SHOPPING CART ===");
    for line in &view.lines {
        println!("{}", format_line(line));
    }
    println!("TOTAL: {}", view.subtotal);
}
