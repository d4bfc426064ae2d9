//! # tienda-core: Pure Business Logic for Tienda
//!
//! This crate is the **heart** of Tienda, a small in-memory retail
//! checkout simulator. It contains all business logic as pure functions
//! and plain types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Tienda Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/console (REPL)                        │   │
//! │  │   list ──► add to cart ──► show cart ──► checkout           │   │
//! │  │   prompts, parsing, printing, tracing                       │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                  │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │   │
//! │  │   │ pricing │ │ product │ │  cart   │ │  store  │           │   │
//! │  │   │ rules + │ │ stock + │ │ lines + │ │ catalog │           │   │
//! │  │   │ registry│ │ price   │ │ checkout│ │ + sales │           │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘           │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO GLOBALS • EXPLICIT ERRORS                     │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Domain error types (`CoreError`)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Pricing rules and SKU-prefix dispatch
//! - [`validation`] - Business rule validation
//! - [`product`] - Catalog entries with stock bookkeeping
//! - [`cart`] - Cart lines, aggregation, and atomic checkout
//! - [`store`] - Catalog, cart factory, and sales accumulator
//!
//! ## Design Principles
//!
//! 1. **Pure Core**: Console I/O lives in the app; nothing here prints or logs
//! 2. **Integer Money**: All monetary values are cents (i64); quantities are
//!    the only floats, and every product of the two rounds to a cent
//! 3. **Explicit Errors**: All errors are typed variants, never strings or
//!    panics
//! 4. **Instance State**: The sales accumulator lives on `Store`, so
//!    independent stores (e.g., in tests) never interfere
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::{Money, Store};
//!
//! let mut store = Store::new();
//! store.register("SP001", "Headphones", None, 20.0, Money::from_cents(8_000))?;
//!
//! let mut cart = store.create_cart();
//! store.add_to_cart(&mut cart, "SP001", 3.0)?;
//!
//! // Three units: one complete discount group, 20% off
//! assert_eq!(cart.subtotal().cents(), 19_200);
//!
//! let total = store.checkout(&mut cart)?;
//! assert_eq!(store.total_sales(), total);
//! assert!(cart.is_empty());
//! # Ok::<(), tienda_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod product;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tienda_core::Money` instead of
// `use tienda_core::money::Money`

pub use cart::{Cart, CartLine, CartView, LineView};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use pricing::{PriceRule, QuantityUnit, RuleRegistry};
pub use product::{Product, SharedProduct};
pub use store::Store;
