//! # Seed Data
//!
//! Populates the catalog with example products at startup.
//!
//! ## Usage
//! ```bash
//! # Built-in seed (six products across the EA/WE/SP categories)
//! cargo run -p tienda-console
//!
//! # Load the catalog from a JSON file instead
//! cargo run -p tienda-console -- --seed ./catalog.json
//! ```
//!
//! ## JSON Format
//! ```json
//! [
//!   {
//!     "sku": "EA001",
//!     "name": "Laptop Gaming",
//!     "description": "High-end gaming laptop",
//!     "stock": 10,
//!     "unit_price_cents": 150000000
//!   }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tienda_core::{CoreResult, Money, Store};
use tracing::info;

/// One catalog entry in a JSON seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedProduct {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stock: f64,
    pub unit_price_cents: i64,
}

/// Built-in example catalog.
///
/// Mirrors the three pricing categories: unit-counted (EA), weighed
/// per-gram (WE), and tiered-discount (SP).
/// Columns: sku, name, description, stock, unit price in cents.
const DEFAULT_SEED: &[(&str, &str, &str, f64, i64)] = &[
    (
        "EA001",
        "Laptop Gaming",
        "High-performance gaming laptop",
        10.0,
        150_000_000,
    ),
    (
        "EA002",
        "Wireless Mouse",
        "Ergonomic wireless mouse",
        25.0,
        4_500_000,
    ),
    ("WE001", "Beef", "Premium beef, priced per gram", 5000.0, 1_500),
    ("WE002", "Chicken", "Chicken breast, priced per gram", 3000.0, 800),
    (
        "SP001",
        "Headphones",
        "Wireless headphones with volume discount",
        20.0,
        8_000_000,
    ),
    (
        "SP002",
        "Mechanical Keyboard",
        "Gaming keyboard with volume discount",
        15.0,
        12_000_000,
    ),
];

/// Seeds the store with the built-in example catalog.
pub fn seed_default(store: &mut Store) -> CoreResult<()> {
    for (sku, name, description, stock, price_cents) in DEFAULT_SEED {
        store.register(
            *sku,
            *name,
            Some((*description).to_string()),
            *stock,
            Money::from_cents(*price_cents),
        )?;
    }
    info!(products = DEFAULT_SEED.len(), "catalog seeded (built-in)");
    Ok(())
}

/// Seeds the store from a JSON file.
pub fn seed_from_file(store: &mut Store, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let entries: Vec<SeedProduct> = serde_json::from_str(&raw)?;
    let count = entries.len();

    for entry in entries {
        store.register(
            entry.sku,
            entry.name,
            entry.description,
            entry.stock,
            Money::from_cents(entry.unit_price_cents),
        )?;
    }

    info!(products = count, path = %path.display(), "catalog seeded (file)");
    Ok(())
}
