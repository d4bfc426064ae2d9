//! # Tienda Console
//!
//! Text-menu front end for the in-memory store.
//!
//! ## Usage
//! ```bash
//! cargo run -p tienda-console                       # built-in catalog
//! cargo run -p tienda-console -- --seed shop.json   # catalog from file
//! RUST_LOG=debug cargo run -p tienda-console        # verbose tracing
//! ```
//!
//! ## Menu
//! ```text
//! 1) List products
//! 2) Add to cart (SKU, quantity)
//! 3) Show cart
//! 4) Remove cart item (SKU)
//! 5) Checkout
//! 6) Show accumulated sales total
//! 0) Quit
//! ```
//!
//! Every core error surfaces here as a one-line message; the loop never
//! crashes on bad input.

mod display;
mod seed;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tienda_core::Store;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::display::{print_cart, print_catalog};

fn print_menu() {
    println!("\n=== TIENDA (console) ===");
    println!("1) List products");
    println!("2) Add to cart (SKU, quantity)");
    println!("3) Show cart");
    println!("4) Remove cart item (SKU)");
    println!("5) Checkout");
    println!("6) Show accumulated sales total");
    println!("0) Quit");
}

/// Prompts and reads one trimmed line. `None` on EOF.
fn prompt(stdin: &io::Stdin, message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok();

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Parses `--seed <path>` from the command line, if present.
fn seed_path_from_args() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut store = Store::new();
    match seed_path_from_args() {
        Some(path) => seed::seed_from_file(&mut store, &path)?,
        None => seed::seed_default(&mut store)?,
    }

    info!("store ready, entering menu loop");

    let stdin = io::stdin();
    let mut cart = store.create_cart();

    loop {
        print_menu();
        let Some(option) = prompt(&stdin, "Choose an option: ") else {
            break;
        };

        match option.as_str() {
            "1" => print_catalog(&store),

            "2" => {
                let Some(sku) = prompt(&stdin, "Product SKU: ") else {
                    break;
                };
                let sku = sku.to_uppercase();

                let Some(qty_input) = prompt(&stdin, "Quantity (units, or kg for WE): ") else {
                    break;
                };
                let Ok(qty) = qty_input.parse::<f64>() else {
                    println!("Invalid quantity.");
                    continue;
                };

                match store.add_to_cart(&mut cart, &sku, qty) {
                    Ok(()) => {
                        debug!(%sku, qty, "item added to cart");
                        println!("Item added.");
                        print_cart(&cart);
                    }
                    Err(e) => println!("Error: {e}"),
                }
            }

            "3" => print_cart(&cart),

            "4" => {
                let Some(sku) = prompt(&stdin, "SKU to remove: ") else {
                    break;
                };
                let sku = sku.to_uppercase();

                if cart.remove_item(&sku) {
                    debug!(%sku, "item removed from cart");
                    println!("Item removed.");
                } else {
                    println!("That SKU is not in the cart.");
                }
                print_cart(&cart);
            }

            "5" => match store.checkout(&mut cart) {
                Ok(total) => {
                    info!(%total, "sale completed");
                    println!("\nSale completed! Total: {total}");
                    // Fresh cart for the next customer
                    cart = store.create_cart();
                }
                Err(e) => println!("Error: {e}"),
            },

            "6" => println!("Accumulated sales total: {}", store.total_sales()),

            "0" => break,

            other => println!("Unknown option: {other}"),
        }
    }

    info!(total_sales = %store.total_sales(), "goodbye");
    Ok(())
}
