// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::{Parser, Subcommand};
use inventory_demo_rs::{Engine, InventoryError, ProductId, storage};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const PRODUCTS_FILE: &str = "products.csv";
const HISTORY_FILE: &str = "history.csv";

/// Inventory Tracker - Manage a product inventory from the command line
///
/// Loads the product set and operation history from CSV files on startup,
/// runs one command, and saves both files back after a mutating command.
#[derive(Parser, Debug)]
#[command(name = "inventory-demo-rs")]
#[command(about = "An inventory tracker with an append-only operation history", long_about = None)]
struct Args {
    /// Directory holding products.csv and history.csv
    #[arg(long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new product
    Add {
        id: String,
        name: String,
        category: String,
        price: Decimal,
        quantity: i64,
    },
    /// Restock an existing product (more than 5 units at a time)
    Restock { id: String, quantity: i64 },
    /// Sell units of a product and show the revenue
    Sell { id: String, quantity: i64 },
    /// Remove a product permanently
    Remove { id: String },
    /// Preview a discounted total (10-20%) without changing the product
    Discount {
        id: String,
        quantity: i64,
        percent: Decimal,
    },
    /// Show the stock level of a product
    Stock { id: String },
    /// Show the total value of all stock on hand
    Value,
    /// List all products
    List,
    /// Show the operation history
    History,
}

impl Command {
    /// Mutating commands require a save afterwards; a discount preview
    /// mutates the history even though it leaves the product untouched.
    fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add { .. }
                | Command::Restock { .. }
                | Command::Sell { .. }
                | Command::Remove { .. }
                | Command::Discount { .. }
        )
    }
}

fn main() {
    // Logging is configurable via RUST_LOG; default to warnings only.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut engine = Engine::new();
    load(&mut engine, &args.data_dir);

    let mutates = args.command.mutates();
    if let Err(e) = run(&mut engine, args.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    if mutates {
        save(&engine, &args.data_dir);
    }
}

/// Populates the engine from the data directory, best-effort: a missing
/// file means no prior data, and read failures only produce warnings.
fn load(engine: &mut Engine, data_dir: &Path) {
    let products = match storage::load_products(data_dir.join(PRODUCTS_FILE)) {
        Ok(products) => products,
        Err(e) => {
            warn!("error loading products: {e}");
            Vec::new()
        }
    };
    let history = match storage::load_history(data_dir.join(HISTORY_FILE)) {
        Ok(history) => history,
        Err(e) => {
            warn!("error loading history: {e}");
            Vec::new()
        }
    };
    engine.restore(products, history);
}

/// Saves both collections back to the data directory, best-effort.
fn save(engine: &Engine, data_dir: &Path) {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        warn!("error creating data directory: {e}");
    }
    if let Err(e) = storage::save_products(engine, data_dir.join(PRODUCTS_FILE)) {
        warn!("error saving products: {e}");
    }
    if let Err(e) = storage::save_history(engine, data_dir.join(HISTORY_FILE)) {
        warn!("error saving history: {e}");
    }
}

fn run(engine: &mut Engine, command: Command) -> Result<(), InventoryError> {
    match command {
        Command::Add {
            id,
            name,
            category,
            price,
            quantity,
        } => {
            let id = ProductId::new(id)?;
            engine.add_product(id.clone(), &name, &category, price, quantity)?;
            println!("Added product {id}");
        }
        Command::Restock { id, quantity } => {
            let id = ProductId::new(id)?;
            engine.update_stock(&id, quantity)?;
            println!(
                "Restocked {id}, now {} in stock",
                engine.stock_level(&id)?
            );
        }
        Command::Sell { id, quantity } => {
            let id = ProductId::new(id)?;
            let total = engine.sell_product(&id, quantity)?;
            println!("Sold {quantity} x {id} for {total}");
        }
        Command::Remove { id } => {
            let id = ProductId::new(id)?;
            engine.remove_product(&id)?;
            println!("Removed product {id}");
        }
        Command::Discount {
            id,
            quantity,
            percent,
        } => {
            let id = ProductId::new(id)?;
            let total = engine.preview_discount(&id, quantity, percent)?;
            println!("Discounted total for {quantity} x {id}: {total}");
        }
        Command::Stock { id } => {
            let id = ProductId::new(id)?;
            println!("{}", engine.stock_level(&id)?);
        }
        Command::Value => {
            println!("{}", engine.total_stock_value());
        }
        Command::List => {
            println!(
                "{:<12} {:<24} {:<12} {:>10} {:>6} {:>6}",
                "ID", "NAME", "CATEGORY", "PRICE", "QTY", "SOLD"
            );
            for p in engine.products().iter() {
                println!(
                    "{:<12} {:<24} {:<12} {:>10} {:>6} {:>6}",
                    p.id(),
                    p.name(),
                    p.category(),
                    p.price(),
                    p.quantity(),
                    p.sold()
                );
            }
        }
        Command::History => {
            for e in engine.history() {
                println!(
                    "{} {:<8} {:<12} {:>6} {:>10}  {}",
                    e.timestamp().format("%Y-%m-%d %H:%M:%S"),
                    e.operation(),
                    e.product_id(),
                    e.quantity_change(),
                    e.value_change(),
                    e.description()
                );
            }
        }
    }
    Ok(())
}
