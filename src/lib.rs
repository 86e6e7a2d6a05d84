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

//! # Inventory Demo
//!
//! This library provides a single-user inventory tracking engine: a live
//! product set plus an append-only audit ledger, with validated operations
//! for adding, restocking, selling, removing, and discount-previewing
//! products, persisted to flat CSV files at process boundaries.
//!
//! ## Core Components
//!
//! - [`Engine`]: Central operations surface owning both collections
//! - [`Product`]: A stocked item with price and quantity/sold counters
//! - [`HistoryEntry`]: One immutable audit record per completed operation
//! - [`InventoryError`]: Error types for operation failures
//! - [`storage`]: The flat-file persistence adapter
//!
//! ## Example
//!
//! ```
//! use inventory_demo_rs::{Engine, ProductId};
//! use rust_decimal_macros::dec;
//!
//! let mut engine = Engine::new();
//! let id = ProductId::new("P001").unwrap();
//!
//! // Stock a product, then sell three units
//! engine
//!     .add_product(id.clone(), "Laptop", "Electronics", dec!(999.99), 10)
//!     .unwrap();
//! let total = engine.sell_product(&id, 3).unwrap();
//!
//! assert_eq!(total, dec!(2999.97));
//! assert_eq!(engine.stock_level(&id).unwrap(), 7);
//! assert_eq!(engine.history().len(), 2);
//! ```
//!
//! ## Atomicity
//!
//! Every mutating operation validates all preconditions first, then
//! mutates, then appends exactly one ledger entry. A failed operation
//! leaves both collections untouched. The engine is single-threaded by
//! design: there is exactly one writer and no operation yields mid-call.

mod base;
mod engine;
pub mod error;
mod history;
mod product;
pub mod storage;
mod store;

pub use base::ProductId;
pub use engine::Engine;
pub use error::InventoryError;
pub use history::{HistoryEntry, Operation};
pub use product::Product;
pub use store::ProductStore;
