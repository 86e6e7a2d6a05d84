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

//! Inventory engine.
//!
//! The [`Engine`] is the central component that owns the product store and
//! the audit ledger and exposes the validated operations surface:
//!
//! - **Add**: create a product with an unused ID.
//! - **Restock**: increase stock, in increments of more than 5 units.
//! - **Sell**: move units from stock to the lifetime sold counter.
//! - **Remove**: delete a product permanently.
//! - **Discount preview**: price a discounted sale without mutating anything.
//!
//! Each mutating operation is a single validate → mutate → log step: all
//! preconditions are checked against current state first, then the store is
//! mutated, then exactly one ledger entry is appended. On a validation
//! failure nothing is mutated and nothing is logged.

use crate::base::ProductId;
use crate::error::InventoryError;
use crate::history::{HistoryEntry, Ledger, Operation};
use crate::product::Product;
use crate::store::ProductStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Smallest accepted discount, in percent.
const MIN_DISCOUNT_PERCENT: Decimal = dec!(10.0);
/// Largest accepted discount, in percent.
const MAX_DISCOUNT_PERCENT: Decimal = dec!(20.0);
/// Restocks must add more than this many units at a time.
const MIN_RESTOCK_THRESHOLD: i64 = 5;

/// Inventory engine owning the live product set and the audit ledger.
///
/// # Invariants
///
/// - Product IDs are unique across the live product set.
/// - `quantity >= 0` and `sold >= 0` on every product after every operation.
/// - Exactly one ledger entry is appended per successful mutating operation;
///   failed operations leave both collections untouched.
pub struct Engine {
    store: ProductStore,
    ledger: Ledger,
}

impl Engine {
    /// Creates a new engine with no products and an empty ledger.
    pub fn new() -> Self {
        Engine {
            store: ProductStore::new(),
            ledger: Ledger::new(),
        }
    }

    /// Adds a new product with no units sold yet.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::InvalidArgument`] - Price or quantity is not
    ///   positive, or a name/category bound is violated.
    /// - [`InventoryError::DuplicateId`] - A product with this ID already
    ///   exists.
    pub fn add_product(
        &mut self,
        id: ProductId,
        name: &str,
        category: &str,
        price: Decimal,
        quantity: i64,
    ) -> Result<(), InventoryError> {
        if price <= Decimal::ZERO || quantity <= 0 {
            return Err(InventoryError::invalid("price and quantity must be > 0"));
        }
        if self.store.contains(&id) {
            return Err(InventoryError::DuplicateId);
        }

        let product = Product::new(id, name, category, price, quantity)?;
        let entry = HistoryEntry::now(
            Operation::Add,
            product.id().as_str(),
            quantity,
            price * Decimal::from(quantity),
            "Added product",
        );

        debug!(id = %product.id(), quantity, %price, "added product");
        self.store.insert(product);
        self.ledger.record(entry);
        Ok(())
    }

    /// Increases the stock of an existing product.
    ///
    /// Restocking in small increments is disallowed: `add_qty` must be
    /// greater than 5. This is checked before the product lookup.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::InvalidArgument`] - `add_qty` is 5 or less.
    /// - [`InventoryError::NotFound`] - No product has this ID.
    pub fn update_stock(&mut self, id: &ProductId, add_qty: i64) -> Result<(), InventoryError> {
        if add_qty <= MIN_RESTOCK_THRESHOLD {
            return Err(InventoryError::invalid("quantity to add must be > 5"));
        }

        let product = self.store.find_mut(id).ok_or(InventoryError::NotFound)?;
        product.restock(add_qty);
        let entry = HistoryEntry::now(
            Operation::Update,
            id.as_str(),
            add_qty,
            product.price() * Decimal::from(add_qty),
            "Updated stock",
        );

        debug!(%id, add_qty, "updated stock");
        self.ledger.record(entry);
        Ok(())
    }

    /// Sells units of a product and returns the total revenue.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::InvalidArgument`] - `qty` is not positive.
    /// - [`InventoryError::NotFound`] - No product has this ID.
    /// - [`InventoryError::InsufficientStock`] - `qty` exceeds the stock on
    ///   hand; quantity and sold are left unchanged.
    pub fn sell_product(&mut self, id: &ProductId, qty: i64) -> Result<Decimal, InventoryError> {
        if qty <= 0 {
            return Err(InventoryError::invalid("quantity to sell must be > 0"));
        }

        let product = self.store.find_mut(id).ok_or(InventoryError::NotFound)?;
        if product.quantity() < qty {
            return Err(InventoryError::InsufficientStock);
        }

        product.record_sale(qty);
        let total = product.price() * Decimal::from(qty);
        let entry = HistoryEntry::now(Operation::Sell, id.as_str(), -qty, total, "Sold product");

        debug!(%id, qty, %total, "sold product");
        self.ledger.record(entry);
        Ok(total)
    }

    /// Removes a product permanently.
    ///
    /// The REMOVE entry is recorded before the product is deleted, with the
    /// stock on hand as a negative quantity change and a value change of
    /// zero: removal is not treated as a financial event.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::NotFound`] - No product has this ID.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<(), InventoryError> {
        let product = self.store.find(id).ok_or(InventoryError::NotFound)?;
        let entry = HistoryEntry::now(
            Operation::Remove,
            id.as_str(),
            -product.quantity(),
            Decimal::ZERO,
            "Removed product",
        );

        self.ledger.record(entry);
        self.store.remove(id);
        debug!(%id, "removed product");
        Ok(())
    }

    /// Returns the stock on hand for a product. Pure read; no ledger entry.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::NotFound`] - No product has this ID.
    pub fn stock_level(&self, id: &ProductId) -> Result<i64, InventoryError> {
        self.store
            .find(id)
            .map(Product::quantity)
            .ok_or(InventoryError::NotFound)
    }

    /// Sums `price * quantity` over all live products. An empty store
    /// yields zero. Pure read; no ledger entry.
    pub fn total_stock_value(&self) -> Decimal {
        self.store.iter().map(Product::stock_value).sum()
    }

    /// Prices a discounted sale of `qty` units without mutating the product.
    ///
    /// The discount must be between 10 and 20 percent inclusive. The preview
    /// is still recorded in the ledger as a DISCOUNT entry with a quantity
    /// change of zero.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::InvalidArgument`] - Discount outside [10, 20], or
    ///   `qty` not positive.
    /// - [`InventoryError::NotFound`] - No product has this ID.
    pub fn preview_discount(
        &mut self,
        id: &ProductId,
        qty: i64,
        discount_percent: Decimal,
    ) -> Result<Decimal, InventoryError> {
        if !(MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT).contains(&discount_percent) {
            return Err(InventoryError::invalid("discount must be between 10 and 20"));
        }
        if qty <= 0 {
            return Err(InventoryError::invalid("quantity must be > 0"));
        }

        let product = self.store.find(id).ok_or(InventoryError::NotFound)?;
        let total = product.price() * Decimal::from(qty);
        let discounted = total * (Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED);
        let entry = HistoryEntry::now(
            Operation::Discount,
            id.as_str(),
            0,
            discounted,
            "Applied discount",
        );

        debug!(%id, qty, %discount_percent, %discounted, "applied discount");
        self.ledger.record(entry);
        Ok(discounted)
    }

    /// The live product set, in insertion order. Read-only display surface.
    pub fn products(&self) -> &ProductStore {
        &self.store
    }

    /// Looks up one product for display.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.store.find(id)
    }

    /// The full audit history, oldest first. Read-only display surface.
    pub fn history(&self) -> &[HistoryEntry] {
        self.ledger.entries()
    }

    /// Replaces the full contents of both collections. Only the persistence
    /// adapter calls this, at process startup.
    pub fn restore(&mut self, products: Vec<Product>, history: Vec<HistoryEntry>) {
        self.store.replace(products);
        self.ledger.replace(history);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
