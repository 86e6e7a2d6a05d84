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

//! Product records.
//!
//! A [`Product`] is a stocked item with identity, price, and mutable
//! quantity/sold counters. Fields are private; stock only changes through
//! the crate-internal mutators driven by the engine.
//!
//! # Example
//!
//! ```
//! use inventory_demo_rs::{Product, ProductId};
//! use rust_decimal_macros::dec;
//!
//! let id = ProductId::new("P001").unwrap();
//! let product = Product::new(id, "Laptop", "Electronics", dec!(999.99), 10).unwrap();
//! assert_eq!(product.quantity(), 10);
//! assert_eq!(product.sold(), 0);
//! ```

use crate::base::ProductId;
use crate::error::InventoryError;
use rust_decimal::Decimal;

/// A stocked item.
///
/// # Invariants
///
/// - `quantity >= 0` and `sold >= 0` at all times.
/// - `price > 0`, fixed at creation.
/// - `sold` is monotonically non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    price: Decimal,
    quantity: i64,
    sold: i64,
}

impl Product {
    /// Maximum length of a product name, in bytes.
    pub const MAX_NAME_LEN: usize = 63;
    /// Maximum length of a category, in bytes.
    pub const MAX_CATEGORY_LEN: usize = 31;

    /// Creates a product with no units sold yet.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidArgument`] if the name is empty or
    /// over-length, the category is over-length, the price is not positive,
    /// or the quantity is negative.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Result<Self, InventoryError> {
        let name = name.into();
        let category = category.into();

        if name.is_empty() {
            return Err(InventoryError::invalid("product name must not be empty"));
        }
        if name.len() > Self::MAX_NAME_LEN {
            return Err(InventoryError::invalid(format!(
                "product name must be at most {} bytes",
                Self::MAX_NAME_LEN
            )));
        }
        if category.len() > Self::MAX_CATEGORY_LEN {
            return Err(InventoryError::invalid(format!(
                "category must be at most {} bytes",
                Self::MAX_CATEGORY_LEN
            )));
        }
        if price <= Decimal::ZERO {
            return Err(InventoryError::invalid("price must be > 0"));
        }
        if quantity < 0 {
            return Err(InventoryError::invalid("quantity must not be negative"));
        }

        let product = Self {
            id,
            name,
            category,
            price,
            quantity,
            sold: 0,
        };
        product.assert_invariants();
        Ok(product)
    }

    /// Restores the lifetime sold counter on a product loaded from storage.
    pub(crate) fn with_sold(mut self, sold: i64) -> Result<Self, InventoryError> {
        if sold < 0 {
            return Err(InventoryError::invalid("sold count must not be negative"));
        }
        self.sold = sold;
        self.assert_invariants();
        Ok(self)
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn sold(&self) -> i64 {
        self.sold
    }

    /// Returns `price * quantity`, the value of the stock on hand.
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Increases the stock on hand. The caller validates the increment.
    pub(crate) fn restock(&mut self, qty: i64) {
        self.quantity += qty;
        self.assert_invariants();
    }

    /// Moves units from stock to the lifetime sold counter. The caller
    /// validates that enough stock is on hand.
    pub(crate) fn record_sale(&mut self, qty: i64) {
        self.quantity -= qty;
        self.sold += qty;
        self.assert_invariants();
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.quantity >= 0,
            "Invariant violated: quantity went negative: {}",
            self.quantity
        );
        debug_assert!(
            self.sold >= 0,
            "Invariant violated: sold count went negative: {}",
            self.sold
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pid(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    #[test]
    fn new_product_starts_with_zero_sold() {
        let p = Product::new(pid("P001"), "Laptop", "Electronics", dec!(999.99), 10).unwrap();
        assert_eq!(p.sold(), 0);
        assert_eq!(p.quantity(), 10);
        assert_eq!(p.price(), dec!(999.99));
    }

    #[test]
    fn rejects_non_positive_price() {
        let result = Product::new(pid("P001"), "Laptop", "Electronics", dec!(0), 10);
        assert!(matches!(result, Err(InventoryError::InvalidArgument(_))));

        let result = Product::new(pid("P001"), "Laptop", "Electronics", dec!(-1.50), 10);
        assert!(matches!(result, Err(InventoryError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_empty_name() {
        let result = Product::new(pid("P001"), "", "Electronics", dec!(1.00), 1);
        assert!(matches!(result, Err(InventoryError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_over_length_name() {
        let result = Product::new(pid("P001"), "x".repeat(64), "Electronics", dec!(1.00), 1);
        assert!(matches!(result, Err(InventoryError::InvalidArgument(_))));
        assert!(Product::new(pid("P001"), "x".repeat(63), "Electronics", dec!(1.00), 1).is_ok());
    }

    #[test]
    fn rejects_over_length_category() {
        let result = Product::new(pid("P001"), "Laptop", "c".repeat(32), dec!(1.00), 1);
        assert!(matches!(result, Err(InventoryError::InvalidArgument(_))));
    }

    #[test]
    fn empty_category_is_allowed() {
        assert!(Product::new(pid("P001"), "Laptop", "", dec!(1.00), 1).is_ok());
    }

    #[test]
    fn restock_and_sale_update_counters() {
        let mut p = Product::new(pid("P001"), "Laptop", "Electronics", dec!(10.00), 5).unwrap();
        p.restock(6);
        assert_eq!(p.quantity(), 11);

        p.record_sale(4);
        assert_eq!(p.quantity(), 7);
        assert_eq!(p.sold(), 4);
    }

    #[test]
    fn stock_value_is_price_times_quantity() {
        let p = Product::new(pid("P001"), "Laptop", "Electronics", dec!(10.50), 4).unwrap();
        assert_eq!(p.stock_value(), dec!(42.00));
    }

    #[test]
    fn with_sold_rejects_negative_count() {
        let p = Product::new(pid("P001"), "Laptop", "Electronics", dec!(10.00), 5).unwrap();
        assert!(p.clone().with_sold(-1).is_err());
        assert_eq!(p.with_sold(3).unwrap().sold(), 3);
    }
}
