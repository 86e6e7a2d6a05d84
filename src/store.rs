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

//! Live product collection.
//!
//! An ordered collection of [`Product`] records, unique by ID. Insertion
//! order is preserved for stable display. Lookup is a linear scan; IDs are
//! enforced unique at insertion time by the engine, so the first match is
//! the only match.

use crate::base::ProductId;
use crate::product::Product;

/// The mutable collection of live products, keyed by ID.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a product by ID.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Appends a product. The caller must have checked ID uniqueness;
    /// insertion itself does not re-validate.
    pub(crate) fn insert(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Removes and returns the product with the given ID, preserving the
    /// insertion order of the remaining products.
    pub(crate) fn remove(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(index))
    }

    /// Iterates over products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replaces the full contents; only the persistence adapter calls this,
    /// at load time.
    pub(crate) fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }
}
