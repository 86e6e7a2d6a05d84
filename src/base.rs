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

//! Core identifier type for products.

use crate::error::InventoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a product.
///
/// Wraps a non-empty string of at most 31 bytes. The bound is enforced at
/// construction; over-length input is rejected, not truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a product ID, in bytes.
    pub const MAX_LEN: usize = 31;

    /// Creates a product ID, validating the length bound.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidArgument`] if the ID is empty or
    /// longer than [`ProductId::MAX_LEN`] bytes.
    pub fn new(id: impl Into<String>) -> Result<Self, InventoryError> {
        let id = id.into();
        if id.is_empty() {
            return Err(InventoryError::invalid("product ID must not be empty"));
        }
        if id.len() > Self::MAX_LEN {
            return Err(InventoryError::invalid(format!(
                "product ID must be at most {} bytes",
                Self::MAX_LEN
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductId {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
