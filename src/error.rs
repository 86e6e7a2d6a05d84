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

//! Error types for inventory operations.

use thiserror::Error;

/// Inventory operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A caller-supplied value failed a precondition
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Add with a product ID that is already present
    #[error("product with this ID already exists")]
    DuplicateId,

    /// Operation referenced a nonexistent product ID
    #[error("product not found")]
    NotFound,

    /// Sale quantity exceeds the stock on hand
    #[error("not enough stock")]
    InsufficientStock,
}

impl InventoryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
