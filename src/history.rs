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

//! Audit history.
//!
//! Every successful mutating operation appends exactly one
//! [`HistoryEntry`] to the [`Ledger`]. Entries are never edited or removed;
//! insertion order is chronological order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation tag recorded on a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Add,
    Update,
    Sell,
    Remove,
    Discount,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Update => "UPDATE",
            Self::Sell => "SELL",
            Self::Remove => "REMOVE",
            Self::Discount => "DISCOUNT",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit record of a completed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    timestamp: DateTime<Utc>,
    operation: Operation,
    product_id: String,
    quantity_change: i64,
    value_change: Decimal,
    description: String,
}

impl HistoryEntry {
    /// Maximum length of the recorded product ID, in bytes.
    pub const MAX_PRODUCT_ID_LEN: usize = 31;
    /// Maximum length of the description, in bytes.
    pub const MAX_DESCRIPTION_LEN: usize = 127;

    /// Creates an entry stamped with the current time.
    ///
    /// The product ID and description are note fields, not identity fields:
    /// over-length input is clipped to the bound instead of rejected.
    pub(crate) fn now(
        operation: Operation,
        product_id: &str,
        quantity_change: i64,
        value_change: Decimal,
        description: &str,
    ) -> Self {
        Self::at(
            Utc::now(),
            operation,
            product_id,
            quantity_change,
            value_change,
            description,
        )
    }

    /// Creates an entry with an explicit timestamp (used when loading
    /// persisted history).
    pub(crate) fn at(
        timestamp: DateTime<Utc>,
        operation: Operation,
        product_id: &str,
        quantity_change: i64,
        value_change: Decimal,
        description: &str,
    ) -> Self {
        Self {
            timestamp,
            operation,
            product_id: clip(product_id, Self::MAX_PRODUCT_ID_LEN),
            quantity_change,
            value_change,
            description: clip(description, Self::MAX_DESCRIPTION_LEN),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The affected product's ID; empty if no product reference was
    /// available when the entry was recorded.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Signed stock delta; 0 for operations that do not change stock.
    pub fn quantity_change(&self) -> i64 {
        self.quantity_change
    }

    /// Signed monetary amount associated with the operation.
    pub fn value_change(&self) -> Decimal {
        self.value_change
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Clips a string to at most `max` bytes on a character boundary.
fn clip(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// The append-only sequence of history entries.
///
/// Insertion order equals chronological order; entries are never mutated
/// or deleted once appended. The persistence adapter replaces the full
/// contents at load and reads the full contents at save.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<HistoryEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry. There is no way to edit or remove it afterwards.
    pub(crate) fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the full contents; only the persistence adapter calls this,
    /// at load time.
    pub(crate) fn replace(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries;
    }
}
