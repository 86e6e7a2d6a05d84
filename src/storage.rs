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

//! Flat-file persistence adapter.
//!
//! Both collections are stored as headerless CSV, one record per line:
//!
//! - Products: `id,name,category,price,quantity,sold`
//! - History: `timestamp,operation,product_id,quantity_change,value_change,description`
//!
//! Timestamps are integer epoch seconds; monetary values are written with
//! two decimal places. A missing file is not an error (no prior data), and
//! a malformed line is skipped with a warning rather than failing the load.
//! Failing to open the destination for writing IS reported to the caller.

use crate::base::ProductId;
use crate::engine::Engine;
use crate::history::{HistoryEntry, Operation};
use crate::product::Product;
use chrono::DateTime;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::Path;
use tracing::warn;

/// Monetary values are persisted with this many decimal places.
const MONEY_PRECISION: u32 = 2;

/// Raw CSV record for one product line.
///
/// Fields: `id, name, category, price, quantity, sold`
#[derive(Debug, Serialize, Deserialize)]
struct ProductRecord {
    id: String,
    name: String,
    category: String,
    price: Decimal,
    quantity: i64,
    sold: i64,
}

impl ProductRecord {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id().as_str().to_string(),
            name: product.name().to_string(),
            category: product.category().to_string(),
            price: product.price().round_dp(MONEY_PRECISION),
            quantity: product.quantity(),
            sold: product.sold(),
        }
    }

    /// Converts the raw record into a validated product.
    ///
    /// Returns `None` when any field is out of bounds; the caller skips the
    /// line.
    fn into_product(self) -> Option<Product> {
        let id = ProductId::new(self.id).ok()?;
        Product::new(id, self.name, self.category, self.price, self.quantity)
            .ok()?
            .with_sold(self.sold)
            .ok()
    }
}

/// Raw CSV record for one history line.
///
/// Fields: `timestamp, operation, product_id, quantity_change, value_change, description`
#[derive(Debug, Serialize, Deserialize)]
struct HistoryRecord {
    timestamp: i64,
    operation: Operation,
    product_id: String,
    quantity_change: i64,
    value_change: Decimal,
    description: String,
}

impl HistoryRecord {
    fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            timestamp: entry.timestamp().timestamp(),
            operation: entry.operation(),
            product_id: entry.product_id().to_string(),
            quantity_change: entry.quantity_change(),
            value_change: entry.value_change().round_dp(MONEY_PRECISION),
            description: entry.description().to_string(),
        }
    }

    /// Converts the raw record into a history entry.
    ///
    /// Returns `None` when the timestamp is out of range. The product ID may
    /// be empty, and may reference a product that no longer exists.
    fn into_entry(self) -> Option<HistoryEntry> {
        let timestamp = DateTime::from_timestamp(self.timestamp, 0)?;
        Some(HistoryEntry::at(
            timestamp,
            self.operation,
            &self.product_id,
            self.quantity_change,
            self.value_change,
            &self.description,
        ))
    }
}

/// Reads products from headerless CSV, skipping malformed lines.
///
/// # Errors
///
/// Returns a CSV error only if the underlying reader fails; individual bad
/// lines are skipped with a warning.
pub fn read_products<R: Read>(reader: R) -> Result<Vec<Product>, csv::Error> {
    let mut rdr = csv_reader(reader);
    let mut products = Vec::new();

    for result in rdr.deserialize::<ProductRecord>() {
        match result {
            Ok(record) => match record.into_product() {
                Some(product) => products.push(product),
                None => warn!("skipping out-of-bounds product line"),
            },
            Err(e) => warn!("skipping malformed product line: {e}"),
        }
    }

    Ok(products)
}

/// Reads history entries from headerless CSV, skipping malformed lines.
///
/// # Errors
///
/// Returns a CSV error only if the underlying reader fails.
pub fn read_history<R: Read>(reader: R) -> Result<Vec<HistoryEntry>, csv::Error> {
    let mut rdr = csv_reader(reader);
    let mut entries = Vec::new();

    for result in rdr.deserialize::<HistoryRecord>() {
        match result {
            Ok(record) => match record.into_entry() {
                Some(entry) => entries.push(entry),
                None => warn!("skipping history line with out-of-range timestamp"),
            },
            Err(e) => warn!("skipping malformed history line: {e}"),
        }
    }

    Ok(entries)
}

/// Writes the engine's full product set, one line per record.
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_products<W: Write>(engine: &Engine, writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    for product in engine.products().iter() {
        wtr.serialize(ProductRecord::from_product(product))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the engine's full history, one line per record, oldest first.
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_history<W: Write>(engine: &Engine, writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    for entry in engine.history() {
        wtr.serialize(HistoryRecord::from_entry(entry))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Loads products from a file. A missing file yields an empty collection.
///
/// # Errors
///
/// Returns a CSV error if the file exists but cannot be read.
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, csv::Error> {
    match File::open(path.as_ref()) {
        Ok(file) => read_products(BufReader::new(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Loads history entries from a file. A missing file yields an empty
/// collection.
///
/// # Errors
///
/// Returns a CSV error if the file exists but cannot be read.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<Vec<HistoryEntry>, csv::Error> {
    match File::open(path.as_ref()) {
        Ok(file) => read_history(BufReader::new(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Saves the full product set to a file.
///
/// # Errors
///
/// Returns a CSV error if the destination cannot be opened or written.
pub fn save_products<P: AsRef<Path>>(engine: &Engine, path: P) -> Result<(), csv::Error> {
    let file = File::create(path.as_ref())?;
    write_products(engine, file)
}

/// Saves the full history to a file.
///
/// # Errors
///
/// Returns a CSV error if the destination cannot be opened or written.
pub fn save_history<P: AsRef<Path>>(engine: &Engine, path: P) -> Result<(), csv::Error> {
    let file = File::create(path.as_ref())?;
    write_history(engine, file)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false) // Every line is a record
        .trim(Trim::All) // Handle whitespace in fields like " P001 "
        .flexible(true)
        .from_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    #[test]
    fn parse_simple_product() {
        let csv = "P001,Laptop,Electronics,999.99,10,3\n";
        let products = read_products(Cursor::new(csv)).unwrap();

        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.id().as_str(), "P001");
        assert_eq!(p.name(), "Laptop");
        assert_eq!(p.category(), "Electronics");
        assert_eq!(p.price(), dec!(999.99));
        assert_eq!(p.quantity(), 10);
        assert_eq!(p.sold(), 3);
    }

    #[test]
    fn parse_with_whitespace() {
        let csv = " P001 , Laptop , Electronics , 10.00 , 5 , 0 \n";
        let products = read_products(Cursor::new(csv)).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "Laptop");
    }

    #[test]
    fn skip_malformed_product_rows() {
        let csv = "P001,Laptop,Electronics,999.99,10,0\n\
                   not,enough,fields\n\
                   P002,Mouse,Electronics,9.99,bad,0\n\
                   P003,Desk,Furniture,120.00,2,1\n";
        let products = read_products(Cursor::new(csv)).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id().as_str(), "P001");
        assert_eq!(products[1].id().as_str(), "P003");
    }

    #[test]
    fn skip_out_of_bounds_product_rows() {
        let long_name = "n".repeat(80);
        let csv = format!(
            "P001,{long_name},Electronics,10.00,1,0\n\
             P002,Mouse,Electronics,-5.00,1,0\n\
             P003,Desk,Furniture,120.00,-2,0\n\
             P004,Lamp,Furniture,15.00,2,0\n"
        );
        let products = read_products(Cursor::new(csv)).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id().as_str(), "P004");
    }

    #[test]
    fn parse_history_line() {
        let csv = "1700000000,SELL,P001,-3,2999.97,Sold product\n";
        let entries = read_history(Cursor::new(csv)).unwrap();

        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.timestamp().timestamp(), 1_700_000_000);
        assert_eq!(e.operation(), Operation::Sell);
        assert_eq!(e.product_id(), "P001");
        assert_eq!(e.quantity_change(), -3);
        assert_eq!(e.value_change(), dec!(2999.97));
        assert_eq!(e.description(), "Sold product");
    }

    #[test]
    fn history_product_id_may_be_empty() {
        let csv = "1700000000,REMOVE,,0,0.00,Removed product\n";
        let entries = read_history(Cursor::new(csv)).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].product_id(), "");
    }

    #[test]
    fn skip_history_rows_with_unknown_operation() {
        let csv = "1700000000,ADD,P001,5,50.00,Added product\n\
                   1700000001,RENAME,P001,0,0.00,Renamed product\n\
                   1700000002,SELL,P001,-1,10.00,Sold product\n";
        let entries = read_history(Cursor::new(csv)).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation(), Operation::Add);
        assert_eq!(entries[1].operation(), Operation::Sell);
    }

    #[test]
    fn write_rounds_money_to_two_decimals() {
        let mut engine = Engine::new();
        engine
            .add_product(
                ProductId::new("P001").unwrap(),
                "Laptop",
                "Electronics",
                dec!(999.99),
                10,
            )
            .unwrap();

        let mut output = Vec::new();
        write_products(&engine, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "P001,Laptop,Electronics,999.99,10,0\n");
    }

    #[test]
    fn quoted_fields_round_trip_commas() {
        let mut engine = Engine::new();
        engine
            .add_product(
                ProductId::new("P001").unwrap(),
                "Cable, 2m",
                "Electronics",
                dec!(4.99),
                8,
            )
            .unwrap();

        let mut output = Vec::new();
        write_products(&engine, &mut output).unwrap();
        let products = read_products(Cursor::new(output)).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "Cable, 2m");
    }
}
