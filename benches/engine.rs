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

//! Benchmarks for the inventory engine.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Single operation costs (add, sell, restock, discount preview)
//! - Operation throughput as the ledger grows
//! - Lookup and aggregate scaling with store size

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use inventory_demo_rs::{Engine, ProductId};
use rust_decimal::Decimal;

// =============================================================================
// Helper Functions
// =============================================================================

fn pid(i: u32) -> ProductId {
    ProductId::new(format!("P{i:06}")).unwrap()
}

/// Engine pre-populated with `count` products of 100 units each.
fn engine_with_products(count: u32) -> Engine {
    let mut engine = Engine::new();
    for i in 0..count {
        engine
            .add_product(pid(i), "Widget", "Misc", Decimal::new(1099, 2), 100)
            .unwrap();
    }
    engine
}

// =============================================================================
// Single Operation Benchmarks
// =============================================================================

fn bench_single_add(c: &mut Criterion) {
    c.bench_function("single_add", |b| {
        b.iter(|| {
            let mut engine = Engine::new();
            engine
                .add_product(
                    black_box(pid(0)),
                    "Widget",
                    "Misc",
                    Decimal::new(1099, 2),
                    100,
                )
                .unwrap();
            black_box(&engine);
        })
    });
}

fn bench_single_sell(c: &mut Criterion) {
    c.bench_function("single_sell", |b| {
        b.iter_batched(
            || engine_with_products(1),
            |mut engine| {
                engine.sell_product(&pid(0), black_box(3)).unwrap();
                black_box(&engine);
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_single_restock(c: &mut Criterion) {
    c.bench_function("single_restock", |b| {
        b.iter_batched(
            || engine_with_products(1),
            |mut engine| {
                engine.update_stock(&pid(0), black_box(10)).unwrap();
                black_box(&engine);
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_discount_preview(c: &mut Criterion) {
    c.bench_function("discount_preview", |b| {
        b.iter_batched(
            || engine_with_products(1),
            |mut engine| {
                let total = engine
                    .preview_discount(&pid(0), black_box(4), Decimal::new(15, 0))
                    .unwrap();
                black_box(total);
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

// =============================================================================
// Throughput Benchmarks
// =============================================================================

fn bench_add_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_throughput");

    for count in [100u32, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let engine = engine_with_products(count);
                black_box(&engine);
            })
        });
    }
    group.finish();
}

fn bench_mixed_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_operations");

    for count in [100u32, 1_000].iter() {
        // Each round is one sell plus one restock against a random-ish product.
        group.throughput(Throughput::Elements(*count as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter_batched(
                || engine_with_products(count),
                |mut engine| {
                    for i in 0..count {
                        let id = pid(i);
                        engine.sell_product(&id, 1).unwrap();
                        engine.update_stock(&id, 6).unwrap();
                    }
                    black_box(&engine);
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

// =============================================================================
// Scaling Benchmarks
// =============================================================================

fn bench_lookup_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_scaling");

    // Linear scan cost for the worst case: the last inserted product.
    for count in [100u32, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let engine = engine_with_products(count);
            let last = pid(count - 1);
            b.iter(|| {
                let level = engine.stock_level(black_box(&last)).unwrap();
                black_box(level);
            })
        });
    }
    group.finish();
}

fn bench_total_stock_value_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_stock_value_scaling");

    for count in [100u32, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let engine = engine_with_products(count);
            b.iter(|| {
                let total = engine.total_stock_value();
                black_box(total);
            })
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    single_operations,
    bench_single_add,
    bench_single_sell,
    bench_single_restock,
    bench_discount_preview,
);

criterion_group!(throughput, bench_add_throughput, bench_mixed_operations,);

criterion_group!(
    scaling,
    bench_lookup_scaling,
    bench_total_stock_value_scaling,
);

criterion_main!(single_operations, throughput, scaling);
