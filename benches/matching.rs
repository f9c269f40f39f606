//! Benchmarks for the limit book.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- market_order
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use limit_book::{BookConfig, Command, MatchingEngine, OrderBook, Side};

// ============================================================================
// HELPER FUNCTIONS - Deterministic book construction
// ============================================================================

/// Rest `count` sell orders on consecutive levels starting at `base_price`.
fn populate_asks(
    book: &mut OrderBook,
    count: usize,
    base_price: u64,
    price_step: u64,
    quantity: u64,
) {
    for i in 0..count as u64 {
        book.submit_limit(Side::Sell, base_price + i * price_step, quantity)
            .unwrap();
    }
}

/// Rest `count` buy orders on consecutive levels going down from `base_price`.
fn populate_bids(
    book: &mut OrderBook,
    count: usize,
    base_price: u64,
    price_step: u64,
    quantity: u64,
) {
    for i in 0..count as u64 {
        book.submit_limit(Side::Buy, base_price - i * price_step, quantity)
            .unwrap();
    }
}

/// Generate a deterministic command mix: 60% limits, 25% cancels, 15% markets.
fn generate_command_batch(count: usize, seed: u64) -> Vec<Command> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut commands = Vec::with_capacity(count);
    let mut issued = 0u64;

    for _ in 0..count {
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let roll: f64 = rng.gen();

        let command = if roll < 0.60 || issued == 0 {
            issued += 1;
            Command::Limit {
                side,
                price: rng.gen_range(49_500..=50_500),
                quantity: rng.gen_range(1..=100),
            }
        } else if roll < 0.85 {
            Command::Cancel {
                order_id: rng.gen_range(1..=issued),
            }
        } else {
            Command::Market {
                side,
                quantity: rng.gen_range(1..=300),
            }
        };
        commands.push(command);
    }

    commands
}

// ============================================================================
// BENCHMARK: Market Orders
// ============================================================================

fn bench_market_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_order");
    group.measurement_time(Duration::from_secs(10));

    // Take part of the best ask of a 1,000 level book; the level never empties
    group.bench_function("head_of_1k_levels", |b| {
        let mut book = OrderBook::with_capacity(2_000);
        populate_asks(&mut book, 1_000, 50_000, 1, 1_000_000_000_000);

        b.iter(|| black_box(book.execute_market(Side::Buy, 1).unwrap()));
    });

    // Sweep ten levels of a 100 level book
    group.bench_function("sweep_10_levels", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(200);
                populate_asks(&mut book, 100, 50_000, 1, 10);
                book
            },
            |mut book| black_box(book.execute_market(Side::Buy, 100).unwrap()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Order Operations
// ============================================================================

fn bench_order_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_operations");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("submit_to_empty", |b| {
        b.iter_batched(
            OrderBook::new,
            |mut book| black_box(book.submit_limit(Side::Buy, 50_000, 10).unwrap()),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("submit_to_1k_book", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2_000);
                populate_asks(&mut book, 500, 50_000, 1, 10);
                populate_bids(&mut book, 500, 49_999, 1, 10);
                book
            },
            |mut book| black_box(book.submit_limit(Side::Buy, 45_000, 10).unwrap()),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_middle", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2_000);
                populate_bids(&mut book, 1_000, 50_000, 1, 10);
                book
            },
            |mut book| black_box(book.cancel(500).unwrap()),
            BatchSize::SmallInput,
        );
    });

    // Cancel the best bid, then query it: the cancel pops the stale heap entry
    group.bench_function("cancel_best_then_query", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2_000);
                populate_bids(&mut book, 1_000, 50_000, 1, 10);
                book
            },
            |mut book| {
                book.cancel(1).unwrap();
                black_box(book.best_bid())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("commands", batch_size),
            &batch_size,
            |b, &size| {
                let commands = generate_command_batch(size, 42);

                b.iter_batched(
                    || {
                        let config = BookConfig::default().with_order_capacity(size);
                        (MatchingEngine::new(config), commands.clone())
                    },
                    |(mut engine, commands)| {
                        for command in commands {
                            let _ = black_box(engine.apply(command));
                        }
                        engine.book().order_count()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Large Book
// ============================================================================

fn bench_large_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_book");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    group.bench_function("queries_in_100k_book", |b| {
        let mut book = OrderBook::with_capacity(120_000);
        populate_asks(&mut book, 50_000, 100_000, 1, 10);
        populate_bids(&mut book, 50_000, 99_999, 1, 10);

        b.iter(|| {
            black_box((
                book.best_bid(),
                book.best_ask(),
                book.volume_at_price(Side::Sell, 125_000),
            ))
        });
    });

    group.bench_function("state_root_10k_orders", |b| {
        let mut book = OrderBook::with_capacity(10_000);
        populate_asks(&mut book, 5_000, 50_000, 1, 10);
        populate_bids(&mut book, 5_000, 49_999, 1, 10);

        b.iter(|| black_box(book.compute_state_root().unwrap()));
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_market_order,
    bench_order_operations,
    bench_throughput,
    bench_large_book
);

criterion_main!(benches);
