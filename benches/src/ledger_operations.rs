use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use ledger::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;

fn iban(index: usize) -> Iban {
    Iban::from(format!("BY00BNCH{index:020}"))
}

/// Ledger with `num_accounts` active accounts holding 1_000 units each
fn funded_ledger(num_accounts: usize) -> InMemoryLedger<FixedPoint> {
    let token = CancellationToken::new();
    let ledger = InMemoryLedger::new();
    let balance = FixedPoint::from_units(1_000).unwrap_or_default();
    for index in 0..num_accounts {
        let _ = ledger.add_account(
            &token,
            Account::with_balance(iban(index), balance, AccountStatus::Active),
        );
    }
    ledger
}

/// Benchmark opening accounts with generated identifiers
fn bench_open_accounts(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_accounts");
    let token = CancellationToken::new();

    for num_accounts in [100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_accounts),
            &num_accounts,
            |b, &num_accounts| {
                b.iter_batched(
                    || (InMemoryLedger::<FixedPoint>::new(), StdRng::seed_from_u64(1)),
                    |(ledger, mut rng)| {
                        for _ in 0..num_accounts {
                            black_box(open_account(&ledger, &token, "BY", &mut rng).ok());
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark sequential transfers around a ring of accounts
fn bench_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfers");
    let token = CancellationToken::new();
    let amount = FixedPoint::from_raw(1);

    for num_accounts in [10, 1_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_accounts),
            &num_accounts,
            |b, &num_accounts| {
                let ledger = funded_ledger(num_accounts);
                let mut index = 0;
                b.iter(|| {
                    let from = iban(index % num_accounts);
                    let to = iban((index + 1) % num_accounts);
                    index += 1;
                    black_box(ledger.transfer_funds(&token, &from, &to, amount).ok())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark payload decoding plus transfer through the engine
fn bench_payload_transfers(c: &mut Criterion) {
    let token = CancellationToken::new();
    let engine = TransferEngine::new(funded_ledger(2));
    let forward = format!(
        r#"{{"sender_IBAN":"{}","receiver_IBAN":"{}","amount":0.5}}"#,
        iban(0),
        iban(1)
    );
    let backward = format!(
        r#"{{"sender_IBAN":"{}","receiver_IBAN":"{}","amount":0.5}}"#,
        iban(1),
        iban(0)
    );

    c.bench_function("payload_transfer_round_trip", |b| {
        b.iter(|| {
            black_box(engine.transfer_funds_via_payload(&token, forward.as_bytes()).ok());
            black_box(engine.transfer_funds_via_payload(&token, backward.as_bytes()).ok());
        });
    });
}

/// Benchmark transfers from several threads contending on one ledger
fn bench_contended_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_transfers");
    let transfers_per_thread = 1_000;

    for num_threads in [2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_threads),
            &num_threads,
            |b, &num_threads| {
                b.iter_batched(
                    || Arc::new(funded_ledger(num_threads * 2)),
                    |ledger| {
                        let handles: Vec<_> = (0..num_threads)
                            .map(|worker| {
                                let ledger = Arc::clone(&ledger);
                                thread::spawn(move || {
                                    let token = CancellationToken::new();
                                    let from = iban(worker * 2);
                                    let to = iban(worker * 2 + 1);
                                    for _ in 0..transfers_per_thread {
                                        let _ = ledger.transfer_funds(
                                            &token,
                                            &from,
                                            &to,
                                            FixedPoint::from_raw(1),
                                        );
                                    }
                                })
                            })
                            .collect();
                        for handle in handles {
                            let _ = handle.join();
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark writing the JSON-lines snapshot
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let token = CancellationToken::new();

    for num_accounts in [100, 10_000] {
        let ledger = funded_ledger(num_accounts);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_accounts),
            &num_accounts,
            |b, _| {
                b.iter(|| {
                    let mut output = Vec::new();
                    runtime
                        .block_on(write_snapshot(&ledger, &token, &mut output))
                        .unwrap();
                    black_box(output)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_open_accounts,
    bench_transfers,
    bench_payload_transfers,
    bench_contended_transfers,
    bench_snapshot,
);
criterion_main!(benches);
