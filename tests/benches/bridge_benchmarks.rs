//! # Quill Bridge Benchmarks
//!
//! | Path | What is measured |
//! |------|------------------|
//! | Pending table | register + settle, no I/O |
//! | Reply interpretation | raw JSON reply to settlement |
//! | Round trip | facade call through the simulated host, zero latency |
//! | Burst | N concurrent calls settled out of order |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::future::join_all;
use serde_json::json;
use std::time::Duration;

use ql_01_correlation_transport::{BridgeConfig, PendingCallTable, Reply};
use ql_bridge_sim::SimulatedBridge;

// ============================================================================
// Pending table
// ============================================================================

fn bench_pending_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("ql-01-pending-table");
    let table = PendingCallTable::new();

    group.bench_function("register_settle", |b| {
        b.iter(|| {
            let (id, rx) = table.register("getSettings", None);
            black_box(table.settle(id, Ok(json!({"theme": "dark"}))));
            black_box(rx);
        })
    });

    for depth in [100usize, 10_000] {
        // Background entries the hot path has to coexist with.
        let loaded = PendingCallTable::new();
        let _held: Vec<_> = (0..depth).map(|_| loaded.register("readFile", None)).collect();

        group.bench_with_input(BenchmarkId::new("settle_with_backlog", depth), &depth, |b, _| {
            b.iter(|| {
                let (id, rx) = loaded.register("getSettings", None);
                black_box(loaded.settle(id, Ok(json!(null))));
                black_box(rx);
            })
        });
    }

    group.finish();
}

// ============================================================================
// Reply interpretation
// ============================================================================

fn bench_reply_interpretation(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-types-reply");

    let success = Reply::success(json!({"theme": "dark", "recent": ["/a.md", "/b.md"]}));
    let error = Reply::error("ENOENT: no such file or directory");
    let malformed = json!({"status": "success"});

    group.bench_function("success", |b| {
        b.iter(|| black_box(Reply::from_value(success.clone())))
    });
    group.bench_function("error", |b| {
        b.iter(|| black_box(Reply::from_value(error.clone())))
    });
    group.bench_function("malformed", |b| {
        b.iter(|| black_box(Reply::from_value(malformed.clone())))
    });

    group.finish();
}

// ============================================================================
// Full stack
// ============================================================================

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("ql-02-round-trip");
    group.measurement_time(Duration::from_secs(5));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let bridge = rt.block_on(async { SimulatedBridge::start(BridgeConfig::default(), Duration::ZERO) });
    bridge.host.insert_file("/notes/bench.md", "# bench");

    group.bench_function("get_settings", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(bridge.facade.get_settings().await) })
    });

    for burst in [8usize, 64, 256] {
        group.throughput(Throughput::Elements(burst as u64));
        group.bench_with_input(BenchmarkId::new("concurrent_reads", burst), &burst, |b, &n| {
            b.to_async(&rt).iter(|| async {
                let reads = (0..n).map(|_| bridge.facade.read_file("/notes/bench.md"));
                black_box(join_all(reads).await)
            })
        });
    }

    group.finish();
    bridge.shutdown();
}

criterion_group!(
    benches,
    bench_pending_table,
    bench_reply_interpretation,
    bench_round_trip
);
criterion_main!(benches);
