use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stock_reserve::store::InMemoryStore;
use stock_reserve::{Catalog, Engine, Price, Product};

/// Engine over an in-memory store with effectively unlimited stock, so
/// reservations never run out mid-benchmark.
fn engine() -> Engine {
    let catalog = Catalog::new(vec![Product::new(
        1,
        "Bench suitcase",
        Price::from_units(1),
        u32::MAX,
    )]);
    Engine::new(catalog, Arc::new(InMemoryStore::new()))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .build()
        .expect("failed to build runtime")
}

fn bench_sequential(c: &mut Criterion) {
    let rt = runtime();
    let engine = engine();

    let mut group = c.benchmark_group("sequential");
    group.throughput(Throughput::Elements(1));
    group.bench_function("reserve_one", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(engine.reserve_one(1).await.unwrap()) })
    });
    group.bench_function("get_availability", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(engine.get_availability(1).await.unwrap()) })
    });
    group.finish();
}

fn bench_concurrent(c: &mut Criterion) {
    let rt = runtime();

    let mut group = c.benchmark_group("concurrent_reserve");
    for tasks in [2usize, 8, 32] {
        group.throughput(Throughput::Elements(tasks as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tasks), &tasks, |b, &tasks| {
            let engine = engine().with_max_retries(u32::MAX);
            b.to_async(&rt).iter(|| {
                let engine = engine.clone();
                async move {
                    let handles: Vec<_> = (0..tasks)
                        .map(|_| {
                            let engine = engine.clone();
                            tokio::spawn(async move { engine.reserve_one(1).await })
                        })
                        .collect();
                    for handle in handles {
                        black_box(handle.await.unwrap().unwrap());
                    }
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sequential, bench_concurrent);
criterion_main!(benches);
