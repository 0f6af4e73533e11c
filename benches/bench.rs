use criterion::async_executor::FuturesExecutor;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use futures_lite::prelude::*;

mod utils;

fn completion_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("completion order");
    for i in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("race-stream", i), i, |b, i| {
            b.to_async(FuturesExecutor).iter(|| async {
                let stream = utils::make_race_stream(*i as usize);
                let output: Vec<_> = stream.collect().await;
                assert!(output.iter().copied().eq(0..*i as usize));
            })
        });
        group.bench_with_input(BenchmarkId::new("futures-rs", i), i, |b, i| {
            b.to_async(FuturesExecutor).iter(|| async {
                let stream = utils::make_futures_unordered(*i as usize);
                let output: Vec<_> = stream.collect().await;
                assert!(output.iter().copied().eq(0..*i as usize));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, completion_order);
criterion_main!(benches);
