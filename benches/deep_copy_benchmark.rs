use chaincopy::Chain;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::LinkedList;

fn bench_chain_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_deep_copy");

    for len in [100usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(len as u64));

        // Baseline: std linked list clone
        let list: LinkedList<(usize, usize)> = (0..len).map(|i| (i, i)).collect();
        group.bench_with_input(BenchmarkId::new("std_linked_list_clone", len), &list, |b, list| {
            b.iter(|| black_box(list.clone()));
        });

        let chain: Chain<usize, usize> = (0..len).map(|i| (i, i)).collect();
        group.bench_with_input(BenchmarkId::new("chain_clone", len), &chain, |b, chain| {
            b.iter(|| black_box(chain.clone()));
        });
    }

    group.finish();
}

fn bench_chain_teardown(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_teardown");
    let len = 100_000usize;
    group.throughput(Throughput::Elements(len as u64));

    group.bench_function("chain_build_and_drop", |b| {
        b.iter(|| {
            let chain: Chain<usize, usize> = (0..len).map(|i| (black_box(i), i)).collect();
            drop(chain);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_chain_copy, bench_chain_teardown);
criterion_main!(benches);
