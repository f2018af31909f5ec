use chaincopy::ChainedTable;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::collections::HashMap;

const ENTRIES: u64 = 1000;

fn bench_table_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_ops");
    group.throughput(Throughput::Elements(ENTRIES));

    // Baseline: HashMap insert
    group.bench_function("std_hash_map_insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for i in 0..ENTRIES {
                map.insert(black_box(i), black_box(i));
            }
            map
        });
    });

    group.bench_function("chained_table_insert", |b| {
        b.iter(|| {
            let mut table = ChainedTable::with_buckets(256);
            for i in 0..ENTRIES {
                table.insert(black_box(i), black_box(i));
            }
            table
        });
    });

    let table: ChainedTable<u64, u64> = (0..ENTRIES).map(|i| (i, i)).collect();
    group.bench_function("chained_table_get", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in 0..ENTRIES {
                sum += table.get(&black_box(i)).copied().unwrap_or(0);
            }
            black_box(sum);
        });
    });

    group.finish();
}

fn bench_table_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_copy");
    group.throughput(Throughput::Elements(ENTRIES));

    let map: HashMap<u64, String> = (0..ENTRIES).map(|i| (i, i.to_string())).collect();
    let table: ChainedTable<u64, String> = (0..ENTRIES).map(|i| (i, i.to_string())).collect();

    group.bench_function("std_hash_map_clone", |b| {
        b.iter(|| black_box(map.clone()));
    });

    group.bench_function("chained_table_clone", |b| {
        b.iter(|| black_box(table.clone()));
    });

    group.bench_function("chained_table_copy_of_std_map", |b| {
        b.iter(|| black_box(ChainedTable::copy_of(&map)));
    });

    group.finish();
}

criterion_group!(benches, bench_table_ops, bench_table_copy);
criterion_main!(benches);
