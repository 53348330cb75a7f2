use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use flatseg::{SegmentTree, ops::Sum};

const SIZES: [usize; 3] = [1 << 10, 1 << 16, 1 << 20];

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("build_u64_sum", size), &size, |b, &n| {
            let values: Vec<u64> = (0..n as u64).collect();
            b.iter(|| black_box(SegmentTree::build(values.clone(), Sum)))
        });
        group.bench_with_input(BenchmarkId::new("update_u64_sum", size), &size, |b, &n| {
            let mut tree = SegmentTree::build(vec![0u64; n], Sum).unwrap();
            b.iter(|| {
                let index = fastrand::usize(0..n);
                black_box(tree.update(index, fastrand::u64(..)))
            });
        });
        group.bench_with_input(BenchmarkId::new("compose_u64_sum", size), &size, |b, &n| {
            let mut tree = SegmentTree::build(vec![0u64; n], Sum).unwrap();
            b.iter(|| {
                let index = fastrand::usize(0..n);
                black_box(tree.compose(index, &1))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
