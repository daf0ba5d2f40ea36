use criterion::{black_box, criterion_group, criterion_main, Criterion};
use guarded::Guarded;
use parking_lot::Mutex;

fn bench_write_access(c: &mut Criterion) {
    let cell = Guarded::new(0_u64);
    c.bench_function("guarded_write_increment", |b| {
        b.iter(|| {
            *cell.write() += 1;
        });
    });

    // Baseline: the raw mutex the cell wraps by default
    let bare = Mutex::new(0_u64);
    c.bench_function("parking_lot_write_increment", |b| {
        b.iter(|| {
            *bare.lock() += 1;
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let cell = Guarded::new(String::from("snapshot payload"));
    c.bench_function("guarded_load", |b| {
        b.iter(|| black_box(cell.load()));
    });
}

fn bench_dual_cell_operations(c: &mut Criterion) {
    let first = Guarded::new(vec![1_u8; 64]);
    let second = Guarded::new(vec![2_u8; 64]);

    c.bench_function("guarded_swap", |b| {
        b.iter(|| first.swap(black_box(&second)));
    });

    c.bench_function("guarded_copy_from", |b| {
        b.iter(|| first.copy_from(black_box(&second)));
    });

    c.bench_function("guarded_eq", |b| {
        b.iter(|| black_box(&first) == black_box(&second));
    });
}

criterion_group!(
    benches,
    bench_write_access,
    bench_snapshot,
    bench_dual_cell_operations
);
criterion_main!(benches);
