//! Boolean operator benchmarks over checkerboard-style regions.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rectset::{Rect, Region};

/// Builds a `cols` by `rows` checkerboard of `cell`-sized rectangles with the
/// whole grid shifted by `offset`.
fn checkerboard(cols: i32, rows: i32, cell: i32, offset: i32) -> Region {
    let mut rects = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 0 {
                rects.push(Rect::new(
                    offset + col * cell,
                    offset + row * cell,
                    cell,
                    cell,
                ));
            }
        }
    }
    Region::from_rects_sorted_by_y(&rects)
}

fn boolean_ops(c: &mut Criterion) {
    let a = checkerboard(32, 32, 8, 0);
    let b = checkerboard(32, 32, 8, 5);

    c.bench_function("united_32x32", |bench| {
        bench.iter(|| black_box(&a).united(black_box(&b)))
    });
    c.bench_function("intersected_32x32", |bench| {
        bench.iter(|| black_box(&a).intersected(black_box(&b)))
    });
    c.bench_function("subtracted_32x32", |bench| {
        bench.iter(|| black_box(&a).subtracted(black_box(&b)))
    });
    c.bench_function("xored_32x32", |bench| {
        bench.iter(|| black_box(&a).xored(black_box(&b)))
    });
}

fn construction(c: &mut Criterion) {
    let mut rects = Vec::new();
    for i in 0..512 {
        rects.push(Rect::new((i * 37) % 400, (i * 53) % 400, 30, 30));
    }

    c.bench_function("from_unsorted_rects_512", |bench| {
        bench.iter(|| Region::from_unsorted_rects(black_box(&rects)))
    });
}

criterion_group!(benches, boolean_ops, construction);
criterion_main!(benches);
