use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sphpix_index::*;

fn nside() -> Nside<i64> {
    Nside::from_order(10).unwrap()
}

fn bench_xy_to_ring(c: &mut Criterion) {
    let n = nside();
    let pix = black_box(5_123_457_i64);
    c.bench_function("xy_to_ring", |bencher| {
        bencher.iter(|| black_box(xy_to_ring(pix, n)))
    });
}

fn bench_ring_to_xy(c: &mut Criterion) {
    let n = nside();
    let pix = black_box(6_000_001_i64);
    c.bench_function("ring_to_xy", |bencher| {
        bencher.iter(|| black_box(ring_to_xy(pix, n)))
    });
}

fn bench_xy_to_nested(c: &mut Criterion) {
    let n = nside();
    let pix = black_box(5_123_457_i64);
    c.bench_function("xy_to_nested", |bencher| {
        bencher.iter(|| black_box(xy_to_nested(pix, n)))
    });
}

fn bench_nested_to_xy(c: &mut Criterion) {
    let n = nside();
    let pix = black_box(5_123_457_i64);
    c.bench_function("nested_to_xy", |bencher| {
        bencher.iter(|| black_box(nested_to_xy(pix, n)))
    });
}

fn bench_point_to_pixel(c: &mut Criterion) {
    let n = nside();
    let equatorial = black_box(radec_to_point(1.1, 0.3));
    let polar = black_box(radec_to_point(4.2, -1.3));
    c.bench_function("point_to_pixel_equatorial", |bencher| {
        bencher.iter(|| black_box(point_to_pixel(equatorial, n)))
    });
    c.bench_function("point_to_pixel_polar", |bencher| {
        bencher.iter(|| black_box(point_to_pixel(polar, n)))
    });
}

fn bench_pixel_to_point(c: &mut Criterion) {
    let n = nside();
    let pix = black_box(777_777_i64);
    c.bench_function("pixel_to_point", |bencher| {
        bencher.iter(|| black_box(pixel_to_point(pix, n, 0.25, 0.75)))
    });
}

fn bench_neighbours(c: &mut Criterion) {
    let n = nside();
    let interior = black_box(5_123_457_i64);
    let corner = black_box(compose_xy(0, 1023, 1023, n).unwrap());
    c.bench_function("neighbours_interior", |bencher| {
        bencher.iter(|| black_box(neighbours_xy(interior, n)))
    });
    c.bench_function("neighbours_pole", |bencher| {
        bencher.iter(|| black_box(neighbours_xy(corner, n)))
    });
    c.bench_function("neighbours_nested", |bencher| {
        bencher.iter(|| black_box(IndexScheme::Nested.neighbours(interior, n)))
    });
}

criterion_group!(
    benches,
    bench_xy_to_ring,
    bench_ring_to_xy,
    bench_xy_to_nested,
    bench_nested_to_xy,
    bench_point_to_pixel,
    bench_pixel_to_point,
    bench_neighbours,
);
criterion_main!(benches);
