//! Criterion micro-benchmarks comparing scalar summation against the 4-lane vectorized
//! kernel under both alignment conditions.

use bench::{misaligned_copy, random_buffer};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use liblanesum::reduce::{LoadMode, sum_scalar, sum_vector};

const SIZES: &[usize] = &[1 << 10, 1 << 14, 1 << 20];

fn bench_sum_kernels(c: &mut Criterion) {
    for &size in SIZES {
        let aligned = random_buffer(size, 0x5EED).unwrap();
        let misaligned = misaligned_copy(&aligned).unwrap();

        c.bench_function(&format!("sum_scalar_{size}"), |b| {
            b.iter(|| black_box(sum_scalar(black_box(aligned.as_slice()))))
        });

        c.bench_function(&format!("sum_vector_aligned_{size}"), |b| {
            b.iter(|| {
                black_box(sum_vector(
                    black_box(aligned.as_slice()),
                    LoadMode::Aligned,
                ))
            })
        });

        c.bench_function(&format!("sum_vector_unaligned_{size}"), |b| {
            b.iter(|| {
                black_box(sum_vector(
                    black_box(misaligned.as_slice()),
                    LoadMode::Unaligned,
                ))
            })
        });
    }
}

criterion_group!(benches, bench_sum_kernels);
criterion_main!(benches);
