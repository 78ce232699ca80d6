// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::hint::black_box;

use bpeg_transforms::dct_slow::{dct2d_slow, idct2d_slow};
use bpeg_transforms::{BLOCK_SIZE, DctMatrix};
use criterion::{Criterion, criterion_group, criterion_main};

fn test_block() -> [f64; BLOCK_SIZE] {
    std::array::from_fn(|i| ((i * 37) % 256) as f64 - 128.0)
}

fn dct_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("dct8x8");
    let matrix = DctMatrix::new();
    let block = test_block();
    let mut out = [0.0; BLOCK_SIZE];

    group.bench_function("dct2d", |b| {
        b.iter(|| matrix.dct2d(black_box(&block), &mut out))
    });
    group.bench_function("idct2d", |b| {
        b.iter(|| matrix.idct2d(black_box(&block), &mut out))
    });
    group.bench_function("dct2d_slow", |b| b.iter(|| dct2d_slow(black_box(&block))));
    group.bench_function("idct2d_slow", |b| b.iter(|| idct2d_slow(black_box(&block))));
    group.finish();
}

criterion_group!(benches, dct_benches);
criterion_main!(benches);
