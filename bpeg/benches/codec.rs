// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::hint::black_box;

use bpeg::{Codec, CodecOptions, PixelBuffer, Quality, huffman_encode_symbols};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn test_image(width: usize, height: usize) -> PixelBuffer {
    let samples = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            ((x * 3 + y * 5 + (x * y) % 17) % 256) as u8
        })
        .collect();
    PixelBuffer::from_samples((width, height), samples).unwrap()
}

fn codec_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let image = test_image(512, 512);
    for quality in [25, 50, 90] {
        let options = CodecOptions::default().with_quality(Quality::new(quality).unwrap());
        let mut codec = Codec::new(options);
        codec.set_buffer(image.clone());
        group.bench_with_input(BenchmarkId::new("compress", quality), &codec, |b, codec| {
            b.iter(|| codec.compress().unwrap())
        });

        let (frame, _) = codec.compress().unwrap();
        group.bench_with_input(BenchmarkId::new("decompress", quality), &frame, |b, frame| {
            let mut decoder = Codec::default();
            b.iter(|| {
                decoder.decompress(black_box(frame)).unwrap();
            })
        });
        group.bench_with_input(
            BenchmarkId::new("huffman", quality),
            frame.symbols(),
            |b, symbols| b.iter(|| huffman_encode_symbols(black_box(symbols)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, codec_benches);
criterion_main!(benches);
