// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use bpeg::{
    Codec, CodecOptions, CompressedFrame, PixelBuffer, Quality,
    metrics::CompressionStats,
    source::{SourceFormat, open_pixel_file},
};
use color_eyre::eyre::{Result, WrapErr};

pub fn load_image(
    path: &Path,
    format: SourceFormat,
    width: usize,
    height: usize,
) -> Result<PixelBuffer> {
    let mut source = open_pixel_file(path, format)?;
    let mut codec = Codec::default();
    codec
        .load(source.as_mut(), width, height)
        .wrap_err_with(|| format!("Cannot load {width}x{height} image from {}", path.display()))?;
    Ok(codec
        .take_buffer()
        .ok_or(bpeg::Error::BufferNotAllocated)?)
}

pub struct CompressOutput {
    pub frame: CompressedFrame,
    pub stats: CompressionStats,
    pub elapsed: Duration,
}

/// Compresses a copy of `image` at `quality`, timing the codec alone.
pub fn compress_image(image: &PixelBuffer, quality: Quality) -> Result<CompressOutput> {
    let mut codec = Codec::new(CodecOptions::default().with_quality(quality));
    codec.set_buffer(image.clone());
    let start = Instant::now();
    let (frame, stats) = codec.compress()?;
    let elapsed = start.elapsed();
    Ok(CompressOutput {
        frame,
        stats,
        elapsed,
    })
}
