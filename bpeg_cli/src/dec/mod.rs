// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use bpeg::{Codec, CompressedFrame, PixelBuffer};
use color_eyre::eyre::{Result, WrapErr};

/// Decompresses `frame`, returning the image and the time spent.
pub fn decompress_frame(frame: &CompressedFrame) -> Result<(PixelBuffer, Duration)> {
    let start = Instant::now();
    let mut codec = Codec::default();
    codec.decompress(frame)?;
    let elapsed = start.elapsed();
    let image = codec
        .take_buffer()
        .ok_or(bpeg::Error::BufferNotAllocated)?;
    Ok((image, elapsed))
}

pub fn decompress_file(path: &Path) -> Result<(PixelBuffer, Duration)> {
    let frame = CompressedFrame::load(path)
        .wrap_err_with(|| format!("Cannot read compressed frame {}", path.display()))?;
    decompress_frame(&frame)
}
