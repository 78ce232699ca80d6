// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
#![no_main]

use bpeg::{Codec, CompressedFrame};
use libfuzzer_sys::fuzz_target;

// Keeps decoded images small enough for the fuzzer's memory limit.
const MAX_PIXELS: usize = 1 << 24;

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = CompressedFrame::from_bytes(data) else {
        return;
    };
    let (width, height) = frame.size();
    if width.saturating_mul(height) > MAX_PIXELS {
        return;
    }
    let mut codec = Codec::default();
    if let Ok(image) = codec.decompress(&frame) {
        assert_eq!(image.size(), (width, height));
        // A decodable frame re-encodes at the same size.
        let (again, _) = codec.compress().unwrap();
        assert_eq!(again.size(), (width, height));
    }
});
