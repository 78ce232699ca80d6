// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
#![no_main]

use bpeg::entropy_coding::{HuffmanBits, HuffmanCoder, histogram};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    // The first part defines the alphabet statistics, the rest is decoded.
    let (alphabet, stream) = rest.split_at((split as usize).min(rest.len()));
    if alphabet.is_empty() {
        return;
    }
    let coder = HuffmanCoder::from_frequencies(&histogram(alphabet)).unwrap();
    let bits = coder.encode(alphabet).unwrap();
    assert_eq!(coder.decode(&bits).unwrap(), alphabet);

    let arbitrary = HuffmanBits::from_parts(stream.to_vec(), stream.len() * 8);
    let _ = coder.decode(&arbitrary);
});
