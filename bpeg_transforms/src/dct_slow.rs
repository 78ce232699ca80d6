// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Direct evaluation of the 2D DCT double sums. Used as a reference for
//! [`crate::DctMatrix`] in tests and benchmarks.

use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::PI;

use crate::{BLOCK_DIM, BLOCK_SIZE};

#[inline(always)]
pub(crate) fn alpha(u: usize) -> f64 {
    if u == 0 { FRAC_1_SQRT_2 } else { 1.0 }
}

#[inline(always)]
fn cos_term(spatial: usize, freq: usize) -> f64 {
    ((2 * spatial + 1) as f64 * freq as f64 * PI / 16.0).cos()
}

pub fn dct2d_slow(input: &[f64; BLOCK_SIZE]) -> [f64; BLOCK_SIZE] {
    let mut output = [0.0f64; BLOCK_SIZE];
    for u in 0..BLOCK_DIM {
        for v in 0..BLOCK_DIM {
            let mut sum = 0.0;
            for x in 0..BLOCK_DIM {
                for y in 0..BLOCK_DIM {
                    sum += input[x * BLOCK_DIM + y] * cos_term(x, u) * cos_term(y, v);
                }
            }
            output[u * BLOCK_DIM + v] = 0.25 * alpha(u) * alpha(v) * sum;
        }
    }
    output
}

pub fn idct2d_slow(input: &[f64; BLOCK_SIZE]) -> [f64; BLOCK_SIZE] {
    let mut output = [0.0f64; BLOCK_SIZE];
    for x in 0..BLOCK_DIM {
        for y in 0..BLOCK_DIM {
            let mut sum = 0.0;
            for u in 0..BLOCK_DIM {
                for v in 0..BLOCK_DIM {
                    sum += input[u * BLOCK_DIM + v]
                        * alpha(u)
                        * alpha(v)
                        * cos_term(x, u)
                        * cos_term(y, v);
                }
            }
            output[x * BLOCK_DIM + y] = 0.25 * sum;
        }
    }
    output
}
