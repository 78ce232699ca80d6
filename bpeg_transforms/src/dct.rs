// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::f64::consts::PI;

use crate::{BLOCK_DIM, BLOCK_SIZE, dct_slow::alpha};

/// Precomputed 8-point DCT basis, `basis[u][x] = C(u) / 2 * cos((2x + 1) u pi / 16)`.
///
/// The 2D transforms are computed separably as `A * f * A^T` (forward) and
/// `A^T * F * A` (inverse), which is the same double sum as the direct
/// formula in [`crate::dct_slow`] evaluated in 2 * 8^3 instead of 8^4 steps.
#[derive(Debug, Clone)]
pub struct DctMatrix {
    basis: [[f64; BLOCK_DIM]; BLOCK_DIM],
}

impl Default for DctMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl DctMatrix {
    pub fn new() -> DctMatrix {
        let mut basis = [[0.0f64; BLOCK_DIM]; BLOCK_DIM];
        for (u, row) in basis.iter_mut().enumerate() {
            let alpha_u = alpha(u);
            for (x, element) in row.iter_mut().enumerate() {
                *element = 0.5
                    * alpha_u
                    * ((2 * x + 1) as f64 * u as f64 * PI / (2 * BLOCK_DIM) as f64).cos();
            }
        }
        DctMatrix { basis }
    }

    /// Basis value for frequency `u` at spatial position `x`.
    pub fn basis(&self, u: usize, x: usize) -> f64 {
        self.basis[u][x]
    }

    /// Forward 2D DCT of a row-major 8x8 block.
    pub fn dct2d(&self, input: &[f64; BLOCK_SIZE], output: &mut [f64; BLOCK_SIZE]) {
        // Transform columns: tmp[u][y] = sum_x A[u][x] in[x][y].
        let mut tmp = [0.0f64; BLOCK_SIZE];
        for u in 0..BLOCK_DIM {
            for y in 0..BLOCK_DIM {
                let mut sum = 0.0;
                for x in 0..BLOCK_DIM {
                    sum += self.basis[u][x] * input[x * BLOCK_DIM + y];
                }
                tmp[u * BLOCK_DIM + y] = sum;
            }
        }
        // Transform rows: out[u][v] = sum_y tmp[u][y] A[v][y].
        for u in 0..BLOCK_DIM {
            for v in 0..BLOCK_DIM {
                let mut sum = 0.0;
                for y in 0..BLOCK_DIM {
                    sum += tmp[u * BLOCK_DIM + y] * self.basis[v][y];
                }
                output[u * BLOCK_DIM + v] = sum;
            }
        }
    }

    /// Inverse 2D DCT of a row-major 8x8 coefficient block.
    pub fn idct2d(&self, input: &[f64; BLOCK_SIZE], output: &mut [f64; BLOCK_SIZE]) {
        // tmp[x][v] = sum_u A[u][x] in[u][v].
        let mut tmp = [0.0f64; BLOCK_SIZE];
        for x in 0..BLOCK_DIM {
            for v in 0..BLOCK_DIM {
                let mut sum = 0.0;
                for u in 0..BLOCK_DIM {
                    sum += self.basis[u][x] * input[u * BLOCK_DIM + v];
                }
                tmp[x * BLOCK_DIM + v] = sum;
            }
        }
        // out[x][y] = sum_v tmp[x][v] A[v][y].
        for x in 0..BLOCK_DIM {
            for y in 0..BLOCK_DIM {
                let mut sum = 0.0;
                for v in 0..BLOCK_DIM {
                    sum += tmp[x * BLOCK_DIM + v] * self.basis[v][y];
                }
                output[x * BLOCK_DIM + y] = sum;
            }
        }
    }
}
