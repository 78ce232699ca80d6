// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Two-dimensional discrete cosine transforms over 8x8 blocks.
//!
//! Blocks are stored row-major as `[f64; BLOCK_SIZE]`. The forward transform
//! is the orthonormal DCT-II used by JPEG:
//!
//! `F(u,v) = 1/4 C(u) C(v) sum_x sum_y f(x,y) cos((2x+1)u pi/16) cos((2y+1)v pi/16)`
//!
//! with `C(0) = 1/sqrt(2)` and `C(k) = 1` otherwise, where `x`/`u` index rows and
//! `y`/`v` index columns. The inverse is its transpose, so
//! `idct2d(dct2d(b)) == b` up to floating point error.

pub mod dct;
pub mod dct_slow;

pub use dct::DctMatrix;

pub const BLOCK_DIM: usize = 8;
pub const BLOCK_SIZE: usize = BLOCK_DIM * BLOCK_DIM;
