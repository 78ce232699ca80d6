// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::{BLOCK_DIM, BLOCK_SIZE};

/// A fixed 8x8 grid stored row-major.
#[derive(Clone, Copy, PartialEq)]
pub struct Block<T: Copy> {
    data: [T; BLOCK_SIZE],
}

/// Level-shifted samples in [-128, 127].
pub type SampleBlock = Block<i8>;
/// DCT coefficients; index (0, 0) is the DC term.
pub type CoefficientBlock = Block<f64>;
/// Coefficients divided by their quantization step and rounded.
pub type QuantizedBlock = Block<i32>;

impl<T: Copy> Block<T> {
    pub fn new(data: [T; BLOCK_SIZE]) -> Block<T> {
        Block { data }
    }

    /// Builds a block by calling `f(row, col)` for every position.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(mut f: F) -> Block<T> {
        Block {
            data: array_init::array_init(|i| f(i / BLOCK_DIM, i % BLOCK_DIM)),
        }
    }

    /// Applies `f` to every element, keeping positions.
    pub fn map<U: Copy, F: FnMut(T) -> U>(&self, mut f: F) -> Block<U> {
        Block {
            data: array_init::array_init(|i| f(self.data[i])),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * BLOCK_DIM + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * BLOCK_DIM + col] = value;
    }

    pub fn dc(&self) -> T {
        self.data[0]
    }

    pub fn as_array(&self) -> &[T; BLOCK_SIZE] {
        &self.data
    }

    pub fn as_array_mut(&mut self) -> &mut [T; BLOCK_SIZE] {
        &mut self.data
    }
}

impl<T: Copy + Default> Default for Block<T> {
    fn default() -> Self {
        Block {
            data: [T::default(); BLOCK_SIZE],
        }
    }
}

impl<T: Copy + Debug> Debug for Block<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for row in self.data.chunks_exact(BLOCK_DIM) {
            list.entry(&row);
        }
        list.finish()
    }
}

impl<T: Copy> From<[[T; BLOCK_DIM]; BLOCK_DIM]> for Block<T> {
    fn from(rows: [[T; BLOCK_DIM]; BLOCK_DIM]) -> Self {
        Block::from_fn(|row, col| rows[row][col])
    }
}
