// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use bpeg_transforms::DctMatrix;

use crate::{
    BLOCK_SIZE,
    block::{CoefficientBlock, SampleBlock},
};

/// Forward and inverse 8x8 DCT between level-shifted samples and coefficients.
#[derive(Debug, Clone, Default)]
pub struct BlockTransform {
    matrix: DctMatrix,
}

impl BlockTransform {
    pub fn new() -> BlockTransform {
        BlockTransform {
            matrix: DctMatrix::new(),
        }
    }

    pub fn forward(&self, block: &SampleBlock) -> CoefficientBlock {
        let input = block.map(|s| s as f64);
        let mut output = [0.0; BLOCK_SIZE];
        self.matrix.dct2d(input.as_array(), &mut output);
        CoefficientBlock::new(output)
    }

    /// Reconstructs samples, rounding to the nearest integer and saturating
    /// to the signed 8-bit range.
    pub fn inverse(&self, coefficients: &CoefficientBlock) -> SampleBlock {
        let mut output = [0.0; BLOCK_SIZE];
        self.matrix.idct2d(coefficients.as_array(), &mut output);
        SampleBlock::new(output.map(|v| v.round().clamp(i8::MIN as f64, i8::MAX as f64) as i8))
    }
}
