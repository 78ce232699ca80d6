// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Reconstruction quality and coefficient statistics.

use crate::{
    BLOCK_SIZE,
    block::QuantizedBlock,
    error::{Error, Result},
    image::PixelBuffer,
};

fn check_same_size(a: &PixelBuffer, b: &PixelBuffer) -> Result<()> {
    if a.size() != b.size() {
        return Err(Error::ImageSizeMismatch(a.size(), b.size()));
    }
    Ok(())
}

pub fn mean_squared_error(original: &PixelBuffer, decoded: &PixelBuffer) -> Result<f64> {
    check_same_size(original, decoded)?;
    let sum: u64 = original
        .as_slice()
        .iter()
        .zip(decoded.as_slice())
        .map(|(&a, &b)| {
            let d = a.abs_diff(b) as u64;
            d * d
        })
        .sum();
    Ok(sum as f64 / original.as_slice().len() as f64)
}

pub fn rms_error(original: &PixelBuffer, decoded: &PixelBuffer) -> Result<f64> {
    Ok(mean_squared_error(original, decoded)?.sqrt())
}

/// Peak signal-to-noise ratio in decibels for 8-bit samples. Identical images
/// give positive infinity.
pub fn psnr(original: &PixelBuffer, decoded: &PixelBuffer) -> Result<f64> {
    let mse = mean_squared_error(original, decoded)?;
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (255.0 * 255.0 / mse).log10())
}

/// Percentage of coefficients in `block` that quantized to zero.
pub fn zero_coefficient_ratio(block: &QuantizedBlock) -> f64 {
    let zeros = block.as_array().iter().filter(|&&c| c == 0).count();
    zeros as f64 * 100.0 / BLOCK_SIZE as f64
}

/// Summary of one compression run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompressionStats {
    pub blocks: usize,
    pub symbols: usize,
    pub zero_coefficients: usize,
}

impl CompressionStats {
    pub(crate) fn add_block(&mut self, block: &QuantizedBlock) {
        self.blocks += 1;
        self.zero_coefficients += block.as_array().iter().filter(|&&c| c == 0).count();
    }

    /// Percentage of all quantized coefficients that are zero.
    pub fn zero_coefficient_percentage(&self) -> f64 {
        if self.blocks == 0 {
            return 0.0;
        }
        self.zero_coefficients as f64 * 100.0 / (self.blocks * BLOCK_SIZE) as f64
    }

    /// Symbols emitted per input coefficient.
    pub fn symbols_per_coefficient(&self) -> f64 {
        if self.blocks == 0 {
            return 0.0;
        }
        self.symbols as f64 / (self.blocks * BLOCK_SIZE) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpeg_test_utils::assert_almost_eq;
    use test_log::test;

    #[test]
    fn identical_images() -> Result<()> {
        let a = PixelBuffer::from_samples((4, 2), vec![10; 8])?;
        assert_eq!(mean_squared_error(&a, &a)?, 0.0);
        assert_eq!(psnr(&a, &a)?, f64::INFINITY);
        Ok(())
    }

    #[test]
    fn known_error() -> Result<()> {
        let a = PixelBuffer::from_samples((2, 2), vec![0, 0, 0, 0])?;
        let b = PixelBuffer::from_samples((2, 2), vec![4, 0, 0, 0])?;
        assert_almost_eq!(mean_squared_error(&a, &b)?, 4.0, 1e-12);
        assert_almost_eq!(rms_error(&a, &b)?, 2.0, 1e-12);
        // 10 * log10(65025 / 4)
        assert_almost_eq!(psnr(&a, &b)?, 42.1102, 1e-4);
        Ok(())
    }

    #[test]
    fn size_mismatch() -> Result<()> {
        let a = PixelBuffer::new((2, 2))?;
        // Same sample count, different shape.
        let b = PixelBuffer::new((4, 1))?;
        assert!(matches!(
            psnr(&a, &b),
            Err(Error::ImageSizeMismatch((2, 2), (4, 1)))
        ));
        let c = PixelBuffer::new((3, 3))?;
        assert!(matches!(
            rms_error(&c, &a),
            Err(Error::ImageSizeMismatch((3, 3), (2, 2)))
        ));
        Ok(())
    }

    #[test]
    fn zero_ratio() {
        let mut block = QuantizedBlock::default();
        assert_eq!(zero_coefficient_ratio(&block), 100.0);
        block.set(0, 0, 15);
        block.set(3, 1, -1);
        assert_almost_eq!(zero_coefficient_ratio(&block), 62.0 * 100.0 / 64.0, 1e-12);

        let mut stats = CompressionStats::default();
        assert_eq!(stats.zero_coefficient_percentage(), 0.0);
        stats.add_block(&block);
        stats.add_block(&QuantizedBlock::default());
        stats.symbols = 8;
        assert_eq!(stats.blocks, 2);
        assert_almost_eq!(stats.zero_coefficient_percentage(), 126.0 * 100.0 / 128.0, 1e-12);
        assert_almost_eq!(stats.symbols_per_coefficient(), 8.0 / 128.0, 1e-12);
    }
}
