// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::{
    BLOCK_DIM, LEVEL_SHIFT,
    block::SampleBlock,
    error::{Error, Result},
};

/// An 8-bit grayscale image stored row-major in a single contiguous buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: (usize, usize),
    data: Vec<u8>,
}

impl Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PixelBuffer {}x{}", self.size.0, self.size.1)
    }
}

impl PixelBuffer {
    /// Allocates a zero-filled buffer of `size = (width, height)`.
    pub fn new(size: (usize, usize)) -> Result<PixelBuffer> {
        let (xsize, ysize) = size;
        // These limits let us not worry about overflows in block arithmetic.
        if xsize as u64 >= u32::MAX as u64 || ysize as u64 >= u32::MAX as u64 {
            return Err(Error::ImageSizeTooLarge(xsize, ysize));
        }
        let total_size = xsize
            .checked_mul(ysize)
            .ok_or(Error::ImageSizeTooLarge(xsize, ysize))?;
        if xsize == 0 || ysize == 0 {
            return Err(Error::InvalidImageSize(xsize, ysize));
        }
        let mut data = vec![];
        data.try_reserve_exact(total_size)?;
        data.resize(total_size, 0);
        Ok(PixelBuffer {
            size: (xsize, ysize),
            data,
        })
    }

    /// Wraps `samples`, which must hold exactly `width * height` values.
    pub fn from_samples(size: (usize, usize), samples: Vec<u8>) -> Result<PixelBuffer> {
        let mut img = Self::new(size)?;
        if samples.len() != img.data.len() {
            return Err(Error::SampleCountMismatch(img.data.len(), samples.len()));
        }
        img.data = samples;
        Ok(img)
    }

    #[cfg(test)]
    pub fn new_random<R: rand::Rng>(size: (usize, usize), rng: &mut R) -> Result<PixelBuffer> {
        let mut img = Self::new(size)?;
        rng.fill(&mut img.data[..]);
        Ok(img)
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.0
    }

    pub fn height(&self) -> usize {
        self.size.1
    }

    /// Number of 8x8 block cells covering the image, rounding partial blocks up.
    pub fn size_in_blocks(&self) -> (usize, usize) {
        size_in_blocks(self.size)
    }

    pub fn row(&self, row: usize) -> &[u8] {
        debug_assert!(row < self.size.1);
        let start = row * self.size.0;
        &self.data[start..start + self.size.0]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        debug_assert!(row < self.size.1);
        let start = row * self.size.0;
        &mut self.data[start..start + self.size.0]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.size.0 && y < self.size.1 {
            Some(self.data[y * self.size.0 + x])
        } else {
            None
        }
    }

    /// Stores `value` at `(x, y)`. Returns false, leaving the buffer untouched,
    /// if the position is outside the image.
    pub fn set(&mut self, x: usize, y: usize, value: u8) -> bool {
        if x < self.size.0 && y < self.size.1 {
            self.data[y * self.size.0 + x] = value;
            true
        } else {
            false
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.data
    }

    /// Extracts the level-shifted 8x8 tile at block cell `(bx, by)`.
    /// Positions past the right or bottom edge read as sample value 0.
    pub fn read_block(&self, bx: usize, by: usize) -> SampleBlock {
        let (x0, y0) = (bx * BLOCK_DIM, by * BLOCK_DIM);
        SampleBlock::from_fn(|row, col| {
            let sample = self.get(x0 + col, y0 + row).unwrap_or(0);
            (sample as i16 - LEVEL_SHIFT) as i8
        })
    }

    /// Writes `block` back into block cell `(bx, by)`, undoing the level shift.
    /// Positions past the right or bottom edge are dropped.
    pub fn write_block(&mut self, bx: usize, by: usize, block: &SampleBlock) {
        let (x0, y0) = (bx * BLOCK_DIM, by * BLOCK_DIM);
        let xend = (x0 + BLOCK_DIM).min(self.size.0);
        let yend = (y0 + BLOCK_DIM).min(self.size.1);
        for y in y0..yend {
            let row = self.row_mut(y);
            for x in x0..xend {
                let value = block.get(y - y0, x - x0) as i16 + LEVEL_SHIFT;
                row[x] = value.clamp(0, 255) as u8;
            }
        }
    }

    #[cfg(test)]
    pub fn check_equal(&self, other: &PixelBuffer) {
        assert_eq!(self.size, other.size);
        for y in 0..self.size.1 {
            for x in 0..self.size.0 {
                if self.row(y)[x] != other.row(y)[x] {
                    panic!(
                        "mismatch at position {x}x{y}, values {} and {}",
                        self.row(y)[x],
                        other.row(y)[x]
                    );
                }
            }
        }
    }
}

pub fn size_in_blocks(size: (usize, usize)) -> (usize, usize) {
    (size.0.div_ceil(BLOCK_DIM), size.1.div_ceil(BLOCK_DIM))
}
