// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

use crate::{
    BLOCK_SIZE,
    block::{CoefficientBlock, QuantizedBlock},
    error::{Error, Result},
};

/// Luminance quantization matrix from ITU-T T.81 Annex K, row-major.
pub const BASE_LUMINANCE_TABLE: [u16; BLOCK_SIZE] = [
    16, 11, 10, 16, 24, 40, 51, 61, //
    12, 12, 14, 19, 26, 58, 60, 55, //
    14, 13, 16, 24, 40, 57, 69, 56, //
    14, 17, 22, 29, 51, 87, 80, 62, //
    18, 22, 37, 56, 68, 109, 103, 77, //
    24, 35, 55, 64, 81, 104, 113, 92, //
    49, 64, 78, 87, 103, 121, 120, 101, //
    72, 92, 95, 98, 112, 100, 103, 99, //
];

pub const MIN_QUALITY: u32 = 1;
pub const MAX_QUALITY: u32 = 100;

/// Compression quality in [1, 100]; higher means finer quantization steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u32);

impl Quality {
    pub fn new(quality: u32) -> Result<Quality> {
        if (MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            Ok(Quality(quality))
        } else {
            Err(Error::InvalidQuality(quality))
        }
    }

    /// Saturates an arbitrary integer into the valid range.
    pub fn clamped(quality: i64) -> Quality {
        Quality(quality.clamp(MIN_QUALITY as i64, MAX_QUALITY as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality(50)
    }
}

impl TryFrom<u32> for Quality {
    type Error = Error;
    fn try_from(quality: u32) -> Result<Quality> {
        Quality::new(quality)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-position quantization steps, each in [1, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizationTable {
    steps: [u16; BLOCK_SIZE],
}

impl QuantizationTable {
    /// Scales [`BASE_LUMINANCE_TABLE`] for `quality`. Qualities below 50 use
    /// a factor of `5000 / quality`, the rest `200 - 2 * quality`; each entry
    /// becomes `round((base * factor + 50) / 100)` clamped to [1, 255].
    pub fn for_quality(quality: u32) -> Result<QuantizationTable> {
        Ok(Self::scaled(Quality::new(quality)?))
    }

    fn scaled(quality: Quality) -> QuantizationTable {
        let quality = quality.get();
        let scale = if quality < 50 {
            5000.0 / quality as f64
        } else {
            200.0 - 2.0 * quality as f64
        };
        let steps = BASE_LUMINANCE_TABLE
            .map(|base| ((base as f64 * scale + 50.0) / 100.0).round().clamp(1.0, 255.0) as u16);
        QuantizationTable { steps }
    }

    pub fn step(&self, row: usize, col: usize) -> u16 {
        self.steps[row * crate::BLOCK_DIM + col]
    }

    pub fn steps(&self) -> &[u16; BLOCK_SIZE] {
        &self.steps
    }
}

/// Applies and reverses quantization with a table fixed at construction.
#[derive(Debug, Clone)]
pub struct Quantizer {
    quality: Quality,
    table: QuantizationTable,
}

impl Quantizer {
    pub fn new(quality: Quality) -> Quantizer {
        Quantizer {
            quality,
            table: QuantizationTable::scaled(quality),
        }
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn table(&self) -> &QuantizationTable {
        &self.table
    }

    /// Divides every coefficient by its step and rounds half away from zero.
    pub fn quantize(&self, coefficients: &CoefficientBlock) -> QuantizedBlock {
        let steps = &self.table.steps;
        let coeffs = coefficients.as_array();
        QuantizedBlock::new(array_init::array_init(|i| {
            (coeffs[i] / steps[i] as f64).round() as i32
        }))
    }

    pub fn dequantize(&self, quantized: &QuantizedBlock) -> CoefficientBlock {
        let steps = &self.table.steps;
        let values = quantized.as_array();
        CoefficientBlock::new(array_init::array_init(|i| {
            values[i] as f64 * steps[i] as f64
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn quality_validation() {
        assert!(matches!(Quality::new(0), Err(Error::InvalidQuality(0))));
        assert!(matches!(Quality::new(101), Err(Error::InvalidQuality(101))));
        assert_eq!(Quality::new(1).unwrap().get(), 1);
        assert_eq!(Quality::new(100).unwrap().get(), 100);
        assert_eq!(Quality::default().get(), 50);
        assert_eq!(Quality::clamped(-3).get(), 1);
        assert_eq!(Quality::clamped(250).get(), 100);
        assert!(matches!(
            QuantizationTable::for_quality(0),
            Err(Error::InvalidQuality(0))
        ));
    }

    #[test]
    fn quantizer_table_matches_validated_table() -> Result<()> {
        for q in 1..=100 {
            let quantizer = Quantizer::new(Quality::new(q)?);
            assert_eq!(quantizer.table(), &QuantizationTable::for_quality(q)?);
            assert_eq!(quantizer.quality().get(), q);
        }
        Ok(())
    }

    #[test]
    fn quality_50_rounds_base_table_up() -> Result<()> {
        // factor 100: every entry is base + 0.5, rounded away from zero.
        let table = QuantizationTable::for_quality(50)?;
        for (step, base) in table.steps().iter().zip(BASE_LUMINANCE_TABLE) {
            assert_eq!(*step, base + 1);
        }
        Ok(())
    }

    #[test]
    fn known_scaled_entries() -> Result<()> {
        // quality 10: factor 500, entry (0, 0) = round((16 * 500 + 50) / 100) = 81
        let low = QuantizationTable::for_quality(10)?;
        assert_eq!(low.step(0, 0), 81);
        // 121 * 5 = 605 saturates.
        assert_eq!(low.step(6, 5), 255);
        // quality 90: factor 20, entry (0, 0) = round(370 / 100) = 4
        let high = QuantizationTable::for_quality(90)?;
        assert_eq!(high.step(0, 0), 4);
        // quality 100: factor 0, every entry rounds to the lower bound.
        let max = QuantizationTable::for_quality(100)?;
        assert!(max.steps().iter().all(|&s| s == 1));
        Ok(())
    }

    #[test]
    fn steps_in_range_and_monotonic() -> Result<()> {
        let mut previous = QuantizationTable::for_quality(1)?;
        for quality in 1..=100 {
            let table = QuantizationTable::for_quality(quality)?;
            for (i, &step) in table.steps().iter().enumerate() {
                assert!((1..=255).contains(&step));
                assert!(step <= previous.steps()[i], "quality {quality} position {i}");
            }
            previous = table;
        }
        Ok(())
    }

    #[test]
    fn quantize_rounds_to_nearest() {
        let quantizer = Quantizer::new(Quality::default());
        let mut coeffs = CoefficientBlock::default();
        coeffs.set(0, 0, 240.0);
        coeffs.set(0, 1, -1.03);
        coeffs.set(0, 2, -12.08);
        coeffs.set(1, 0, 6.5);
        let q = quantizer.quantize(&coeffs);
        assert_eq!(q.get(0, 0), 14);
        assert_eq!(q.get(0, 1), 0);
        assert_eq!(q.get(0, 2), -1);
        // 6.5 / 13 = 0.5 rounds away from zero.
        assert_eq!(q.get(1, 0), 1);
        let back = quantizer.dequantize(&q);
        assert_eq!(back.get(0, 0), 238.0);
        assert_eq!(back.get(0, 2), -11.0);
    }

    #[test]
    fn dequantize_error_bounded_by_step() {
        arbtest::arbtest(|u| {
            let quality = Quality::new(u.int_in_range(1..=100)?).unwrap();
            let quantizer = Quantizer::new(quality);
            let mut data = [0.0f64; BLOCK_SIZE];
            for c in data.iter_mut() {
                *c = u.int_in_range(-1024_0000i32..=1024_0000)? as f64 / 10000.0;
            }
            let coeffs = CoefficientBlock::new(data);
            let back = quantizer.dequantize(&quantizer.quantize(&coeffs));
            for i in 0..BLOCK_SIZE {
                let step = quantizer.table().steps()[i] as f64;
                let original = coeffs.as_array()[i];
                let restored = back.as_array()[i];
                assert!((restored - original).abs() <= step / 2.0 + 1e-9);
                assert!(restored.abs() <= original.abs() + step);
            }
            Ok(())
        });
    }
}
