// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Quality comparison and entropy-coding reports printed by the CLI.

use std::{fmt, time::Duration};

use bpeg::{
    PixelBuffer, Quality,
    entropy_coding::{HuffmanCoder, histogram},
    huffman_encode_symbols,
    metrics::{psnr, rms_error},
};
use color_eyre::eyre::{Result, eyre};

use crate::{comp::compress_image, dec::decompress_frame};

/// One row of a roundtrip comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub quality: Quality,
    pub compress_time: Duration,
    pub decompress_time: Duration,
    pub symbols: usize,
    pub zero_percentage: f64,
    pub huffman_bits: usize,
    pub pixels: usize,
    pub rmse: f64,
    pub psnr: f64,
}

impl QualityReport {
    pub const HEADER: &'static str =
        "quality  compress  decompress   symbols  zeros%   huff bits      bpp     rmse    psnr";

    /// Huffman-coded bits per input pixel.
    pub fn bits_per_pixel(&self) -> f64 {
        self.huffman_bits as f64 / self.pixels as f64
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>7} {:>7.2}ms {:>9.2}ms {:>9} {:>7.2} {:>11} {:>8.3} {:>8.3}",
            self.quality.get(),
            self.compress_time.as_secs_f64() * 1e3,
            self.decompress_time.as_secs_f64() * 1e3,
            self.symbols,
            self.zero_percentage,
            self.huffman_bits,
            self.bits_per_pixel(),
            self.rmse,
        )?;
        write!(f, " {:>7.2}", self.psnr)
    }
}

/// Compresses and decompresses `image` in memory at `quality`.
pub fn roundtrip(image: &PixelBuffer, quality: Quality) -> Result<QualityReport> {
    let compressed = compress_image(image, quality)?;
    let (decoded, decompress_time) = decompress_frame(&compressed.frame)?;
    let (_, bits) = huffman_encode_symbols(compressed.frame.symbols())?;
    Ok(QualityReport {
        quality,
        compress_time: compressed.elapsed,
        decompress_time,
        symbols: compressed.stats.symbols,
        zero_percentage: compressed.stats.zero_coefficient_percentage(),
        huffman_bits: bits.len(),
        pixels: image.as_slice().len(),
        rmse: rms_error(image, &decoded)?,
        psnr: psnr(image, &decoded)?,
    })
}

/// Code table and encoded size for the characters of a piece of text.
pub struct TextCodeReport {
    pub coder: HuffmanCoder<char>,
    /// Relative frequency of each character, summing to 1.
    pub frequencies: Vec<(char, f64)>,
    pub text_len: usize,
    pub encoded_bits: usize,
    pub decoded_matches: bool,
}

pub fn huffman_text(text: &str) -> Result<TextCodeReport> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Err(eyre!("Cannot build a Huffman code for empty text"));
    }
    let frequencies = histogram(&chars);
    let coder = HuffmanCoder::from_frequencies(&frequencies)?;
    let bits = coder.encode(&chars)?;
    let decoded_matches = coder.decode(&bits)? == chars;
    Ok(TextCodeReport {
        coder,
        frequencies,
        text_len: chars.len(),
        encoded_bits: bits.len(),
        decoded_matches,
    })
}

impl fmt::Display for TextCodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, frequency) in &self.frequencies {
            let code = self
                .coder
                .code(symbol)
                .map(|c| c.to_string())
                .unwrap_or_default();
            writeln!(f, "{:>6} {:>8.4} {}", format!("{symbol:?}"), frequency, code)?;
        }
        writeln!(
            f,
            "average code length: {:.4} bits",
            self.coder.code_table().average_length(&self.frequencies)
        )?;
        write!(
            f,
            "encoded length: {} bits ({} bits as 8-bit text)",
            self.encoded_bits,
            self.text_len * 8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> PixelBuffer {
        let samples = (0..height)
            .flat_map(|y| (0..width).map(move |x| ((x * 3 + y * 5) % 256) as u8))
            .collect();
        PixelBuffer::from_samples((width, height), samples).unwrap()
    }

    #[test]
    fn roundtrip_reports_quality() -> Result<()> {
        let image = gradient(24, 16);
        let report = roundtrip(&image, Quality::new(90)?)?;
        assert_eq!(report.quality.get(), 90);
        assert!(report.symbols >= 6 * 3);
        assert!(report.huffman_bits > 0);
        assert!(report.psnr > 30.0, "psnr {}", report.psnr);
        assert!(report.bits_per_pixel() > 0.0);
        assert!(report.to_string().starts_with("     90"));
        Ok(())
    }

    #[test]
    fn text_code() -> Result<()> {
        let report = huffman_text("abracadabra")?;
        assert!(report.decoded_matches);
        assert_eq!(report.frequencies[0], ('a', 5.0 / 11.0));
        assert_eq!(report.text_len, 11);
        // Weights 5,2,2,1,1: 'a' gets one bit, every other symbol three.
        assert_eq!(report.encoded_bits, 23);
        assert!(
            report
                .to_string()
                .ends_with("encoded length: 23 bits (88 bits as 8-bit text)")
        );
        assert!(huffman_text("").is_err());
        Ok(())
    }
}
