// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Pixel sources feeding [`crate::Codec::load`].

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use crate::error::{Error, Result};

/// Supplies exactly `width * height` 8-bit grayscale samples in row-major order.
pub trait PixelSource {
    fn read_samples(&mut self, width: usize, height: usize) -> Result<Vec<u8>>;
}

fn sample_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidImageSize(width, height));
    }
    width
        .checked_mul(height)
        .ok_or(Error::ImageSizeTooLarge(width, height))
}

/// Headerless bytes, one sample per byte.
pub struct RawPixelSource<R> {
    reader: R,
}

impl<R: Read> RawPixelSource<R> {
    pub fn new(reader: R) -> RawPixelSource<R> {
        RawPixelSource { reader }
    }
}

impl<R: Read> PixelSource for RawPixelSource<R> {
    fn read_samples(&mut self, width: usize, height: usize) -> Result<Vec<u8>> {
        let expected = sample_count(width, height)?;
        let mut samples = Vec::new();
        samples.try_reserve_exact(expected)?;
        (&mut self.reader)
            .take(expected as u64)
            .read_to_end(&mut samples)?;
        if samples.len() != expected {
            return Err(Error::SampleCountMismatch(expected, samples.len()));
        }
        Ok(samples)
    }
}

/// Whitespace-separated decimal integers. Values outside [0, 255] saturate;
/// anything after the last needed sample is not read.
pub struct TextPixelSource<R> {
    reader: R,
}

impl<R: BufRead> TextPixelSource<R> {
    pub fn new(reader: R) -> TextPixelSource<R> {
        TextPixelSource { reader }
    }
}

impl<R: BufRead> PixelSource for TextPixelSource<R> {
    fn read_samples(&mut self, width: usize, height: usize) -> Result<Vec<u8>> {
        let expected = sample_count(width, height)?;
        let mut samples = Vec::new();
        samples.try_reserve_exact(expected)?;
        let mut line = String::new();
        while samples.len() < expected {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(Error::SampleCountMismatch(expected, samples.len()));
            }
            for token in line.split_whitespace() {
                if samples.len() == expected {
                    break;
                }
                let value: i64 = token
                    .parse()
                    .map_err(|_| Error::InvalidSample(token.to_string()))?;
                samples.push(value.clamp(0, 255) as u8);
            }
        }
        Ok(samples)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Raw,
    Text,
}

/// Opens `path` as a pixel source of the given format.
pub fn open_pixel_file(
    path: impl AsRef<Path>,
    format: SourceFormat,
) -> Result<Box<dyn PixelSource>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::UnopenableResource(path.to_path_buf(), e))?;
    let reader = BufReader::new(file);
    Ok(match format {
        SourceFormat::Raw => Box::new(RawPixelSource::new(reader)),
        SourceFormat::Text => Box::new(TextPixelSource::new(reader)),
    })
}
