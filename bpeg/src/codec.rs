// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    block::{QuantizedBlock, SampleBlock},
    entropy_coding::huffman::{HuffmanBits, HuffmanCoder, histogram},
    error::{Error, Result},
    frame::CompressedFrame,
    image::PixelBuffer,
    metrics::CompressionStats,
    quant::{Quality, Quantizer},
    source::PixelSource,
    transform::BlockTransform,
    util::tracing_wrappers::*,
    zigzag::{Symbol, SymbolReader, decode_block, encode_block_into},
};

// DC difference plus the shortest end-of-block pair.
const MIN_SYMBOLS_PER_BLOCK: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    pub quality: Quality,
}

impl CodecOptions {
    pub fn with_quality(mut self, quality: Quality) -> CodecOptions {
        self.quality = quality;
        self
    }
}

/// Drives the block pipeline over an owned [`PixelBuffer`].
///
/// Compression runs pixels through the level shift, DCT, quantizer and
/// zigzag run-length coder; decompression mirrors each step. Blocks are
/// visited in raster order and the DC predictor carries across them.
#[derive(Debug)]
pub struct Codec {
    options: CodecOptions,
    quantizer: Quantizer,
    transform: BlockTransform,
    buffer: Option<PixelBuffer>,
}

impl Default for Codec {
    fn default() -> Self {
        Codec::new(CodecOptions::default())
    }
}

impl Codec {
    pub fn new(options: CodecOptions) -> Codec {
        Codec {
            options,
            quantizer: Quantizer::new(options.quality),
            transform: BlockTransform::new(),
            buffer: None,
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn quality(&self) -> Quality {
        self.options.quality
    }

    pub fn set_quality(&mut self, quality: Quality) {
        if quality != self.options.quality {
            self.options.quality = quality;
            self.quantizer = Quantizer::new(quality);
        }
    }

    /// Replaces the current buffer with a zero-filled one. The old buffer is
    /// kept if the allocation fails.
    pub fn allocate(&mut self, width: usize, height: usize) -> Result<()> {
        let buffer = PixelBuffer::new((width, height))?;
        debug!(width, height, "allocated pixel buffer");
        self.buffer = Some(buffer);
        Ok(())
    }

    /// Reads `width * height` samples from `source` into a new buffer. The old
    /// buffer is kept if reading fails.
    pub fn load<S: PixelSource + ?Sized>(
        &mut self,
        source: &mut S,
        width: usize,
        height: usize,
    ) -> Result<()> {
        let samples = source.read_samples(width, height)?;
        let buffer = PixelBuffer::from_samples((width, height), samples)?;
        debug!(width, height, "loaded pixel buffer");
        self.buffer = Some(buffer);
        Ok(())
    }

    pub fn set_buffer(&mut self, buffer: PixelBuffer) {
        self.buffer = Some(buffer);
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn take_buffer(&mut self) -> Option<PixelBuffer> {
        self.buffer.take()
    }

    fn require_buffer(&self) -> Result<&PixelBuffer> {
        self.buffer.as_ref().ok_or(Error::BufferNotAllocated)
    }

    pub fn read_block(&self, bx: usize, by: usize) -> Result<SampleBlock> {
        Ok(self.require_buffer()?.read_block(bx, by))
    }

    pub fn write_block(&mut self, bx: usize, by: usize, block: &SampleBlock) -> Result<()> {
        let buffer = self.buffer.as_mut().ok_or(Error::BufferNotAllocated)?;
        buffer.write_block(bx, by, block);
        Ok(())
    }

    fn quantize_block(&self, buffer: &PixelBuffer, bx: usize, by: usize) -> QuantizedBlock {
        let coefficients = self.transform.forward(&buffer.read_block(bx, by));
        self.quantizer.quantize(&coefficients)
    }

    #[cfg(feature = "parallel")]
    fn quantize_blocks(&self, buffer: &PixelBuffer) -> Vec<QuantizedBlock> {
        use rayon::prelude::*;
        let (xblocks, yblocks) = buffer.size_in_blocks();
        (0..xblocks * yblocks)
            .into_par_iter()
            .map(|i| self.quantize_block(buffer, i % xblocks, i / xblocks))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn quantize_blocks(&self, buffer: &PixelBuffer) -> Vec<QuantizedBlock> {
        let (xblocks, yblocks) = buffer.size_in_blocks();
        (0..xblocks * yblocks)
            .map(|i| self.quantize_block(buffer, i % xblocks, i / xblocks))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn reconstruct_blocks(
        &self,
        blocks: &[QuantizedBlock],
        quantizer: &Quantizer,
    ) -> Vec<SampleBlock> {
        use rayon::prelude::*;
        blocks
            .par_iter()
            .map(|b| self.transform.inverse(&quantizer.dequantize(b)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn reconstruct_blocks(
        &self,
        blocks: &[QuantizedBlock],
        quantizer: &Quantizer,
    ) -> Vec<SampleBlock> {
        blocks
            .iter()
            .map(|b| self.transform.inverse(&quantizer.dequantize(b)))
            .collect()
    }

    /// Compresses the current buffer into a frame at the configured quality.
    pub fn compress(&self) -> Result<(CompressedFrame, CompressionStats)> {
        let buffer = self.require_buffer()?;
        let (width, height) = buffer.size();
        info!(width, height, quality = self.quality().get(), "compressing");

        let quantized = self.quantize_blocks(buffer);
        debug!(blocks = quantized.len(), "transformed and quantized");

        let mut stats = CompressionStats::default();
        let mut symbols = Vec::new();
        let mut predictor = 0;
        for block in &quantized {
            stats.add_block(block);
            predictor = encode_block_into(block, predictor, &mut symbols)?;
        }
        stats.symbols = symbols.len();
        debug!(
            symbols = stats.symbols,
            zero_percent = stats.zero_coefficient_percentage(),
            "run-length coding done"
        );

        // PixelBuffer dimensions are always below u32::MAX.
        let frame = CompressedFrame::new(width as u32, height as u32, self.quality(), symbols)?;
        Ok((frame, stats))
    }

    /// Rebuilds the image stored in `frame`, replacing the current buffer and
    /// adopting the frame's quality. On error the codec is left unchanged.
    pub fn decompress(&mut self, frame: &CompressedFrame) -> Result<&PixelBuffer> {
        let (xblocks, yblocks) = frame.size_in_blocks();
        let num_blocks = xblocks * yblocks;
        info!(
            width = frame.width(),
            height = frame.height(),
            quality = frame.quality().get(),
            "decompressing {num_blocks} blocks"
        );
        if frame.symbols().len() < num_blocks.saturating_mul(MIN_SYMBOLS_PER_BLOCK) {
            return Err(Error::MalformedStream("too few symbols for the block grid"));
        }

        let mut blocks = Vec::new();
        blocks.try_reserve_exact(num_blocks)?;
        let mut reader = SymbolReader::new(frame.symbols());
        let mut predictor = 0;
        for _ in 0..num_blocks {
            let (block, dc) = decode_block(&mut reader, predictor)?;
            predictor = dc;
            blocks.push(block);
        }
        if !reader.is_at_end() {
            warn!(remaining = reader.remaining(), "symbols left after the last block");
            return Err(Error::MalformedStream("trailing symbols after the last block"));
        }

        let quantizer = Quantizer::new(frame.quality());
        let samples = self.reconstruct_blocks(&blocks, &quantizer);
        let mut image = PixelBuffer::new(frame.size())?;
        for (i, block) in samples.iter().enumerate() {
            image.write_block(i % xblocks, i / xblocks, block);
        }

        self.options.quality = frame.quality();
        self.quantizer = quantizer;
        Ok(self.buffer.insert(image))
    }
}

/// Builds a Huffman code from the statistics of `symbols` and encodes them.
pub fn huffman_encode_symbols(symbols: &[Symbol]) -> Result<(HuffmanCoder<Symbol>, HuffmanBits)> {
    let frequencies = histogram(symbols);
    let coder = HuffmanCoder::from_frequencies(&frequencies)?;
    let bits = coder.encode(symbols)?;
    trace!(
        alphabet = frequencies.len(),
        bits = bits.len(),
        "entropy coded symbol stream"
    );
    Ok((coder, bits))
}
