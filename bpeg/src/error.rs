// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::{collections::TryReserveError, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid quality {0}, expected a value in [1, 100]")]
    InvalidQuality(u32),
    #[error("Pixel buffer accessed before allocation")]
    BufferNotAllocated,
    #[error("Malformed symbol stream: {0}")]
    MalformedStream(&'static str),
    #[error("Cannot open {0}: {1}")]
    UnopenableResource(PathBuf, #[source] std::io::Error),
    #[error("Image size too large: {0}x{1}")]
    ImageSizeTooLarge(usize, usize),
    #[error("Invalid image size: {0}x{1}")]
    InvalidImageSize(usize, usize),
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
    #[error("Symbol value {0} does not fit in a 16-bit symbol cell")]
    SymbolOutOfRange(i64),
    #[error("Cannot build a Huffman code for an empty alphabet")]
    EmptyAlphabet,
    #[error("Invalid symbol frequency: {0}")]
    InvalidFrequency(f64),
    #[error("Symbol {0} appears more than once in the alphabet")]
    DuplicateSymbol(String),
    #[error("Symbol {0} has no Huffman code")]
    UnknownSymbol(String),
    #[error("Huffman tree has not been built")]
    NoHuffmanTree,
    #[error("Invalid Huffman code")]
    InvalidHuffmanCode,
    #[error("Out of bounds read attempted")]
    OutOfBounds,
    #[error("Huffman bit stream ends inside a codeword")]
    TruncatedHuffmanStream,
    #[error("Huffman code of length {0} exceeds the maximum of {max}", max = crate::entropy_coding::huffman::HUFFMAN_MAX_BITS)]
    CodeTooLong(usize),
    #[error("File truncated")]
    FileTruncated,
    #[error("Invalid symbol count: {0}")]
    InvalidSymbolCount(i32),
    #[error("Symbol stream of {0} entries does not fit in a frame")]
    SymbolStreamTooLong(usize),
    #[error("{0} unexpected bytes after the symbol stream")]
    TrailingData(usize),
    #[error("Expected {0} samples, got {1}")]
    SampleCountMismatch(usize, usize),
    #[error("Image sizes differ: {0:?} vs {1:?}")]
    ImageSizeMismatch((usize, usize), (usize, usize)),
    #[error("Invalid sample value: {0:?}")]
    InvalidSample(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
