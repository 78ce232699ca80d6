// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Zigzag scan and run-length coding of quantized blocks.
//!
//! Each block becomes one DC difference symbol followed by `(run, amplitude)`
//! pairs, where `run` counts the zero coefficients skipped in zigzag order.
//! A pair with amplitude 0 terminates the block.

use crate::{
    BLOCK_SIZE,
    block::QuantizedBlock,
    error::{Error, Result},
};

/// A single entry of the run-length symbol stream.
pub type Symbol = i32;

/// Maps a zigzag scan position to a row-major block index.
pub const ZIGZAG_TO_NATURAL: [usize; BLOCK_SIZE] = [
    0, 1, 8, 16, 9, 2, 3, 10, //
    17, 24, 32, 25, 18, 11, 4, 5, //
    12, 19, 26, 33, 40, 48, 41, 34, //
    27, 20, 13, 6, 7, 14, 21, 28, //
    35, 42, 49, 56, 57, 50, 43, 36, //
    29, 22, 15, 23, 30, 37, 44, 51, //
    58, 59, 52, 45, 38, 31, 39, 46, //
    53, 60, 61, 54, 47, 55, 62, 63, //
];

/// Maps a row-major block index to its zigzag scan position.
pub const NATURAL_TO_ZIGZAG: [usize; BLOCK_SIZE] = invert(&ZIGZAG_TO_NATURAL);

const fn invert(order: &[usize; BLOCK_SIZE]) -> [usize; BLOCK_SIZE] {
    let mut inverse = [0; BLOCK_SIZE];
    let mut i = 0;
    while i < BLOCK_SIZE {
        inverse[order[i]] = i;
        i += 1;
    }
    inverse
}

fn checked_symbol(value: i32) -> Result<Symbol> {
    if i16::try_from(value).is_err() {
        return Err(Error::SymbolOutOfRange(value as i64));
    }
    Ok(value)
}

/// Run-length encodes `block` into a fresh symbol vector. Returns the symbols
/// and the block's DC, which is the predictor for the next block.
pub fn encode_block(block: &QuantizedBlock, previous_dc: i32) -> Result<(Vec<Symbol>, i32)> {
    let mut symbols = Vec::new();
    let dc = encode_block_into(block, previous_dc, &mut symbols)?;
    Ok((symbols, dc))
}

/// Same as [`encode_block`], appending to `out`. On error `out` is left as it
/// was on entry.
pub fn encode_block_into(
    block: &QuantizedBlock,
    previous_dc: i32,
    out: &mut Vec<Symbol>,
) -> Result<i32> {
    let start = out.len();
    let result = encode_block_unchecked(block, previous_dc, out);
    if result.is_err() {
        out.truncate(start);
    }
    result
}

fn encode_block_unchecked(
    block: &QuantizedBlock,
    previous_dc: i32,
    out: &mut Vec<Symbol>,
) -> Result<i32> {
    let coeffs = block.as_array();
    let dc = block.dc();
    let diff = (dc as i64) - (previous_dc as i64);
    let diff = i32::try_from(diff).map_err(|_| Error::SymbolOutOfRange(diff))?;
    out.push(checked_symbol(diff)?);

    let mut run = 0;
    for &natural in &ZIGZAG_TO_NATURAL[1..] {
        let value = coeffs[natural];
        if value == 0 {
            run += 1;
        } else {
            out.push(run);
            out.push(checked_symbol(value)?);
            run = 0;
        }
    }
    // Trailing zeros collapse into the end marker; otherwise it is explicit.
    out.push(run);
    out.push(0);
    Ok(dc)
}

/// Cursor over a run-length symbol stream.
#[derive(Debug, Clone)]
pub struct SymbolReader<'a> {
    symbols: &'a [Symbol],
    position: usize,
}

impl<'a> SymbolReader<'a> {
    pub fn new(symbols: &'a [Symbol]) -> SymbolReader<'a> {
        SymbolReader {
            symbols,
            position: 0,
        }
    }

    pub fn read(&mut self) -> Result<Symbol> {
        let symbol = *self
            .symbols
            .get(self.position)
            .ok_or(Error::MalformedStream("symbol stream exhausted"))?;
        self.position += 1;
        Ok(symbol)
    }

    fn read_pair(&mut self) -> Result<(Symbol, Symbol)> {
        let run = self.read()?;
        let amplitude = self
            .read()
            .map_err(|_| Error::MalformedStream("truncated run/amplitude pair"))?;
        Ok((run, amplitude))
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.symbols.len() - self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }
}

/// Decodes one block. Returns the block and its DC, the predictor for the
/// next block.
pub fn decode_block(reader: &mut SymbolReader, previous_dc: i32) -> Result<(QuantizedBlock, i32)> {
    let mut coeffs = [0i32; BLOCK_SIZE];
    let diff = reader.read()?;
    let dc = previous_dc
        .checked_add(diff)
        .ok_or(Error::MalformedStream("DC predictor overflow"))?;
    coeffs[0] = dc;

    let mut cursor = 1;
    loop {
        let (run, amplitude) = reader.read_pair()?;
        if amplitude == 0 {
            break;
        }
        let position = usize::try_from(run)
            .map_err(|_| Error::MalformedStream("negative zero run"))?
            .checked_add(cursor)
            .filter(|&p| p < BLOCK_SIZE)
            .ok_or(Error::MalformedStream("zero run overruns the block"))?;
        coeffs[ZIGZAG_TO_NATURAL[position]] = amplitude;
        cursor = position + 1;
    }
    Ok((QuantizedBlock::new(coeffs), dc))
}
