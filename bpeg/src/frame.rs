// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Persistent container for a compressed image.
//!
//! Layout, all fields little-endian:
//! `width: u32 | height: u32 | quality: u32 | count: i32 | count x i32`.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::{Error, Result},
    image::size_in_blocks,
    quant::Quality,
    util::tracing_wrappers::*,
    zigzag::Symbol,
};

pub const FRAME_HEADER_SIZE: usize = 16;
const SYMBOL_SIZE: usize = 4;
// Caps the up-front reservation for streams whose length comes from the file.
const MAX_INITIAL_RESERVE: usize = 1 << 20;

fn map_eof(err: std::io::Error) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::FileTruncated
    } else {
        Error::Io(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedFrame {
    width: u32,
    height: u32,
    quality: Quality,
    symbols: Vec<Symbol>,
}

impl CompressedFrame {
    pub fn new(
        width: u32,
        height: u32,
        quality: Quality,
        symbols: Vec<Symbol>,
    ) -> Result<CompressedFrame> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageSize(width as usize, height as usize));
        }
        if i32::try_from(symbols.len()).is_err() {
            return Err(Error::SymbolStreamTooLong(symbols.len()));
        }
        Ok(CompressedFrame {
            width,
            height,
            quality,
            symbols,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Block grid the symbol stream describes, in raster order.
    pub fn size_in_blocks(&self) -> (usize, usize) {
        size_in_blocks(self.size())
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }

    /// Number of bytes [`CompressedFrame::write_to`] produces.
    pub fn encoded_size(&self) -> usize {
        FRAME_HEADER_SIZE + self.symbols.len() * SYMBOL_SIZE
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.width)?;
        writer.write_u32::<LittleEndian>(self.height)?;
        writer.write_u32::<LittleEndian>(self.quality.get())?;
        // Length was checked against i32 on construction.
        writer.write_i32::<LittleEndian>(self.symbols.len() as i32)?;
        for &symbol in &self.symbols {
            writer.write_i32::<LittleEndian>(symbol)?;
        }
        debug!(
            width = self.width,
            height = self.height,
            quality = self.quality.get(),
            symbols = self.symbols.len(),
            "wrote compressed frame"
        );
        Ok(())
    }

    /// Reads one frame, leaving `reader` positioned after its last symbol.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<CompressedFrame> {
        let width = reader.read_u32::<LittleEndian>().map_err(map_eof)?;
        let height = reader.read_u32::<LittleEndian>().map_err(map_eof)?;
        let quality = Quality::new(reader.read_u32::<LittleEndian>().map_err(map_eof)?)?;
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageSize(width as usize, height as usize));
        }
        let count = reader.read_i32::<LittleEndian>().map_err(map_eof)?;
        let count = usize::try_from(count).map_err(|_| Error::InvalidSymbolCount(count))?;
        trace!(width, height, quality = quality.get(), count, "frame header");

        let mut symbols = Vec::new();
        symbols.try_reserve(count.min(MAX_INITIAL_RESERVE))?;
        for _ in 0..count {
            symbols.push(reader.read_i32::<LittleEndian>().map_err(map_eof)?);
        }
        debug!(width, height, symbols = symbols.len(), "read compressed frame");
        Ok(CompressedFrame {
            width,
            height,
            quality,
            symbols,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.encoded_size())?;
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Parses a frame that must span all of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<CompressedFrame> {
        let mut cursor = data;
        let frame = Self::read_from(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(Error::TrailingData(cursor.len()));
        }
        Ok(frame)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file =
            File::create(path).map_err(|e| Error::UnopenableResource(path.to_path_buf(), e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<CompressedFrame> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|e| Error::UnopenableResource(path.to_path_buf(), e))?;
        let mut reader = BufReader::new(file);
        let frame = Self::read_from(&mut reader)?;
        let mut rest = [0u8; 1];
        if reader.read(&mut rest)? != 0 {
            warn!(path = %path.display(), "ignoring data after the compressed frame");
        }
        Ok(frame)
    }
}
