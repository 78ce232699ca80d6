// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![deny(unsafe_code)]
pub mod bit_reader;
pub mod bit_writer;
pub mod block;
pub mod codec;
pub mod entropy_coding;
pub mod error;
pub mod frame;
pub mod image;
pub mod metrics;
pub mod quant;
pub mod source;
pub mod transform;
pub mod util;
pub mod zigzag;

pub use bpeg_transforms::{BLOCK_DIM, BLOCK_SIZE};
pub use codec::{Codec, CodecOptions, huffman_encode_symbols};
pub use error::{Error, Result};
pub use frame::CompressedFrame;
pub use image::PixelBuffer;
pub use quant::Quality;

/// Offset between unsigned 8-bit samples and the signed range the transform works on.
pub const LEVEL_SHIFT: i16 = 128;
