// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod huffman;

pub use huffman::{CodeTable, Codeword, HuffmanBits, HuffmanCoder, histogram};
