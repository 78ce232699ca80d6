// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Huffman codes computed from symbol statistics.
//!
//! The tree is built greedily from a min-priority queue. Equal frequencies
//! are ordered by node creation: leaves in the order they were supplied,
//! then merged nodes in the order they were created. The first node popped
//! becomes the left (`0`) child of the merged node.

use std::{
    cmp::{Ordering, Reverse},
    collections::{BTreeMap, BTreeSet, BinaryHeap},
    fmt::{self, Debug},
};

use crate::{
    bit_reader::BitReader,
    bit_writer::BitWriter,
    error::{Error, Result},
};

/// Longest codeword the coder accepts.
pub const HUFFMAN_MAX_BITS: usize = 64;

/// Counts occurrences of each distinct value in `data` and normalizes by
/// `data.len()`. The result is sorted by symbol.
pub fn histogram<S: Copy + Ord>(data: &[S]) -> Vec<(S, f64)> {
    let mut counts = BTreeMap::new();
    for &symbol in data {
        *counts.entry(symbol).or_insert(0usize) += 1;
    }
    let total = data.len() as f64;
    counts
        .into_iter()
        .map(|(symbol, count)| (symbol, count as f64 / total))
        .collect()
}

/// A single code: bit `i` (counting from the least significant) is the edge
/// taken at depth `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Codeword {
    bits: u64,
    len: u8,
}

impl Codeword {
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len());
        (self.bits >> index) & 1 != 0
    }

    /// Returns true if `self` is a proper or improper prefix of `other`.
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        if self.len > other.len {
            return false;
        }
        let mask = if self.len() == 64 {
            u64::MAX
        } else {
            (1u64 << self.len) - 1
        };
        other.bits & mask == self.bits
    }

    fn child(self, right: bool) -> Result<Codeword> {
        let len = self.len() + 1;
        if len > HUFFMAN_MAX_BITS {
            return Err(Error::CodeTooLong(len));
        }
        Ok(Codeword {
            bits: self.bits | ((right as u64) << self.len),
            len: len as u8,
        })
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to codeword mapping produced by [`HuffmanCoder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct CodeTable<S> {
    codes: BTreeMap<S, Codeword>,
}

impl<S: Copy + Ord> CodeTable<S> {
    pub fn get(&self, symbol: &S) -> Option<&Codeword> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Codeword)> {
        self.codes.iter()
    }

    /// Expected code length in bits under the given frequencies.
    pub fn average_length(&self, frequencies: &[(S, f64)]) -> f64 {
        let total: f64 = frequencies.iter().map(|(_, f)| f).sum();
        frequencies
            .iter()
            .filter_map(|(s, f)| self.get(s).map(|c| f * c.len() as f64))
            .sum::<f64>()
            / total
    }
}

impl<S> Default for CodeTable<S> {
    fn default() -> Self {
        CodeTable {
            codes: BTreeMap::new(),
        }
    }
}

/// An encoded bit sequence: `len` bits packed LSB-first into `data`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HuffmanBits {
    data: Vec<u8>,
    len: usize,
}

impl HuffmanBits {
    /// Wraps previously encoded bytes. `len` may not exceed `8 * data.len()`.
    pub fn from_parts(data: Vec<u8>, len: usize) -> HuffmanBits {
        HuffmanBits { data, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Display for HuffmanBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len.min(self.data.len() * 8) {
            let bit = (self.data[i / 8] >> (i % 8)) & 1;
            f.write_str(if bit != 0 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Node<S> {
    frequency: f64,
    symbol: Option<S>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Heap key. Smaller frequency first, then earlier node.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    frequency: f64,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frequency
            .total_cmp(&other.frequency)
            .then(self.node.cmp(&other.node))
    }
}

/// Builds a Huffman tree from symbol frequencies and encodes or decodes bit
/// sequences with it.
///
/// Rebuilding replaces the tree and table; encode and decode only read them.
#[derive(Debug, Clone)]
pub struct HuffmanCoder<S> {
    nodes: Vec<Node<S>>,
    root: Option<usize>,
    table: CodeTable<S>,
}

impl<S> Default for HuffmanCoder<S> {
    fn default() -> Self {
        HuffmanCoder {
            nodes: Vec::new(),
            root: None,
            table: CodeTable::default(),
        }
    }
}

impl<S: Copy + Ord + Debug> HuffmanCoder<S> {
    pub fn new() -> HuffmanCoder<S> {
        HuffmanCoder::default()
    }

    pub fn from_frequencies(frequencies: &[(S, f64)]) -> Result<HuffmanCoder<S>> {
        let mut coder = HuffmanCoder::new();
        coder.build(frequencies)?;
        Ok(coder)
    }

    /// Builds the tree and code table for `frequencies`. Frequencies must be
    /// finite and positive, and each symbol may appear only once. On error the
    /// previous tree, if any, is kept.
    pub fn build(&mut self, frequencies: &[(S, f64)]) -> Result<()> {
        if frequencies.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        let mut seen = BTreeSet::new();
        for &(symbol, frequency) in frequencies {
            if !frequency.is_finite() || frequency <= 0.0 {
                return Err(Error::InvalidFrequency(frequency));
            }
            if !seen.insert(symbol) {
                return Err(Error::DuplicateSymbol(format!("{symbol:?}")));
            }
        }

        let mut nodes: Vec<Node<S>> = frequencies
            .iter()
            .map(|&(symbol, frequency)| Node {
                frequency,
                symbol: Some(symbol),
                left: None,
                right: None,
            })
            .collect();
        let mut heap: BinaryHeap<Reverse<QueueEntry>> = nodes
            .iter()
            .enumerate()
            .map(|(node, n)| {
                Reverse(QueueEntry {
                    frequency: n.frequency,
                    node,
                })
            })
            .collect();

        let root = if nodes.len() == 1 {
            // A lone leaf still needs one edge so that its code is non-empty.
            nodes.push(Node {
                frequency: nodes[0].frequency,
                symbol: None,
                left: Some(0),
                right: None,
            });
            1
        } else {
            while let (Some(Reverse(first)), Some(Reverse(second))) = (heap.pop(), heap.pop()) {
                let node = nodes.len();
                let frequency = first.frequency + second.frequency;
                nodes.push(Node {
                    frequency,
                    symbol: None,
                    left: Some(first.node),
                    right: Some(second.node),
                });
                if heap.is_empty() {
                    break;
                }
                heap.push(Reverse(QueueEntry { frequency, node }));
            }
            nodes.len() - 1
        };

        let table = build_table(&nodes, root)?;
        self.nodes = nodes;
        self.root = Some(root);
        self.table = table;
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    pub fn code_table(&self) -> &CodeTable<S> {
        &self.table
    }

    pub fn code(&self, symbol: &S) -> Option<&Codeword> {
        self.table.get(symbol)
    }

    /// Concatenates the codes of `data`. A symbol without a code is an error.
    pub fn encode(&self, data: &[S]) -> Result<HuffmanBits> {
        if self.root.is_none() {
            return Err(Error::NoHuffmanTree);
        }
        let mut writer = BitWriter::new();
        for symbol in data {
            let code = self
                .table
                .get(symbol)
                .ok_or_else(|| Error::UnknownSymbol(format!("{symbol:?}")))?;
            writer.write(code.len(), code.bits());
        }
        let len = writer.total_bits_written();
        Ok(HuffmanBits {
            data: writer.finish(),
            len,
        })
    }

    /// Walks the tree one bit per edge, emitting a symbol at each leaf.
    pub fn decode(&self, bits: &HuffmanBits) -> Result<Vec<S>> {
        let root = self.root.ok_or(Error::NoHuffmanTree)?;
        let mut reader = BitReader::new(&bits.data);
        let mut out = Vec::new();
        let mut node = root;
        for _ in 0..bits.len {
            let right = reader
                .read_bit()
                .map_err(|_| Error::TruncatedHuffmanStream)?;
            let current = &self.nodes[node];
            node = if right { current.right } else { current.left }
                .ok_or(Error::InvalidHuffmanCode)?;
            if let Some(symbol) = self.nodes[node].symbol {
                out.push(symbol);
                node = root;
            }
        }
        if node != root {
            return Err(Error::TruncatedHuffmanStream);
        }
        Ok(out)
    }
}

fn build_table<S: Copy + Ord>(nodes: &[Node<S>], root: usize) -> Result<CodeTable<S>> {
    let mut codes = BTreeMap::new();
    let mut stack = vec![(root, Codeword::default())];
    while let Some((index, code)) = stack.pop() {
        let node = &nodes[index];
        if let Some(symbol) = node.symbol {
            codes.insert(symbol, code);
            continue;
        }
        if let Some(right) = node.right {
            stack.push((right, code.child(true)?));
        }
        if let Some(left) = node.left {
            stack.push((left, code.child(false)?));
        }
    }
    Ok(CodeTable { codes })
}
