// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::bit_reader::MAX_BITS_PER_CALL;

/// Packs bits into bytes, least significant bit first. The layout matches
/// what [`crate::bit_reader::BitReader`] expects.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_buf: u64,
    bits_in_buf: usize,
    total_bits_written: usize,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter::default()
    }

    /// Appends the low `num` bits of `bits`; `num` can be at most 64.
    pub fn write(&mut self, num: usize, bits: u64) {
        debug_assert!(num <= 64);
        if num > MAX_BITS_PER_CALL {
            self.write(32, bits & 0xffff_ffff);
            self.write(num - 32, bits >> 32);
            return;
        }
        self.bit_buf |= (bits & ((1u64 << num) - 1)) << self.bits_in_buf;
        self.bits_in_buf += num;
        self.total_bits_written += num;
        while self.bits_in_buf >= 8 {
            self.data.push(self.bit_buf as u8);
            self.bit_buf >>= 8;
            self.bits_in_buf -= 8;
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.write(1, bit as u64);
    }

    pub fn total_bits_written(&self) -> usize {
        self.total_bits_written
    }

    /// Flushes the partial last byte, padding it with zero bits.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_buf > 0 {
            self.data.push(self.bit_buf as u8);
        }
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_reader::BitReader;
    use crate::error::Error;
    use test_log::test;

    #[test]
    fn packs_lsb_first() {
        let mut bw = BitWriter::new();
        bw.write_bit(false);
        bw.write_bit(true);
        bw.write(2, 0b01);
        bw.write(4, 0b1010);
        bw.write(3, 0b111);
        assert_eq!(bw.total_bits_written(), 11);
        assert_eq!(bw.finish(), vec![0b1010_0110, 0b0000_0111]);
    }

    #[test]
    fn ignores_bits_above_width() {
        let mut bw = BitWriter::new();
        bw.write(4, 0xff);
        assert_eq!(bw.finish(), vec![0x0f]);
    }

    #[test]
    fn reader_sees_written_fields() -> Result<(), Error> {
        let fields = [(1, 1), (64, 0x8000_0000_0000_0001), (7, 0x55), (0, 0), (33, 0x1_2345_6789)];
        let mut bw = BitWriter::new();
        for (num, bits) in fields {
            bw.write(num, bits);
        }
        let data = bw.finish();
        let mut br = BitReader::new(&data);
        for (num, bits) in fields {
            let value = if num > MAX_BITS_PER_CALL {
                br.read(32)? | (br.read(num - 32)? << 32)
            } else {
                br.read(num)?
            };
            assert_eq!(value, bits);
        }
        Ok(())
    }
}
