// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Write;

use bpeg::PixelBuffer;

pub fn to_pgm(img: &PixelBuffer) -> Vec<u8> {
    let (width, height) = img.size();
    let mut ret = Vec::with_capacity(img.as_slice().len() + 32);
    // Writing into a Vec cannot fail.
    let _ = write!(&mut ret, "P5\n{width} {height}\n255\n");
    ret.extend((0..height).flat_map(|y| img.row(y).iter().copied()));
    ret
}

#[cfg(test)]
mod test {
    use super::to_pgm;
    use bpeg::{PixelBuffer, Result};

    #[test]
    fn convert_to_pgm() -> Result<()> {
        let image = PixelBuffer::new((32, 16))?;
        let pgm = to_pgm(&image);
        assert!(pgm.starts_with(b"P5\n32 16\n255\n"));
        assert_eq!(pgm.len(), b"P5\n32 16\n255\n".len() + 32 * 16);
        Ok(())
    }

    #[test]
    fn samples_in_row_order() -> Result<()> {
        let image = PixelBuffer::from_samples((3, 2), vec![1, 2, 3, 4, 5, 6])?;
        assert!(to_pgm(&image).ends_with(&[1, 2, 3, 4, 5, 6]));
        Ok(())
    }
}
