// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod comp;
pub mod dec;
pub mod enc;
pub mod report;

#[cfg(test)]
mod tests {
    use crate::{
        comp::{compress_image, load_image},
        dec::decompress_file,
        enc::save_image,
    };
    use bpeg::{PixelBuffer, Quality, source::SourceFormat};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bpeg_cli_{}_{name}", std::process::id()))
    }

    /// Runs the same steps as `bpeg compress` followed by `bpeg decompress`.
    #[test]
    fn file_to_file() {
        let (width, height) = (19, 11);
        let samples: Vec<u8> = (0..width * height).map(|i| (i * 7 % 200) as u8).collect();
        let raw_in = temp_path("in.raw");
        let frame_path = temp_path("frame.bpeg");
        let pgm_out = temp_path("out.pgm");
        let raw_out = temp_path("out.raw");
        std::fs::write(&raw_in, &samples).unwrap();

        let image = load_image(&raw_in, SourceFormat::Raw, width, height).unwrap();
        assert_eq!(image.as_slice(), &samples[..]);
        let compressed = compress_image(&image, Quality::new(75).unwrap()).unwrap();
        compressed.frame.save(&frame_path).unwrap();

        let (decoded, _) = decompress_file(&frame_path).unwrap();
        assert_eq!(decoded.size(), (width, height));
        save_image(&decoded, &pgm_out).unwrap();
        save_image(&decoded, &raw_out).unwrap();

        let pgm = std::fs::read(&pgm_out).unwrap();
        assert!(pgm.starts_with(b"P5\n19 11\n255\n"));
        assert_eq!(std::fs::read(&raw_out).unwrap(), decoded.as_slice());

        for path in [raw_in, frame_path, pgm_out, raw_out] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn text_input() {
        let path = temp_path("in.txt");
        std::fs::write(&path, "1 2 3\n4 5 6\n").unwrap();
        let image = load_image(&path, SourceFormat::Text, 3, 2).unwrap();
        assert_eq!(
            image,
            PixelBuffer::from_samples((3, 2), vec![1, 2, 3, 4, 5, 6]).unwrap()
        );
        assert!(load_image(&path, SourceFormat::Text, 4, 2).is_err());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_frame_file() {
        assert!(decompress_file(&temp_path("does_not_exist.bpeg")).is_err());
    }
}
