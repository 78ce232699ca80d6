// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::PathBuf;

use bpeg::{
    Codec, CodecOptions, CompressedFrame, Error, PixelBuffer, Quality,
    metrics::{psnr, rms_error},
    source::{SourceFormat, TextPixelSource, open_pixel_file},
};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use test_log::test;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bpeg-test-{}-{name}", std::process::id()))
}

fn gradient(width: usize, height: usize) -> Vec<u8> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x * 255 / width + y * 2) % 256) as u8))
        .collect()
}

#[test]
fn raw_file_roundtrip() -> Result<(), Error> {
    let (width, height) = (40, 24);
    let samples = gradient(width, height);
    let raw_path = temp_path("input.raw");
    let frame_path = temp_path("frame.bpeg");
    std::fs::write(&raw_path, &samples)?;

    let mut codec = Codec::new(CodecOptions::default().with_quality(Quality::new(75)?));
    let mut source = open_pixel_file(&raw_path, SourceFormat::Raw)?;
    codec.load(source.as_mut(), width, height)?;
    let (frame, stats) = codec.compress()?;
    assert_eq!(stats.blocks, 15);
    frame.save(&frame_path)?;

    let loaded = CompressedFrame::load(&frame_path)?;
    assert_eq!(loaded, frame);
    std::fs::remove_file(&raw_path)?;
    std::fs::remove_file(&frame_path)?;

    let mut decoder = Codec::default();
    let decoded = decoder.decompress(&loaded)?;
    let original = PixelBuffer::from_samples((width, height), samples)?;
    assert!(psnr(&original, decoded)? > 30.0);
    Ok(())
}

#[test]
fn text_listing_source() -> Result<(), Error> {
    let mut listing = String::new();
    for y in 0..8 {
        let row: Vec<String> = (0..8).map(|x| ((x + y) * 40 - 20).to_string()).collect();
        listing.push_str(&row.join(" "));
        listing.push('\n');
    }
    let mut codec = Codec::default();
    codec.load(&mut TextPixelSource::new(listing.as_bytes()), 8, 8)?;
    let buffer = codec.buffer().unwrap();
    assert_eq!(buffer.get(0, 0), Some(0));
    assert_eq!(buffer.get(7, 7), Some(255));
    assert_eq!(buffer.get(1, 0), Some(20));
    Ok(())
}

#[test]
fn flat_tiles_survive_within_one_step() -> Result<(), Error> {
    // Constant 8x8 tiles only carry DC, so the error is bounded by the DC step.
    let (width, height) = (24, 16);
    let samples: Vec<u8> = (0..width * height)
        .map(|i| (((i % width) / 8 + (i / width) / 8 * 3) * 30) as u8)
        .collect();
    let original = PixelBuffer::from_samples((width, height), samples)?;
    for quality in [50, 75, 100] {
        let mut codec = Codec::new(CodecOptions::default().with_quality(Quality::new(quality)?));
        codec.set_buffer(original.clone());
        let (frame, _) = codec.compress()?;
        let decoded = Codec::default().decompress(&frame)?.clone();
        let error = rms_error(&original, &decoded)?;
        assert!(error < 2.0, "quality {quality}: rms {error}");
    }
    Ok(())
}

#[test]
fn noise_roundtrip_sizes() -> Result<(), Error> {
    let mut rng = XorShiftRng::seed_from_u64(11);
    for _ in 0..8 {
        let width = rng.random_range(1..40);
        let height = rng.random_range(1..40);
        let samples: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let mut codec = Codec::default();
        codec.set_buffer(PixelBuffer::from_samples((width, height), samples)?);
        let (frame, stats) = codec.compress()?;
        assert_eq!(stats.blocks, width.div_ceil(8) * height.div_ceil(8));
        let bytes = frame.to_bytes()?;
        let decoded = Codec::default()
            .decompress(&CompressedFrame::from_bytes(&bytes)?)?
            .clone();
        assert_eq!(decoded.size(), (width, height));
    }
    Ok(())
}

#[test]
fn corrupted_frame_is_rejected() -> Result<(), Error> {
    let mut codec = Codec::default();
    codec.set_buffer(PixelBuffer::from_samples((16, 16), gradient(16, 16))?);
    let (frame, _) = codec.compress()?;
    let mut symbols = frame.symbols().to_vec();
    symbols.truncate(symbols.len() - 1);
    let broken = CompressedFrame::new(16, 16, frame.quality(), symbols)?;
    assert!(matches!(
        Codec::default().decompress(&broken),
        Err(Error::MalformedStream(_))
    ));
    Ok(())
}
