// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::PathBuf;

use bpeg::{Quality, source::SourceFormat};
use bpeg_cli::{comp, dec, enc, report};
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputFormat {
    /// Headerless 8-bit samples
    Raw,
    /// Whitespace-separated decimal samples
    Text,
}

impl From<InputFormat> for SourceFormat {
    fn from(format: InputFormat) -> SourceFormat {
        match format {
            InputFormat::Raw => SourceFormat::Raw,
            InputFormat::Text => SourceFormat::Text,
        }
    }
}

#[derive(Args)]
struct ImageOpt {
    /// Image width in pixels
    #[clap(long)]
    width: usize,

    /// Image height in pixels
    #[clap(long)]
    height: usize,

    #[clap(long, value_enum, default_value_t = InputFormat::Raw)]
    format: InputFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a grayscale image into a frame file
    Compress {
        input: PathBuf,
        output: PathBuf,
        #[clap(flatten)]
        image: ImageOpt,
        /// Values outside [1, 100] are clamped
        #[clap(long, default_value_t = 50, allow_negative_numbers = true)]
        quality: i64,
    },
    /// Decompress a frame file; output ending in .pgm is written as PGM,
    /// anything else as raw samples
    Decompress { input: PathBuf, output: PathBuf },
    /// Compress and decompress in memory at several qualities
    Roundtrip {
        input: PathBuf,
        #[clap(flatten)]
        image: ImageOpt,
        #[clap(long, default_values_t = [10, 25, 50, 75, 90], allow_negative_numbers = true)]
        quality: Vec<i64>,
    },
    /// Print a Huffman code for the characters of TEXT
    Huffman { text: String },
}

#[derive(Parser)]
#[clap(name = "bpeg", version, about = "Block DCT grayscale image codec")]
struct Opt {
    #[clap(subcommand)]
    command: Command,
}

fn clamp_quality(quality: i64) -> Quality {
    let clamped = Quality::clamped(quality);
    if i64::from(clamped.get()) != quality {
        println!("Quality {quality} clamped to {clamped}");
    }
    clamped
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let opt = Opt::parse();
    match opt.command {
        Command::Compress {
            input,
            output,
            image,
            quality,
        } => {
            let pixels = comp::load_image(&input, image.format.into(), image.width, image.height)?;
            let compressed = comp::compress_image(&pixels, clamp_quality(quality))?;
            compressed.frame.save(&output)?;
            println!(
                "Compressed {}x{} at quality {} in {:.2}ms: {} blocks, {} symbols, {:.1}% zero coefficients, {} bytes",
                image.width,
                image.height,
                compressed.frame.quality(),
                compressed.elapsed.as_secs_f64() * 1e3,
                compressed.stats.blocks,
                compressed.stats.symbols,
                compressed.stats.zero_coefficient_percentage(),
                compressed.frame.encoded_size(),
            );
        }
        Command::Decompress { input, output } => {
            let (pixels, elapsed) = dec::decompress_file(&input)?;
            enc::save_image(&pixels, &output)?;
            println!(
                "Decompressed {}x{} in {:.2}ms",
                pixels.width(),
                pixels.height(),
                elapsed.as_secs_f64() * 1e3
            );
        }
        Command::Roundtrip {
            input,
            image,
            quality,
        } => {
            let pixels = comp::load_image(&input, image.format.into(), image.width, image.height)?;
            println!("{}", report::QualityReport::HEADER);
            for q in quality {
                println!("{}", report::roundtrip(&pixels, clamp_quality(q))?);
            }
        }
        Command::Huffman { text } => {
            println!("{}", report::huffman_text(&text)?);
        }
    }
    Ok(())
}
