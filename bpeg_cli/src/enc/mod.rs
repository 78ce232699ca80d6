// Copyright (c) the bpeg Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod pnm;

use std::path::Path;

use bpeg::PixelBuffer;
use color_eyre::eyre::{Result, WrapErr};

/// Writes `image` as binary PGM if `path` ends in `.pgm`, and as headerless
/// raw samples otherwise.
pub fn save_image(image: &PixelBuffer, path: &Path) -> Result<()> {
    let is_pgm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pgm"));
    let bytes = if is_pgm {
        pnm::to_pgm(image)
    } else {
        image.as_slice().to_vec()
    };
    std::fs::write(path, bytes).wrap_err_with(|| format!("Cannot write {}", path.display()))
}
