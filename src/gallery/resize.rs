// SPDX-License-Identifier: PMPL-1.0-or-later

//! Resizing and encoding of gallery images

use crate::types::{OutputFormat, Size};
use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fit `width` x `height` into `max`, keeping the aspect ratio.
///
/// Landscape images are bound by the max width, portrait and square images by
/// the max height. Small images are scaled up, so every size directory holds a
/// copy of the same nominal size. Neither dimension drops below 1.
pub fn limited_size(width: u32, height: u32, max: Size) -> Size {
    let (max_width, max_height) = max;
    if width == 0 || height == 0 {
        return (max_width.max(1), max_height.max(1));
    }
    let aspect_ratio = width as f64 / height as f64;
    if width > height {
        (max_width, ((max_width as f64 / aspect_ratio) as u32).max(1))
    } else {
        (((max_height as f64 * aspect_ratio) as u32).max(1), max_height)
    }
}

/// Undo the camera rotation recorded in the EXIF `Orientation` tag.
///
/// Values outside 2..=8 (including the common 1) leave the image untouched.
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

/// Scale `image` into `max` and write it to `target`.
///
/// Returns the dimensions of the written copy.
pub fn resize_image(
    image: &DynamicImage,
    target: &Path,
    max: Size,
    format: OutputFormat,
    quality: u8,
) -> Result<Size> {
    let (width, height) = limited_size(image.width(), image.height(), max);
    let resized = image.resize_exact(width, height, FilterType::Lanczos3);
    write_image(&resized, target, format, quality)?;
    Ok((width, height))
}

/// Encode and write atomically: the copy is written next to `target` and
/// renamed over it once complete, so an aborted run never leaves a truncated
/// image behind.
pub fn write_image(image: &DynamicImage, target: &Path, format: OutputFormat, quality: u8) -> Result<()> {
    let tmp_path = target.with_extension(format!("{}.tmp", format.extension()));
    {
        let file = File::create(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
        match format {
            OutputFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
                rgb.write_with_encoder(encoder)
            }
            OutputFormat::Webp => {
                let encoder = WebPEncoder::new_lossless(&mut writer);
                rgb.write_with_encoder(encoder)
            }
        }
        .with_context(|| format!("encoding {} as {}", target.display(), format))?;
        writer
            .flush()
            .with_context(|| format!("writing {}", tmp_path.display()))?;
    }

    fs::rename(&tmp_path, target)
        .with_context(|| format!("moving {} into place", target.display()))?;
    Ok(())
}
