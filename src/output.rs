//! # Output Module
//!
//! Converts rendered linear images into files:
//! - PNG with square-root gamma and 8-bit quantization
//! - Plain-text PPM (P3), to a file or to stdout
//! - OpenEXR with the linear values untouched
//!
//! The 8-bit path follows the usual contract for a sample-averaged color:
//! take the square root of each channel, clamp to [0, 0.999], scale by 256
//! and truncate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::info;

use crate::interval::Interval;
use crate::render::HdrImage;
use crate::vec::Color;

/// Supported output encodings, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8-bit PNG with gamma 2.
    Png,
    /// ASCII PPM with gamma 2.
    Ppm,
    /// Linear 32-bit float EXR.
    Exr,
}

impl OutputFormat {
    /// Choose a format from the path's extension; `-` means PPM on stdout.
    pub fn from_path(path: &str) -> Result<Self> {
        if path == "-" {
            return Ok(OutputFormat::Ppm);
        }
        let extension = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("ppm") => Ok(OutputFormat::Ppm),
            Some("exr") => Ok(OutputFormat::Exr),
            other => bail!(
                "unsupported file extension '{}'; use .png, .ppm or .exr",
                other.unwrap_or_default()
            ),
        }
    }
}

/// Encode one averaged linear channel as an 8-bit value with gamma 2.
///
/// NaN and negative values encode as 0.
pub fn encode_component(linear: f32) -> u8 {
    const INTENSITY: Interval = Interval {
        min: 0.0,
        max: 0.999,
    };
    let gamma = if linear > 0.0 { linear.sqrt() } else { 0.0 };
    (256.0 * INTENSITY.clamp(gamma)) as u8
}

/// Encode an averaged linear color.
pub fn encode_color(color: Color) -> [u8; 3] {
    [
        encode_component(color.x),
        encode_component(color.y),
        encode_component(color.z),
    ]
}

/// Average a summed pixel color over `samples_per_pixel` and encode it.
pub fn write_color<W: Write>(out: &mut W, pixel_color: Color, samples_per_pixel: u32) -> io::Result<()> {
    let scale = 1.0 / samples_per_pixel.max(1) as f32;
    let [r, g, b] = encode_color(pixel_color * scale);
    writeln!(out, "{} {} {}", r, g, b)
}

/// Convert a linear image into an 8-bit gamma-corrected one.
pub fn to_rgb8(image: &HdrImage) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        Rgb(encode_color(Color::new(p[0], p[1], p[2])))
    })
}

/// Write `image` as a P3 PPM to `out`, top row first.
pub fn write_ppm<W: Write>(out: &mut W, image: &HdrImage) -> io::Result<()> {
    writeln!(out, "P3\n{} {}\n255", image.width(), image.height())?;
    for p in image.pixels() {
        // Pixels are already averaged, so one sample reproduces them.
        write_color(out, Color::new(p[0], p[1], p[2]), 1)?;
    }
    out.flush()
}

/// Save `image` in the format implied by `output_path`.
pub fn save_image(image: &HdrImage, output_path: &str) -> Result<()> {
    match OutputFormat::from_path(output_path)? {
        OutputFormat::Png => save_image_as_png(image, output_path),
        OutputFormat::Ppm => save_image_as_ppm(image, output_path),
        OutputFormat::Exr => save_image_as_exr(image, output_path),
    }
}

/// Save as an 8-bit PNG with gamma 2.
pub fn save_image_as_png(image: &HdrImage, output_path: &str) -> Result<()> {
    to_rgb8(image)
        .save(output_path)
        .with_context(|| format!("failed to write PNG {}", output_path))?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save as an ASCII PPM; `-` writes to stdout.
pub fn save_image_as_ppm(image: &HdrImage, output_path: &str) -> Result<()> {
    if output_path == "-" {
        let stdout = io::stdout();
        write_ppm(&mut stdout.lock(), image).context("failed to write PPM to stdout")?;
        return Ok(());
    }

    let file = File::create(output_path)
        .with_context(|| format!("failed to create {}", output_path))?;
    write_ppm(&mut BufWriter::new(file), image)
        .with_context(|| format!("failed to write PPM {}", output_path))?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save as a linear EXR with full f32 precision.
pub fn save_image_as_exr(image: &HdrImage, output_path: &str) -> Result<()> {
    write_rgb_file(
        output_path,
        image.width() as usize,
        image.height() as usize,
        |x, y| {
            let p = image.get_pixel(x as u32, y as u32);
            (p[0], p[1], p[2])
        },
    )
    .with_context(|| format!("failed to write EXR {}", output_path))?;
    info!("HDR image saved as EXR: {}", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_two_then_quantize() {
        assert_eq!(encode_component(0.0), 0);
        assert_eq!(encode_component(0.25), 128);
        assert_eq!(encode_component(1.0), 255);
        assert_eq!(encode_component(4.0), 255);
    }

    #[test]
    fn invalid_values_encode_as_black() {
        assert_eq!(encode_component(-0.5), 0);
        assert_eq!(encode_component(f32::NAN), 0);
    }

    #[test]
    fn write_color_averages_samples() {
        let mut out = Vec::new();
        write_color(&mut out, Color::new(1.0, 4.0, 0.0), 4).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "128 255 0\n");
    }

    #[test]
    fn ppm_has_header_and_one_line_per_pixel() {
        let mut image = HdrImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([1.0, 0.0, 0.25]));
        image.put_pixel(1, 0, Rgb([0.0, 1.0, 0.0]));
        let mut out = Vec::new();
        write_ppm(&mut out, &image).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 1\n255\n255 0 128\n0 255 0\n"
        );
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path("out.png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path("OUT.EXR").unwrap(), OutputFormat::Exr);
        assert_eq!(OutputFormat::from_path("-").unwrap(), OutputFormat::Ppm);
        assert!(OutputFormat::from_path("out.jpg").is_err());
        assert!(OutputFormat::from_path("out").is_err());
    }

    #[test]
    fn rgb8_conversion_keeps_layout() {
        let mut image = HdrImage::new(1, 2);
        image.put_pixel(0, 1, Rgb([0.25, 0.25, 0.25]));
        let ldr = to_rgb8(&image);
        assert_eq!(ldr.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(ldr.get_pixel(0, 1), &Rgb([128, 128, 128]));
    }
}
