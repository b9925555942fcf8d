//! Single-threaded sampling loop over the image plane.

use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::Rng;

use crate::camera::Camera;
use crate::hittable::Hittable;
use crate::integrator::ray_color;
use crate::random;
use crate::vec::Color;

/// Linear HDR image holding the per-pixel sample mean.
pub type HdrImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Image size and sampling budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Number of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces
    pub max_depth: u32,
}

impl RenderSettings {
    /// Settings for an image of `image_width` pixels at the given aspect ratio.
    ///
    /// The height is rounded down and is never less than one pixel.
    pub fn from_aspect_ratio(
        image_width: u32,
        aspect_ratio: f32,
        samples_per_pixel: u32,
        max_depth: u32,
    ) -> Self {
        debug_assert!(
            aspect_ratio.is_finite() && aspect_ratio > 0.0,
            "aspect ratio must be positive"
        );
        let image_height = ((image_width as f32 / aspect_ratio) as u32).max(1);
        Self {
            image_width,
            image_height,
            samples_per_pixel,
            max_depth,
        }
    }
}

/// Render `world` through `camera`.
///
/// Row `j` of the image plane (counted from the bottom) lands in row
/// `image_height - 1 - j` of the returned buffer. Each pixel holds the mean of
/// its samples in linear space.
pub fn render<R: Rng + ?Sized>(
    settings: &RenderSettings,
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut R,
) -> HdrImage {
    let RenderSettings {
        image_width,
        image_height,
        samples_per_pixel,
        max_depth,
    } = *settings;

    let mut image = HdrImage::new(image_width, image_height);
    let s_scale = 1.0 / (image_width.max(2) - 1) as f32;
    let t_scale = 1.0 / (image_height.max(2) - 1) as f32;
    let pixel_samples_scale = 1.0 / samples_per_pixel.max(1) as f32;

    info!(
        "Rendering {}x{} at {} samples per pixel, max depth {}",
        image_width, image_height, samples_per_pixel, max_depth
    );
    let generation_start = std::time::Instant::now();
    let pb = ProgressBar::new(image_height as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} scanlines ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for j in (0..image_height).rev() {
        for i in 0..image_width {
            let mut pixel_color = Color::ZERO;
            for _ in 0..samples_per_pixel {
                let s = (i as f32 + random::random_f32(rng)) * s_scale;
                let t = (j as f32 + random::random_f32(rng)) * t_scale;
                let r = camera.get_ray(s, t, rng);
                pixel_color += ray_color(&r, world, max_depth, rng);
            }

            pixel_color *= pixel_samples_scale;
            image.put_pixel(
                i,
                image_height - 1 - j,
                Rgb([pixel_color.x, pixel_color.y, pixel_color.z]),
            );
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Image generated in {:.2?}", generation_start.elapsed());

    image
}
