//! Render configuration loaded from TOML.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```toml
//! image_width = 800
//! samples_per_pixel = 100
//! scene = "book_cover"
//!
//! [camera]
//! lookfrom = [13.0, 2.0, 3.0]
//! lookat = [0.0, 0.0, 0.0]
//! vfov = 20.0
//! aperture = 0.1
//! focus_dist = 10.0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::info;
use serde::Deserialize;

use crate::camera::CameraConfig;
use crate::render::RenderSettings;
use crate::scene::{CameraPreset, SceneKind};

/// Everything needed to produce one image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Image width in pixels
    pub image_width: u32,
    /// Image width divided by image height
    pub aspect_ratio: f32,
    /// Number of samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per path
    pub max_depth: u32,
    /// Seed for the random generator; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Scene to build
    pub scene: SceneKind,
    /// Camera placement used when `camera` is absent
    pub camera_preset: CameraPreset,
    /// Explicit camera, overriding `camera_preset`
    pub camera: Option<CameraConfig>,
    /// Output file path (.png, .ppm, .exr, or - for PPM on stdout)
    pub output: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 500,
            aspect_ratio: 3.0 / 2.0,
            samples_per_pixel: 500,
            max_depth: 50,
            seed: None,
            scene: SceneKind::default(),
            camera_preset: CameraPreset::default(),
            camera: None,
            output: "output.png".to_string(),
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the renderer and camera cannot work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.image_width > 0, "image_width must be at least 1");
        ensure!(
            self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0,
            "aspect_ratio must be positive, got {}",
            self.aspect_ratio
        );
        self.camera_config()
            .validate()
            .context("invalid camera placement")
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in config file {}", path.display()))
    }

    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Camera to render with, its aspect ratio matched to the image.
    pub fn camera_config(&self) -> CameraConfig {
        match self.camera {
            Some(camera) => CameraConfig {
                aspect_ratio: self.aspect_ratio,
                ..camera
            },
            None => self.camera_preset.config(self.aspect_ratio),
        }
    }

    /// Image size and sampling budget.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings::from_aspect_ratio(
            self.image_width,
            self.aspect_ratio,
            self.samples_per_pixel,
            self.max_depth,
        )
    }
}
