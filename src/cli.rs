use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use spheretrace::config::RenderConfig;
use spheretrace::scene::{CameraPreset, SceneKind};

/// Default configuration file, read only if present
pub const DEFAULT_CONFIG: &str = "spheretrace.toml";

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "spheretrace")]
#[command(about = "A Monte-Carlo path tracer for scenes of spheres")]
pub struct Args {
    /// Configuration file (TOML); command line options override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, value_enum, default_value = "info")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scene to render
    #[arg(long, value_enum)]
    pub scene: Option<SceneKind>,

    /// Camera placement (ignored when the config file defines a camera)
    #[arg(long, value_enum)]
    pub camera: Option<CameraPreset>,

    /// Output file path (.png or .ppm for 8-bit with gamma correction, .exr for HDR linear, - for PPM on stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}

impl Args {
    /// Apply command line overrides on top of a loaded configuration.
    pub fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.samples_per_pixel = samples;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(scene) = self.scene {
            config.scene = scene;
        }
        if let Some(preset) = self.camera {
            config.camera_preset = preset;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        config
    }
}
