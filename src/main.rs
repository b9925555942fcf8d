use std::path::Path;

use anyhow::Result;
use clap::Parser;
use log::{debug, error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

mod cli;
mod logger;

use cli::{Args, DEFAULT_CONFIG};
use logger::init_logger;
use spheretrace::camera::Camera;
use spheretrace::config::RenderConfig;
use spheretrace::output::save_image;
use spheretrace::render::render;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("Spheretrace - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::load_or_default(Path::new(DEFAULT_CONFIG))?,
    };
    let config = args.apply(config);
    debug!("{:?}", config);
    config.validate()?;

    // Fail on a bad output path before spending time rendering.
    spheretrace::output::OutputFormat::from_path(&config.output)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Random seed: {}", seed);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let world = config.scene.build(&mut rng);
    let camera = Camera::new(&config.camera_config());
    let settings = config.render_settings();

    let image = render(&settings, &camera, &world, &mut rng);
    save_image(&image, &config.output)
}
