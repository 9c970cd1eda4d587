use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lustre_core::{load_description, SceneDescription};
use lustre_renderer::{
    render_buckets, render_with_stats, Camera, RenderConfig, DEFAULT_BUCKET_SIZE, MAX_BOUNCES,
};

mod demo;
mod preview;

#[derive(Parser, Debug)]
#[command(author, about = "Whitted-style sphere ray tracer")]
struct Args {
    /// Scene description (JSON). A random demo scene is used when omitted.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Reflection bounces per ray, overrides the scene file
    #[arg(short, long)]
    bounces: Option<u32>,

    /// Seed for the demo scene
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Render in spiral-ordered buckets instead of rows
    #[arg(long, action)]
    buckets: bool,

    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: u32,

    /// Columns of the ASCII preview
    #[arg(long, default_value_t = 80)]
    preview_width: u32,

    #[arg(long, action)]
    no_preview: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let desc: SceneDescription = match &args.scene {
        Some(path) => load_description(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, generating demo scene (seed {})", args.seed);
            demo::description(args.seed)
        }
    };

    let scene = desc.build_scene().context("Invalid scene")?;
    let environment = desc
        .build_environment()
        .context("Failed to set up environment")?;

    let mut camera = match &desc.camera {
        Some(camera) => Camera::from_desc(camera),
        None => demo::default_camera(),
    };
    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(height) = args.height {
        camera.image_height = height;
    }
    camera.initialize();

    let bounce_limit = args
        .bounces
        .or(desc.bounce_limit)
        .unwrap_or(RenderConfig::default().bounce_limit);
    if bounce_limit > MAX_BOUNCES {
        log::warn!(
            "Bounce limit {} exceeds the maximum, using {}",
            bounce_limit,
            MAX_BOUNCES
        );
    }
    let config = RenderConfig { bounce_limit };

    log::info!(
        "Rendering {}x{}, {} spheres, {} lights, {} bounces",
        camera.image_width,
        camera.image_height,
        scene.sphere_count(),
        scene.light_count(),
        config.bounce_limit.min(MAX_BOUNCES)
    );

    let start = Instant::now();
    let image = if args.buckets {
        render_buckets(&camera, &scene, environment.as_ref(), &config, args.bucket_size)
    } else {
        let (image, stats) = render_with_stats(&camera, &scene, environment.as_ref(), &config);
        log::info!(
            "Rays: {} background, {} bounce limit, {} zero energy, {} escaped; {} reflection rays",
            stats.background,
            stats.bounce_limit,
            stats.zero_energy,
            stats.miss,
            stats.bounces
        );
        image
    };
    log::info!("Rendered in {:?}", start.elapsed());

    if !args.no_preview {
        print!("{}", preview::ascii(&image, args.preview_width));
    }

    Ok(())
}
