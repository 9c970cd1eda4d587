// Debug tool: trace a single ray and report what it hits and why it stopped.
// Run with: cargo run --bin probe_ray -- scene.json --origin 0,0,0 --dir 0,0,-1

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lustre_core::load_description;
use lustre_math::{Ray, Vec3};
use lustre_renderer::{intersect, is_shadowed, trace_detailed, RenderConfig};

#[derive(Parser, Debug)]
#[command(about = "Trace one ray through a scene description")]
struct Args {
    scene: PathBuf,

    #[arg(long, value_parser = parse_vec3, default_value = "0,0,0")]
    origin: Vec3,

    #[arg(long, value_parser = parse_vec3, default_value = "0,0,-1")]
    dir: Vec3,

    #[arg(short, long)]
    bounces: Option<u32>,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{}: {}", p, e)))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {}", s)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args = Args::parse();
    let desc = load_description(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let scene = desc.build_scene()?;
    let environment = desc.build_environment()?;
    let bounce_limit = args
        .bounces
        .or(desc.bounce_limit)
        .unwrap_or(RenderConfig::default().bounce_limit);

    let ray = Ray::new(args.origin, args.dir);
    println!("Ray: origin {:?} dir {:?}", ray.origin, ray.direction);

    match intersect(&ray, &scene) {
        Some(hit) => {
            println!("Hit at t = {:.4}", hit.t);
            println!("  position {:?}", hit.position);
            println!("  normal   {:?}", hit.normal);
            println!("  material {:?}", hit.material);
            for (i, light) in scene.lights().iter().enumerate() {
                let state = if is_shadowed(hit.position, light, &scene) {
                    "shadowed"
                } else {
                    "lit"
                };
                println!("  light {}: {}", i, state);
            }
        }
        None => println!("No hit"),
    }

    let result = trace_detailed(&ray, &scene, environment.as_ref(), bounce_limit);
    println!(
        "Trace: {:?} after {} bounce(s), color {:?}",
        result.state, result.bounces, result.color
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, 2.5,-3").unwrap(), Vec3::new(1.0, 2.5, -3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }
}
