//! Worldlayers CLI - deterministic raster world generator.
//!
//! Samples every layer at a single point, renders one layer of the whole
//! world chunk by chunk to a PNG preview, or writes a 16-bit heightmap.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use worldlayers::export::{write_gray16_png, write_rgb_png};
use worldlayers::generator::{WorldConfig, WorldGenerator};
use worldlayers::pipeline::{render_world, world_elevation, LayerKind, RenderOptions};

/// Deterministic raster world generator.
#[derive(Parser)]
#[command(name = "worldlayers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with configuration overrides.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Master seed, applied after the configuration file.
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every layer at one world position as JSON.
    Sample {
        /// East coordinate in centimeters.
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// North coordinate in centimeters.
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },

    /// Render one layer of the whole world to a PNG.
    Render {
        /// Layer to render.
        #[arg(short, long, default_value = "biome")]
        layer: LayerKind,

        /// Output PNG path.
        #[arg(short, long, default_value = "./output/world.png")]
        out: PathBuf,

        /// Samples per chunk side (defaults to the configured chunk resolution).
        #[arg(short, long)]
        resolution: Option<usize>,

        /// Lattice spacing in km for terrain seen by the moisture search.
        #[arg(long, default_value = "1.0")]
        moisture_lattice_km: f64,

        /// Evaluate distant terrain exactly instead of on a lattice (slow).
        #[arg(long)]
        exact_moisture: bool,
    },

    /// Write the final elevation of the whole world as a 16-bit grayscale PNG.
    Heightmap {
        /// Output PNG path.
        #[arg(short, long, default_value = "./output/heightmap.png")]
        out: PathBuf,

        /// Samples per chunk side (defaults to the configured chunk resolution).
        #[arg(short, long)]
        resolution: Option<usize>,
    },

    /// Display the resolved configuration and world size.
    Info,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("worldlayers=info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Sample { x, y } => run_sample(config, x, y),
        Commands::Render {
            layer,
            out,
            resolution,
            moisture_lattice_km,
            exact_moisture,
        } => {
            let resolution = check_resolution(resolution.unwrap_or(config.chunk_resolution))?;
            if !exact_moisture && !(moisture_lattice_km.is_finite() && moisture_lattice_km > 0.0) {
                bail!("moisture lattice spacing must be positive, got {moisture_lattice_km}");
            }
            let options = RenderOptions {
                layer,
                resolution,
                moisture_lattice_km: (!exact_moisture).then_some(moisture_lattice_km),
            };
            run_render(config, &options, &out)
        }
        Commands::Heightmap { out, resolution } => {
            let resolution = check_resolution(resolution.unwrap_or(config.chunk_resolution))?;
            run_heightmap(config, resolution, &out)
        }
        Commands::Info => run_info(config),
    }
}

fn check_resolution(resolution: usize) -> Result<usize> {
    if !(1..=4096).contains(&resolution) {
        bail!("resolution must be between 1 and 4096, got {resolution}");
    }
    Ok(resolution)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<WorldConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let overrides: serde_json::Value =
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
            WorldConfig::from_overrides(&overrides)?
        }
        None => WorldConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

fn run_sample(config: WorldConfig, x: f64, y: f64) -> Result<()> {
    let generator = WorldGenerator::new(config)?;
    let sample = generator.sample_point(x, y);
    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(())
}

fn run_render(config: WorldConfig, options: &RenderOptions, out: &Path) -> Result<()> {
    let start = Instant::now();
    let generator = WorldGenerator::new(config)?;
    let image = render_world(&generator, options)?;

    ensure_parent_dir(out)?;
    write_rgb_png(&image, out)?;

    info!(
        layer = options.layer.name(),
        width = image.width(),
        height = image.height(),
        path = %out.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "wrote preview"
    );
    Ok(())
}

fn run_heightmap(config: WorldConfig, resolution: usize, out: &Path) -> Result<()> {
    let start = Instant::now();
    let generator = WorldGenerator::new(config)?;
    let elevation = world_elevation(&generator, resolution)?;
    let (min, max) = elevation.range();

    ensure_parent_dir(out)?;
    write_gray16_png(&elevation, 0.0, 1.0, out)?;

    info!(
        width = elevation.width(),
        height = elevation.height(),
        min,
        max,
        path = %out.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "wrote heightmap"
    );
    Ok(())
}

fn run_info(config: WorldConfig) -> Result<()> {
    config.validate()?;
    println!("Worldlayers - world configuration");
    println!("=================================");
    println!("Seed: {}", config.seed);
    println!(
        "Chunks: {}x{} ({} total)",
        config.world_width_chunks,
        config.world_height_chunks,
        config.total_chunks()
    );
    println!(
        "World size: {:.2} km x {:.2} km",
        config.world_width_cm() / 1e5,
        config.world_height_cm() / 1e5
    );
    println!(
        "Chunk: {} cm at {} samples per side",
        config.chunk_size_cm, config.chunk_resolution
    );
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
