//! `lume` - render an OBJ scene to PNG.

mod settings;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use lume_core::load_obj;
use lume_math::Vec3;
use lume_renderer::{render, ImageBuffer, RenderMode};

use settings::{parse_vec3, Settings};

/// Render OBJ scenes with a Whitted ray tracer
#[derive(Parser, Debug)]
#[command(
    name = "lume",
    version,
    about,
    after_help = "EXAMPLES:\n  \
                  lume assets/box/cube.obj -o box.png --look-from 0,1,3 --look-to 0,1,0\n  \
                  lume scene.obj --mode depth --width 320 --height 240\n  \
                  lume scene.obj --settings render.json --parallel"
)]
struct Cli {
    /// Scene file (.obj, with its .mtl libraries next to it)
    scene: PathBuf,

    /// Output PNG file
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Vertical field of view in radians
    #[arg(long)]
    fov: Option<f64>,

    /// Camera position as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    look_from: Option<Vec3>,

    /// Point the camera looks at as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    look_to: Option<Vec3>,

    /// Reflection/refraction bounces
    #[arg(short, long)]
    depth: Option<u32>,

    /// Output mode: full, depth or normal
    #[arg(short, long)]
    mode: Option<RenderMode>,

    /// Trace rows on all cores
    #[arg(long)]
    parallel: bool,

    /// JSON file with render settings; flags take precedence
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Compare the result against this PNG/JPEG image
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Fraction of matching pixels required by --reference
    #[arg(long, default_value_t = 0.99)]
    min_similarity: f64,
}

impl Cli {
    /// Settings given on the command line.
    fn overrides(&self) -> Settings {
        Settings {
            width: self.width,
            height: self.height,
            fov: self.fov,
            look_from: self.look_from,
            look_to: self.look_to,
            depth: self.depth,
            mode: self.mode,
            parallel: self.parallel.then_some(true),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let file_settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = file_settings.merge(cli.overrides());

    let scene = load_obj(&cli.scene)
        .with_context(|| format!("Failed to load scene {}", cli.scene.display()))?;

    let image = render(&scene, &settings.camera_options(), &settings.render_options())
        .context("Render failed")?;

    image
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    log::info!("Wrote {}", cli.output.display());

    if let Some(reference) = &cli.reference {
        compare_with_reference(&image, reference, cli.min_similarity)?;
    }

    Ok(())
}

fn compare_with_reference(image: &ImageBuffer, reference: &Path, min_similarity: f64) -> Result<()> {
    let expected = ImageBuffer::open(reference)
        .with_context(|| format!("Failed to read reference {}", reference.display()))?;
    let similarity = image.similarity(&expected)?;

    log::info!(
        "Similarity to {}: {:.2}%",
        reference.display(),
        similarity * 100.0
    );
    if similarity < min_similarity {
        bail!(
            "render differs from {}: {:.2}% of pixels match, {:.2}% required",
            reference.display(),
            similarity * 100.0,
            min_similarity * 100.0
        );
    }
    Ok(())
}
