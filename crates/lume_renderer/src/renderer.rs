//! Frame synthesis and output mapping.
//!
//! Rendering runs in two passes:
//! - Pass 1 traces one primary ray per pixel and keeps the raw mode value
//!   (radiance, hit distance or remapped normal). Each row also reports its
//!   peak radiance and depth, and the rows are reduced to image-wide peaks.
//! - Pass 2 maps the raw values to 8-bit RGB using those peaks.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use lume_core::Scene;
use lume_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{Camera, CameraOptions};
use crate::hittable::{find_closest_hit, unoccluded_depth};
use crate::image::ImageBuffer;
use crate::shading::{facing, shade};

/// Errors that can occur while setting up a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("unknown render mode '{0}' (expected full, depth or normal)")]
    UnknownMode(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// What the renderer writes into each pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Tone-mapped Whitted radiance
    #[default]
    Full,
    /// Hit distance normalized by the farthest visible hit
    Depth,
    /// Shading normal remapped to [0, 1]
    Normal,
}

impl FromStr for RenderMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(RenderMode::Full),
            "depth" => Ok(RenderMode::Depth),
            "normal" => Ok(RenderMode::Normal),
            _ => Err(RenderError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderMode::Full => "full",
            RenderMode::Depth => "depth",
            RenderMode::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Reflection/refraction bounces allowed after the primary hit
    pub depth: u32,
    pub mode: RenderMode,
    /// Trace rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth: 4,
            mode: RenderMode::Full,
            parallel: false,
        }
    }
}

impl RenderOptions {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Raw pass-1 value of one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Sample {
    value: Vec3,
    intersected: bool,
}

/// Image-wide maxima that drive pass 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Peaks {
    radiance: f64,
    depth: f64,
}

impl Peaks {
    fn merge(self, other: Peaks) -> Peaks {
        Peaks {
            radiance: self.radiance.max(other.radiance),
            depth: self.depth.max(other.depth),
        }
    }
}

/// Render `scene` through the camera described by `camera`.
pub fn render(
    scene: &Scene,
    camera: &CameraOptions,
    options: &RenderOptions,
) -> RenderResult<ImageBuffer> {
    let camera = Camera::new(camera)?;
    let (width, height) = (camera.width(), camera.height());

    log::info!(
        "Rendering '{}' at {}x{}: {} mode, depth {}, {} primitives, {} lights",
        scene.name,
        width,
        height,
        options.mode,
        options.depth,
        scene.primitive_count(),
        scene.lights().len()
    );
    let start = Instant::now();

    let mut samples = vec![Sample::default(); width as usize * height as usize];
    let peaks = trace_rows(scene, &camera, options, &mut samples);
    log::debug!(
        "Pass 1 done in {:.2?}: peak radiance {:.4}, peak depth {:.4}",
        start.elapsed(),
        peaks.radiance,
        peaks.depth
    );

    let mut image = ImageBuffer::new(width, height);
    for (pixel, sample) in image.pixels_mut().zip(&samples) {
        pixel.copy_from_slice(&to_rgb(sample, &peaks, options.mode));
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

/// Pass 1 over every row, reduced to image-wide peaks.
fn trace_rows(
    scene: &Scene,
    camera: &Camera,
    options: &RenderOptions,
    samples: &mut [Sample],
) -> Peaks {
    let width = camera.width() as usize;

    if options.parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            return samples
                .par_chunks_mut(width)
                .enumerate()
                .map(|(y, row)| trace_row(scene, camera, options, y as u32, row))
                .reduce(Peaks::default, Peaks::merge);
        }

        #[cfg(not(feature = "parallel"))]
        log::warn!("Built without the 'parallel' feature, rendering on one thread");
    }

    samples
        .chunks_mut(width)
        .enumerate()
        .map(|(y, row)| trace_row(scene, camera, options, y as u32, row))
        .fold(Peaks::default(), Peaks::merge)
}

fn trace_row(
    scene: &Scene,
    camera: &Camera,
    options: &RenderOptions,
    y: u32,
    row: &mut [Sample],
) -> Peaks {
    row.iter_mut()
        .enumerate()
        .map(|(x, sample)| {
            let ray = camera.primary_ray(x as u32, y);
            let (value, peaks) = evaluate(scene, &ray, options);
            *sample = value;
            peaks
        })
        .fold(Peaks::default(), Peaks::merge)
}

/// Mode-dependent value of one primary ray, plus its peak candidates.
fn evaluate(scene: &Scene, ray: &Ray, options: &RenderOptions) -> (Sample, Peaks) {
    let traced = match options.mode {
        RenderMode::Full => find_closest_hit(scene, ray).map(|hit| {
            let radiance = shade(scene, ray, &hit, options.depth, false);
            let peaks = Peaks {
                radiance: radiance.max_element(),
                ..Peaks::default()
            };
            (radiance, peaks)
        }),
        RenderMode::Depth => unoccluded_depth(scene, ray).map(|distance| {
            let peaks = Peaks {
                depth: distance,
                ..Peaks::default()
            };
            (Vec3::splat(distance), peaks)
        }),
        RenderMode::Normal => find_closest_hit(scene, ray).map(|hit| {
            let normal = facing(hit.primitive.shading_normal(&hit.intersection), ray.direction());
            (0.5 * normal + Vec3::splat(0.5), Peaks::default())
        }),
    };

    match traced {
        Some((value, peaks)) => {
            let sample = Sample {
                value,
                intersected: true,
            };
            (sample, peaks)
        }
        None => {
            let background = match options.mode {
                RenderMode::Depth => Vec3::ONE,
                RenderMode::Full | RenderMode::Normal => Vec3::ZERO,
            };
            let sample = Sample {
                value: background,
                intersected: false,
            };
            (sample, Peaks::default())
        }
    }
}

/// Pass 2 mapping of one pixel to 8-bit RGB.
fn to_rgb(sample: &Sample, peaks: &Peaks, mode: RenderMode) -> [u8; 3] {
    let value = match mode {
        RenderMode::Full if sample.intersected => {
            let white = peaks.radiance * peaks.radiance;
            let v = sample.value;
            let out = v * (Vec3::ONE + v / white) / (Vec3::ONE + v);
            out.powf(1.0 / 2.2)
        }
        RenderMode::Depth if sample.intersected => sample.value / peaks.depth,
        _ => sample.value,
    };

    // `as` saturates and maps NaN to 0
    [
        (value.x * 255.0) as u8,
        (value.y * 255.0) as u8,
        (value.z * 255.0) as u8,
    ]
}
