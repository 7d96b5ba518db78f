//! Render settings: JSON settings file merged with command line flags.

use std::path::Path;

use anyhow::{Context, Result};
use lume_math::Vec3;
use lume_renderer::{CameraOptions, RenderMode, RenderOptions};
use serde::Deserialize;

/// Image size used when neither the settings file nor the flags give one.
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Every field is optional. Missing values fall back to the next layer:
/// flags, then the settings file, then the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Vertical field of view in radians
    pub fov: Option<f64>,
    pub look_from: Option<Vec3>,
    pub look_to: Option<Vec3>,
    pub depth: Option<u32>,
    pub mode: Option<RenderMode>,
    pub parallel: Option<bool>,
}

impl Settings {
    /// Read a JSON settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Layer `overrides` on top of `self`.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            fov: overrides.fov.or(self.fov),
            look_from: overrides.look_from.or(self.look_from),
            look_to: overrides.look_to.or(self.look_to),
            depth: overrides.depth.or(self.depth),
            mode: overrides.mode.or(self.mode),
            parallel: overrides.parallel.or(self.parallel),
        }
    }

    pub fn camera_options(&self) -> CameraOptions {
        let defaults = CameraOptions::new(
            self.width.unwrap_or(DEFAULT_WIDTH),
            self.height.unwrap_or(DEFAULT_HEIGHT),
        );

        CameraOptions {
            fov: self.fov.unwrap_or(defaults.fov),
            look_from: self.look_from.unwrap_or(defaults.look_from),
            look_to: self.look_to.unwrap_or(defaults.look_to),
            ..defaults
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();

        RenderOptions {
            depth: self.depth.unwrap_or(defaults.depth),
            mode: self.mode.unwrap_or(defaults.mode),
            parallel: self.parallel.unwrap_or(defaults.parallel),
        }
    }
}

/// Parse `x,y,z` into a vector.
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got '{}'", s));
    };

    Ok(Vec3::new(component(x, s)?, component(y, s)?, component(z, s)?))
}

fn component(value: &str, whole: &str) -> Result<f64, String> {
    value
        .parse()
        .map_err(|_| format!("invalid number '{}' in '{}'", value, whole))
}
