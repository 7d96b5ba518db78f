//! Pinhole camera for primary ray generation.

use std::f64::consts::{FRAC_PI_2, PI};

use lume_math::{camera_to_world, Mat4, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::renderer::{RenderError, RenderResult};

/// Camera settings: image size, field of view and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Vertical field of view in radians
    pub fov: f64,
    pub look_from: Vec3,
    pub look_to: Vec3,
}

impl CameraOptions {
    /// Camera at the origin looking down -Z with a 90 degree field of view.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fov: FRAC_PI_2,
            look_from: Vec3::ZERO,
            look_to: Vec3::NEG_Z,
        }
    }

    /// Set the vertical field of view in radians.
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Set camera position.
    pub fn with_look_from(mut self, look_from: Vec3) -> Self {
        self.look_from = look_from;
        self
    }

    /// Set the point the camera looks at.
    pub fn with_look_to(mut self, look_to: Vec3) -> Self {
        self.look_to = look_to;
        self
    }

    /// Check the settings can produce a usable camera.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidCamera(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(RenderError::InvalidCamera(format!(
                "field of view must be in (0, pi), got {}",
                self.fov
            )));
        }
        if self.look_from == self.look_to {
            return Err(RenderError::InvalidCamera(
                "look_from and look_to must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// A validated camera, ready to generate primary rays.
#[derive(Debug, Clone)]
pub struct Camera {
    width: u32,
    height: u32,
    scale: f64,
    aspect_ratio: f64,
    origin: Vec3,
    camera_to_world: Mat4,
}

impl Camera {
    /// Build a camera from its options.
    pub fn new(options: &CameraOptions) -> RenderResult<Self> {
        options.validate()?;

        Ok(Self {
            width: options.width,
            height: options.height,
            scale: (options.fov / 2.0).tan(),
            aspect_ratio: options.width as f64 / options.height as f64,
            origin: options.look_from,
            camera_to_world: camera_to_world(options.look_from, options.look_to),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// World-space ray through the center of pixel (`x`, `y`), row 0 at the top.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let px = (2.0 * (x as f64 + 0.5) / self.width as f64 - 1.0) * self.scale * self.aspect_ratio;
        let py = (1.0 - 2.0 * (y as f64 + 0.5) / self.height as f64) * self.scale;

        let direction = self.camera_to_world.transform_vector3(Vec3::new(px, py, -1.0));
        Ray::new(self.origin, direction)
    }
}
