//! Lume Renderer - Whitted ray tracing on the CPU.
//!
//! One primary ray per pixel, nearest-hit search over every primitive of the
//! scene and a recursive Phong + mirror + dielectric illumination model.
//! Besides full radiance the renderer can visualize scene depth and shading
//! normals.
//!
//! # Example
//!
//! ```ignore
//! use lume_core::load_obj;
//! use lume_renderer::{render, CameraOptions, RenderMode, RenderOptions};
//!
//! let scene = load_obj("box/cube.obj")?;
//! let camera = CameraOptions::new(640, 480).with_look_from(Vec3::new(0.0, 1.0, 3.0));
//! let image = render(&scene, &camera, &RenderOptions::default())?;
//! image.save("box.png")?;
//! ```

mod camera;
mod hittable;
mod image;
mod material;
mod renderer;
mod shading;
mod sphere;
mod triangle;

pub use camera::{Camera, CameraOptions};
pub use hittable::{
    find_closest_hit, is_light_visible, unoccluded_depth, Hit, Hittable, Intersection, Primitive,
    PrimitiveKind,
};
pub use self::image::{ImageBuffer, ImageError, ImageResult, SIMILARITY_TOLERANCE};
pub use material::{Color, diffuse_factor, reflect, refract, specular_factor};
pub use renderer::{render, RenderError, RenderMode, RenderOptions, RenderResult};
pub use shading::shade;
pub use sphere::intersect_sphere;
pub use triangle::{barycentric_coords, intersect_triangle};

/// Re-export the math types used in the public API
pub use lume_math::{Ray, Sphere, Triangle, Vec3};
