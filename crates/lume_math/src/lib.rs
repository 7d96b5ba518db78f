// Re-export the double precision glam types used throughout Lume
pub use glam::{DMat4, DVec3, DVec4};

/// Lume works in double precision: intersection and bias epsilons go down to 1e-9.
pub type Vec3 = DVec3;
pub type Mat4 = DMat4;

// Lume math types
mod camera;
mod ray;
mod sphere;
mod triangle;

pub use camera::camera_to_world;
pub use ray::Ray;
pub use sphere::Sphere;
pub use triangle::Triangle;
