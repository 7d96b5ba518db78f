//! Ray-sphere intersection.

use lume_math::{Ray, Sphere};

use crate::hittable::{Hittable, Intersection};

/// Geometric ray-sphere test.
///
/// A sphere whose center projects behind the ray origin is treated as a miss,
/// even when the origin lies inside it. When the origin is inside the sphere
/// the far root is returned and the normal points back toward the center.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<Intersection> {
    let to_center = sphere.center() - ray.origin();
    let tc = ray.direction().dot(to_center);
    if tc < 0.0 {
        return None;
    }

    let radius = sphere.radius();
    let d = (to_center.length_squared() - tc * tc).max(0.0).sqrt();
    if d > radius {
        return None;
    }

    let half_chord = (radius * radius - d * d).max(0.0).sqrt();
    let inside = tc < half_chord;
    let distance = if inside { tc + half_chord } else { tc - half_chord };

    let position = ray.at(distance);
    let outward = position - sphere.center();
    let normal = if inside { -outward } else { outward };

    Some(Intersection {
        position,
        normal: normal.normalize(),
        distance,
    })
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<Intersection> {
        intersect_sphere(ray, self)
    }
}
