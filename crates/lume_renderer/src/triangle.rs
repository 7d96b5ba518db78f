//! Ray-triangle intersection and barycentric coordinates.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lume_math::{Ray, Triangle, Vec3};

use crate::hittable::{Hittable, Intersection};

/// Parallel-ray and minimum-distance threshold.
const EPSILON: f64 = 1e-7;

/// Möller-Trumbore ray-triangle intersection.
///
/// Both faces are hit. The reported normal is the geometric normal
/// `normalize(cross(v1 - v0, v2 - v0))`, which follows the winding order and
/// may face away from the ray.
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle) -> Option<Intersection> {
    let [v0, v1, v2] = *triangle.vertices();
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = h.dot(edge1);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let s = ray.origin() - v0;
    let u = h.dot(s) / a;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = q.dot(ray.direction()) / a;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = q.dot(edge2) / a;
    if t <= EPSILON {
        return None;
    }

    Some(Intersection {
        position: ray.at(t),
        normal: edge1.cross(edge2).normalize(),
        distance: t,
    })
}

/// Barycentric weights of `point` for vertices 0, 1 and 2, from sub-triangle areas.
///
/// The weights sum to 1 for points inside the triangle. A zero-area triangle
/// yields NaN.
pub fn barycentric_coords(triangle: &Triangle, point: Vec3) -> Vec3 {
    let [v0, v1, v2] = *triangle.vertices();
    let area = triangle.area();

    let u = Triangle::new(v2, v0, point).area() / area;
    let v = Triangle::new(v0, v1, point).area() / area;
    let w = Triangle::new(v1, v2, point).area() / area;
    Vec3::new(w, u, v)
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray) -> Option<Intersection> {
        intersect_triangle(ray, self)
    }
}
