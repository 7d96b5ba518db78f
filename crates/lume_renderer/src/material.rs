//! Reflection, refraction and the Phong lighting terms.

use lume_math::Vec3;

/// Color type alias (RGB radiance, unbounded)
pub type Color = Vec3;

/// Mirror `incoming` about `normal`.
///
/// `incoming` and `normal` are expected to be unit length. The result keeps
/// the length of `incoming` and lies on the other side of the surface plane.
#[inline]
pub fn reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    let cos = -normal.dot(incoming);
    incoming + 2.0 * cos * normal
}

/// Refract `incoming` through a surface with relative index `eta` (n1 / n2).
///
/// `normal` must face against `incoming`. Returns `None` on total internal
/// reflection. The result is not normalized.
pub fn refract(incoming: Vec3, normal: Vec3, eta: f64) -> Option<Vec3> {
    let cos1 = -normal.dot(incoming);
    let sin1 = (1.0 - cos1 * cos1).max(0.0).sqrt();
    if sin1 > 1.0 / eta {
        return None;
    }

    let sin2 = eta * sin1;
    let cos2 = (1.0 - sin2 * sin2).max(0.0).sqrt();
    Some(eta * incoming + (eta * cos1 - cos2) * normal)
}

/// Lambert term `max(0, N.L)`.
#[inline]
pub fn diffuse_factor(normal: Vec3, to_light: Vec3) -> f64 {
    normal.dot(to_light).max(0.0)
}

/// Phong term `max(0, V.R)^exponent`, with `V` pointing back along `view_direction`.
pub fn specular_factor(view_direction: Vec3, normal: Vec3, to_light: Vec3, exponent: f64) -> f64 {
    let reflected = (2.0 * normal.dot(to_light) * normal - to_light).normalize();
    (-view_direction).dot(reflected).max(0.0).powf(exponent)
}
