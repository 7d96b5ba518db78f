use crate::Vec3;

/// A triangle with three ordered vertices.
///
/// Winding matters: the geometric normal is `cross(v1 - v0, v2 - v0)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Vec3; 3],
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Get vertex `index` (0, 1 or 2).
    #[inline]
    pub fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    /// Area by Heron's formula.
    ///
    /// Collinear vertices can push the product a hair below zero in floating
    /// point; it is clamped so those come out as 0 instead of NaN.
    pub fn area(&self) -> f64 {
        let [v0, v1, v2] = self.vertices;
        let a = (v0 - v1).length();
        let b = (v1 - v2).length();
        let c = (v0 - v2).length();
        let p = (a + b + c) / 2.0;
        (p * (p - a) * (p - b) * (p - c)).max(0.0).sqrt()
    }
}
