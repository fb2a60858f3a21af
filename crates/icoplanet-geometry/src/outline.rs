//! Seed-triangle corners of a patch.

use glam::Vec3;

/// The three corners of the triangle a patch grew from at the split depth.
///
/// Further subdivision of the patch never moves these points, so they stay a
/// stable coarse outline of the patch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineCorners {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl OutlineCorners {
    #[must_use]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Corners in winding order.
    #[must_use]
    pub const fn corners(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Arithmetic mean of the corners.
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Unit face normal from `(b - a) x (c - a)`. Points away from the sphere
    /// center for the icosphere's winding.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a).normalize()
    }
}
