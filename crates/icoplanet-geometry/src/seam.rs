//! Seam and pole correction for equirectangular UVs on flat triangle buffers.
//!
//! Buffers hold three UVs per triangle, in winding order. Every function here
//! returns a new buffer and leaves its input untouched.

use glam::Vec2;

/// Vertices of a seam triangle with `u` below this are moved to the far side of the wrap.
const SEAM_SHIFT_BELOW: f32 = 0.25;

/// Signed area (times two) of a UV triangle: z of `(b - a) x (c - a)`.
///
/// Sphere triangles that do not cross the seam come out negative.
#[inline]
#[must_use]
pub fn uv_winding(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// A UV triangle whose winding flipped because it straddles the `u` wrap.
#[inline]
#[must_use]
pub fn crosses_seam(tri: [Vec2; 3]) -> bool {
    uv_winding(tri[0], tri[1], tri[2]) > 0.0
}

/// Whether `v` sits on a pole. A zero tolerance means exactly `0.0` or `1.0`.
#[inline]
#[must_use]
pub fn is_pole(v: f32, tolerance: f32) -> bool {
    v.abs() <= tolerance || (1.0 - v).abs() <= tolerance
}

/// Shift the low-`u` corners of every seam triangle by `+1.0`.
///
/// Not idempotent: run it once on freshly projected UVs.
#[must_use]
pub fn fix_seam(uvs: &[Vec2]) -> Vec<Vec2> {
    let mut out = uvs.to_vec();
    for tri in out.chunks_exact_mut(3) {
        if crosses_seam([tri[0], tri[1], tri[2]]) {
            for uv in tri.iter_mut().filter(|uv| uv.x < SEAM_SHIFT_BELOW) {
                uv.x += 1.0;
            }
        }
    }
    out
}

/// Give each pole vertex the mean `u` of the other two corners of its triangle.
///
/// Idempotent as long as a triangle has at most one pole vertex, which always
/// holds on a sphere.
#[must_use]
pub fn fix_poles(uvs: &[Vec2], tolerance: f32) -> Vec<Vec2> {
    let mut out = uvs.to_vec();
    for tri in out.chunks_exact_mut(3) {
        let original = [tri[0], tri[1], tri[2]];
        for j in 0..3 {
            if is_pole(original[j].y, tolerance) {
                let others = (original[(j + 1) % 3].x + original[(j + 2) % 3].x) / 2.0;
                tri[j].x = others;
            }
        }
    }
    out
}

/// Corrected UVs plus what the correction touched.
#[derive(Clone, Debug, PartialEq)]
pub struct UvCorrection {
    pub uvs: Vec<Vec2>,
    /// Triangles whose corners were shifted across the seam.
    pub seam_triangles: usize,
    /// Vertices whose `u` was replaced by the pole average.
    pub pole_vertices: usize,
}

/// Apply the seam shift, then the pole fix, to raw projected UVs.
#[must_use]
pub fn fix_wrapped_uvs(raw: &[Vec2], pole_tolerance: f32) -> UvCorrection {
    let seam_triangles = raw
        .chunks_exact(3)
        .filter(|tri| crosses_seam([tri[0], tri[1], tri[2]]))
        .count();
    let pole_vertices = raw
        .chunks_exact(3)
        .flatten()
        .filter(|uv| is_pole(uv.y, pole_tolerance))
        .count();

    let uvs = fix_poles(&fix_seam(raw), pole_tolerance);

    UvCorrection {
        uvs,
        seam_triangles,
        pole_vertices,
    }
}
