//! Equirectangular texture projection for points on the unit sphere.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

/// Map a unit-sphere point to equirectangular UV.
///
/// `u = 0.5 + atan2(x, z) / 2π` wraps once around the Y axis and
/// `v = 0.5 - asin(y) / π` runs from the north pole (`v = 0`) to the south
/// pole (`v = 1`).
#[inline]
#[must_use]
pub fn equirectangular_uv(p: Vec3) -> Vec2 {
    // Normalization can overshoot |y| = 1 by an ulp; asin would return NaN.
    let y = p.y.clamp(-1.0, 1.0);
    Vec2::new(0.5 + p.x.atan2(p.z) / TAU, 0.5 - y.asin() / PI)
}

/// Project every position, preserving order.
#[must_use]
pub fn project_equirectangular(positions: &[Vec3]) -> Vec<Vec2> {
    positions.iter().copied().map(equirectangular_uv).collect()
}
