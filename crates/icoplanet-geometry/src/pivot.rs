//! Representative position and orientation for a patch.

use glam::{Quat, Vec3};

use crate::OutlineCorners;

/// Reference frame that pivot rotations are measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotFrame {
    /// Axis that gets turned onto the patch normal. Must be unit length.
    pub up: Vec3,
    /// Orientation the alignment is composed with.
    pub orientation: Quat,
}

impl PivotFrame {
    /// Frame whose up axis is `orientation * +Y`.
    #[must_use]
    pub fn from_orientation(orientation: Quat) -> Self {
        Self {
            up: orientation * Vec3::Y,
            orientation,
        }
    }
}

impl Default for PivotFrame {
    fn default() -> Self {
        Self {
            up: Vec3::Y,
            orientation: Quat::IDENTITY,
        }
    }
}

/// A placement on the unit sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pivot {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Centroid of the patch outline, rotated so the frame's up axis follows the
/// outline's outward normal.
#[must_use]
pub fn compute_pivot(outline: &OutlineCorners, frame: &PivotFrame) -> Pivot {
    let normal = outline.normal();
    let align = Quat::from_rotation_arc(frame.up, normal);

    Pivot {
        position: outline.centroid(),
        rotation: align * frame.orientation,
    }
}
