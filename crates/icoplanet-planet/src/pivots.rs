//! Center and corner pivot markers for patches.

use glam::{Quat, Vec3};
use icoplanet_geometry::{OutlineCorners, compute_pivot};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::PivotOptions;

/// Quantization step for corner dedupe keys on the unit sphere.
const CORNER_KEY_SCALE: f32 = 1e4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotKind {
    Center,
    CornerA,
    CornerB,
    CornerC,
}

impl PivotKind {
    pub const CORNERS: [Self; 3] = [Self::CornerA, Self::CornerB, Self::CornerC];

    /// Marker name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Center => "CenterPivot",
            Self::CornerA => "OutlinePivotA",
            Self::CornerB => "OutlinePivotB",
            Self::CornerC => "OutlinePivotC",
        }
    }
}

/// A placed marker belonging to one patch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotMarker {
    /// Index of the owning patch.
    pub patch: usize,
    pub kind: PivotKind,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Rounded unit-sphere position identifying a corner shared by adjacent patches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerKey([i32; 3]);

impl CornerKey {
    #[must_use]
    pub fn new(p: Vec3) -> Self {
        Self(p.to_array().map(|c| (c * CORNER_KEY_SCALE).round() as i32))
    }
}

/// Emit the markers requested by `options`, scaled to `radius`.
///
/// All center markers come first (in patch order), then corner markers. With
/// `dedupe_corners`, a corner already claimed by an earlier patch is skipped.
#[must_use]
pub fn emit_pivots(
    outlines: &[OutlineCorners],
    options: &PivotOptions,
    radius: f32,
) -> Vec<PivotMarker> {
    let mut markers = Vec::new();

    if options.emit_center {
        markers.extend(outlines.iter().enumerate().map(|(patch, outline)| {
            let pivot = compute_pivot(outline, &options.frame);
            PivotMarker {
                patch,
                kind: PivotKind::Center,
                position: pivot.position * radius,
                rotation: pivot.rotation,
            }
        }));
    }

    if options.emit_corners {
        let mut claimed: FxHashSet<CornerKey> = FxHashSet::default();
        for (patch, outline) in outlines.iter().enumerate() {
            let rotation = compute_pivot(outline, &options.frame).rotation;
            for (kind, corner) in PivotKind::CORNERS.into_iter().zip(outline.corners()) {
                if options.dedupe_corners && !claimed.insert(CornerKey::new(corner)) {
                    continue;
                }
                markers.push(PivotMarker {
                    patch,
                    kind,
                    position: corner * radius,
                    rotation,
                });
            }
        }
    }

    markers
}
