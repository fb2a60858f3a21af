//! The regular icosahedron every icosphere starts from.

use glam::Vec3;

use crate::Triangle;

/// Number of vertices in the base icosahedron.
pub const BASE_VERTEX_COUNT: usize = 12;

/// Number of faces in the base icosahedron.
pub const BASE_TRIANGLE_COUNT: usize = 20;

/// Face table of the base icosahedron, in the winding every child inherits.
const FACES: [[u32; 3]; BASE_TRIANGLE_COUNT] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// A unit icosahedron: 12 golden-ratio vertices on the unit sphere and the
/// 20 faces connecting them.
#[derive(Clone, Debug, PartialEq)]
pub struct Icosahedron {
    /// Vertex positions, each of length 1.
    pub vertices: Vec<Vec3>,
    /// Faces indexing into `vertices`.
    pub triangles: Vec<Triangle>,
}

impl Icosahedron {
    /// Build the base icosahedron.
    #[must_use]
    pub fn new() -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let vertices = [
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ]
        .into_iter()
        .map(Vec3::normalize)
        .collect();

        let triangles = FACES
            .iter()
            .map(|&[a, b, c]| Triangle::new(a, b, c))
            .collect();

        Self {
            vertices,
            triangles,
        }
    }
}

impl Default for Icosahedron {
    fn default() -> Self {
        Self::new()
    }
}
