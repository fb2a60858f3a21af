//! Flat per-patch meshes.

use glam::{Vec2, Vec3};
use icoplanet_geometry::Triangle;
use rand::Rng;

use crate::Rgb;

/// Name given to the mesh of patch `index`.
#[must_use]
pub fn patch_name(index: usize) -> String {
    format!("PlanetSurface_{index}")
}

/// One patch as an unshared-vertex mesh: three buffer entries per triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchMesh {
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Unit outward normals (the unscaled sphere position).
    pub normals: Vec<Vec3>,
    /// Per-vertex color, `base_color` everywhere.
    pub colors: Vec<Rgb>,
    /// Texture coordinates; empty until UVs are mapped.
    pub uvs: Vec<Vec2>,
    /// `0..positions.len()`, one triangle per three entries.
    pub indices: Vec<u32>,
    pub base_color: Rgb,
}

impl PatchMesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Scale positions about the origin; normals are untouched.
    pub fn scale_positions(&mut self, radius: f32) {
        for p in &mut self.positions {
            *p *= radius;
        }
    }
}

/// Builds patch meshes tinted between two colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatchAssembler {
    color1: Rgb,
    color2: Rgb,
}

impl PatchAssembler {
    #[must_use]
    pub const fn new(color1: Rgb, color2: Rgb) -> Self {
        Self { color1, color2 }
    }

    /// Draw one patch color. Consumes exactly one value from `rng`.
    pub fn base_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        let t: f32 = rng.random_range(0.0..=1.0);
        self.color1.lerp(self.color2, t)
    }

    /// Copy the patch's triangles out of the shared vertex sequence into a flat mesh.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        index: usize,
        vertices: &[Vec3],
        triangles: &[Triangle],
        rng: &mut R,
    ) -> PatchMesh {
        let base_color = self.base_color(rng);
        let vertex_count = triangles.len() * 3;

        let positions: Vec<Vec3> = triangles
            .iter()
            .flat_map(|tri| tri.indices().map(|i| vertices[i as usize]))
            .collect();

        PatchMesh {
            name: patch_name(index),
            normals: positions.clone(),
            colors: vec![base_color; vertex_count],
            uvs: Vec::new(),
            indices: (0..vertex_count as u32).collect(),
            positions,
            base_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use icoplanet_geometry::Icosahedron;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{DEFAULT_COLOR1, DEFAULT_COLOR2};

    fn assembler() -> PatchAssembler {
        PatchAssembler::new(DEFAULT_COLOR1, DEFAULT_COLOR2)
    }

    #[test]
    fn test_flat_buffers_have_three_entries_per_triangle() {
        let ico = Icosahedron::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mesh = assembler().assemble(3, &ico.vertices, &ico.triangles[..4], &mut rng);

        assert_eq!(mesh.name, "PlanetSurface_3");
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.normals.len(), 12);
        assert_eq!(mesh.colors.len(), 12);
        assert_eq!(mesh.indices, (0..12).collect::<Vec<u32>>());
        assert!(mesh.uvs.is_empty());
    }

    #[test]
    fn test_vertices_copied_in_winding_order() {
        let ico = Icosahedron::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let tris = &ico.triangles[..2];
        let mesh = assembler().assemble(0, &ico.vertices, tris, &mut rng);

        for (t, tri) in tris.iter().enumerate() {
            for (k, idx) in tri.indices().into_iter().enumerate() {
                assert_eq!(mesh.positions[t * 3 + k], ico.vertices[idx as usize]);
            }
        }
        // Vertex 0 is shared by both faces but duplicated in the flat mesh.
        assert_eq!(mesh.positions[0], mesh.positions[3]);
    }

    #[test]
    fn test_normals_equal_unit_positions() {
        let ico = Icosahedron::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut mesh = assembler().assemble(0, &ico.vertices, &ico.triangles, &mut rng);
        assert_eq!(mesh.normals, mesh.positions);

        mesh.scale_positions(4.0);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((*p - *n * 4.0).length() < 1e-5);
            assert!((n.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_color_per_patch() {
        let ico = Icosahedron::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mesh = assembler().assemble(0, &ico.vertices, &ico.triangles, &mut rng);
        assert!(mesh.colors.iter().all(|&c| c == mesh.base_color));
    }

    #[test]
    fn test_color_draw_is_seeded() {
        let a = assembler();
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        let first: Vec<Rgb> = (0..10).map(|_| a.base_color(&mut rng1)).collect();
        let second: Vec<Rgb> = (0..10).map(|_| a.base_color(&mut rng2)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_colors_give_constant_tint() {
        let tint = Rgb::new(9, 8, 7);
        let a = PatchAssembler::new(tint, tint);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..16 {
            assert_eq!(a.base_color(&mut rng), tint);
        }
    }
}
