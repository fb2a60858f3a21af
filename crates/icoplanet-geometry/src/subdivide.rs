//! Two-phase icosphere subdivision.
//!
//! The shared phase splits every triangle of the sphere with one midpoint
//! cache. At the split depth each triangle becomes the seed of its own patch,
//! and the independent phase keeps splitting each patch's triangles without
//! ever moving a triangle between patches.

use glam::Vec3;
use tracing::debug;

use crate::{ConfigurationError, Icosahedron, MidpointCache, OutlineCorners, Triangle};

/// Deepest supported subdivision: 20 * 4^10 triangles, about 10.5M vertices.
pub const MAX_DEPTH: u32 = 10;

/// How far the midpoint cache reaches once the sphere is split into patches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CacheScope {
    /// One cache for the whole run; patches share the vertices on their borders.
    #[default]
    Shared,
    /// A fresh cache per patch after the split; no vertex created past the
    /// split is referenced by two patches.
    PerPatch,
}

/// Split every triangle into four, reusing midpoints already in `cache`.
///
/// Triangle `(a, b, c)` becomes `(a, ab, ca)`, `(b, bc, ab)`, `(c, ca, bc)`,
/// `(ab, bc, ca)`; children keep the parent's winding.
pub fn subdivide_level(
    triangles: &[Triangle],
    vertices: &mut Vec<Vec3>,
    cache: &mut MidpointCache,
) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(triangles.len() * 4);

    for tri in triangles {
        let Triangle { a, b, c } = *tri;
        let ab = cache.get_or_insert(vertices, a, b);
        let bc = cache.get_or_insert(vertices, b, c);
        let ca = cache.get_or_insert(vertices, c, a);

        out.extend_from_slice(&[
            Triangle::new(a, ab, ca),
            Triangle::new(b, bc, ab),
            Triangle::new(c, ca, bc),
            Triangle::new(ab, bc, ca),
        ]);
    }

    out
}

/// Triangles on a sphere subdivided `depth` times: `20 * 4^depth`.
#[must_use]
pub const fn expected_triangle_count(depth: u32) -> u64 {
    20 * 4u64.pow(depth)
}

/// Distinct vertices on a sphere subdivided `depth` times: `10 * 4^depth + 2`.
#[must_use]
pub const fn expected_vertex_count(depth: u32) -> u64 {
    10 * 4u64.pow(depth) + 2
}

/// Patches seeded at `split_depth`: `20 * 4^split_depth`.
#[must_use]
pub const fn expected_patch_count(split_depth: u32) -> u64 {
    expected_triangle_count(split_depth)
}

/// A whole subdivided sphere with shared vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
}

/// Output of a patched subdivision run.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchSet {
    /// Every vertex created during the run, indexed by [`Triangle`]s.
    pub vertices: Vec<Vec3>,
    /// Triangles of each patch, in patch order.
    pub patches: Vec<Vec<Triangle>>,
    /// Seed-triangle corners, parallel to `patches`.
    pub outlines: Vec<OutlineCorners>,
}

impl PatchSet {
    #[must_use]
    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    /// Total triangles across all patches.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.patches.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn patch(&self, index: usize) -> Option<&[Triangle]> {
        self.patches.get(index).map(Vec::as_slice)
    }
}

/// Refines the base icosahedron into an icosphere, optionally partitioned into patches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Subdivider {
    cache_scope: CacheScope,
}

impl Subdivider {
    #[must_use]
    pub const fn new(cache_scope: CacheScope) -> Self {
        Self { cache_scope }
    }

    #[must_use]
    pub const fn cache_scope(&self) -> CacheScope {
        self.cache_scope
    }

    /// Check a `(total_depth, split_depth)` pair without doing any work.
    pub fn validate(total_depth: u32, split_depth: u32) -> Result<(), ConfigurationError> {
        if split_depth >= total_depth {
            return Err(ConfigurationError::SplitDepthNotBelowTotal {
                split_depth,
                total_depth,
            });
        }
        if total_depth > MAX_DEPTH {
            return Err(ConfigurationError::DepthTooLarge {
                depth: total_depth,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// Subdivide the whole sphere `depth` times, ignoring patches.
    pub fn subdivide_sphere(
        &self,
        base: Icosahedron,
        depth: u32,
    ) -> Result<SphereMesh, ConfigurationError> {
        if depth > MAX_DEPTH {
            return Err(ConfigurationError::DepthTooLarge {
                depth,
                max: MAX_DEPTH,
            });
        }

        let Icosahedron {
            mut vertices,
            mut triangles,
        } = base;
        let mut cache = MidpointCache::new();
        for _ in 0..depth {
            triangles = subdivide_level(&triangles, &mut vertices, &mut cache);
        }

        Ok(SphereMesh {
            vertices,
            triangles,
        })
    }

    /// Subdivide `total_depth` times, freezing each triangle present after
    /// `split_depth` passes into its own patch.
    ///
    /// Every patch ends up with `4^(total_depth - split_depth)` triangles.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `split_depth >= total_depth` or the
    /// depth exceeds [`MAX_DEPTH`]. Nothing is allocated in that case.
    pub fn subdivide(
        &self,
        base: Icosahedron,
        total_depth: u32,
        split_depth: u32,
    ) -> Result<PatchSet, ConfigurationError> {
        Self::validate(total_depth, split_depth)?;

        let Icosahedron {
            mut vertices,
            mut triangles,
        } = base;
        vertices.reserve(expected_vertex_count(total_depth) as usize - vertices.len());

        let mut cache = MidpointCache::new();
        for _ in 0..split_depth {
            triangles = subdivide_level(&triangles, &mut vertices, &mut cache);
        }

        let outlines: Vec<OutlineCorners> = triangles
            .iter()
            .map(|tri| {
                let [a, b, c] = tri.indices().map(|i| vertices[i as usize]);
                OutlineCorners::new(a, b, c)
            })
            .collect();
        let mut patches: Vec<Vec<Triangle>> = triangles.into_iter().map(|t| vec![t]).collect();

        debug!(
            "Seeded {} patches at split depth {} ({} vertices)",
            patches.len(),
            split_depth,
            vertices.len()
        );

        let remaining = total_depth - split_depth;
        match self.cache_scope {
            CacheScope::Shared => {
                for _ in 0..remaining {
                    for patch in &mut patches {
                        *patch = subdivide_level(patch, &mut vertices, &mut cache);
                    }
                }
            }
            CacheScope::PerPatch => {
                for patch in &mut patches {
                    cache.clear();
                    for _ in 0..remaining {
                        *patch = subdivide_level(patch, &mut vertices, &mut cache);
                    }
                }
            }
        }

        debug!(
            "Subdivided {} patches to depth {} ({} vertices, {:?} cache)",
            patches.len(),
            total_depth,
            vertices.len(),
            self.cache_scope
        );

        Ok(PatchSet {
            vertices,
            patches,
            outlines,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn patched(total: u32, split: u32, scope: CacheScope) -> PatchSet {
        Subdivider::new(scope)
            .subdivide(Icosahedron::new(), total, split)
            .unwrap()
    }

    #[test]
    fn test_sphere_counts_for_each_depth() {
        for depth in 0..=5 {
            let mesh = Subdivider::default()
                .subdivide_sphere(Icosahedron::new(), depth)
                .unwrap();
            assert_eq!(
                mesh.triangles.len() as u64,
                expected_triangle_count(depth),
                "Triangle count at depth {depth}"
            );
            assert_eq!(
                mesh.vertices.len() as u64,
                expected_vertex_count(depth),
                "Vertex count at depth {depth}"
            );
        }
    }

    #[test]
    fn test_all_vertices_on_unit_sphere() {
        let mesh = Subdivider::default()
            .subdivide_sphere(Icosahedron::new(), 5)
            .unwrap();
        for (i, v) in mesh.vertices.iter().enumerate() {
            assert!(
                (v.length() - 1.0).abs() < 1e-5,
                "Vertex {i} not on unit sphere: length = {}",
                v.length()
            );
        }
    }

    #[test]
    fn test_one_level_scenario() {
        let set = patched(1, 0, CacheScope::Shared);
        assert_eq!(set.patch_count(), 20);
        assert!(set.patches.iter().all(|p| p.len() == 4));
        assert_eq!(set.vertices.len(), 42);
    }

    #[test]
    fn test_patch_counts_for_valid_pairs() {
        for total in 1..=4 {
            for split in 0..total {
                let set = patched(total, split, CacheScope::Shared);
                assert_eq!(
                    set.patch_count() as u64,
                    expected_patch_count(split),
                    "Patch count for ({total}, {split})"
                );
                let per_patch = 4usize.pow(total - split);
                assert!(
                    set.patches.iter().all(|p| p.len() == per_patch),
                    "Each patch of ({total}, {split}) should hold {per_patch} triangles"
                );
                assert_eq!(set.triangle_count() as u64, expected_triangle_count(total));
                assert_eq!(set.vertices.len() as u64, expected_vertex_count(total));
                assert_eq!(set.outlines.len(), set.patch_count());
            }
        }
    }

    #[test]
    fn test_patch_lookup_by_index() {
        let set = patched(2, 1, CacheScope::Shared);
        let last = set.patch_count() - 1;
        assert_eq!(set.patch(0), Some(set.patches[0].as_slice()));
        assert_eq!(set.patch(last).map(<[Triangle]>::len), Some(4));
        assert!(set.patch(set.patch_count()).is_none());
    }

    #[test]
    fn test_split_not_below_total_is_rejected() {
        let err = Subdivider::default()
            .subdivide(Icosahedron::new(), 2, 2)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::SplitDepthNotBelowTotal {
                split_depth: 2,
                total_depth: 2
            }
        );
        assert!(Subdivider::validate(1, 3).is_err());
        assert!(Subdivider::validate(0, 0).is_err());
    }

    #[test]
    fn test_excessive_depth_is_rejected() {
        let err = Subdivider::validate(MAX_DEPTH + 1, 0).unwrap_err();
        assert!(matches!(err, ConfigurationError::DepthTooLarge { .. }));
        assert!(
            Subdivider::default()
                .subdivide_sphere(Icosahedron::new(), MAX_DEPTH + 1)
                .is_err()
        );
    }

    #[test]
    fn test_outlines_match_split_depth_sphere() {
        let set = patched(3, 1, CacheScope::Shared);
        let seeds = Subdivider::default()
            .subdivide_sphere(Icosahedron::new(), 1)
            .unwrap();
        assert_eq!(set.outlines.len(), seeds.triangles.len());
        for (outline, tri) in set.outlines.iter().zip(&seeds.triangles) {
            let [a, b, c] = tri.indices().map(|i| seeds.vertices[i as usize]);
            assert_eq!(outline.corners(), [a, b, c]);
        }
    }

    #[test]
    fn test_patch_triangles_stay_inside_their_seed() {
        // Every vertex of a patch lies within the spherical cap around its seed centroid.
        let set = patched(4, 1, CacheScope::Shared);
        for (patch, outline) in set.patches.iter().zip(&set.outlines) {
            let center = outline.centroid().normalize();
            let min_dot = outline
                .corners()
                .iter()
                .map(|c| c.dot(center))
                .fold(f32::INFINITY, f32::min);
            for tri in patch {
                for idx in tri.indices() {
                    let v = set.vertices[idx as usize];
                    assert!(
                        v.dot(center) >= min_dot - 1e-5,
                        "Vertex {idx} escaped its patch"
                    );
                }
            }
        }
    }

    #[test]
    fn test_subdivision_preserves_outward_winding() {
        let set = patched(3, 1, CacheScope::Shared);
        for tri in set.patches.iter().flatten() {
            let [a, b, c] = tri.indices().map(|i| set.vertices[i as usize]);
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0, "Triangle {tri:?} flipped");
        }
    }

    #[test]
    fn test_per_patch_scope_isolates_new_vertices() {
        let total = 3;
        let split = 1;
        let set = patched(total, split, CacheScope::PerPatch);
        let seed_vertex_count = expected_vertex_count(split) as u32;

        let mut owner: Vec<Option<usize>> = vec![None; set.vertices.len()];
        for (p, patch) in set.patches.iter().enumerate() {
            for idx in patch.iter().flat_map(Triangle::indices) {
                if idx < seed_vertex_count {
                    continue;
                }
                match owner[idx as usize] {
                    None => owner[idx as usize] = Some(p),
                    Some(q) => assert_eq!(q, p, "Vertex {idx} shared by patches {q} and {p}"),
                }
            }
        }

        let shared = patched(total, split, CacheScope::Shared);
        assert_eq!(set.triangle_count(), shared.triangle_count());
        assert!(set.vertices.len() > shared.vertices.len());
    }

    #[test]
    fn test_patches_are_disjoint() {
        let set = patched(3, 2, CacheScope::Shared);
        let mut seen = HashSet::new();
        for tri in set.patches.iter().flatten() {
            let mut key = tri.indices();
            key.sort_unstable();
            assert!(seen.insert(key), "Triangle {tri:?} appears in two patches");
        }
    }
}
