//! End-to-end planet generation.

use icoplanet_geometry::{
    Icosahedron, OutlineCorners, Subdivider, fix_wrapped_uvs, project_equirectangular,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    GenerationError, GenerationRequest, PatchAssembler, PatchMesh, PivotKind, PivotMarker,
    emit_pivots,
};

/// Summary counts for a generated planet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetStats {
    pub patch_count: usize,
    pub triangle_count: usize,
    /// Distinct vertices in the subdivided sphere before flattening.
    pub shared_vertex_count: usize,
    pub seam_triangles: usize,
    pub pole_vertices: usize,
    pub center_pivots: usize,
    pub corner_pivots: usize,
}

/// A generated planet: patch meshes, pivot markers, and the seed that colored them.
#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub patches: Vec<PatchMesh>,
    pub pivots: Vec<PivotMarker>,
    /// Seed-triangle corners per patch, on the unit sphere.
    pub outlines: Vec<OutlineCorners>,
    pub radius: f32,
    /// Seed actually used for the color draw; feed it back to reproduce the run.
    pub seed: u64,
    pub stats: PlanetStats,
}

/// Run one generation without keeping any state.
///
/// # Errors
///
/// Returns [`GenerationError`] if the request is invalid; nothing is built.
pub fn generate_planet(request: &GenerationRequest) -> Result<Planet, GenerationError> {
    build_planet(&Subdivider::default(), request)
}

fn build_planet(
    subdivider: &Subdivider,
    request: &GenerationRequest,
) -> Result<Planet, GenerationError> {
    request.validate()?;

    let seed = request.color_seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let set = subdivider.subdivide(
        Icosahedron::new(),
        request.total_depth,
        request.split_depth,
    )?;

    let assembler = PatchAssembler::new(request.color1, request.color2);
    let mut stats = PlanetStats {
        patch_count: set.patch_count(),
        triangle_count: set.triangle_count(),
        shared_vertex_count: set.vertices.len(),
        ..PlanetStats::default()
    };

    let mut patches = Vec::with_capacity(set.patch_count());
    for (index, triangles) in set.patches.iter().enumerate() {
        let mut mesh = assembler.assemble(index, &set.vertices, triangles, &mut rng);

        let correction = fix_wrapped_uvs(
            &project_equirectangular(&mesh.positions),
            request.pole_tolerance,
        );
        stats.seam_triangles += correction.seam_triangles;
        stats.pole_vertices += correction.pole_vertices;
        mesh.uvs = correction.uvs;

        mesh.scale_positions(request.base_radius);
        patches.push(mesh);
    }

    debug!(
        "UV correction: {} seam triangles shifted, {} pole vertices averaged",
        stats.seam_triangles, stats.pole_vertices
    );
    if request.pole_tolerance > 0.0 && stats.pole_vertices == 0 {
        warn!(
            "Pole tolerance {} matched no vertices; pole fans are uncorrected",
            request.pole_tolerance
        );
    }

    let pivots = emit_pivots(&set.outlines, &request.pivots, request.base_radius);
    stats.center_pivots = pivots.iter().filter(|p| p.kind == PivotKind::Center).count();
    stats.corner_pivots = pivots.len() - stats.center_pivots;

    info!(
        "Generated planet: {} patches, {} triangles, {} pivots (depth {}/{}, seed {})",
        stats.patch_count,
        stats.triangle_count,
        pivots.len(),
        request.split_depth,
        request.total_depth,
        seed
    );

    Ok(Planet {
        patches,
        pivots,
        outlines: set.outlines,
        radius: request.base_radius,
        seed,
        stats,
    })
}

/// Owns the most recent planet and rebuilds it on request.
///
/// Only one planet exists at a time: a successful [`generate`](Self::generate)
/// releases the previous planet before building the next one, and a rejected
/// request leaves it in place.
#[derive(Debug, Default)]
pub struct PlanetAssembler {
    subdivider: Subdivider,
    planet: Option<Planet>,
}

impl PlanetAssembler {
    #[must_use]
    pub fn new(subdivider: Subdivider) -> Self {
        Self {
            subdivider,
            planet: None,
        }
    }

    #[must_use]
    pub fn subdivider(&self) -> &Subdivider {
        &self.subdivider
    }

    /// The current planet, if one has been generated.
    #[must_use]
    pub fn planet(&self) -> Option<&Planet> {
        self.planet.as_ref()
    }

    /// Release the current planet.
    pub fn clear(&mut self) {
        if let Some(old) = self.planet.take() {
            debug!("Released planet with {} patches", old.patches.len());
        }
    }

    /// Validate `request`, drop the current planet, and build a new one.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] for an invalid request; the current planet
    /// is kept.
    pub fn generate(&mut self, request: &GenerationRequest) -> Result<&Planet, GenerationError> {
        request.validate()?;
        self.clear();
        let planet = build_planet(&self.subdivider, request)?;
        Ok(self.planet.insert(planet))
    }
}
