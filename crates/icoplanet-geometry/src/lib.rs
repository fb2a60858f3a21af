//! Icosphere geometry: base icosahedron, midpoint-cached subdivision into patches,
//! equirectangular UV projection with seam/pole correction, and patch pivots.

mod error;
mod icosahedron;
mod midpoint;
mod outline;
mod pivot;
mod seam;
mod subdivide;
mod triangle;
mod uv;

pub use error::ConfigurationError;
pub use icosahedron::{BASE_TRIANGLE_COUNT, BASE_VERTEX_COUNT, Icosahedron};
pub use midpoint::{EdgeKey, MidpointCache};
pub use outline::OutlineCorners;
pub use pivot::{Pivot, PivotFrame, compute_pivot};
pub use seam::{
    UvCorrection, crosses_seam, fix_poles, fix_seam, fix_wrapped_uvs, is_pole, uv_winding,
};
pub use subdivide::{
    CacheScope, MAX_DEPTH, PatchSet, SphereMesh, Subdivider, expected_patch_count,
    expected_triangle_count, expected_vertex_count, subdivide_level,
};
pub use triangle::Triangle;
pub use uv::{equirectangular_uv, project_equirectangular};
