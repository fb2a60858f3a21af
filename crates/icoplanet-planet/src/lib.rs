//! Planet assembly: splits an icosphere into independently colored patch meshes
//! with corrected UVs and optional pivot markers, and exports the result.

mod color;
mod error;
pub mod export;
mod patch_mesh;
mod pivots;
mod planet;
mod request;

pub use color::{DEFAULT_COLOR1, DEFAULT_COLOR2, Rgb};
pub use error::{ExportError, GenerationError};
pub use export::{ExportOptions, export_planet, write_obj, write_pivot_report};
pub use patch_mesh::{PatchAssembler, PatchMesh, patch_name};
pub use pivots::{CornerKey, PivotKind, PivotMarker, emit_pivots};
pub use planet::{Planet, PlanetAssembler, PlanetStats, generate_planet};
pub use request::{GenerationRequest, PivotOptions};
