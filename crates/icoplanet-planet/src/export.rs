//! Writing generated planets to disk: patch meshes as OBJ, pivots and stats as RON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::{ExportError, Planet, PlanetStats};

/// Mesh file name inside the export directory.
pub const OBJ_FILE_NAME: &str = "planet.obj";

/// Pivot report file name inside the export directory.
pub const PIVOTS_FILE_NAME: &str = "pivots.ron";

/// Which files [`export_planet`] writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub write_obj: bool,
    pub write_pivots: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            write_obj: true,
            write_pivots: true,
        }
    }
}

/// Write every patch as its own OBJ object.
///
/// Vertex colors ride along as the `v x y z r g b` extension; faces use
/// global 1-based `v/vt/vn` indices.
pub fn write_obj<W: Write>(planet: &Planet, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "# icoplanet: {} patches, seed {}", planet.patches.len(), planet.seed)?;

    let mut base = 1u32;
    for mesh in &planet.patches {
        writeln!(out, "o {}", mesh.name)?;
        for (p, c) in mesh.positions.iter().zip(&mesh.colors) {
            let [r, g, b] = c.to_unit();
            writeln!(out, "v {} {} {} {r} {g} {b}", p.x, p.y, p.z)?;
        }
        for uv in &mesh.uvs {
            writeln!(out, "vt {} {}", uv.x, uv.y)?;
        }
        for n in &mesh.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i + base);
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }
        base += mesh.vertex_count() as u32;
    }

    Ok(())
}

#[derive(Serialize)]
struct PivotRecord {
    patch: usize,
    name: &'static str,
    position: [f32; 3],
    rotation: [f32; 4],
}

#[derive(Serialize)]
struct PivotReport {
    seed: u64,
    radius: f32,
    stats: PlanetStats,
    pivots: Vec<PivotRecord>,
}

/// Serialize the planet's pivots and stats as pretty RON.
pub fn write_pivot_report(planet: &Planet) -> Result<String, ExportError> {
    let report = PivotReport {
        seed: planet.seed,
        radius: planet.radius,
        stats: planet.stats,
        pivots: planet
            .pivots
            .iter()
            .map(|m| PivotRecord {
                patch: m.patch,
                name: m.kind.name(),
                position: m.position.to_array(),
                rotation: m.rotation.to_array(),
            })
            .collect(),
    };

    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .separate_tuple_members(true)
        .enumerate_arrays(false);
    ron::ser::to_string_pretty(&report, pretty).map_err(ExportError::SerializeError)
}

/// Write the requested files into `dir`, creating it if needed.
///
/// Returns the paths written.
pub fn export_planet(
    planet: &Planet,
    dir: &Path,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(ExportError::WriteError)?;
    let mut written = Vec::new();

    if options.write_obj {
        let path = dir.join(OBJ_FILE_NAME);
        let file = File::create(&path).map_err(ExportError::WriteError)?;
        let mut out = BufWriter::new(file);
        write_obj(planet, &mut out).map_err(ExportError::WriteError)?;
        out.flush().map_err(ExportError::WriteError)?;
        written.push(path);
    }

    if options.write_pivots {
        let path = dir.join(PIVOTS_FILE_NAME);
        std::fs::write(&path, write_pivot_report(planet)?).map_err(ExportError::WriteError)?;
        written.push(path);
    }

    info!("Exported planet to {} ({} files)", dir.display(), written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenerationRequest, PivotOptions, generate_planet};

    fn small_planet() -> Planet {
        let request = GenerationRequest {
            pivots: PivotOptions {
                emit_center: true,
                ..PivotOptions::default()
            },
            ..GenerationRequest::new(1, 0).with_seed(11)
        };
        generate_planet(&request).unwrap()
    }

    fn obj_text(planet: &Planet) -> String {
        let mut buf = Vec::new();
        write_obj(planet, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_obj_counts() {
        let planet = small_planet();
        let text = obj_text(&planet);
        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();

        assert_eq!(count("o "), 20);
        assert_eq!(count("v "), 240);
        assert_eq!(count("vt "), 240);
        assert_eq!(count("vn "), 240);
        assert_eq!(count("f "), 80);
        assert!(text.contains("o PlanetSurface_0\n"));
        assert!(text.contains("o PlanetSurface_19\n"));
    }

    #[test]
    fn test_obj_face_indices_are_global_and_one_based() {
        let text = obj_text(&small_planet());
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces[0], "f 1/1/1 2/2/2 3/3/3");
        // Second patch starts after the first patch's 12 vertices.
        assert_eq!(faces[4], "f 13/13/13 14/14/14 15/15/15");
        assert_eq!(faces[79], "f 238/238/238 239/239/239 240/240/240");
    }

    #[test]
    fn test_obj_vertex_lines_carry_color() {
        let planet = small_planet();
        let text = obj_text(&planet);
        let first_v = text.lines().find(|l| l.starts_with("v ")).unwrap();
        assert_eq!(first_v.split_whitespace().count(), 7, "Line: {first_v}");
    }

    #[test]
    fn test_pivot_report_lists_markers_and_stats() {
        let planet = small_planet();
        let text = write_pivot_report(&planet).unwrap();
        assert_eq!(text.matches("\"CenterPivot\"").count(), 20);
        assert!(!text.contains("OutlinePivot"));
        assert!(text.contains("seed: 11"));
        assert!(text.contains("center_pivots: 20"));
    }

    #[test]
    fn test_export_writes_requested_files() {
        let dir = tempfile::tempdir().unwrap();
        let planet = small_planet();

        let written = export_planet(&planet, dir.path(), &ExportOptions::default()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join(OBJ_FILE_NAME).is_file());
        assert!(dir.path().join(PIVOTS_FILE_NAME).is_file());

        let obj = std::fs::read_to_string(dir.path().join(OBJ_FILE_NAME)).unwrap();
        assert_eq!(obj, obj_text(&planet));
    }

    #[test]
    fn test_export_respects_options_and_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let options = ExportOptions {
            write_obj: false,
            write_pivots: true,
        };
        let written = export_planet(&small_planet(), &nested, &options).unwrap();
        assert_eq!(written, vec![nested.join(PIVOTS_FILE_NAME)]);
        assert!(!nested.join(OBJ_FILE_NAME).exists());
    }
}
