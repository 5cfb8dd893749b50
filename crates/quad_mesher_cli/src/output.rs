//! Mesh writers.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use quad_mesher::{MeshOutput, MeshStats};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Triangle list with resolved colors
    Json,
    /// Wavefront OBJ, one material group per color run
    Obj,
}

#[derive(Serialize)]
struct TriangleRecord<'a> {
    positions: [[f32; 3]; 3],
    color: &'a str,
}

#[derive(Serialize)]
struct StatsRecord {
    quad_count: usize,
    quads_per_face: [usize; 6],
    max_possible_quads: usize,
    merge_efficiency: f32,
}

impl From<&MeshStats> for StatsRecord {
    fn from(stats: &MeshStats) -> Self {
        Self {
            quad_count: stats.quad_count,
            quads_per_face: stats.quads_per_face,
            max_possible_quads: stats.max_possible_quads,
            merge_efficiency: stats.merge_efficiency,
        }
    }
}

#[derive(Serialize)]
struct MeshDocument<'a> {
    vertex_count: usize,
    triangle_count: usize,
    skipped_lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<StatsRecord>,
    triangles: Vec<TriangleRecord<'a>>,
}

/// Write the mesh as a JSON document.
pub fn write_json<W: Write>(
    mut out: W,
    mesh: &MeshOutput,
    stats: Option<&MeshStats>,
    skipped_lines: usize,
) -> Result<()> {
    let document = MeshDocument {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        skipped_lines,
        stats: stats.map(StatsRecord::from),
        triangles: mesh
            .triangles()
            .map(|t| TriangleRecord { positions: t.positions, color: t.color })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut out, &document)?;
    writeln!(out)?;
    Ok(())
}

/// Write the mesh as Wavefront OBJ.
///
/// Color keys become material names; no `.mtl` file is written.
pub fn write_obj<W: Write>(mut out: W, mesh: &MeshOutput) -> Result<()> {
    writeln!(out, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;

    for v in mesh.positions.chunks_exact(3) {
        writeln!(out, "v {} {} {}", v[0], v[1], v[2])?;
    }
    for n in mesh.normals.chunks_exact(3) {
        writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
    }

    let mut current = None;
    for (tri, &color) in mesh.indices.chunks_exact(3).zip(&mesh.colors) {
        if current != Some(color) {
            writeln!(out, "usemtl {}", mesh.palette.get(color).unwrap_or("default"))?;
            current = Some(color);
        }
        // OBJ indices are 1-based
        let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(())
}
