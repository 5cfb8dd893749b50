//! Debug geometry for greedy mesh visualization.
//!
//! Generates wireframe lines showing quad boundaries and per-vertex colors
//! keyed by face direction.

use crate::axis::Face;
use crate::config::MesherConfig;
use crate::expand::project_quad;
use crate::grid::BoundingBox;
use crate::merge::Quad;

/// Debug output containing wireframe lines and per-vertex colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugGeometry {
    /// Wireframe line positions (pairs of xyz endpoints).
    /// Length = quad_count * 4 edges * 2 endpoints * 3 floats = quad_count * 24.
    pub line_positions: Vec<f32>,

    /// Per-vertex face-direction colors for the main mesh (RGB per vertex).
    /// Length = vertex_count * 3.
    pub face_colors: Vec<f32>,
}

/// Face direction colors, in [`Face::ALL`] order.
pub const DIR_COLORS: [[f32; 3]; 6] = [
    [0.1, 0.1, 0.5], // -Z = dark blue
    [0.2, 0.2, 0.9], // +Z = blue
    [0.1, 0.5, 0.1], // -Y = dark green
    [0.2, 0.9, 0.2], // +Y = green
    [0.5, 0.1, 0.1], // -X = dark red
    [0.9, 0.2, 0.2], // +X = red
];

/// Generate debug geometry from per-face quads.
///
/// Corners come from the same projection as the mesh, so the wireframe
/// lines up with the triangles and the color arrays line up with the mesh
/// vertices.
pub fn generate_debug_geometry(
    face_quads: &[Vec<Quad>; 6],
    bounds: &BoundingBox,
    config: &MesherConfig,
) -> DebugGeometry {
    let total_quads: usize = face_quads.iter().map(Vec::len).sum();

    let mut line_positions = Vec::with_capacity(total_quads * 24);
    let mut face_colors = Vec::with_capacity(total_quads * 12);

    for face in Face::ALL {
        let dir_color = DIR_COLORS[face.index()];

        for quad in &face_quads[face.index()] {
            let corners = project_quad(quad, face, bounds, config).corners;

            // Wireframe edges: 0→1, 1→2, 2→3, 3→0
            for i in 0..4 {
                line_positions.extend_from_slice(&corners[i]);
                line_positions.extend_from_slice(&corners[(i + 1) % 4]);
            }

            for _ in 0..4 {
                face_colors.extend_from_slice(&dir_color);
            }
        }
    }

    DebugGeometry { line_positions, face_colors }
}

/// Per-direction face statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceDirectionStats {
    /// Visible faces per direction, in [`Face::ALL`] order
    pub face_counts: [usize; 6],
    /// Quads per direction, in [`Face::ALL`] order
    pub quad_counts: [usize; 6],
    /// Total faces before merging
    pub total_faces: usize,
    /// Total quads after merging
    pub total_quads: usize,
    /// Naive triangle count (2 per face, no merging)
    pub naive_triangles: usize,
    /// Merged triangle count (2 per quad)
    pub merged_triangles: usize,
    /// Triangle reduction ratio (naive / merged)
    pub triangle_reduction: f32,
}

/// Compute per-direction face statistics from merged quads.
pub fn compute_direction_stats(face_quads: &[Vec<Quad>; 6]) -> FaceDirectionStats {
    let mut stats = FaceDirectionStats::default();

    for (face, quads) in face_quads.iter().enumerate() {
        stats.quad_counts[face] = quads.len();
        stats.face_counts[face] = quads.iter().map(Quad::area).sum();
    }

    stats.total_faces = stats.face_counts.iter().sum();
    stats.total_quads = stats.quad_counts.iter().sum();
    stats.naive_triangles = stats.total_faces * 2;
    stats.merged_triangles = stats.total_quads * 2;
    stats.triangle_reduction = if stats.merged_triangles > 0 {
        stats.naive_triangles as f32 / stats.merged_triangles as f32
    } else {
        0.0
    };

    stats
}
