//! Quad projection to vertex arrays.
//!
//! Converts mask-space quads into model-space corners and triangles. Voxel
//! cells are unit cubes centered on integer coordinates, so quad edges sit
//! half a unit off the cell coordinates. Faces looking toward `+depth` sit
//! on the far side of their slice.

use crate::axis::Face;
use crate::config::{MesherConfig, UpAxis};
use crate::core::MeshOutput;
use crate::grid::BoundingBox;
use crate::merge::Quad;
use crate::palette::{ColorId, Palette};

/// Two triangles, natural corner order.
const INDICES_NATURAL: [u32; 6] = [0, 1, 2, 0, 2, 3];
/// Two triangles, reversed winding.
const INDICES_FLIPPED: [u32; 6] = [0, 2, 1, 0, 3, 2];

/// A quad placed in output space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedQuad {
    /// Corners in mask order: (h0,v0) (h1,v0) (h1,v1) (h0,v1).
    pub corners: [[f32; 3]; 4],
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Corner indices for two triangles, wound to face outward.
    pub indices: [u32; 6],
    pub color: ColorId,
}

/// Project one quad swept along `face`.
///
/// Mask coordinates are offset by the bounding box origin on the mask
/// plane; the quad's depth is already absolute.
pub fn project_quad(
    quad: &Quad,
    face: Face,
    bounds: &BoundingBox,
    config: &MesherConfig,
) -> ProjectedQuad {
    let desc = face.axis.descriptor();

    let h0 = bounds.origin[desc.horizontal] as f64 + quad.h as f64 - 0.5;
    let v0 = bounds.origin[desc.vertical] as f64 + quad.v as f64 - 0.5;
    let h1 = h0 + quad.width as f64;
    let v1 = v0 + quad.height as f64;
    let d = quad.depth as f64 + if face.facing.is_positive() { 0.5 } else { -0.5 };

    let plane = [(h0, v0), (h1, v0), (h1, v1), (h0, v1)];
    let mut outward = face.natural_winding_is_outward();
    let mut normal = face.normal();

    // Swapping two axes mirrors the geometry, which flips every winding.
    let swap = config.up_axis == UpAxis::Y;
    if swap {
        normal.swap(1, 2);
        outward = !outward;
    }

    let corners = plane.map(|(h, v)| {
        let mut p = desc.compose(h, v, d);
        if swap {
            p.swap(1, 2);
        }
        place(p, config)
    });

    ProjectedQuad {
        corners,
        normal,
        indices: if outward { INDICES_NATURAL } else { INDICES_FLIPPED },
        color: quad.color,
    }
}

/// Scale and translate a model-space point into output space.
#[inline]
fn place(p: [f64; 3], config: &MesherConfig) -> [f32; 3] {
    let s = config.voxel_size as f64;
    [
        (p[0] * s) as f32 + config.origin[0],
        (p[1] * s) as f32 + config.origin[1],
        (p[2] * s) as f32 + config.origin[2],
    ]
}

/// Append a projected quad as 4 vertices and 2 triangles.
pub fn emit_quad(projected: &ProjectedQuad, output: &mut MeshOutput) {
    let base_vertex = output.vertex_count() as u32;

    output
        .positions
        .extend_from_slice(bytemuck::cast_slice::<[f32; 3], f32>(&projected.corners));
    for _ in 0..4 {
        output.normals.extend_from_slice(&projected.normal);
    }
    output
        .indices
        .extend(projected.indices.iter().map(|&i| base_vertex + i));
    output.colors.extend_from_slice(&[projected.color; 2]);
}

/// Expand per-face quads into a mesh.
///
/// `face_quads[face.index()]` holds the quads swept along `face`.
pub fn expand_quads(
    face_quads: &[Vec<Quad>; 6],
    bounds: &BoundingBox,
    palette: &Palette,
    config: &MesherConfig,
) -> MeshOutput {
    let total_quads: usize = face_quads.iter().map(Vec::len).sum();
    let mut output = MeshOutput::with_capacity(total_quads, palette.clone());

    for face in Face::ALL {
        for quad in &face_quads[face.index()] {
            emit_quad(&project_quad(quad, face, bounds, config), &mut output);
        }
    }

    output
}
