//! Mesh output handed to the renderer.

use crate::palette::{ColorId, Palette};

/// Triangle geometry ready for a renderer.
///
/// Quads are emitted as 4 fresh vertices and 2 triangles each; vertices are
/// never shared between quads.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshOutput {
    /// Vertex positions (3 floats per vertex).
    pub positions: Vec<f32>,
    /// Vertex normals (3 floats per vertex).
    pub normals: Vec<f32>,
    /// Triangle indices (3 indices per triangle), counter-clockwise when
    /// seen from outside the solid.
    pub indices: Vec<u32>,
    /// Palette id of each triangle.
    pub colors: Vec<ColorId>,
    /// Palette the color ids refer to.
    pub palette: Palette,
}

/// One triangle with resolved positions and color key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<'a> {
    pub positions: [[f32; 3]; 3],
    pub color: &'a str,
}

impl MeshOutput {
    /// An empty mesh over `palette`.
    pub fn new(palette: Palette) -> Self {
        Self { palette, ..Default::default() }
    }

    /// Pre-allocate for an estimated quad count.
    pub fn with_capacity(estimated_quads: usize, palette: Palette) -> Self {
        let verts = estimated_quads * 4;
        let tris = estimated_quads * 2;
        Self {
            positions: Vec::with_capacity(verts * 3),
            normals: Vec::with_capacity(verts * 3),
            indices: Vec::with_capacity(tris * 3),
            colors: Vec::with_capacity(tris),
            palette,
        }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.positions[i * 3], self.positions[i * 3 + 1], self.positions[i * 3 + 2]]
    }

    /// Palette id per vertex (all 4 vertices of a quad share one color).
    pub fn vertex_colors(&self) -> Vec<ColorId> {
        (0..self.vertex_count()).map(|v| self.colors[v / 4 * 2]).collect()
    }

    /// Iterate triangles with resolved color keys.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle<'_>> + '_ {
        self.indices
            .chunks_exact(3)
            .zip(&self.colors)
            .map(move |(tri, &color)| Triangle {
                positions: [
                    self.position(tri[0] as usize),
                    self.position(tri[1] as usize),
                    self.position(tri[2] as usize),
                ],
                color: self.palette.get(color).unwrap_or_default(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_output_counts() {
        let mut mesh = MeshOutput::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.is_empty());

        // One quad: 4 vertices, 2 triangles
        mesh.positions.extend_from_slice(&[0.0; 12]);
        mesh.normals.extend_from_slice(&[0.0; 12]);
        mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
        mesh.colors.extend_from_slice(&[1, 1]);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_colors(), vec![1; 4]);
    }

    #[test]
    fn triangles_resolve_colors() {
        let mut palette = Palette::new();
        palette.intern("abcdef").unwrap();
        let mut mesh = MeshOutput::new(palette);
        mesh.positions.extend_from_slice(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        mesh.indices.extend_from_slice(&[0, 1, 2]);
        mesh.colors.push(1);

        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].color, "abcdef");
        assert_eq!(tris[0].positions[1], [1.0, 0.0, 0.0]);
    }
}
