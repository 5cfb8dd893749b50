//! Main meshing pipeline.
//!
//! Orchestrates the complete meshing process:
//! 1. Face masks (visible faces per slice)
//! 2. Greedy merge (combine adjacent faces into quads)
//! 3. Quad projection (convert quads to vertex arrays)
//!
//! Faces are swept in [`Face::ALL`] order, slices in ascending depth.

use log::{debug, info};
use web_time::Instant;

use crate::axis::Face;
use crate::config::MesherConfig;
use crate::core::MeshOutput;
use crate::cull::get_mask;
use crate::debug::{compute_direction_stats, generate_debug_geometry, DebugGeometry, FaceDirectionStats};
use crate::error::{MeshError, Result};
use crate::expand::expand_quads;
use crate::grid::VoxelModel;
use crate::merge::{get_quads, Quad};

/// Quads per face direction, indexed by [`Face::index`].
pub type FaceQuads = [Vec<Quad>; 6];

/// Statistics about a mesh result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshStats {
    /// Total number of quads generated
    pub quad_count: usize,
    /// Quads per face direction, in [`Face::ALL`] order
    pub quads_per_face: [usize; 6],
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Visible faces before merging (one quad each without merging)
    pub max_possible_quads: usize,
    /// Merge efficiency (1.0 = perfect merging, 0.0 = no merging)
    pub merge_efficiency: f32,
}

impl MeshStats {
    fn new(face_quads: &FaceQuads, mesh: &MeshOutput) -> Self {
        let quads_per_face: [usize; 6] = std::array::from_fn(|i| face_quads[i].len());
        let quad_count: usize = quads_per_face.iter().sum();
        // Each quad covers exactly the visible faces it merged.
        let max_possible_quads: usize = face_quads.iter().flatten().map(Quad::area).sum();

        let merge_efficiency = if max_possible_quads > 0 {
            1.0 - (quad_count as f32 / max_possible_quads as f32)
        } else {
            0.0
        };

        Self {
            quad_count,
            quads_per_face,
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            max_possible_quads,
            merge_efficiency,
        }
    }
}

/// Run masks and merging for every face and slice.
///
/// `should_abort` is polled before each slice.
fn sweep<F>(model: &VoxelModel, mut should_abort: F) -> Result<FaceQuads>
where
    F: FnMut() -> bool,
{
    let mut face_quads: FaceQuads = Default::default();

    for face in Face::ALL {
        let depth_axis = face.axis.descriptor().depth;
        let quads = &mut face_quads[face.index()];
        for depth in model.bounds().range(depth_axis) {
            if should_abort() {
                return Err(MeshError::Aborted);
            }
            let mut mask = get_mask(model, face.axis, depth, face.facing);
            quads.extend(get_quads(&mut mask, depth));
        }
    }

    Ok(face_quads)
}

fn build(
    model: &VoxelModel,
    config: &MesherConfig,
    should_abort: impl FnMut() -> bool,
) -> Result<(MeshOutput, FaceQuads)> {
    config.validate()?;

    let start = Instant::now();
    debug!(
        "meshing {} voxels, bounds {:?}, {} colors",
        model.filled_count(),
        model.bounds(),
        model.palette().len()
    );

    let face_quads = sweep(model, should_abort)?;
    let mesh = expand_quads(&face_quads, model.bounds(), model.palette(), config);

    info!(
        "meshed {} quads ({} triangles) in {} ms",
        face_quads.iter().map(Vec::len).sum::<usize>(),
        mesh.triangle_count(),
        start.elapsed().as_millis()
    );

    Ok((mesh, face_quads))
}

/// Mesh a model into triangle geometry.
///
/// The only error is [`MeshError::InvalidConfig`]. An empty model yields an
/// empty mesh.
///
/// # Example
/// ```
/// use quad_mesher::{mesh_model, MesherConfig, VoxelModel};
///
/// let config = MesherConfig::default();
/// let (model, _report) = VoxelModel::parse("0 0 0 ff0000", &config).unwrap();
/// let mesh = mesh_model(&model, &config).unwrap();
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn mesh_model(model: &VoxelModel, config: &MesherConfig) -> Result<MeshOutput> {
    build(model, config, || false).map(|(mesh, _)| mesh)
}

/// Mesh a model and return statistics along with the mesh.
pub fn mesh_model_with_stats(
    model: &VoxelModel,
    config: &MesherConfig,
) -> Result<(MeshOutput, MeshStats)> {
    let (mesh, face_quads) = build(model, config, || false)?;
    let stats = MeshStats::new(&face_quads, &mesh);
    Ok((mesh, stats))
}

/// Mesh a model, polling `should_abort` between slices.
///
/// Returns [`MeshError::Aborted`] as soon as the callback answers `true`.
/// Hosts use this to drop a pass whose model changed underneath it.
pub fn mesh_model_cancellable<F>(
    model: &VoxelModel,
    config: &MesherConfig,
    should_abort: F,
) -> Result<MeshOutput>
where
    F: FnMut() -> bool,
{
    build(model, config, should_abort).map(|(mesh, _)| mesh)
}

/// Parse model text and mesh it.
///
/// Malformed lines are skipped with a warning.
pub fn mesh_text(text: &str, config: &MesherConfig) -> Result<MeshOutput> {
    let (model, _report) = VoxelModel::parse(text, config)?;
    mesh_model(&model, config)
}

/// One unit cube per filled voxel, no culling and no merging.
///
/// Baseline for judging what the greedy pass saves: every voxel emits all
/// six faces, including faces buried between neighbors.
pub fn mesh_model_naive(model: &VoxelModel, config: &MesherConfig) -> Result<MeshOutput> {
    config.validate()?;

    let bounds = model.bounds();
    let mut face_quads: FaceQuads = Default::default();

    for x in bounds.range(0) {
        for y in bounds.range(1) {
            for z in bounds.range(2) {
                let Some(color) = model.grid().get(x, y, z).color() else {
                    continue;
                };
                for face in Face::ALL {
                    let desc = face.axis.descriptor();
                    let [h, v, depth] = [desc.horizontal, desc.vertical, desc.depth]
                        .map(|axis| [x, y, z][axis]);
                    face_quads[face.index()].push(Quad {
                        h: (h - bounds.origin[desc.horizontal] as i64) as usize,
                        v: (v - bounds.origin[desc.vertical] as i64) as usize,
                        depth,
                        width: 1,
                        height: 1,
                        color,
                    });
                }
            }
        }
    }

    Ok(expand_quads(&face_quads, bounds, model.palette(), config))
}

/// Debug output from meshing pipeline.
#[derive(Debug, Clone)]
pub struct MeshDebugOutput {
    pub mesh: MeshOutput,
    pub stats: MeshStats,
    /// Wireframe lines and per-vertex face colors
    pub debug: DebugGeometry,
    pub direction_stats: FaceDirectionStats,
}

/// Mesh a model and return full debug output.
pub fn mesh_model_debug(model: &VoxelModel, config: &MesherConfig) -> Result<MeshDebugOutput> {
    let (mesh, face_quads) = build(model, config, || false)?;
    let stats = MeshStats::new(&face_quads, &mesh);
    let debug = generate_debug_geometry(&face_quads, model.bounds(), config);
    let direction_stats = compute_direction_stats(&face_quads);

    Ok(MeshDebugOutput { mesh, stats, debug, direction_stats })
}
