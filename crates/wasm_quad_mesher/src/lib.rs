//! WASM bindings for the quad mesher.
//!
//! Provides JavaScript-accessible functions that turn voxel model text into
//! buffers for a Three.js `BufferGeometry`.

use log::{info, LevelFilter};
use quad_mesher::{
    mesh_model, mesh_model_debug, mesh_model_with_stats, parse_hex_rgb, MeshError, MeshOutput,
    MesherConfig, Palette, ParseReport, UpAxis, VoxelModel,
};
use wasm_bindgen::prelude::*;

/// Vertex color used when a color key is not a hex triplet.
const FALLBACK_RGB: [f32; 3] = [1.0, 1.0, 1.0];

/// Mesh result returned to JavaScript.
///
/// Contains vertex data ready for use with Three.js BufferGeometry.
#[wasm_bindgen]
pub struct MeshResult {
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    colors: Vec<f32>,
    skipped_lines: usize,
}

#[wasm_bindgen]
impl MeshResult {
    /// Get vertex positions (3 floats per vertex).
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f32> {
        self.positions.clone()
    }

    /// Get vertex normals (3 floats per vertex).
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> Vec<f32> {
        self.normals.clone()
    }

    /// Get triangle indices.
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    /// Get vertex colors (RGB in [0, 1], 3 floats per vertex).
    #[wasm_bindgen(getter)]
    pub fn colors(&self) -> Vec<f32> {
        self.colors.clone()
    }

    /// Number of vertices in the mesh.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the mesh.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of input lines skipped as malformed.
    #[wasm_bindgen(getter)]
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Whether the mesh is empty (no geometry).
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl MeshResult {
    fn new(output: MeshOutput, report: &ParseReport) -> Self {
        let colors = vertex_rgb(&output);
        Self {
            positions: output.positions,
            normals: output.normals,
            indices: output.indices,
            colors,
            skipped_lines: report.skipped.len(),
        }
    }
}

/// Resolve every palette entry to RGB. Slot 0 is never referenced.
fn palette_rgb(palette: &Palette) -> Vec<[f32; 3]> {
    let mut rgb = vec![FALLBACK_RGB; palette.len() + 1];
    for (id, key) in palette.iter() {
        rgb[id as usize] = parse_hex_rgb(key).unwrap_or(FALLBACK_RGB);
    }
    rgb
}

/// Flat per-vertex RGB for a mesh.
fn vertex_rgb(output: &MeshOutput) -> Vec<f32> {
    let rgb = palette_rgb(&output.palette);
    let per_vertex: Vec<[f32; 3]> = output
        .vertex_colors()
        .into_iter()
        .map(|id| rgb.get(id as usize).copied().unwrap_or(FALLBACK_RGB))
        .collect();
    bytemuck::cast_slice(&per_vertex).to_vec()
}

fn config_from(voxel_size: f32, origin: [f32; 3], y_up: bool) -> MesherConfig {
    MesherConfig {
        voxel_size,
        origin,
        up_axis: if y_up { UpAxis::Y } else { UpAxis::Z },
        ..Default::default()
    }
}

fn load(text: &str, config: &MesherConfig) -> Result<(VoxelModel, ParseReport), MeshError> {
    config.validate()?;
    VoxelModel::parse(text, config)
}

fn to_js(err: MeshError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Mesh voxel model text into optimized geometry.
///
/// Each line of `text` is `x y z color`; `#` lines are comments.
///
/// # Arguments
/// * `text` - Model text
/// * `voxel_size` - Size of each voxel in world units
/// * `origin_x`, `origin_y`, `origin_z` - World position offset
/// * `y_up` - Swap y and z for Y-up scenes
///
/// # Example (JavaScript)
/// ```javascript
/// const result = mesh_voxel_text("0 0 0 ff0000\n1 0 0 00ff00", 1.0, 0.0, 0.0, 0.0, true);
/// geometry.setAttribute("color", new THREE.BufferAttribute(result.colors, 3));
/// ```
#[wasm_bindgen]
pub fn mesh_voxel_text(
    text: &str,
    voxel_size: f32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
    y_up: bool,
) -> Result<MeshResult, JsValue> {
    let config = config_from(voxel_size, [origin_x, origin_y, origin_z], y_up);
    let (model, report) = load(text, &config).map_err(to_js)?;
    let output = mesh_model(&model, &config).map_err(to_js)?;
    Ok(MeshResult::new(output, &report))
}

/// Mesh statistics for debugging.
#[wasm_bindgen]
pub struct MeshStats {
    quad_count: usize,
    vertex_count: usize,
    triangle_count: usize,
    merge_efficiency: f32,
}

#[wasm_bindgen]
impl MeshStats {
    #[wasm_bindgen(getter)]
    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    #[wasm_bindgen(getter)]
    pub fn merge_efficiency(&self) -> f32 {
        self.merge_efficiency
    }
}

impl From<quad_mesher::MeshStats> for MeshStats {
    fn from(stats: quad_mesher::MeshStats) -> Self {
        Self {
            quad_count: stats.quad_count,
            vertex_count: stats.vertex_count,
            triangle_count: stats.triangle_count,
            merge_efficiency: stats.merge_efficiency,
        }
    }
}

/// Mesh voxel model text and return `[MeshResult, MeshStats]`.
#[wasm_bindgen]
pub fn mesh_voxel_text_with_stats(
    text: &str,
    voxel_size: f32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
    y_up: bool,
) -> Result<js_sys::Array, JsValue> {
    let config = config_from(voxel_size, [origin_x, origin_y, origin_z], y_up);
    let (model, report) = load(text, &config).map_err(to_js)?;
    let (output, stats) = mesh_model_with_stats(&model, &config).map_err(to_js)?;

    let result = js_sys::Array::new();
    result.push(&JsValue::from(MeshResult::new(output, &report)));
    result.push(&JsValue::from(MeshStats::from(stats)));
    Ok(result)
}

/// Debug output for greedy mesh visualization.
///
/// Contains the mesh, wireframe lines, per-vertex colors, and statistics.
#[wasm_bindgen]
pub struct MeshDebugResult {
    // Mesh data
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    colors: Vec<f32>,
    // Wireframe line positions (pairs of xyz endpoints)
    wire_positions: Vec<f32>,
    // Per-vertex colors for face direction visualization
    face_colors: Vec<f32>,
    // Stats
    quad_count: usize,
    max_possible_quads: usize,
    merge_efficiency: f32,
    triangle_reduction: f32,
    // Per-direction counts: [-Z, +Z, -Y, +Y, -X, +X]
    dir_quad_counts: [usize; 6],
    dir_face_counts: [usize; 6],
}

#[wasm_bindgen]
impl MeshDebugResult {
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f32> { self.positions.clone() }

    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> Vec<f32> { self.normals.clone() }

    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> { self.indices.clone() }

    #[wasm_bindgen(getter)]
    pub fn colors(&self) -> Vec<f32> { self.colors.clone() }

    #[wasm_bindgen(getter)]
    pub fn wire_positions(&self) -> Vec<f32> { self.wire_positions.clone() }

    #[wasm_bindgen(getter)]
    pub fn face_colors(&self) -> Vec<f32> { self.face_colors.clone() }

    #[wasm_bindgen(getter)]
    pub fn quad_count(&self) -> usize { self.quad_count }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize { self.positions.len() / 3 }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize { self.indices.len() / 3 }

    #[wasm_bindgen(getter)]
    pub fn max_possible_quads(&self) -> usize { self.max_possible_quads }

    #[wasm_bindgen(getter)]
    pub fn merge_efficiency(&self) -> f32 { self.merge_efficiency }

    #[wasm_bindgen(getter)]
    pub fn triangle_reduction(&self) -> f32 { self.triangle_reduction }

    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool { self.indices.is_empty() }

    /// Get per-direction quad counts as [-Z, +Z, -Y, +Y, -X, +X].
    #[wasm_bindgen(getter)]
    pub fn dir_quad_counts(&self) -> Vec<usize> { self.dir_quad_counts.to_vec() }

    /// Get per-direction face counts as [-Z, +Z, -Y, +Y, -X, +X].
    #[wasm_bindgen(getter)]
    pub fn dir_face_counts(&self) -> Vec<usize> { self.dir_face_counts.to_vec() }
}

fn debug_result(text: &str, config: &MesherConfig) -> Result<MeshDebugResult, MeshError> {
    let (model, _report) = load(text, config)?;
    let output = mesh_model_debug(&model, config)?;
    let colors = vertex_rgb(&output.mesh);

    Ok(MeshDebugResult {
        positions: output.mesh.positions,
        normals: output.mesh.normals,
        indices: output.mesh.indices,
        colors,
        wire_positions: output.debug.line_positions,
        face_colors: output.debug.face_colors,
        quad_count: output.stats.quad_count,
        max_possible_quads: output.stats.max_possible_quads,
        merge_efficiency: output.stats.merge_efficiency,
        triangle_reduction: output.direction_stats.triangle_reduction,
        dir_quad_counts: output.direction_stats.quad_counts,
        dir_face_counts: output.direction_stats.face_counts,
    })
}

/// Mesh voxel model text with full debug output.
///
/// Returns mesh geometry, wireframe lines for quad boundaries,
/// per-vertex face direction colors, and detailed statistics.
#[wasm_bindgen]
pub fn mesh_voxel_text_debug(
    text: &str,
    voxel_size: f32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
    y_up: bool,
) -> Result<MeshDebugResult, JsValue> {
    let config = config_from(voxel_size, [origin_x, origin_y, origin_z], y_up);
    debug_result(text, &config).map_err(to_js)
}

/// Resolve a color key to `[r, g, b]` in [0, 1], or an empty array.
#[wasm_bindgen]
pub fn color_to_rgb(key: &str) -> Vec<f32> {
    parse_hex_rgb(key).map(|rgb| rgb.to_vec()).unwrap_or_default()
}

// Logging support

/// Route `log` output to the browser console and install the panic hook.
///
/// Safe to call more than once; later calls only adjust the level.
#[wasm_bindgen]
pub fn init_logging(verbose: bool) {
    console_error_panic_hook::set_once();
    let level = if verbose { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    } else {
        info!("quad mesher {} logging to console", get_version());
    }
}

/// Enable or disable console logging.
#[wasm_bindgen]
pub fn set_log_enabled(enabled: bool) {
    log::set_max_level(if enabled { LevelFilter::Info } else { LevelFilter::Off });
}

/// Get the version of the mesher library.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
