//! Greedy quad meshing for sparse colored voxel models.
//!
//! A model is a list of `x y z color` records. The crate builds a dense
//! grid over the model's bounding box, finds the visible faces of every
//! slice along each axis, merges same-colored faces into rectangles and
//! projects those rectangles to triangles for a renderer.
//!
//! # Example
//!
//! ```
//! use quad_mesher::{mesh_text, MesherConfig};
//!
//! // A 2x1x1 bar
//! let text = "0 0 0 ff0000\n1 0 0 ff0000\n";
//! let mesh = mesh_text(text, &MesherConfig::default()).unwrap();
//! assert_eq!(mesh.triangle_count(), 12); // Box = 6 quads × 2 triangles
//! assert!(mesh.triangles().all(|t| t.color == "ff0000"));
//! ```

pub mod axis;
pub mod config;
pub mod core;
pub mod cull;
pub mod debug;
pub mod error;
pub mod expand;
pub mod grid;
pub mod merge;
pub mod mesh;
pub mod palette;
pub mod parse;

// Re-export primary types
pub use crate::axis::{AxisDescriptor, Face, Facing, SweepAxis};
pub use crate::config::{BoundsPolicy, CoordinateRounding, MesherConfig, UpAxis};
pub use crate::core::{MeshOutput, Triangle};
pub use crate::error::{MeshError, RecordFault, Result};
pub use crate::grid::{BoundingBox, Voxel, VoxelGrid, VoxelModel, MAX_GRID_CELLS};
pub use crate::merge::Quad;
pub use crate::palette::{parse_hex_rgb, ColorId, Palette};
pub use crate::parse::{ParseReport, VoxelRecord};

// Re-export main entry points
pub use crate::mesh::{
    mesh_model, mesh_model_cancellable, mesh_model_debug, mesh_model_naive, mesh_model_with_stats,
    mesh_text, MeshDebugOutput, MeshStats,
};
