//! Face visibility masks.
//!
//! A face is visible if the voxel is filled AND its neighbor in the facing
//! direction is empty. Any filled neighbor hides the face regardless of its
//! color, so boundaries between two solid colors are never emitted.
//!
//! Neighbors outside the bounding box count as empty.

use crate::axis::{Face, Facing, SweepAxis};
use crate::grid::{Voxel, VoxelModel};

/// 2D slice of visible faces for one (axis, depth, facing).
///
/// Stored row-major by the vertical coordinate: `cells[v * width + h]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<Voxel>,
}

impl Mask {
    /// An all-empty mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Voxel::Empty; width * height],
        }
    }

    /// Build a mask from rows of palette ids, `0` meaning empty: `rows[v][h]`.
    pub fn from_rows<const W: usize>(rows: &[[u32; W]]) -> Self {
        let mut mask = Self::new(W, rows.len());
        for (v, row) in rows.iter().enumerate() {
            for (h, &id) in row.iter().enumerate() {
                if id != 0 {
                    mask.set(h, v, Voxel::Filled(id));
                }
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, h: usize, v: usize) -> Voxel {
        debug_assert!(h < self.width && v < self.height, "mask cell out of range");
        self.cells[v * self.width + h]
    }

    #[inline]
    pub fn set(&mut self, h: usize, v: usize, voxel: Voxel) {
        debug_assert!(h < self.width && v < self.height, "mask cell out of range");
        self.cells[v * self.width + h] = voxel;
    }

    /// Number of visible cells.
    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }
}

/// Visibility mask for one slice.
///
/// `depth` is an absolute model coordinate along `axis`. The mask spans the
/// bounding box on the other two axes, with `(0, 0)` at the box origin.
pub fn get_mask(model: &VoxelModel, axis: SweepAxis, depth: i64, facing: Facing) -> Mask {
    let grid = model.grid();
    let bounds = grid.bounds();
    let desc = axis.descriptor();
    let h_range = bounds.range(desc.horizontal);
    let v_range = bounds.range(desc.vertical);

    let mut mask = Mask::new(bounds.extent[desc.horizontal], bounds.extent[desc.vertical]);

    for (v, vc) in v_range.enumerate() {
        for (h, hc) in h_range.clone().enumerate() {
            let [x, y, z] = desc.compose(hc, vc, depth);
            let voxel = grid.get(x, y, z);
            if voxel.is_empty() {
                continue;
            }
            let [nx, ny, nz] = desc.compose(hc, vc, depth + facing.step());
            let neighbor = grid.get(nx, ny, nz);
            if neighbor.is_empty() {
                mask.set(h, v, voxel);
            }
        }
    }

    mask
}

/// Visible (unmerged) face count per face direction, in [`Face::ALL`] order.
pub fn count_visible_faces(model: &VoxelModel) -> [usize; 6] {
    let mut counts = [0usize; 6];
    for face in Face::ALL {
        let depth_axis = face.axis.descriptor().depth;
        for depth in model.bounds().range(depth_axis) {
            counts[face.index()] += get_mask(model, face.axis, depth, face.facing).visible_count();
        }
    }
    counts
}
