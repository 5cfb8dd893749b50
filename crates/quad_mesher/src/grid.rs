//! Dense voxel grid built from sparse records.
//!
//! The grid is a flat buffer sized to the model's bounding box. Cells are
//! addressed with absolute model coordinates; [`VoxelGrid::index`] is the only
//! place that turns them into buffer offsets.
//!
//! Flattening order (bbox-relative coordinates):
//! `index = y * width + x + z * width * height`

use log::{debug, info};

use crate::config::{BoundsPolicy, MesherConfig};
use crate::error::{MeshError, Result};
use crate::palette::{ColorId, Palette};

/// Largest dense grid a model may allocate (64 Mi cells, 512 MiB).
pub const MAX_GRID_CELLS: usize = 1 << 26;
use crate::parse::{parse_text, ParseReport, VoxelRecord};

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Voxel {
    #[default]
    Empty,
    Filled(ColorId),
}

impl Voxel {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Voxel::Empty)
    }

    #[inline]
    pub fn color(self) -> Option<ColorId> {
        match self {
            Voxel::Empty => None,
            Voxel::Filled(id) => Some(id),
        }
    }
}

/// Axis-aligned integer box: `[origin, origin + extent)` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub origin: [i32; 3],
    /// Width (x), height (y), depth (z). Each is at least 1.
    pub extent: [usize; 3],
}

impl BoundingBox {
    /// The 1×1×1 box at the origin used for empty models.
    pub const UNIT: BoundingBox = BoundingBox { origin: [0; 3], extent: [1; 3] };

    /// Inclusive min/max per axis over all records, plus one.
    pub fn from_records(records: &[VoxelRecord], policy: BoundsPolicy) -> Self {
        let (mut min, mut max) = match (policy, records.first()) {
            (BoundsPolicy::Tight, Some(first)) => (first.position(), first.position()),
            (BoundsPolicy::Tight, None) => return Self::UNIT,
            (BoundsPolicy::IncludeOrigin, _) => ([0; 3], [0; 3]),
        };

        for record in records {
            let p = record.position();
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }

        // Spans reach 2^32, which saturates on 32-bit targets.
        let extent = [0, 1, 2].map(|axis| {
            let span = max[axis] as i64 - min[axis] as i64 + 1;
            usize::try_from(span).unwrap_or(usize::MAX)
        });
        Self { origin: min, extent }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.extent[0]
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.extent[1]
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.extent[2]
    }

    /// Cell count, or `None` if it overflows `usize`.
    pub fn volume(&self) -> Option<usize> {
        self.extent.iter().try_fold(1usize, |acc, &e| acc.checked_mul(e))
    }

    /// Half-open range of absolute coordinates covered on `axis`.
    pub fn range(&self, axis: usize) -> std::ops::Range<i64> {
        let start = self.origin[axis] as i64;
        start..start + self.extent[axis] as i64
    }

    pub fn contains(&self, p: [i64; 3]) -> bool {
        (0..3).all(|axis| self.range(axis).contains(&p[axis]))
    }
}

/// Flat, explicitly dimensioned voxel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    bounds: BoundingBox,
    cells: Vec<Voxel>,
}

impl VoxelGrid {
    /// An all-empty grid covering `bounds`.
    ///
    /// Fails with [`MeshError::ModelTooLarge`] past [`MAX_GRID_CELLS`].
    pub fn new(bounds: BoundingBox) -> Result<Self> {
        let volume = bounds
            .volume()
            .filter(|&v| v <= MAX_GRID_CELLS)
            .ok_or(MeshError::ModelTooLarge { extent: bounds.extent, max: MAX_GRID_CELLS })?;
        Ok(Self {
            bounds,
            cells: vec![Voxel::Empty; volume],
        })
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Buffer offset of an absolute coordinate.
    ///
    /// Every coordinate outside the bounding box yields
    /// [`MeshError::CoordinateOutOfBounds`]; callers decide what that means.
    #[inline]
    pub fn index(&self, x: i64, y: i64, z: i64) -> Result<usize> {
        let [w, h, d] = self.bounds.extent;
        let rx = x - self.bounds.origin[0] as i64;
        let ry = y - self.bounds.origin[1] as i64;
        let rz = z - self.bounds.origin[2] as i64;
        if rx < 0 || ry < 0 || rz < 0 || rx >= w as i64 || ry >= h as i64 || rz >= d as i64 {
            return Err(MeshError::CoordinateOutOfBounds { x, y, z });
        }
        let (rx, ry, rz) = (rx as usize, ry as usize, rz as usize);
        Ok(ry * w + rx + rz * w * h)
    }

    /// Cell at an absolute coordinate; outside the box reads as empty.
    #[inline]
    pub fn get(&self, x: i64, y: i64, z: i64) -> Voxel {
        match self.index(x, y, z) {
            Ok(i) => self.cells[i],
            Err(_) => Voxel::Empty,
        }
    }

    pub fn set(&mut self, x: i64, y: i64, z: i64, voxel: Voxel) -> Result<()> {
        let i = self.index(x, y, z)?;
        self.cells[i] = voxel;
        Ok(())
    }

    /// Raw cells in flattening order.
    pub fn cells(&self) -> &[Voxel] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|v| !v.is_empty()).count()
    }
}

/// Immutable snapshot of a parsed model: bounds, palette and dense grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelModel {
    palette: Palette,
    grid: VoxelGrid,
}

impl VoxelModel {
    /// Build the grid and palette from parsed records.
    ///
    /// A record at an already-filled coordinate overwrites the earlier one.
    /// Zero records produce the 1×1×1 empty grid.
    pub fn from_records(records: &[VoxelRecord], config: &MesherConfig) -> Result<Self> {
        let bounds = BoundingBox::from_records(records, config.bounds);
        let mut palette = Palette::new();
        let mut grid = VoxelGrid::new(bounds)?;

        for record in records {
            let id = palette.intern(&record.color)?;
            grid.set(record.x as i64, record.y as i64, record.z as i64, Voxel::Filled(id))?;
        }

        if records.is_empty() {
            info!("{}", MeshError::EmptyModel);
        }
        debug!(
            "voxel model: origin {:?} extent {:?}, {} records, {} colors",
            bounds.origin,
            bounds.extent,
            records.len(),
            palette.len()
        );

        Ok(Self { palette, grid })
    }

    /// Parse model text and build it. Skipped lines are returned in the report.
    pub fn parse(text: &str, config: &MesherConfig) -> Result<(Self, ParseReport)> {
        let report = parse_text(text, config.rounding);
        let model = Self::from_records(&report.records, config)?;
        Ok((model, report))
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        self.grid.bounds()
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    pub fn filled_count(&self) -> usize {
        self.grid.filled_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(points: &[[i32; 3]]) -> Vec<VoxelRecord> {
        points
            .iter()
            .map(|&[x, y, z]| VoxelRecord::new(x, y, z, "ffffff"))
            .collect()
    }

    fn include_origin() -> MesherConfig {
        MesherConfig { bounds: BoundsPolicy::IncludeOrigin, ..Default::default() }
    }

    #[test]
    fn single_record_model() {
        let (model, _) = VoxelModel::parse("0 0 0 ff0000", &MesherConfig::default()).unwrap();

        assert_eq!(model.bounds().extent, [1, 1, 1]);
        assert_eq!(model.palette().len(), 1);
        assert_eq!(model.palette().get(1), Some("ff0000"));
        assert_eq!(model.grid().get(0, 0, 0), Voxel::Filled(1));
    }

    #[test]
    fn empty_input_is_degenerate_unit_grid() {
        for config in [MesherConfig::default(), include_origin()] {
            let (model, _) = VoxelModel::parse("# nothing here\n", &config).unwrap();
            assert!(model.is_empty());
            assert_eq!(*model.bounds(), BoundingBox::UNIT);
            assert_eq!(model.grid().cells(), &[Voxel::Empty]);
        }
    }

    #[test]
    fn tight_bounds_hug_the_voxels() {
        let bounds = BoundingBox::from_records(&records(&[[5, 6, 7], [8, 6, 9]]), BoundsPolicy::Tight);
        assert_eq!(bounds.origin, [5, 6, 7]);
        assert_eq!(bounds.extent, [4, 1, 3]);
    }

    #[test]
    fn include_origin_bounds_stretch_to_zero() {
        let bounds =
            BoundingBox::from_records(&records(&[[5, 6, 7], [8, 6, 9]]), BoundsPolicy::IncludeOrigin);
        assert_eq!(bounds.origin, [0, 0, 0]);
        assert_eq!(bounds.extent, [9, 7, 10]);

        let negative =
            BoundingBox::from_records(&records(&[[-3, -1, -2]]), BoundsPolicy::IncludeOrigin);
        assert_eq!(negative.origin, [-3, -1, -2]);
        assert_eq!(negative.extent, [4, 2, 3]);
    }

    #[test]
    fn every_record_lies_inside_its_bounds() {
        let recs = records(&[[-4, 2, 9], [3, -7, 0], [0, 0, 0], [11, 5, -5]]);
        for policy in [BoundsPolicy::Tight, BoundsPolicy::IncludeOrigin] {
            let bounds = BoundingBox::from_records(&recs, policy);
            for r in &recs {
                assert!(bounds.contains(r.position().map(i64::from)));
            }
        }
    }

    #[test]
    fn flattening_order_is_y_major_after_x() {
        let bounds = BoundingBox { origin: [10, 20, 30], extent: [3, 4, 5] };
        let grid = VoxelGrid::new(bounds).unwrap();

        assert_eq!(grid.index(10, 20, 30).unwrap(), 0);
        assert_eq!(grid.index(11, 20, 30).unwrap(), 1);
        assert_eq!(grid.index(10, 21, 30).unwrap(), 3);
        assert_eq!(grid.index(10, 20, 31).unwrap(), 12);
        assert_eq!(grid.index(12, 23, 34).unwrap(), 3 * 4 * 5 - 1);
    }

    #[test]
    fn out_of_bounds_index_is_an_error() {
        let grid = VoxelGrid::new(BoundingBox { origin: [0, 0, 0], extent: [2, 2, 2] }).unwrap();

        for p in [[-1, 0, 0], [0, -1, 0], [0, 0, -1], [2, 0, 0], [0, 2, 0], [0, 0, 2]] {
            assert_eq!(
                grid.index(p[0], p[1], p[2]),
                Err(MeshError::CoordinateOutOfBounds { x: p[0], y: p[1], z: p[2] })
            );
            assert_eq!(grid.get(p[0], p[1], p[2]), Voxel::Empty);
        }
    }

    #[test]
    fn later_record_overwrites_earlier() {
        let text = "1 1 1 aaaaaa\n1 1 1 bbbbbb\n";
        let (model, _) = VoxelModel::parse(text, &MesherConfig::default()).unwrap();

        assert_eq!(model.filled_count(), 1);
        assert_eq!(model.grid().get(1, 1, 1), Voxel::Filled(2));
        assert_eq!(model.palette().len(), 2);
    }

    #[test]
    fn bounds_policy_changes_grid_dimensions() {
        let text = "2 3 4 ff0000\n";
        let (tight, _) = VoxelModel::parse(text, &MesherConfig::default()).unwrap();
        let (loose, _) = VoxelModel::parse(text, &include_origin()).unwrap();

        assert_eq!(tight.bounds().extent, [1, 1, 1]);
        assert_eq!(loose.bounds().extent, [3, 4, 5]);
        assert_eq!(tight.grid().get(2, 3, 4), Voxel::Filled(1));
        assert_eq!(loose.grid().get(2, 3, 4), Voxel::Filled(1));
        assert_eq!(loose.grid().get(0, 0, 0), Voxel::Empty);
    }

    #[test]
    fn far_apart_voxels_are_rejected_not_allocated() {
        let text = "-2000000000 -2000000000 -2000000000 a\n2000000000 2000000000 2000000000 a\n";
        let err = VoxelModel::parse(text, &MesherConfig::default()).unwrap_err();
        assert!(matches!(err, MeshError::ModelTooLarge { max: MAX_GRID_CELLS, .. }), "{err:?}");

        // Fits in usize but is still far too big to allocate.
        let err = VoxelModel::parse("0 0 0 a\n2147483647 0 0 a\n", &MesherConfig::default())
            .unwrap_err();
        assert!(matches!(err, MeshError::ModelTooLarge { .. }), "{err:?}");

        let extreme = BoundingBox { origin: [0; 3], extent: [usize::MAX, 2, 1] };
        assert_eq!(extreme.volume(), None);
    }

    #[test]
    fn grid_limit_is_inclusive() {
        let at_limit = BoundingBox { origin: [0; 3], extent: [MAX_GRID_CELLS, 1, 1] };
        assert_eq!(at_limit.volume(), Some(MAX_GRID_CELLS));
        let over = BoundingBox { origin: [0; 3], extent: [MAX_GRID_CELLS + 1, 1, 1] };
        assert!(VoxelGrid::new(over).is_err());
    }

    #[test]
    fn malformed_lines_do_not_stop_the_build() {
        let text = "0 0 0 ff0000\n0 x 0 ff0000\n1 0 0 00ff00\n";
        let (model, report) = VoxelModel::parse(text, &MesherConfig::default()).unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(model.filled_count(), 2);
        assert_eq!(model.bounds().extent, [2, 1, 1]);
    }
}
