//! Mesher configuration.
//!
//! Every field has a default, so a partial TOML/JSON document deserializes
//! into a usable config.

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// How the bounding box min/max accumulators are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Seed from the first record: the box hugs the filled voxels.
    #[default]
    Tight,
    /// Seed at zero: the box always contains the coordinate origin,
    /// even when no voxel sits there.
    IncludeOrigin,
}

/// How fractional input coordinates map to integer cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateRounding {
    /// Cells are unit cubes centered on integers: round half away from zero.
    #[default]
    Nearest,
    /// Take the floor.
    Floor,
}

impl CoordinateRounding {
    /// Map a finite coordinate to its cell, or `None` if it does not fit an `i32`.
    pub fn apply(self, value: f64) -> Option<i32> {
        let cell = match self {
            Self::Nearest => value.round(),
            Self::Floor => value.floor(),
        };
        if cell.is_finite() && cell >= i32::MIN as f64 && cell <= i32::MAX as f64 {
            Some(cell as i32)
        } else {
            None
        }
    }
}

/// Which model axis points up in the emitted geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpAxis {
    /// Keep the model's own coordinates (voxel editors export Z-up).
    #[default]
    Z,
    /// Swap y and z for Y-up renderers.
    Y,
}

/// Options for building and meshing a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    pub bounds: BoundsPolicy,
    pub rounding: CoordinateRounding,
    pub up_axis: UpAxis,
    /// Edge length of one voxel in output units.
    pub voxel_size: f32,
    /// Translation applied after scaling.
    pub origin: [f32; 3],
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsPolicy::default(),
            rounding: CoordinateRounding::default(),
            up_axis: UpAxis::default(),
            voxel_size: 1.0,
            origin: [0.0; 3],
        }
    }
}

impl MesherConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.voxel_size.is_finite() || self.voxel_size <= 0.0 {
            return Err(MeshError::InvalidConfig(
                "voxel_size must be finite and > 0".into(),
            ));
        }
        if self.origin.iter().any(|c| !c.is_finite()) {
            return Err(MeshError::InvalidConfig("origin must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(MesherConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_voxel_size() {
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = MesherConfig { voxel_size: size, ..Default::default() };
            assert!(matches!(config.validate(), Err(MeshError::InvalidConfig(_))));
        }
    }

    #[test]
    fn rejects_non_finite_origin() {
        let config = MesherConfig { origin: [0.0, f32::NAN, 0.0], ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nearest_rounds_half_away_from_zero() {
        let r = CoordinateRounding::Nearest;
        assert_eq!(r.apply(2.4), Some(2));
        assert_eq!(r.apply(2.5), Some(3));
        assert_eq!(r.apply(-2.5), Some(-3));
        assert_eq!(r.apply(-0.4), Some(0));
    }

    #[test]
    fn floor_truncates_toward_negative_infinity() {
        let r = CoordinateRounding::Floor;
        assert_eq!(r.apply(2.9), Some(2));
        assert_eq!(r.apply(-0.1), Some(-1));
    }

    #[test]
    fn rounding_rejects_values_beyond_i32() {
        assert_eq!(CoordinateRounding::Nearest.apply(1e12), None);
        assert_eq!(CoordinateRounding::Floor.apply(-1e12), None);
    }
}
