//! Sweep axes and face orientation.
//!
//! Each sweep axis has one [`AxisDescriptor`] that maps mask space
//! (horizontal, vertical, depth) onto model space (x, y, z). Mask generation
//! and quad projection both read it, so the permutation lives in one place.
//!
//! | axis | depth | horizontal | vertical |
//! |------|-------|------------|----------|
//! | Z    | z     | x          | y        |
//! | Y    | y     | x          | z        |
//! | X    | x     | y          | z        |

/// Model-space axis indices.
pub const AXIS_X: usize = 0;
pub const AXIS_Y: usize = 1;
pub const AXIS_Z: usize = 2;

/// The grid dimension treated as depth for a family of masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepAxis {
    Z,
    Y,
    X,
}

/// Which of the two neighbors along the sweep axis is tested.
///
/// `Negative` exposes faces looking toward decreasing depth, `Positive`
/// faces looking toward increasing depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Negative,
    Positive,
}

/// Mask-space to model-space permutation for one sweep axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDescriptor {
    pub depth: usize,
    pub horizontal: usize,
    pub vertical: usize,
}

impl SweepAxis {
    /// Sweep order used by the pipeline.
    pub const ALL: [SweepAxis; 3] = [SweepAxis::Z, SweepAxis::Y, SweepAxis::X];

    pub const fn descriptor(self) -> AxisDescriptor {
        match self {
            SweepAxis::Z => AxisDescriptor { depth: AXIS_Z, horizontal: AXIS_X, vertical: AXIS_Y },
            SweepAxis::Y => AxisDescriptor { depth: AXIS_Y, horizontal: AXIS_X, vertical: AXIS_Z },
            SweepAxis::X => AxisDescriptor { depth: AXIS_X, horizontal: AXIS_Y, vertical: AXIS_Z },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SweepAxis::Z => "z",
            SweepAxis::Y => "y",
            SweepAxis::X => "x",
        }
    }
}

impl Facing {
    pub const ALL: [Facing; 2] = [Facing::Negative, Facing::Positive];

    /// Step toward the tested neighbor along the depth axis.
    #[inline]
    pub const fn step(self) -> i64 {
        match self {
            Facing::Negative => -1,
            Facing::Positive => 1,
        }
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Facing::Positive)
    }
}

impl AxisDescriptor {
    /// Place mask-space components into a model-space triple.
    #[inline]
    pub fn compose<T: Copy + Default>(&self, horizontal: T, vertical: T, depth: T) -> [T; 3] {
        let mut out = [T::default(); 3];
        out[self.horizontal] = horizontal;
        out[self.vertical] = vertical;
        out[self.depth] = depth;
        out
    }

    /// Whether `horizontal × vertical` points along `+depth`.
    ///
    /// True for even (cyclic) permutations of x, y, z. Corners listed in
    /// mask order `(0,0) (1,0) (1,1) (0,1)` are counter-clockwise seen from
    /// `+depth` exactly when this holds.
    pub fn is_right_handed(&self) -> bool {
        (self.horizontal + 1) % 3 == self.vertical && (self.vertical + 1) % 3 == self.depth
    }
}

/// One of the six face directions: a sweep axis plus a facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub axis: SweepAxis,
    pub facing: Facing,
}

impl Face {
    /// All faces in sweep order: Z-, Z+, Y-, Y+, X-, X+.
    pub const ALL: [Face; 6] = [
        Face { axis: SweepAxis::Z, facing: Facing::Negative },
        Face { axis: SweepAxis::Z, facing: Facing::Positive },
        Face { axis: SweepAxis::Y, facing: Facing::Negative },
        Face { axis: SweepAxis::Y, facing: Facing::Positive },
        Face { axis: SweepAxis::X, facing: Facing::Negative },
        Face { axis: SweepAxis::X, facing: Facing::Positive },
    ];

    pub const fn new(axis: SweepAxis, facing: Facing) -> Self {
        Self { axis, facing }
    }

    /// Position in [`Face::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        let axis = match self.axis {
            SweepAxis::Z => 0,
            SweepAxis::Y => 1,
            SweepAxis::X => 2,
        };
        axis * 2 + self.facing.is_positive() as usize
    }

    /// Outward unit normal in model space.
    pub fn normal(self) -> [f32; 3] {
        let mut n = [0.0; 3];
        n[self.axis.descriptor().depth] = self.facing.step() as f32;
        n
    }

    /// Whether the mask-order corner winding already faces outward.
    ///
    /// The Y sweep maps (x, z) onto the mask plane, an odd permutation, so
    /// its parity is inverted relative to the Z and X sweeps.
    pub fn natural_winding_is_outward(self) -> bool {
        self.axis.descriptor().is_right_handed() == self.facing.is_positive()
    }

    pub fn label(self) -> String {
        let sign = if self.facing.is_positive() { '+' } else { '-' };
        format!("{sign}{}", self.axis.name().to_ascii_uppercase())
    }
}
