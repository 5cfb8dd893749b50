//! Error types for model parsing and meshing.
//!
//! Most of these are recoverable: the builders log them and carry on.
//! Only configuration errors and aborted passes reach the caller as `Err`.

use thiserror::Error;

/// Why a single input line could not become a voxel record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordFault {
    /// A record needs exactly `x y z color`.
    #[error("expected 4 tokens, found {0}")]
    TokenCount(usize),
    /// A coordinate token is not a number.
    #[error("coordinate {0:?} is not a number")]
    Coordinate(String),
    /// A coordinate is NaN, infinite, or does not fit the grid's integer range.
    #[error("coordinate {0:?} is out of range")]
    NonFinite(String),
}

/// Errors produced while building or meshing a voxel model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// An input line could not be parsed. The line is skipped.
    #[error("line {line}: {reason}")]
    MalformedRecord { line: usize, reason: RecordFault },

    /// A grid lookup fell outside the model's bounding box.
    #[error("coordinate ({x}, {y}, {z}) is outside the model bounds")]
    CoordinateOutOfBounds { x: i64, y: i64, z: i64 },

    /// The input held no parseable voxels.
    #[error("model contains no voxels")]
    EmptyModel,

    /// Mesher configuration failed validation.
    #[error("invalid mesher config: {0}")]
    InvalidConfig(String),

    /// The bounding box holds more cells than a dense grid may allocate.
    #[error("model bounds {extent:?} exceed the {max}-cell grid limit")]
    ModelTooLarge { extent: [usize; 3], max: usize },

    /// The model uses more distinct colors than a color id can address.
    #[error("palette overflow: more than {max} distinct colors")]
    PaletteOverflow { max: u64 },

    /// A cancellable meshing pass was stopped by the host.
    #[error("meshing aborted")]
    Aborted,
}

pub type Result<T> = std::result::Result<T, MeshError>;
