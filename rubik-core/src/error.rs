/// Error types for slice selection and rotation
use thiserror::Error;

use crate::grid::Axis;

/// Error produced when a slice argument does not name a turnable slice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSliceError {
    /// Layer index outside `0..=2`
    #[error("layer {0} is out of range (expected 0, 1, or 2)")]
    LayerOutOfRange(u8),
    /// Slice exists on the cube but is not wired to any command
    #[error("slice {axis} layer {layer} is not wired")]
    NotWired { axis: Axis, layer: u8 },
    /// Slice membership came back empty
    ///
    /// This can only happen if the registry partition is broken.
    #[error("slice {axis} layer {layer} has no members")]
    EmptySlice { axis: Axis, layer: u8 },
    /// Axis name that is not `x`, `y`, or `z`
    #[error("unknown axis {0:?}")]
    UnknownAxis(String),
}

/// Error produced by an operation on the cube.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error(transparent)]
    InvalidSlice(#[from] InvalidSliceError),
    /// A registry invariant failed; nothing was committed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error("no turn to undo")]
    NothingToUndo,
}

pub type Result<T, E = CubeError> = std::result::Result<T, E>;
