/// Rubik Core Library - Cubie state and slice rotation logic
///
/// This library holds the state of a 3x3x3 puzzle independent of any
/// renderer: the cubie registry, slice membership derived from live grid
/// coordinates, quarter-turn rotations, named commands, and picking.

pub mod commands;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod labels;
pub mod picking;
pub mod projection;
pub mod puzzle;
pub mod registry;
pub mod rotation;
pub mod slice;
pub mod transform;

// Re-export commonly used types
pub use commands::{Command, CommandTable, InteractionSurface};
pub use config::CubeConfig;
pub use error::{CubeError, InvalidSliceError};
pub use geometry::{Face, FaceColors, Mesh, StickerColor, Triangle, Vertex};
pub use grid::{Axis, Direction, GridCoord};
pub use labels::{face_labels, Label};
pub use picking::{PickHit, Ray};
pub use projection::{Camera, Orbit, ProjectionMode};
pub use puzzle::{Puzzle, Turn};
pub use registry::{Cubie, CubieId, CubieRegistry};
pub use rotation::{RotationEngine, RotationReport};
pub use slice::{Slice, SliceIndex, Wiring};
pub use transform::{CubieTransform, GridLayout, Transform};
