/// A puzzle instance: registry, rotation engine, and turn history
use crate::config::CubeConfig;
use crate::error::{CubeError, Result};
use crate::geometry::FaceColors;
use crate::grid::{Axis, Direction};
use crate::picking::{self, PickHit, Ray};
use crate::registry::{CubieId, CubieRegistry};
use crate::rotation::{RotationEngine, RotationReport};
use crate::slice::{Slice, SliceIndex, SliceMembers, Wiring};
use crate::transform::CubieTransform;

/// A turn that has been applied to the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub slice: Slice,
    pub direction: Direction,
}

impl Turn {
    pub fn inverse(self) -> Self {
        Self {
            slice: self.slice,
            direction: self.direction.inverse(),
        }
    }
}

/// A 3x3x3 puzzle.
///
/// All mutation goes through `&mut self`, so a turn is applied as a single
/// unit. Share it across threads behind one lock if that is ever needed.
#[derive(Debug, Clone)]
pub struct Puzzle {
    config: CubeConfig,
    registry: CubieRegistry,
    engine: RotationEngine,
    history: Vec<Turn>,
}

impl Puzzle {
    pub fn new(config: CubeConfig) -> Self {
        Self {
            config,
            registry: CubieRegistry::new(config.layout()),
            engine: RotationEngine::new(config.wiring),
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &CubeConfig {
        &self.config
    }

    pub fn wiring(&self) -> Wiring {
        self.engine.wiring()
    }

    pub fn registry(&self) -> &CubieRegistry {
        &self.registry
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn is_solved(&self) -> bool {
        self.registry.is_solved()
    }

    /// Current members of the slice at (`axis`, `layer`).
    pub fn members_of(&self, axis: Axis, layer: u8) -> Result<SliceMembers> {
        Ok(SliceIndex::new(&self.registry).members_of(axis, layer)?)
    }

    /// Turns a slice and records the turn.
    pub fn rotate(&mut self, axis: Axis, layer: u8, direction: Direction) -> Result<RotationReport> {
        let report = self.engine.rotate(&mut self.registry, axis, layer, direction)?;
        self.history.push(Turn {
            slice: report.slice,
            direction,
        });
        Ok(report)
    }

    /// Reverts the most recent turn.
    pub fn undo(&mut self) -> Result<RotationReport> {
        let turn = self.history.last().copied().ok_or(CubeError::NothingToUndo)?;
        let inverse = turn.inverse();
        let report = self.engine.rotate(
            &mut self.registry,
            inverse.slice.axis,
            inverse.slice.layer,
            inverse.direction,
        )?;
        self.history.pop();
        Ok(report)
    }

    /// Returns to the solved state and clears the history.
    pub fn reset(&mut self) {
        self.registry = CubieRegistry::new(self.config.layout());
        self.history.clear();
    }

    /// Nearest cubie hit by `ray`, if any.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        picking::pick(&self.registry, ray)
    }

    pub fn for_each_cubie(&self, f: impl FnMut(CubieId, &CubieTransform, &FaceColors)) {
        self.registry.for_each_cubie(f);
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new(CubeConfig::default())
    }
}
