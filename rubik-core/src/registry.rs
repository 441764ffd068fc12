/// Cubie identities, grid coordinates, and transforms
use std::collections::HashSet;

use crate::error::{CubeError, Result};
use crate::geometry::FaceColors;
use crate::grid::GridCoord;
use crate::transform::{CubieTransform, GridLayout};

/// Number of cubies in a 3x3x3 puzzle.
pub const CUBIE_COUNT: usize = 27;

/// Stable identity of a cubie.
///
/// Assigned at creation from the cubie's home coordinate and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(pub u8);

impl CubieId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CubieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single unit cube of the puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    pub id: CubieId,
    pub home: GridCoord,
    pub coord: GridCoord,
    pub transform: CubieTransform,
    pub colors: FaceColors,
}

/// Owns the state of all 27 cubies.
///
/// Coordinates and transforms can only be changed from inside the crate;
/// the rotation engine is the only writer.
#[derive(Debug, Clone, PartialEq)]
pub struct CubieRegistry {
    layout: GridLayout,
    cubies: Vec<Cubie>,
}

impl CubieRegistry {
    /// Creates the solved cube: one cubie per grid coordinate, in
    /// enumeration order.
    pub fn new(layout: GridLayout) -> Self {
        let cubies = GridCoord::all()
            .enumerate()
            .map(|(i, coord)| Cubie {
                id: CubieId(i as u8),
                home: coord,
                coord,
                transform: layout.home_transform(coord),
                colors: FaceColors::STANDARD,
            })
            .collect();
        Self { layout, cubies }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.cubies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubies.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CubieId> + '_ {
        self.cubies.iter().map(|c| c.id)
    }

    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    pub fn get(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.get(id.index())
    }

    pub fn coordinate(&self, id: CubieId) -> Option<GridCoord> {
        self.get(id).map(|c| c.coord)
    }

    pub fn transform(&self, id: CubieId) -> Option<&CubieTransform> {
        self.get(id).map(|c| &c.transform)
    }

    /// Cubie currently sitting at `coord`.
    pub fn at(&self, coord: GridCoord) -> Option<&Cubie> {
        self.cubies.iter().find(|c| c.coord == coord)
    }

    /// Visits every cubie for drawing.
    pub fn for_each_cubie(&self, mut f: impl FnMut(CubieId, &CubieTransform, &FaceColors)) {
        for cubie in &self.cubies {
            f(cubie.id, &cubie.transform, &cubie.colors);
        }
    }

    pub(crate) fn set_transform(&mut self, id: CubieId, transform: CubieTransform) {
        self.cubies[id.index()].transform = transform;
    }

    pub(crate) fn set_coordinate(&mut self, id: CubieId, coord: GridCoord) {
        self.cubies[id.index()].coord = coord;
    }

    /// Whether every cubie is at its home coordinate with its home
    /// orientation.
    pub fn is_solved(&self) -> bool {
        self.cubies.iter().all(|c| {
            c.coord == c.home && *c.transform.rotation.matrix() == nalgebra::Matrix3::identity()
        })
    }

    /// Checks that there are 27 cubies with pairwise distinct coordinates.
    pub fn check_invariants(&self) -> Result<()> {
        check_coordinates(self.cubies.iter().map(|c| c.coord))
    }
}

impl Default for CubieRegistry {
    fn default() -> Self {
        Self::new(GridLayout::default())
    }
}

/// Checks that `coords` covers the whole grid exactly once.
pub(crate) fn check_coordinates(coords: impl IntoIterator<Item = GridCoord>) -> Result<()> {
    let mut seen = HashSet::with_capacity(CUBIE_COUNT);
    let mut count = 0;
    for coord in coords {
        count += 1;
        if !seen.insert(coord) {
            return Err(CubeError::InvariantViolation(format!(
                "two cubies share coordinate {coord}"
            )));
        }
    }
    if count != CUBIE_COUNT {
        return Err(CubeError::InvariantViolation(format!(
            "expected {CUBIE_COUNT} cubies, found {count}"
        )));
    }
    Ok(())
}
