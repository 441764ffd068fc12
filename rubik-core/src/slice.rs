/// Slice identifiers and on-demand slice membership
use smallvec::SmallVec;
use strum::{Display, EnumString, IntoEnumIterator};

use crate::error::InvalidSliceError;
use crate::grid::{Axis, MAX_LAYER};
use crate::registry::{CubieId, CubieRegistry};

/// Cubies in one slice.
pub type SliceMembers = SmallVec<[CubieId; 9]>;

/// A layer of 9 cubies perpendicular to a world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slice {
    pub axis: Axis,
    pub layer: u8,
}

impl Slice {
    pub fn new(axis: Axis, layer: u8) -> Result<Self, InvalidSliceError> {
        if layer > MAX_LAYER {
            return Err(InvalidSliceError::LayerOutOfRange(layer));
        }
        Ok(Self { axis, layer })
    }

    /// All 9 slices, axis by axis.
    pub fn all() -> impl Iterator<Item = Slice> {
        Axis::iter().flat_map(|axis| (0..=MAX_LAYER).map(move |layer| Slice { axis, layer }))
    }

    /// Human-readable name of the layer, e.g. `"right"` or `"equator"`.
    pub fn name(self) -> &'static str {
        const NAMES: [[&str; 3]; 3] = [
            ["left", "middle", "right"],
            ["bottom", "equator", "top"],
            ["back", "standing", "front"],
        ];
        NAMES[self.axis.index()][self.layer as usize]
    }

    /// Keyboard letter conventionally associated with the slice.
    pub fn key(self) -> char {
        const KEYS: [[char; 3]; 3] = [['l', 'm', 'r'], ['d', 'e', 'u'], ['b', 's', 'f']];
        KEYS[self.axis.index()][self.layer as usize]
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.axis, self.layer)
    }
}

/// Which slices are exposed as rotation commands.
#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq, Default)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Wiring {
    /// Left, middle, and right along X plus the top layer along Y.
    Classic,
    /// All 9 slices.
    #[default]
    Full,
}

impl Wiring {
    pub fn includes(self, slice: Slice) -> bool {
        match self {
            Wiring::Full => true,
            Wiring::Classic => slice.axis == Axis::X || slice == Slice { axis: Axis::Y, layer: 2 },
        }
    }

    pub fn slices(self) -> impl Iterator<Item = Slice> {
        Slice::all().filter(move |&s| self.includes(s))
    }
}

/// Derives slice membership from the registry's live coordinates.
///
/// Nothing is cached; every query scans the registry as it is now.
#[derive(Debug, Clone, Copy)]
pub struct SliceIndex<'a> {
    registry: &'a CubieRegistry,
}

impl<'a> SliceIndex<'a> {
    pub fn new(registry: &'a CubieRegistry) -> Self {
        Self { registry }
    }

    /// Cubies whose coordinate along `axis` equals `layer`.
    pub fn members_of(&self, axis: Axis, layer: u8) -> Result<SliceMembers, InvalidSliceError> {
        let slice = Slice::new(axis, layer)?;
        Ok(self.members(slice))
    }

    pub fn members(&self, slice: Slice) -> SliceMembers {
        self.registry
            .cubies()
            .iter()
            .filter(|c| c.coord.along(slice.axis) == slice.layer)
            .map(|c| c.id)
            .collect()
    }
}
