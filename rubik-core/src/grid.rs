/// Discrete 3x3x3 grid coordinates and quarter-turn arithmetic
use nalgebra::{Unit, Vector3};
use strum::{Display, EnumIter, EnumString};

use crate::error::InvalidSliceError;

/// Number of layers along each axis.
pub const GRID_SIZE: u8 = 3;
/// Highest valid layer index.
pub const MAX_LAYER: u8 = GRID_SIZE - 1;

/// World axis that a slice is perpendicular to.
#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Parses an axis name such as `"x"` or `"Y"`.
    pub fn from_name(name: &str) -> Result<Self, InvalidSliceError> {
        name.parse()
            .map_err(|_| InvalidSliceError::UnknownAxis(name.to_string()))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit vector along the positive world axis.
    pub fn unit_vector(self) -> Unit<Vector3<f32>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// Sense of a quarter turn.
///
/// `Positive` turns clockwise as seen from the positive end of the axis,
/// which is a -90 degree right-handed rotation.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Converts `+1` / `-1` into a direction.
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Direction::Positive),
            -1 => Some(Direction::Negative),
            _ => None,
        }
    }

    pub fn sign(self) -> i8 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    /// Right-handed rotation angle about the positive axis (in radians).
    pub fn angle(self) -> f32 {
        -(self.sign() as f32) * std::f32::consts::FRAC_PI_2
    }
}

/// Logical position of a cubie in `{0,1,2}^3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl GridCoord {
    /// Returns `None` if any component is outside the grid.
    pub fn new(x: u8, y: u8, z: u8) -> Option<Self> {
        (x <= MAX_LAYER && y <= MAX_LAYER && z <= MAX_LAYER).then_some(Self { x, y, z })
    }

    /// All 27 coordinates in x-major, then y, then z order.
    pub fn all() -> impl Iterator<Item = GridCoord> {
        (0..GRID_SIZE).flat_map(|x| {
            (0..GRID_SIZE).flat_map(move |y| (0..GRID_SIZE).map(move |z| GridCoord { x, y, z }))
        })
    }

    /// Component of the coordinate along `axis`.
    pub fn along(self, axis: Axis) -> u8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Offset from the center cubie, each component in `-1..=1`.
    pub fn centered(self) -> Vector3<i8> {
        Vector3::new(self.x as i8 - 1, self.y as i8 - 1, self.z as i8 - 1)
    }

    /// Inverse of [`GridCoord::centered`].
    pub fn from_centered(v: Vector3<i8>) -> Option<Self> {
        let lift = |c: i8| u8::try_from(c + 1).ok();
        Self::new(lift(v.x)?, lift(v.y)?, lift(v.z)?)
    }

    /// Applies a quarter turn about `axis` to this coordinate.
    ///
    /// The layer along `axis` never changes. For a positive turn about X
    /// this is `(x, y, z) -> (x, z, 2 - y)`.
    pub fn quarter_turn(self, axis: Axis, direction: Direction) -> Self {
        let mut c = self.centered();
        let (a, b) = match axis {
            Axis::X => (1, 2),
            Axis::Y => (2, 0),
            Axis::Z => (0, 1),
        };
        // Positive turns send (a, b) to (b, -a) in the plane perpendicular to the axis.
        let (ca, cb) = (c[a], c[b]);
        match direction {
            Direction::Positive => {
                c[a] = cb;
                c[b] = -ca;
            }
            Direction::Negative => {
                c[a] = -cb;
                c[b] = ca;
            }
        }
        GridCoord {
            x: (c.x + 1) as u8,
            y: (c.y + 1) as u8,
            z: (c.z + 1) as u8,
        }
    }

    /// Position in the enumeration order used by [`GridCoord::all`].
    pub fn linear_index(self) -> usize {
        let n = GRID_SIZE as usize;
        self.x as usize * n * n + self.y as usize * n + self.z as usize
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
