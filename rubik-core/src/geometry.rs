/// Geometry primitives for drawing cubies
use nalgebra::{Point3, Vector3};
use strum::{Display, EnumIter, IntoEnumIterator};

/// One of the six faces of a cubie, in the cubie's local space.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Right,
    Left,
    Up,
    Down,
    Front,
    Back,
}

impl Face {
    /// Outward normal of the face in local space.
    pub fn normal(self) -> Vector3<f32> {
        match self {
            Face::Right => Vector3::x(),
            Face::Left => -Vector3::x(),
            Face::Up => Vector3::y(),
            Face::Down => -Vector3::y(),
            Face::Front => Vector3::z(),
            Face::Back => -Vector3::z(),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sticker color of a cubie face.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickerColor {
    Red,
    Orange,
    Yellow,
    White,
    Green,
    Blue,
}

impl StickerColor {
    /// `0xRRGGBB` value for renderers that want true color.
    pub fn rgb(self) -> u32 {
        match self {
            StickerColor::Red => 0xff0000,
            StickerColor::Orange => 0xffa500,
            StickerColor::Yellow => 0xffff00,
            StickerColor::White => 0xffffff,
            StickerColor::Green => 0x008000,
            StickerColor::Blue => 0x0000ff,
        }
    }
}

/// Color of each face of a cubie, indexed by [`Face`].
///
/// Assigned once when the cubie is created and never changed afterwards;
/// the colors turn with the cubie's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceColors([StickerColor; 6]);

impl FaceColors {
    /// Right red, left orange, up yellow, down white, front green, back blue.
    pub const STANDARD: Self = Self([
        StickerColor::Red,
        StickerColor::Orange,
        StickerColor::Yellow,
        StickerColor::White,
        StickerColor::Green,
        StickerColor::Blue,
    ]);

    pub fn get(&self, face: Face) -> StickerColor {
        self.0[face.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Face, StickerColor)> + '_ {
        Face::iter().map(|face| (face, self.get(face)))
    }
}

impl Default for FaceColors {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle belonging to one face of a cubie
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub face: Face,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, face: Face) -> Self {
        Self {
            vertices: [v0, v1, v2],
            face,
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Box mesh for a single cubie, centered on the origin, with each
    /// triangle tagged by the face it belongs to.
    ///
    /// Triangles wind counterclockwise when seen from outside.
    pub fn cubie(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        for face in Face::iter() {
            let n = face.normal();
            // Pick two tangents so that (u, v, n) is right-handed.
            let u = if n.x.abs() > 0.5 {
                Vector3::new(0.0, 0.0, -n.x)
            } else {
                Vector3::new(n.y.abs() + n.z, 0.0, 0.0)
            };
            let u = u.normalize();
            let v = n.cross(&u);

            let center = Point3::from(n * half);
            let corner = |su: f32, sv: f32| Vertex::new(center + (u * su + v * sv) * half, n);
            let (a, b, c, d) = (corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0));

            mesh.add_triangle(Triangle::new(a, b, c, face));
            mesh.add_triangle(Triangle::new(a, c, d, face));
        }

        mesh
    }
}
