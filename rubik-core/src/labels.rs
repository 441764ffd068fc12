/// Static face annotations drawn around the puzzle
use nalgebra::Point3;

/// A text annotation at a fixed world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub text: &'static str,
    pub position: Point3<f32>,
}

/// Distance of each label from the puzzle center.
pub const LABEL_DISTANCE: f32 = 3.0;

/// The six face labels, one on each axis at [`LABEL_DISTANCE`] from the
/// center. Purely cosmetic.
pub fn face_labels() -> [Label; 6] {
    let d = LABEL_DISTANCE;
    [
        Label { text: "Front", position: Point3::new(0.0, 0.0, d) },
        Label { text: "Back", position: Point3::new(0.0, 0.0, -d) },
        Label { text: "Up", position: Point3::new(0.0, d, 0.0) },
        Label { text: "Down", position: Point3::new(0.0, -d, 0.0) },
        Label { text: "Left", position: Point3::new(-d, 0.0, 0.0) },
        Label { text: "Right", position: Point3::new(d, 0.0, 0.0) },
    ]
}
