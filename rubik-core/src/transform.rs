/// Rigid cubie transforms and quarter-turn rotations
use nalgebra::{IsometryMatrix3, Matrix4, Point3, Rotation3, Translation3, Vector3};

use crate::grid::{Axis, Direction, GridCoord};

/// Position and orientation of a cubie in world space.
pub type CubieTransform = IsometryMatrix3<f32>;

/// Placement of the 3x3x3 grid in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Edge length of a single cubie.
    pub cubie_size: f32,
    /// Distance between neighboring cubie centers.
    pub spacing: f32,
}

impl GridLayout {
    pub fn new(cubie_size: f32, spacing: f32) -> Self {
        Self { cubie_size, spacing }
    }

    /// World position of the center of the cubie at `coord`.
    ///
    /// The middle cubie sits at the origin.
    pub fn world_position(&self, coord: GridCoord) -> Point3<f32> {
        Point3::from(coord.centered().map(|c| c as f32) * self.spacing)
    }

    /// Transform of a cubie sitting at `coord` with its home orientation.
    pub fn home_transform(&self, coord: GridCoord) -> CubieTransform {
        CubieTransform::from_parts(
            Translation3::from(self.world_position(coord).coords),
            Rotation3::identity(),
        )
    }

    /// Centroid of the 9 cubie centers in a slice.
    pub fn slice_center(&self, axis: Axis, layer: u8) -> Point3<f32> {
        let offset = (layer as f32 - 1.0) * self.spacing;
        Point3::from(axis.unit_vector().into_inner() * offset)
    }

    /// Grid coordinate nearest to a world position, if it lies on the grid.
    pub fn nearest_coord(&self, position: &Point3<f32>) -> Option<GridCoord> {
        let scaled = position.coords / self.spacing;
        let rounded = scaled.map(|c| c.round());
        if rounded.iter().any(|c| !(-1.0..=1.0).contains(c)) {
            return None;
        }
        GridCoord::from_centered(rounded.map(|c| c as i8))
    }

    /// Half extents of a cubie's box in its local space.
    pub fn half_extents(&self) -> Vector3<f32> {
        Vector3::repeat(self.cubie_size / 2.0)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(0.9, 1.05)
    }
}

/// Transform builder for quarter turns and rendering matrices
pub struct Transform;

impl Transform {
    /// Rotation of one quarter turn about a world axis through the origin.
    pub fn quarter_turn_rotation(axis: Axis, direction: Direction) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&axis.unit_vector(), direction.angle())
    }

    /// Rigid motion that spins a slice in place about its own center.
    pub fn quarter_turn(axis: Axis, direction: Direction, center: &Point3<f32>) -> CubieTransform {
        CubieTransform::rotation_wrt_point(Self::quarter_turn_rotation(axis, direction), *center)
    }

    /// Removes floating-point drift from a transform that is known to be a
    /// cube symmetry placed on the grid.
    ///
    /// The rotation becomes an exact signed permutation matrix and the
    /// translation is replaced by `position`.
    pub fn snap(transform: &CubieTransform, position: &Point3<f32>) -> CubieTransform {
        let rotation = Rotation3::from_matrix_unchecked(transform.rotation.matrix().map(|v| v.round()));
        CubieTransform::from_parts(Translation3::from(position.coords), rotation)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_centered() {
        let layout = GridLayout::default();
        let center = layout.world_position(GridCoord::new(1, 1, 1).unwrap());
        assert!(center.coords.norm() < 1e-6);

        let corner = layout.world_position(GridCoord::new(2, 0, 2).unwrap());
        assert!((corner - Point3::new(1.05, -1.05, 1.05)).norm() < 1e-6);
    }

    #[test]
    fn test_nearest_coord() {
        let layout = GridLayout::default();
        for coord in GridCoord::all() {
            let p = layout.world_position(coord) + Vector3::new(0.1, -0.1, 0.05);
            assert_eq!(layout.nearest_coord(&p), Some(coord));
        }
        assert_eq!(layout.nearest_coord(&Point3::new(5.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_positive_x_turn_sends_up_to_back() {
        let rotation = Transform::quarter_turn_rotation(Axis::X, Direction::Positive);
        let v = rotation * Vector3::y();
        assert!((v - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_quarter_turn_spins_about_slice_center() {
        let layout = GridLayout::default();
        let center = layout.slice_center(Axis::X, 2);
        let turn = Transform::quarter_turn(Axis::X, Direction::Positive, &center);
        let moved = turn * center;
        assert!((moved - center).norm() < 1e-6);
    }

    #[test]
    fn test_snap_makes_four_turns_exact() {
        let layout = GridLayout::default();
        let coord = GridCoord::new(2, 0, 0).unwrap();
        let start = layout.home_transform(coord);
        let center = layout.slice_center(Axis::X, 2);
        let mut transform = start;
        let mut c = coord;
        for _ in 0..4 {
            transform = Transform::quarter_turn(Axis::X, Direction::Positive, &center) * transform;
            c = c.quarter_turn(Axis::X, Direction::Positive);
            transform = Transform::snap(&transform, &layout.world_position(c));
        }
        assert_eq!(transform, start);
    }
}
