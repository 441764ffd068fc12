/// Ray queries against the cubies
use nalgebra::{Point3, Unit, Vector3};

use crate::grid::GridCoord;
use crate::registry::{CubieId, CubieRegistry};

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

impl Ray {
    /// Returns `None` for a zero-length direction or non-finite input.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Option<Self> {
        if !is_finite(&origin.coords) || !is_finite(&direction) {
            return None;
        }
        let direction = Unit::try_new(direction, f32::EPSILON)?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction.into_inner() * t
    }
}

fn is_finite(v: &Vector3<f32>) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Nearest cubie hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: CubieId,
    pub coord: GridCoord,
    /// Distance along the ray.
    pub distance: f32,
    pub point: Point3<f32>,
}

/// Finds the closest cubie whose box the ray passes through.
///
/// Purely a query; the registry is not modified.
pub fn pick(registry: &CubieRegistry, ray: &Ray) -> Option<PickHit> {
    let half = registry.layout().half_extents();
    registry
        .cubies()
        .iter()
        .filter_map(|cubie| {
            let origin = cubie.transform.inverse_transform_point(&ray.origin);
            let direction = cubie.transform.inverse_transform_vector(&ray.direction.into_inner());
            let distance = intersect_box(&origin, &direction, &half)?;
            Some(PickHit {
                id: cubie.id,
                coord: cubie.coord,
                distance,
                point: ray.at(distance),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Slab test against an origin-centered box. Returns the entry distance, or
/// zero if the origin is inside the box.
fn intersect_box(origin: &Point3<f32>, direction: &Vector3<f32>, half: &Vector3<f32>) -> Option<f32> {
    if !is_finite(&origin.coords) || !is_finite(direction) {
        return None;
    }
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;
    for i in 0..3 {
        if direction[i].abs() < 1e-9 {
            if origin[i].abs() > half[i] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / direction[i];
        let mut t0 = (-half[i] - origin[i]) * inv;
        let mut t1 = (half[i] - origin[i]) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Axis, Direction};
    use crate::rotation::RotationEngine;

    #[test]
    fn test_pick_front_center() {
        let registry = CubieRegistry::default();
        let ray = Ray::new(Point3::new(0.0, 0.0, 7.0), -Vector3::z()).unwrap();
        let hit = pick(&registry, &ray).unwrap();
        assert_eq!(hit.coord, GridCoord::new(1, 1, 2).unwrap());
        assert!((hit.distance - (7.0 - 1.05 - 0.45)).abs() < 1e-4);
    }

    #[test]
    fn test_pick_miss() {
        let registry = CubieRegistry::default();
        let ray = Ray::new(Point3::new(5.0, 5.0, 7.0), -Vector3::z()).unwrap();
        assert!(pick(&registry, &ray).is_none());

        // Pointing away from the cube.
        let ray = Ray::new(Point3::new(0.0, 0.0, 7.0), Vector3::z()).unwrap();
        assert!(pick(&registry, &ray).is_none());
    }

    #[test]
    fn test_pick_follows_turns_without_mutation() {
        let mut registry = CubieRegistry::default();
        let engine = RotationEngine::default();
        let id = registry.at(GridCoord::new(2, 0, 2).unwrap()).unwrap().id;
        engine
            .rotate(&mut registry, Axis::X, 2, Direction::Positive)
            .unwrap();

        let before = registry.clone();
        // Look straight down at the top-right-front corner.
        let ray = Ray::new(Point3::new(1.05, 7.0, 1.05), -Vector3::y()).unwrap();
        let hit = pick(&registry, &ray).unwrap();
        assert_eq!(hit.id, id);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_degenerate_rays_are_rejected() {
        let origin = Point3::new(0.0, 0.0, 7.0);
        assert!(Ray::new(origin, Vector3::zeros()).is_none());
        assert!(Ray::new(origin, Vector3::new(f32::NAN, 0.0, -1.0)).is_none());
        assert!(Ray::new(Point3::new(f32::INFINITY, 0.0, 7.0), -Vector3::z()).is_none());
    }

    #[test]
    fn test_non_finite_box_query_misses() {
        let half = Vector3::repeat(0.45);
        let nan = Vector3::repeat(f32::NAN);
        assert_eq!(intersect_box(&Point3::new(0.0, 0.0, 7.0), &nan, &half), None);
        assert_eq!(intersect_box(&Point3::from(nan), &-Vector3::z(), &half), None);
        assert!(intersect_box(&Point3::new(0.0, 0.0, 7.0), &-Vector3::z(), &half).is_some());
    }
}
