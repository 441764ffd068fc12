/// Quarter turns of a slice as a rigid body
use nalgebra::Point3;

use crate::error::{CubeError, InvalidSliceError, Result};
use crate::grid::{Axis, Direction, GridCoord};
use crate::registry::{self, CubieId, CubieRegistry};
use crate::slice::{Slice, SliceIndex, Wiring};
use crate::transform::{CubieTransform, Transform};

/// Where one cubie went during a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct CubieMove {
    pub id: CubieId,
    pub from: GridCoord,
    pub to: GridCoord,
    pub position: Point3<f32>,
}

/// Summary of a completed quarter turn.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationReport {
    pub slice: Slice,
    pub direction: Direction,
    pub moves: Vec<CubieMove>,
}

/// Applies quarter turns to the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationEngine {
    wiring: Wiring,
}

impl RotationEngine {
    pub fn new(wiring: Wiring) -> Self {
        Self { wiring }
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    /// Turns the slice at (`axis`, `layer`) by a quarter turn in `direction`.
    ///
    /// Membership is computed from the registry at call time. New transforms
    /// and coordinates for all members are staged and checked before any of
    /// them are written, so on error the registry is left untouched.
    pub fn rotate(
        &self,
        registry: &mut CubieRegistry,
        axis: Axis,
        layer: u8,
        direction: Direction,
    ) -> Result<RotationReport> {
        let slice = Slice::new(axis, layer)?;
        if !self.wiring.includes(slice) {
            return Err(InvalidSliceError::NotWired { axis, layer }.into());
        }

        let members = SliceIndex::new(registry).members(slice);
        if members.is_empty() {
            return Err(InvalidSliceError::EmptySlice { axis, layer }.into());
        }

        let layout = *registry.layout();
        let turn = Transform::quarter_turn(axis, direction, &layout.slice_center(axis, layer));

        let mut staged: Vec<(CubieId, GridCoord, CubieTransform)> = Vec::with_capacity(members.len());
        let mut moves = Vec::with_capacity(members.len());
        for &id in &members {
            let cubie = registry
                .get(id)
                .ok_or_else(|| CubeError::InvariantViolation(format!("unknown cubie {id}")))?;

            let rotated = turn * cubie.transform;
            let to = cubie.coord.quarter_turn(axis, direction);

            let position = Point3::from(rotated.translation.vector);
            if layout.nearest_coord(&position) != Some(to) {
                return Err(CubeError::InvariantViolation(format!(
                    "cubie {id} landed at {position} but should be at {to}"
                )));
            }

            let snapped = Transform::snap(&rotated, &layout.world_position(to));
            staged.push((id, to, snapped));
            moves.push(CubieMove {
                id,
                from: cubie.coord,
                to,
                position: layout.world_position(to),
            });
        }

        let after = registry.cubies().iter().map(|c| {
            staged
                .iter()
                .find(|(id, _, _)| *id == c.id)
                .map_or(c.coord, |&(_, to, _)| to)
        });
        registry::check_coordinates(after)?;

        for (id, coord, transform) in staged {
            registry.set_transform(id, transform);
            registry.set_coordinate(id, coord);
        }

        let report = RotationReport {
            slice,
            direction,
            moves,
        };
        log::debug!(
            "turned {slice} {direction}: {}",
            report
                .moves
                .iter()
                .map(|m| format!("{} {} -> {} at {:?}", m.id, m.from, m.to, m.position.coords.as_slice()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CUBIE_COUNT;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use strum::IntoEnumIterator;

    fn coord(x: u8, y: u8, z: u8) -> GridCoord {
        GridCoord::new(x, y, z).unwrap()
    }

    fn id_at(registry: &CubieRegistry, c: GridCoord) -> CubieId {
        registry.at(c).unwrap().id
    }

    fn members(registry: &CubieRegistry, axis: Axis, layer: u8) -> BTreeSet<CubieId> {
        SliceIndex::new(registry)
            .members_of(axis, layer)
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_rotate_right_layer_up() {
        let engine = RotationEngine::default();
        let mut registry = CubieRegistry::default();
        let before = registry.clone();
        let corner = id_at(&registry, coord(2, 0, 0));
        let edge = id_at(&registry, coord(2, 0, 2));

        let report = engine
            .rotate(&mut registry, Axis::X, 2, Direction::Positive)
            .unwrap();
        assert_eq!(report.moves.len(), 9);

        assert_eq!(registry.coordinate(corner), Some(coord(2, 0, 2)));
        assert_eq!(registry.coordinate(edge), Some(coord(2, 2, 2)));

        for (old, new) in before.cubies().iter().zip(registry.cubies()) {
            if old.coord.x < 2 {
                assert_eq!(old, new);
            } else {
                assert_eq!(new.coord.x, 2);
            }
        }
        assert!(registry.check_invariants().is_ok());
    }

    #[test]
    fn test_same_axis_turn_keeps_own_membership() {
        let engine = RotationEngine::default();
        let mut registry = CubieRegistry::default();
        let before = members(&registry, Axis::X, 2);
        engine
            .rotate(&mut registry, Axis::X, 2, Direction::Positive)
            .unwrap();
        assert_eq!(members(&registry, Axis::X, 2), before);
    }

    #[test]
    fn test_cross_axis_membership_follows_cubies() {
        let engine = RotationEngine::default();
        let mut registry = CubieRegistry::default();
        let top_before = members(&registry, Axis::Y, 2);
        let climber = id_at(&registry, coord(2, 0, 2));

        engine
            .rotate(&mut registry, Axis::X, 2, Direction::Positive)
            .unwrap();
        let top_after_x = members(&registry, Axis::Y, 2);
        assert_ne!(top_after_x, top_before);
        assert!(top_after_x.contains(&climber));

        engine
            .rotate(&mut registry, Axis::Y, 2, Direction::Positive)
            .unwrap();
        let top_after_y = members(&registry, Axis::Y, 2);
        assert_eq!(top_after_y, top_after_x);
        let expected: BTreeSet<CubieId> = registry
            .cubies()
            .iter()
            .filter(|c| c.coord.y == 2)
            .map(|c| c.id)
            .collect();
        assert_eq!(top_after_y, expected);

        // The cubie that climbed into the top layer was carried by the top turn.
        assert_eq!(registry.coordinate(climber), Some(coord(0, 2, 2)));
    }

    #[test]
    fn test_four_turns_are_identity() {
        let engine = RotationEngine::default();
        for slice in Slice::all() {
            let mut registry = CubieRegistry::default();
            // Start from a scrambled state so orientations are not all identity.
            engine
                .rotate(&mut registry, Axis::Z, 0, Direction::Negative)
                .unwrap();
            engine
                .rotate(&mut registry, Axis::Y, 1, Direction::Positive)
                .unwrap();
            let start = registry.clone();
            for _ in 0..4 {
                engine
                    .rotate(&mut registry, slice.axis, slice.layer, Direction::Positive)
                    .unwrap();
            }
            assert_eq!(registry, start);
        }
    }

    #[test]
    fn test_turn_then_inverse_is_noop() {
        let engine = RotationEngine::default();
        let mut registry = CubieRegistry::default();
        engine
            .rotate(&mut registry, Axis::Z, 1, Direction::Positive)
            .unwrap();
        let start = registry.clone();
        engine
            .rotate(&mut registry, Axis::X, 0, Direction::Positive)
            .unwrap();
        engine
            .rotate(&mut registry, Axis::X, 0, Direction::Negative)
            .unwrap();
        assert_eq!(registry, start);
    }

    #[test]
    fn test_disjoint_slices_commute() {
        let engine = RotationEngine::default();
        let mut a = CubieRegistry::default();
        let mut b = CubieRegistry::default();
        engine.rotate(&mut a, Axis::X, 0, Direction::Positive).unwrap();
        engine.rotate(&mut a, Axis::X, 2, Direction::Negative).unwrap();
        engine.rotate(&mut b, Axis::X, 2, Direction::Negative).unwrap();
        engine.rotate(&mut b, Axis::X, 0, Direction::Positive).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_intersecting_slices_do_not_commute() {
        let engine = RotationEngine::default();
        let mut a = CubieRegistry::default();
        let mut b = CubieRegistry::default();
        engine.rotate(&mut a, Axis::X, 2, Direction::Positive).unwrap();
        engine.rotate(&mut a, Axis::Y, 2, Direction::Positive).unwrap();
        engine.rotate(&mut b, Axis::Y, 2, Direction::Positive).unwrap();
        engine.rotate(&mut b, Axis::X, 2, Direction::Positive).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_colors_turn_with_cubie() {
        let engine = RotationEngine::default();
        let mut registry = CubieRegistry::default();
        let id = id_at(&registry, coord(2, 2, 2));
        engine
            .rotate(&mut registry, Axis::X, 2, Direction::Positive)
            .unwrap();
        let cubie = registry.get(id).unwrap();
        assert_eq!(cubie.colors, crate::geometry::FaceColors::STANDARD);
        // The front (+z) face now points up.
        let front = cubie.transform.rotation * crate::geometry::Face::Front.normal();
        assert!((front - nalgebra::Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn test_invalid_slices_leave_registry_untouched() {
        let mut registry = CubieRegistry::default();
        let before = registry.clone();

        let engine = RotationEngine::default();
        assert_eq!(
            engine.rotate(&mut registry, Axis::X, 3, Direction::Positive),
            Err(CubeError::InvalidSlice(InvalidSliceError::LayerOutOfRange(3)))
        );

        let classic = RotationEngine::new(Wiring::Classic);
        assert_eq!(
            classic.rotate(&mut registry, Axis::Z, 0, Direction::Positive),
            Err(CubeError::InvalidSlice(InvalidSliceError::NotWired {
                axis: Axis::Z,
                layer: 0
            }))
        );
        assert_eq!(
            classic.rotate(&mut registry, Axis::Y, 0, Direction::Positive),
            Err(CubeError::InvalidSlice(InvalidSliceError::NotWired {
                axis: Axis::Y,
                layer: 0
            }))
        );
        assert_eq!(registry, before);

        assert!(classic
            .rotate(&mut registry, Axis::Y, 2, Direction::Positive)
            .is_ok());
        assert_ne!(registry, before);
    }

    #[test]
    fn test_corrupt_registry_is_not_committed() {
        let engine = RotationEngine::default();
        let mut registry = CubieRegistry::default();
        // Move a cubie's logical coordinate without moving its body.
        registry.set_coordinate(CubieId(0), coord(1, 1, 1));
        registry.set_coordinate(CubieId(13), coord(0, 0, 0));
        let before = registry.clone();
        let result = engine.rotate(&mut registry, Axis::X, 0, Direction::Positive);
        assert!(matches!(result, Err(CubeError::InvariantViolation(_))));
        assert_eq!(registry, before);
    }

    fn arb_turn() -> impl Strategy<Value = (Axis, u8, Direction)> {
        (
            prop::sample::select(Axis::iter().collect::<Vec<_>>()),
            0u8..=2,
            prop::sample::select(vec![Direction::Positive, Direction::Negative]),
        )
    }

    proptest! {
        #[test]
        fn proptest_turns_preserve_partition(turns in prop::collection::vec(arb_turn(), 0..40)) {
            let engine = RotationEngine::default();
            let mut registry = CubieRegistry::default();
            for (axis, layer, direction) in turns {
                engine.rotate(&mut registry, axis, layer, direction).unwrap();
                prop_assert_eq!(registry.len(), CUBIE_COUNT);
                prop_assert!(registry.check_invariants().is_ok());
                for axis in Axis::iter() {
                    for layer in 0..=2 {
                        prop_assert_eq!(members(&registry, axis, layer).len(), 9);
                    }
                }
            }
        }

        #[test]
        fn proptest_inverse_sequence_restores(turns in prop::collection::vec(arb_turn(), 0..30)) {
            let engine = RotationEngine::default();
            let mut registry = CubieRegistry::default();
            for &(axis, layer, direction) in &turns {
                engine.rotate(&mut registry, axis, layer, direction).unwrap();
            }
            for &(axis, layer, direction) in turns.iter().rev() {
                engine.rotate(&mut registry, axis, layer, direction.inverse()).unwrap();
            }
            prop_assert!(registry.is_solved());
            prop_assert_eq!(registry, CubieRegistry::default());
        }
    }
}
