/// Construction settings for a puzzle
use crate::slice::Wiring;
use crate::transform::GridLayout;

/// Settings used to build a [`Puzzle`](crate::Puzzle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeConfig {
    /// Edge length of a cubie in world units.
    pub cubie_size: f32,
    /// Distance between neighboring cubie centers.
    pub spacing: f32,
    pub wiring: Wiring,
}

impl CubeConfig {
    pub fn with_wiring(wiring: Wiring) -> Self {
        Self {
            wiring,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.cubie_size, self.spacing)
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        let layout = GridLayout::default();
        Self {
            cubie_size: layout.cubie_size,
            spacing: layout.spacing,
            wiring: Wiring::default(),
        }
    }
}
