/// Rubik Web - WASM boundary for browser renderers
///
/// The browser side owns the scene and draws one box per cubie. This crate
/// owns the puzzle state and hands out transforms, face colors, the command
/// list, and picking results.
use nalgebra::{Point3, Vector3};
use rubik_core::{
    Axis, Camera, CubeConfig, Direction, Face, InteractionSurface, Puzzle, Ray, Wiring,
};
use wasm_bindgen::prelude::*;

/// Logs an error and mirrors it to the browser console.
fn report_error(message: &str) {
    log::error!("{message}");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(message));
}

#[wasm_bindgen]
pub struct WebCube {
    surface: InteractionSurface,
    camera: Camera,
}

#[wasm_bindgen]
impl WebCube {
    /// Creates a solved cube. `classic` limits the commands to the four
    /// original slices.
    #[wasm_bindgen(constructor)]
    pub fn new(classic: bool) -> WebCube {
        let wiring = if classic { Wiring::Classic } else { Wiring::Full };
        WebCube {
            surface: InteractionSurface::new(Puzzle::new(CubeConfig::with_wiring(wiring))),
            camera: Camera::default(),
        }
    }

    /// Machine names of the available commands, in button order.
    pub fn command_names(&self) -> Vec<String> {
        self.surface.commands().names().map(str::to_string).collect()
    }

    /// Button labels, parallel to [`WebCube::command_names`].
    pub fn command_labels(&self) -> Vec<String> {
        self.surface.commands().iter().map(|c| c.label()).collect()
    }

    /// Runs a named command. Errors are logged; returns whether the cube turned.
    pub fn trigger(&mut self, name: &str) -> bool {
        self.surface.trigger(name)
    }

    /// Turns the slice `layer` along `axis` (`"x"`, `"y"`, or `"z"`) by a
    /// quarter turn; `direction` is `1` or `-1`.
    pub fn rotate(&mut self, axis: &str, layer: u8, direction: i8) -> bool {
        let axis = match Axis::from_name(axis) {
            Ok(axis) => axis,
            Err(e) => {
                report_error(&e.to_string());
                return false;
            }
        };
        let Some(direction) = Direction::from_sign(direction) else {
            report_error(&format!("direction must be 1 or -1, got {direction}"));
            return false;
        };
        match self.surface.rotate(axis, layer, direction) {
            Ok(_) => true,
            Err(e) => {
                report_error(&e.to_string());
                false
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        self.surface.undo()
    }

    pub fn reset(&mut self) {
        self.surface.reset();
    }

    pub fn is_solved(&self) -> bool {
        self.surface.puzzle().is_solved()
    }

    pub fn turn_count(&self) -> usize {
        self.surface.puzzle().history().len()
    }

    pub fn cubie_count(&self) -> usize {
        self.surface.puzzle().registry().len()
    }

    /// Column-major 4x4 world matrices, 16 floats per cubie in id order.
    pub fn transforms(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.cubie_count() * 16);
        self.surface.puzzle().for_each_cubie(|_, transform, _| {
            out.extend_from_slice(transform.to_homogeneous().as_slice());
        });
        out
    }

    /// `0xRRGGBB` colors, 6 per cubie in the order +x, -x, +y, -y, +z, -z.
    pub fn face_colors(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.cubie_count() * 6);
        self.surface.puzzle().for_each_cubie(|_, _, colors| {
            out.extend(colors.iter().map(|(_, color)| color.rgb()));
        });
        out
    }

    /// Grid coordinates, 3 per cubie in id order.
    pub fn coordinates(&self) -> Vec<u8> {
        self.surface
            .puzzle()
            .registry()
            .cubies()
            .iter()
            .flat_map(|c| [c.coord.x, c.coord.y, c.coord.z])
            .collect()
    }

    /// Mirrors the browser camera so screen picks can be turned into rays.
    pub fn set_camera(&mut self, x: f32, y: f32, z: f32, fov_degrees: f32, aspect: f32) {
        self.camera.position = Point3::new(x, y, z);
        self.camera.fov = fov_degrees.to_radians();
        self.camera.aspect = aspect;
    }

    /// Id of the nearest cubie along a world-space ray.
    pub fn pick_ray(&self, ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) -> Option<u8> {
        let ray = Ray::new(Point3::new(ox, oy, oz), Vector3::new(dx, dy, dz))?;
        self.surface.pick(&ray).map(|hit| hit.id.0)
    }

    /// Id of the cubie under a pointer position in pixels.
    pub fn pick_screen(&self, x: f32, y: f32, width: u32, height: u32) -> Option<u8> {
        let ray = self.camera.ray_through(x, y, width, height)?;
        self.surface.pick(&ray).map(|hit| hit.id.0)
    }
}

impl Default for WebCube {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Number of faces per cubie in [`WebCube::face_colors`].
#[wasm_bindgen]
pub fn faces_per_cubie() -> usize {
    Face::Back.index() + 1
}

#[wasm_bindgen(start)]
pub fn start() {
    // Setup panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
