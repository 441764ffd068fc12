/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::picking::Ray;
use crate::transform::Transform;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Orbit of the camera around its target (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Orbit {
    /// Pitch is kept just short of straight up or down.
    const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        let mut orbit = Self { yaw, pitch, distance };
        orbit.rotate(0.0, 0.0);
        orbit.zoom(1.0);
        orbit
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(2.0, 50.0);
    }

    /// Camera offset from the target.
    pub fn offset(&self) -> Vector3<f32> {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vector3::new(sy * cp, sp, cy * cp) * self.distance
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Self::new(0.0, 0.0, 7.0)
    }
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 7.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 75.0_f32.to_radians(),
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Places the camera on an orbit around its target.
    pub fn set_orbit(&mut self, orbit: &Orbit) {
        self.position = self.target + orbit.offset();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                // Match the perspective view's extent at the target distance.
                let height = 2.0 * (self.position - self.target).norm() * (self.fov / 2.0).tan();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a 3D point to 2D screen space
    ///
    /// Returns screen x, screen y, and normalized depth (smaller is nearer).
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = Transform::mvp_matrix(model_matrix, &self.view_matrix(), &self.projection_matrix());

        let clip = mvp * point.to_homogeneous();

        // Behind the camera or degenerate
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }

    /// World-space ray through a screen point, for picking.
    pub fn ray_through(&self, screen_x: f32, screen_y: f32, width: u32, height: u32) -> Option<Ray> {
        if width == 0 || height == 0 {
            return None;
        }
        let ndc_x = screen_x / width as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - screen_y / height as f32 * 2.0;

        let inverse = (self.projection_matrix() * self.view_matrix()).try_inverse()?;
        let near = inverse.transform_point(&Point3::new(ndc_x, ndc_y, -1.0));
        let far = inverse.transform_point(&Point3::new(ndc_x, ndc_y, 1.0));

        Ray::new(near, far - near)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::new(80, 40);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-4);
        assert!((y - 20.0).abs() < 1e-4);
        assert!((-1.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_nearer_points_have_smaller_depth() {
        let camera = Camera::default();
        let project = |z: f32| {
            camera
                .project_to_screen(&Point3::new(0.0, 0.0, z), &Matrix4::identity(), 800, 600)
                .unwrap()
                .2
        };
        assert!(project(1.0) < project(-1.0));
    }

    #[test]
    fn test_ray_through_center_hits_target() {
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let mut camera = Camera::new(100, 50);
            camera.mode = mode;
            camera.set_orbit(&Orbit::new(0.7, 0.4, 7.0));
            let ray = camera.ray_through(50.0, 25.0, 100, 50).unwrap();
            let to_target = camera.target - ray.origin;
            let along = to_target.dot(&ray.direction.into_inner());
            assert!((ray.at(along) - camera.target).norm() < 1e-2);
        }
    }

    #[test]
    fn test_ray_matches_projection() {
        let camera = Camera::new(100, 50);
        let point = Point3::new(0.8, -0.5, 0.3);
        let (x, y, _) = camera
            .project_to_screen(&point, &Matrix4::identity(), 100, 50)
            .unwrap();
        let ray = camera.ray_through(x, y, 100, 50).unwrap();
        let along = (point - ray.origin).dot(&ray.direction.into_inner());
        assert!((ray.at(along) - point).norm() < 1e-2);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut orbit = Orbit::default();
        orbit.rotate(0.0, 10.0);
        assert!(orbit.pitch < std::f32::consts::FRAC_PI_2);
        assert!((orbit.offset().norm() - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_clamps_distance() {
        assert_eq!(Orbit::new(0.0, 0.0, 0.0).distance, 2.0);
        assert_eq!(Orbit::new(0.0, 0.0, -5.0).distance, 2.0);
        assert_eq!(Orbit::new(0.0, 0.0, 500.0).distance, 50.0);
        assert_eq!(Orbit::new(0.0, 0.0, 7.0).distance, 7.0);
    }

    #[test]
    fn test_no_ray_for_empty_viewport() {
        let camera = Camera::default();
        assert!(camera.ray_through(0.0, 0.0, 0, 0).is_none());
        assert!(camera.ray_through(10.0, 10.0, 100, 0).is_none());
        assert!(camera.ray_through(f32::NAN, 10.0, 100, 50).is_none());
    }
}
