#![warn(missing_docs)]
//! Perspective camera aimed at a fixed look-at target.

use glam::{Mat4, Vec3};

/// Perspective camera with position, look-at target, and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 4.0),
            target: Vec3::ZERO,
            fov: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Create a perspective camera.
    ///
    /// `fov_degrees` is the vertical field of view.
    pub fn perspective(fov_degrees: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov: fov_degrees.to_radians(),
            near,
            far,
            ..Default::default()
        };
        camera.set_aspect(width, height);
        camera
    }

    /// Place the camera at `position`.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Aim the camera at `target`.
    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Compute the projection matrix (camera space -> clip space).
    ///
    /// Uses the OpenGL depth range so unprojected NDC z spans `[-1, 1]`.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio (call when the viewport resizes).
    ///
    /// A zero-height viewport leaves the aspect unchanged.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_matches_scene_setup() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.fov - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
    }

    #[test]
    fn forward_points_at_target() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn set_aspect_ignores_zero_height() {
        let mut camera = Camera::perspective(75.0, 800, 600, 0.1, 100.0);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        camera.set_aspect(1024, 0);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        camera.set_aspect(1000, 500);
        assert!((camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn camera_matrices_are_valid() {
        let camera = Camera::default();

        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        let view_proj = camera.view_projection_matrix();

        assert!(view.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(proj.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(view_proj.to_cols_array().iter().all(|x| x.is_finite()));

        // Origin sits in front of the camera, so it projects to the screen centre.
        let clip = view_proj.project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
    }
}
