/// Free-flying camera with an explicit orthonormal basis
use nalgebra::Vector3;

use crate::config::Config;
use crate::input::Intent;
use crate::surface::Viewport;
use crate::transform::{direction, point, Mat4, Transform, Vec4};

/// One of the camera's basis directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Forward,
    Up,
    Right,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec4,
    pub forward: Vec4,
    pub up: Vec4,
    pub right: Vec4,
    /// Horizontal field of view in radians
    pub h_fov: f32,
    /// Vertical field of view in radians, `h_fov * height / width`
    pub v_fov: f32,
    pub near: f32,
    pub far: f32,
    pub move_speed: f32,
    pub rotate_speed: f32,
}

impl Camera {
    /// Camera at `position` looking down +Z with +Y up
    pub fn new(position: Vector3<f32>, viewport: Viewport) -> Self {
        let h_fov = std::f32::consts::FRAC_PI_3; // 60 degrees
        Self {
            position: point(position.x, position.y, position.z),
            forward: direction(0.0, 0.0, 1.0),
            up: direction(0.0, 1.0, 0.0),
            right: direction(1.0, 0.0, 0.0),
            h_fov,
            v_fov: h_fov * viewport.aspect(),
            near: 0.1,
            far: 100.0,
            move_speed: 0.02,
            rotate_speed: 0.01,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut camera = Self::new(config.camera_position(), config.viewport());
        camera.set_h_fov(config.h_fov(), config.viewport());
        camera.near = config.near;
        camera.far = config.far;
        camera.move_speed = config.move_speed;
        camera.rotate_speed = config.rotate_speed;
        camera
    }

    /// Set the horizontal field of view and derive the vertical one
    pub fn set_h_fov(&mut self, h_fov: f32, viewport: Viewport) {
        self.h_fov = h_fov;
        self.v_fov = h_fov * viewport.aspect();
    }

    pub fn basis(&self, axis: Axis) -> Vec4 {
        match axis {
            Axis::Forward => self.forward,
            Axis::Up => self.up,
            Axis::Right => self.right,
        }
    }

    /// Step along one of the camera's own axes; `sign` picks the direction
    pub fn move_along(&mut self, axis: Axis, sign: f32) {
        self.position += self.basis(axis) * (sign * self.move_speed);
    }

    /// Rotate the basis about the Y axis
    pub fn yaw(&mut self, angle: f32) {
        self.rotate_basis(&Transform::rotation_y(angle));
    }

    /// Rotate the basis about the X axis
    pub fn pitch(&mut self, angle: f32) {
        self.rotate_basis(&Transform::rotation_x(angle));
    }

    // All three vectors turn together or the basis stops being orthonormal.
    fn rotate_basis(&mut self, rotation: &Mat4) {
        self.forward = self.forward * rotation;
        self.up = self.up * rotation;
        self.right = self.right * rotation;
    }

    /// Apply one control intent
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::MoveForward => self.move_along(Axis::Forward, 1.0),
            Intent::MoveBack => self.move_along(Axis::Forward, -1.0),
            Intent::MoveRight => self.move_along(Axis::Right, 1.0),
            Intent::MoveLeft => self.move_along(Axis::Right, -1.0),
            Intent::MoveUp => self.move_along(Axis::Up, 1.0),
            Intent::MoveDown => self.move_along(Axis::Up, -1.0),
            Intent::YawLeft => self.yaw(-self.rotate_speed),
            Intent::YawRight => self.yaw(self.rotate_speed),
            Intent::PitchUp => self.pitch(self.rotate_speed),
            Intent::PitchDown => self.pitch(-self.rotate_speed),
            Intent::Quit => {}
        }
    }

    pub fn translation_matrix(&self) -> Mat4 {
        let p = self.position;
        Transform::translation(&Vector3::new(-p.x, -p.y, -p.z))
    }

    /// Right, up and forward as the first three columns
    #[rustfmt::skip]
    pub fn orientation_matrix(&self) -> Mat4 {
        let (r, u, f) = (self.right, self.up, self.forward);
        Mat4::new(
            r.x, u.x, f.x, 0.0,
            r.y, u.y, f.y, 0.0,
            r.z, u.z, f.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create the view matrix (world space to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        self.translation_matrix() * self.orientation_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
