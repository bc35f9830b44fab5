/// Perspective and clip-to-screen matrices
use crate::camera::Camera;
use crate::surface::Viewport;
use crate::transform::Mat4;

/// Projection derived once from a camera snapshot and a viewport.
///
/// Changing the camera's fov or clip planes afterwards has no effect;
/// build a new `Projection` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    projection: Mat4,
    screen: Mat4,
    half_width: f32,
    half_height: f32,
}

impl Projection {
    #[rustfmt::skip]
    pub fn new(camera: &Camera, viewport: Viewport) -> Self {
        let (near, far) = (camera.near, camera.far);
        let right = (camera.h_fov / 2.0).tan();
        let left = -right;
        let top = (camera.v_fov / 2.0).tan();
        let bottom = -top;

        let m00 = 2.0 / (right - left);
        let m11 = 2.0 / (top - bottom);
        let m22 = (far + near) / (far - near);
        let m32 = 2.0 * far * near / (far - near);

        let projection = Mat4::new(
            m00, 0.0, 0.0, 0.0,
            0.0, m11, 0.0, 0.0,
            0.0, 0.0, m22, 1.0,
            0.0, 0.0, m32, 0.0,
        );

        let (hw, hh) = (viewport.half_width(), viewport.half_height());
        let screen = Mat4::new(
            hw, 0.0, 0.0, 0.0,
            0.0, -hh, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
            hw, hh, 0.0, 1.0,
        );

        log::debug!(
            "projection built: h_fov={:.3} v_fov={:.3} near={} far={} viewport={}x{}",
            camera.h_fov,
            camera.v_fov,
            near,
            far,
            viewport.width,
            viewport.height
        );

        Self {
            projection,
            screen,
            half_width: hw,
            half_height: hh,
        }
    }

    /// View space to clip space
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Normalized device coordinates to pixels, y pointing down
    pub fn screen_matrix(&self) -> &Mat4 {
        &self.screen
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }
}
