/// Per-vertex stages of the view → clip → screen pipeline.
///
/// A [`FrameContext`] is built once per frame from the camera and the
/// projection and then shared read-only by every object drawn that frame.
/// Each vertex goes through:
///
/// 1. `v * view * projection` (clip space)
/// 2. [`perspective_divide`]
/// 3. [`guard`], which zeroes components outside `[-2, 2]`
/// 4. `v * screen`, keeping x and y
///
/// The guard is not frustum clipping. It only neutralizes extreme values
/// (mostly geometry behind the camera) so they do not draw wild shapes;
/// faces touching a neutralized vertex are then culled according to the
/// frame's [`CullMode`].
use nalgebra::Point2;
use serde::Deserialize;

use crate::camera::Camera;
use crate::projection::Projection;
use crate::transform::{Mat4, Vec4};

/// Components with a larger magnitude than this are zeroed by the guard.
pub const GUARD_LIMIT: f32 = 2.0;

/// Smallest |w| divided by in [`DivideMode::Clamp`].
pub const W_EPSILON: f32 = 1e-6;

/// How the perspective divide treats w close to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivideMode {
    /// |w| below [`W_EPSILON`] is replaced by `W_EPSILON` with w's sign
    /// (`+W_EPSILON` for both zeros) so the divide stays finite.
    #[default]
    Clamp,
    /// Plain IEEE division; w = 0 yields infinities or NaN in x, y and z.
    Ieee,
}

/// Which faces are dropped after the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Drop a face if any point sits exactly on the half-width column or the
    /// half-height row, where a zeroed x or y lands after the screen matrix.
    #[default]
    HalfExtent,
    /// Drop a face if the guard neutralized any of its vertices.
    GuardFlag,
}

/// A vertex after the screen matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub point: Point2<f32>,
    /// False when the guard zeroed at least one component
    pub valid: bool,
}

/// Read-only per-frame snapshot handed to every object's pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct FrameContext {
    pub view: Mat4,
    pub projection: Mat4,
    pub screen: Mat4,
    pub half_width: f32,
    pub half_height: f32,
    pub divide: DivideMode,
    pub cull: CullMode,
}

impl FrameContext {
    pub fn new(camera: &Camera, projection: &Projection) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: *projection.projection_matrix(),
            screen: *projection.screen_matrix(),
            half_width: projection.half_width(),
            half_height: projection.half_height(),
            divide: DivideMode::default(),
            cull: CullMode::default(),
        }
    }

    pub fn with_divide(mut self, divide: DivideMode) -> Self {
        self.divide = divide;
        self
    }

    pub fn with_cull(mut self, cull: CullMode) -> Self {
        self.cull = cull;
        self
    }

    /// World space to clip space in one matrix
    pub fn clip_matrix(&self) -> Mat4 {
        self.view * self.projection
    }

    /// Carry a vertex from clip space to the screen
    pub fn to_screen(&self, clip: Vec4) -> ScreenVertex {
        let ndc = perspective_divide(clip, self.divide);
        let (ndc, valid) = guard(ndc);
        let s = ndc * self.screen;
        ScreenVertex {
            point: Point2::new(s.x, s.y),
            valid,
        }
    }

    /// Whether a vertex disqualifies the face or marker it belongs to
    pub fn is_culled(&self, vertex: &ScreenVertex) -> bool {
        match self.cull {
            CullMode::HalfExtent => {
                vertex.point.x == self.half_width || vertex.point.y == self.half_height
            }
            CullMode::GuardFlag => !vertex.valid,
        }
    }
}

/// Divide x, y and z by the vertex's own w; w itself becomes 1
pub fn perspective_divide(v: Vec4, mode: DivideMode) -> Vec4 {
    let w = match mode {
        DivideMode::Ieee => v.w,
        DivideMode::Clamp if v.w.abs() < W_EPSILON => {
            if v.w < 0.0 {
                -W_EPSILON
            } else {
                W_EPSILON
            }
        }
        DivideMode::Clamp => v.w,
    };
    Vec4::new(v.x / w, v.y / w, v.z / w, 1.0)
}

/// True for components the guard must zero. NaN and infinities count.
pub fn is_degenerate(component: f32) -> bool {
    !(component.abs() <= GUARD_LIMIT)
}

/// Zero every out-of-range component; the flag is false if any was zeroed
pub fn guard(mut v: Vec4) -> (Vec4, bool) {
    let mut valid = true;
    for c in v.iter_mut() {
        if is_degenerate(*c) {
            *c = 0.0;
            valid = false;
        }
    }
    (v, valid)
}
