/// Affine matrices in the row-vector convention (`v' = v * M`)
///
/// Every matrix here carries its translation in the last row, so transforms
/// compose left to right: `v * M1 * M2` applies `M1` first.
use nalgebra::{Matrix4, RowVector4, Vector3};

/// Homogeneous row vector (x, y, z, w)
pub type Vec4 = RowVector4<f32>;

/// 4x4 matrix applied on the right of a row vector
pub type Mat4 = Matrix4<f32>;

/// A point (w = 1)
pub fn point(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

/// A direction (w = 0), unaffected by the translation row
pub fn direction(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 0.0)
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    #[rustfmt::skip]
    pub fn translation(offset: &Vector3<f32>) -> Mat4 {
        Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            offset.x, offset.y, offset.z, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_x(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_y(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::new(
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_z(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::new(
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a uniform scale matrix
    #[rustfmt::skip]
    pub fn scale(factor: f32) -> Mat4 {
        Mat4::new(
            factor, 0.0, 0.0, 0.0,
            0.0, factor, 0.0, 0.0,
            0.0, 0.0, factor, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-multiply every row vector in place
    pub fn apply(vectors: &mut [Vec4], matrix: &Mat4) {
        for v in vectors.iter_mut() {
            *v = *v * matrix;
        }
    }
}
