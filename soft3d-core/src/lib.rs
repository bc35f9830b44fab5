/// soft3d core library - camera, projection and the per-object vertex pipeline
///
/// Geometry is carried from object space through view space, clip space, a
/// perspective divide and a degeneracy guard into pixel space, then handed to
/// a `Surface` as colored polygons. The row-vector convention (`v' = v * M`)
/// is used throughout.

pub mod axes;
pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod obj;
pub mod object;
pub mod pipeline;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod transform;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use axes::axes;
pub use camera::{Axis, Camera};
pub use config::Config;
pub use error::{ConfigError, MeshError, RenderError, SurfaceError};
pub use geometry::{Face, Mesh};
pub use input::Intent;
pub use object::{DrawStats, Object, ProjectedFace, ProjectedObject};
pub use pipeline::{CullMode, DivideMode, FrameContext, ScreenVertex};
pub use projection::Projection;
pub use scene::{FrameReport, Scene};
pub use surface::{Color, Surface, Viewport};
pub use transform::{Mat4, Transform, Vec4};
