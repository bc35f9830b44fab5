/// Camera, projection and objects rendered together each frame
use std::time::Duration;

use crate::camera::Camera;
use crate::config::Config;
use crate::input::Intent;
use crate::object::{DrawStats, Object};
use crate::pipeline::{CullMode, DivideMode, FrameContext};
use crate::projection::Projection;
use crate::surface::{Surface, Viewport};

/// Outcome of one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub stats: DrawStats,
    /// Objects whose drawing failed this frame
    pub failed: usize,
}

pub struct Scene {
    camera: Camera,
    projection: Projection,
    objects: Vec<Object>,
    divide: DivideMode,
    cull: CullMode,
}

impl Scene {
    /// The projection is derived from `camera` here and never rebuilt
    pub fn new(camera: Camera, viewport: Viewport) -> Self {
        let projection = Projection::new(&camera, viewport);
        Self {
            camera,
            projection,
            objects: Vec::new(),
            divide: DivideMode::default(),
            cull: CullMode::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut scene = Self::new(Camera::from_config(config), config.viewport());
        scene.divide = config.divide;
        scene.cull = config.cull;
        scene
    }

    /// Add an object, returning its index
    pub fn add(&mut self, object: Object) -> usize {
        log::debug!(
            "adding {} ({} vertices, {} faces)",
            object.name(),
            object.vertices().len(),
            object.faces().len()
        );
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    /// Feed this frame's intents to the camera. Returns false on quit;
    /// intents after the quit are dropped.
    pub fn apply(&mut self, intents: &[Intent]) -> bool {
        for &intent in intents {
            if intent == Intent::Quit {
                return false;
            }
            self.camera.apply(intent);
        }
        true
    }

    /// Snapshot of the camera and projection for this frame
    pub fn frame_context(&self) -> FrameContext {
        FrameContext::new(&self.camera, &self.projection)
            .with_divide(self.divide)
            .with_cull(self.cull)
    }

    /// Draw every object, then advance self-rotation by `dt`.
    ///
    /// A failing object is logged and skipped; the rest of the frame still
    /// renders.
    pub fn render(&mut self, surface: &mut dyn Surface, dt: Duration) -> FrameReport {
        let ctx = self.frame_context();
        let mut report = FrameReport::default();

        for object in &mut self.objects {
            match object.draw(&ctx, surface) {
                Ok(stats) => report.stats += stats,
                Err(e) => {
                    log::error!("failed to render {}: {e}", object.name());
                    report.failed += 1;
                }
            }
            object.update(dt);
        }

        log::trace!(
            "frame: {} faces drawn, {} culled, {} markers, {} failed",
            report.stats.faces_drawn,
            report.stats.faces_culled,
            report.stats.markers_drawn,
            report.failed
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::axes;
    use crate::geometry::Mesh;
    use crate::surface::Color;
    use crate::testing::RecordingSurface;
    use nalgebra::Vector3;

    fn scene() -> Scene {
        let viewport = Viewport::new(800, 600);
        let mut scene = Scene::new(Camera::new(Vector3::new(0.0, 0.0, -4.0), viewport), viewport);
        let mut cube = Object::new(Mesh::cube(), Color::ORANGE)
            .unwrap()
            .named("cube");
        cube.translate(&Vector3::new(0.1, 0.1, 0.0));
        scene.add(cube);
        let mut gizmo = axes();
        gizmo.translate(&Vector3::new(-0.5, -0.5, 0.5));
        scene.add(gizmo);
        scene
    }

    #[test]
    fn test_render_draws_all_objects() {
        let mut scene = scene();
        let mut surface = RecordingSurface::new();
        let report = scene.render(&mut surface, Duration::ZERO);
        assert_eq!(report.failed, 0);
        assert_eq!(report.stats.faces_drawn, 9);
        assert_eq!(surface.texts().len(), 3);
    }

    #[test]
    fn test_failing_object_does_not_abort_frame() {
        let mut scene = scene();
        let mut surface = RecordingSurface::failing_on(Color::ORANGE);
        let report = scene.render(&mut surface, Duration::ZERO);
        assert_eq!(report.failed, 1);
        // The axes after the cube still render
        assert_eq!(report.stats.faces_drawn, 3);
        assert_eq!(surface.polygons().len(), 3);
    }

    #[test]
    fn test_render_advances_spinning_objects() {
        let mut scene = scene();
        let idx = scene.add(axes().with_spin(1.0));
        let before = scene.objects()[idx].vertices().to_vec();
        let still = scene.objects()[0].vertices().to_vec();
        scene.render(&mut RecordingSurface::new(), Duration::from_millis(100));
        assert_ne!(scene.objects()[idx].vertices(), &before[..]);
        assert_eq!(scene.objects()[0].vertices(), &still[..]);
    }

    #[test]
    fn test_apply_moves_camera_and_reports_quit() {
        let mut scene = scene();
        let start = scene.camera().position;
        assert!(scene.apply(&[Intent::MoveForward, Intent::YawLeft]));
        assert!(scene.camera().position.z > start.z);
        assert!(!scene.apply(&[Intent::Quit]));
    }

    #[test]
    fn test_intents_after_quit_are_ignored() {
        let mut scene = scene();
        let start = scene.camera().clone();
        assert!(!scene.apply(&[Intent::Quit, Intent::MoveForward, Intent::YawRight]));
        assert_eq!(scene.camera(), &start);
    }

    #[test]
    fn test_projection_survives_camera_changes() {
        let mut scene = scene();
        let before = scene.projection().clone();
        scene.camera_mut().far = 2.0;
        scene.apply(&[Intent::PitchUp]);
        assert_eq!(scene.projection(), &before);
    }

    #[test]
    fn test_from_config_carries_modes() {
        let config = Config {
            cull: CullMode::GuardFlag,
            divide: DivideMode::Ieee,
            ..Config::default()
        };
        let ctx = Scene::from_config(&config).frame_context();
        assert_eq!(ctx.cull, CullMode::GuardFlag);
        assert_eq!(ctx.divide, DivideMode::Ieee);
    }
}
