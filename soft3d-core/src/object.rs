/// Drawable objects and the per-object screen projection pipeline
use std::ops::AddAssign;
use std::time::Duration;

use nalgebra::{Point2, Vector3};

use crate::error::{MeshError, RenderError, SurfaceError};
use crate::geometry::{Face, Mesh};
use crate::pipeline::{FrameContext, ScreenVertex};
use crate::surface::{Color, Surface};
use crate::transform::{Mat4, Transform, Vec4};

/// Outline width handed to [`Surface::draw_polygon`]
pub const STROKE_WIDTH: u32 = 3;
/// Radius of vertex markers
pub const MARKER_RADIUS: f32 = 6.0;
pub const MARKER_COLOR: Color = Color::WHITE;
pub const LABEL_COLOR: Color = Color::WHITE;

/// A mesh with per-face colors, optional labels and drawing flags.
///
/// Transform calls overwrite the stored vertices; there is no separate model
/// matrix, so earlier poses cannot be recovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    name: String,
    vertices: Vec<Vec4>,
    faces: Vec<Face>,
    colors: Vec<Color>,
    labels: Option<Vec<String>>,
    draw_vertices: bool,
    spin: Option<f32>,
}

/// Screen-space result of running the pipeline on one object
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedObject {
    pub vertices: Vec<ScreenVertex>,
    /// Per vertex: survives the frame's cull test
    pub visible: Vec<bool>,
    pub faces: Vec<ProjectedFace>,
}

/// A face assembled from screen points in index order
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    pub index: usize,
    pub points: Vec<Point2<f32>>,
    pub culled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub faces_drawn: usize,
    pub faces_culled: usize,
    pub markers_drawn: usize,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, other: Self) {
        self.faces_drawn += other.faces_drawn;
        self.faces_culled += other.faces_culled;
        self.markers_drawn += other.markers_drawn;
    }
}

impl Object {
    /// Validate `mesh` and paint every face with `color`
    pub fn new(mesh: Mesh, color: Color) -> Result<Self, MeshError> {
        mesh.validate()?;
        let colors = vec![color; mesh.faces.len()];
        Ok(Self::from_parts("object", mesh, colors, None))
    }

    /// Build from data known to be consistent
    pub(crate) fn from_parts(
        name: &str,
        mesh: Mesh,
        colors: Vec<Color>,
        labels: Option<Vec<String>>,
    ) -> Self {
        debug_assert!(mesh.validate().is_ok());
        debug_assert_eq!(colors.len(), mesh.faces.len());
        Self {
            name: name.to_string(),
            vertices: mesh.vertices,
            faces: mesh.faces,
            colors,
            labels,
            draw_vertices: false,
            spin: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// One color per face, in face order
    pub fn with_face_colors(mut self, colors: Vec<Color>) -> Result<Self, MeshError> {
        self.check_face_count("colors", colors.len())?;
        self.colors = colors;
        Ok(self)
    }

    /// One label per face, drawn at the face's last point
    pub fn with_labels<I, S>(mut self, labels: I) -> Result<Self, MeshError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        self.check_face_count("labels", labels.len())?;
        self.labels = Some(labels);
        Ok(self)
    }

    pub fn with_vertex_markers(mut self, enabled: bool) -> Self {
        self.draw_vertices = enabled;
        self
    }

    /// Spin about the Y axis at `rate` radians per second
    pub fn with_spin(mut self, rate: f32) -> Self {
        self.spin = Some(rate);
        self
    }

    fn check_face_count(&self, what: &'static str, actual: usize) -> Result<(), MeshError> {
        if actual != self.faces.len() {
            return Err(MeshError::CountMismatch {
                what,
                expected: self.faces.len(),
                actual,
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    pub fn draws_vertices(&self) -> bool {
        self.draw_vertices
    }

    pub fn spin(&self) -> Option<f32> {
        self.spin
    }

    /// Right-multiply the whole vertex buffer by `matrix`
    pub fn transform(&mut self, matrix: &Mat4) {
        Transform::apply(&mut self.vertices, matrix);
    }

    pub fn translate(&mut self, offset: &Vector3<f32>) {
        self.transform(&Transform::translation(offset));
    }

    pub fn scale(&mut self, factor: f32) {
        self.transform(&Transform::scale(factor));
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.transform(&Transform::rotation_x(angle));
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.transform(&Transform::rotation_y(angle));
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.transform(&Transform::rotation_z(angle));
    }

    /// Advance self-rotation by `dt`
    pub fn update(&mut self, dt: Duration) {
        if let Some(rate) = self.spin {
            self.rotate_y(rate * dt.as_secs_f32());
        }
    }

    /// Run the pipeline without drawing anything
    pub fn project(&self, ctx: &FrameContext) -> ProjectedObject {
        let clip = ctx.clip_matrix();
        let vertices: Vec<ScreenVertex> = self
            .vertices
            .iter()
            .map(|v| ctx.to_screen(*v * clip))
            .collect();
        let visible: Vec<bool> = vertices.iter().map(|v| !ctx.is_culled(v)).collect();

        let faces = self
            .faces
            .iter()
            .enumerate()
            .map(|(index, face)| ProjectedFace {
                index,
                points: face.iter().map(|&i| vertices[i].point).collect(),
                culled: face.iter().any(|&i| !visible[i]),
            })
            .collect();

        ProjectedObject {
            vertices,
            visible,
            faces,
        }
    }

    /// Project and hand every surviving face to `surface`
    pub fn draw(
        &self,
        ctx: &FrameContext,
        surface: &mut dyn Surface,
    ) -> Result<DrawStats, RenderError> {
        let projected = self.project(ctx);
        let mut stats = DrawStats::default();

        for face in &projected.faces {
            if face.culled {
                log::trace!("{}: face {} culled", self.name, face.index);
                stats.faces_culled += 1;
                continue;
            }
            let fail = |source: SurfaceError| RenderError::Face {
                face: face.index,
                source,
            };
            surface
                .draw_polygon(self.colors[face.index], &face.points, STROKE_WIDTH)
                .map_err(fail)?;
            if let (Some(labels), Some(anchor)) = (&self.labels, face.points.last()) {
                surface
                    .draw_text(&labels[face.index], *anchor, LABEL_COLOR)
                    .map_err(fail)?;
            }
            stats.faces_drawn += 1;
        }

        if self.draw_vertices {
            for (vertex, v) in projected.vertices.iter().enumerate() {
                if !projected.visible[vertex] {
                    continue;
                }
                surface
                    .draw_circle(MARKER_COLOR, v.point, MARKER_RADIUS)
                    .map_err(|source| RenderError::Marker { vertex, source })?;
                stats.markers_drawn += 1;
            }
        }

        Ok(stats)
    }
}
