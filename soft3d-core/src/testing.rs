/// In-memory surface shared by the unit tests
use std::io;

use nalgebra::Point2;

use crate::error::SurfaceError;
use crate::surface::{Color, Surface, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Polygon {
        color: Color,
        points: Vec<Point2<f32>>,
        stroke_width: u32,
    },
    Circle {
        color: Color,
        center: Point2<f32>,
        radius: f32,
    },
    Text {
        text: String,
        anchor: Point2<f32>,
        color: Color,
    },
}

/// Records every call; polygons in `fail_on` color fail instead.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub viewport: Viewport,
    pub calls: Vec<DrawCall>,
    pub fail_on: Option<Color>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(color: Color) -> Self {
        Self {
            fail_on: Some(color),
            ..Self::default()
        }
    }

    pub fn polygons(&self) -> Vec<(Color, Vec<Point2<f32>>)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Polygon { color, points, .. } => Some((*color, points.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(String, Point2<f32>)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, anchor, .. } => Some((text.clone(), *anchor)),
                _ => None,
            })
            .collect()
    }

    /// (color, center, radius) of every circle
    pub fn circles(&self) -> Vec<(Color, Point2<f32>, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Circle {
                    color,
                    center,
                    radius,
                } => Some((*color, *center, *radius)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn draw_polygon(
        &mut self,
        color: Color,
        points: &[Point2<f32>],
        stroke_width: u32,
    ) -> Result<(), SurfaceError> {
        if self.fail_on == Some(color) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected failure").into());
        }
        self.calls.push(DrawCall::Polygon {
            color,
            points: points.to_vec(),
            stroke_width,
        });
        Ok(())
    }

    fn draw_circle(
        &mut self,
        color: Color,
        center: Point2<f32>,
        radius: f32,
    ) -> Result<(), SurfaceError> {
        self.calls.push(DrawCall::Circle {
            color,
            center,
            radius,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point2<f32>,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            anchor,
            color,
        });
        Ok(())
    }
}
