/// Drawing surface interface consumed by the object pipeline
use nalgebra::Point2;

use crate::error::SurfaceError;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const DARK_SLATE_GRAY: Color = Color::rgb(47, 79, 79);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pixel dimensions of the drawing area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Half of the width, rounded down to a whole pixel
    pub fn half_width(&self) -> f32 {
        (self.width / 2) as f32
    }

    /// Half of the height, rounded down to a whole pixel
    pub fn half_height(&self) -> f32 {
        (self.height / 2) as f32
    }

    /// Height over width
    pub fn aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// A 2D target that accepts screen-space primitives.
///
/// The pipeline only writes to a surface, it never reads pixels back.
pub trait Surface {
    fn viewport(&self) -> Viewport;

    /// Outline the polygon through `points` in order. Two points draw a segment.
    fn draw_polygon(
        &mut self,
        color: Color,
        points: &[Point2<f32>],
        stroke_width: u32,
    ) -> Result<(), SurfaceError>;

    fn draw_circle(
        &mut self,
        color: Color,
        center: Point2<f32>,
        radius: f32,
    ) -> Result<(), SurfaceError>;

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point2<f32>,
        color: Color,
    ) -> Result<(), SurfaceError>;
}
