/// Character-cell drawing surface for the terminal
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use soft3d_core::{Color, Surface, SurfaceError, Viewport};
use std::io::Write;

/// Stroke characters from thinnest to thickest
const STROKE_RAMP: &[char] = &['.', '+', '#'];
const MARKER: char = 'o';

/// Lines spanning more cells than this are dropped instead of walked
const MAX_LINE_SPAN: i64 = 1 << 16;
/// Cell coordinates are clamped to this magnitude; NaN maps to 0
const COORD_LIMIT: f32 = 1.0e9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

/// Maps the pixel viewport onto a grid of terminal cells.
///
/// Drawing only touches the in-memory grid; [`TerminalSurface::present`]
/// writes it out.
pub struct TerminalSurface {
    viewport: Viewport,
    cols: usize,
    rows: usize,
    background: Color,
    cells: Vec<Option<Cell>>,
}

impl TerminalSurface {
    pub fn new(viewport: Viewport, cols: usize, rows: usize, background: Color) -> Self {
        Self {
            viewport,
            cols,
            rows,
            background,
            cells: vec![None; cols * rows],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        log::debug!("terminal resized to {cols}x{rows}");
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![None; cols * rows];
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    fn to_cell(&self, p: Point2<f32>) -> (i64, i64) {
        let x = p.x * self.cols as f32 / self.viewport.width as f32;
        let y = p.y * self.rows as f32 / self.viewport.height as f32;
        let clamp = |v: f32| v.floor().clamp(-COORD_LIMIT, COORD_LIMIT) as i64;
        (clamp(x), clamp(y))
    }

    fn plot(&mut self, col: i64, row: i64, cell: Cell) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = Some(cell);
        }
    }

    /// Bresenham line between two cells, clipped to the grid
    fn line(&mut self, from: (i64, i64), to: (i64, i64), cell: Cell) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        if dx.max(-dy) > MAX_LINE_SPAN {
            log::warn!("skipping line {from:?} -> {to:?}: too long");
            return;
        }
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, cell);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Write the grid at the cursor's home position
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(term_color(self.background)))?;
        let mut current: Option<Color> = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                match self.cells[row * self.cols + col] {
                    Some(cell) => {
                        if current != Some(cell.color) {
                            writer.queue(SetForegroundColor(term_color(cell.color)))?;
                            current = Some(cell.color);
                        }
                        writer.queue(Print(cell.ch))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Surface for TerminalSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn draw_polygon(
        &mut self,
        color: Color,
        points: &[Point2<f32>],
        stroke_width: u32,
    ) -> Result<(), SurfaceError> {
        let ch = STROKE_RAMP[(stroke_width as usize).clamp(1, STROKE_RAMP.len()) - 1];
        let cell = Cell { ch, color };
        let cells: Vec<(i64, i64)> = points.iter().map(|p| self.to_cell(*p)).collect();

        match cells.len() {
            0 => {}
            1 => self.plot(cells[0].0, cells[0].1, cell),
            2 => self.line(cells[0], cells[1], cell),
            n => {
                for i in 0..n {
                    self.line(cells[i], cells[(i + 1) % n], cell);
                }
            }
        }
        Ok(())
    }

    fn draw_circle(
        &mut self,
        color: Color,
        center: Point2<f32>,
        radius: f32,
    ) -> Result<(), SurfaceError> {
        let cell = Cell { ch: MARKER, color };
        let rx = radius * self.cols as f32 / self.viewport.width as f32;
        let ry = radius * self.rows as f32 / self.viewport.height as f32;
        let (cx, cy) = self.to_cell(center);

        // Markers smaller than a cell collapse to one character
        if rx < 1.0 || ry < 1.0 {
            self.plot(cx, cy, cell);
            return Ok(());
        }

        let (rx_cells, ry_cells) = (rx.ceil() as i64, ry.ceil() as i64);
        for row in cy - ry_cells..=cy + ry_cells {
            for col in cx - rx_cells..=cx + rx_cells {
                let dx = (col - cx) as f32 / rx;
                let dy = (row - cy) as f32 / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.plot(col, row, cell);
                }
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point2<f32>,
        color: Color,
    ) -> Result<(), SurfaceError> {
        let (col, row) = self.to_cell(anchor);
        for (offset, ch) in text.chars().enumerate() {
            self.plot(col + offset as i64, row, Cell { ch, color });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 10 x 25 pixels per cell
    fn surface() -> TerminalSurface {
        TerminalSurface::new(Viewport::new(800, 600), 80, 24, Color::DARK_SLATE_GRAY)
    }

    fn chars_in_row(surface: &TerminalSurface, row: usize) -> String {
        (0..surface.size().0)
            .map(|col| surface.cell(col, row).map_or(' ', |c| c.ch))
            .collect()
    }

    #[test]
    fn test_segment_is_a_single_line() {
        let mut s = surface();
        s.draw_polygon(
            Color::RED,
            &[Point2::new(100.0, 260.0), Point2::new(195.0, 260.0)],
            3,
        )
        .unwrap();
        let row = chars_in_row(&s, 10);
        assert_eq!(row.trim(), "##########");
        assert_eq!(s.cell(10, 10).unwrap().color, Color::RED);
        assert_eq!(s.cell(9, 10), None);
    }

    #[test]
    fn test_polygon_closes_back_to_first_point() {
        let mut s = surface();
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(50.0, 0.0),
            Point2::new(50.0, 100.0),
            Point2::new(0.0, 100.0),
        ];
        s.draw_polygon(Color::ORANGE, &square, 1).unwrap();
        // Left edge comes from the closing segment
        for row in 0..=4 {
            assert_eq!(s.cell(0, row).unwrap().ch, '.');
        }
        assert!(s.cell(2, 2).is_none());
    }

    #[test]
    fn test_off_screen_geometry_is_clipped() {
        let mut s = surface();
        s.draw_polygon(
            Color::BLUE,
            &[Point2::new(-400.0, -300.0), Point2::new(1200.0, 900.0)],
            2,
        )
        .unwrap();
        assert_eq!(s.cell(40, 12).unwrap().ch, '+');
        s.draw_polygon(
            Color::BLUE,
            &[Point2::new(f32::NAN, 0.0), Point2::new(1e30, -1e30)],
            2,
        )
        .unwrap();
    }

    #[test]
    fn test_text_starts_at_anchor() {
        let mut s = surface();
        s.draw_text("XYZ", Point2::new(795.0, 599.0), Color::WHITE)
            .unwrap();
        assert_eq!(s.cell(79, 23).unwrap().ch, 'X');
    }

    #[test]
    fn test_small_marker_is_one_cell() {
        let mut s = surface();
        s.draw_circle(Color::WHITE, Point2::new(405.0, 310.0), 6.0)
            .unwrap();
        assert_eq!(s.cell(40, 12).unwrap().ch, 'o');
        assert_eq!(s.cells.iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_large_marker_fills_a_disc() {
        let mut s = TerminalSurface::new(Viewport::new(80, 24), 80, 24, Color::DARK_SLATE_GRAY);
        s.draw_circle(Color::WHITE, Point2::new(40.0, 12.0), 2.0)
            .unwrap();
        assert!(s.cell(40, 12).is_some());
        assert!(s.cell(42, 12).is_some());
        assert!(s.cell(43, 12).is_none());
        assert!(s.cell(42, 14).is_none());
    }

    #[test]
    fn test_clear_and_resize() {
        let mut s = surface();
        s.draw_text("hi", Point2::new(0.0, 0.0), Color::WHITE).unwrap();
        s.clear();
        assert!(s.cell(0, 0).is_none());
        s.resize(40, 10);
        assert_eq!(s.size(), (40, 10));
        assert!(s.cell(39, 9).is_none());
        assert!(s.cell(40, 9).is_none());
    }

    #[test]
    fn test_present_writes_every_cell() {
        let mut s = TerminalSurface::new(Viewport::new(40, 20), 4, 2, Color::DARK_SLATE_GRAY);
        s.draw_text("ab", Point2::new(0.0, 10.0), Color::GREEN).unwrap();
        let mut out = Vec::new();
        s.present(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ab"));
        assert_eq!(text.matches(' ').count(), 6);
    }
}
