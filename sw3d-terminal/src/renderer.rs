/// ASCII drawing surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use sw3d_core::{Color, DrawSurface, Viewport};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Character-cell surface that fills flat triangles in painter's order.
///
/// There is no depth buffer: later triangles simply overwrite earlier ones.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::BLACK; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as u32, self.height as u32)
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::BLACK);
    }

    /// Character at a cell, `None` outside the surface
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    fn plot(&mut self, x: i32, y: i32, character: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = character;
        self.color_buffer[idx] = color;
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32); 3], character: char, color: Color) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, (px, py)) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, character, color);
                    }
                }
            }
        }
    }

    /// Bresenham line between two cell positions
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), character: char, color: Color) {
        let (mut x0, mut y0) = (from.0 as i32, from.1 as i32);
        let (x1, y1) = (to.0 as i32, to.1 as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, character, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Write the buffer to `writer`, starting at the top-left corner
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let Color { r, g, b } = self.color_buffer[idx];

                writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for AsciiRenderer {
    fn fill_triangle(&mut self, points: [(f32, f32); 3], color: Color) {
        self.rasterize_triangle(&points, shade_char(color), color);
    }

    fn outline_triangle(&mut self, points: [(f32, f32); 3], color: Color) {
        let character = shade_char(color);
        for i in 0..3 {
            self.draw_line(points[i], points[(i + 1) % 3], character, color);
        }
    }
}

/// Map a color's brightness onto the luminosity ramp
fn shade_char(color: Color) -> char {
    let char_index = (color.luminance() * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_char_extremes() {
        assert_eq!(shade_char(Color::BLACK), ' ');
        assert_eq!(shade_char(Color::WHITE), '@');
    }

    #[test]
    fn test_fill_covers_interior_for_either_winding() {
        let mut renderer = AsciiRenderer::new(20, 10);
        renderer.fill_triangle([(0.0, 0.0), (20.0, 0.0), (0.0, 10.0)], Color::WHITE);
        assert_eq!(renderer.cell(1, 1), Some('@'));
        assert_eq!(renderer.cell(19, 9), Some(' '));

        renderer.clear();
        renderer.fill_triangle([(0.0, 0.0), (0.0, 10.0), (20.0, 0.0)], Color::WHITE);
        assert_eq!(renderer.cell(1, 1), Some('@'));
    }

    #[test]
    fn test_later_triangles_overwrite_earlier() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let square = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        renderer.fill_triangle(square, Color::WHITE);
        renderer.fill_triangle(square, Color::WHITE.scaled(0.1));
        assert_eq!(renderer.cell(2, 2), Some('.'));
    }

    #[test]
    fn test_outline_draws_edges_only() {
        let mut renderer = AsciiRenderer::new(10, 10);
        renderer.outline_triangle([(0.0, 0.0), (9.0, 0.0), (0.0, 9.0)], Color::WHITE);
        assert_eq!(renderer.cell(5, 0), Some('@'));
        assert_eq!(renderer.cell(0, 5), Some('@'));
        assert_eq!(renderer.cell(2, 2), Some(' '));
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut renderer = AsciiRenderer::new(10, 10);
        renderer.fill_triangle([(1.0, 1.0), (5.0, 5.0), (9.0, 9.0)], Color::WHITE);
        assert!((0..10).all(|i| renderer.cell(i, i) == Some(' ')));
    }

    #[test]
    fn test_draw_emits_every_cell() {
        let mut renderer = AsciiRenderer::new(3, 2);
        renderer.fill_triangle([(0.0, 0.0), (3.0, 0.0), (0.0, 2.0)], Color::WHITE);

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('@'));
        assert_eq!(renderer.viewport(), Viewport::new(3, 2));
    }
}
