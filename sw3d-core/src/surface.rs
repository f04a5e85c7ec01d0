/// Drawing surface contract used by the pipeline's dispatch stage
use crate::geometry::Color;

/// Something that can fill a flat-colored 2D triangle.
///
/// Points are screen-space `(x, y)` pairs. Drawing never fails.
pub trait DrawSurface {
    fn fill_triangle(&mut self, points: [(f32, f32); 3], color: Color);

    /// Draw only the edges of a triangle
    fn outline_triangle(&mut self, _points: [(f32, f32); 3], _color: Color) {}
}

/// One call received by a [`RecordingSurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Fill([(f32, f32); 3], Color),
    Outline([(f32, f32); 3], Color),
}

/// Surface that records every draw call, in order
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fills(&self) -> impl Iterator<Item = &[(f32, f32); 3]> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Fill(points, _) => Some(points),
            DrawCall::Outline(_, _) => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_triangle(&mut self, points: [(f32, f32); 3], color: Color) {
        self.calls.push(DrawCall::Fill(points, color));
    }

    fn outline_triangle(&mut self, points: [(f32, f32); 3], color: Color) {
        self.calls.push(DrawCall::Outline(points, color));
    }
}
