/// Geometry primitives for 3D rendering
use crate::vector::Vector3H;

/// Flat RGB color applied to a whole triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor`, clamped to `[0, 1]`
    pub fn scaled(self, factor: f32) -> Self {
        let factor = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Perceived brightness in `[0, 1]` (Rec. 601 weights)
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A triangle face defined by three vertices and one flat color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vector3H; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(p0: Vector3H, p1: Vector3H, p2: Vector3H) -> Self {
        Self {
            points: [p0, p1, p2],
            color: Color::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Unit face normal from `cross(p1 - p0, p2 - p0)`.
    ///
    /// `None` for a zero-area triangle.
    pub fn normal(&self) -> Option<Vector3H> {
        let [p0, p1, p2] = self.points;
        let edge1 = p1 - p0;
        let edge2 = p2 - p0;

        edge1.cross(&edge2).normalized()
    }

    /// Mean `z` of the three vertices, the painter's sort key
    pub fn average_depth(&self) -> f32 {
        let [p0, p1, p2] = self.points;
        (p0.z + p1.z + p2.z) / 3.0
    }

    /// Apply `f` to every vertex, keeping the color
    pub fn map_points(&self, mut f: impl FnMut(&Vector3H) -> Vector3H) -> Self {
        let [p0, p1, p2] = &self.points;
        Self {
            points: [f(p0), f(p1), f(p2)],
            color: self.color,
        }
    }

    /// Screen-space `(x, y)` pairs for a drawing surface
    pub fn screen_points(&self) -> [(f32, f32); 3] {
        self.points.map(|p| (p.x, p.y))
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned cube centred on the origin.
    ///
    /// Twelve triangles, two per face, wound so that
    /// `cross(p1 - p0, p2 - p0)` points out of the cube.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let v = Vector3H::new;
        let mut mesh = Self::with_capacity(12);

        let faces = [
            // +Z
            [v(-h, -h, h), v(h, -h, h), v(h, h, h), v(-h, h, h)],
            // -Z
            [v(-h, -h, -h), v(-h, h, -h), v(h, h, -h), v(h, -h, -h)],
            // +Y
            [v(-h, h, -h), v(-h, h, h), v(h, h, h), v(h, h, -h)],
            // -Y
            [v(-h, -h, -h), v(h, -h, -h), v(h, -h, h), v(-h, -h, h)],
            // +X
            [v(h, -h, -h), v(h, h, -h), v(h, h, h), v(h, -h, h)],
            // -X
            [v(-h, -h, -h), v(-h, -h, h), v(-h, h, h), v(-h, h, -h)],
        ];

        for [a, b, c, d] in faces {
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        }

        mesh
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_normals_point_outward() {
        let mesh = Mesh::cube(2.0);
        assert_eq!(mesh.len(), 12);

        for triangle in &mesh.triangles {
            let normal = triangle.normal().unwrap();
            let [p0, p1, p2] = triangle.points;
            let centroid = (p0 + p1 + p2) / 3.0;
            assert!(normal.dot(&centroid) > 0.0, "inward face {:?}", triangle);
        }
    }

    #[test]
    fn test_degenerate_triangle_has_no_normal() {
        let p = Vector3H::new(1.0, 2.0, 3.0);
        let triangle = Triangle::new(p, p, Vector3H::new(2.0, 4.0, 6.0));
        assert!(triangle.normal().is_none());
    }

    #[test]
    fn test_average_depth() {
        let triangle = Triangle::new(
            Vector3H::new(0.0, 0.0, 1.0),
            Vector3H::new(0.0, 0.0, 2.0),
            Vector3H::new(0.0, 0.0, 6.0),
        );
        assert!((triangle.average_depth() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_scaling() {
        assert_eq!(Color::WHITE.scaled(0.5), Color::new(128, 128, 128));
        assert_eq!(Color::new(200, 100, 0).scaled(2.0), Color::new(200, 100, 0));
        assert_eq!(Color::WHITE.scaled(f32::NAN), Color::BLACK);
        assert!((Color::WHITE.luminance() - 1.0).abs() < 1e-3);
    }
}
