/// Triangle-versus-plane clipping
use crate::geometry::Triangle;
use crate::projection::Viewport;
use crate::vector::Vector3H;

/// A clipping plane. Points with non-negative signed distance are inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vector3H,
    normal: Vector3H,
}

impl Plane {
    /// Plane through `point` facing `normal`; `None` for a zero normal
    pub fn new(point: Vector3H, normal: Vector3H) -> Option<Self> {
        normal.normalized().map(|normal| Self { point, normal })
    }

    const fn from_unit(point: Vector3H, normal: Vector3H) -> Self {
        Self { point, normal }
    }

    /// View-space near plane at `z = near`, keeping everything in front of it
    pub fn near(near: f32) -> Self {
        Self::from_unit(Vector3H::new(0.0, 0.0, near), Vector3H::new(0.0, 0.0, 1.0))
    }

    /// The four screen edges in clipping order: top, bottom, left, right
    pub fn viewport_edges(viewport: &Viewport) -> [Self; 4] {
        [
            Self::from_unit(Vector3H::ZERO, Vector3H::new(0.0, 1.0, 0.0)),
            Self::from_unit(
                Vector3H::new(0.0, viewport.height - 1.0, 0.0),
                Vector3H::new(0.0, -1.0, 0.0),
            ),
            Self::from_unit(Vector3H::ZERO, Vector3H::new(1.0, 0.0, 0.0)),
            Self::from_unit(
                Vector3H::new(viewport.width - 1.0, 0.0, 0.0),
                Vector3H::new(-1.0, 0.0, 0.0),
            ),
        ]
    }

    pub fn point(&self) -> Vector3H {
        self.point
    }

    pub fn normal(&self) -> Vector3H {
        self.normal
    }

    /// Signed distance from `p` to the plane
    pub fn distance(&self, p: &Vector3H) -> f32 {
        self.normal.dot(p) - self.normal.dot(&self.point)
    }
}

/// Point where the segment `line_start -> line_end` crosses `plane`.
///
/// The endpoints must lie on opposite sides of the plane (or one exactly on
/// it), otherwise the denominator may vanish.
pub fn intersect_plane(plane: &Plane, line_start: &Vector3H, line_end: &Vector3H) -> Vector3H {
    let plane_d = -plane.normal.dot(&plane.point);
    let ad = line_start.dot(&plane.normal);
    let bd = line_end.dot(&plane.normal);
    let t = (-plane_d - ad) / (bd - ad);

    *line_start + (*line_end - *line_start) * t
}

/// Result of clipping one triangle against one plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clipped {
    /// Entirely outside
    Discarded,
    One(Triangle),
    /// Two triangles covering the clipped quad; they share an edge
    Two(Triangle, Triangle),
}

impl Clipped {
    pub fn count(&self) -> usize {
        match self {
            Clipped::Discarded => 0,
            Clipped::One(_) => 1,
            Clipped::Two(_, _) => 2,
        }
    }
}

impl IntoIterator for Clipped {
    type Item = Triangle;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<Triangle>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        let pair = match self {
            Clipped::Discarded => [None, None],
            Clipped::One(a) => [Some(a), None],
            Clipped::Two(a, b) => [Some(a), Some(b)],
        };
        pair.into_iter().flatten()
    }
}

/// Up to three vertices, in their original order
#[derive(Default)]
struct VertexSet {
    points: [Vector3H; 3],
    len: usize,
}

impl VertexSet {
    fn push(&mut self, p: Vector3H) {
        self.points[self.len] = p;
        self.len += 1;
    }
}

/// Clip `triangle` against `plane`, producing zero, one or two triangles.
///
/// A vertex exactly on the plane counts as inside. New vertices are placed
/// on the edges running from inside to outside vertices, and the color is
/// carried over unchanged.
pub fn clip_against_plane(plane: &Plane, triangle: &Triangle) -> Clipped {
    let mut inside = VertexSet::default();
    let mut outside = VertexSet::default();

    for p in &triangle.points {
        if plane.distance(p) >= 0.0 {
            inside.push(*p);
        } else {
            outside.push(*p);
        }
    }

    let color = triangle.color;
    match inside.len {
        0 => Clipped::Discarded,
        3 => Clipped::One(*triangle),
        1 => {
            let a = inside.points[0];
            Clipped::One(Triangle {
                points: [
                    a,
                    intersect_plane(plane, &a, &outside.points[0]),
                    intersect_plane(plane, &a, &outside.points[1]),
                ],
                color,
            })
        }
        _ => {
            let [a, b, _] = inside.points;
            let c = outside.points[0];
            let ac = intersect_plane(plane, &a, &c);
            let bc = intersect_plane(plane, &b, &c);

            Clipped::Two(
                Triangle {
                    points: [a, b, ac],
                    color,
                },
                Triangle {
                    points: [b, ac, bc],
                    color,
                },
            )
        }
    }
}
