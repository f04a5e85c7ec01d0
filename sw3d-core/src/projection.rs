/// Perspective projection and NDC-to-screen mapping
use serde::{Deserialize, Serialize};

use crate::geometry::Triangle;
use crate::matrix::Matrix4x4;
use crate::transform::Transform;
use crate::vector::Vector3H;

/// Projection parameters, fixed for the lifetime of a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane (view-space z)
    pub near: f32,
    /// Far plane
    pub far: f32,
}

impl ProjectionConfig {
    pub fn matrix(&self, aspect_ratio: f32) -> Matrix4x4 {
        Transform::projection(self.fov_degrees, aspect_ratio, self.near, self.far)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Size of the drawing surface in pixels or character cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Height over width, corrected for non-square cells.
    ///
    /// `cell_aspect` is the height/width ratio of a single cell: 1 for
    /// pixels, about 2 for terminal characters.
    pub fn aspect_ratio(&self, cell_aspect: f32) -> f32 {
        self.height / self.width * cell_aspect
    }
}

/// Project a view-space triangle to screen space.
///
/// Each vertex is multiplied by `projection`, divided by its `w`, flipped
/// vertically and scaled from `[-1, 1]` to the viewport. `z` keeps its
/// post-divide value for depth sorting. Returns `None` when a vertex has
/// `w` at zero or the divide produces a non-finite value.
pub fn project_triangle(
    projection: &Matrix4x4,
    triangle: &Triangle,
    viewport: &Viewport,
) -> Option<Triangle> {
    let mut points = [Vector3H::ZERO; 3];

    for (out, vertex) in points.iter_mut().zip(&triangle.points) {
        let clip = projection.mul_vector(vertex);
        if clip.w.abs() < f32::EPSILON {
            log::debug!("dropping triangle: vertex {:?} projects to w = 0", vertex);
            return None;
        }

        let ndc = clip / clip.w;
        if !ndc.is_finite() {
            log::debug!("dropping triangle: non-finite projection of {:?}", vertex);
            return None;
        }

        // Screen y grows downward
        let flipped = Vector3H::new(ndc.x, -ndc.y, ndc.z);
        let offset = flipped + Vector3H::new(1.0, 1.0, 0.0);
        *out = Vector3H::new(
            offset.x * 0.5 * viewport.width,
            offset.y * 0.5 * viewport.height,
            offset.z,
        );
    }

    Some(Triangle {
        points,
        color: triangle.color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_config_defaults() {
        let config = ProjectionConfig::default();
        assert_eq!(config.fov_degrees, 90.0);
        assert!((config.near - 0.1).abs() < 1e-6);
        assert_eq!(config.far, 1000.0);
    }

    #[test]
    fn test_point_on_axis_maps_to_centre() {
        let viewport = Viewport::new(800, 600);
        let matrix = ProjectionConfig::default().matrix(viewport.aspect_ratio(1.0));
        let p = Vector3H::new(0.0, 0.0, 5.0);

        let projected = project_triangle(&matrix, &Triangle::new(p, p, p), &viewport).unwrap();
        for point in projected.points {
            assert!((point.x - 400.0).abs() < 1e-3);
            assert!((point.y - 300.0).abs() < 1e-3);
            assert!(point.z > 0.0 && point.z < 1.0);
        }
    }

    #[test]
    fn test_up_is_toward_top_of_screen() {
        let viewport = Viewport::new(100, 100);
        let matrix = ProjectionConfig::default().matrix(1.0);
        let triangle = Triangle::new(
            Vector3H::new(0.0, 1.0, 5.0),
            Vector3H::new(1.0, 0.0, 5.0),
            Vector3H::new(0.0, 0.0, 5.0),
        );

        let projected = project_triangle(&matrix, &triangle, &viewport).unwrap();
        assert!(projected.points[0].y < 50.0);
        assert!(projected.points[1].x > 50.0);
    }

    #[test]
    fn test_zero_w_is_dropped() {
        let viewport = Viewport::new(100, 100);
        let matrix = ProjectionConfig::default().matrix(1.0);
        let triangle = Triangle::new(
            Vector3H::new(0.0, 0.0, 0.0),
            Vector3H::new(1.0, 0.0, 5.0),
            Vector3H::new(0.0, 1.0, 5.0),
        );

        assert!(project_triangle(&matrix, &triangle, &viewport).is_none());
    }

    #[test]
    fn test_aspect_ratio_accounts_for_cells() {
        let viewport = Viewport::new(160, 40);
        assert!((viewport.aspect_ratio(2.0) - 0.5).abs() < 1e-6);
    }
}
