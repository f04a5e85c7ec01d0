/// Per-frame rendering pipeline: transform, cull, shade, clip, project,
/// sort and dispatch
use std::collections::VecDeque;

use crate::clip::{clip_against_plane, Plane};
use crate::geometry::{Color, Triangle};
use crate::projection::{project_triangle, Viewport};
use crate::scene::Scene;
use crate::surface::DrawSurface;

/// Minimum light intensity so no visible face is fully black
pub const AMBIENT: f32 = 0.1;

/// Triangle counts at each stage of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles in the mesh
    pub source: usize,
    /// Facing the camera after culling
    pub visible: usize,
    /// Fragments left after the near-plane clip
    pub near_clipped: usize,
    /// Fragments that survived projection
    pub projected: usize,
    /// Fragments handed to the drawing surface
    pub drawn: usize,
}

/// Frame renderer. Holds only presentation options; all scene state comes
/// in through [`Scene`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    /// Draw each fragment's edges in this color after filling it
    pub outline: Option<Color>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outline(mut self, color: Color) -> Self {
        self.outline = Some(color);
        self
    }

    /// World-space triangles facing the camera, flat shaded.
    ///
    /// Triangles with a zero-area face are dropped before culling.
    pub fn visible_triangles(&self, scene: &Scene) -> Vec<Triangle> {
        let world = scene.world_matrix();
        let light = scene.light_dir();
        let camera = scene.camera.position;

        scene
            .mesh
            .triangles
            .iter()
            .filter_map(|triangle| {
                let transformed = triangle.map_points(|p| world.mul_vector(p));

                let Some(normal) = transformed.normal() else {
                    log::trace!("dropping degenerate triangle {:?}", transformed.points);
                    return None;
                };

                let camera_ray = transformed.points[0] - camera;
                if normal.dot(&camera_ray) >= 0.0 {
                    return None;
                }

                let intensity = light.dot(&normal).max(AMBIENT);
                Some(transformed.with_color(triangle.color.scaled(intensity)))
            })
            .collect()
    }

    /// Screen-space fragments for this frame, farthest first.
    ///
    /// Applies the view transform, clips against the near plane and
    /// projects. Fragments are not yet clipped to the screen edges.
    pub fn project(&self, scene: &Scene, viewport: &Viewport) -> (Vec<Triangle>, FrameStats) {
        let mut stats = FrameStats {
            source: scene.mesh.len(),
            ..FrameStats::default()
        };

        let Some(view) = scene.camera.view_matrix() else {
            log::warn!("camera pose {:?} has no view matrix, skipping frame", scene.camera);
            return (Vec::new(), stats);
        };

        let visible = self.visible_triangles(scene);
        stats.visible = visible.len();

        let near = Plane::near(scene.projection().near);
        let viewed: Vec<Triangle> = visible
            .iter()
            .map(|t| t.map_points(|p| view.mul_vector(p)))
            .flat_map(|t| clip_against_plane(&near, &t))
            .collect();
        stats.near_clipped = viewed.len();

        let mut projected: Vec<Triangle> = viewed
            .iter()
            .filter_map(|t| project_triangle(scene.projection_matrix(), t, viewport))
            .collect();
        stats.projected = projected.len();

        depth_sort(&mut projected);
        (projected, stats)
    }

    /// Render one frame of `scene` onto `surface`
    pub fn render<S: DrawSurface>(
        &self,
        scene: &Scene,
        viewport: &Viewport,
        surface: &mut S,
    ) -> FrameStats {
        let (sorted, mut stats) = self.project(scene, viewport);

        for triangle in &sorted {
            for fragment in clip_to_viewport(triangle, viewport) {
                let points = fragment.screen_points();
                surface.fill_triangle(points, fragment.color);
                if let Some(color) = self.outline {
                    surface.outline_triangle(points, color);
                }
                stats.drawn += 1;
            }
        }

        log::trace!("frame: {:?}", stats);
        stats
    }
}

/// Painter's order: descending average depth. Stable, so equal depths keep
/// their input order.
pub fn depth_sort(triangles: &mut [Triangle]) {
    triangles.sort_by(|a, b| b.average_depth().total_cmp(&a.average_depth()));
}

/// Clip a screen-space triangle against the four viewport edges.
///
/// Each edge consumes the whole queue left by the previous one, so pieces
/// produced at one edge are clipped again at the next.
pub fn clip_to_viewport(triangle: &Triangle, viewport: &Viewport) -> Vec<Triangle> {
    let mut queue = VecDeque::from([*triangle]);

    for edge in Plane::viewport_edges(viewport) {
        for _ in 0..queue.len() {
            let Some(next) = queue.pop_front() else {
                break;
            };
            queue.extend(clip_against_plane(&edge, &next));
        }
    }

    queue.into()
}
