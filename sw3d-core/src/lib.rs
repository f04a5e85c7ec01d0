/// SW3D Core Library - software 3D-to-2D rendering pipeline
///
/// This library turns model-space triangles, a camera and a projection into
/// depth-ordered, screen-clipped, flat-shaded 2D triangles, and dispatches
/// them to any [`DrawSurface`].

pub mod camera;
pub mod clip;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod obj;
pub mod pipeline;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::{Camera, CameraSpeeds, Movement};
pub use clip::{clip_against_plane, intersect_plane, Clipped, Plane};
pub use error::LoadError;
pub use geometry::{Color, Mesh, Triangle};
pub use matrix::Matrix4x4;
pub use pipeline::{clip_to_viewport, depth_sort, FrameStats, Pipeline};
pub use projection::{project_triangle, ProjectionConfig, Viewport};
pub use scene::{ModelTransform, Scene};
pub use surface::{DrawCall, DrawSurface, RecordingSurface};
pub use transform::Transform;
pub use vector::Vector3H;
