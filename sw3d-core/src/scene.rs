/// Render state owned by the host and passed to the pipeline each frame
use crate::camera::{Camera, CameraSpeeds, Movement};
use crate::geometry::Mesh;
use crate::matrix::Matrix4x4;
use crate::projection::ProjectionConfig;
use crate::transform::Transform;
use crate::vector::Vector3H;

/// Light direction used when none (or a zero vector) is supplied
pub const DEFAULT_LIGHT: Vector3H = Vector3H::new(0.0, 1.0, -1.0);

/// Placement of the mesh in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    /// Translation applied after rotation
    pub offset: Vector3H,
    /// Radians per second added to `theta`; zero keeps the model still
    pub spin_rate: f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            offset: Vector3H::new(0.0, 0.0, 5.0),
            spin_rate: 0.0,
        }
    }
}

/// Everything needed to render a frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub mesh: Mesh,
    pub camera: Camera,
    pub speeds: CameraSpeeds,
    pub model: ModelTransform,
    /// Accumulated model rotation phase (radians)
    pub theta: f32,
    light_dir: Vector3H,
    projection: ProjectionConfig,
    projection_matrix: Matrix4x4,
}

impl Scene {
    pub fn new(mesh: Mesh, projection: ProjectionConfig, aspect_ratio: f32) -> Self {
        Self {
            mesh,
            camera: Camera::default(),
            speeds: CameraSpeeds::default(),
            model: ModelTransform::default(),
            theta: 0.0,
            light_dir: normalized_light(DEFAULT_LIGHT),
            projection,
            projection_matrix: projection.matrix(aspect_ratio),
        }
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_speeds(mut self, speeds: CameraSpeeds) -> Self {
        self.speeds = speeds;
        self
    }

    pub fn with_model(mut self, model: ModelTransform) -> Self {
        self.model = model;
        self
    }

    pub fn with_light(mut self, direction: Vector3H) -> Self {
        self.light_dir = normalized_light(direction);
        self
    }

    /// Unit vector toward the light
    pub fn light_dir(&self) -> Vector3H {
        self.light_dir
    }

    pub fn projection(&self) -> &ProjectionConfig {
        &self.projection
    }

    pub fn projection_matrix(&self) -> &Matrix4x4 {
        &self.projection_matrix
    }

    /// Rebuild the projection matrix, e.g. after the surface was resized
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.projection_matrix = self.projection.matrix(aspect_ratio);
    }

    pub fn world_matrix(&self) -> Matrix4x4 {
        Transform::world(self.theta, &self.model.offset)
    }

    /// Advance one frame: spin the model and move the camera
    pub fn advance(&mut self, dt: f32, movement: Movement) {
        self.theta += self.model.spin_rate * dt;
        self.camera.apply(movement, dt, &self.speeds);
    }
}

fn normalized_light(direction: Vector3H) -> Vector3H {
    direction.normalized().unwrap_or_else(|| {
        log::warn!("light direction {:?} has no length, using default", direction);
        let d = DEFAULT_LIGHT;
        d / d.length()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_is_normalized() {
        let scene = Scene::new(Mesh::new(), ProjectionConfig::default(), 1.0)
            .with_light(Vector3H::new(0.0, 3.0, 4.0));
        assert!((scene.light_dir().length() - 1.0).abs() < 1e-6);
        assert!((scene.light_dir().z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_zero_light_falls_back_to_default() {
        let scene = Scene::new(Mesh::new(), ProjectionConfig::default(), 1.0)
            .with_light(Vector3H::ZERO);
        let light = scene.light_dir();
        assert!((light.length() - 1.0).abs() < 1e-6);
        assert!((light.y + light.z).abs() < 1e-6);
    }

    #[test]
    fn test_advance_spins_and_moves() {
        let mut scene = Scene::new(Mesh::cube(1.0), ProjectionConfig::default(), 1.0)
            .with_model(ModelTransform {
                offset: Vector3H::new(0.0, 0.0, 3.0),
                spin_rate: 1.0,
            });

        scene.advance(0.5, Movement::FORWARD);
        assert!((scene.theta - 0.5).abs() < 1e-6);
        assert!((scene.camera.position.z - 4.0).abs() < 1e-5);

        scene.advance(0.5, Movement::empty());
        assert!((scene.theta - 1.0).abs() < 1e-6);
        assert!((scene.camera.position.z - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_static_model_keeps_theta() {
        let mut scene = Scene::new(Mesh::cube(1.0), ProjectionConfig::default(), 1.0);
        scene.advance(2.0, Movement::empty());
        assert_eq!(scene.theta, 0.0);
    }
}
