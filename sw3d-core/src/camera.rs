/// First-person camera driven by discrete movement intents
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix4x4;
use crate::transform::Transform;
use crate::vector::Vector3H;

bitflags! {
    /// Movement intents sampled by the host once per frame
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Movement: u8 {
        /// Move along world +Y
        const UP = 1 << 0;
        /// Move along world -Y
        const DOWN = 1 << 1;
        /// Move along world -X
        const LEFT = 1 << 2;
        /// Move along world +X
        const RIGHT = 1 << 3;
        /// Move along the look direction
        const FORWARD = 1 << 4;
        /// Move against the look direction
        const BACK = 1 << 5;
        /// Swing the view toward world -X (increase yaw)
        const TURN_LEFT = 1 << 6;
        /// Swing the view toward world +X (decrease yaw)
        const TURN_RIGHT = 1 << 7;
    }
}

/// Camera speeds, scaled by frame time so movement is frame-rate independent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSpeeds {
    /// Units per second
    pub move_speed: f32,
    /// Radians per second
    pub turn_speed: f32,
}

impl Default for CameraSpeeds {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            turn_speed: 2.0,
        }
    }
}

/// Camera pose: a position and a yaw about the world up axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3H,
    pub yaw: f32,
    pub up: Vector3H,
}

impl Camera {
    pub fn new(position: Vector3H, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            up: Vector3H::new(0.0, 1.0, 0.0),
        }
    }

    /// Unit look direction: `+Z` rotated about `Y` by `yaw`
    pub fn look_dir(&self) -> Vector3H {
        Transform::rotation_y(self.yaw).mul_vector(&Vector3H::new(0.0, 0.0, 1.0))
    }

    /// World-to-camera matrix, `None` if the pose is degenerate
    pub fn view_matrix(&self) -> Option<Matrix4x4> {
        let target = self.position + self.look_dir();
        Transform::look_at(&self.position, &target, &self.up).map(|m| Transform::quick_inverse(&m))
    }

    /// Update position and yaw from this frame's intents
    pub fn apply(&mut self, movement: Movement, dt: f32, speeds: &CameraSpeeds) {
        let step = speeds.move_speed * dt;
        let turn = speeds.turn_speed * dt;

        if movement.contains(Movement::UP) {
            self.position.y += step;
        }
        if movement.contains(Movement::DOWN) {
            self.position.y -= step;
        }
        if movement.contains(Movement::LEFT) {
            self.position.x -= step;
        }
        if movement.contains(Movement::RIGHT) {
            self.position.x += step;
        }

        let forward = self.look_dir() * step;
        if movement.contains(Movement::FORWARD) {
            self.position = self.position + forward;
        }
        if movement.contains(Movement::BACK) {
            self.position = self.position - forward;
        }

        if movement.contains(Movement::TURN_LEFT) {
            self.yaw += turn;
        }
        if movement.contains(Movement::TURN_RIGHT) {
            self.yaw -= turn;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3H::ZERO, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_looks_down_z() {
        let camera = Camera::default();
        let look = camera.look_dir();
        assert!(look.x.abs() < 1e-6);
        assert!((look.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_forward_follows_look_direction() {
        let mut camera = Camera::default();
        let speeds = CameraSpeeds::default();

        camera.apply(Movement::FORWARD, 0.5, &speeds);
        assert!((camera.position.z - 4.0).abs() < 1e-5);

        camera.apply(Movement::BACK, 0.25, &speeds);
        assert!((camera.position.z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_strafe_and_elevation_use_world_axes() {
        let mut camera = Camera::new(Vector3H::ZERO, 1.0);
        let speeds = CameraSpeeds {
            move_speed: 1.0,
            turn_speed: 1.0,
        };

        camera.apply(Movement::UP | Movement::RIGHT, 1.0, &speeds);
        assert_eq!(camera.position, Vector3H::new(1.0, 1.0, 0.0));

        camera.apply(Movement::DOWN | Movement::LEFT, 2.0, &speeds);
        assert_eq!(camera.position, Vector3H::new(-1.0, -1.0, 0.0));
    }

    #[test]
    fn test_turning_changes_yaw_only() {
        let mut camera = Camera::default();
        camera.apply(Movement::TURN_RIGHT, 0.5, &CameraSpeeds::default());
        assert!((camera.yaw + 1.0).abs() < 1e-6);
        assert_eq!(camera.position, Vector3H::ZERO);

        camera.apply(Movement::TURN_LEFT | Movement::TURN_RIGHT, 1.0, &CameraSpeeds::default());
        assert!((camera.yaw + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_turn_right_looks_toward_positive_x() {
        let mut camera = Camera::default();
        camera.apply(Movement::TURN_RIGHT, 0.1, &CameraSpeeds::default());
        assert!(camera.look_dir().x > 0.0);

        camera.apply(Movement::TURN_LEFT, 0.2, &CameraSpeeds::default());
        assert!(camera.look_dir().x < 0.0);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = Camera::new(Vector3H::new(2.0, 3.0, -4.0), 0.8);
        let view = camera.view_matrix().unwrap();
        assert!(view.mul_vector(&camera.position).length() < 1e-4);
    }
}
