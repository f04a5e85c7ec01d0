/// Builders for the transformation matrices used by the pipeline
use crate::matrix::Matrix4x4;
use crate::vector::Vector3H;

/// Transform builder for 3D transformations.
///
/// Every builder returns a fresh matrix in row-vector convention: compose
/// with `a * b` to apply `a` first.
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4x4 {
        let mut matrix = Matrix4x4::zeros();
        for i in 0..4 {
            matrix[(i, i)] = 1.0;
        }
        matrix
    }

    /// Rotation about the X axis (radians)
    pub fn rotation_x(angle: f32) -> Matrix4x4 {
        let (sin, cos) = angle.sin_cos();
        let mut matrix = Matrix4x4::zeros();
        matrix[(0, 0)] = 1.0;
        matrix[(1, 1)] = cos;
        matrix[(1, 2)] = sin;
        matrix[(2, 1)] = -sin;
        matrix[(2, 2)] = cos;
        matrix[(3, 3)] = 1.0;
        matrix
    }

    /// Rotation about the Y axis (radians)
    pub fn rotation_y(angle: f32) -> Matrix4x4 {
        let (sin, cos) = angle.sin_cos();
        let mut matrix = Matrix4x4::zeros();
        matrix[(0, 0)] = cos;
        matrix[(0, 2)] = sin;
        matrix[(2, 0)] = -sin;
        matrix[(1, 1)] = 1.0;
        matrix[(2, 2)] = cos;
        matrix[(3, 3)] = 1.0;
        matrix
    }

    /// Rotation about the Z axis (radians)
    pub fn rotation_z(angle: f32) -> Matrix4x4 {
        let (sin, cos) = angle.sin_cos();
        let mut matrix = Matrix4x4::zeros();
        matrix[(0, 0)] = cos;
        matrix[(0, 1)] = sin;
        matrix[(1, 0)] = -sin;
        matrix[(1, 1)] = cos;
        matrix[(2, 2)] = 1.0;
        matrix[(3, 3)] = 1.0;
        matrix
    }

    /// Create a translation matrix
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4x4 {
        let mut matrix = Self::identity();
        matrix[(3, 0)] = x;
        matrix[(3, 1)] = y;
        matrix[(3, 2)] = z;
        matrix
    }

    /// Perspective projection.
    ///
    /// The fourth output coordinate of a projected vertex equals its
    /// view-space `z`, which is the perspective divisor.
    pub fn projection(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4x4 {
        let fov_rad = 1.0 / (fov_degrees * 0.5 / 180.0 * std::f32::consts::PI).tan();
        let mut matrix = Matrix4x4::zeros();
        matrix[(0, 0)] = aspect_ratio * fov_rad;
        matrix[(1, 1)] = fov_rad;
        matrix[(2, 2)] = far / (far - near);
        matrix[(3, 2)] = (-far * near) / (far - near);
        matrix[(2, 3)] = 1.0;
        matrix[(3, 3)] = 0.0;
        matrix
    }

    /// Camera-to-world matrix for a camera at `position` facing `target`.
    ///
    /// Rows are right, corrected up, forward and position. Returns `None`
    /// when `target == position` or `up` is parallel to the view direction.
    pub fn look_at(position: &Vector3H, target: &Vector3H, up: &Vector3H) -> Option<Matrix4x4> {
        let forward = (*target - *position).normalized()?;
        let up = (*up - forward * up.dot(&forward)).normalized()?;
        let right = up.cross(&forward);

        Some(Matrix4x4::from_rows([
            [right.x, right.y, right.z, 0.0],
            [up.x, up.y, up.z, 0.0],
            [forward.x, forward.y, forward.z, 0.0],
            [position.x, position.y, position.z, 1.0],
        ]))
    }

    /// Inverse of a rigid (rotation + translation) matrix.
    ///
    /// Transposes the 3x3 rotation block and rebuilds the translation row.
    /// Only valid when `m` has no scale or shear; any other input produces a
    /// wrong matrix without any error.
    pub fn quick_inverse(m: &Matrix4x4) -> Matrix4x4 {
        let mut inverse = Matrix4x4::zeros();
        for r in 0..3 {
            for c in 0..3 {
                inverse[(r, c)] = m[(c, r)];
            }
        }
        for c in 0..3 {
            inverse[(3, c)] = -(m[(3, 0)] * inverse[(0, c)]
                + m[(3, 1)] * inverse[(1, c)]
                + m[(3, 2)] * inverse[(2, c)]);
        }
        inverse[(3, 3)] = 1.0;
        inverse
    }

    /// Model-to-world matrix: spin about Z by `theta` and X by `theta / 2`,
    /// then move to `offset`.
    pub fn world(theta: f32, offset: &Vector3H) -> Matrix4x4 {
        let rotation = Self::rotation_z(theta) * Self::rotation_x(theta * 0.5);
        rotation * Self::translation(offset.x, offset.y, offset.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3H, b: Vector3H) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity_preserves_vectors() {
        let identity = Transform::identity();
        for v in [
            Vector3H::new(0.0, 0.0, 0.0),
            Vector3H::new(1.5, -2.0, 3.25),
            Vector3H::with_w(4.0, 5.0, 6.0, 0.5),
        ] {
            assert_eq!(identity.mul_vector(&v), v);
        }
    }

    #[test]
    fn test_rotations_preserve_length() {
        let v = Vector3H::new(1.0, -2.0, 3.0);
        for i in 0..16 {
            let theta = i as f32 * 0.7 - 3.0;
            for rotation in [
                Transform::rotation_x(theta),
                Transform::rotation_y(theta),
                Transform::rotation_z(theta),
            ] {
                let rotated = rotation.mul_vector(&v);
                assert!((rotated.length() - v.length()).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let r = Transform::rotation_z(std::f32::consts::FRAC_PI_2);
        assert_close(r.mul_vector(&Vector3H::new(1.0, 0.0, 0.0)), Vector3H::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_translation_moves_points() {
        let t = Transform::translation(1.0, 2.0, 3.0);
        assert_eq!(t.mul_vector(&Vector3H::new(1.0, 1.0, 1.0)), Vector3H::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_world_rotates_before_translating() {
        let offset = Vector3H::new(0.0, 0.0, 5.0);
        let world = Transform::world(std::f32::consts::FRAC_PI_2, &offset);

        // The origin only moves by the offset; rotation must not act on it.
        assert_close(world.mul_vector(&Vector3H::ZERO), offset);
    }

    #[test]
    fn test_projection_puts_depth_in_w() {
        let p = Transform::projection(90.0, 1.0, 0.1, 1000.0);
        assert!((p[(1, 1)] - 1.0).abs() < 1e-6);

        let v = p.mul_vector(&Vector3H::new(1.0, 1.0, 5.0));
        assert!((v.w - 5.0).abs() < 1e-6);
        assert!((v.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_round_trip() {
        let position = Vector3H::new(3.0, -1.0, 2.0);
        let target = Vector3H::new(0.0, 0.0, 10.0);
        let up = Vector3H::new(0.0, 1.0, 0.0);

        let camera = Transform::look_at(&position, &target, &up).unwrap();
        let view = Transform::quick_inverse(&camera);

        assert_close(view.mul_vector(&position), Vector3H::ZERO);
        assert!((camera * view).max_difference(&Transform::identity()) < 1e-5);

        // The target lies straight ahead along the camera's local z axis.
        let ahead = view.mul_vector(&target);
        assert!(ahead.x.abs() < 1e-4 && ahead.y.abs() < 1e-4);
        assert!(ahead.z > 0.0);
    }

    #[test]
    fn test_look_at_degenerate_inputs() {
        let up = Vector3H::new(0.0, 1.0, 0.0);
        let p = Vector3H::new(1.0, 1.0, 1.0);
        assert!(Transform::look_at(&p, &p, &up).is_none());
        assert!(Transform::look_at(&Vector3H::ZERO, &up, &up).is_none());
    }
}
