/// 4x4 matrix in row-vector convention
use nalgebra::Matrix4;
use std::ops::{Index, IndexMut, Mul};

use crate::vector::Vector3H;

/// A 4x4 `f32` matrix indexed as `m[(row, col)]`.
///
/// Vectors are treated as rows and multiplied on the left (`v' = v · M`), so
/// translation lives in row 3 and `a * b` applies `a` first, then `b`.
/// A fresh matrix is all zeros, not identity; see
/// [`Transform::identity`](crate::Transform::identity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4 {
    m: Matrix4<f32>,
}

impl Matrix4x4 {
    pub fn zeros() -> Self {
        Self {
            m: Matrix4::zeros(),
        }
    }

    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut matrix = Self::zeros();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                matrix[(r, c)] = *value;
            }
        }
        matrix
    }

    /// Standard row-by-column product `self · rhs`
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self { m: self.m * rhs.m }
    }

    /// Multiply a row vector by this matrix, accumulating all four components
    pub fn mul_vector(&self, v: &Vector3H) -> Vector3H {
        Vector3H::from_row(v.to_row() * self.m)
    }

    /// Maximum absolute element-wise difference, used for approximate comparisons
    pub fn max_difference(&self, other: &Self) -> f32 {
        (self.m - other.m).amax()
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<(usize, usize)> for Matrix4x4 {
    type Output = f32;

    fn index(&self, index: (usize, usize)) -> &f32 {
        &self.m[index]
    }
}

impl IndexMut<(usize, usize)> for Matrix4x4 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f32 {
        &mut self.m[index]
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let m = Matrix4x4::default();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(m[(r, c)], 0.0);
            }
        }
    }

    #[test]
    fn test_mul_vector_uses_rows_for_translation() {
        let mut m = Matrix4x4::zeros();
        for i in 0..4 {
            m[(i, i)] = 1.0;
        }
        m[(3, 0)] = 2.0;
        m[(3, 1)] = -1.0;

        let v = m.mul_vector(&Vector3H::new(1.0, 1.0, 1.0));
        assert_eq!(v, Vector3H::with_w(3.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_mul_vector_accumulates_w() {
        let mut m = Matrix4x4::zeros();
        m[(2, 3)] = 1.0;

        let v = m.mul_vector(&Vector3H::new(0.0, 0.0, 7.0));
        assert_eq!(v.w, 7.0);
    }

    #[test]
    fn test_mul_is_row_by_column() {
        let a = Matrix4x4::from_rows([
            [1.0, 2.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let b = Matrix4x4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [3.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        let ab = a * b;
        assert_eq!(ab[(0, 0)], 7.0);
        assert_eq!(ab[(0, 1)], 2.0);

        let ba = b * a;
        assert_eq!(ba[(1, 0)], 3.0);
        assert_eq!(ba[(1, 1)], 7.0);
        assert_ne!(ab, ba);
    }
}
