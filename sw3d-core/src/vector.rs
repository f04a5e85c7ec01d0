/// Homogeneous 3D vector used throughout the pipeline
use nalgebra::{RowVector4, Vector3};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D point or direction with a homogeneous `w` component.
///
/// `w` is 1 for ordinary points. Only a matrix multiply changes it; after a
/// projection it holds the perspective divisor. The arithmetic operators
/// work on `x`, `y`, `z` and always return `w = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3H {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector3H {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    pub const fn with_w(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.xyz().dot(&other.xyz())
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::from_xyz(self.xyz().cross(&other.xyz()))
    }

    /// Euclidean length of the `xyz` part
    pub fn length(&self) -> f32 {
        self.xyz().norm()
    }

    /// Unit vector in the same direction.
    ///
    /// Returns `None` for a zero-length or non-finite vector instead of
    /// producing NaN components.
    pub fn normalized(&self) -> Option<Self> {
        self.xyz()
            .try_normalize(0.0)
            .map(Self::from_xyz)
            .filter(Self::is_finite)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    pub(crate) fn xyz(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub(crate) fn from_xyz(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub(crate) fn to_row(self) -> RowVector4<f32> {
        RowVector4::new(self.x, self.y, self.z, self.w)
    }

    pub(crate) fn from_row(row: RowVector4<f32>) -> Self {
        Self::with_w(row[0], row[1], row[2], row[3])
    }
}

impl Default for Vector3H {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f32; 3]> for Vector3H {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for Vector3H {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3H {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3H {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Div<f32> for Vector3H {
    type Output = Self;

    fn div(self, k: f32) -> Self {
        Self::new(self.x / k, self.y / k, self.z / k)
    }
}

impl Neg for Vector3H {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
