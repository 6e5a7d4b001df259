//! Three-component real vector used for positions, velocities and accelerations
//!
//! Thin value wrapper over nalgebra's `Vector3<f64>` that pins down the
//! degenerate cases the engine relies on:
//! - normalizing the zero vector yields the zero vector (never NaN)
//! - `Display` renders as `(x, y, z)` with default `f64` formatting

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use nalgebra::Vector3;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3(pub NVec3);

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(NVec3::new(x, y, z))
    }

    pub fn zeros() -> Self {
        Self(NVec3::zeros())
    }

    pub fn x(&self) -> f64 { self.0.x }
    pub fn y(&self) -> f64 { self.0.y }
    pub fn z(&self) -> f64 { self.0.z }

    /// Euclidean norm, `sqrt(x² + y² + z²)`
    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    /// Unit vector in the same direction
    /// A vector of magnitude exactly 0 is returned unchanged
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return *self;
        }
        Self(self.0 / mag)
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// Componentwise multiply by `k`
    pub fn scale(&self, k: f64) -> Self {
        Self(self.0 * k)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.0.x, self.0.y, self.0.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 + rhs.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 - rhs.0)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        self.0 -= rhs.0;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3(-self.0)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, k: f64) -> Vec3 {
        self.scale(k)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        v.scale(self)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}
