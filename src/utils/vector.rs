use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::Zero;

use super::Axis;
use crate::error::{Error, Result};

/// Three-component real vector with value semantics
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    pub fn squared_magnitude(&self) -> f64 {
        self.dot(self)
    }
    pub fn magnitude(&self) -> f64 {
        self.squared_magnitude().sqrt()
    }
    /// Sum of the three components
    pub fn component_sum(&self) -> f64 {
        self.x + self.y + self.z
    }
    /// Divide every component by `divisor`.
    ///
    /// ```rust
    /// use crystmd::utils::Vector3;
    ///
    /// let v = Vector3::new(2.0, 4.0, 6.0);
    /// assert_eq!(v.checked_div(2.0).unwrap(), Vector3::new(1.0, 2.0, 3.0));
    /// assert!(v.checked_div(0.0).is_err());
    /// ```
    pub fn checked_div(self, divisor: f64) -> Result<Vector3> {
        if divisor == 0.0 {
            return Err(Error::DivisionByZero {
                context: "vector division",
            });
        }
        Ok(Vector3::new(self.x / divisor, self.y / divisor, self.z / divisor))
    }
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Zero for Vector3 {
    fn zero() -> Self {
        Vector3::splat(0.0)
    }
    fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Index<Axis> for Vector3 {
    type Output = f64;
    fn index(&self, axis: Axis) -> &f64 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
impl IndexMut<Axis> for Vector3 {
    fn index_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Self) -> Self::Output {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}
impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}
impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Self::Output {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}
impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Self::Output {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
impl Mul<Vector3> for f64 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl std::iter::Sum for Vector3 {
    fn sum<I: Iterator<Item = Vector3>>(iter: I) -> Self {
        iter.fold(Vector3::zero(), |acc, v| acc + v)
    }
}
