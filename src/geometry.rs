//! 3D point type for capture-space coordinates (meters)

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Sub};

/// A point in the capture coordinate system.
///
/// Serialized as a bare `[x, y, z]` array, matching the trial schema.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (height)
    pub z: f64,
}

impl Point3 {
    /// Origin
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Elementwise mean of two points.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        (self + other) / 2.0
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).norm()
    }

    /// Euclidean norm of the point as a vector from the origin.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.z.mul_add(self.z, self.x.mul_add(self.x, self.y * self.y)).sqrt()
    }

    /// Midpoint of the two points projected onto the xy-plane.
    #[must_use]
    pub fn xy_midpoint(self, other: Self) -> [f64; 2] {
        [(self.x + other.x) / 2.0, (self.y + other.y) / 2.0]
    }

    /// Coordinates as an array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Div<f64> for Point3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let a = Point3::new(0.0, 0.0, 1.0);
        let b = Point3::new(2.0, 4.0, 3.0);
        assert_eq!(a.midpoint(b), Point3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_distance_pythagorean() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let b = Point3::new(4.0, 5.0, 1.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance(a) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_xy_midpoint_ignores_z() {
        let rh = Point3::new(2.0, 4.0, 9.0);
        let lh = Point3::new(0.0, 0.0, -3.0);
        assert_eq!(rh.xy_midpoint(lh), [1.0, 2.0]);
    }

    #[test]
    fn test_serde_array_form() {
        let p: Point3 = serde_json::from_str("[1.5, -2.0, 0.25]").unwrap();
        assert_eq!(p, Point3::new(1.5, -2.0, 0.25));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,-2.0,0.25]");
    }
}
