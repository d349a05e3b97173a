//! Pure 2D geometry helpers shared by the sketch constraints and solver.
//!
//! Everything here is stateless. Operations that need a unit vector go
//! through [`try_direction`] so a zero-length input can never leak a
//! non-finite value into sketch geometry.

use super::{Point2, Vec2, EPSILON};

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: &Point2, p2: &Point2) -> f64 {
    nalgebra::distance(p1, p2)
}

/// Linear interpolation between two points. `t` outside `[0, 1]`
/// extrapolates along the same line.
#[inline]
pub fn lerp(p1: &Point2, p2: &Point2, t: f64) -> Point2 {
    Point2::from(p1.coords.lerp(&p2.coords, t))
}

/// Rotate `p` around `pivot` by `radians`, counter-clockwise.
pub fn rotate_around(p: &Point2, pivot: &Point2, radians: f64) -> Point2 {
    let rotation = nalgebra::Rotation2::new(radians);
    *pivot + rotation * (p - pivot)
}

/// Perpendicular vector (90° counter-clockwise rotation).
#[inline]
pub fn perpendicular_ccw(v: &Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Signed angle of a vector in radians, atan2-based, in `(-PI, PI]`.
#[inline]
pub fn signed_angle(v: &Vec2) -> f64 {
    v.y.atan2(v.x)
}

/// Unit vector pointing from `from` to `to`, or `None` when the points
/// are numerically coincident.
#[inline]
pub fn try_direction(from: &Point2, to: &Point2) -> Option<Vec2> {
    (to - from).try_normalize(EPSILON)
}
