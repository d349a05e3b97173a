//! Discrete corrective constraints over sketch geometry.
//!
//! Each constraint exposes a pure satisfaction predicate and a small
//! number of mutually exclusive corrective "branches". Applying a branch
//! moves the referenced point positions toward satisfaction; the solver
//! chooses which branch of each constraint to attempt.

use serde::{Deserialize, Serialize};

use super::types::{AngleConstraint, DistanceConstraint, Sketch};
use super::{EntityId, SketchError};
use crate::geometry::{self, EPSILON};

/// Absolute residual (length difference, or angle difference in degrees)
/// below which a constraint counts as satisfied.
pub const SATISFIED_EPSILON: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SketchConstraint {
    Distance(DistanceConstraint),
    Angle(AngleConstraint),
}

impl SketchConstraint {
    pub fn id(&self) -> EntityId {
        match self {
            SketchConstraint::Distance(c) => c.id,
            SketchConstraint::Angle(c) => c.id,
        }
    }

    /// Number of mutually exclusive corrective branches, always >= 1.
    pub fn branch_count(&self) -> usize {
        match self {
            SketchConstraint::Distance(_) => 2,
            // Only the exact right-angle case has the corner-slide and
            // law-of-cosines strategies implemented; every other target
            // falls back to the two rotation branches.
            SketchConstraint::Angle(c) if c.degrees == 90.0 => 6,
            SketchConstraint::Angle(_) => 2,
        }
    }

    /// Pure predicate: does the constraint currently hold within
    /// `epsilon`? Degenerate geometry (coincident points) reports
    /// unsatisfied rather than comparing against a non-finite value.
    pub fn is_satisfied(&self, sketch: &Sketch, epsilon: f64) -> Result<bool, SketchError> {
        match self {
            SketchConstraint::Distance(c) => c.is_satisfied(sketch, epsilon),
            SketchConstraint::Angle(c) => c.is_satisfied(sketch, epsilon),
        }
    }

    /// Apply the selected corrective branch, mutating point positions.
    ///
    /// Returns `Ok(false)` when the branch declines to act, which today
    /// only happens for degenerate geometry; `Err` means the sketch
    /// itself is malformed (dangling or mistyped id reference).
    pub fn apply(&self, sketch: &mut Sketch, branch: usize) -> Result<bool, SketchError> {
        match self {
            SketchConstraint::Distance(c) => c.apply(sketch, branch),
            SketchConstraint::Angle(c) => c.apply(sketch, branch),
        }
    }
}

impl DistanceConstraint {
    /// Current length of the constrained line.
    pub fn current_length(&self, sketch: &Sketch) -> Result<f64, SketchError> {
        let line = *sketch.line(self.line)?;
        let start = sketch.point(line.start)?.position;
        let end = sketch.point(line.end)?.position;
        Ok(geometry::distance(&start, &end))
    }

    fn is_satisfied(&self, sketch: &Sketch, epsilon: f64) -> Result<bool, SketchError> {
        Ok((self.current_length(sketch)? - self.length).abs() < epsilon)
    }

    /// Both branches scale one endpoint's offset from the other by
    /// `t = target / current`; they differ in which endpoint stays put.
    fn apply(&self, sketch: &mut Sketch, branch: usize) -> Result<bool, SketchError> {
        let line = *sketch.line(self.line)?;
        let start = sketch.point(line.start)?.position;
        let end = sketch.point(line.end)?.position;

        let current = geometry::distance(&start, &end);
        if current < EPSILON {
            // Coincident endpoints give no direction to scale along.
            return Ok(false);
        }
        let t = self.length / current;

        match branch {
            0 => sketch.point_mut(line.end)?.position = geometry::lerp(&start, &end, t),
            1 => sketch.point_mut(line.start)?.position = geometry::lerp(&end, &start, t),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl AngleConstraint {
    /// Angle at the corner between the two arm directions, in degrees,
    /// or `None` when either arm point coincides with the corner.
    pub fn current_angle(&self, sketch: &Sketch) -> Result<Option<f64>, SketchError> {
        let corner = sketch.point(self.corner)?.position;
        let arm1 = sketch.point(self.arm1)?.position;
        let arm2 = sketch.point(self.arm2)?.position;

        let (Some(v1), Some(v2)) = (
            geometry::try_direction(&arm1, &corner),
            geometry::try_direction(&arm2, &corner),
        ) else {
            return Ok(None);
        };

        Ok(Some(v1.dot(&v2).clamp(-1.0, 1.0).acos().to_degrees()))
    }

    fn is_satisfied(&self, sketch: &Sketch, epsilon: f64) -> Result<bool, SketchError> {
        Ok(match self.current_angle(sketch)? {
            Some(current) => (current - self.degrees).abs() < epsilon,
            None => false,
        })
    }

    fn apply(&self, sketch: &mut Sketch, branch: usize) -> Result<bool, SketchError> {
        let corner = sketch.point(self.corner)?.position;
        let arm1 = sketch.point(self.arm1)?.position;
        let arm2 = sketch.point(self.arm2)?.position;

        match branch {
            // Rotate one arm point around the corner by the remaining
            // offset, holding both arm lengths fixed. The sign flips for
            // the second arm so the rotation closes the gap from the
            // other side.
            0 | 1 => {
                let Some(current) = self.current_angle(sketch)? else {
                    return Ok(false);
                };
                let mut offset = self.degrees - current;
                let (point_id, point) = if branch == 0 {
                    (self.arm1, arm1)
                } else {
                    offset = -offset;
                    (self.arm2, arm2)
                };
                sketch.point_mut(point_id)?.position =
                    geometry::rotate_around(&point, &corner, -offset.to_radians());
                Ok(true)
            }
            // Slide the corner along one arm's direction by the other
            // arm's projection onto it, making the arms perpendicular
            // without rotating either arm point.
            2 | 3 => {
                let o1 = arm1 - corner;
                let o2 = arm2 - corner;
                let (along, other) = if branch == 2 { (o1, o2) } else { (o2, o1) };
                let Some(dir) = along.try_normalize(EPSILON) else {
                    return Ok(false);
                };
                let magnitude = other.dot(&dir);
                sketch.point_mut(self.corner)?.position = corner + dir * magnitude;
                Ok(true)
            }
            // Law-of-cosines reconstruction: with one arm point as the
            // pivot, solve the triangle side that yields the target
            // included angle and relocate the corner perpendicular to
            // pivot->far at that distance.
            4 | 5 => {
                let (pivot, far) = if branch == 4 { (arm1, arm2) } else { (arm2, arm1) };
                let c = geometry::distance(&pivot, &corner);
                let a = geometry::distance(&far, &pivot);
                let Some(dir) = geometry::try_direction(&pivot, &far) else {
                    return Ok(false);
                };
                let cos_target = self.degrees.to_radians().cos();
                let b = (a * a + c * c - 2.0 * a * c * cos_target).max(0.0).sqrt();
                sketch.point_mut(self.corner)?.position =
                    pivot + geometry::perpendicular_ccw(&dir) * b;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
