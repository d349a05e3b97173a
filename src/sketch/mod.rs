//! 2D Sketch System
//!
//! An id-indexed registry of geometric entities (points, lines) and
//! discrete constraints (line length, corner angle), plus the
//! backtracking solver that mutates point positions until every
//! constraint holds.

pub mod constraint;
pub mod solver;
pub mod types;

pub use constraint::{SketchConstraint, SATISFIED_EPSILON};
pub use solver::{SketchSolver, SolveResult};
pub use types::{
    AngleConstraint, DistanceConstraint, Sketch, SketchEntity, SketchLine, SketchPoint,
    SketchSnapshot,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[cfg(test)]
mod tests_infrastructure;

/// Identifier for any sketch entity (point, line, or constraint).
///
/// Points, lines, and constraints draw from one shared id namespace, so
/// a lookup must check the entity kind as well as the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of entity an id resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Point,
    Line,
    DistanceConstraint,
    AngleConstraint,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Point => "point",
            EntityKind::Line => "line",
            EntityKind::DistanceConstraint => "distance constraint",
            EntityKind::AngleConstraint => "angle constraint",
        };
        write!(f, "{name}")
    }
}

/// Errors surfaced by the sketch registry.
///
/// Both variants indicate a malformed sketch definition (a dangling or
/// mistyped id reference) discovered at first use, not a recoverable
/// runtime condition. The solver itself never fails with these on a
/// well-formed sketch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SketchError {
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    #[error("entity {id} is a {found}, expected a {expected}")]
    KindMismatch {
        id: EntityId,
        expected: EntityKind,
        found: EntityKind,
    },
}
