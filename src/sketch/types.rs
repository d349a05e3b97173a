use serde::{Deserialize, Serialize};

use super::constraint::SketchConstraint;
use super::{EntityId, EntityKind, SketchError};
use crate::geometry::Point2;

/// A point with a mutable position. The position is the only field of
/// any entity that changes during solving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPoint {
    pub id: EntityId,
    pub position: Point2,
}

/// A line between two points, referenced by id. Topology is immutable
/// after creation; the geometry is derived from the two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchLine {
    pub id: EntityId,
    pub start: EntityId,
    pub end: EntityId,
}

/// Fixes the length of a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceConstraint {
    pub id: EntityId,
    pub line: EntityId,
    pub length: f64,
}

/// Fixes the angle at a corner point between two arm points.
/// The target is in degrees; transforms convert to radians internally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleConstraint {
    pub id: EntityId,
    pub corner: EntityId,
    pub arm1: EntityId,
    pub arm2: EntityId,
    pub degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SketchEntity {
    Point(SketchPoint),
    Line(SketchLine),
    Distance(DistanceConstraint),
    Angle(AngleConstraint),
}

impl SketchEntity {
    pub fn id(&self) -> EntityId {
        match self {
            SketchEntity::Point(p) => p.id,
            SketchEntity::Line(l) => l.id,
            SketchEntity::Distance(c) => c.id,
            SketchEntity::Angle(c) => c.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            SketchEntity::Point(_) => EntityKind::Point,
            SketchEntity::Line(_) => EntityKind::Line,
            SketchEntity::Distance(_) => EntityKind::DistanceConstraint,
            SketchEntity::Angle(_) => EntityKind::AngleConstraint,
        }
    }
}

/// Opaque full-value copy of a sketch's entity set, taken before a
/// speculative solve attempt and reinstated if the attempt fails.
#[derive(Debug, Clone)]
pub struct SketchSnapshot(Vec<SketchEntity>);

/// A 2D sketch: one ordered registry of entities addressed by id.
///
/// Insertion order is iteration/draw order. For constraints it is also
/// the solver's application order, which makes it semantically
/// significant when constraints alias shared points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    entities: Vec<SketchEntity>,
    next_id: u64,
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // ============== Authoring ==============

    pub fn add_point(&mut self, position: Point2) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(SketchEntity::Point(SketchPoint { id, position }));
        id
    }

    pub fn add_line(&mut self, start: EntityId, end: EntityId) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(SketchEntity::Line(SketchLine { id, start, end }));
        id
    }

    pub fn add_distance_constraint(&mut self, line: EntityId, length: f64) -> EntityId {
        let id = self.allocate_id();
        self.entities
            .push(SketchEntity::Distance(DistanceConstraint { id, line, length }));
        id
    }

    pub fn add_angle_constraint(
        &mut self,
        corner: EntityId,
        arm1: EntityId,
        arm2: EntityId,
        degrees: f64,
    ) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(SketchEntity::Angle(AngleConstraint {
            id,
            corner,
            arm1,
            arm2,
            degrees,
        }));
        id
    }

    // ============== Lookup ==============

    /// Look up any entity by id.
    pub fn entity(&self, id: EntityId) -> Result<&SketchEntity, SketchError> {
        self.entities
            .iter()
            .find(|e| e.id() == id)
            .ok_or(SketchError::NotFound(id))
    }

    /// Look up a point by id, checking the kind.
    pub fn point(&self, id: EntityId) -> Result<&SketchPoint, SketchError> {
        match self.entity(id)? {
            SketchEntity::Point(p) => Ok(p),
            other => Err(SketchError::KindMismatch {
                id,
                expected: EntityKind::Point,
                found: other.kind(),
            }),
        }
    }

    /// Mutable point lookup; the solver's only write path into geometry.
    pub fn point_mut(&mut self, id: EntityId) -> Result<&mut SketchPoint, SketchError> {
        let index = self
            .entities
            .iter()
            .position(|e| e.id() == id)
            .ok_or(SketchError::NotFound(id))?;
        match &mut self.entities[index] {
            SketchEntity::Point(p) => Ok(p),
            other => Err(SketchError::KindMismatch {
                id,
                expected: EntityKind::Point,
                found: other.kind(),
            }),
        }
    }

    /// Look up a line by id, checking the kind.
    pub fn line(&self, id: EntityId) -> Result<&SketchLine, SketchError> {
        match self.entity(id)? {
            SketchEntity::Line(l) => Ok(l),
            other => Err(SketchError::KindMismatch {
                id,
                expected: EntityKind::Line,
                found: other.kind(),
            }),
        }
    }

    // ============== Views ==============

    /// All entities in insertion order.
    pub fn entities(&self) -> &[SketchEntity] {
        &self.entities
    }

    /// Points in insertion order, for drawing.
    pub fn points(&self) -> impl Iterator<Item = &SketchPoint> {
        self.entities.iter().filter_map(|e| match e {
            SketchEntity::Point(p) => Some(p),
            _ => None,
        })
    }

    /// Lines in insertion order, for drawing.
    pub fn lines(&self) -> impl Iterator<Item = &SketchLine> {
        self.entities.iter().filter_map(|e| match e {
            SketchEntity::Line(l) => Some(l),
            _ => None,
        })
    }

    /// Constraints in insertion order. Constraint records are small copy
    /// values, so the view yields owned copies; the solver collects them
    /// up front to keep mutating entity access free of borrow conflicts.
    pub fn constraints(&self) -> impl Iterator<Item = SketchConstraint> + '_ {
        self.entities.iter().filter_map(|e| match e {
            SketchEntity::Distance(c) => Some(SketchConstraint::Distance(*c)),
            SketchEntity::Angle(c) => Some(SketchConstraint::Angle(*c)),
            _ => None,
        })
    }

    // ============== Snapshot / Restore ==============

    /// Full-value copy of the entity set. Point positions copy by value,
    /// so later mutation cannot leak back into the snapshot.
    pub fn snapshot(&self) -> SketchSnapshot {
        SketchSnapshot(self.entities.clone())
    }

    /// Replace the live entity set with a previously taken snapshot.
    /// Every alias of a shared point observes the reverted value.
    pub fn restore(&mut self, snapshot: SketchSnapshot) {
        self.entities = snapshot.0;
    }
}
